// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use http::header;
use http::uri::Authority;
use http::uri::Scheme;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;

use crate::Error;
use crate::Result;

/// Media type used when neither the request nor its payload declares one.
pub const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

/// Signing context for request.
///
/// Built from an outgoing request without mutating it. Every field is owned
/// so the context can outlive the borrowed request parts.
#[derive(Debug, Clone)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path, as received (still percent-encoded).
    pub path: String,
    /// Decoded HTTP query parameters in received order.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
    /// Fully materialized request body, if any.
    pub payload: Option<Payload>,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &http::request::Parts, payload: Option<Payload>) -> Result<Self> {
        let authority = parts
            .uri
            .authority()
            .cloned()
            .ok_or_else(|| Error::request_invalid("request without authority is invalid for signing"))?;

        Ok(SigningRequest {
            method: parts.method.clone(),
            scheme: parts.uri.scheme().cloned().unwrap_or(Scheme::HTTP),
            authority,
            path: parts.uri.path().to_string(),
            query: parts
                .uri
                .query()
                .map(|v| {
                    form_urlencoded::parse(v.as_bytes())
                        .map(|(k, v)| (k.into_owned(), v.into_owned()))
                        .collect()
                })
                .unwrap_or_default(),
            headers: parts.headers.clone(),
            payload,
        })
    }

    /// Build a signing context from a request whose body is already in memory.
    ///
    /// The body becomes the payload without a declared content type.
    pub fn from_request<B: AsRef<[u8]>>(req: &http::Request<B>) -> Result<Self> {
        let payload = Payload::new(Bytes::copy_from_slice(req.body().as_ref()));
        let (mut parts, ()) = http::Request::new(()).into_parts();
        parts.method = req.method().clone();
        parts.uri = req.uri().clone();
        parts.headers = req.headers().clone();

        Self::build(&parts, Some(payload))
    }

    /// Host as it appears in the `Host` header.
    ///
    /// The port is kept only when it isn't the default port of the scheme.
    pub fn host(&self) -> Cow<'_, str> {
        let default_port = if self.scheme == Scheme::HTTPS {
            443
        } else if self.scheme == Scheme::HTTP {
            80
        } else {
            0
        };

        match self.authority.port_u16() {
            Some(port) if port != default_port => {
                Cow::Owned(format!("{}:{}", self.authority.host(), port))
            }
            _ => Cow::Borrowed(self.authority.host()),
        }
    }

    /// Get the first header value by name.
    pub fn header_get(&self, name: &str) -> Result<Option<&str>> {
        match self.headers.get(name) {
            Some(v) => Ok(Some(header_value_str(v)?)),
            None => Ok(None),
        }
    }

    /// Get all header values by name in the order they were added.
    ///
    /// Header names are matched case-insensitively.
    pub fn header_values(&self, name: &str) -> Result<Vec<&str>> {
        self.headers
            .get_all(name)
            .iter()
            .map(header_value_str)
            .collect()
    }

    /// Normalize header value: trim and collapse inner runs of whitespace
    /// into one space.
    pub fn header_value_normalize(v: &str) -> String {
        v.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Group query values by key, keys and values kept in received order
    /// inside each group.
    pub fn query_grouped(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut grouped: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (k, v) in &self.query {
            grouped.entry(k.as_str()).or_default().push(v.as_str());
        }
        grouped
    }

    /// Resolve the content type of this request.
    ///
    /// An explicit `Content-Type` header wins over the payload's declared
    /// type. Without either, [`DEFAULT_MEDIA_TYPE`] is used.
    pub fn content_type(&self) -> Result<ContentType> {
        if let Some(v) = self.header_get(header::CONTENT_TYPE.as_str())? {
            return v.parse();
        }

        Ok(self
            .payload
            .as_ref()
            .and_then(|p| p.content_type().cloned())
            .unwrap_or_default())
    }
}

/// Header value as text. Any valid UTF-8 is accepted, not only visible ASCII.
fn header_value_str(v: &HeaderValue) -> Result<&str> {
    std::str::from_utf8(v.as_bytes()).map_err(|e| {
        Error::request_invalid("header value is not valid utf-8").with_source(e)
    })
}

/// A fully materialized request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    data: Bytes,
    content_type: Option<ContentType>,
}

impl Payload {
    /// Create a new payload.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            content_type: None,
        }
    }

    /// Declare the content type of this payload.
    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Payload bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Declared content type.
    pub fn content_type(&self) -> Option<&ContentType> {
        self.content_type.as_ref()
    }
}

/// Content type split into media type and charset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    media_type: String,
    charset: Option<String>,
}

impl ContentType {
    /// Create a content type without charset.
    pub fn new(media_type: impl Into<String>) -> Self {
        Self {
            media_type: media_type.into(),
            charset: None,
        }
    }

    /// Set the charset.
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Media type including parameters other than charset.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Charset parameter, if any.
    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }
}

impl Default for ContentType {
    fn default() -> Self {
        Self::new(DEFAULT_MEDIA_TYPE)
    }
}

impl FromStr for ContentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut params = s.split(';');
        let mime = params.next().unwrap_or_default().trim().to_ascii_lowercase();
        if !matches!(mime.split_once('/'), Some((t, st)) if !t.is_empty() && !st.is_empty()) {
            return Err(Error::request_invalid(format!(
                "content type {s:?} has no valid media type"
            )));
        }

        let mut ct = ContentType::new(mime);
        for param in params {
            let Some((name, value)) = param.split_once('=') else {
                continue;
            };
            let (name, value) = (name.trim(), value.trim().trim_matches('"'));
            if name.eq_ignore_ascii_case("charset") {
                ct.charset = Some(value.to_string());
            } else if !name.is_empty() {
                ct.media_type.push_str("; ");
                ct.media_type.push_str(name);
                ct.media_type.push('=');
                ct.media_type.push_str(value);
            }
        }

        Ok(ct)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.media_type)?;
        if let Some(charset) = &self.charset {
            write!(f, "; charset={charset}")?;
        }
        Ok(())
    }
}

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

use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode};
use pushsign_core::time::{format_iso8601, DateTime};
use pushsign_core::{Result, SigningRequest};

use crate::constants::*;
use crate::SigningConfig;

/// Canonical request of [AWS SigV4](https://docs.aws.amazon.com/IAM/latest/UserGuide/create-signed-request.html#create-canonical-request).
///
/// ```text
/// <HTTPMethod>\n
/// <CanonicalURI>\n
/// <CanonicalQueryString>\n
/// <CanonicalHeaders>\n
/// <SignedHeaders>\n
/// <HashedPayload>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    method: String,
    uri: String,
    query: String,
    headers: String,
    signed_headers: String,
    payload_hash: String,
}

impl CanonicalRequest {
    /// Build the canonical request for `req`.
    ///
    /// `time` is the already parsed signing time and `payload_hash` the value
    /// chosen for the payload, both are echoed into their headers.
    pub fn build(
        req: &SigningRequest,
        config: &SigningConfig,
        time: DateTime,
        payload_hash: &str,
    ) -> Result<Self> {
        Ok(Self {
            method: req.method.as_str().to_uppercase(),
            uri: canonical_uri(&req.path, config.double_encode_path())?,
            query: canonical_query(req),
            headers: canonical_headers(req, config.canonical_header_names(), time, payload_hash)?,
            signed_headers: config.signed_headers(),
            payload_hash: payload_hash.to_string(),
        })
    }

    /// The six parts in order, ready to be joined with `\n`.
    pub fn parts(&self) -> [&str; 6] {
        [
            &self.method,
            &self.uri,
            &self.query,
            &self.headers,
            &self.signed_headers,
            &self.payload_hash,
        ]
    }

    /// Canonical URI part.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Canonical query string part.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Canonical headers block, every line ends with `\n`.
    pub fn headers(&self) -> &str {
        &self.headers
    }
}

impl fmt::Display for CanonicalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts().join("\n"))
    }
}

/// Role a signed header plays in the canonical request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderRole<'a> {
    /// Taken from the request authority.
    Host,
    /// Taken from the content type header or the payload.
    ContentType,
    /// The payload hash.
    ContentSha256,
    /// The signing time.
    Date,
    /// Any other header, read from the request.
    Generic(&'a str),
}

impl<'a> HeaderRole<'a> {
    fn of(name: &'a str) -> Self {
        match name {
            HOST => HeaderRole::Host,
            CONTENT_TYPE => HeaderRole::ContentType,
            X_AMZ_CONTENT_SHA_256 => HeaderRole::ContentSha256,
            X_AMZ_DATE => HeaderRole::Date,
            other => HeaderRole::Generic(other),
        }
    }

    fn value(self, req: &SigningRequest, time: DateTime, payload_hash: &str) -> Result<String> {
        let value = match self {
            HeaderRole::Host => req.host().into_owned(),
            HeaderRole::ContentType => req.content_type()?.to_string(),
            HeaderRole::ContentSha256 => payload_hash.to_string(),
            HeaderRole::Date => format_iso8601(time),
            HeaderRole::Generic(name) => req
                .header_values(name)?
                .into_iter()
                .map(SigningRequest::header_value_normalize)
                .collect::<Vec<_>>()
                .join(","),
        };
        Ok(value)
    }
}

/// Canonical URI.
///
/// Without double encoding the path is used as received. Otherwise every
/// non-empty segment is decoded and then encoded twice.
pub(crate) fn canonical_uri(path: &str, double_encode: bool) -> Result<String> {
    if !double_encode {
        return Ok(if path.is_empty() {
            "/".to_string()
        } else {
            path.to_string()
        });
    }

    let segments = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| -> Result<String> {
            let decoded = percent_decode_str(s).decode_utf8()?;
            let once = utf8_percent_encode(&decoded, &AWS_ENCODE_SET).to_string();
            Ok(utf8_percent_encode(&once, &AWS_ENCODE_SET).to_string())
        })
        .collect::<Result<Vec<_>>>()?;

    if segments.is_empty() {
        return Ok("/".to_string());
    }

    let trailing = if path.ends_with('/') { "/" } else { "" };
    Ok(format!("/{}{trailing}", segments.join("/")))
}

/// Canonical query string.
///
/// Keys sorted by code point, values of a key sorted by code point. `=` in
/// values is turned into `%3D` before encoding so it ends up double encoded.
pub(crate) fn canonical_query(req: &SigningRequest) -> String {
    req.query_grouped()
        .into_iter()
        .flat_map(|(key, mut values)| {
            let key = utf8_percent_encode(key, &AWS_ENCODE_SET).to_string();
            values.sort_unstable();
            values.into_iter().map(move |value| {
                let value = value.replace('=', "%3D");
                format!("{key}={}", utf8_percent_encode(&value, &AWS_ENCODE_SET))
            })
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Canonical headers block, one `name:value\n` line per signed header.
///
/// Headers missing from the request still get a line with an empty value.
pub(crate) fn canonical_headers(
    req: &SigningRequest,
    names: &[String],
    time: DateTime,
    payload_hash: &str,
) -> Result<String> {
    let mut block = String::with_capacity(names.len() * 32);
    for name in names {
        let value = HeaderRole::of(name).value(req, time, payload_hash)?;
        block.push_str(name);
        block.push(':');
        block.push_str(&value);
        block.push('\n');
    }
    Ok(block)
}

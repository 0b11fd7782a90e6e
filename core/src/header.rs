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

//! Well known HTTP header names used by push connections.
//!
//! Signing doesn't look at this table, it works on raw header names.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use http::HeaderName;
use once_cell::sync::Lazy;

use crate::Error;

/// An HTTP header known to the push connection harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpHeader {
    /// `Authorization`
    Authorization,
    /// `WWW-Authenticate`
    WwwAuthenticate,
    /// `Date`
    Date,
    /// `Host`
    Host,
    /// `Location`
    Location,
    /// `Origin`
    Origin,
    /// `Content-Type`
    ContentType,
    /// `Timeout` of messages.
    Timeout,
    /// `response-required`
    ResponseRequired,
    /// `x-correlation-id`
    XCorrelationId,
    /// Authentication already done by a reverse proxy in front of the service.
    XDittoPreAuthenticated,
    /// Order of the json keys inside the message payload.
    XThingsParameterOrder,
    /// Allows creating a policy without WRITE permission on itself.
    AllowPolicyLockout,
    /// Metadata relative to the modified resource.
    PutMetadata,
    /// Condition that must hold for an update to be applied.
    Condition,
}

static BY_NAME: Lazy<HashMap<&'static str, HttpHeader>> = Lazy::new(|| {
    HttpHeader::ALL
        .iter()
        .map(|h| (h.canonical_name(), *h))
        .collect()
});

impl HttpHeader {
    /// Every known header, in declaration order.
    pub const ALL: [HttpHeader; 15] = [
        HttpHeader::Authorization,
        HttpHeader::WwwAuthenticate,
        HttpHeader::Date,
        HttpHeader::Host,
        HttpHeader::Location,
        HttpHeader::Origin,
        HttpHeader::ContentType,
        HttpHeader::Timeout,
        HttpHeader::ResponseRequired,
        HttpHeader::XCorrelationId,
        HttpHeader::XDittoPreAuthenticated,
        HttpHeader::XThingsParameterOrder,
        HttpHeader::AllowPolicyLockout,
        HttpHeader::PutMetadata,
        HttpHeader::Condition,
    ];

    /// Look up a header by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<HttpHeader> {
        BY_NAME.get(name.to_ascii_lowercase().as_str()).copied()
    }

    /// Name of the header as it's usually written.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpHeader::Authorization => "Authorization",
            HttpHeader::WwwAuthenticate => "WWW-Authenticate",
            HttpHeader::Date => "Date",
            HttpHeader::Host => "Host",
            HttpHeader::Location => "Location",
            HttpHeader::Origin => "Origin",
            HttpHeader::ContentType => "Content-Type",
            HttpHeader::Timeout => "Timeout",
            HttpHeader::ResponseRequired => "response-required",
            HttpHeader::XCorrelationId => "x-correlation-id",
            HttpHeader::XDittoPreAuthenticated => "x-ditto-pre-authenticated",
            HttpHeader::XThingsParameterOrder => "x-things-parameter-order",
            HttpHeader::AllowPolicyLockout => "allow-policy-lockout",
            HttpHeader::PutMetadata => "put-metadata",
            HttpHeader::Condition => "condition",
        }
    }

    /// Lower-cased name, the form used on the wire by HTTP/2 and in
    /// canonical requests.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            HttpHeader::Authorization => "authorization",
            HttpHeader::WwwAuthenticate => "www-authenticate",
            HttpHeader::Date => "date",
            HttpHeader::Host => "host",
            HttpHeader::Location => "location",
            HttpHeader::Origin => "origin",
            HttpHeader::ContentType => "content-type",
            HttpHeader::Timeout => "timeout",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for HttpHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpHeader {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        HttpHeader::from_name(s)
            .ok_or_else(|| Error::request_invalid(format!("unknown http header: {s}")))
    }
}

impl From<HttpHeader> for HeaderName {
    fn from(h: HttpHeader) -> Self {
        HeaderName::from_static(h.canonical_name())
    }
}

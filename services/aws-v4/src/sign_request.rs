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

use std::fmt::Write;
use std::sync::Arc;

use http::request::Parts;
use http::{header, HeaderName, HeaderValue};
use log::debug;
use pushsign_core::hash::hex_sha256;
use pushsign_core::time::{format_date, format_iso8601, parse_iso8601, DateTime};
use pushsign_core::{Error, Payload, Result, SignRequest, SigningRequest};

use crate::authorization::render_authorization;
use crate::canonical::CanonicalRequest;
use crate::constants::{AWS4_REQUEST, UNSIGNED_PAYLOAD, X_AMZ_CONTENT_SHA_256, X_AMZ_DATE};
use crate::key::SigningKey;
use crate::{PayloadHashMode, SigningConfig};

/// RequestSigner that implement AWS SigV4.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// The signing time is always read from the `x-amz-date` header of the
/// request, the signer never takes the current time on its own.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    config: Arc<SigningConfig>,
}

/// Result of signing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningOutput {
    /// Lowercase hex signature.
    pub signature: String,
    /// Signing time read from `x-amz-date`.
    pub time: DateTime,
    /// `yyyyMMdd/region/service/aws4_request`
    pub credential_scope: String,
    /// Payload hash used in the canonical request.
    pub payload_hash: String,
}

impl RequestSigner {
    /// Create a new signer over a shared config.
    pub fn new(config: impl Into<Arc<SigningConfig>>) -> Self {
        Self {
            config: config.into(),
        }
    }

    /// Config used by this signer.
    pub fn config(&self) -> &SigningConfig {
        &self.config
    }

    /// Sign the request and return the signature with its signing time and
    /// credential scope.
    pub fn sign(&self, req: &SigningRequest) -> Result<SigningOutput> {
        let prepared = self.prepare(req)?;

        let signing_key = SigningKey::derive(
            self.config.secret_access_key(),
            prepared.time,
            self.config.region(),
            self.config.service(),
        )?;
        let signature = signing_key.sign(&prepared.string_to_sign)?;

        Ok(SigningOutput {
            signature,
            time: prepared.time,
            credential_scope: prepared.scope,
            payload_hash: prepared.payload_hash,
        })
    }

    /// Build the canonical request without signing it.
    pub fn canonical_request(&self, req: &SigningRequest) -> Result<CanonicalRequest> {
        let time = signing_time(req)?;
        let payload_hash = payload_hash(req, self.config.payload_hash_mode())?;
        CanonicalRequest::build(req, &self.config, time, &payload_hash)
    }

    /// Build the string to sign without signing it.
    pub fn string_to_sign(&self, req: &SigningRequest) -> Result<String> {
        Ok(self.prepare(req)?.string_to_sign)
    }

    /// Sign the request and render the `Authorization` header value.
    pub fn authorization(&self, req: &SigningRequest) -> Result<String> {
        let output = self.sign(req)?;
        Ok(render_authorization(
            self.config.algorithm(),
            self.config.access_key_id(),
            &output.credential_scope,
            &self.config.signed_headers(),
            &output.signature,
        ))
    }

    fn prepare(&self, req: &SigningRequest) -> Result<Prepared> {
        let time = signing_time(req)?;
        let payload_hash = payload_hash(req, self.config.payload_hash_mode())?;

        let creq = CanonicalRequest::build(req, &self.config, time, &payload_hash)?;
        debug!("calculated canonical request: {creq}");
        let encoded_req = hex_sha256(creq.to_string().as_bytes());

        // Scope: "20220313/<region>/<service>/aws4_request"
        let scope = credential_scope(time, self.config.region(), self.config.service());
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // AWS4-HMAC-SHA256
        // 20220313T072004Z
        // 20220313/<region>/<service>/aws4_request
        // <hashed_canonical_request>
        let string_to_sign = {
            let mut f = String::new();
            writeln!(f, "{}", self.config.algorithm())?;
            writeln!(f, "{}", format_iso8601(time))?;
            writeln!(f, "{scope}")?;
            write!(f, "{encoded_req}")?;
            f
        };
        debug!("calculated string to sign: {string_to_sign}");

        Ok(Prepared {
            time,
            payload_hash,
            scope,
            string_to_sign,
        })
    }
}

struct Prepared {
    time: DateTime,
    payload_hash: String,
    scope: String,
    string_to_sign: String,
}

impl SignRequest for RequestSigner {
    fn sign_request(&self, req: &mut Parts, payload: Option<&Payload>) -> Result<()> {
        let signing_req = SigningRequest::build(req, payload.cloned())?;
        let output = self.sign(&signing_req)?;

        let mut authorization = HeaderValue::from_str(&render_authorization(
            self.config.algorithm(),
            self.config.access_key_id(),
            &output.credential_scope,
            &self.config.signed_headers(),
            &output.signature,
        ))
        .map_err(|e| {
            Error::unexpected("failed to create authorization header").with_source(e)
        })?;
        authorization.set_sensitive(true);

        if self.config.payload_hash_mode() != PayloadHashMode::Excluded {
            req.headers.insert(
                HeaderName::from_static(X_AMZ_CONTENT_SHA_256),
                HeaderValue::from_str(&output.payload_hash)?,
            );
        }
        req.headers.insert(header::AUTHORIZATION, authorization);

        Ok(())
    }
}

/// Read the signing time from the `x-amz-date` header.
fn signing_time(req: &SigningRequest) -> Result<DateTime> {
    let value = req.headers.get(X_AMZ_DATE).ok_or_else(|| {
        Error::missing_timestamp(format!("header {X_AMZ_DATE} is required for signing"))
    })?;
    let value = value.to_str().map_err(|e| {
        Error::malformed_timestamp(format!("header {X_AMZ_DATE} is not valid text"))
            .with_source(e)
    })?;

    parse_iso8601(value.trim())
}

fn payload_hash(req: &SigningRequest, mode: PayloadHashMode) -> Result<String> {
    if mode == PayloadHashMode::Unsigned {
        return Ok(UNSIGNED_PAYLOAD.to_string());
    }

    match &req.payload {
        Some(payload) => Ok(hex_sha256(payload.data())),
        None => Err(Error::missing_payload(
            "payload is required to compute the payload hash",
        )),
    }
}

fn credential_scope(time: DateTime, region: &str, service: &str) -> String {
    format!("{}/{region}/{service}/{AWS4_REQUEST}", format_date(time))
}

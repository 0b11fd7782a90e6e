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

use std::collections::BTreeSet;
use std::fmt::{Debug, Formatter};

use http::HeaderName;
use pushsign_core::utils::Redact;
use pushsign_core::{Env, Error, Result};
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::constants::*;

/// How the payload hash of the canonical request is produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayloadHashMode {
    /// Hash the body and send the hash in `x-amz-content-sha256`.
    #[default]
    Included,
    /// Hash the body but leave `x-amz-content-sha256` off the request.
    Excluded,
    /// Use the literal `UNSIGNED-PAYLOAD` instead of a body hash.
    Unsigned,
}

/// Raw signing configuration as read from the harness or the environment.
///
/// Nothing is validated here, convert it into [`SigningConfig`] for that.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `region` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_REGION`]
    pub region: Option<String>,
    /// Name of the service to sign for, e.g. `sqs` or `s3`.
    pub service: Option<String>,
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_SECRET_ACCESS_KEY`]
    ///
    /// Wiped on drop, clones included.
    pub secret_access_key: Option<Zeroizing<String>>,
    /// Signing algorithm, default to [`AWS4_HMAC_SHA256`].
    pub algorithm: Option<String>,
    /// Double encode path segments, default to `true`.
    ///
    /// S3 is the only service that wants this disabled.
    pub double_encode_path: Option<bool>,
    /// Names of the headers to sign, default to [`DEFAULT_CANONICAL_HEADERS`].
    pub canonical_headers: Option<Vec<String>>,
    /// Payload hash mode, default to [`PayloadHashMode::Included`].
    pub payload_hash_mode: Option<PayloadHashMode>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set region
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set service
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// Set access_key_id
    pub fn with_access_key_id(mut self, access_key_id: impl Into<String>) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self
    }

    /// Set secret_access_key
    pub fn with_secret_access_key(mut self, secret_access_key: impl Into<String>) -> Self {
        self.secret_access_key = Some(Zeroizing::new(secret_access_key.into()));
        self
    }

    /// Set algorithm
    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }

    /// Set double_encode_path
    pub fn with_double_encode_path(mut self, double_encode_path: bool) -> Self {
        self.double_encode_path = Some(double_encode_path);
        self
    }

    /// Set canonical_headers
    pub fn with_canonical_headers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.canonical_headers = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Set payload_hash_mode
    pub fn with_payload_hash_mode(mut self, mode: PayloadHashMode) -> Self {
        self.payload_hash_mode = Some(mode);
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, env: &impl Env) -> Self {
        if let Some(v) = env.var(AWS_REGION) {
            self.region.get_or_insert(v);
        }
        if let Some(v) = env.var(AWS_ACCESS_KEY_ID) {
            self.access_key_id.get_or_insert(v);
        }
        if let Some(v) = env.var(AWS_SECRET_ACCESS_KEY) {
            self.secret_access_key.get_or_insert_with(|| Zeroizing::new(v));
        }

        self
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("region", &self.region)
            .field("service", &self.service)
            .field("access_key_id", &self.access_key_id.as_ref().map(Redact::from))
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|v| Redact::from(v.as_str())),
            )
            .field("algorithm", &self.algorithm)
            .field("double_encode_path", &self.double_encode_path)
            .field("canonical_headers", &self.canonical_headers)
            .field("payload_hash_mode", &self.payload_hash_mode)
            .finish()
    }
}

/// Validated, immutable signing configuration.
///
/// Build it once with `SigningConfig::try_from(config)` and share it between
/// any number of signers.
#[derive(Clone)]
pub struct SigningConfig {
    region: String,
    service: String,
    access_key_id: String,
    secret_access_key: Zeroizing<String>,
    algorithm: String,
    double_encode_path: bool,
    canonical_header_names: Vec<String>,
    payload_hash_mode: PayloadHashMode,
}

impl SigningConfig {
    /// Create a config with default signing options.
    pub fn new(
        region: impl Into<String>,
        service: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Result<Self> {
        Config::new()
            .with_region(region)
            .with_service(service)
            .with_access_key_id(access_key_id)
            .with_secret_access_key(secret_access_key)
            .try_into()
    }

    /// Region of the credential scope.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Service of the credential scope.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Access key id rendered into the `Credential` parameter.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub(crate) fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    /// Algorithm name, upper-cased.
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Whether path segments get double encoded.
    pub fn double_encode_path(&self) -> bool {
        self.double_encode_path
    }

    /// Signed header names, lower-cased, deduplicated and sorted.
    pub fn canonical_header_names(&self) -> &[String] {
        &self.canonical_header_names
    }

    /// Value of the `SignedHeaders` parameter.
    pub fn signed_headers(&self) -> String {
        self.canonical_header_names.join(";")
    }

    /// Payload hash mode.
    pub fn payload_hash_mode(&self) -> PayloadHashMode {
        self.payload_hash_mode
    }
}

impl TryFrom<Config> for SigningConfig {
    type Error = Error;

    fn try_from(cfg: Config) -> Result<Self> {
        let canonical_header_names = match cfg.canonical_headers {
            Some(names) => normalize_header_names(names)?,
            None => DEFAULT_CANONICAL_HEADERS.map(String::from).to_vec(),
        };

        Ok(Self {
            region: required("region", cfg.region)?,
            service: required("service", cfg.service)?,
            access_key_id: required("access_key_id", cfg.access_key_id)?,
            secret_access_key: required_secret(cfg.secret_access_key)?,
            algorithm: cfg
                .algorithm
                .map(|v| v.trim().to_uppercase())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| AWS4_HMAC_SHA256.to_string()),
            double_encode_path: cfg.double_encode_path.unwrap_or(true),
            canonical_header_names,
            payload_hash_mode: cfg.payload_hash_mode.unwrap_or_default(),
        })
    }
}

impl Debug for SigningConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningConfig")
            .field("region", &self.region)
            .field("service", &self.service)
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&*self.secret_access_key))
            .field("algorithm", &self.algorithm)
            .field("double_encode_path", &self.double_encode_path)
            .field("canonical_header_names", &self.canonical_header_names)
            .field("payload_hash_mode", &self.payload_hash_mode)
            .finish()
    }
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        Some(_) => Err(Error::config_invalid(format!("{field} must not be empty"))),
        None => Err(Error::config_invalid(format!("{field} is required"))),
    }
}

fn required_secret(value: Option<Zeroizing<String>>) -> Result<Zeroizing<String>> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        Some(_) => Err(Error::config_invalid("secret_access_key must not be empty")),
        None => Err(Error::config_invalid("secret_access_key is required")),
    }
}

/// Trim, lower-case, drop empties and duplicates, sort ascending.
fn normalize_header_names(names: Vec<String>) -> Result<Vec<String>> {
    let names: BTreeSet<String> = names
        .iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect();

    for name in &names {
        HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            Error::config_invalid(format!("{name:?} is not a valid header name")).with_source(e)
        })?;
    }

    Ok(names.into_iter().collect())
}

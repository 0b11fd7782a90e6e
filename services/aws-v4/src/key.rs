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

use std::fmt::{Debug, Formatter};

use pushsign_core::hash::{hex_hmac_sha256, hmac_sha256};
use pushsign_core::time::{format_date, DateTime};
use pushsign_core::utils::Redact;
use pushsign_core::Result;
use zeroize::Zeroizing;

use crate::constants::AWS4_REQUEST;

/// Signing key derived from the secret access key for one day, region and
/// service.
///
/// Bytes are wiped on drop.
pub struct SigningKey(Zeroizing<Vec<u8>>);

impl SigningKey {
    /// Derive the key from `secret` for the date of `time`, `region` and
    /// `service`.
    pub fn derive(
        secret: &str,
        time: DateTime,
        region: &str,
        service: &str,
    ) -> Result<Self> {
        // Sign secret
        let secret = Zeroizing::new(format!("AWS4{secret}"));
        // Sign date
        let sign_date = hmac_sha256(secret.as_bytes(), format_date(time).as_bytes())?;
        // Sign region
        let sign_region = hmac_sha256(&sign_date, region.as_bytes())?;
        // Sign service
        let sign_service = hmac_sha256(&sign_region, service.as_bytes())?;
        // Sign request
        let sign_request = hmac_sha256(&sign_service, AWS4_REQUEST.as_bytes())?;

        Ok(Self(sign_request))
    }

    /// Hex encoded HMAC-SHA256 of `content` under this key.
    pub fn sign(&self, content: &str) -> Result<String> {
        hex_hmac_sha256(&self.0, content.as_bytes())
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SigningKey")
            .field(&Redact::from(self.0.as_slice()))
            .finish()
    }
}

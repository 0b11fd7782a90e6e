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

use http::request::Parts;
use http::HeaderValue;
use pushsign_core::hash::{hex_hmac_sha256, hex_sha256};
use pushsign_core::time::{format_iso8601, now};
use pushsign_core::utils::Redact;
use pushsign_core::{Env, Error, OsEnv, Payload, Result, SignRequest, SigningRequest};
use zeroize::Zeroizing;

// A signer for a push endpoint that expects an HMAC over method, path, time and body.
struct MySigner {
    api_key: String,
    api_secret: Zeroizing<String>,
}

impl std::fmt::Debug for MySigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySigner")
            .field("api_key", &self.api_key)
            .field("api_secret", &Redact::from(self.api_secret.as_str()))
            .finish()
    }
}

impl MySigner {
    fn from_env(env: &impl Env) -> Self {
        // For demo purposes, use dummy credentials if none are provided
        Self {
            api_key: env
                .var("MY_API_KEY")
                .unwrap_or_else(|| "demo-api-key".to_string()),
            api_secret: Zeroizing::new(
                env.var("MY_API_SECRET")
                    .unwrap_or_else(|| "demo-api-secret".to_string()),
            ),
        }
    }
}

impl SignRequest for MySigner {
    fn sign_request(&self, req: &mut Parts, payload: Option<&Payload>) -> Result<()> {
        let signing_req = SigningRequest::build(req, payload.cloned())?;
        let payload = signing_req
            .payload
            .as_ref()
            .ok_or_else(|| Error::missing_payload("push requests always carry a body"))?;

        let timestamp = format_iso8601(now());
        let content = format!(
            "{}\n{}\n{timestamp}\n{}",
            signing_req.method,
            signing_req.path,
            hex_sha256(payload.data())
        );
        let signature = hex_hmac_sha256(self.api_secret.as_bytes(), content.as_bytes())?;

        req.headers
            .insert("x-api-key", HeaderValue::from_str(&self.api_key)?);
        req.headers
            .insert("x-api-timestamp", HeaderValue::from_str(&timestamp)?);
        let mut signature = HeaderValue::from_str(&signature)?;
        signature.set_sensitive(true);
        req.headers.insert("x-api-signature", signature);

        Ok(())
    }
}

fn main() -> Result<()> {
    let signer = MySigner::from_env(&OsEnv);
    println!("Signer: {signer:?}");

    let (mut parts, body) = http::Request::post("https://push.example.com/v1/events")
        .body("{\"event\":\"ping\"}")?
        .into_parts();

    match signer.sign_request(&mut parts, Some(&Payload::new(body))) {
        Ok(()) => {
            println!("Request signed successfully!");
            println!("Headers: {:?}", parts.headers);
        }
        Err(e) => {
            eprintln!("Failed to sign request: {e}");
        }
    }

    Ok(())
}

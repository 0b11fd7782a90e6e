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

mod known_vectors;
mod properties;

use anyhow::Result;
use http::Request;
use pushsign_aws_v4::{Config, RequestSigner, SigningConfig};
use pushsign_core::SigningRequest;

pub const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Initialize test environment
pub fn init_signing_test() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a signer for `config`, panics on invalid config.
pub fn signer(config: Config) -> RequestSigner {
    RequestSigner::new(SigningConfig::try_from(config).expect("config must be valid"))
}

/// Config of the IAM test suite credentials.
pub fn suite_config(service: &str) -> Config {
    Config::new()
        .with_region("us-east-1")
        .with_service(service)
        .with_access_key_id("AKIDEXAMPLE")
        .with_secret_access_key("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY")
}

/// Build a signing request from `req`, its body becomes the payload.
pub fn signing_request(req: Request<&'static str>) -> Result<SigningRequest> {
    Ok(SigningRequest::from_request(&req)?)
}

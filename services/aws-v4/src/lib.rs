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

//! AWS SigV4 signer for outbound push requests.
//!
//! ## Example
//!
//! ```no_run
//! use http::Request;
//! use pushsign_aws_v4::{Config, RequestSigner, SigningConfig};
//! use pushsign_core::time::{format_iso8601, now};
//! use pushsign_core::{OsEnv, Payload, SignRequest};
//!
//! # fn main() -> pushsign_core::Result<()> {
//! let config = Config::new().with_service("sqs").from_env(&OsEnv);
//! let signer = RequestSigner::new(SigningConfig::try_from(config)?);
//!
//! let req = Request::post("https://sqs.us-east-1.amazonaws.com/")
//!     .header("x-amz-date", format_iso8601(now()))
//!     .body("Action=ListQueues")?;
//! let (mut parts, body) = req.into_parts();
//! signer.sign_request(&mut parts, Some(&Payload::new(body)))?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod constants;

mod config;
pub use config::{Config, PayloadHashMode, SigningConfig};

mod canonical;
pub use canonical::CanonicalRequest;

mod key;
pub use key::SigningKey;

mod authorization;
pub use authorization::render_authorization;

mod sign_request;
pub use sign_request::{RequestSigner, SigningOutput};

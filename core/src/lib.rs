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

//! Core components for signing outbound push requests.
//!
//! This crate provides the foundational types shared by service signers:
//!
//! - [`SigningRequest`]: an owned, read-only view of the request to sign,
//!   including its fully materialized [`Payload`]
//! - [`SignRequest`]: the trait a transport calls to sign a request in place
//! - [`Error`] and [`ErrorKind`]: the typed failures of signing
//! - [`Env`]: environment access for configuration loading
//! - [`HttpHeader`]: the header names known to the push harness
//!
//! ## Utilities
//!
//! - [`hash`]: hex, SHA256 and HMAC-SHA256 helpers
//! - [`time`]: timestamp formats used by signers
//! - [`utils`]: redaction of secrets in debug output

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod env;
pub use env::Env;
pub use env::OsEnv;
pub use env::StaticEnv;
mod error;
pub use error::{Error, ErrorKind, Result};
mod header;
pub use header::HttpHeader;

mod api;
pub use api::SignRequest;
mod request;
pub use request::{ContentType, Payload, SigningRequest, DEFAULT_MEDIA_TYPE};

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

use crate::Payload;
use std::fmt::Debug;

/// SignRequest is the trait used by a transport to sign an outgoing request.
///
/// Implementations are pure: signing the same parts with the same payload
/// twice writes the same headers.
pub trait SignRequest: Debug + Send + Sync + Unpin + 'static {
    /// Sign the request in place.
    ///
    /// ## Payload
    ///
    /// The `payload` is the fully materialized body of the request. Services
    /// that hash the body return an error when it's required but `None`.
    fn sign_request(
        &self,
        req: &mut http::request::Parts,
        payload: Option<&Payload>,
    ) -> crate::Result<()>;
}

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

/// Render the value of the `Authorization` header.
///
/// ```text
/// AWS4-HMAC-SHA256 Credential=<ak>/<scope>, SignedHeaders=<h1;h2>, Signature=<hex>
/// ```
pub fn render_authorization(
    algorithm: &str,
    access_key_id: &str,
    credential_scope: &str,
    signed_headers: &str,
    signature: &str,
) -> String {
    let pairs = [
        ("Credential", format!("{access_key_id}/{credential_scope}")),
        ("SignedHeaders", signed_headers.to_string()),
        ("Signature", signature.to_string()),
    ];

    let rendered = pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{algorithm} {rendered}")
}

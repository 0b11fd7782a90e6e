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

//! Hash related utils.

use crate::Error;
use hmac::Hmac;
use hmac::Mac;
use sha2::Digest;
use sha2::Sha256;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// Lowercase hex encode.
pub fn hex_encode(content: &[u8]) -> String {
    hex::encode(content)
}

/// Hex decode, accepts both upper and lower case input.
pub fn hex_decode(content: &str) -> crate::Result<Vec<u8>> {
    hex::decode(content).map_err(|e| Error::unexpected("hex decode failed").with_source(e))
}

/// Hex encoded SHA256 hash.
///
/// Use this function instead of `hex::encode(sha256(content))` can reduce
/// extra copy.
pub fn hex_sha256(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content).as_slice())
}

fn new_hmac_sha256(key: &[u8]) -> crate::Result<HmacSha256> {
    HmacSha256::new_from_slice(key).map_err(|e| {
        Error::unsupported_hash_algorithm(format!("HmacSHA256 rejected the signing key: {e}"))
    })
}

/// HMAC with SHA256 hash.
///
/// The returned buffer is zeroed on drop, callers chain it as the key of
/// the next HMAC round.
pub fn hmac_sha256(key: &[u8], content: &[u8]) -> crate::Result<Zeroizing<Vec<u8>>> {
    let mut h = new_hmac_sha256(key)?;
    h.update(content);

    Ok(Zeroizing::new(h.finalize().into_bytes().to_vec()))
}

/// Hex encoded HMAC with SHA256 hash.
///
/// Use this function instead of `hex::encode(hmac_sha256(key, content))` can
/// reduce extra copy.
pub fn hex_hmac_sha256(key: &[u8], content: &[u8]) -> crate::Result<String> {
    let mut h = new_hmac_sha256(key)?;
    h.update(content);

    Ok(hex::encode(h.finalize().into_bytes()))
}

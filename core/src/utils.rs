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

//! Utility functions and types.

use std::fmt::Debug;

/// Redacts sensitive values in `Debug` output.
///
/// - Strings shorter than 12 characters are entirely redacted.
/// - Longer strings keep their first and last three characters, so two
///   different access key ids stay distinguishable in logs.
/// - Raw key material never shows any byte, only its length.
pub enum Redact<'a> {
    /// A textual secret or identifier.
    Text(&'a str),
    /// Raw key bytes.
    Bytes(&'a [u8]),
}

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact::Text(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact::Text(value.as_str())
    }
}

impl<'a> From<&'a [u8]> for Redact<'a> {
    fn from(value: &'a [u8]) -> Self {
        Redact::Bytes(value)
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Redact::Bytes(bs) => write!(f, "<{} bytes redacted>", bs.len()),
            Redact::Text(s) => {
                let length = s.chars().count();
                if length == 0 {
                    f.write_str("EMPTY")
                } else if length < 12 {
                    f.write_str("***")
                } else {
                    let head: String = s.chars().take(3).collect();
                    let tail: String = s.chars().skip(length - 3).collect();
                    write!(f, "{head}***{tail}")
                }
            }
        }
    }
}

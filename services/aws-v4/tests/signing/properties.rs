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

use std::sync::Arc;
use std::thread;

use super::*;
use anyhow::Result;
use http::{header, Request};
use log::debug;
use percent_encoding::percent_decode_str;
use pretty_assertions::assert_eq;
use pushsign_aws_v4::PayloadHashMode;
use pushsign_core::hash::hex_sha256;
use pushsign_core::{ErrorKind, Payload, SignRequest, StaticEnv};
use test_case::test_case;

fn push_request(uri: &str) -> Result<SigningRequest> {
    signing_request(
        Request::post(uri)
            .header("x-amz-date", "20240101T000000Z")
            .body("{\"event\":\"push\"}")?,
    )
}

#[test]
fn test_signature_is_deterministic() -> Result<()> {
    init_signing_test();

    let signer = signer(suite_config("sqs"));
    let req = push_request("https://sqs.us-east-1.amazonaws.com/")?;

    let first = signer.sign(&req)?;
    let second = signer.sign(&req)?;
    assert_eq!(first, second);
    assert_eq!(first.signature.len(), 64);
    assert!(first
        .signature
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    Ok(())
}

#[test]
fn test_query_order_does_not_change_signature() -> Result<()> {
    init_signing_test();

    let signer = signer(suite_config("sqs"));
    let a = signer.sign(&push_request("https://sqs.us-east-1.amazonaws.com/?b=2&a=1&a=10")?)?;
    let b = signer.sign(&push_request("https://sqs.us-east-1.amazonaws.com/?a=10&b=2&a=1")?)?;
    assert_eq!(a.signature, b.signature);
    Ok(())
}

#[test]
fn test_header_name_case_in_config_is_ignored() -> Result<()> {
    init_signing_test();

    let req = push_request("https://sqs.us-east-1.amazonaws.com/")?;
    let lower = signer(suite_config("sqs").with_canonical_headers(["host", "x-amz-date"]));
    let mixed = signer(suite_config("sqs").with_canonical_headers([" X-Amz-Date ", "HOST", "host"]));

    assert_eq!(lower.sign(&req)?.signature, mixed.sign(&req)?.signature);
    assert_eq!(mixed.config().signed_headers(), "host;x-amz-date");
    Ok(())
}

#[test_case("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY", "us-east-1", "sqs"; "base")]
#[test_case("another-secret", "us-east-1", "sqs"; "secret")]
#[test_case("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY", "eu-west-1", "sqs"; "region")]
#[test_case("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY", "us-east-1", "sns"; "service")]
fn test_signature_depends_on_scope(secret: &str, region: &str, service: &str) -> Result<()> {
    init_signing_test();

    let req = push_request("https://push.example.com/")?;
    let base = signer(suite_config("sqs")).sign(&req)?;
    let other = signer(
        suite_config(service)
            .with_region(region)
            .with_secret_access_key(secret),
    )
    .sign(&req)?;

    let unchanged = secret == "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY"
        && region == "us-east-1"
        && service == "sqs";
    assert_eq!(base.signature == other.signature, unchanged);
    Ok(())
}

#[test]
fn test_equals_in_query_value_is_double_encoded() -> Result<()> {
    init_signing_test();

    let creq = signer(suite_config("sqs"))
        .canonical_request(&push_request("https://push.example.com/?token=a=b")?)?;
    assert_eq!(creq.query(), "token=a%253Db");
    assert_eq!(
        percent_decode_str(&percent_decode_str("a%253Db").decode_utf8()?).decode_utf8()?,
        "a=b"
    );
    Ok(())
}

#[test_case(true, "/queue/a%2520b/"; "double encoded")]
#[test_case(false, "/queue/a%20b/"; "raw")]
fn test_path_encoding(double_encode: bool, expected: &str) -> Result<()> {
    init_signing_test();

    let creq = signer(suite_config("sqs").with_double_encode_path(double_encode))
        .canonical_request(&push_request("https://push.example.com/queue/a%20b/")?)?;
    assert_eq!(creq.uri(), expected);
    Ok(())
}

#[test]
fn test_content_type_resolution() -> Result<()> {
    init_signing_test();

    let signer = signer(suite_config("sqs").with_canonical_headers(["content-type", "host"]));

    // No header and no declared type.
    let req = push_request("https://push.example.com/")?;
    assert_eq!(
        signer.canonical_request(&req)?.headers(),
        "content-type:application/octet-stream\nhost:push.example.com\n"
    );

    // Declared on the payload.
    let mut req = push_request("https://push.example.com/")?;
    req.payload = req.payload.map(|p| {
        let content_type = "application/json; charset=UTF-8".parse().expect("must parse");
        p.with_content_type(content_type)
    });
    assert_eq!(
        signer.canonical_request(&req)?.headers(),
        "content-type:application/json; charset=UTF-8\nhost:push.example.com\n"
    );

    // Explicit header wins.
    let req = signing_request(
        Request::post("https://push.example.com:8443/")
            .header("x-amz-date", "20240101T000000Z")
            .header("Content-Type", "Text/Plain")
            .body("hello")?,
    )?;
    assert_eq!(
        signer.canonical_request(&req)?.headers(),
        "content-type:text/plain\nhost:push.example.com:8443\n"
    );
    Ok(())
}

#[test]
fn test_default_port_is_not_signed() -> Result<()> {
    init_signing_test();

    let signer = signer(suite_config("sqs"));
    let implicit = signer.sign(&push_request("https://push.example.com/")?)?;
    let explicit = signer.sign(&push_request("https://push.example.com:443/")?)?;
    assert_eq!(implicit.signature, explicit.signature);
    Ok(())
}

#[test]
fn test_errors() -> Result<()> {
    init_signing_test();

    let signer = signer(suite_config("sqs"));

    let req = signing_request(Request::post("https://push.example.com/").body("")?)?;
    let err = signer.sign(&req).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingTimestamp);
    assert!(err.is_timestamp_error());

    let req = signing_request(
        Request::post("https://push.example.com/")
            .header("x-amz-date", "Mon, 01 Jan 2024 00:00:00 GMT")
            .body("")?,
    )?;
    let err = signer.sign(&req).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedTimestamp);

    let mut req = push_request("https://push.example.com/")?;
    req.payload = None;
    let err = signer.authorization(&req).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingPayload);
    Ok(())
}

#[test]
fn test_excluded_hashes_like_included() -> Result<()> {
    init_signing_test();

    let config = |mode: PayloadHashMode| {
        suite_config("sqs")
            .with_canonical_headers(["host", "x-amz-content-sha256", "x-amz-date"])
            .with_payload_hash_mode(mode)
    };
    let req = push_request("https://push.example.com/")?;
    let included = signer(config(PayloadHashMode::Included)).sign(&req)?;
    let excluded = signer(config(PayloadHashMode::Excluded)).sign(&req)?;

    assert_eq!(
        included.payload_hash,
        hex_sha256("{\"event\":\"push\"}".as_bytes())
    );
    assert_eq!(excluded.payload_hash, included.payload_hash);
    assert_eq!(excluded.signature, included.signature);
    Ok(())
}

#[test]
fn test_unsigned_payload() -> Result<()> {
    init_signing_test();

    let signer = signer(suite_config("sqs").with_payload_hash_mode(PayloadHashMode::Unsigned));
    let mut req = push_request("https://push.example.com/")?;
    let with_body = signer.sign(&req)?;
    req.payload = None;
    let without_body = signer.sign(&req)?;

    assert_eq!(with_body.payload_hash, "UNSIGNED-PAYLOAD");
    assert_eq!(with_body, without_body);
    Ok(())
}

#[test]
fn test_secret_never_in_debug_output() -> Result<()> {
    init_signing_test();

    let signer = signer(suite_config("sqs"));
    let output = format!("{signer:?}");
    debug!("signer: {output}");

    assert!(!output.contains("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY"));
    Ok(())
}

#[test]
fn test_config_from_env_and_json() -> Result<()> {
    init_signing_test();

    let env = StaticEnv::from_pairs([
        ("AWS_REGION", "eu-central-1"),
        ("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE"),
        ("AWS_SECRET_ACCESS_KEY", "env-secret"),
    ]);
    let config: Config = serde_json::from_str(
        r#"{
            "service": "sns",
            "region": "us-west-2",
            "canonical_headers": ["host", "x-amz-date", "x-amz-content-sha256"],
            "payload_hash_mode": "EXCLUDED"
        }"#,
    )?;
    let signer = signer(config.from_env(&env));

    assert_eq!(signer.config().region(), "us-west-2");
    assert_eq!(signer.config().access_key_id(), "AKIDEXAMPLE");
    assert_eq!(signer.config().payload_hash_mode(), PayloadHashMode::Excluded);
    assert_eq!(
        signer.config().signed_headers(),
        "host;x-amz-content-sha256;x-amz-date"
    );
    Ok(())
}

#[test]
fn test_sign_request_from_many_threads() -> Result<()> {
    init_signing_test();

    let signer = Arc::new(signer(suite_config("sqs")));
    let expected = signer.authorization(&push_request("https://push.example.com/")?)?;

    thread::scope(|s| {
        for _ in 0..4 {
            let signer = signer.clone();
            let expected = expected.as_str();
            s.spawn(move || {
                let req = Request::post("https://push.example.com/")
                    .header("x-amz-date", "20240101T000000Z")
                    .body("{\"event\":\"push\"}")
                    .expect("request must be valid");
                let (mut parts, body) = req.into_parts();
                signer
                    .sign_request(&mut parts, Some(&Payload::new(body)))
                    .expect("sign request must succeed");

                assert_eq!(
                    parts
                        .headers
                        .get(header::AUTHORIZATION)
                        .map(|v| v.to_str().expect("must be text")),
                    Some(expected)
                );
            });
        }
    });
    Ok(())
}

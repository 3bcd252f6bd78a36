// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use assert_matches::assert_matches;
use chrono::Duration;
use fls_graph_client::{error::TokenExchangeError, requests::token::exchange_authorization_code};
use url::Url;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{body_string_contains, method, path},
};

use crate::{ACCESS_TOKEN, AUTHORIZATION_CODE, REDIRECT_URI, client_credentials, init_test, now};

#[tokio::test]
async fn pass_exchange_authorization_code() {
    let (http_client, mock_server, graph_endpoint) = init_test().await;

    Mock::given(method("POST"))
        .and(path("/oauth/access_token"))
        .and(body_string_contains(AUTHORIZATION_CODE))
        .and(body_string_contains("client_secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": ACCESS_TOKEN,
            "token_type": "bearer",
            "expires_in": 5_183_944,
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let now = now();
    let redirect_uri = Url::parse(REDIRECT_URI).unwrap();

    let grant = exchange_authorization_code(
        &http_client,
        &client_credentials(),
        &graph_endpoint,
        &redirect_uri,
        AUTHORIZATION_CODE,
        now,
    )
    .await
    .unwrap();

    assert_eq!(grant.access_token, ACCESS_TOKEN);
    assert_eq!(
        grant.expires_at,
        Some(now + Duration::try_seconds(5_183_944).unwrap())
    );
}

#[tokio::test]
async fn pass_exchange_without_expiry() {
    let (http_client, mock_server, graph_endpoint) = init_test().await;

    Mock::given(method("POST"))
        .and(path("/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": ACCESS_TOKEN,
        })))
        .mount(&mock_server)
        .await;

    let redirect_uri = Url::parse(REDIRECT_URI).unwrap();

    let grant = exchange_authorization_code(
        &http_client,
        &client_credentials(),
        &graph_endpoint,
        &redirect_uri,
        AUTHORIZATION_CODE,
        now(),
    )
    .await
    .unwrap();

    assert_eq!(grant.expires_at, None);
}

#[tokio::test]
async fn fail_exchange_rejected_code() {
    let (http_client, mock_server, graph_endpoint) = init_test().await;

    Mock::given(method("POST"))
        .and(path("/oauth/access_token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {
                "message": "Invalid verification code format.",
                "type": "OAuthException",
                "code": 100,
            }
        })))
        .mount(&mock_server)
        .await;

    let redirect_uri = Url::parse(REDIRECT_URI).unwrap();

    let error = exchange_authorization_code(
        &http_client,
        &client_credentials(),
        &graph_endpoint,
        &redirect_uri,
        "expired-code",
        now(),
    )
    .await
    .unwrap_err();

    let api_error = assert_matches!(error, TokenExchangeError::Rejected(e) => e);
    assert_eq!(api_error.message, "Invalid verification code format.");
    assert_eq!(api_error.code, Some(100));
}

#[tokio::test]
async fn fail_exchange_missing_credential() {
    let (http_client, mock_server, graph_endpoint) = init_test().await;

    Mock::given(method("POST"))
        .and(path("/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token_type": "bearer",
        })))
        .mount(&mock_server)
        .await;

    let redirect_uri = Url::parse(REDIRECT_URI).unwrap();

    let error = exchange_authorization_code(
        &http_client,
        &client_credentials(),
        &graph_endpoint,
        &redirect_uri,
        AUTHORIZATION_CODE,
        now(),
    )
    .await
    .unwrap_err();

    assert_matches!(error, TokenExchangeError::MissingCredential);
}

// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! HTTP client construction and request tracing

use std::time::Duration;

use rustls_platform_verifier::ConfigVerifierExt;
use tracing::Instrument;

static USER_AGENT: &str = concat!("flowcrest-link-service/", env!("CARGO_PKG_VERSION"));

/// Create a new [`reqwest::Client`] with sane parameters
///
/// Every upstream call carries an explicit timeout so a hung provider
/// surfaces as a transient request error instead of stalling the callback.
///
/// # Panics
///
/// Panics if the client fails to build, which should never happen
#[must_use]
pub fn client() -> reqwest::Client {
    // The explicit typing here is because `use_preconfigured_tls` accepts
    // `Any`, but wants a `ClientConfig` under the hood. This helps us detect
    // breaking changes in the rustls-platform-verifier API.
    let tls_config: rustls::ClientConfig =
        rustls::ClientConfig::with_platform_verifier().expect("failed to create TLS config");

    reqwest::Client::builder()
        .use_preconfigured_tls(tls_config)
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("failed to create HTTP client")
}

async fn send_traced(
    request: reqwest::RequestBuilder,
) -> Result<reqwest::Response, reqwest::Error> {
    let (client, request) = request.build_split();
    let request = request?;

    let span = tracing::info_span!(
        "http.client.request",
        "otel.kind" = "client",
        "http.request.method" = %request.method(),
        "url.full" = %request.url(),
        "http.response.status_code" = tracing::field::Empty,
        "rust.error" = tracing::field::Empty,
    );

    async move {
        let span = tracing::Span::current();
        match client.execute(request).await {
            Ok(response) => {
                span.record("http.response.status_code", response.status().as_u16());
                Ok(response)
            }
            Err(err) => {
                span.record("rust.error", &err as &dyn std::error::Error);
                Err(err)
            }
        }
    }
    .instrument(span)
    .await
}

/// An extension trait implemented for [`reqwest::RequestBuilder`] to send a
/// request with a tracing span around it.
pub trait RequestBuilderExt {
    /// Send the request with a tracing span around it.
    fn send_traced(self) -> impl Future<Output = Result<reqwest::Response, reqwest::Error>> + Send;
}

impl RequestBuilderExt for reqwest::RequestBuilder {
    fn send_traced(self) -> impl Future<Output = Result<reqwest::Response, reqwest::Error>> + Send {
        send_traced(self)
    }
}

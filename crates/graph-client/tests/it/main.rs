// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use chrono::{DateTime, Utc};
use fls_graph_client::types::ClientCredentials;
use url::Url;
use wiremock::MockServer;

mod requests;

const REDIRECT_URI: &str = "https://app.example.com/oauth/facebook/callback";
const CLIENT_ID: &str = "1089765432100001";
const CLIENT_SECRET: &str = "SECRET?%Gclient";
const AUTHORIZATION_CODE: &str = "authC0D3";
const ACCESS_TOKEN: &str = "AccessToken1";

fn now() -> DateTime<Utc> {
    #[allow(clippy::disallowed_methods)]
    Utc::now()
}

async fn init_test() -> (reqwest::Client, MockServer, Url) {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let client = fls_graph_client::http::client();
    let mock_server = MockServer::start().await;
    let graph_endpoint = Url::parse(&mock_server.uri()).expect("Couldn't parse URL");

    (client, mock_server, graph_endpoint)
}

fn client_credentials() -> ClientCredentials {
    ClientCredentials {
        client_id: CLIENT_ID.to_owned(),
        client_secret: CLIENT_SECRET.to_owned(),
    }
}

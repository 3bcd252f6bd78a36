// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use fls_graph_client::requests::pages::fetch_delegated_pages;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{method, path, query_param},
};

use crate::{ACCESS_TOKEN, init_test};

#[tokio::test]
async fn pass_fetch_delegated_pages() {
    let (http_client, mock_server, graph_endpoint) = init_test().await;

    Mock::given(method("GET"))
        .and(path("/me/accounts"))
        .and(query_param("fields", "id,name,instagram_business_account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {
                    "id": "200001",
                    "name": "John's Shop",
                    "instagram_business_account": { "id": "17841400000000001" },
                },
                {
                    "id": "200002",
                    "name": "John's Blog",
                },
            ]
        })))
        .mount(&mock_server)
        .await;

    let pages = fetch_delegated_pages(&http_client, &graph_endpoint, ACCESS_TOKEN)
        .await
        .unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].id, "200001");
    assert_eq!(
        pages[0]
            .instagram_business_account
            .as_ref()
            .map(|r| r.id.as_str()),
        Some("17841400000000001")
    );
    assert!(pages[1].instagram_business_account.is_none());
}

#[tokio::test]
async fn pass_fetch_delegated_pages_empty_body() {
    let (http_client, mock_server, graph_endpoint) = init_test().await;

    // A user without pages gets an empty object back
    Mock::given(method("GET"))
        .and(path("/me/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&mock_server)
        .await;

    let pages = fetch_delegated_pages(&http_client, &graph_endpoint, ACCESS_TOKEN)
        .await
        .unwrap();

    assert!(pages.is_empty());
}

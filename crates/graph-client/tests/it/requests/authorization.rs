// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::collections::HashMap;

use fls_graph_client::requests::authorization::{
    AuthorizationRequestData, build_authorization_url,
};
use url::Url;

use crate::{CLIENT_ID, REDIRECT_URI};

#[test]
fn pass_authorization_url() {
    let authorization_endpoint =
        Url::parse("https://www.facebook.com/v18.0/dialog/oauth").unwrap();
    let redirect_uri = Url::parse(REDIRECT_URI).unwrap();

    let data = AuthorizationRequestData::new(
        CLIENT_ID.to_owned(),
        redirect_uri,
        "user-1.signature".to_owned(),
    );

    let url = build_authorization_url(authorization_endpoint.clone(), &data).unwrap();

    assert_eq!(url.path(), "/v18.0/dialog/oauth");

    let query_pairs = url.query_pairs().collect::<HashMap<_, _>>();
    assert_eq!(query_pairs.get("client_id").unwrap(), CLIENT_ID);
    assert_eq!(query_pairs.get("redirect_uri").unwrap(), REDIRECT_URI);
    assert_eq!(
        query_pairs.get("scope").unwrap(),
        "pages_show_list,pages_read_engagement,instagram_basic,instagram_content_publish"
    );
    assert_eq!(query_pairs.get("state").unwrap(), "user-1.signature");
    assert_eq!(query_pairs.get("response_type").unwrap(), "code");

    // The build is deterministic: same inputs, same URL
    let again = build_authorization_url(authorization_endpoint, &data).unwrap();
    assert_eq!(url, again);
}

#[test]
fn pass_authorization_url_with_custom_scopes() {
    let authorization_endpoint =
        Url::parse("https://www.facebook.com/v18.0/dialog/oauth").unwrap();
    let redirect_uri = Url::parse(REDIRECT_URI).unwrap();

    let data = AuthorizationRequestData::new(
        CLIENT_ID.to_owned(),
        redirect_uri,
        "user-1.signature".to_owned(),
    )
    .with_scopes(vec!["pages_show_list".to_owned()]);

    let url = build_authorization_url(authorization_endpoint, &data).unwrap();

    let query_pairs = url.query_pairs().collect::<HashMap<_, _>>();
    assert_eq!(query_pairs.get("scope").unwrap(), "pages_show_list");
}

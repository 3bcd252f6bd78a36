// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Walking the provider's resource graph
//!
//! An access credential grants access to one primary profile, a set of
//! delegated pages, and the Instagram business account each page may be
//! linked to. Discovery enumerates all of them as [`AccountCandidate`]s.
//! Only the profile fetch is fatal; everything below it degrades: a broken
//! page listing leaves the primary candidate alone, and one page's failed
//! Instagram lookup never blocks the other pages.

use fls_data_model::{AccountCandidate, SocialPlatform};
use fls_graph_client::{
    error::GraphRequestError,
    requests::{
        instagram::fetch_instagram_account, pages::fetch_delegated_pages, profile::fetch_profile,
    },
    types::AccessGrant,
};
use futures_util::{StreamExt, stream};
use url::Url;

/// How many Instagram lookups are allowed in flight at once
const PAGE_FANOUT_CONCURRENCY: usize = 4;

pub(crate) struct DiscoveredAccounts {
    /// The account the credential belongs to. Persisting it decides the
    /// overall outcome of the callback.
    pub(crate) primary: AccountCandidate,

    /// The Instagram accounts reachable through the delegated pages
    pub(crate) secondaries: Vec<AccountCandidate>,

    /// Secret-free summaries of everything discovery had to skip
    pub(crate) failures: Vec<String>,
}

#[tracing::instrument(name = "handlers.link.discovery", skip_all)]
pub(crate) async fn discover_accounts(
    http_client: &reqwest::Client,
    graph_endpoint: &Url,
    grant: &AccessGrant,
) -> Result<DiscoveredAccounts, GraphRequestError> {
    let profile = fetch_profile(http_client, graph_endpoint, &grant.access_token).await?;

    let mut failures = Vec::new();

    let pages = match fetch_delegated_pages(http_client, graph_endpoint, &grant.access_token).await
    {
        Ok(pages) => pages,
        Err(e) => {
            tracing::warn!(
                error = &e as &dyn std::error::Error,
                "Failed to list the delegated pages, linking the primary account only"
            );
            failures.push("could not list the delegated pages".to_owned());
            Vec::new()
        }
    };

    let primary = AccountCandidate {
        platform: SocialPlatform::Facebook,
        platform_account_id: profile.id,
        display_name: profile.name,
        access_token: grant.access_token.clone(),
        token_expires_at: grant.expires_at,
        metadata: serde_json::json!({ "pages": pages }),
    };

    let lookups: Vec<_> = pages
        .iter()
        .filter_map(|page| {
            let instagram = page.instagram_business_account.as_ref()?;
            Some((page.id.clone(), page.name.clone(), instagram.id.clone()))
        })
        .collect();

    // Each lookup is independent, so run them with bounded fan-out and
    // collect each outcome on its own
    let outcomes: Vec<_> = stream::iter(lookups)
        .map(|(page_id, page_name, instagram_id)| async move {
            let result = fetch_instagram_account(
                http_client,
                graph_endpoint,
                &grant.access_token,
                &instagram_id,
            )
            .await;
            (page_id, page_name, instagram_id, result)
        })
        .buffered(PAGE_FANOUT_CONCURRENCY)
        .collect()
        .await;

    let mut secondaries = Vec::new();
    for (page_id, page_name, instagram_id, result) in outcomes {
        match result {
            Ok(account) => secondaries.push(AccountCandidate {
                platform: SocialPlatform::Instagram,
                platform_account_id: account.id,
                display_name: account.username,
                access_token: grant.access_token.clone(),
                token_expires_at: grant.expires_at,
                metadata: serde_json::json!({ "page_id": page_id, "page_name": page_name }),
            }),
            Err(e) => {
                tracing::warn!(
                    error = &e as &dyn std::error::Error,
                    instagram.id = %instagram_id,
                    page.id = %page_id,
                    "Failed to fetch an Instagram account, skipping it"
                );
                failures.push(format!(
                    "could not fetch the instagram account linked to page {page_id}"
                ));
            }
        }
    }

    Ok(DiscoveredAccounts {
        primary,
        secondaries,
        failures,
    })
}

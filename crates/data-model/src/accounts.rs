// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use ulid::Ulid;

use crate::{SocialPlatform, UserId};

/// A persisted link between a FlowCrest user and an external social account.
///
/// The triple (`user_id`, `platform`, `platform_account_id`) is unique across
/// active and inactive rows alike: re-authorizing the same external account
/// replaces the credential on the existing row instead of creating a second
/// one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectedAccount {
    pub id: Ulid,
    pub user_id: UserId,
    pub platform: SocialPlatform,
    pub platform_account_id: String,
    pub display_name: Option<String>,
    pub access_token: String,
    pub token_expires_at: Option<DateTime<Utc>>,
    pub metadata: serde_json::Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl ConnectedAccount {
    #[doc(hidden)]
    #[must_use]
    pub fn samples(now: DateTime<Utc>, rng: &mut impl Rng) -> Vec<Self> {
        vec![
            ConnectedAccount {
                id: Ulid::from_datetime_with_source(now.into(), rng),
                user_id: UserId::new("00000000-0000-4000-8000-000000000001"),
                platform: SocialPlatform::Facebook,
                platform_account_id: "100001".to_owned(),
                display_name: Some("John Doe".to_owned()),
                access_token: "EAAG...".to_owned(),
                token_expires_at: None,
                metadata: serde_json::json!({ "pages": [] }),
                is_active: true,
                created_at: now,
            },
            ConnectedAccount {
                id: Ulid::from_datetime_with_source(now.into(), rng),
                user_id: UserId::new("00000000-0000-4000-8000-000000000001"),
                platform: SocialPlatform::Instagram,
                platform_account_id: "17841400000000001".to_owned(),
                display_name: Some("johndoe".to_owned()),
                access_token: "EAAG...".to_owned(),
                token_expires_at: None,
                metadata: serde_json::json!({ "page_id": "200001", "page_name": "John's Shop" }),
                is_active: true,
                created_at: now,
            },
        ]
    }
}

/// An external account discovered during an authorization callback, not yet
/// persisted.
///
/// Carries everything the upsert needs apart from the owning user: the
/// uniqueness key pieces, the credential material, and provider-specific
/// context (for Instagram accounts, which delegated page they came from).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountCandidate {
    pub platform: SocialPlatform,
    pub platform_account_id: String,
    pub display_name: Option<String>,
    pub access_token: String,
    pub token_expires_at: Option<DateTime<Utc>>,
    pub metadata: serde_json::Value,
}

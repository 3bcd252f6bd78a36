// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Types shared by the request functions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The credentials obtained when registering the application with the
/// provider
#[derive(Clone)]
pub struct ClientCredentials {
    /// The app identifier
    pub client_id: String,

    /// The app secret
    pub client_secret: String,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// An access credential obtained from the token endpoint
///
/// The provider expresses expiry as seconds-from-now; it is converted to an
/// absolute timestamp at exchange time so storage never has to know when the
/// exchange happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGrant {
    /// The access token
    pub access_token: String,

    /// When the token stops working, if the provider said
    pub expires_at: Option<DateTime<Utc>>,
}

/// The primary profile associated with an access credential
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Profile {
    /// The provider-side user identifier
    pub id: String,

    /// The profile's display name
    pub name: Option<String>,
}

/// A reference to the Instagram business account a page is linked to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstagramAccountRef {
    /// The Instagram-side account identifier
    pub id: String,
}

/// A page the access credential can act on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegatedPage {
    /// The page identifier
    pub id: String,

    /// The page name
    pub name: Option<String>,

    /// The Instagram business account linked to the page, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_business_account: Option<InstagramAccountRef>,
}

/// The identifying details of an Instagram business account
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstagramAccount {
    /// The Instagram-side account identifier
    pub id: String,

    /// The account's username
    pub username: Option<String>,
}

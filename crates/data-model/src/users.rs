// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use serde::{Deserialize, Serialize};

/// The identifier the identity provider assigned to a user.
///
/// Opaque to this service: it is minted elsewhere, carried through the
/// authorization round trip as the anti-forgery state, and used to scope
/// every storage operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A user identity resolved from a bearer credential by the identity
/// provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedUser {
    pub id: UserId,
    pub email: Option<String>,
}

impl VerifiedUser {
    #[doc(hidden)]
    #[must_use]
    pub fn sample() -> Self {
        Self {
            id: UserId::new("00000000-0000-4000-8000-000000000001"),
            email: Some("john@example.com".to_owned()),
        }
    }
}

// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error when parsing an unknown platform tag.
#[derive(Debug, Error)]
#[error("unknown social platform {0:?}")]
pub struct InvalidPlatformError(String);

/// The social platforms an account can be linked from.
///
/// `Facebook` is the platform the user authorizes against; `Instagram`
/// accounts are discovered through the pages that authorization delegates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Facebook,
    Instagram,
}

impl SocialPlatform {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
        }
    }
}

impl std::fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SocialPlatform {
    type Err = InvalidPlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "facebook" => Ok(Self::Facebook),
            "instagram" => Ok(Self::Instagram),
            other => Err(InvalidPlatformError(other.to_owned())),
        }
    }
}

// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::ConfigurationSection;

/// Configuration of the identity provider authenticating callers
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct IdentityConfig {
    /// The base URL of the identity provider's API. Bearer credentials are
    /// resolved against its `user` endpoint.
    pub issuer: Url,
}

impl ConfigurationSection for IdentityConfig {
    const PATH: Option<&'static str> = Some("identity");

    fn validate(
        &self,
        _figment: &figment::Figment,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
        if self.issuer.cannot_be_a_base() {
            return Err("The `issuer` URL must be an absolute HTTP(S) URL".into());
        }

        Ok(())
    }
}

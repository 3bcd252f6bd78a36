// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

mod http;
mod identity;
mod provider;
mod secrets;
mod telemetry;

pub use self::{
    http::HttpConfig,
    identity::IdentityConfig,
    provider::ProviderConfig,
    secrets::SecretsConfig,
    telemetry::{SentryConfig, TelemetryConfig},
};
use crate::util::ConfigurationSection;

/// Application configuration root
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RootConfig {
    /// Configuration of the HTTP server
    #[serde(default)]
    pub http: HttpConfig,

    /// Configuration of the social platform the service links accounts from
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Configuration of the identity provider authenticating callers
    pub identity: IdentityConfig,

    /// Application secrets
    pub secrets: SecretsConfig,

    /// Configuration related to sending monitoring data
    #[serde(default, skip_serializing_if = "TelemetryConfig::is_default")]
    pub telemetry: TelemetryConfig,
}

impl ConfigurationSection for RootConfig {
    fn validate(
        &self,
        figment: &figment::Figment,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
        self.http.validate(figment)?;
        self.provider.validate(figment)?;
        self.identity.validate(figment)?;
        self.secrets.validate(figment)?;
        self.telemetry.validate(figment)?;

        Ok(())
    }
}

// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::ConfigurationSection;

/// Configuration related to the Sentry integration
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SentryConfig {
    /// The DSN to use. Reporting is disabled when absent.
    pub dsn: Option<String>,

    /// The environment reported with each event
    pub environment: Option<String>,
}

/// Configuration related to sending monitoring data
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TelemetryConfig {
    /// Sentry error reporting configuration
    #[serde(default)]
    pub sentry: SentryConfig,
}

impl TelemetryConfig {
    /// Returns true if the configuration is the default one
    pub(crate) fn is_default(&self) -> bool {
        self.sentry.dsn.is_none() && self.sentry.environment.is_none()
    }
}

impl ConfigurationSection for TelemetryConfig {
    const PATH: Option<&'static str> = Some("telemetry");
}

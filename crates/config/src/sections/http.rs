// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::net::{Ipv4Addr, SocketAddr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::ConfigurationSection;

fn default_bind_address() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, 8080))
}

fn default_public_base() -> Url {
    "http://localhost:8080/".parse().unwrap()
}

/// Configuration of the HTTP server
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HttpConfig {
    /// The address the server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// The base URL the application is served from, as seen by end-users.
    ///
    /// The OAuth redirect target is derived from it, on both the connect and
    /// the callback legs, so it must match what is registered with the
    /// provider.
    #[serde(default = "default_public_base")]
    pub public_base: Url,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            public_base: default_public_base(),
        }
    }
}

impl ConfigurationSection for HttpConfig {
    const PATH: Option<&'static str> = Some("http");

    fn validate(
        &self,
        _figment: &figment::Figment,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
        if self.public_base.cannot_be_a_base() {
            return Err("The `public_base` URL must be an absolute HTTP(S) URL".into());
        }

        Ok(())
    }
}

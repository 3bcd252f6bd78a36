// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use url::Url;

use crate::ConfigurationSection;

fn default_authorization_endpoint() -> Url {
    "https://www.facebook.com/v18.0/dialog/oauth".parse().unwrap()
}

fn default_graph_endpoint() -> Url {
    "https://graph.facebook.com/v18.0/".parse().unwrap()
}

/// Configuration of the social platform accounts are linked from
///
/// The client id and secret are optional at load time so that the rest of
/// the service can run without them; the linking endpoints answer with a
/// configuration error when they are needed but absent.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProviderConfig {
    /// The app identifier obtained when registering with the provider
    pub client_id: Option<String>,

    /// The app secret obtained when registering with the provider
    pub client_secret: Option<String>,

    /// The provider's authorization dialog endpoint
    #[serde(default = "default_authorization_endpoint")]
    pub authorization_endpoint: Url,

    /// The base URL of the provider's Graph API. Must end with a `/` so
    /// relative endpoints can be joined onto it.
    #[serde(default = "default_graph_endpoint")]
    pub graph_endpoint: Url,

    /// The scopes requested on authorization. Defaults to the page-read and
    /// Instagram-publish permission set the service needs.
    pub scopes: Option<Vec<String>>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            authorization_endpoint: default_authorization_endpoint(),
            graph_endpoint: default_graph_endpoint(),
            scopes: None,
        }
    }
}

impl ConfigurationSection for ProviderConfig {
    const PATH: Option<&'static str> = Some("provider");

    fn validate(
        &self,
        _figment: &figment::Figment,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
        if !self.graph_endpoint.path().ends_with('/') {
            return Err("The `graph_endpoint` URL must end with a `/`".into());
        }

        Ok(())
    }
}

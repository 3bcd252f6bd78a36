// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::{convert::Infallible, sync::Arc};

use axum::extract::{FromRef, FromRequestParts};
use fls_axum_utils::ErrorWrapper;
use fls_config::RootConfig;
use fls_handlers::{LinkConfig, StateSigner};
use fls_identity::{HttpIdentityVerifier, IdentityVerifier};
use fls_storage::{
    BoxClock, BoxRepository, BoxRng, RepositoryError, RepositoryFactory, SystemClock,
};
use fls_storage_mem::InMemoryRepositoryFactory;
use rand::SeedableRng;

#[derive(Clone)]
pub struct AppState {
    repository_factory: InMemoryRepositoryFactory,
    identity: Arc<dyn IdentityVerifier>,
    link_config: LinkConfig,
    signer: StateSigner,
    http_client: reqwest::Client,
}

impl AppState {
    /// Assemble the state out of the loaded configuration
    pub fn from_config(config: &RootConfig) -> Result<Self, anyhow::Error> {
        let http_client = fls_graph_client::http::client();
        let identity = HttpIdentityVerifier::new(http_client.clone(), &config.identity.issuer)?;

        Ok(Self {
            repository_factory: InMemoryRepositoryFactory::new(),
            identity: Arc::new(identity),
            link_config: LinkConfig::from_config(&config.http, &config.provider),
            signer: StateSigner::new(&config.secrets.state_key),
            http_client,
        })
    }
}

impl FromRef<AppState> for reqwest::Client {
    fn from_ref(input: &AppState) -> Self {
        input.http_client.clone()
    }
}

impl FromRef<AppState> for LinkConfig {
    fn from_ref(input: &AppState) -> Self {
        input.link_config.clone()
    }
}

impl FromRef<AppState> for StateSigner {
    fn from_ref(input: &AppState) -> Self {
        input.signer.clone()
    }
}

impl FromRef<AppState> for Arc<dyn IdentityVerifier> {
    fn from_ref(input: &AppState) -> Self {
        Arc::clone(&input.identity)
    }
}

impl FromRequestParts<AppState> for BoxClock {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let clock = SystemClock::default();
        Ok(Box::new(clock))
    }
}

impl FromRequestParts<AppState> for BoxRng {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // This rng is used to source the local rng
        #[allow(clippy::disallowed_methods)]
        let rng = rand::thread_rng();

        let rng = rand_chacha::ChaChaRng::from_rng(rng).expect("Failed to seed RNG");
        Ok(Box::new(rng))
    }
}

impl FromRequestParts<AppState> for BoxRepository {
    type Rejection = ErrorWrapper<RepositoryError>;

    async fn from_request_parts(
        _parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let repo = state.repository_factory.create().await?;
        Ok(repo)
    }
}

// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use figment::Figment;
use fls_config::{ConfigurationSection, RootConfig};
use sentry_tower::{NewSentryLayer, SentryHttpLayer};

use crate::app_state::AppState;

#[derive(Parser, Debug, Default)]
pub(super) struct Options {}

impl Options {
    pub async fn run(self, figment: &Figment) -> anyhow::Result<ExitCode> {
        let config = RootConfig::extract(figment)
            .map_err(anyhow::Error::from_boxed)
            .context("could not load the configuration")?;

        let state = AppState::from_config(&config).context("could not build the service state")?;

        // Careful about the order here: the `NewSentryLayer` must be around
        // the `SentryHttpLayer`. axum makes new layers wrap the existing
        // ones, which is the other way around compared to
        // `tower::ServiceBuilder`.
        let app = fls_handlers::router::<AppState>()
            .with_state(state)
            .layer(SentryHttpLayer::with_transaction())
            .layer(NewSentryLayer::new_from_top());

        let bind_address = config.http.bind_address;
        let listener = tokio::net::TcpListener::bind(bind_address)
            .await
            .with_context(|| format!("could not bind to {bind_address}"))?;

        tracing::info!(
            address = %bind_address,
            version = crate::VERSION,
            "Listening"
        );

        axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(crate::shutdown::shutdown_signal())
            .await
            .context("could not serve the application")?;

        Ok(ExitCode::SUCCESS)
    }
}

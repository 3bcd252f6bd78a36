// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use figment::Figment;
use fls_config::{ConfigurationSection, RootConfig};

#[derive(clap::Subcommand, Debug)]
enum Subcommand {
    /// Load and check the configuration
    Check,

    /// Dump the active configuration
    Dump,
}

#[derive(Parser, Debug)]
pub(super) struct Options {
    #[command(subcommand)]
    subcommand: Subcommand,
}

impl Options {
    pub async fn run(self, figment: &Figment) -> anyhow::Result<ExitCode> {
        match self.subcommand {
            Subcommand::Check => {
                let _config = RootConfig::extract(figment)
                    .map_err(anyhow::Error::from_boxed)
                    .context("Configuration validation failed")?;

                tracing::info!("Configuration file looks good");
                Ok(ExitCode::SUCCESS)
            }

            Subcommand::Dump => {
                let config = RootConfig::extract(figment)
                    .map_err(anyhow::Error::from_boxed)
                    .context("Failed to load the configuration")?;

                serde_yaml::to_writer(std::io::stdout(), &config)
                    .context("could not serialize the configuration")?;

                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};

mod config;
mod server;

#[derive(clap::Subcommand, Debug)]
enum Subcommand {
    /// Configuration-related commands
    Config(self::config::Options),

    /// Runs the web server
    Server(self::server::Options),
}

#[derive(Parser, Debug)]
#[command(version = crate::VERSION)]
pub struct Options {
    /// Path to the configuration file
    #[arg(short, long, global = true, action = clap::ArgAction::Append)]
    config: Vec<Utf8PathBuf>,

    #[command(subcommand)]
    subcommand: Option<Subcommand>,
}

impl Options {
    /// Assemble the figment the configuration is loaded from: the given
    /// configuration files in order, overridden by `FLS_*` environment
    /// variables.
    pub fn figment(&self) -> Figment {
        let configs = if self.config.is_empty() {
            vec![Utf8PathBuf::from("config.yaml")]
        } else {
            self.config.clone()
        };

        let mut figment = Figment::new();
        for config in configs {
            figment = figment.merge(Yaml::file(config));
        }

        figment.merge(Env::prefixed("FLS_").split("__"))
    }

    pub async fn run(self, figment: &Figment) -> anyhow::Result<ExitCode> {
        match self.subcommand {
            Some(Subcommand::Config(c)) => c.run(figment).await,
            Some(Subcommand::Server(c)) => c.run(figment).await,

            // Run the server by default
            None => self::server::Options::default().run(figment).await,
        }
    }
}

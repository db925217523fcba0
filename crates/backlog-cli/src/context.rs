use std::path::Path;
use std::sync::Arc;

use backlog_core::{AppConfig, BacklogError, Notification};
use backlog_engine::BacklogController;
use backlog_remote::HttpBacklogApi;

use crate::cli::{Cli, Commands};
use crate::output;

pub struct CliContext {
    pub controller: BacklogController,
}

impl CliContext {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let config = resolve_config(cli);
        let api = HttpBacklogApi::from_config(&config)?;
        tracing::debug!("Using backlog API at {}", api.base_url());
        Ok(Self {
            controller: BacklogController::new(Arc::new(api), &config),
        })
    }

    /// Load the list, exiting with the error envelope if that fails.
    pub async fn load(&mut self) {
        if let Err(err) = self.controller.load().await {
            self.fail(&err);
        }
    }

    pub fn notifications(&mut self) -> Vec<Notification> {
        self.controller.take_notifications()
    }

    /// Exit with the most recent error notification, or the error itself.
    pub fn fail(&mut self, err: &BacklogError) -> ! {
        let notifications = self.controller.take_notifications();
        let message = notifications
            .iter()
            .rev()
            .find(|n| n.is_error())
            .map(|n| n.message.clone())
            .unwrap_or_else(|| err.to_string());
        output::output_error(&message, notifications)
    }
}

fn resolve_config(cli: &Cli) -> AppConfig {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(Path::new(path)),
        None => AppConfig::load(),
    };
    if let Some(url) = &cli.api_url {
        config.api_base_url = Some(url.clone());
    }
    if let Some(token) = &cli.token {
        config.api_token = Some(token.clone());
    }
    if let Commands::Boards { limit: Some(limit) } = &cli.command {
        config.board_list_limit = Some(*limit);
    }
    config
}

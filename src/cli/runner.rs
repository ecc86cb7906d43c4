//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::GraphConfig;
use crate::error::Result;
use crate::friends::{AggregationOutcome, FriendAggregator};
use crate::graph::GraphClient;
use serde_json::{json, Value};
use std::path::Path;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, returning the process exit code
    pub async fn run(&self) -> Result<i32> {
        match &self.cli.command {
            Commands::Friends { incremental } => self.friends(*incremental).await,
            Commands::Profile => self.profile().await.map(|()| 0),
            Commands::Picture { download } => self.picture(download.as_deref()).await.map(|()| 0),
            Commands::Config => self.show_config().map(|()| 0),
        }
    }

    /// Resolve configuration: inline JSON or file, then environment, then `--access-token`
    fn load_config(&self) -> Result<GraphConfig> {
        // Inline config takes precedence
        let config = if let Some(json_str) = &self.cli.config_json {
            GraphConfig::from_json_str(json_str)?
        } else if let Some(path) = &self.cli.config {
            GraphConfig::from_file(path)?
        } else {
            GraphConfig::default()
        };

        let config = config.with_env_overrides();
        Ok(match &self.cli.access_token {
            Some(token) => config.with_access_token(token.clone()),
            None => config,
        })
    }

    fn client(&self) -> Result<(GraphConfig, GraphClient)> {
        let config = self.load_config()?;
        let client = GraphClient::from_config(&config)?;
        Ok((config, client))
    }

    /// Aggregate friends; exit code 1 when pagination failed
    async fn friends(&self, incremental: bool) -> Result<i32> {
        let (config, client) = self.client()?;
        let aggregator = FriendAggregator::new(&client).with_config(config.friends);

        let outcome = if incremental {
            let mut page = 0u32;
            let outcome = aggregator
                .fetch_all_friends_incremental(|friends| {
                    page += 1;
                    self.output_message(&json!({
                        "type": "PAGE",
                        "page": {
                            "number": page,
                            "total": friends.len()
                        }
                    }));
                })
                .await;
            self.output_outcome(&outcome);
            outcome
        } else {
            aggregator
                .fetch_all_friends(|outcome| self.output_outcome(outcome))
                .await
        };

        Ok(i32::from(outcome.is_failed()))
    }

    async fn profile(&self) -> Result<()> {
        let (_, client) = self.client()?;
        let profile = client.fetch_profile().await?;
        self.output_message(&json!({
            "type": "PROFILE",
            "profile": profile
        }));
        Ok(())
    }

    async fn picture(&self, download: Option<&Path>) -> Result<()> {
        let (_, client) = self.client()?;

        let Some(path) = download else {
            let picture = client.fetch_profile_picture().await?;
            self.output_message(&json!({
                "type": "PICTURE",
                "picture": picture
            }));
            return Ok(());
        };

        let bytes = client.download_profile_picture().await?;
        std::fs::write(path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "Profile picture saved");
        self.output_message(&json!({
            "type": "LOG",
            "log": {
                "level": "INFO",
                "message": format!("Wrote {} bytes to {}", bytes.len(), path.display())
            }
        }));
        Ok(())
    }

    fn show_config(&self) -> Result<()> {
        let config = self.load_config()?;
        self.output_message(&json!({
            "type": "CONFIG",
            "config": config.redacted()
        }));
        Ok(())
    }

    /// Emit the collected friends followed by the run status
    fn output_outcome(&self, outcome: &AggregationOutcome) {
        self.output_message(&json!({
            "type": "FRIENDS",
            "friends": outcome.friends
        }));
        self.output_message(&status_message(outcome));
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

fn status_message(outcome: &AggregationOutcome) -> Value {
    let mut status = json!({
        "status": outcome.status.as_str(),
        "stats": outcome.stats
    });
    if let Some(cause) = outcome.error() {
        status["error"] = json!({
            "kind": cause.kind(),
            "message": cause.to_string()
        });
    }
    json!({
        "type": "STATUS",
        "status": status
    })
}

//! CLI Tooling
//!
//! Command-line front end for the agents console. Each command builds the same
//! state the console would and prints it as a table.

use crate::client::HttpAdminClient;
use crate::config::{ConfigLoader, SpiceConfig};
use crate::console::{ActiveEditor, AgentsConsole};
use crate::directory::{AgentDirectory, RemoteStatus, TreeItem};
use crate::error::ApiError;
use crate::predicate::{ComparisonLoad, PredicateRowManager, PredicateValue};
use crate::skill::{SelectionControl, SyncReport};
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Spice CLI - agents, profiles and skills administration
#[derive(Parser, Debug)]
#[command(name = "spice")]
#[command(about = "Inspect agents, profiles and skill assignments on an admin server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Admin server URL (overrides configuration)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold command-line overrides into the loaded configuration.
    pub fn apply_overrides(&self, config: &mut SpiceConfig) {
        if let Some(base_url) = &self.base_url {
            config.server.base_url = base_url.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show a profile's skill selection
    Profile {
        /// Profile name
        name: String,
    },
    /// Show an agent and its skill selection
    Agent {
        /// Agent login
        login: String,
    },
    /// Delete a profile
    DeleteProfile {
        /// Profile name
        name: String,
    },
    /// Delete an agent
    DeleteAgent {
        /// Agent login
        login: String,
    },
    /// List the selectable skills
    Skills,
    /// Load a predicate list and check it against the property store
    Predicates {
        /// JSON file holding `[{property, comparison, value}]`
        file: PathBuf,
    },
    /// Print the effective configuration as TOML
    Config,
}

/// CLI context holding the loaded configuration and the server client.
pub struct CliContext {
    config: SpiceConfig,
    client: Arc<HttpAdminClient>,
}

impl CliContext {
    pub fn new(config: SpiceConfig) -> Result<Self, ApiError> {
        let client = Arc::new(HttpAdminClient::new(&config.server)?);
        Ok(Self { config, client })
    }

    /// Load configuration for `cli` and build the context.
    pub fn from_cli(cli: &Cli) -> Result<Self, ApiError> {
        let mut config = ConfigLoader::resolve(cli.config.as_deref())?;
        cli.apply_overrides(&mut config);
        Self::new(config)
    }

    pub fn config(&self) -> &SpiceConfig {
        &self.config
    }

    fn console(&self) -> AgentsConsole {
        AgentsConsole::new(self.client.clone(), self.client.clone(), &self.config.console)
    }

    /// Execute a CLI command
    pub async fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        info!(command = ?command, "Executing command");
        match command {
            Commands::Profile { name } => {
                let mut console = self.console();
                let report = console.on_tree_click(TreeItem::profile(name)).await?;
                let control = console.profile_skills().lock();
                let mut out = match console.active() {
                    ActiveEditor::Profile(editor) => format!(
                        "Profile: {}{}\n",
                        editor.name(),
                        if editor.is_name_editable() { "" } else { " (locked)" }
                    ),
                    _ => String::new(),
                };
                out.push_str(&format_report(&report));
                out.push_str(&format_control(&control));
                Ok(out)
            }
            Commands::Agent { login } => {
                let mut console = self.console();
                console.init_skills().await;
                let report = console.on_tree_click(TreeItem::agent(login)).await?;
                let control = console.agent_skills().lock();
                let mut out = String::new();
                if let ActiveEditor::Agent(editor) = console.active() {
                    let mut table = Table::new();
                    table.load_preset(UTF8_BORDERS_ONLY);
                    table.set_header(vec!["Login", "Integrated", "Security level", "Profile"]);
                    table.add_row(vec![
                        editor.login.clone(),
                        editor.integrated.clone(),
                        editor.security_level.to_string(),
                        editor.profile.clone(),
                    ]);
                    out.push_str(&format!("{}\n", table));
                }
                out.push_str(&format_report(&report));
                out.push_str(&format_control(&control));
                Ok(out)
            }
            Commands::DeleteProfile { name } => {
                let status = self.client.delete_profile(name).await?;
                Ok(format_status("Profile", name, &status))
            }
            Commands::DeleteAgent { login } => {
                let status = self.client.delete_agent(login).await?;
                Ok(format_status("Agent", login, &status))
            }
            Commands::Skills => {
                let console = self.console();
                let report = console.init_skills().await;
                let control = console.agent_skills().lock();
                let mut out = format_report(&report);
                out.push_str(&format_control(&control));
                Ok(out)
            }
            Commands::Predicates { file } => {
                let raw = std::fs::read_to_string(file).map_err(|e| {
                    ApiError::ConfigError(format!("Failed to read {}: {}", file.display(), e))
                })?;
                let list: Vec<PredicateValue> = serde_json::from_str(&raw)?;
                let mut manager = PredicateRowManager::new(self.client.clone());
                manager.set_value(&list);
                let loads = manager.load_all_comparisons().await;
                Ok(format_predicates(&manager, &loads))
            }
            Commands::Config => toml::to_string_pretty(&self.config).map_err(|e| {
                ApiError::ConfigError(format!("Failed to render configuration: {}", e))
            }),
        }
    }
}

fn format_report(report: &SyncReport) -> String {
    let mut out = format!(
        "Generation {}: {:?}, {} selected, {} disabled\n",
        report.generation.value(),
        report.status,
        report.reconcile.selected,
        report.reconcile.disabled
    );
    for (namespace, outcome) in &report.namespaces {
        out.push_str(&format!("  {}: {:?}\n", namespace, outcome));
    }
    out
}

fn format_control(control: &SelectionControl) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Group", "Value", "Label", "Selected", "Disabled"]);
    for group in control.groups() {
        let group_label = group.label.clone().unwrap_or_default();
        for option in &group.options {
            table.add_row(vec![
                group_label.clone(),
                option.value.clone(),
                option.label.clone(),
                yes_no(option.selected),
                yes_no(option.disabled),
            ]);
        }
    }
    format!("{}\n", table)
}

fn format_status(kind: &str, name: &str, status: &RemoteStatus) -> String {
    if status.success {
        format!("{} '{}' deleted", kind, name)
    } else {
        format!(
            "{} '{}' not deleted: {}",
            kind,
            name,
            status.message.as_deref().unwrap_or("no reason given")
        )
    }
}

fn format_predicates(
    manager: &PredicateRowManager,
    loads: &[(crate::predicate::RowId, Result<ComparisonLoad, crate::error::EditorError>)],
) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec![
        "Row",
        "Property",
        "Comparison",
        "Value",
        "Comparators",
        "Valid",
    ]);
    for row in manager.rows() {
        let load = loads
            .iter()
            .find(|(id, _)| *id == row.id())
            .map(|(_, result)| match result {
                Ok(ComparisonLoad::Loaded { comparisons }) => format!("{} loaded", comparisons),
                Ok(ComparisonLoad::NoMatch) => "unknown property".to_string(),
                Ok(ComparisonLoad::Failed) => "lookup failed".to_string(),
                Err(e) => e.to_string(),
            })
            .unwrap_or_else(|| "-".to_string());
        let valid = row.comparison_is_offered() && row.value_is_valid();
        table.add_row(vec![
            row.id().to_string(),
            row.property().to_string(),
            row.comparison().to_string(),
            row.value().to_string(),
            load,
            yes_no(valid),
        ]);
    }
    format!("{}\n", table)
}

fn yes_no(flag: bool) -> String {
    let text = if flag { "yes" } else { "no" };
    text.to_string()
}

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::process::exit;

use crate::module_manager::{Layout, ModuleManager};
use module_store::{Category, ModuleRecord, StoreConfig, StoreError};

// CLI arguments parsing structure
#[derive(Parser)]
#[command(author, version, about, long_about = None, disable_help_subcommand = true)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(short = 'j', long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Mirror URL template, `{module_name}` is replaced with the dataset name
    #[arg(
        long = "mirror",
        value_name = "TEMPLATE",
        env = "MODULE_STORE_MIRRORS",
        value_delimiter = ',',
        global = true
    )]
    pub mirrors: Vec<String>,

    /// Terminal width to render for (defaults to the current terminal)
    #[arg(long, global = true)]
    pub width: Option<usize>,

    /// Width of the name column (defaults to the widest entry)
    #[arg(long, global = true)]
    pub name_width: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all available modules of a kind (adapter, plugin, driver)
    List {
        /// Module kind
        kind: String,
    },
    /// Search modules of a kind by name, project or description
    Search {
        /// Module kind
        kind: String,
        /// Case-insensitive text to look for
        query: String,
    },
}

// Execute the selected command
pub async fn execute_command(cli: &Cli) -> Result<()> {
    let manager = ModuleManager::new(
        StoreConfig::with_mirrors(cli.mirrors.clone()),
        Layout {
            name_column_width: cli.name_width,
            terminal_width: cli.width,
        },
    );

    let result = match &cli.command {
        Commands::List { kind } => cmd_list(&manager, kind, cli.json).await,
        Commands::Search { kind, query } => cmd_search(&manager, kind, query, cli.json).await,
    };

    // Store failures are reported in full here instead of through the error chain
    if let Err(err) = &result {
        if let Some(report) = failure_report(err) {
            eprintln!("{report}");
            exit(1);
        }
    }
    result
}

// Command implementations
async fn cmd_list(manager: &ModuleManager, kind: &str, json_output: bool) -> Result<()> {
    let records = manager
        .list(kind)
        .await
        .with_context(|| format!("failed to list {kind} modules"))?;

    print_records(manager, &records, json_output, "no modules available")
}

async fn cmd_search(
    manager: &ModuleManager,
    kind: &str,
    query: &str,
    json_output: bool,
) -> Result<()> {
    let hits = manager
        .search(kind, query)
        .await
        .with_context(|| format!("failed to search {kind} modules for '{query}'"))?;

    print_records(manager, &hits, json_output, "no matching modules found")
}

fn print_records(
    manager: &ModuleManager,
    records: &[ModuleRecord],
    json_output: bool,
    empty_msg: &str,
) -> Result<()> {
    if json_output {
        // Output as JSON
        let json = serde_json::to_string_pretty(records)
            .context("failed to serialize module list to JSON")?;
        println!("{json}");
    } else if records.is_empty() {
        println!("{empty_msg}");
    } else {
        println!("{}", manager.render(records));
    }

    Ok(())
}

// Describe a store failure with every mirror cause, None for other errors
fn failure_report(err: &anyhow::Error) -> Option<String> {
    let store_err = err.downcast_ref::<StoreError>()?;
    match store_err {
        StoreError::InvalidCategory(kind) => {
            let valid: Vec<&str> = Category::ALL
                .iter()
                .map(|category| category.key())
                .collect();
            Some(format!(
                "error: unknown module kind '{kind}', expected one of: {}",
                valid.join(", ")
            ))
        }
        StoreError::AllMirrorsFailed { .. } => {
            let mut report = format!("error: {store_err}");
            for cause in store_err.causes() {
                report.push_str(&format!("\n  - {cause}"));
            }
            Some(report)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn all_failed() -> StoreError {
        StoreError::AllMirrorsFailed {
            category: Category::Plugin,
            causes: vec![
                StoreError::MirrorRequestFailed {
                    url: "mirror-a/plugins".to_string(),
                    reason: "connection refused".to_string(),
                },
                StoreError::MirrorParseFailed {
                    url: "mirror-b/plugins".to_string(),
                    reason: "expected value".to_string(),
                },
                StoreError::MirrorRequestFailed {
                    url: "mirror-c/plugins".to_string(),
                    reason: "HTTP status server error (502)".to_string(),
                },
            ],
        }
    }

    // Test the aggregate is reported once with one line per mirror
    #[test]
    fn test_failure_report_lists_causes_once() {
        let err = anyhow::Error::new(all_failed()).context("failed to list plugin modules");
        let report = failure_report(&err).expect("store failures are reported");

        assert_eq!(report.matches("failed to get plugin list").count(), 1);
        assert_eq!(report.lines().count(), 4);
        assert!(report.contains("  - request to mirror-a/plugins failed: connection refused"));
        assert!(report.contains("  - failed to parse response from mirror-b/plugins"));
        assert!(!report.contains("failed to list plugin modules"));
    }

    // Test an unknown kind names the valid ones
    #[test]
    fn test_failure_report_invalid_kind() {
        let err = anyhow::Error::new(StoreError::InvalidCategory("theme".to_string()));
        let report = failure_report(&err).expect("store failures are reported");
        assert_eq!(
            report,
            "error: unknown module kind 'theme', expected one of: adapter, plugin, driver"
        );
    }

    // Test other errors are left to the normal error chain
    #[test]
    fn test_failure_report_other_errors() {
        let err = anyhow!("failed to serialize module list to JSON");
        assert!(failure_report(&err).is_none());
    }
}

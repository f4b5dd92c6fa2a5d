//! Output formatting utilities

use colored::*;
use mcprofile::{PastName, Profile};
use serde::Serialize;
use tabled::{Table, Tabled};

use crate::error::CliResult;

/// Placeholder for absent values in human readable output
const NONE: &str = "<NONE>";

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// One profile as printed by the CLI
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ProfileRow {
    #[tabled(rename = "NAME")]
    pub name: String,
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "PRIOR NAMES", display_with = "display_names")]
    pub prior_names: Option<Vec<String>>,
    #[tabled(rename = "MODEL", display_with = "display_option")]
    pub model: Option<String>,
    #[tabled(rename = "SKIN", display_with = "display_option")]
    pub skin_url: Option<String>,
    #[tabled(rename = "CAPE", display_with = "display_option")]
    pub cape_url: Option<String>,
}

impl From<&Profile> for ProfileRow {
    fn from(profile: &Profile) -> Self {
        let properties = profile.properties();
        Self {
            name: profile.name().to_string(),
            id: profile.id().to_string(),
            prior_names: profile
                .name_history()
                .map(|past| past.iter().map(PastName::to_string).collect()),
            model: properties.map(|p| p.model().to_string()),
            skin_url: properties.and_then(|p| p.skin_url()).map(str::to_string),
            cape_url: properties.and_then(|p| p.cape_url()).map(str::to_string),
        }
    }
}

fn display_option(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

fn display_names(value: &Option<Vec<String>>) -> String {
    match value {
        Some(names) if names.is_empty() => NONE.to_string(),
        Some(names) => names.join(", "),
        None => "-".to_string(),
    }
}

/// Print a vector of items in the specified format
pub fn print_output<T: Serialize + Tabled>(data: Vec<T>, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                println!("{}", "No results".dimmed());
            } else {
                let table = Table::new(data).to_string();
                println!("{}", table);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(&data)?);
        }
    }
    Ok(())
}

/// Print a single item in the specified format
pub fn print_single<T: Serialize + Tabled>(item: T, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table => print_output(vec![item], format),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&item)?);
            Ok(())
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(&item)?);
            Ok(())
        }
    }
}

/// Full report for one lookup, aligned the way operators read it
pub fn render_report(query: &str, row: &ProfileRow) -> String {
    let value = |v: &Option<String>| v.clone().unwrap_or_else(|| NONE.to_string());
    let prior = match &row.prior_names {
        Some(names) => format!("[{}]", names.join(" ")),
        None => NONE.to_string(),
    };

    let lines = [
        format!("{:<25}{:>32}", "INFORMATION FOR:", query),
        "-".repeat(57),
        format!("{:<25}{:>32}", "CASE-CORRECTED USERNAME:", row.name),
        format!("{:<25}{:>32}", "ID:", row.id),
        format!("{:<25}{:>32}", "PRIOR NAMES:", prior),
        String::new(),
        format!("{:<25}{:>32}", "SKIN MODEL:", value(&row.model)),
        format!("{:<25}{:>32}", "SKIN URL:", value(&row.skin_url)),
        format!("{:<25}{:>32}", "CAPE URL:", value(&row.cape_url)),
    ];
    lines.join("\n")
}

//! Command implementations

use chrono::DateTime;
use clap::Subcommand;
use mcprofile::{Profile, ProfileClient};

use crate::error::{CliError, CliResult};
use crate::output::{print_output, print_single, render_report, OutputFormat, ProfileRow};

/// Available lookups
#[derive(Debug, Subcommand)]
pub enum LookupCommands {
    /// Look up the profile currently owning a name
    Name {
        /// Name to look up
        name: String,

        /// Resolve the name as of this Unix timestamp (seconds)
        #[arg(long)]
        at: Option<i64>,
    },

    /// Look up a profile and its name history by identifier
    Id {
        /// Undashed profile identifier
        id: String,
    },

    /// Look up a profile with skin, cape and model by identifier
    Properties {
        /// Undashed profile identifier
        id: String,
    },

    /// Look up up to 100 names in one request
    Many {
        /// Names to look up
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Full report for a name: history, skin, cape and model
    Show {
        /// Name to look up
        name: String,
    },
}

/// Execute a lookup command
pub async fn execute(
    command: LookupCommands,
    client: &ProfileClient,
    format: OutputFormat,
) -> CliResult<()> {
    match command {
        LookupCommands::Name { name, at: None } => {
            let profile = client.load_by_name(&name).await?;
            print_single(ProfileRow::from(&profile), format)
        }
        LookupCommands::Name { name, at: Some(at) } => {
            let at = DateTime::from_timestamp(at, 0)
                .ok_or_else(|| CliError::InvalidInput(format!("timestamp {at} out of range")))?;
            let profile = client.load_by_name_at(&name, at).await?;
            print_single(ProfileRow::from(&profile), format)
        }
        LookupCommands::Id { id } => {
            let profile = client.load_by_id(&id).await?;
            print_single(ProfileRow::from(&profile), format)
        }
        LookupCommands::Properties { id } => {
            let profile = client.load_with_properties(&id).await?;
            print_single(ProfileRow::from(&profile), format)
        }
        LookupCommands::Many { names } => {
            let profiles = client.load_many(&names).await?;
            let rows: Vec<ProfileRow> = profiles.iter().map(ProfileRow::from).collect();
            print_output(rows, format)
        }
        LookupCommands::Show { name } => {
            let profile = show(client, &name).await?;
            let row = ProfileRow::from(&profile);
            match format {
                OutputFormat::Table => {
                    println!("{}", render_report(&name, &row));
                    Ok(())
                }
                _ => print_single(row, format),
            }
        }
    }
}

/// Load a profile with both history and properties filled in
async fn show(client: &ProfileClient, name: &str) -> CliResult<Profile> {
    let profile = client.load_by_name(name).await?;
    profile.load_name_history(client).await?;
    profile.load_properties(client).await?;
    tracing::debug!(id = %profile.id(), "profile fully loaded");
    Ok(profile)
}

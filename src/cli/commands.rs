//! CLI commands and argument parsing
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, subcommands, and their arguments.

use crate::auth::provider::create_credential_provider;
use crate::config::{init_default_config, Config, DEFAULT_INSTALLER_RESOURCE_NAME};
use crate::error::Result;
use crate::installer::{
    report, EndpointBuilder, InstallerClient, InstallerOperations, InstallerRequestParams,
    OperationKind, ReqwestTransport, ResponseOutcome,
};
use crate::utils::helpers::parse_key_val;
use clap::{Args, Parser, Subcommand};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Get the full version string with build information
fn get_version() -> &'static str {
    env!("VERSION_WITH_GIT")
}

/// Get build information for display
pub fn get_build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: env!("GIT_HASH"),
        git_branch: env!("GIT_BRANCH"),
        build_time: env!("BUILD_TIME"),
    }
}

#[derive(Debug)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_branch: &'static str,
    pub build_time: &'static str,
}

#[derive(Parser)]
#[command(name = "mariner-baremetal")]
#[command(about = "Create Mariner Baremetal Installer Images through Azure")]
#[command(version = get_version(), author)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Subscription to use instead of the configured or Azure CLI default
    #[arg(long, global = true, value_name = "ID")]
    pub subscription: Option<String>,

    /// Use this bearer token instead of acquiring one from Azure credentials
    #[arg(
        long,
        global = true,
        value_name = "TOKEN",
        env = "MARINER_BAREMETAL_ACCESS_TOKEN",
        hide_env_values = true
    )]
    pub access_token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage Baremetal Installer Image resources
    Installer {
        #[command(subcommand)]
        command: InstallerCommands,
    },
    /// Configuration management commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Show detailed version and build information
    Version,
}

#[derive(Subcommand)]
pub enum InstallerCommands {
    /// Creates the Baremetal Installer Image resource
    Create(CreateArgs),
    /// Updates the Baremetal Installer Image resource (same arguments as create)
    Update(CreateArgs),
    /// Lists the Baremetal Installer Image resources by resource group
    List {
        /// Name of the resource group
        #[arg(short = 'g', long = "resource-group")]
        resource_group: String,
    },
    /// Gets the Baremetal Installer Image resource
    Show {
        /// Name of the resource group
        #[arg(short = 'g', long = "resource-group")]
        resource_group: String,
        /// Name of the installer image resource
        #[arg(short = 'n', long = "installer-name")]
        installer_name: String,
    },
    /// Deletes the Baremetal Installer Image resource
    Delete {
        /// Name of the resource group
        #[arg(short = 'g', long = "resource-group")]
        resource_group: String,
        /// Name of the installer image resource
        #[arg(short = 'n', long = "installer-name")]
        installer_name: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    /// Name of the resource group where the installer image resource will be created
    #[arg(short = 'g', long = "resource-group")]
    pub resource_group: String,

    /// Name of the storage account to upload the installer image ISO
    #[arg(short = 's', long = "storage-account-name")]
    pub storage_account_name: String,

    /// Name of the blob container to upload the installer image ISO
    #[arg(short = 'c', long = "blob-container-name")]
    pub blob_container_name: String,

    /// Path to the host configuration file for use on the baremetal machine
    #[arg(long = "host-configuration", visible_alias = "hc", value_name = "PATH")]
    pub host_configuration: PathBuf,

    /// Name of the installer image resource
    #[arg(short = 'n', long = "installer-name", default_value = DEFAULT_INSTALLER_RESOURCE_NAME)]
    pub installer_name: String,

    /// Location; defaults to the location of the resource group
    #[arg(short = 'l', long)]
    pub location: Option<String>,

    /// Space-separated tags in KEY=VALUE format
    #[arg(long, num_args = 1.., value_parser = parse_key_val::<String, String>)]
    pub tags: Vec<(String, String)>,
}

impl CreateArgs {
    pub fn into_params(self) -> InstallerRequestParams {
        let tags: BTreeMap<String, String> = self.tags.into_iter().collect();
        let mut params = InstallerRequestParams::new(
            self.resource_group,
            self.storage_account_name,
            self.blob_container_name,
            self.host_configuration,
        )
        .with_installer_name(self.installer_name)
        .with_tags(tags);
        params.location = self.location;
        params
    }
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Show configuration file path
    Path,
    /// Write a default configuration file if none exists
    Init,
}

impl Cli {
    /// Run the selected command.
    ///
    /// A failed installer request comes back as `MarinerError::ApiError` after
    /// it has been logged.
    pub async fn execute(self, config: Config) -> Result<()> {
        match self.command {
            Commands::Installer { command } => {
                execute_installer_command(command, self.subscription, self.access_token, config)
                    .await
            }
            Commands::Config { command } => execute_config_command(command, &config).await,
            Commands::Version => {
                execute_version_command();
                Ok(())
            }
        }
    }
}

async fn execute_installer_command(
    command: InstallerCommands,
    subscription: Option<String>,
    access_token: Option<String>,
    config: Config,
) -> Result<()> {
    let subscription_id = config.resolve_subscription_id(subscription).await?;
    let credentials = create_credential_provider(access_token)?;
    let transport = Arc::new(ReqwestTransport::new(config.request_timeout)?);

    let client = InstallerClient::new(
        credentials,
        transport,
        EndpointBuilder::new(config.api.clone()),
        subscription_id,
    )
    .with_default_location(config.default_location.clone());

    let (kind, installer_name, outcome) = match command {
        InstallerCommands::Create(args) | InstallerCommands::Update(args) => {
            let params = args.into_params();
            let outcome = client.create_installer(&params).await?;
            (OperationKind::Create, Some(params.installer_name), outcome)
        }
        InstallerCommands::List { resource_group } => {
            let outcome = client.list_installers(&resource_group).await?;
            (OperationKind::List, None, outcome)
        }
        InstallerCommands::Show {
            resource_group,
            installer_name,
        } => {
            let outcome = client.show_installer(&resource_group, &installer_name).await?;
            (OperationKind::Show, Some(installer_name), outcome)
        }
        InstallerCommands::Delete {
            resource_group,
            installer_name,
        } => {
            let outcome = client
                .delete_installer(&resource_group, &installer_name)
                .await?;
            (OperationKind::Delete, Some(installer_name), outcome)
        }
    };

    let mut stdout = std::io::stdout().lock();
    finish_installer_command(&mut stdout, kind, installer_name.as_deref(), outcome)
}

/// Report the outcome, then turn a failure into an error for the exit status
fn finish_installer_command<W: Write>(
    out: &mut W,
    kind: OperationKind,
    installer_name: Option<&str>,
    outcome: ResponseOutcome,
) -> Result<()> {
    report(out, kind, installer_name, &outcome)?;
    outcome.into_result().map(|_| ())
}

async fn execute_config_command(command: ConfigCommands, config: &Config) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let contents = toml::to_string_pretty(config)?;
            println!("{contents}");
        }
        ConfigCommands::Path => {
            println!("{}", Config::get_config_path()?.display());
        }
        ConfigCommands::Init => {
            let path = init_default_config().await?;
            println!("Configuration file: {}", path.display());
        }
    }
    Ok(())
}

fn execute_version_command() {
    let info = get_build_info();
    println!("mariner-baremetal {}", info.version);
    println!("  Git commit: {}", info.git_hash);
    println!("  Git branch: {}", info.git_branch);
    println!("  Built:      {}", info.build_time);
}

//! schedgen CLI entrypoint
//! Parses command-line arguments and dispatches to the core generator.

// Internal imports (std, crate)
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

// External imports (alphabetized)
use anyhow::{bail, Context};
use clap::Parser;
use dialoguer::Confirm;
use schedgen_core::dispatch::run;
use schedgen_core::{Artifact, Command, Config, EndpointSummary, GenerateOptions, Generator, Output};
use tokio::fs;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schedgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (YAML or TOML) providing default options
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Endpoint catalog file replacing the built-in catalog
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

/// Where generated files go
#[derive(clap::Args, Debug, Default)]
pub struct OutputArgs {
    /// Write files below this directory instead of printing them
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Overwrite existing files without asking
    #[arg(long)]
    force: bool,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate the direct scheduling API client
    Client {
        /// Target environment: production, staging or development
        #[arg(long)]
        environment: Option<String>,
        /// Module path the client imports domain types from
        #[arg(long)]
        types_import_path: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Generate the same-origin proxy client
    ProxyClient {
        /// Module path the client imports domain types from
        #[arg(long)]
        types_import_path: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Generate route handlers for a server framework
    Routes {
        /// Framework: nextjs, express, fastify or nestjs
        #[arg(long)]
        framework: Option<String>,
        /// Module path the handlers import the client from
        #[arg(long)]
        client_import_path: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Generate the domain types module
    Types {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List the endpoints of the catalog
    List {
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a dispatch command by name with JSON options
    ///
    /// Example: schedgen exec generate_routes --options '{"framework":"nextjs"}'
    Exec {
        /// Command name, e.g. generate_client
        command: String,
        /// Options as a JSON object
        #[arg(long)]
        options: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout carries generated code
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => Config::default(),
    };
    let defaults = config.to_options();

    let catalog_path = cli
        .catalog
        .clone()
        .or_else(|| config.catalog_path.as_ref().map(PathBuf::from));
    let generator = match &catalog_path {
        Some(path) => Generator::from_catalog_file(path)
            .await
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => Generator::new().context("Failed to load the built-in catalog")?,
    };

    match cli.command {
        Commands::Client {
            environment,
            types_import_path,
            output,
        } => {
            let options = GenerateOptions {
                environment,
                types_import_path,
                ..Default::default()
            }
            .with_defaults(&defaults);
            let output_dir = output_dir(&output, &options);
            let artifact = generator.generate_client(&options)?;
            emit(&artifact, output_dir.as_deref(), output.force).await?;
        }
        Commands::ProxyClient {
            types_import_path,
            output,
        } => {
            let options = GenerateOptions {
                types_import_path,
                ..Default::default()
            }
            .with_defaults(&defaults);
            let output_dir = output_dir(&output, &options);
            let artifact = generator.generate_proxy_client(&options)?;
            emit(&artifact, output_dir.as_deref(), output.force).await?;
        }
        Commands::Routes {
            framework,
            client_import_path,
            output,
        } => {
            let options = GenerateOptions {
                framework,
                client_import_path,
                ..Default::default()
            }
            .with_defaults(&defaults);
            let output_dir = output_dir(&output, &options);
            let artifact = generator.generate_routes(&options)?;
            emit(&artifact, output_dir.as_deref(), output.force).await?;
        }
        Commands::Types { output } => {
            let output_dir = output_dir(&output, &defaults);
            let artifact = generator.generate_types(&defaults)?;
            emit(&artifact, output_dir.as_deref(), output.force).await?;
        }
        Commands::List { json } => {
            print_endpoints(&generator.list_endpoints(), json)?;
        }
        Commands::Exec {
            command,
            options,
            output,
        } => {
            let command: Command = command.parse()?;
            let options: GenerateOptions = match options {
                Some(raw) => {
                    serde_json::from_str(&raw).context("--options must be a JSON object")?
                }
                None => GenerateOptions::default(),
            };
            let options = options.with_defaults(&defaults);
            let output_dir = output_dir(&output, &options);
            match run(&generator, command, &options)? {
                Output::Artifact(artifact) => {
                    emit(&artifact, output_dir.as_deref(), output.force).await?
                }
                Output::Endpoints(endpoints) => print_endpoints(&endpoints, true)?,
            }
        }
    }
    Ok(())
}

/// `--output-dir` wins over the configured directory
fn output_dir(output: &OutputArgs, options: &GenerateOptions) -> Option<PathBuf> {
    output
        .output_dir
        .clone()
        .or_else(|| options.output_dir.as_ref().map(PathBuf::from))
}

/// Print the artifact, or write it below `output_dir`
async fn emit(artifact: &Artifact, output_dir: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let Some(output_dir) = output_dir else {
        let multiple = artifact.len() > 1;
        for (name, content) in artifact.files() {
            if multiple {
                println!("// ---- {} ----", name);
            }
            print!("{}", content);
        }
        return Ok(());
    };

    for (name, content) in artifact.files() {
        let path = output_dir.join(name);
        if fs::try_exists(&path).await.unwrap_or(false) && !force && !confirm_overwrite(&path)? {
            tracing::info!("Skipping {}", path.display());
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote {}", path.display());
        println!("{}", path.display());
    }
    Ok(())
}

fn confirm_overwrite(path: &Path) -> anyhow::Result<bool> {
    if !std::io::stdin().is_terminal() {
        bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }
    Confirm::new()
        .with_prompt(format!("{} already exists. Overwrite?", path.display()))
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}

fn print_endpoints(endpoints: &[EndpointSummary], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(endpoints)?);
        return Ok(());
    }
    for endpoint in endpoints {
        println!(
            "{:<7} {:<36} {}",
            endpoint.method.as_str(),
            endpoint.path,
            endpoint.name
        );
    }
    Ok(())
}

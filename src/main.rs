use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use family_tree::{
    artifacts::FamilyFile,
    config::Config,
    lineage::Family,
    reports::{ReportFormat, ReportGenerator},
    types::*,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "family-tree")]
#[command(about = "Parent, child and cousin queries over a family tree")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Family tree file (YAML, or JSON by extension); defaults to the sample tree
    #[arg(short, long)]
    tree: Option<PathBuf>,

    /// Log level (overrides the configuration file)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Query(QueryCommand),

    /// Initialize configuration file
    Init {
        /// Configuration file path
        #[arg(short, long, default_value = "family-tree.yml")]
        config_file: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Commands that run against a loaded family tree
#[derive(Subcommand)]
enum QueryCommand {
    /// Classify the configured pairs, by default the reference demonstration
    Demo {
        /// Output format (text, json, markdown)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Classify how two members are related
    Cousin {
        a: String,
        b: String,

        /// Output format (text, json, markdown)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Check whether MOTHER is the parent of CHILD
    IsParent { mother: String, child: String },

    /// Check whether CHILD is a child of MOTHER
    IsChild { child: String, mother: String },

    /// List a member and its ancestors up to the founder
    Ancestors { name: String },

    /// List every member below NAME
    Descendants { name: String },

    /// Render the tree as Graphviz DOT
    Dot {
        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the loaded tree as a tree file
    Export {
        /// Output file path (.json for JSON, YAML otherwise)
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref()).await?;

    let log_level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(log_level)?;

    info!("Starting family-tree");
    debug!("Effective configuration: {:?}", config);

    match cli.command {
        Commands::Init { config_file, force } => init_config(&config_file, force).await?,
        Commands::Query(command) => {
            let tree_path = cli.tree.as_ref().or(config.tree.path.as_ref());
            let family = load_family(tree_path).await?;
            run_command(command, &config, &family).await?;
        }
    }

    Ok(())
}

/// Run a query command against the loaded family
async fn run_command(command: QueryCommand, config: &Config, family: &Family) -> Result<()> {
    match command {
        QueryCommand::Demo { format } => {
            let format = resolve_format(format.as_deref(), config)?;
            classify(family, &config.report.queries, format)?;
        }

        QueryCommand::Cousin { a, b, format } => {
            let format = resolve_format(format.as_deref(), config)?;
            classify(family, &[CousinQuery::new(a, b)], format)?;
        }

        QueryCommand::IsParent { mother, child } => {
            println!("{}", family.is_parent(&mother, &child)?);
        }

        QueryCommand::IsChild { child, mother } => {
            println!("{}", family.is_child(&child, &mother)?);
        }

        QueryCommand::Ancestors { name } => {
            for ancestor in family.ancestors(&name)? {
                println!("{}", ancestor);
            }
        }

        QueryCommand::Descendants { name } => {
            for descendant in family.descendants(&name)? {
                println!("{}", descendant);
            }
        }

        QueryCommand::Dot { output } => {
            write_output(&family.to_dot(), output.as_deref()).await?;
        }

        QueryCommand::Export { output } => {
            FamilyFile::from_family(family)?.save(&output)?;
            info!("Family tree written to: {:?}", output);
        }
    }

    Ok(())
}

/// Initialize tracing with the specified log level
fn init_tracing(log_level: &str) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(log_level))
        .context("Failed to create env filter")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_level(true),
        )
        .with(env_filter)
        .init();

    Ok(())
}

/// Load configuration from file or use defaults, then apply environment overrides
async fn load_config(config_path: Option<&PathBuf>) -> Result<Config> {
    let mut config = match config_path {
        Some(path) if path.exists() => Config::load_from_file(path)
            .await
            .with_context(|| format!("Failed to load configuration file: {:?}", path))?,
        Some(path) => {
            eprintln!("Configuration file not found: {:?}. Using defaults.", path);
            Config::default()
        }
        None => Config::default(),
    };

    config.merge_with(Config::load_from_env());
    config.validate().context("Invalid configuration")?;

    Ok(config)
}

/// Build the family from a tree file, or the sample tree when no file is given
async fn load_family(tree_path: Option<&PathBuf>) -> Result<Family> {
    let description = match tree_path {
        Some(path) => {
            info!("Loading family tree from: {:?}", path);
            let path = path.clone();
            tokio::task::spawn_blocking(move || FamilyFile::load(path))
                .await
                .context("Tree loading task failed")??
        }
        None => {
            debug!("No tree file given, using the sample tree");
            FamilyFile::sample()
        }
    };

    let family = description.build().context("Failed to build family tree")?;
    Ok(family)
}

/// The `--format` flag when given, the configured format otherwise; unknown names are rejected
fn resolve_format(flag: Option<&str>, config: &Config) -> Result<ReportFormat> {
    let format = flag.unwrap_or(&config.report.format);
    format
        .parse::<ReportFormat>()
        .with_context(|| format!("Invalid output format: {}", format))
}

/// Run cousin queries and print the report
fn classify(family: &Family, queries: &[CousinQuery], format: ReportFormat) -> Result<()> {
    let reports = queries
        .iter()
        .map(|query| query.run(family))
        .collect::<Result<Vec<_>, _>>()?;

    let content = ReportGenerator::new().generate_as(&reports, format)?;
    println!("{}", content);

    Ok(())
}

async fn write_output(content: &str, output_file: Option<&Path>) -> Result<()> {
    if let Some(file_path) = output_file {
        tokio::fs::write(file_path, content)
            .await
            .with_context(|| format!("Failed to write output to: {:?}", file_path))?;
        info!("Output written to: {:?}", file_path);
    } else {
        println!("{}", content);
    }

    Ok(())
}

/// Initialize configuration file
async fn init_config(config_file: &Path, force: bool) -> Result<()> {
    info!("Initializing configuration file: {:?}", config_file);

    if config_file.exists() && !force {
        warn!("Configuration file already exists: {:?}", config_file);
        println!("Configuration file already exists: {:?}. Pass --force to overwrite.", config_file);
        return Ok(());
    }

    Config::default()
        .save_to_file(config_file)
        .await
        .with_context(|| format!("Failed to write configuration file: {:?}", config_file))?;

    info!("Configuration file created successfully: {:?}", config_file);
    println!("Configuration file created: {:?}", config_file);

    Ok(())
}

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use log::{LevelFilter, info};

use eksa_core::manifest::RenderConfig;
use eksa_core::provider::{DataSource, Provider};
use eksa_provider::EksaProvider;

mod config;
mod display;

use config::load_config;

#[derive(Parser)]
#[command(name = "eksa")]
#[command(about = "Render EKS Anywhere custom resources as Kubernetes manifests", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available data source types
    List,
    /// Show the attribute schema of a data source
    Schema {
        /// Data source type name
        data_source: String,

        /// Print the schema as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a configuration file against a data source schema
    Validate {
        /// Data source type name
        data_source: String,

        /// Path to YAML or JSON configuration
        file: PathBuf,
    },
    /// Render configuration files as manifests
    Render {
        /// Data source type name
        data_source: String,

        /// Paths to YAML or JSON configurations
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Write manifests to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Comment emitted above each manifest
        #[arg(long)]
        header: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let provider = EksaProvider::new();
    let result = match cli.command {
        Commands::List => run_list(&provider),
        Commands::Schema { data_source, json } => run_schema(&provider, &data_source, json),
        Commands::Validate { data_source, file } => run_validate(&provider, &data_source, &file),
        Commands::Render {
            data_source,
            files,
            output,
            header,
        } => run_render(&provider, &data_source, &files, output.as_deref(), header),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run_list(provider: &impl Provider) -> Result<(), String> {
    for data_source in provider.data_sources() {
        let id = if data_source.has_id() { "id" } else { "-" };
        println!(
            "{}  {}  {}",
            data_source.type_name().bold(),
            data_source.kind().cyan(),
            id
        );
    }
    Ok(())
}

fn find_data_source(provider: &impl Provider, type_name: &str) -> Result<Box<dyn DataSource>, String> {
    provider.data_source(type_name).map_err(|e| e.to_string())
}

fn run_schema(provider: &impl Provider, type_name: &str, json: bool) -> Result<(), String> {
    let schema = find_data_source(provider, type_name)?.schema();
    if json {
        let text = serde_json::to_string_pretty(&schema.to_json())
            .map_err(|e| format!("Failed to encode schema: {}", e))?;
        println!("{}", text);
    } else {
        print!("{}", display::format_schema(&schema));
    }
    Ok(())
}

fn run_validate(provider: &impl Provider, type_name: &str, file: &Path) -> Result<(), String> {
    let data_source = find_data_source(provider, type_name)?;
    let config = load_config(file).map_err(|e| e.to_string())?;

    println!("{}", "Validating...".cyan());

    if let Err(errors) = data_source.schema().validate(&config) {
        for error in &errors {
            eprintln!("  {} {}", "✗".red(), error);
        }
        return Err(format!(
            "{}: {} validation error(s)",
            file.display(),
            errors.len()
        ));
    }

    println!(
        "{}",
        format!("✓ {} is a valid {}.", file.display(), data_source.kind())
            .green()
            .bold()
    );
    Ok(())
}

/// Render every file with the same data source, as a YAML stream
fn render_documents(
    provider: &impl Provider,
    type_name: &str,
    files: &[PathBuf],
    header: Option<String>,
) -> Result<(String, Vec<Option<String>>), String> {
    let render = RenderConfig {
        document_separator: files.len() > 1,
        header,
    };

    let mut out = String::new();
    let mut ids = Vec::new();
    for file in files {
        let config = load_config(file).map_err(|e| e.to_string())?;
        let rendered = provider
            .read(type_name, &config, &render)
            .map_err(|e| match e.read_error() {
                Some(cause) => format!("{}: {}\n{}", file.display(), e, cause),
                None => format!("{}: {}", file.display(), e),
            })?;
        info!("rendered {}", file.display());
        out.push_str(&rendered.yaml);
        ids.push(rendered.id);
    }
    Ok((out, ids))
}

fn run_render(
    provider: &impl Provider,
    type_name: &str,
    files: &[PathBuf],
    output: Option<&Path>,
    header: Option<String>,
) -> Result<(), String> {
    let (yaml, ids) = render_documents(provider, type_name, files, header)?;

    for id in ids.into_iter().flatten() {
        eprintln!("{} {}", "id:".cyan(), id);
    }

    match output {
        Some(path) => {
            fs::write(path, &yaml)
                .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
            eprintln!(
                "{}",
                format!("✓ Wrote {} manifest(s) to {}", files.len(), path.display()).green()
            );
        }
        None => print!("{}", yaml),
    }
    Ok(())
}

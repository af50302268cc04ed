//! model-catalog CLI binary: inspect provider model configs from the command line.
//!
//! Subcommands: `providers`, `models`, `show`, `default`, `pricing`, `dir`.

mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use model_catalog::{ModelCatalog, ProviderId};
use render::ProviderRow;

#[derive(Parser, Debug)]
#[command(name = "model-catalog")]
#[command(about = "model-catalog: per-provider model pricing, context windows and capabilities")]
struct Args {
    #[command(subcommand)]
    cmd: Command,

    /// Directory holding `<provider>.yml` documents (default: MODEL_CATALOG_DIR, XDG config, discovery)
    #[arg(long, value_name = "DIR", global = true)]
    config_dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// When using --json, pretty-print (multi-line). Default: compact, one line
    #[arg(long, global = true)]
    pretty: bool,

    /// Verbose: debug logging for directory resolution and cache activity
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// List known providers, whether each is local, and whether a document exists
    Providers,
    /// List every configured model of a provider
    Models {
        /// Provider name (e.g. anthropic, openai, ollama)
        provider: String,
    },
    /// Show one model with defaults applied
    Show { provider: String, model: String },
    /// Print the provider's default model; fails when it is not configured
    Default { provider: String },
    /// Pricing (per 1M tokens) of every priced model of a provider
    Pricing { provider: String },
    /// Print the resolved models directory and the probe that found it
    Dir,
}

fn build_catalog(args: &Args) -> ModelCatalog {
    match &args.config_dir {
        Some(dir) => ModelCatalog::with_config_dir(dir),
        None => ModelCatalog::new(),
    }
}

fn provider_rows(catalog: &ModelCatalog) -> Vec<ProviderRow> {
    let configured = catalog.configured_providers();
    ProviderId::all()
        .iter()
        .map(|p| ProviderRow {
            provider: p.as_str(),
            local: p.is_local(),
            configured: configured.contains(p),
            path: render::path_string(&catalog.config_path(p)),
        })
        .collect()
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = build_catalog(args);
    match &args.cmd {
        Command::Providers => {
            let rows = provider_rows(&catalog);
            if args.json {
                render::write_json(&rows, args.pretty)?;
            } else {
                print!("{}", render::providers_text(&rows));
            }
        }
        Command::Models { provider } => {
            let models = catalog.all_models(provider);
            if args.json {
                render::write_json(&models, args.pretty)?;
            } else {
                print!("{}", render::models_text(&models));
            }
        }
        Command::Show { provider, model } => {
            let resolved = catalog.model_config_with_defaults(provider, model);
            if args.json {
                render::write_json(&resolved, args.pretty)?;
            } else {
                print!("{}", render::model_text(&resolved));
            }
        }
        Command::Default { provider } => {
            let model = catalog.require_default_model(provider)?;
            if args.json {
                render::write_json(
                    &serde_json::json!({ "provider": provider, "default_model": model }),
                    args.pretty,
                )?;
            } else {
                println!("{}", model);
            }
        }
        Command::Pricing { provider } => {
            let pricing = catalog.all_pricing(provider);
            if args.json {
                render::write_json(&pricing, args.pretty)?;
            } else {
                print!("{}", render::pricing_text_table(&pricing));
            }
        }
        Command::Dir => {
            let resolved = catalog.config_dir_source();
            if args.json {
                render::write_json(&render::dir_json(&resolved), args.pretty)?;
            } else {
                print!("{}", render::dir_text(&resolved));
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let args = Args::parse();
    let _guard = config::init_tracing(args.verbose);
    tracing::debug!(cmd = ?args.cmd, "model-catalog cli");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("model-catalog: {}", e);
            ExitCode::FAILURE
        }
    }
}

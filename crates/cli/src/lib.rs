pub mod check;
mod file;
pub mod symbols;
pub mod tokens;

use buildscope_core::AnalyzerConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

pub use file::{AnalyzedFile, analyze_file};

#[derive(Parser)]
#[command(
    name = "buildscope",
    version,
    about = "Language intelligence for Gradle build scripts",
    long_about = "Buildscope analyzes Groovy build scripts: outlines, dependency declarations, \
                  semantic highlighting and coordinate completion, served over the Language \
                  Server Protocol or inspected from the command line."
)]
pub struct Cli {
    /// Never query Maven Central for coordinate completion
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the Language Server Protocol (LSP) server on stdio
    Lsp,
    /// Print the outline of a build script as JSON
    Symbols {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print the semantic tokens of a build script
    Tokens {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Report syntax errors; exits with status 1 when there are any
    Check {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

pub fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let component = match &cli.command {
        Commands::Lsp => "lsp",
        _ => "cli",
    };
    // The LSP transport owns stdout; only the CLI mirrors logs to stderr.
    let _guard = buildscope_runtime::init_logging(component, !matches!(cli.command, Commands::Lsp));

    let offline = cli.offline;
    match cli.command {
        Commands::Lsp => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(async {
                buildscope_lsp::run_server(move |config: AnalyzerConfig| {
                    let config = if offline {
                        AnalyzerConfig {
                            remote_search: false,
                            ..config
                        }
                    } else {
                        config
                    };
                    buildscope_runtime::build_default_engine(config)
                })
                .await
            })?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Symbols { file } => {
            symbols::run(&file, &mut std::io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Tokens { file } => {
            tokens::run(&file, &mut std::io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { file } => {
            let errors = check::run(&file, &mut std::io::stdout().lock())?;
            Ok(if errors > 0 { ExitCode::from(1) } else { ExitCode::SUCCESS })
        }
    }
}

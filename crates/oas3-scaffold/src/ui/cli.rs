use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "oas3-scaffold")]
#[command(
  author,
  version,
  about = "Scaffold server-side request, response, model and factory types from an OpenAPI contract"
)]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from the OpenAPI contract
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate request, response, model and factory types from the OpenAPI contract
  Generate(GenerateCommand),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateCommand {
  /// Path to the OpenAPI contract (JSON or YAML)
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Directory the application namespace root is written to
  #[arg(short, long, value_name = "DIR")]
  pub output: PathBuf,

  /// Application namespace root every artifact lives under
  #[arg(long, value_name = "NAMESPACE", default_value = "api")]
  pub root: String,

  /// Also generate fixture scaffolds built from the contract's examples
  #[arg(long, default_value_t = false)]
  pub fixtures: bool,

  /// Override the output directory of one artifact kind (e.g., fixture=tests/fixtures).
  /// Kinds: model, input-model, factory, request, query, response, fixture
  #[arg(long, value_name = "KIND=DIR")]
  pub location: Vec<String>,

  /// Generate and report without erasing or writing any file
  #[arg(long, default_value_t = false)]
  pub dry_run: bool,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List all operations defined in the OpenAPI contract
  Operations {
    /// Path to the OpenAPI contract (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}

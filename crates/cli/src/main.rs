mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use xnacontent_lib::{GraphicsProfile, TargetPlatform, TypeMapping};

use crate::cmd::{BuildArgs, cmd_build, cmd_mappings, cmd_resolve, cmd_sweep};
use crate::output::{OutputFormat, print_error};

/// xnac - build XNA content without Visual Studio
#[derive(Parser)]
#[command(name = "xnac")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build content files into .xnb output
  Build {
    /// Content files to build
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Compute content names relative to this directory instead of the nearest .contentproj
    #[arg(long)]
    content_root: Option<PathBuf>,

    /// Build in this directory instead of a scratch directory
    #[arg(long)]
    build_dir: Option<PathBuf>,

    /// Keep file extensions in content names
    #[arg(long)]
    keep_extensions: bool,

    /// Only use mappings given with --mapping
    #[arg(long)]
    no_default_mappings: bool,

    /// Fail when a file has no mapping instead of skipping it
    #[arg(long)]
    fail_on_unmapped: bool,

    /// Extra type mapping, PATTERN=IMPORTER:PROCESSOR (checked before the defaults)
    #[arg(short, long = "mapping", value_name = "MAPPING")]
    mappings: Vec<TypeMapping>,

    /// Importer/processor assembly to reference
    #[arg(short, long = "reference", value_name = "ASSEMBLY")]
    references: Vec<String>,

    /// Target platform
    #[arg(long, default_value = "windows")]
    platform: TargetPlatform,

    /// Graphics profile
    #[arg(long, default_value = "reach")]
    profile: GraphicsProfile,

    /// Build configuration
    #[arg(long, default_value = "Release")]
    configuration: String,

    /// Build engine executable
    #[arg(long, default_value = "msbuild")]
    engine: String,

    /// Argument passed to the engine before the project path (repeatable)
    #[arg(long = "engine-arg", value_name = "ARG", allow_hyphen_values = true)]
    engine_args: Vec<String>,

    /// Delete the working directory once the build finishes
    #[arg(long)]
    dispose: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
  },

  /// Show which importer and processor a file would use
  Resolve {
    /// File names to resolve
    #[arg(required = true)]
    files: Vec<String>,

    /// Extra type mapping, PATTERN=IMPORTER:PROCESSOR
    #[arg(short, long = "mapping", value_name = "MAPPING")]
    mappings: Vec<TypeMapping>,

    /// Only use mappings given with --mapping
    #[arg(long)]
    no_default_mappings: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
  },

  /// List the built-in type mappings
  Mappings {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
  },

  /// Delete scratch directories left behind by exited processes
  Sweep {
    /// Show what would be removed without removing anything
    #[arg(long)]
    dry_run: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("xnacontent_lib=debug,xnacontent_cli=debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match run(cli.command) {
    Ok(code) => code,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}

fn run(command: Commands) -> Result<ExitCode> {
  match command {
    Commands::Build {
      files,
      content_root,
      build_dir,
      keep_extensions,
      no_default_mappings,
      fail_on_unmapped,
      mappings,
      references,
      platform,
      profile,
      configuration,
      engine,
      engine_args,
      dispose,
      output,
    } => cmd_build(BuildArgs {
      files,
      content_root,
      build_dir,
      keep_extensions,
      no_default_mappings,
      fail_on_unmapped,
      mappings,
      references,
      platform,
      profile,
      configuration,
      engine,
      engine_args,
      dispose,
      output,
    }),
    Commands::Resolve {
      files,
      mappings,
      no_default_mappings,
      output,
    } => {
      cmd_resolve(&files, &mappings, !no_default_mappings, output)?;
      Ok(ExitCode::SUCCESS)
    }
    Commands::Mappings { output } => {
      cmd_mappings(output)?;
      Ok(ExitCode::SUCCESS)
    }
    Commands::Sweep { dry_run, output } => {
      cmd_sweep(dry_run, output)?;
      Ok(ExitCode::SUCCESS)
    }
  }
}

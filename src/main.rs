use clap::{CommandFactory, Parser, Subcommand};
use post_import::config::{self, ConflictPolicy, EmptySlugPolicy, ImportConfig};
use post_import::import::{ImportError, ImportSummary, Importer, RunMode};
use post_import::writer::StdinPrompt;
use post_import::{logging, output};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Settings shared by every command; each overrides the config file.
#[derive(clap::Args, Clone)]
struct SettingsArgs {
    /// Config file (default: ./post-import.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output directory for post files [default: content/posts]
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// What to do when a post file already exists [default: prompt]
    #[arg(long, value_enum, global = true)]
    on_conflict: Option<ConflictPolicy>,

    /// What to do when a title slugifies to nothing [default: error]
    #[arg(long, value_enum, global = true)]
    empty_slug: Option<EmptySlugPolicy>,

    /// Log diagnostics to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Parser)]
#[command(name = "post-import")]
#[command(version)]
#[command(about = "Import a CSV of posts into front-matter markdown files")]
#[command(long_about = "\
Import a CSV of posts into front-matter markdown files

The CSV needs a header row naming at least date, title, and content.
A slug column is optional; extra columns are ignored.

  date,title,content,slug
  2024-03-15,Hello World!,\"Some text.\",

becomes content/posts/hello-world.md:

  ---
  date: 2024-03-15
  title: \"Hello World!\"
  ---

  Some text.

Rows with a missing field or a date that is not a real YYYY-MM-DD day are
reported and skipped. The exit status is non-zero if any row was not
written.

Run 'post-import gen-config' to generate a documented post-import.toml.")]
struct Cli {
    /// CSV file to import
    input: Option<PathBuf>,

    /// Validate and show target paths without writing anything
    #[arg(long)]
    dry_run: bool,

    #[command(flatten)]
    settings: SettingsArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a CSV and list the files an import would create
    Check {
        /// CSV file to check
        input: PathBuf,
    },
    /// Print a stock post-import.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.settings.verbose);

    match cli.command {
        Some(Command::GenConfig) => {
            print!("{}", config::stock_config_toml());
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Check { input }) => {
            let config = resolve_config(&cli.settings)?;
            Ok(run_import(&config, &input, RunMode::DryRun))
        }
        None => {
            let Some(input) = cli.input else {
                Cli::command().print_help()?;
                return Ok(ExitCode::FAILURE);
            };
            let config = resolve_config(&cli.settings)?;
            let mode = if cli.dry_run { RunMode::DryRun } else { RunMode::Write };
            Ok(run_import(&config, &input, mode))
        }
    }
}

/// Stock defaults, then the config file, then command-line flags.
fn resolve_config(args: &SettingsArgs) -> Result<ImportConfig, config::ConfigError> {
    let mut config = config::load_config(Path::new("."), args.config.as_deref())?;
    if let Some(dir) = &args.output {
        config.output_dir = dir.clone();
    }
    if let Some(policy) = args.on_conflict {
        config.on_conflict = policy;
    }
    if let Some(policy) = args.empty_slug {
        config.empty_slug = policy;
    }
    config.validate()?;
    Ok(config)
}

fn run_import(config: &ImportConfig, input: &Path, mode: RunMode) -> ExitCode {
    output::print_banner(input, &config.output_dir, mode == RunMode::DryRun);

    let importer = Importer::new(config).mode(mode);
    match importer.import_file(input, &mut StdinPrompt, output::print_row_event) {
        Ok(summary) => {
            output::print_summary(&summary);
            if summary.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(ImportError::Record(e)) => {
            output::print_fatal(&e);
            output::print_summary(&ImportSummary::default());
            ExitCode::FAILURE
        }
    }
}

use clap::Parser;
use resolutions_core::run::{LOCKFILE_NAME, MANIFEST_NAME};
use resolutions_core::{PruneOutcome, ResolutionsConfig, run};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "npm-resolutions", version)]
#[command(about = "Prune package-lock.json entries that conflict with package.json resolutions")]
struct Args {
  /// Project directory holding the manifest and lockfile (defaults to the current directory)
  #[arg(value_name = "DIR")]
  directory: Option<PathBuf>,

  /// Manifest file name inside the project directory
  #[arg(long, value_name = "NAME", default_value = MANIFEST_NAME)]
  manifest: String,

  /// Lockfile name inside the project directory
  #[arg(long, value_name = "NAME", default_value = LOCKFILE_NAME)]
  lockfile: String,

  /// Also prune the legacy `dependencies` tree of lockfileVersion 2 files
  #[arg(long)]
  prune_legacy: bool,

  /// Report what would be removed without writing the lockfile
  #[arg(short = 'n', long)]
  dry_run: bool,

  /// Increase log output (-v info, -vv debug); `RUST_LOG` takes precedence
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

impl Args {
  fn into_config(self) -> std::io::Result<ResolutionsConfig> {
    let directory = match self.directory {
      Some(directory) => directory,
      None => std::env::current_dir()?,
    };
    Ok(
      ResolutionsConfig::new(directory)
        .with_manifest_name(self.manifest)
        .with_lockfile_name(self.lockfile)
        .with_prune_legacy(self.prune_legacy)
        .with_dry_run(self.dry_run),
    )
  }
}

fn init_logging(verbose: u8) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
    0 => EnvFilter::new("warn"),
    1 => EnvFilter::new("resolutions_core=info"),
    _ => EnvFilter::new("resolutions_core=debug,npm_resolutions=debug"),
  });

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time()
    .init();
}

fn print_outcome(outcome: &PruneOutcome, config: &ResolutionsConfig) {
  let dry_run = config.is_dry_run();
  if let Some(report) = outcome.report() {
    let verb = if dry_run { "would remove" } else { "removed" };
    for path in &report.removed_packages {
      println!("{verb} {path}");
    }
    for chain in &report.removed_legacy {
      println!("{verb} legacy {chain}");
    }
  }
  if dry_run && outcome.is_applied() {
    println!("Dry run; lockfile left unchanged");
  } else {
    println!("{}", outcome.message(config.lockfile_name()));
  }
}

fn main() -> ExitCode {
  let args = Args::parse();
  init_logging(args.verbose);

  let config = match args.into_config() {
    Ok(config) => config,
    Err(e) => {
      eprintln!("Error: unable to determine the current directory: {e}");
      return ExitCode::FAILURE;
    }
  };
  debug!("Resolving {}", config.directory().display());

  match run(&config) {
    Ok(outcome) => {
      print_outcome(&outcome, &config);
      ExitCode::SUCCESS
    }
    Err(e) => {
      eprintln!("Error: {e}");
      ExitCode::FAILURE
    }
  }
}

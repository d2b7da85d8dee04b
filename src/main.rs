mod cli;
mod config;
mod lint;
mod report;
mod shell;
mod types;
mod util;

use anyhow::{Context, bail};
use clap::Parser;
use cli::{Cli, Commands, InitArgs, LintArgs};
use config::Config;
use report::ConsoleSink;
use shell::ProcessExecutor;
use tracing::{debug, error, info, trace};
use tracing_subscriber::EnvFilter;
use util::{ChangedFiles, WorkingDirectory};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = match &cli.command {
        Commands::Init(args) => run_init(args),
        Commands::Lint(args) => run_lint(args),
        Commands::Schema => run_schema(),
    };

    let exit_code = result.unwrap_or_else(|e| {
        error!("{:#}", e);
        EXIT_FAILURE
    });
    std::process::exit(exit_code);
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if std::path::Path::new(&args.config).exists() && !args.r#override {
        bail!(
            "{} already exists, use --override to replace it",
            args.config
        );
    }

    std::fs::write(&args.config, Config::scaffold()?)
        .with_context(|| format!("Failed to write {}", args.config))?;
    info!("Config written to {}", args.config);
    Ok(EXIT_SUCCESS)
}

fn run_schema() -> anyhow::Result<i32> {
    let schema = schemars::schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(EXIT_SUCCESS)
}

fn run_lint(args: &LintArgs) -> anyhow::Result<i32> {
    let options = Config::load(&args.config)?.resolve(args);
    debug!("Lint options: {:?}", options);

    let changes = if options.lint_all_files {
        ChangedFiles::default()
    } else if args.has_explicit_changes() {
        ChangedFiles {
            created: args.created.clone(),
            modified: args.modified.clone(),
        }
    } else {
        let base = util::Base::parse(&args.base);
        debug!("Resolved base: {:?}", base);
        util::get_changed_files(std::path::Path::new("."), &base)?
    };
    info!(
        "Found {} created and {} modified files",
        changes.created.len(),
        changes.modified.len()
    );
    trace!("Changed files: {:?}", changes);

    let sink = ConsoleSink::new();
    let violations = lint::orchestrator::lint(
        &options,
        &changes,
        &ProcessExecutor,
        &WorkingDirectory,
        &sink,
    );
    sink.finish(args.output.as_deref(), &violations)?;

    Ok(if sink.failed() {
        EXIT_FAILURE
    } else {
        EXIT_SUCCESS
    })
}

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use gherkin_analyzer::{
    check::{self, StepStatus},
    config::Config,
};

#[derive(Parser, Debug)]
#[command(name = "gherkin-analyzer", version, about)]
struct Args {
    #[arg(long, short)]
    verbose: bool,

    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve every step of a feature tree against its step definitions.
    Check {
        /// Root of the feature tree (default: `features`).
        #[arg(long)]
        features: Option<PathBuf>,

        /// Root the step-definition dialects scan (default: `.`).
        #[arg(long)]
        steps: Option<PathBuf>,

        /// Emit the report as JSON.
        #[arg(long)]
        json: bool,

        /// Explicit configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List all step definitions discovered under a directory.
    Steps {
        /// Root the step-definition dialects scan (default: `.`).
        #[arg(long)]
        steps: Option<PathBuf>,

        /// Emit the listing as JSON.
        #[arg(long)]
        json: bool,

        /// Explicit configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args);

    info!("gherkin-analyzer v{}", env!("CARGO_PKG_VERSION"));

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        },
    }
}

fn run(args: Args) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match args.command {
        Command::Check {
            features,
            steps,
            json,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let features = features
                .or(config.features)
                .unwrap_or_else(|| PathBuf::from("features"));
            let steps = steps.or(config.steps).unwrap_or_else(|| PathBuf::from("."));

            let report = check::run_check(&features, &steps, &config.dialects)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                render_report(&report);
            }
            Ok(if report.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        },
        Command::Steps {
            steps,
            json,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let steps = steps.or(config.steps).unwrap_or_else(|| PathBuf::from("."));

            let definitions = check::list_definitions(&steps, &config.dialects);
            if json {
                println!("{}", serde_json::to_string_pretty(&definitions)?);
            } else {
                for definition in &definitions {
                    println!(
                        "{}:{}: [{}] {}",
                        definition.declaration.file,
                        definition.declaration.line,
                        definition.dialect,
                        definition.pattern
                    );
                }
                println!("{} definition(s)", definitions.len());
            }
            Ok(ExitCode::SUCCESS)
        },
    }
}

fn load_config(explicit: Option<&std::path::Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let config = match explicit {
        Some(path) => Config::load(path)?,
        None => Config::discover(&std::env::current_dir()?)?,
    };
    Ok(config)
}

fn render_report(report: &check::CheckReport) {
    for file in &report.files {
        for step in &file.steps {
            match step.status {
                StepStatus::Resolved => {},
                StepStatus::Ambiguous => {
                    println!("{}:{}: ambiguous ({}): {}", file.file, step.line, step.declarations.len(), step.text);
                },
                StepStatus::Unresolved => {
                    println!("{}:{}: unresolved: {}", file.file, step.line, step.text);
                },
            }
        }
    }
    println!(
        "{} resolved, {} ambiguous, {} unresolved",
        report.resolved, report.ambiguous, report.unresolved
    );
}

fn init_tracing(args: &Args) {
    let stderr_filter = if args.verbose {
        EnvFilter::new("gherkin_analyzer=debug")
    } else {
        EnvFilter::new("gherkin_analyzer=warn")
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_filter(stderr_filter);

    let file_layer = args.log_file.as_ref().map(|log_path| {
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("gherkin-analyzer.log")),
        );
        fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_target(false)
            .with_filter(EnvFilter::new("gherkin_analyzer=debug"))
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .init();
}

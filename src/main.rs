//! Menoguard: offline clinical risk and hormone-therapy recommendation
//!
//! Command-line entry point. Profiles and results are JSON; logs go to
//! stderr or a log file so stdout stays machine-readable.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use menoguard::adapters::{BuiltinRuleSource, JsonRuleSource};
use menoguard::application::highest_severity;
use menoguard::{AssessmentConfig, AssessmentService, InteractionChecker, PatientRiskProfile};

#[derive(Parser)]
#[command(name = "menoguard", version, about = "Clinical risk scoring and hormone-therapy recommendation")]
struct Cli {
    /// Append logs to this file instead of stderr
    #[arg(long, global = true, env = "MENOGUARD_LOG_FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a comprehensive assessment on a patient profile
    Assess {
        /// Profile JSON file; reads stdin when omitted or "-"
        profile: Option<PathBuf>,

        /// Assessment config JSON (fallback policy)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pretty-print the result
        #[arg(long)]
        pretty: bool,
    },

    /// Look up drug interactions for a primary agent
    Interaction {
        /// Primary agent, e.g. estradiol_oral
        primary: String,

        /// One or more concurrent agents or drug classes
        #[arg(required = true)]
        concurrent: Vec<String>,

        /// Interaction table JSON; the built-in table is used when omitted
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

fn init_logging(log_file: Option<&Path>) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let (writer, guard) = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                // Best-effort: open() below reports the real failure.
                let _ = std::fs::create_dir_all(parent);
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_appender::non_blocking(file)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();

    Ok(guard)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("reading profile {}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading profile from stdin")?;
            Ok(buf)
        }
    }
}

fn assess(profile: Option<&Path>, config: Option<&Path>, pretty: bool) -> Result<()> {
    let config = match config {
        Some(path) => AssessmentConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AssessmentConfig::default(),
    };
    let profile: PatientRiskProfile =
        serde_json::from_str(&read_input(profile)?).context("parsing patient profile")?;

    let result = AssessmentService::new(config).assess(&profile)?;

    let json = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{json}");
    Ok(())
}

fn interaction(primary: &str, concurrent: &[String], rules: Option<&Path>) -> Result<()> {
    let checker = match rules {
        Some(path) => InteractionChecker::from_source(&JsonRuleSource::from_path(path)),
        None => InteractionChecker::from_source(&BuiltinRuleSource),
    };

    let findings = checker.check_regimen(primary, concurrent);
    for f in &findings {
        println!(
            "{} + {}: {} ({})\n  {}\n  Action: {}",
            f.primary,
            f.concurrent,
            f.severity,
            f.severity.display_color(),
            f.rationale,
            f.action
        );
    }
    if let Some(worst) = highest_severity(&findings) {
        println!("Highest severity: {worst}");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_file.as_deref())?;

    match cli.command {
        Command::Assess {
            profile,
            config,
            pretty,
        } => assess(profile.as_deref(), config.as_deref(), pretty),
        Command::Interaction {
            primary,
            concurrent,
            rules,
        } => interaction(&primary, &concurrent, rules.as_deref()),
    }
}

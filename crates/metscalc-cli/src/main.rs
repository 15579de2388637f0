use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use metscalc_core::models::inputs::RawInputs;
use metscalc_core::models::params::RiskParams;
use metscalc_core::models::result::ResultRecord;
use metscalc_engine::Calculator;
use metscalc_engine::collaborators::Collaborators;
use metscalc_engine::config::{self, CalculatorConfig};
use metscalc_engine::submit::assemble_params;
use metscalc_growth::lms::{LmsReference, LmsZScore};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "metscalc",
    version,
    about = "Derive BMI, BMI z-score and risk-score parameters from a case file",
    long_about = "metscalc evaluates a JSON case file of raw clinical inputs.\n\n\
        EXAMPLES:\n\
        \n  metscalc derive case.json                   Print age, BMI and BMI z-score\n\
        \n  metscalc derive --lms cdc.json case.json    Use a growth reference for z-scores\n\
        \n  metscalc params case.json                   Print the risk-score parameters\
        \n  metscalc config init                        Write the default config file"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Calculator config file (defaults to <config dir>/metscalc/config.json)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the derived fields for a case
    Derive(CaseArgs),
    /// Validate a case and print the parameters sent to the risk-score model
    Params(CaseArgs),
    /// Inspect or create the calculator config file
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Print the effective config
    Show,
    /// Write the default config to the config path
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Args)]
struct CaseArgs {
    /// JSON file with the raw inputs
    case: PathBuf,

    /// LMS growth reference (JSON array of rows) for BMI z-scores
    #[arg(long, value_name = "PATH")]
    lms: Option<PathBuf>,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    match cli.command {
        Command::Derive(args) => {
            let config = resolve_config(cli.config.as_deref())?;
            let calculator = load_case(&args, config)?;
            println!("{}", serde_json::to_string_pretty(calculator.derived())?);
        }
        Command::Params(args) => {
            let config = resolve_config(cli.config.as_deref())?;
            let calculator = load_case(&args, config)?;
            let params =
                assemble_params(calculator.raw(), calculator.derived(), calculator.config())?;
            println!("{}", serde_json::to_string_pretty(&params)?);
        }
        Command::Config(ConfigCommand::Show) => {
            let config = resolve_config(cli.config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Command::Config(ConfigCommand::Init { force }) => {
            let path = cli
                .config
                .or_else(default_config_path)
                .ok_or_else(|| eyre::eyre!("no config directory; pass --config <PATH>"))?;
            config::init_config(&path, force)?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn init_tracing(verbose: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("metscalc").join("config.json"))
}

/// An explicit path must load; the default path is optional.
fn resolve_config(explicit: Option<&Path>) -> eyre::Result<CalculatorConfig> {
    if let Some(path) = explicit {
        return Ok(config::load_config(path)?);
    }
    match default_config_path() {
        Some(path) if path.exists() => Ok(config::load_config(&path)?),
        _ => {
            tracing::debug!("no config file found, using defaults");
            Ok(CalculatorConfig::default())
        }
    }
}

fn load_case(args: &CaseArgs, config: CalculatorConfig) -> eyre::Result<Calculator> {
    let contents = std::fs::read_to_string(&args.case)
        .map_err(|e| eyre::eyre!("failed to read case at {}: {e}", args.case.display()))?;
    let raw: RawInputs = serde_json::from_str(&contents)?;

    // Scoring happens downstream of this tool; only the parameters are printed.
    let mut collaborators = Collaborators::new(|_: &RiskParams| ResultRecord::default());
    if let Some(path) = &args.lms {
        let reference = LmsReference::from_path(path)?;
        collaborators = collaborators.with_bmi_z_score(LmsZScore::new(reference));
    }

    tracing::info!(case = %args.case.display(), "case loaded");
    Ok(Calculator::with_inputs(raw, collaborators, config))
}

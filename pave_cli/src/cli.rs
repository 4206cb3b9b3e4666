use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use pave_core::file_io;
use pave_core::params::ParameterSet;
use pave_core::pavement::{PavementType, PerType};
use pave_core::scoring::Calibration;
use pave_core::settings::AdvisorSettings;
use pave_core::{compatibility, design, ensemble, scoring};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};
use crate::report;

#[derive(Parser, Debug)]
#[command(
    name = "pave",
    about = "Recommend a rigid pavement type and derive its design specifications",
    version
)]
pub struct Cli {
    /// Settings file (defaults to PAVE_SETTINGS, then ./pave-settings.json)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score all four types with the weighted engine
    Score(ScoreArgs),
    /// Design specifications for one type
    Design(DesignArgs),
    /// Recommend with the requirement-matching model
    Predict(InputArgs),
    /// Run both strategies and report agreement
    Compare(InputArgs),
    /// Monte Carlo recommendation frequencies
    Estimate(EstimateArgs),
    /// Self-test the compatibility model
    Validate(OutputArgs),
    /// Store calibration weights in the settings file
    Calibrate(CalibrateArgs),
}

#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// Parameter as key=value, e.g. trafficVolume=3 (repeatable)
    #[arg(short, long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// JSON file with a parameter object; --param values override it
    #[arg(long)]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Add probability shares, key factors and a close alternative
    #[arg(long)]
    pub explain: bool,

    /// Apply the calibration stored in the settings file
    #[arg(long)]
    pub calibrated: bool,
}

#[derive(Args, Debug)]
pub struct DesignArgs {
    /// Pavement type: JPCP, JRCP, CRCP or PCP
    #[arg(long = "type", value_parser = parse_pavement_type)]
    pub pavement_type: PavementType,

    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Number of random trials (defaults to PAVE_SAMPLES, then the settings file)
    #[arg(long)]
    pub samples: Option<usize>,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Spread trials over all cores
    #[arg(long)]
    pub parallel: bool,

    /// Apply the calibration stored in the settings file
    #[arg(long)]
    pub calibrated: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct CalibrateArgs {
    #[arg(long, default_value_t = 1.0)]
    pub jpcp: f64,
    #[arg(long, default_value_t = 1.0)]
    pub jrcp: f64,
    #[arg(long, default_value_t = 1.0)]
    pub crcp: f64,
    #[arg(long, default_value_t = 1.0)]
    pub pcp: f64,

    /// Remove stored calibration instead of setting it
    #[arg(long, conflicts_with_all = ["jpcp", "jrcp", "crcp", "pcp"])]
    pub reset: bool,
}

fn parse_pavement_type(value: &str) -> Result<PavementType, String> {
    PavementType::from_code(&value.to_ascii_uppercase())
        .ok_or_else(|| format!("unknown pavement type '{}', expected JPCP, JRCP, CRCP or PCP", value))
}

impl InputArgs {
    /// Build the parameter set from the input file, then the pairs
    pub fn parameter_set(&self) -> CliResult<ParameterSet> {
        let mut params = match &self.input {
            Some(path) => {
                let json = fs::read_to_string(path).map_err(|source| CliError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                ParameterSet::from_json(&json)?
            }
            None => ParameterSet::new(),
        };
        for pair in &self.params {
            let (field, code) = pair
                .split_once('=')
                .ok_or_else(|| CliError::MalformedParam(pair.clone()))?;
            params.set(field.trim(), code.trim())?;
        }
        Ok(params)
    }
}

fn render<T: Serialize>(output: &OutputArgs, value: &T, text: impl FnOnce() -> String) -> CliResult<String> {
    if output.json {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(text())
    }
}

fn stored_calibration(path: &Path) -> CliResult<Option<Calibration>> {
    let calibration = file_io::load_or_default(path)?.calibration()?;
    if calibration.is_none() {
        info!(path = %path.display(), "no calibration stored, scoring uncalibrated");
    }
    Ok(calibration)
}

/// Execute a parsed command and return what to print
pub fn run(cli: Cli, config: &AppConfig) -> CliResult<String> {
    let settings_path = cli.settings.unwrap_or_else(|| config.settings_path.clone());

    match cli.command {
        Command::Score(args) => score(args, &settings_path),
        Command::Design(args) => design_spec(args),
        Command::Predict(args) => predict(args),
        Command::Compare(args) => compare(args),
        Command::Estimate(args) => estimate(args, &settings_path, config.default_samples),
        Command::Validate(args) => {
            let validation = compatibility::validate_model();
            render(&args, &validation, || report::validation(&validation))
        }
        Command::Calibrate(args) => calibrate(args, &settings_path),
    }
}

fn score(args: ScoreArgs, settings_path: &Path) -> CliResult<String> {
    let params = args.input.parameter_set()?;
    let calibration = if args.calibrated {
        stored_calibration(settings_path)?
    } else {
        None
    };
    let result = scoring::score_with_calibration(&params, calibration.as_ref())?;
    let explanation = args.explain.then(|| scoring::explain(&result, &params));

    let value = match &explanation {
        Some(explanation) => json!({ "result": result, "explanation": explanation }),
        None => serde_json::to_value(&result)?,
    };
    render(&args.input.output, &value, || report::recommendation(&result, explanation.as_ref()))
}

fn design_spec(args: DesignArgs) -> CliResult<String> {
    let params = args.input.parameter_set()?;
    let spec = design::derive_specs(args.pavement_type, &params);
    let guidelines = design::construction_guidelines(args.pavement_type, &params);
    let value = json!({ "designSpec": spec, "guidelines": guidelines });
    render(&args.input.output, &value, || report::design(&spec, &guidelines))
}

fn predict(args: InputArgs) -> CliResult<String> {
    let params = args.parameter_set()?;
    let prediction = compatibility::predict(&params);
    let performance = compatibility::assess(&prediction, &params);
    let value = json!({ "prediction": prediction, "performance": performance });
    render(&args.output, &value, || report::prediction(&prediction, &performance))
}

fn compare(args: InputArgs) -> CliResult<String> {
    let params = args.parameter_set()?;
    let comparison = ensemble::compare_strategies(&params)?;
    render(&args.output, &comparison, || report::comparison(&comparison))
}

fn estimate(args: EstimateArgs, settings_path: &Path, env_samples: Option<usize>) -> CliResult<String> {
    let settings = file_io::load_or_default(settings_path)?;
    let defaults = &settings.monte_carlo;

    let mut estimator = pave_core::Estimator::new(args.samples.or(env_samples).unwrap_or(defaults.sample_size))
        .parallel(args.parallel || defaults.parallel);
    if let Some(seed) = args.seed.or(defaults.seed) {
        estimator = estimator.seed(seed);
    }
    if args.calibrated {
        if let Some(calibration) = settings.calibration()? {
            estimator = estimator.calibration(calibration);
        }
    }

    info!(samples = estimator.sample_size(), "running Monte Carlo estimate");
    let probabilities = estimator.run()?;
    render(&args.output, &probabilities, || report::estimate(&probabilities))
}

fn calibrate(args: CalibrateArgs, settings_path: &Path) -> CliResult<String> {
    let mut settings: AdvisorSettings = file_io::load_or_default(settings_path)?;
    let message = if args.reset {
        settings.clear_calibration();
        format!("Calibration cleared in {}", settings_path.display())
    } else {
        let calibration = Calibration::new(PerType::from_array([args.jpcp, args.jrcp, args.crcp, args.pcp]))?;
        settings.set_calibration(calibration);
        format!(
            "Calibration saved to {}: JPCP {:.2}, JRCP {:.2}, CRCP {:.2}, PCP {:.2}",
            settings_path.display(),
            args.jpcp,
            args.jrcp,
            args.crcp,
            args.pcp
        )
    };
    file_io::save_settings(&settings, settings_path)?;
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn config() -> AppConfig {
        AppConfig {
            telemetry: crate::config::TelemetryConfig {
                log_level: "warn".to_string(),
            },
            settings_path: temp_dir().join("pave_cli_unused_settings.json"),
            default_samples: None,
        }
    }

    fn run_args(args: &[&str]) -> CliResult<String> {
        let cli = Cli::try_parse_from(std::iter::once("pave").chain(args.iter().copied()))
            .expect("arguments parse");
        run(cli, &config())
    }

    fn temp_settings(name: &str) -> PathBuf {
        temp_dir().join(format!("pave_cli_test_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_score_text() {
        let output = run_args(&[
            "score",
            "-p",
            "trafficVolume=2",
            "-p",
            "designLife=20",
            "-p",
            "subgradeCBR=3",
            "-p",
            "slabThickness=200",
            "--explain",
        ])
        .unwrap();
        assert!(output.contains("Recommended: JPCP (Jointed Plain Concrete Pavement)"));
        assert!(output.contains("is recommended with a confidence level of Very High"));
    }

    #[test]
    fn test_score_json() {
        let output = run_args(&["score", "-p", "trafficVolume=1", "-p", "designLife=10", "--json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["recommendedType"], "PCP");
    }

    #[test]
    fn test_input_file_with_override() {
        let path = temp_settings("input");
        fs::write(&path, r#"{ "trafficVolume": "1", "designLife": "10" }"#).unwrap();
        let cli = Cli::try_parse_from([
            "pave",
            "score",
            "--input",
            path.to_str().unwrap(),
            "-p",
            "trafficVolume=4",
            "--json",
        ])
        .unwrap();
        let Command::Score(args) = &cli.command else {
            panic!("expected score command");
        };
        let params = args.input.parameter_set().unwrap();
        assert_eq!(params.traffic_volume.map(|t| t.code()), Some("4"));
        assert_eq!(params.design_life.map(|l| l.years()), Some(10));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_bad_params() {
        let malformed = run_args(&["score", "-p", "trafficVolume"]).unwrap_err();
        assert_eq!(malformed.code(), "MALFORMED_PARAM");

        let invalid = run_args(&["score", "-p", "trafficVolume=9"]).unwrap_err();
        assert_eq!(invalid.code(), "INVALID_PARAMETER_VALUE");
        assert_eq!(invalid.exit_code(), 2);

        let empty = run_args(&["score"]).unwrap_err();
        assert_eq!(empty.code(), "INSUFFICIENT_INPUT");
    }

    #[test]
    fn test_design_type_is_case_insensitive() {
        let output = run_args(&["design", "--type", "jpcp", "-p", "slabThickness=200"]).unwrap();
        assert!(output.contains("Joint spacing:  4.5 m"));
        assert!(Cli::try_parse_from(["pave", "design", "--type", "XYZ"]).is_err());
    }

    #[test]
    fn test_estimate_and_zero_samples() {
        let path = temp_settings("estimate");
        let settings = path.to_str().unwrap();
        let output = run_args(&["--settings", settings, "estimate", "--samples", "300", "--seed", "8", "--json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["sampleSize"], 300);
        assert_eq!(value["seed"], 8);

        let err = run_args(&["--settings", settings, "estimate", "--samples", "0"]).unwrap_err();
        assert_eq!(err.code(), "ZERO_SAMPLE_SIZE");
    }

    #[test]
    fn test_calibrate_then_score_calibrated() {
        let path = temp_settings("calibrate");
        let settings = path.to_str().unwrap();

        let saved = run_args(&["--settings", settings, "calibrate", "--jpcp", "0.5", "--pcp", "1.5"]).unwrap();
        assert!(saved.starts_with("Calibration saved to"));

        // JRCP wins uncalibrated (47 vs 42 JPCP, 37 PCP); PCP wins once boosted
        let output = run_args(&[
            "--settings",
            settings,
            "score",
            "-p",
            "trafficVolume=3",
            "--calibrated",
            "--json",
        ])
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["calibrated"], true);
        assert_eq!(value["recommendedType"], "PCP");

        let rejected = run_args(&["--settings", settings, "calibrate", "--crcp", "2.0"]).unwrap_err();
        assert_eq!(rejected.code(), "CALIBRATION_OUT_OF_RANGE");

        run_args(&["--settings", settings, "calibrate", "--reset"]).unwrap();
        let cleared = file_io::load_settings(&path).unwrap();
        assert!(cleared.calibration().unwrap().is_none());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_validate_json() {
        let output = run_args(&["validate", "--json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["total"], 6);
        assert_eq!(value["correct"], 4);
    }
}

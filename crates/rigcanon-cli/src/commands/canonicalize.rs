//! Canonicalize command implementation
//!
//! Reads a rig file, runs the canonicalization pipeline and writes the
//! canonical skeleton next to the input (or to `--out`).

use anyhow::{Context, Result};
use colored::Colorize;
use rigcanon_engine::{canonicalize_with_config, Canonicalized};
use rigcanon_rig::{to_rig_text, RigError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use thiserror::Error;

use super::json_output::{
    error_codes, rig_error_to_json, rig_warning_to_json, CanonicalizeOutput, CanonicalizeResult,
    JsonError,
};
use crate::input::{load_config, load_rig, InputError, RigSource};

/// Format of the written skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Canonical JSON keyed by joint name.
    #[default]
    Json,
    /// Rig text with `joints`, `root`, `hier` and `skin` records.
    Rig,
}

impl OutputFormat {
    /// Returns the format name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Rig => "rig",
        }
    }

    /// Suffix appended to the input stem for the default output path.
    fn suffix(&self) -> &'static str {
        match self {
            OutputFormat::Json => "canonical.json",
            OutputFormat::Rig => "canonical.txt",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "rig" => Ok(OutputFormat::Rig),
            _ => Err(format!("unknown format '{}', expected 'json' or 'rig'", s)),
        }
    }
}

/// Arguments for the canonicalize command.
#[derive(Debug, Clone, Default)]
pub struct CanonicalizeArgs {
    /// Path to the input rig file.
    pub rig: String,
    /// Output path; defaults to `<stem>.canonical.<ext>` next to the input.
    pub out: Option<String>,
    pub format: OutputFormat,
    /// Optional JSON config file.
    pub config: Option<String>,
    /// Forces `merge_chest_root` on.
    pub merge_chest: bool,
    /// Forces `align_to_ground` on.
    pub align_ground: bool,
}

/// Why a canonicalize run stopped.
#[derive(Debug, Error)]
pub enum CanonicalizeFailure {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Rig(#[from] RigError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize canonical skeleton: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CanonicalizeFailure {
    /// Converts the failure into a JSON error.
    pub fn to_json(&self, rig_path: &str) -> JsonError {
        match self {
            CanonicalizeFailure::Input(e) => {
                JsonError::new(e.code(), e.to_string()).with_file(e.path().display().to_string())
            }
            CanonicalizeFailure::Rig(e) => rig_error_to_json(e, rig_path),
            CanonicalizeFailure::Write { path, .. } => {
                JsonError::new(error_codes::FILE_WRITE, self.to_string())
                    .with_file(path.display().to_string())
            }
            CanonicalizeFailure::Serialize(_) => {
                JsonError::new(error_codes::JSON_SERIALIZE, self.to_string())
            }
        }
    }
}

/// A finished run.
#[derive(Debug)]
pub struct Written {
    pub source: RigSource,
    pub result: Canonicalized,
    pub output_path: PathBuf,
}

/// Default output path for `rig_path` in `format`.
///
/// # Example
/// ```
/// use rigcanon_cli::commands::canonicalize::{default_output_path, OutputFormat};
/// use std::path::PathBuf;
///
/// let path = default_output_path("rigs/robot.txt", OutputFormat::Json);
/// assert_eq!(path, PathBuf::from("rigs/robot.canonical.json"));
/// ```
pub fn default_output_path(rig_path: &str, format: OutputFormat) -> PathBuf {
    let path = Path::new(rig_path);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("rig");
    let file_name = format!("{}.{}", stem, format.suffix());
    match path.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Loads, canonicalizes and writes without printing anything.
pub fn canonicalize_file(args: &CanonicalizeArgs) -> Result<Written, CanonicalizeFailure> {
    let source = load_rig(Path::new(&args.rig))?;

    let mut config = load_config(args.config.as_deref().map(Path::new))?;
    if args.merge_chest {
        config = config.merge_chest_root(true);
    }
    if args.align_ground {
        config = config.align_to_ground(true);
    }

    let result = canonicalize_with_config(&source.text, &config)?;

    let contents = match args.format {
        OutputFormat::Json => {
            let mut json = result.canonical.to_json_pretty()?;
            json.push('\n');
            json
        }
        OutputFormat::Rig => to_rig_text(&result.skeleton),
    };

    let output_path = match args.out {
        Some(ref out) => PathBuf::from(out),
        None => default_output_path(&args.rig, args.format),
    };
    std::fs::write(&output_path, contents).map_err(|source| CanonicalizeFailure::Write {
        path: output_path.clone(),
        source,
    })?;
    tracing::debug!(path = %output_path.display(), "wrote canonical skeleton");

    Ok(Written {
        source,
        result,
        output_path,
    })
}

/// Run the canonicalize command
///
/// # Returns
/// Exit code: 0 on success, 1 if the rig could not be canonicalized
pub fn run(args: &CanonicalizeArgs, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(args)
    } else {
        run_human(args)
    }
}

/// Run canonicalize with human-readable (colored) output
fn run_human(args: &CanonicalizeArgs) -> Result<ExitCode> {
    let start = Instant::now();

    println!("{} {}", "Canonicalizing:".cyan().bold(), args.rig);

    let written = match canonicalize_file(args) {
        Ok(written) => written,
        Err(CanonicalizeFailure::Rig(e)) => {
            println!("\n{}", "Errors:".red().bold());
            println!("  {} [{}]: {}", "x".red(), e.code().red(), e);
            println!(
                "\n{} Rig could not be canonicalized ({}ms)",
                "FAILED".red().bold(),
                start.elapsed().as_millis()
            );
            return Ok(ExitCode::from(1));
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to canonicalize rig: {}", args.rig))
        }
    };

    let report = &written.result.report;
    println!(
        "{} {} ({} records)",
        "Source:".dimmed(),
        &written.source.source_hash[..16],
        written.source.record_count()
    );
    println!("{} {}", "Root:".dimmed(), report.root);
    println!("{} {}", "Chest root:".dimmed(), report.chest_root);
    println!(
        "{} {} joints, {} links",
        "Skeleton:".dimmed(),
        report.joint_count,
        report.link_count
    );
    println!("{} {:.4}", "Ground offset:".dimmed(), report.ground_offset);
    println!("{} {}", "Hash:".dimmed(), &report.skeleton_hash[..16]);

    if report.has_warnings() {
        println!("\n{}", "Warnings:".yellow().bold());
        for warning in &report.warnings {
            let joint_info = warning
                .joint
                .as_ref()
                .map(|j| format!(" at {}", j))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "!".yellow(),
                warning.code.to_string().yellow(),
                joint_info.dimmed(),
                warning.message
            );
        }
    }

    println!(
        "\n{} Wrote {} ({}ms)",
        "SUCCESS".green().bold(),
        written.output_path.display(),
        start.elapsed().as_millis()
    );
    Ok(ExitCode::SUCCESS)
}

/// Run canonicalize with machine-readable JSON output
fn run_json(args: &CanonicalizeArgs) -> Result<ExitCode> {
    let output = match canonicalize_file(args) {
        Ok(written) => {
            let warnings = written
                .result
                .report
                .warnings
                .iter()
                .map(rig_warning_to_json)
                .collect();
            let result = CanonicalizeResult {
                output_path: written.output_path.display().to_string(),
                format: args.format.as_str().to_string(),
                report: written.result.report,
            };
            CanonicalizeOutput::success(result, written.source.source_hash, warnings)
        }
        Err(e) => CanonicalizeOutput::failure(vec![e.to_json(&args.rig)], None),
    };

    let json = serde_json::to_string_pretty(&output)?;
    println!("{}", json);

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

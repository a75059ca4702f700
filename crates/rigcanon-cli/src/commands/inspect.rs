//! Inspect command implementation
//!
//! Parses a rig and reports how the engine would read it, without writing
//! anything.

use anyhow::{Context, Result};
use colored::Colorize;
use rigcanon_engine::{summarize, RigSummary};
use rigcanon_rig::{parse_rig_with, ParseOptions};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{rig_error_to_json, InspectOutput, JsonError};
use crate::input::load_rig;

/// Run the inspect command
///
/// # Returns
/// Exit code: 0 if the rig looks canonicalizable, 1 otherwise
pub fn run(rig_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(rig_path)
    } else {
        run_human(rig_path)
    }
}

/// Run inspect with human-readable (colored) output
fn run_human(rig_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Inspecting:".cyan().bold(), rig_path);

    let source = load_rig(Path::new(rig_path))
        .with_context(|| format!("Failed to load rig file: {}", rig_path))?;

    let parsed = match parse_rig_with(&source.text, &ParseOptions::default()) {
        Ok(parsed) => parsed,
        Err(e) => {
            println!("  {} [{}]: {}", "x".red(), e.code().red(), e);
            println!("\n{} Rig could not be parsed", "FAILED".red().bold());
            return Ok(ExitCode::from(1));
        }
    };

    let summary = summarize(&parsed.skeleton);
    print_summary(&summary);
    if parsed.dropped_edges > 0 {
        println!(
            "{} {} duplicate or self-referencing hier record(s)",
            "Dropped:".dimmed(),
            parsed.dropped_edges
        );
    }

    if summary.is_clean() {
        println!("\n{} Rig looks canonicalizable", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} Rig has {} problem(s)",
            "FAILED".red().bold(),
            summary.problems.len()
        );
        Ok(ExitCode::from(1))
    }
}

/// Run inspect with machine-readable JSON output
fn run_json(rig_path: &str) -> Result<ExitCode> {
    let output = match load_rig(Path::new(rig_path)) {
        Ok(source) => match parse_rig_with(&source.text, &ParseOptions::default()) {
            Ok(parsed) => InspectOutput::summary(summarize(&parsed.skeleton), source.source_hash),
            Err(e) => InspectOutput::failure(
                vec![rig_error_to_json(&e, rig_path)],
                Some(source.source_hash),
            ),
        },
        Err(e) => InspectOutput::failure(
            vec![JsonError::new(e.code(), e.to_string()).with_file(rig_path)],
            None,
        ),
    };

    let json = serde_json::to_string_pretty(&output)?;
    println!("{}", json);

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn print_summary(summary: &RigSummary) {
    println!("{} {}", "Root:".dimmed(), summary.root);
    println!(
        "{} {} joints, {} links",
        "Skeleton:".dimmed(),
        summary.joint_count,
        summary.link_count
    );
    if let Some(depth) = summary.depth {
        println!("{} {}", "Depth:".dimmed(), depth);
    }
    println!("{} {}", "Leaves:".dimmed(), summary.leaves.join(", "));

    if !summary.roles.is_empty() {
        println!("\n{}", "Roles:".bold());
        for (role, joint) in &summary.roles {
            println!("  {:<16} {}", role, joint);
        }
    }

    if !summary.trifurcations.is_empty() {
        println!("\n{}", "Tri-furcations:".bold());
        for t in &summary.trifurcations {
            println!(
                "  {:<16} distance {:.4}, height {:.4}",
                t.name, t.distance, t.height
            );
        }
    }
    if let (Some(pelvis), Some(chest_root)) = (&summary.pelvis, &summary.chest_root) {
        println!("{} {}", "Pelvis:".dimmed(), pelvis);
        println!("{} {}", "Chest root:".dimmed(), chest_root);
    }

    if !summary.problems.is_empty() {
        println!("\n{}", "Problems:".red().bold());
        for problem in &summary.problems {
            println!("  {} {}", "x".red(), problem);
        }
    }
}

//! JSON output types for machine-readable CLI output.
//!
//! These types back the `--json` flag on `canonicalize` and `inspect`, so
//! pipelines and other tools can consume results without scraping text.

use rigcanon_engine::{CanonicalizationReport, RigSummary};
use rigcanon_rig::{RigError, RigWarning};
use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
/// Format: CLI_XXX for CLI-level errors; rig errors pass through their
/// RIG_XXX codes.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Config file is not valid JSON or has unknown fields
    pub const INVALID_CONFIG: &str = "CLI_002";
    /// Output file could not be written
    pub const FILE_WRITE: &str = "CLI_003";
    /// JSON serialization error
    pub const JSON_SERIALIZE: &str = "CLI_004";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "RIG_003")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Error category (e.g., "parse", "topology")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Line number (if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            category: None,
            file: None,
            line: None,
        }
    }

    /// Sets the error category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Sets the line number for this error.
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "W002")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// Joint or canonical slot the warning is about
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joint: Option<String>,
}

impl JsonWarning {
    /// Creates a new warning with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            joint: None,
        }
    }

    /// Sets the joint this warning refers to.
    pub fn with_joint(mut self, joint: impl Into<String>) -> Self {
        self.joint = Some(joint.into());
        self
    }
}

/// Converts a rig error into a JSON error, keeping its code and line.
pub fn rig_error_to_json(error: &RigError, file: &str) -> JsonError {
    let mut json = JsonError::new(error.code(), error.to_string())
        .with_category(error.category())
        .with_file(file);
    if let RigError::MalformedRig { line: Some(line), .. } = error {
        json = json.with_line(*line);
    }
    json
}

/// Converts an engine warning into a JSON warning.
pub fn rig_warning_to_json(warning: &RigWarning) -> JsonWarning {
    let json = JsonWarning::new(warning.code.code(), warning.message.clone());
    match warning.joint {
        Some(ref joint) => json.with_joint(joint.clone()),
        None => json,
    }
}

/// JSON output for the `canonicalize` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalizeOutput {
    /// Whether canonicalization succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Non-fatal warnings raised by the engine
    pub warnings: Vec<JsonWarning>,
    /// Result details (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<CanonicalizeResult>,
    /// BLAKE3 hash of the input rig file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
}

/// Result details for a successful canonicalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalizeResult {
    /// Path the canonical skeleton was written to
    pub output_path: String,
    /// Output format ("json" or "rig")
    pub format: String,
    /// Engine report
    pub report: CanonicalizationReport,
}

impl CanonicalizeOutput {
    /// Creates a successful output.
    pub fn success(result: CanonicalizeResult, source_hash: String, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
            source_hash: Some(source_hash),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>, source_hash: Option<String>) -> Self {
        Self {
            success: false,
            errors,
            warnings: Vec::new(),
            result: None,
            source_hash,
        }
    }
}

/// JSON output for the `inspect` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectOutput {
    /// Whether the rig parsed and showed no problems
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Rig summary (when the rig parsed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<RigSummary>,
    /// BLAKE3 hash of the input rig file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
}

impl InspectOutput {
    /// Creates an output from a summary.
    pub fn summary(summary: RigSummary, source_hash: String) -> Self {
        Self {
            success: summary.is_clean(),
            errors: Vec::new(),
            result: Some(summary),
            source_hash: Some(source_hash),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>, source_hash: Option<String>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
            source_hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rigcanon_rig::WarningCode;

    #[test]
    fn test_json_error_skips_empty_fields() {
        let error = JsonError::new(error_codes::FILE_READ, "missing");
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, r#"{"code":"CLI_001","message":"missing"}"#);
    }

    #[test]
    fn test_rig_error_keeps_line() {
        let error = RigError::malformed_at(7, "expected 4 fields");
        let json = rig_error_to_json(&error, "rig.txt");
        assert_eq!(json.code, "RIG_001");
        assert_eq!(json.line, Some(7));
        assert_eq!(json.file.as_deref(), Some("rig.txt"));
        assert_eq!(json.category.as_deref(), Some(error.category()));
    }

    #[test]
    fn test_rig_warning_to_json() {
        let warning = RigWarning::for_joint(WarningCode::MissingLimb, "LeftHand", "no parent");
        let json = rig_warning_to_json(&warning);
        assert_eq!(json.code, "W002");
        assert_eq!(json.joint.as_deref(), Some("LeftHand"));
    }

    #[test]
    fn test_failure_output() {
        let output = CanonicalizeOutput::failure(vec![JsonError::new("RIG_003", "ambiguous")], None);
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["success"], false);
        assert!(value.get("result").is_none());
        assert!(value.get("source_hash").is_none());
    }
}

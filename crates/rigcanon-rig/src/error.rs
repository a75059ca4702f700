//! Error and warning types for rig parsing and canonicalization.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for rig operations.
pub type RigResult<T> = Result<T, RigError>;

/// Coarse classification of fatal errors.
///
/// Every [`RigError`] variant belongs to exactly one kind. Callers that only
/// need to report a task status can match on the kind instead of the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The rig text could not be read or parsed into a skeleton.
    MalformedRig,
    /// The skeleton is not plausibly humanoid.
    AmbiguousTopology,
    /// The hierarchy is not a tree.
    CyclicGraph,
}

impl ErrorKind {
    /// Returns the string identifier for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MalformedRig => "malformed_rig",
            ErrorKind::AmbiguousTopology => "ambiguous_topology",
            ErrorKind::CyclicGraph => "cyclic_graph",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fatal errors raised while parsing or canonicalizing a rig.
#[derive(Debug, Error)]
pub enum RigError {
    /// Unparseable input, missing root, or a dangling joint reference.
    #[error("malformed rig{}: {message}", line_suffix(.line))]
    MalformedRig {
        line: Option<usize>,
        message: String,
    },

    /// The rig file could not be read.
    #[error("failed to read rig file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Leaf or tri-furcation counts do not allow a humanoid interpretation.
    #[error("ambiguous topology: {message}")]
    AmbiguousTopology { message: String },

    /// A canonical name would be given to two different joints.
    #[error("joint name '{name}' is already in use")]
    NameCollision { name: String },

    /// The hierarchy reaches a joint more than once.
    #[error("hierarchy is not a tree: joint '{joint}' is reached more than once")]
    CyclicGraph { joint: String },

    /// The canonical skeleton could not be serialized for hashing.
    #[error("failed to serialize canonical skeleton: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(" (line {})", line),
        None => String::new(),
    }
}

impl RigError {
    /// Creates a malformed rig error without a line number.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRig {
            line: None,
            message: message.into(),
        }
    }

    /// Creates a malformed rig error pointing at a 1-based input line.
    pub fn malformed_at(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedRig {
            line: Some(line),
            message: message.into(),
        }
    }

    /// Creates an ambiguous topology error.
    pub fn ambiguous(message: impl Into<String>) -> Self {
        Self::AmbiguousTopology {
            message: message.into(),
        }
    }

    /// Creates a cyclic graph error for the joint that was reached twice.
    pub fn cyclic(joint: impl Into<String>) -> Self {
        Self::CyclicGraph {
            joint: joint.into(),
        }
    }

    /// Returns the coarse error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RigError::MalformedRig { .. }
            | RigError::ReadFailed { .. }
            | RigError::Serialization(_) => ErrorKind::MalformedRig,
            RigError::AmbiguousTopology { .. } | RigError::NameCollision { .. } => {
                ErrorKind::AmbiguousTopology
            }
            RigError::CyclicGraph { .. } => ErrorKind::CyclicGraph,
        }
    }

    /// Returns a stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            RigError::MalformedRig { .. } => "RIG_001",
            RigError::ReadFailed { .. } => "RIG_002",
            RigError::AmbiguousTopology { .. } => "RIG_003",
            RigError::NameCollision { .. } => "RIG_004",
            RigError::CyclicGraph { .. } => "RIG_005",
            RigError::Serialization(_) => "RIG_006",
        }
    }

    /// Returns the error category for grouping related errors.
    pub fn category(&self) -> &'static str {
        "rig"
    }
}

/// Warning codes for non-fatal canonicalization conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    /// W001: A classified leaf has no parent, so its upper joint is unknown.
    MissingProximalJoint,
    /// W002: A hand or foot could not be synthesized.
    MissingLimb,
    /// W003: A shoulder could not be inserted.
    MissingShoulderAnchor,
    /// W004: Skin weights at or below the epsilon were dropped.
    DroppedSkinWeights,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::MissingProximalJoint => "W001",
            WarningCode::MissingLimb => "W002",
            WarningCode::MissingShoulderAnchor => "W003",
            WarningCode::DroppedSkinWeights => "W004",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A non-fatal condition reported alongside a successful result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RigWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// Joint (or canonical slot) the warning is about.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joint: Option<String>,
}

impl RigWarning {
    /// Creates a new warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            joint: None,
        }
    }

    /// Creates a new warning attached to a joint.
    pub fn for_joint(code: WarningCode, joint: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            joint: Some(joint.into()),
        }
    }
}

impl std::fmt::Display for RigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref joint) = self.joint {
            write!(f, "{}: {} (at {})", self.code, self.message, joint)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

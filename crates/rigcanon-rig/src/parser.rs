//! Line-oriented rig text parser.
//!
//! The format is the one emitted by the auto-rigging model, one record per
//! line with whitespace-delimited fields:
//!
//! ```text
//! joints <name> <x> <y> <z>
//! root <name>
//! hier <parent> <child>
//! skin <vertex_index> <joint1> <weight1> [<joint2> <weight2> ...]
//! ```
//!
//! Coordinates arrive Y-up and are remapped to Z-up with
//! `(x, y, z) -> (x, -z, y)`. Joint names have any `_dup_N` suffix stripped
//! before they become graph nodes.

use std::path::Path;

use glam::DVec3;

use crate::error::{RigError, RigResult};
use crate::skeleton::{JointId, Skeleton};

/// Marker the rigging model appends to joints split across symmetric limbs.
pub const DUP_MARKER: &str = "_dup_";

/// Weights at or below this value carry no meaningful influence.
pub const DEFAULT_WEIGHT_EPSILON: f64 = 0.001;

/// Strips a `_dup_N` suffix from a joint name.
///
/// ```
/// use rigcanon_rig::parser::base_name;
///
/// assert_eq!(base_name("joint_12_dup_3"), "joint_12");
/// assert_eq!(base_name("joint_12"), "joint_12");
/// ```
pub fn base_name(name: &str) -> &str {
    match name.find(DUP_MARKER) {
        Some(at) => &name[..at],
        None => name,
    }
}

/// Converts a source (Y-up) coordinate triple into the target (Z-up) space.
///
/// Negative zero is folded into zero so serialized output stays stable.
pub fn remap_axes(x: f64, y: f64, z: f64) -> DVec3 {
    DVec3::new(x + 0.0, 0.0 - z, y + 0.0)
}

/// Inverse of [`remap_axes`].
pub fn unmap_axes(position: DVec3) -> [f64; 3] {
    [position.x + 0.0, position.z + 0.0, 0.0 - position.y]
}

/// Options controlling how rig text is parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParseOptions {
    /// Skin weights at or below this value are dropped.
    pub weight_epsilon: f64,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            weight_epsilon: DEFAULT_WEIGHT_EPSILON,
        }
    }
}

/// Result of parsing a rig.
#[derive(Debug, Clone)]
pub struct ParsedRig {
    /// The skeleton as described by the rig text, rooted at its `root` record.
    pub skeleton: Skeleton,
    /// Number of skin weights dropped for being at or below the epsilon.
    pub dropped_weights: usize,
    /// Number of `hier` records dropped as self-loops or duplicates.
    pub dropped_edges: usize,
}

/// Parses rig text with default options.
pub fn parse_rig(text: &str) -> RigResult<ParsedRig> {
    parse_rig_with(text, &ParseOptions::default())
}

/// Reads and parses a rig file.
pub fn parse_rig_file(path: &Path, options: &ParseOptions) -> RigResult<ParsedRig> {
    let text = std::fs::read_to_string(path).map_err(|source| RigError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rig_with(&text, options)
}

enum Record<'a> {
    Joint {
        name: &'a str,
        position: DVec3,
    },
    Root(&'a str),
    Hier {
        parent: &'a str,
        child: &'a str,
    },
    Skin {
        vertex: u32,
        weights: Vec<(&'a str, f64)>,
    },
}

/// Parses rig text.
///
/// Records may appear in any order; joints are resolved after the whole
/// input has been read.
pub fn parse_rig_with(text: &str, options: &ParseOptions) -> RigResult<ParsedRig> {
    let mut records = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if let Some(record) = parse_line(line, index + 1)? {
            records.push((index + 1, record));
        }
    }

    let mut builder = Skeleton::builder();
    let mut root: Option<(usize, &str)> = None;
    for (line, record) in &records {
        match record {
            Record::Joint { name, position } => {
                builder.joint(base_name(name), *position);
            }
            Record::Root(name) => {
                let name = base_name(name);
                if let Some((_, previous)) = root {
                    if previous != name {
                        return Err(RigError::malformed_at(
                            *line,
                            format!("second root record '{}' conflicts with '{}'", name, previous),
                        ));
                    }
                }
                root = Some((*line, name));
            }
            _ => {}
        }
    }

    let (root_line, root_name) =
        root.ok_or_else(|| RigError::malformed("rig has no root record"))?;
    let root = builder.id(root_name).ok_or_else(|| {
        RigError::malformed_at(
            root_line,
            format!("root joint '{}' has no joints record", root_name),
        )
    })?;

    let mut dropped_edges = 0;
    let mut dropped_weights = 0;
    for (line, record) in &records {
        match record {
            Record::Hier { parent, child } => {
                let parent = resolve(&builder, parent, *line)?;
                let child = resolve(&builder, child, *line)?;
                if !builder.edge(parent, child) {
                    dropped_edges += 1;
                }
            }
            Record::Skin { vertex, weights } => {
                for (joint, weight) in weights {
                    let joint = resolve(&builder, joint, *line)?;
                    if *weight <= options.weight_epsilon {
                        dropped_weights += 1;
                        continue;
                    }
                    builder.skin(*vertex, joint, *weight);
                }
            }
            Record::Joint { .. } | Record::Root(_) => {}
        }
    }

    let skeleton = builder.build(root);
    tracing::debug!(
        joints = skeleton.len(),
        links = skeleton.edge_count(),
        dropped_edges,
        dropped_weights,
        "parsed rig"
    );

    Ok(ParsedRig {
        skeleton,
        dropped_weights,
        dropped_edges,
    })
}

fn resolve(builder: &crate::skeleton::SkeletonBuilder, name: &str, line: usize) -> RigResult<JointId> {
    let base = base_name(name);
    builder.id(base).ok_or_else(|| {
        RigError::malformed_at(line, format!("unknown joint '{}'", base))
    })
}

fn parse_line(line: &str, number: usize) -> RigResult<Option<Record<'_>>> {
    let mut fields = line.split_whitespace();
    let Some(tag) = fields.next() else {
        return Ok(None);
    };
    let fields: Vec<&str> = fields.collect();

    let record = match tag {
        "joints" => {
            expect_fields(&fields, 4, "joints <name> <x> <y> <z>", number)?;
            let x = parse_float(fields[1], number)?;
            let y = parse_float(fields[2], number)?;
            let z = parse_float(fields[3], number)?;
            Record::Joint {
                name: fields[0],
                position: remap_axes(x, y, z),
            }
        }
        "root" => {
            expect_fields(&fields, 1, "root <name>", number)?;
            Record::Root(fields[0])
        }
        "hier" => {
            expect_fields(&fields, 2, "hier <parent> <child>", number)?;
            Record::Hier {
                parent: fields[0],
                child: fields[1],
            }
        }
        "skin" => {
            expect_fields(&fields, 1, "skin <vertex> <joint> <weight> ...", number)?;
            let vertex = fields[0].parse::<u32>().map_err(|_| {
                RigError::malformed_at(number, format!("invalid vertex index '{}'", fields[0]))
            })?;
            let pairs = &fields[1..];
            if pairs.len() % 2 != 0 {
                return Err(RigError::malformed_at(
                    number,
                    "skin record has a joint without a weight",
                ));
            }
            let weights = pairs
                .chunks(2)
                .map(|pair| Ok((pair[0], parse_float(pair[1], number)?)))
                .collect::<RigResult<Vec<_>>>()?;
            Record::Skin { vertex, weights }
        }
        other => {
            tracing::debug!(line = number, tag = other, "skipping unknown rig record");
            return Ok(None);
        }
    };
    Ok(Some(record))
}

fn expect_fields(fields: &[&str], min: usize, shape: &str, line: usize) -> RigResult<()> {
    if fields.len() < min {
        return Err(RigError::malformed_at(
            line,
            format!("expected `{}`", shape),
        ));
    }
    Ok(())
}

fn parse_float(field: &str, line: usize) -> RigResult<f64> {
    match field.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(RigError::malformed_at(
            line,
            format!("invalid number '{}'", field),
        )),
    }
}

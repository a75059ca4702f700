//! The full canonicalization run.

use std::collections::BTreeMap;
use std::time::Instant;

use rigcanon_rig::parser::parse_rig_with;
use rigcanon_rig::{
    canonical_skeleton_hash, check_tree, CanonicalSkeleton, RigResult, RigWarning, Skeleton,
    WarningCode,
};

use crate::classify::classify_extremities;
use crate::config::CanonicalizeConfig;
use crate::consolidate::{align_to_ground, ground_offset, merge_chest_root};
use crate::limbs::synthesize_extremities;
use crate::proximal::map_proximal;
use crate::rename::{apply_renames, rename_table};
use crate::report::{CanonicalizationReport, StageTiming};
use crate::shoulder::insert_shoulders;
use crate::spine::reconstruct_spine;

/// Output of a successful run.
#[derive(Debug, Clone)]
pub struct Canonicalized {
    /// The canonical skeleton in arena form.
    pub skeleton: Skeleton,
    /// The same skeleton keyed by joint name.
    pub canonical: CanonicalSkeleton,
    /// Summary, warnings and timings.
    pub report: CanonicalizationReport,
}

/// Canonicalizes rig text with default settings.
///
/// # Example
/// ```no_run
/// let text = std::fs::read_to_string("rig.txt").unwrap();
/// let result = rigcanon_engine::canonicalize(&text).unwrap();
/// println!("root: {}", result.report.root);
/// ```
pub fn canonicalize(text: &str) -> RigResult<Canonicalized> {
    canonicalize_with_config(text, &CanonicalizeConfig::default())
}

/// Canonicalizes rig text.
///
/// Stages run in order: parse, classify, proximal, rename, limbs, spine,
/// shoulders, then the optional chest merge and ground alignment. With
/// `validate_stages` the tree invariant is checked after every stage that
/// produces a skeleton.
pub fn canonicalize_with_config(
    text: &str,
    config: &CanonicalizeConfig,
) -> RigResult<Canonicalized> {
    let mut run = Run::new(config);

    let options = config.parse_options();
    let parsed = run.stage("parse", || parse_rig_with(text, &options))?;
    if parsed.dropped_weights > 0 {
        run.absorb(vec![RigWarning::new(
            WarningCode::DroppedSkinWeights,
            format!(
                "{} skin weight(s) at or below {} dropped",
                parsed.dropped_weights, config.weight_epsilon
            ),
        )]);
    }
    let source = parsed.skeleton;
    run.check("parse", &source)?;

    let extremities = run.stage("classify", || classify_extremities(&source))?;
    let (proximal, warnings) = run.stage("proximal", || Ok(map_proximal(&source, &extremities)))?;
    run.absorb(warnings);

    let table = rename_table(&source, &extremities, &proximal)?;
    let renamed = run.stage("rename", || apply_renames(&source, &table))?;
    run.check("rename", &renamed)?;

    let limbs = run.stage("limbs", || synthesize_extremities(&renamed))?;
    run.absorb(limbs.warnings);
    run.check("limbs", &limbs.skeleton)?;

    let (spine, anchors) = run.stage("spine", || reconstruct_spine(&limbs.skeleton))?;
    run.check("spine", &spine)?;
    let chest_root = spine.name(anchors.chest_root).to_string();

    let shoulders = run.stage("shoulders", || insert_shoulders(&spine))?;
    run.absorb(shoulders.warnings);
    let mut skeleton = shoulders.skeleton;
    run.check("shoulders", &skeleton)?;

    if config.merge_chest_root {
        skeleton = run.stage("merge_chest_root", || merge_chest_root(&skeleton, anchors.chest_root))?;
        run.check("merge_chest_root", &skeleton)?;
    }

    let offset = ground_offset(&skeleton);
    if config.align_to_ground {
        skeleton = run.stage("align_to_ground", || Ok(align_to_ground(&skeleton)))?;
    }

    let canonical = CanonicalSkeleton::from(&skeleton);
    let report = CanonicalizationReport {
        root: canonical.root.clone(),
        joint_count: skeleton.len(),
        link_count: canonical.link_count(),
        ground_offset: offset,
        aligned_to_ground: config.align_to_ground,
        skeleton_hash: canonical_skeleton_hash(&canonical)?,
        renamed: table
            .iter()
            .map(|(id, name)| (name.to_string(), source.name(*id).to_string()))
            .collect::<BTreeMap<_, _>>(),
        chest_root,
        merged_chest_root: config.merge_chest_root,
        dropped_weights: parsed.dropped_weights,
        dropped_edges: parsed.dropped_edges,
        warnings: run.warnings,
        timings: run.timings,
    };

    tracing::info!(
        root = report.root.as_str(),
        joints = report.joint_count,
        links = report.link_count,
        warnings = report.warnings.len(),
        "canonicalized skeleton"
    );

    Ok(Canonicalized {
        skeleton,
        canonical,
        report,
    })
}

/// Per-run bookkeeping: stage timings and collected warnings.
struct Run<'a> {
    config: &'a CanonicalizeConfig,
    timings: Vec<StageTiming>,
    warnings: Vec<RigWarning>,
}

impl<'a> Run<'a> {
    fn new(config: &'a CanonicalizeConfig) -> Self {
        Self {
            config,
            timings: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn stage<T>(&mut self, name: &'static str, f: impl FnOnce() -> RigResult<T>) -> RigResult<T> {
        let start = Instant::now();
        let result = f();
        let duration_us = start.elapsed().as_micros() as u64;
        self.timings.push(StageTiming::new(name, duration_us));
        match &result {
            Ok(_) => tracing::debug!(stage = name, duration_us, "stage complete"),
            Err(e) => tracing::debug!(stage = name, code = e.code(), error = %e, "stage failed"),
        }
        result
    }

    fn check(&self, stage: &'static str, skeleton: &Skeleton) -> RigResult<()> {
        if !self.config.validate_stages {
            return Ok(());
        }
        let stats = check_tree(skeleton).map_err(|e| {
            tracing::debug!(stage, error = %e, "tree check failed");
            e
        })?;
        tracing::trace!(stage, joints = stats.joints, depth = stats.depth, "tree check passed");
        Ok(())
    }

    fn absorb(&mut self, warnings: Vec<RigWarning>) {
        for warning in &warnings {
            tracing::warn!(
                code = warning.code.code(),
                joint = warning.joint.as_deref().unwrap_or("-"),
                "{}",
                warning.message
            );
        }
        self.warnings.extend(warnings);
    }
}

//! RigCanon canonicalization engine.
//!
//! Turns the unlabeled joint tree emitted by an auto-rigging model into a
//! humanoid skeleton with standard bone names and a fixed trunk layout:
//!
//! ```text
//! pelvis ─ Hips ─ Spine ─ Chest ─ chest-root ─ Neck ─ Head
//!   │                       ├─ LeftShoulder ─ LeftUpperArm ─ LeftLowerArm ─ LeftHand
//!   │                       └─ RightShoulder ─ ...
//!   ├─ LeftUpperLeg ─ LeftLowerLeg ─ LeftFoot
//!   └─ RightUpperLeg ─ RightLowerLeg ─ RightFoot
//! ```
//!
//! Each stage is a function from a skeleton to a new skeleton and can be
//! used on its own; [`canonicalize`] runs them all in order.
//!
//! # Example
//!
//! ```no_run
//! use rigcanon_engine::{canonicalize_with_config, CanonicalizeConfig};
//!
//! let text = std::fs::read_to_string("rig.txt").unwrap();
//! let config = CanonicalizeConfig::new().merge_chest_root(true);
//! let result = canonicalize_with_config(&text, &config).unwrap();
//!
//! for warning in &result.report.warnings {
//!     eprintln!("{}", warning);
//! }
//! println!("{}", result.canonical.to_json_pretty().unwrap());
//! ```

pub mod classify;
pub mod config;
pub mod consolidate;
pub mod inspect;
pub mod limbs;
pub mod names;
pub mod pipeline;
pub mod proximal;
pub mod rename;
pub mod report;
pub mod reroot;
pub mod shoulder;
pub mod spine;
pub mod stage;

pub use classify::{classify_extremities, ExtremityMap};
pub use config::CanonicalizeConfig;
pub use consolidate::{align_to_ground, ground_offset, merge_chest_root};
pub use inspect::{summarize, RigSummary, TrifurcationSummary};
pub use limbs::synthesize_extremities;
pub use pipeline::{canonicalize, canonicalize_with_config, Canonicalized};
pub use proximal::{map_proximal, ProximalMap};
pub use rename::{apply_renames, canonical_rename, rename_table};
pub use report::{CanonicalizationReport, StageTiming};
pub use reroot::{reroot, reroot_hierarchy};
pub use shoulder::insert_shoulders;
pub use spine::{find_spine_anchors, reconstruct_spine, trifurcations, SpineAnchors};
pub use stage::StageOutput;

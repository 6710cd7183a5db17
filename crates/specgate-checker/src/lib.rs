//! specgate-checker - Compatibility classification over diff trees
//!
//! Turns a structural [`specgate_diff::Diff`] into leveled change records:
//! - An enumerable rule catalog (`registry`) with a required baseline and
//!   opt-in optional rules, all pure functions of `(diff, sources, config)`
//! - Localized record text (`localize`), never formatted inside rules
//! - Changelog decomposition (`changelog`) that classifies one atomic diff
//!   per discrete change and surfaces coverage gaps
//! - Level-scoped suppression files (`ignore`)
//!
//! The classification layer is the single severity authority: the diff
//! engine never decides what is breaking.

pub mod change;
pub mod changelog;
pub mod config;
pub mod ignore;
pub mod level;
pub mod localize;
pub mod registry;
pub(crate) mod rules;

pub use change::{sort_changes, Change, Changes};
pub use changelog::{changelog, CoverageGap};
pub use config::{
    CheckConfig, DEFAULT_BETA_DEPRECATION_DAYS, DEFAULT_STABLE_DEPRECATION_DAYS,
};
pub use ignore::{apply_ignores, fingerprint, IgnoreError, IgnoreList, UnmatchedIgnore};
pub use level::{Level, ParseLevelError};
pub use localize::{localizer_for, EnglishLocalizer, Localizer};
pub use registry::{
    check_backward_compatibility, check_until_level, checks, optional_checks,
    RuleDescriptor,
};

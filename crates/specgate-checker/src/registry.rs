//! The rule catalog and classification entry points.
//!
//! Rules are an enumerable registry of tagged descriptors mapped to pure
//! functions of `(diff, sources, config)`. A required baseline always runs;
//! optional rules are opted in by descriptor id. Thresholding happens after
//! all active rules ran, so cost scales with tree size, not rule count.

use tracing::debug;

use specgate_diff::{Diff, OperationsSourcesMap};

use crate::change::{Change, Changes};
use crate::config::CheckConfig;
use crate::level::Level;
use crate::rules;

pub type RuleFn = fn(&Diff, &OperationsSourcesMap, &CheckConfig) -> Vec<Change>;

/// RuleDescriptor - one enumerable entry of the catalog
pub struct RuleDescriptor {
    /// Descriptor id, the opt-in handle for optional rules
    pub id: &'static str,

    /// Required rules always run; optional ones need `include_checks`
    pub required: bool,

    /// Record ids this rule can emit
    pub ids: &'static [&'static str],

    pub run: RuleFn,
}

/// The full catalog, required baseline first.
pub fn rules() -> Vec<RuleDescriptor> {
    vec![
        RuleDescriptor {
            id: "api-added",
            required: true,
            ids: &["api-path-added", "api-operation-added"],
            run: rules::api_added::run,
        },
        RuleDescriptor {
            id: "api-removed",
            required: true,
            ids: &[
                "api-path-removed-without-deprecation",
                "api-path-removed-before-sunset",
                "api-path-sunset-passed",
                "api-removed-without-deprecation",
                "api-removed-before-sunset",
                "api-sunset-passed",
            ],
            run: rules::api_removed::run,
        },
        RuleDescriptor {
            id: "api-deprecated",
            required: true,
            ids: &[
                "endpoint-deprecated",
                "endpoint-reactivated",
                "api-deprecated-sunset-missing",
                "api-deprecated-sunset-parse",
                "api-sunset-date-too-small",
            ],
            run: rules::api_deprecated::run,
        },
        RuleDescriptor {
            id: "request-parameters",
            required: true,
            ids: &[
                "request-parameter-became-required",
                "request-parameter-became-optional",
                "new-required-request-parameter",
                "new-optional-request-parameter",
                "request-parameter-removed",
                "request-parameter-type-changed",
                "request-parameter-enum-value-removed",
            ],
            run: rules::request_parameters::run,
        },
        RuleDescriptor {
            id: "request-body",
            required: true,
            ids: &[
                "request-body-became-required",
                "request-body-became-optional",
                "request-property-became-required",
                "new-required-request-property",
                "request-property-type-changed",
            ],
            run: rules::request_body::run,
        },
        RuleDescriptor {
            id: "response-body",
            required: true,
            ids: &[
                "response-body-type-changed",
                "response-property-type-changed",
                "response-required-property-removed",
                "response-property-became-optional",
            ],
            run: rules::response_body::run,
        },
        RuleDescriptor {
            id: "response-success-status-removed",
            required: true,
            ids: &["response-success-status-removed"],
            run: rules::response_status::run_success_removed,
        },
        RuleDescriptor {
            id: "api-security",
            required: true,
            ids: &["api-security-added", "api-security-removed"],
            run: rules::security::run,
        },
        RuleDescriptor {
            id: "response-non-success-status-removed",
            required: false,
            ids: &["response-non-success-status-removed"],
            run: rules::response_status::run_non_success_removed,
        },
        RuleDescriptor {
            id: "response-non-success-status-added",
            required: false,
            ids: &["response-non-success-status-added"],
            run: rules::response_status::run_non_success_added,
        },
        RuleDescriptor {
            id: "api-operation-id",
            required: false,
            ids: &["api-operation-id-removed", "api-operation-id-changed"],
            run: rules::operation_meta::run_operation_id,
        },
        RuleDescriptor {
            id: "api-tag",
            required: false,
            ids: &["api-tag-removed", "api-tag-added"],
            run: rules::operation_meta::run_tags,
        },
        RuleDescriptor {
            id: "response-property-enum",
            required: false,
            ids: &[
                "response-property-enum-value-added",
                "response-property-enum-value-removed",
            ],
            run: rules::response_body::run_enum,
        },
    ]
}

/// Record ids of the required baseline, sorted.
pub fn checks() -> Vec<&'static str> {
    let mut ids: Vec<&'static str> = rules()
        .iter()
        .filter(|r| r.required)
        .flat_map(|r| r.ids.iter().copied())
        .collect();
    ids.sort_unstable();
    ids
}

/// Record ids of the opt-in rules, sorted.
pub fn optional_checks() -> Vec<&'static str> {
    let mut ids: Vec<&'static str> = rules()
        .iter()
        .filter(|r| !r.required)
        .flat_map(|r| r.ids.iter().copied())
        .collect();
    ids.sort_unstable();
    ids
}

/// Run every active rule and keep records at `level` or above.
pub fn check_until_level(
    config: &CheckConfig,
    diff: &Diff,
    sources: &OperationsSourcesMap,
    level: Level,
) -> Changes {
    let mut records = Vec::new();
    for rule in rules() {
        if !rule.required && !config.includes_check(rule.id) {
            continue;
        }
        records.extend((rule.run)(diff, sources, config));
    }
    let produced = records.len();
    records.retain(|c| c.level >= level);
    debug!(produced, kept = records.len(), %level, "classification complete");
    Changes::new(records)
}

/// Records at WARN and above, the backward-compatibility gate.
pub fn check_backward_compatibility(
    config: &CheckConfig,
    diff: &Diff,
    sources: &OperationsSourcesMap,
) -> Changes {
    check_until_level(config, diff, sources, Level::Warn)
}

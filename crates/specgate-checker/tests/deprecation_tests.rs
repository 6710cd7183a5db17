//! Deprecation announcements, sunset dates and grace periods.

use chrono::{Duration, NaiveDate};
use specgate_checker::{check_until_level, CheckConfig, Changes, Level};
use specgate_diff::{compare, DiffConfig};
use specgate_model::Spec;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

const TODAY: &str = "2026-06-01";

fn pinned_config() -> CheckConfig {
    CheckConfig {
        today: Some(TODAY.parse::<NaiveDate>().unwrap()),
        ..CheckConfig::new()
    }
}

fn spec_with_op(extra: &str) -> Spec {
    let yaml = format!(
        r#"
openapi: 3.0.0
info: {{title: T, version: 1.0.0}}
paths:
  /legacy:
    get:
{extra}
      responses: {{"200": {{description: ok}}}}
"#
    );
    serde_yaml::from_str(&yaml).unwrap()
}

fn empty_spec() -> Spec {
    serde_yaml::from_str("{openapi: 3.0.0, info: {title: T, version: 1.0.0}, paths: {}}")
        .unwrap()
}

fn classify(base: &Spec, revision: &Spec) -> Changes {
    let (diff, sources) = compare(base, revision, &DiffConfig::new()).unwrap();
    check_until_level(&pinned_config(), &diff, &sources, Level::Info)
}

fn date_offset(days: i64) -> String {
    (TODAY.parse::<NaiveDate>().unwrap() + Duration::days(days)).to_string()
}

// ---------------------------------------------------------------------------
// Removal relative to the sunset date
// ---------------------------------------------------------------------------

#[test]
fn test_removal_without_deprecation_is_err() {
    let base = spec_with_op("");
    let changes = classify(&base, &empty_spec());
    assert_eq!(changes.len(), 1);
    assert_eq!(changes.0[0].id, "api-path-removed-without-deprecation");
    assert_eq!(changes.0[0].level, Level::Err);
}

#[test]
fn test_removal_on_sunset_day_is_non_breaking() {
    // Sunset today: the grace period has fully elapsed, boundary inclusive
    let base = spec_with_op(&format!(
        "      deprecated: true\n      x-sunset: \"{}\"",
        date_offset(0)
    ));
    let changes = classify(&base, &empty_spec());
    assert_eq!(changes.len(), 1);
    assert_eq!(changes.0[0].id, "api-path-sunset-passed");
    assert_eq!(changes.0[0].level, Level::Info);
}

#[test]
fn test_removal_one_day_before_sunset_is_err() {
    let base = spec_with_op(&format!(
        "      deprecated: true\n      x-sunset: \"{}\"",
        date_offset(1)
    ));
    let changes = classify(&base, &empty_spec());
    assert_eq!(changes.len(), 1);
    assert_eq!(changes.0[0].id, "api-path-removed-before-sunset");
    assert_eq!(changes.0[0].level, Level::Err);
}

#[test]
fn test_removal_of_deprecated_op_without_sunset_is_err() {
    let base = spec_with_op("      deprecated: true");
    let changes = classify(&base, &empty_spec());
    assert_eq!(changes.0[0].id, "api-path-removed-without-deprecation");
}

// ---------------------------------------------------------------------------
// Deprecation announcements and grace periods
// ---------------------------------------------------------------------------

fn deprecation_records(revision_extra: &str) -> Changes {
    let base = spec_with_op("");
    let revision = spec_with_op(revision_extra);
    classify(&base, &revision)
}

#[test]
fn test_stable_grace_period_boundary_is_inclusive() {
    // Exactly stable_deprecation_days out is acceptable
    let ok = deprecation_records(&format!(
        "      deprecated: true\n      x-sunset: \"{}\"",
        date_offset(180)
    ));
    assert_eq!(ok.len(), 1, "{ok:?}");
    assert_eq!(ok.0[0].id, "endpoint-deprecated");
    assert_eq!(ok.0[0].level, Level::Info);

    // One day short of the grace period is breaking
    let short = deprecation_records(&format!(
        "      deprecated: true\n      x-sunset: \"{}\"",
        date_offset(179)
    ));
    assert_eq!(short.len(), 1, "{short:?}");
    assert_eq!(short.0[0].id, "api-sunset-date-too-small");
    assert_eq!(short.0[0].level, Level::Err);
}

#[test]
fn test_beta_endpoints_use_shorter_grace_period() {
    let ok = deprecation_records(&format!(
        "      deprecated: true\n      x-sunset: \"{}\"\n      x-stability-level: beta",
        date_offset(31)
    ));
    assert_eq!(ok.0[0].id, "endpoint-deprecated");

    let short = deprecation_records(&format!(
        "      deprecated: true\n      x-sunset: \"{}\"\n      x-stability-level: beta",
        date_offset(30)
    ));
    assert_eq!(short.0[0].id, "api-sunset-date-too-small");
}

#[test]
fn test_deprecation_without_sunset_is_err() {
    let missing = deprecation_records("      deprecated: true");
    assert_eq!(missing.0[0].id, "api-deprecated-sunset-missing");
    assert_eq!(missing.0[0].level, Level::Err);

    let unparseable =
        deprecation_records("      deprecated: true\n      x-sunset: \"next summer\"");
    assert_eq!(unparseable.0[0].id, "api-deprecated-sunset-parse");
    assert_eq!(unparseable.0[0].level, Level::Err);
}

//! Changelog decomposition: completeness and coverage gaps.

use specgate_checker::{changelog, check_until_level, CheckConfig, Level};
use specgate_diff::{compare, DiffConfig};
use specgate_model::Spec;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

fn load(yaml: &str, source: &str) -> Spec {
    let mut spec: Spec = serde_yaml::from_str(yaml).unwrap();
    spec.source = source.to_string();
    spec
}

const BASE: &str = r#"
openapi: 3.0.0
info: {title: Shop, version: 1.0.0}
paths:
  /items:
    get:
      parameters:
        - {name: filter, in: query, schema: {type: string}}
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                type: object
                properties:
                  price: {type: string}
  /retired:
    get:
      responses: {"200": {description: ok}}
"#;

const REVISION: &str = r#"
openapi: 3.0.0
info: {title: Shop, version: 1.0.0}
paths:
  /items:
    get:
      parameters:
        - {name: filter, in: query, required: true, schema: {type: string}}
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                type: object
                properties:
                  price: {type: number}
  /stock:
    get:
      responses: {"200": {description: ok}}
"#;

// ---------------------------------------------------------------------------
// Completeness
// ---------------------------------------------------------------------------

#[test]
fn test_per_atom_union_equals_whole_tree_classification() {
    let base = load(BASE, "base.yaml");
    let revision = load(REVISION, "revision.yaml");
    let (diff, sources) = compare(&base, &revision, &DiffConfig::new()).unwrap();
    let config = CheckConfig::new();

    let whole = check_until_level(&config, &diff, &sources, Level::Info);
    let (atoms, _gaps) = changelog(&config, &diff, &sources);

    let key = |c: &specgate_checker::Change| {
        (c.id.clone(), c.path.clone(), c.operation.clone())
    };
    let mut whole_keys: Vec<_> = whole.iter().map(key).collect();
    let mut atom_keys: Vec<_> = atoms.iter().map(key).collect();
    whole_keys.sort();
    atom_keys.sort();

    assert_eq!(whole_keys, atom_keys, "decomposition must be lossless");
    assert!(
        whole_keys.contains(&(
            "request-parameter-became-required".to_string(),
            "/items".to_string(),
            "GET".to_string()
        )),
        "{whole_keys:?}"
    );
    assert!(whole_keys.len() >= 4, "path add, path delete, param, property");
}

// ---------------------------------------------------------------------------
// Coverage gaps
// ---------------------------------------------------------------------------

#[test]
fn test_unclassified_atom_surfaces_as_coverage_gap() {
    let base = load(
        r#"
openapi: 3.0.0
info: {title: T, version: 1.0.0}
paths:
  /a:
    get:
      summary: old words
      responses: {"200": {description: ok}}
"#,
        "base.yaml",
    );
    let revision = load(
        r#"
openapi: 3.0.0
info: {title: T, version: 1.0.0}
paths:
  /a:
    get:
      summary: new words
      responses: {"200": {description: ok}}
"#,
        "revision.yaml",
    );

    let (diff, sources) = compare(&base, &revision, &DiffConfig::new()).unwrap();
    let (records, gaps) = changelog(&CheckConfig::new(), &diff, &sources);

    assert!(records.is_empty(), "no rule covers summary text: {records:?}");
    assert_eq!(gaps.len(), 1, "{gaps:?}");
    assert_eq!(gaps[0].path, "/a");
    assert_eq!(gaps[0].operation, "GET");
    assert_eq!(gaps[0].element, "summary");
}

#[test]
fn test_empty_diff_produces_no_records_and_no_gaps() {
    let spec = load(BASE, "same.yaml");
    let (diff, sources) = compare(&spec, &spec, &DiffConfig::new()).unwrap();
    let (records, gaps) = changelog(&CheckConfig::new(), &diff, &sources);
    assert!(records.is_empty());
    assert!(gaps.is_empty());
}

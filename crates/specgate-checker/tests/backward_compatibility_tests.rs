//! End-to-end classification scenarios over real document pairs.

use specgate_checker::{check_until_level, CheckConfig, Level};
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

fn classify(base: &str, revision: &str, level: Level) -> specgate_checker::Changes {
    let base = load(base, "base.yaml");
    let revision = load(revision, "revision.yaml");
    let (diff, sources) = compare(&base, &revision, &DiffConfig::new()).unwrap();
    check_until_level(&CheckConfig::new(), &diff, &sources, level)
}

// ---------------------------------------------------------------------------
// Scenario: a request parameter became required
// ---------------------------------------------------------------------------

const COURSES_BASE: &str = r#"
openapi: 3.0.0
info: {title: Courses, version: 1.0.0}
paths:
  /courses:
    get:
      operationId: listCourses
      parameters:
        - name: courseId
          in: query
          schema:
            type: string
      responses:
        "200":
          description: ok
"#;

const COURSES_REQUIRED: &str = r#"
openapi: 3.0.0
info: {title: Courses, version: 1.0.0}
paths:
  /courses:
    get:
      operationId: listCourses
      parameters:
        - name: courseId
          in: query
          required: true
          schema:
            type: string
      responses:
        "200":
          description: ok
"#;

#[test]
fn test_request_parameter_became_required_is_one_err() {
    let changes = classify(COURSES_BASE, COURSES_REQUIRED, Level::Info);
    assert_eq!(changes.len(), 1, "exactly one record expected: {changes:?}");

    let record = &changes.0[0];
    assert_eq!(record.id, "request-parameter-became-required");
    assert_eq!(record.level, Level::Err);
    assert_eq!(record.path, "/courses");
    assert_eq!(record.operation, "GET");
    assert_eq!(record.operation_id, "listCourses");
    assert!(record.text.contains("courseId"), "text names the parameter");
}

// ---------------------------------------------------------------------------
// Scenario: a response property type changed
// ---------------------------------------------------------------------------

const PEOPLE_BASE: &str = r#"
openapi: 3.0.0
info: {title: People, version: 1.0.0}
paths:
  /people:
    get:
      operationId: listPeople
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                type: object
                properties:
                  name:
                    type: string
"#;

const PEOPLE_INTEGER: &str = r#"
openapi: 3.0.0
info: {title: People, version: 1.0.0}
paths:
  /people:
    get:
      operationId: listPeople
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                type: object
                properties:
                  name:
                    type: integer
"#;

#[test]
fn test_response_property_type_changed_record() {
    let changes = classify(PEOPLE_BASE, PEOPLE_INTEGER, Level::Info);
    assert_eq!(changes.len(), 1, "exactly one record expected: {changes:?}");

    let record = &changes.0[0];
    assert_eq!(record.id, "response-property-type-changed");
    assert_eq!(record.level, Level::Err);
    assert_eq!(
        record.text,
        "the response's property type/format changed from 'string'/'none' \
         to 'integer'/'none' for status '200'"
    );
    assert_eq!(record.path, "/people");
    assert_eq!(record.operation, "GET");
    assert_eq!(record.operation_id, "listPeople");
    assert_eq!(record.source, "revision.yaml");
}

// ---------------------------------------------------------------------------
// Scenario: a path added in revision
// ---------------------------------------------------------------------------

#[test]
fn test_added_path_is_info_per_operation() {
    let base = r#"
openapi: 3.0.0
info: {title: T, version: 1.0.0}
paths: {}
"#;
    let revision = r#"
openapi: 3.0.0
info: {title: T, version: 1.0.0}
paths:
  /reports:
    get:
      responses: {"200": {description: ok}}
    post:
      responses: {"201": {description: created}}
"#;
    let changes = classify(base, revision, Level::Info);
    assert_eq!(changes.len(), 2, "one record per operation: {changes:?}");
    for record in changes.iter() {
        assert_eq!(record.id, "api-path-added");
        assert_eq!(record.level, Level::Info);
        assert_eq!(record.path, "/reports");
    }
    let methods: Vec<&str> = changes.iter().map(|c| c.operation.as_str()).collect();
    assert!(methods.contains(&"GET") && methods.contains(&"POST"));
}

// ---------------------------------------------------------------------------
// Scenario: required property removed, response vs request
// ---------------------------------------------------------------------------

fn order_spec(request_props: &str, response_props: &str) -> String {
    format!(
        r#"
openapi: 3.0.0
info: {{title: Orders, version: 1.0.0}}
paths:
  /orders:
    post:
      requestBody:
        content:
          application/json:
            schema:
              type: object
              required: [id]
              properties:
{request_props}
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                type: object
                required: [id]
                properties:
{response_props}
"#
    )
}

#[test]
fn test_required_property_removal_breaks_responses_not_requests() {
    let both = "                  id: {type: string}\n                  note: {type: string}";
    let only_note = "                  note: {type: string}";
    let only_id = "                  id: {type: string}";

    // Removed from the response body: clients may depend on its presence
    let base = order_spec(only_id, both);
    let revision = order_spec(only_id, only_note);
    let changes = classify(&base, &revision, Level::Info);
    assert_eq!(changes.len(), 1, "{changes:?}");
    assert_eq!(changes.0[0].id, "response-required-property-removed");
    assert_eq!(changes.0[0].level, Level::Err);

    // The same removal from the request body drops a client obligation
    let base = order_spec(both, only_id);
    let revision = order_spec(only_note, only_id);
    let changes = classify(&base, &revision, Level::Info);
    assert!(
        changes.is_empty(),
        "request-side removal must not produce records: {changes:?}"
    );
}

// ---------------------------------------------------------------------------
// Scenario: an array's item type changed
// ---------------------------------------------------------------------------

fn names_spec(request_item_type: &str, response_item_type: &str) -> String {
    format!(
        r#"
openapi: 3.0.0
info: {{title: Names, version: 1.0.0}}
paths:
  /names:
    post:
      requestBody:
        content:
          application/json:
            schema:
              type: array
              items:
                type: {request_item_type}
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                type: array
                items:
                  type: {response_item_type}
"#
    )
}

#[test]
fn test_response_array_item_type_change_is_err() {
    let base = names_spec("string", "string");
    let revision = names_spec("string", "integer");
    let changes = classify(&base, &revision, Level::Info);
    assert_eq!(changes.len(), 1, "{changes:?}");

    let record = &changes.0[0];
    assert_eq!(record.id, "response-property-type-changed");
    assert_eq!(record.level, Level::Err);
    assert_eq!(record.path, "/names");
    assert_eq!(record.operation, "POST");
    assert!(
        record.text.contains("'string'/'none'") && record.text.contains("'integer'/'none'"),
        "text carries both halves: {}",
        record.text
    );
    assert!(record.text.contains("'200'"), "text names the status: {}", record.text);
}

#[test]
fn test_request_array_item_type_change_is_err() {
    let base = names_spec("string", "string");
    let revision = names_spec("integer", "string");
    let changes = classify(&base, &revision, Level::Info);
    assert_eq!(changes.len(), 1, "{changes:?}");

    let record = &changes.0[0];
    assert_eq!(record.id, "request-property-type-changed");
    assert_eq!(record.level, Level::Err);
    assert!(record.text.contains("items"), "text names the items path: {}", record.text);
}

// ---------------------------------------------------------------------------
// Severity thresholds
// ---------------------------------------------------------------------------

#[test]
fn test_threshold_filtering_is_monotonic() {
    let base = r#"
openapi: 3.0.0
info: {title: T, version: 1.0.0}
paths:
  /a:
    get:
      parameters:
        - {name: q, in: query, schema: {type: string}}
      responses: {"200": {description: ok}}
  /b:
    get:
      responses: {"200": {description: ok}}
"#;
    // Drops a parameter (WARN), a path (ERR), and adds a path (INFO)
    let revision = r#"
openapi: 3.0.0
info: {title: T, version: 1.0.0}
paths:
  /a:
    get:
      responses: {"200": {description: ok}}
  /c:
    get:
      responses: {"200": {description: ok}}
"#;

    let info = classify(base, revision, Level::Info);
    let warn = classify(base, revision, Level::Warn);
    let err = classify(base, revision, Level::Err);

    assert!(err.len() < warn.len() && warn.len() < info.len());
    for record in err.iter() {
        assert!(warn.0.contains(record), "ERR set must be a subset of WARN set");
    }
    for record in warn.iter() {
        assert!(info.0.contains(record), "WARN set must be a subset of INFO set");
    }
    assert!(err.has_level_or_higher(Level::Err));
}

//! Request body and request property rules.
//!
//! New obligations on the client are breaking: a body becoming required, a
//! property joining the required list, a new property that is immediately
//! required, a property type change. The walk recurses through modified
//! properties so nested payload changes are attributed by dotted path.

use specgate_diff::{Diff, OperationsSourcesMap, SchemaDiff};
use specgate_model::Operation;

use crate::change::Change;
use crate::config::CheckConfig;
use crate::level::Level;
use crate::localize::quoted;

use super::{
    became_true, change, data_type_args, modified_operations, property_path,
    revision_source,
};

struct RequestContext<'a> {
    config: &'a CheckConfig,
    path: &'a str,
    method: &'a str,
    operation: &'a Operation,
    source: Option<&'a str>,
}

fn walk_request_schema(
    ctx: &RequestContext<'_>,
    prefix: &str,
    schema: &SchemaDiff,
    records: &mut Vec<Change>,
) {
    if let Some(required) = &schema.required {
        for name in &required.added {
            let newly_added = schema
                .properties
                .as_ref()
                .is_some_and(|p| p.added.contains(name));
            let id = if newly_added {
                "new-required-request-property"
            } else {
                "request-property-became-required"
            };
            records.push(change(
                ctx.config,
                id,
                Level::Err,
                &[quoted(&property_path(prefix, name))],
                ctx.path,
                ctx.method,
                Some(ctx.operation),
                ctx.source,
            ));
        }
    }

    if let Some(properties) = &schema.properties {
        for (name, child) in &properties.modified {
            let full = property_path(prefix, name);
            if let Some(data_type) = &child.data_type {
                let (from, to) = data_type_args(data_type);
                records.push(change(
                    ctx.config,
                    "request-property-type-changed",
                    Level::Err,
                    &[quoted(&full), from, to],
                    ctx.path,
                    ctx.method,
                    Some(ctx.operation),
                    ctx.source,
                ));
            }
            walk_request_schema(ctx, &full, child, records);
        }
    }

    // Array items and additionalProperties carry their own type: a change
    // there never surfaces at a properties.modified position
    if let Some(items) = &schema.items {
        walk_request_subschema(ctx, &property_path(prefix, "items"), items, records);
    }
    if let Some(additional) = &schema.additional_properties {
        walk_request_subschema(
            ctx,
            &property_path(prefix, "additionalProperties"),
            additional,
            records,
        );
    }
}

fn walk_request_subschema(
    ctx: &RequestContext<'_>,
    full: &str,
    schema: &SchemaDiff,
    records: &mut Vec<Change>,
) {
    if let Some(data_type) = &schema.data_type {
        let (from, to) = data_type_args(data_type);
        records.push(change(
            ctx.config,
            "request-property-type-changed",
            Level::Err,
            &[quoted(full), from, to],
            ctx.path,
            ctx.method,
            Some(ctx.operation),
            ctx.source,
        ));
    }
    walk_request_schema(ctx, full, schema, records);
}

pub(crate) fn run(
    diff: &Diff,
    sources: &OperationsSourcesMap,
    config: &CheckConfig,
) -> Vec<Change> {
    let mut records = Vec::new();

    for (path, method, op_diff) in modified_operations(diff) {
        let Some(body) = &op_diff.request_body else {
            continue;
        };
        let ctx = RequestContext {
            config,
            path,
            method,
            operation: &op_diff.revision,
            source: revision_source(sources, path, method),
        };

        if let Some(required) = &body.required {
            let (id, level) = if became_true(required) {
                ("request-body-became-required", Level::Err)
            } else {
                ("request-body-became-optional", Level::Info)
            };
            records.push(change(
                config,
                id,
                level,
                &[],
                path,
                method,
                Some(ctx.operation),
                ctx.source,
            ));
        }

        let Some(content) = &body.content else {
            continue;
        };
        for media_diff in content.modified.values() {
            if let Some(schema) = &media_diff.schema {
                walk_request_schema(&ctx, "", schema, &mut records);
            }
        }
    }

    records
}

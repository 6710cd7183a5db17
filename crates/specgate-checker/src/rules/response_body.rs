//! Response body and response property rules.
//!
//! Clients may depend on what the server promises back, so the breaking
//! direction is reversed relative to the request side: a required property
//! removed from a response, a property going optional, or a type change is
//! breaking; the same changes on the request side relax obligations.

use specgate_diff::{Diff, OperationsSourcesMap, SchemaDiff};
use specgate_model::Operation;

use crate::change::Change;
use crate::config::CheckConfig;
use crate::level::Level;
use crate::localize::quoted;

use super::{
    change, data_type_args, enum_value_display, modified_operations, property_path,
};

struct ResponseContext<'a> {
    config: &'a CheckConfig,
    path: &'a str,
    method: &'a str,
    status: &'a str,
    operation: &'a Operation,
    source: Option<&'a str>,
}

impl ResponseContext<'_> {
    fn push(&self, records: &mut Vec<Change>, id: &str, level: Level, args: &[String]) {
        records.push(change(
            self.config,
            id,
            level,
            args,
            self.path,
            self.method,
            Some(self.operation),
            self.source,
        ));
    }
}

fn walk_response_schema(
    ctx: &ResponseContext<'_>,
    prefix: &str,
    schema: &SchemaDiff,
    records: &mut Vec<Change>,
) {
    let status = quoted(ctx.status);

    if let Some(properties) = &schema.properties {
        for name in &properties.deleted {
            // Only removals of promised (required) properties are breaking
            if schema.base.required.contains(name) {
                ctx.push(
                    records,
                    "response-required-property-removed",
                    Level::Err,
                    &[quoted(&property_path(prefix, name)), status.clone()],
                );
            }
        }
    }

    if let Some(required) = &schema.required {
        for name in &required.deleted {
            let removed = schema
                .properties
                .as_ref()
                .is_some_and(|p| p.deleted.contains(name));
            if !removed {
                ctx.push(
                    records,
                    "response-property-became-optional",
                    Level::Err,
                    &[quoted(&property_path(prefix, name)), status.clone()],
                );
            }
        }
    }

    if let Some(properties) = &schema.properties {
        for (name, child) in &properties.modified {
            let full = property_path(prefix, name);
            if let Some(data_type) = &child.data_type {
                let (from, to) = data_type_args(data_type);
                ctx.push(
                    records,
                    "response-property-type-changed",
                    Level::Err,
                    &[quoted(&full), from, to, status.clone()],
                );
            }
            walk_response_schema(ctx, &full, child, records);
        }
    }

    // Array items and additionalProperties carry their own type: a change
    // there never surfaces at a properties.modified position
    if let Some(items) = &schema.items {
        walk_response_subschema(ctx, &property_path(prefix, "items"), items, records);
    }
    if let Some(additional) = &schema.additional_properties {
        walk_response_subschema(
            ctx,
            &property_path(prefix, "additionalProperties"),
            additional,
            records,
        );
    }
}

fn walk_response_subschema(
    ctx: &ResponseContext<'_>,
    full: &str,
    schema: &SchemaDiff,
    records: &mut Vec<Change>,
) {
    if let Some(data_type) = &schema.data_type {
        let (from, to) = data_type_args(data_type);
        ctx.push(
            records,
            "response-property-type-changed",
            Level::Err,
            &[quoted(full), from, to, quoted(ctx.status)],
        );
    }
    walk_response_schema(ctx, full, schema, records);
}

fn for_each_response_schema<F>(diff: &Diff, sources: &OperationsSourcesMap, mut visit: F)
where
    F: FnMut(&str, &str, &str, &Operation, Option<&str>, &SchemaDiff),
{
    for (path, method, op_diff) in modified_operations(diff) {
        let Some(responses) = &op_diff.responses else {
            continue;
        };
        let source = sources.revision_source(path, method);
        for (status, response_diff) in &responses.modified {
            let Some(content) = &response_diff.content else {
                continue;
            };
            for media_diff in content.modified.values() {
                if let Some(schema) = &media_diff.schema {
                    visit(path, method, status, &op_diff.revision, source, schema);
                }
            }
        }
    }
}

pub(crate) fn run(
    diff: &Diff,
    sources: &OperationsSourcesMap,
    config: &CheckConfig,
) -> Vec<Change> {
    let mut records = Vec::new();

    for_each_response_schema(diff, sources, |path, method, status, operation, source, schema| {
        let ctx = ResponseContext {
            config,
            path,
            method,
            status,
            operation,
            source,
        };

        if let Some(data_type) = &schema.data_type {
            let (from, to) = data_type_args(data_type);
            ctx.push(
                &mut records,
                "response-body-type-changed",
                Level::Err,
                &[from, to, quoted(status)],
            );
        }

        walk_response_schema(&ctx, "", schema, &mut records);
    });

    records
}

/// Opt-in: enum value changes on response properties.
pub(crate) fn run_enum(
    diff: &Diff,
    sources: &OperationsSourcesMap,
    config: &CheckConfig,
) -> Vec<Change> {
    let mut records = Vec::new();

    for_each_response_schema(diff, sources, |path, method, status, operation, source, schema| {
        let ctx = ResponseContext {
            config,
            path,
            method,
            status,
            operation,
            source,
        };
        walk_enum(&ctx, "", schema, &mut records);
    });

    records
}

fn walk_enum(
    ctx: &ResponseContext<'_>,
    prefix: &str,
    schema: &SchemaDiff,
    records: &mut Vec<Change>,
) {
    let status = quoted(ctx.status);

    if let Some(properties) = &schema.properties {
        for (name, child) in &properties.modified {
            let full = property_path(prefix, name);
            if let Some(enum_diff) = &child.enum_diff {
                for value in &enum_diff.added {
                    ctx.push(
                        records,
                        "response-property-enum-value-added",
                        Level::Warn,
                        &[quoted(&full), enum_value_display(value), status.clone()],
                    );
                }
                for value in &enum_diff.deleted {
                    ctx.push(
                        records,
                        "response-property-enum-value-removed",
                        Level::Warn,
                        &[quoted(&full), enum_value_display(value), status.clone()],
                    );
                }
            }
            walk_enum(ctx, &full, child, records);
        }
    }
}

//! Message localization.
//!
//! Rules never format user-facing prose themselves: every record text is
//! resolved through a [`Localizer`] keyed by a stable message id plus
//! positional arguments. Templates use `{0}`, `{1}`, ... placeholders.

/// Translate a stable message id plus positional args into display text.
pub trait Localizer: Send + Sync {
    fn translate(&self, key: &str, args: &[String]) -> String;
}

/// Quote a value the way message templates expect (`'value'`).
pub fn quoted(value: &str) -> String {
    format!("'{value}'")
}

/// The built-in English message table.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLocalizer;

impl Localizer for EnglishLocalizer {
    fn translate(&self, key: &str, args: &[String]) -> String {
        let template = english_template(key)
            .unwrap_or("missing message for {key}")
            .to_string();
        let mut text = template.replace("{key}", key);
        for (index, arg) in args.iter().enumerate() {
            text = text.replace(&format!("{{{index}}}"), arg);
        }
        text
    }
}

/// Resolve a language tag to a localizer; only English tables ship today.
pub fn localizer_for(tag: &str) -> Option<Box<dyn Localizer>> {
    let primary = tag.split(['-', '_']).next().unwrap_or(tag);
    match primary.to_ascii_lowercase().as_str() {
        "en" => Some(Box::new(EnglishLocalizer)),
        _ => None,
    }
}

fn english_template(key: &str) -> Option<&'static str> {
    Some(match key {
        "api-path-added" => "api path added",
        "api-operation-added" => "api operation added",
        "api-path-removed-without-deprecation" => "api path removed without deprecation",
        "api-removed-without-deprecation" => "api removed without deprecation",
        "api-path-removed-before-sunset" => "api path removed before the sunset date {0}",
        "api-removed-before-sunset" => "api removed before the sunset date {0}",
        "api-path-sunset-passed" => "api path removed at or after its sunset date {0}",
        "api-sunset-passed" => "api removed at or after its sunset date {0}",
        "endpoint-deprecated" => "endpoint deprecated",
        "endpoint-reactivated" => "endpoint reactivated",
        "api-deprecated-sunset-missing" => "deprecated endpoint has no sunset date",
        "api-deprecated-sunset-parse" => "failed to parse sunset date: {0}",
        "api-sunset-date-too-small" => {
            "sunset date {0} is too small, must be at least {1} days from now"
        }
        "request-parameter-became-required" => {
            "the {0} request parameter {1} became required"
        }
        "request-parameter-became-optional" => {
            "the {0} request parameter {1} became optional"
        }
        "new-required-request-parameter" => {
            "added the new required {0} request parameter {1}"
        }
        "new-optional-request-parameter" => {
            "added the new optional {0} request parameter {1}"
        }
        "request-parameter-removed" => "deleted the {0} request parameter {1}",
        "request-parameter-type-changed" => {
            "the {0} request parameter {1} type/format changed from {2} to {3}"
        }
        "request-parameter-enum-value-removed" => {
            "removed the enum value {2} from the {0} request parameter {1}"
        }
        "request-property-became-required" => {
            "the request property {0} became required"
        }
        "new-required-request-property" => {
            "added the new required request property {0}"
        }
        "request-property-type-changed" => {
            "the request property {0} type/format changed from {1} to {2}"
        }
        "request-body-became-required" => "the request body became required",
        "request-body-became-optional" => "the request body became optional",
        "response-required-property-removed" => {
            "removed the required property {0} from the response with the {1} status"
        }
        "response-property-became-optional" => {
            "the response property {0} became optional for the status {1}"
        }
        "response-body-type-changed" => {
            "the response's body type/format changed from {0} to {1} for status {2}"
        }
        "response-property-type-changed" => {
            "the response's property type/format changed from {1} to {2} for status {3}"
        }
        "response-success-status-removed" => "removed the success response status {0}",
        "response-non-success-status-removed" => "removed the response status {0}",
        "response-non-success-status-added" => "added the response status {0}",
        "response-property-enum-value-added" => {
            "added the enum value {1} to the response property {0} for the status {2}"
        }
        "response-property-enum-value-removed" => {
            "removed the enum value {1} from the response property {0} for the status {2}"
        }
        "api-security-added" => "the security requirement {0} was added",
        "api-security-removed" => "the security requirement {0} was removed",
        "api-operation-id-removed" => "api operation id {0} was removed",
        "api-operation-id-changed" => "api operation id changed from {0} to {1}",
        "api-tag-removed" => "api tag {0} was removed",
        "api-tag-added" => "api tag {0} was added",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_args_are_substituted() {
        let text = EnglishLocalizer.translate(
            "response-property-type-changed",
            &[
                "name".to_string(),
                "'string'/'none'".to_string(),
                "'integer'/'none'".to_string(),
                "'200'".to_string(),
            ],
        );
        assert_eq!(
            text,
            "the response's property type/format changed from 'string'/'none' \
             to 'integer'/'none' for status '200'"
        );
    }

    #[test]
    fn test_missing_key_is_visible_not_empty() {
        let text = EnglishLocalizer.translate("no-such-message", &[]);
        assert!(text.contains("no-such-message"));
    }

    #[test]
    fn test_language_tag_lookup() {
        assert!(localizer_for("en").is_some());
        assert!(localizer_for("en-US").is_some());
        assert!(localizer_for("fr").is_none());
    }
}

//! Comparison configuration.

use regex::Regex;

/// Document elements that can be excluded from comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExcludeElement {
    /// Example values on media types, parameters and schemas
    Examples,
    /// Description fields at every level
    Description,
    /// Document title
    Title,
    /// Summary fields on path items and operations
    Summary,
    /// `x-*` extension fields
    Extensions,
}

impl ExcludeElement {
    /// All excludable elements, for CLI option listings.
    pub fn all() -> &'static [ExcludeElement] {
        &[
            ExcludeElement::Examples,
            ExcludeElement::Description,
            ExcludeElement::Title,
            ExcludeElement::Summary,
            ExcludeElement::Extensions,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExcludeElement::Examples => "examples",
            ExcludeElement::Description => "description",
            ExcludeElement::Title => "title",
            ExcludeElement::Summary => "summary",
            ExcludeElement::Extensions => "extensions",
        }
    }
}

impl std::str::FromStr for ExcludeElement {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "examples" => Ok(ExcludeElement::Examples),
            "description" => Ok(ExcludeElement::Description),
            "title" => Ok(ExcludeElement::Title),
            "summary" => Ok(ExcludeElement::Summary),
            "extensions" => Ok(ExcludeElement::Extensions),
            other => Err(format!("unknown exclude element: {}", other)),
        }
    }
}

impl std::fmt::Display for ExcludeElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// DiffConfig - every knob the structural diff engine honors
///
/// `breaking_only` does not change what the engine computes: the tree is
/// always complete, and breaking-ness is decided by the classification
/// layer. The flag is carried so renderers know which records were asked
/// for.
#[derive(Debug, Clone, Default)]
pub struct DiffConfig {
    /// Caller asked only for breaking changes (post-filter on records)
    pub breaking_only: bool,

    /// Elements excluded from comparison
    pub exclude_elements: Vec<ExcludeElement>,

    /// Prefix added to base paths before matching
    pub prefix_base: String,

    /// Prefix added to revision paths before matching
    pub prefix_revision: String,

    /// Prefix stripped from base paths before matching
    pub strip_prefix_base: String,

    /// Prefix stripped from revision paths before matching
    pub strip_prefix_revision: String,

    /// When false, `{param}` segment names are ignored during endpoint
    /// matching, so `/pets/{id}` and `/pets/{petId}` pair up
    pub include_path_params: bool,

    /// Only paths matching this pattern take part in the comparison; both
    /// sides are filtered before any pairing happens. Matching runs on
    /// rewritten display paths.
    pub match_path: Option<Regex>,

    /// Merge `allOf` members into their parent before schema diffing
    pub flatten_allof: bool,

    /// Extensions whose key matches this pattern are not diffed
    pub exclude_extensions_pattern: Option<Regex>,

    /// How many times one schema reference pair may be re-entered along a
    /// single descent before the walk treats it as unchanged. Never
    /// unlimited; `DiffConfig::default()` uses [`DEFAULT_MAX_CIRCULAR_REFS`].
    pub max_circular_refs: u32,
}

/// Default bound for circular schema reference traversal.
pub const DEFAULT_MAX_CIRCULAR_REFS: u32 = 5;

impl DiffConfig {
    /// A config with the default traversal bound and nothing excluded.
    pub fn new() -> Self {
        Self {
            max_circular_refs: DEFAULT_MAX_CIRCULAR_REFS,
            ..Self::default()
        }
    }

    /// The effective traversal bound: a zero (unset) bound falls back to
    /// the default rather than disabling traversal entirely.
    pub fn circular_ref_bound(&self) -> u32 {
        if self.max_circular_refs == 0 {
            DEFAULT_MAX_CIRCULAR_REFS
        } else {
            self.max_circular_refs
        }
    }

    /// Whether an element kind is excluded from comparison.
    pub fn excludes(&self, element: ExcludeElement) -> bool {
        self.exclude_elements.contains(&element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_bound_falls_back_to_default() {
        let config = DiffConfig::default();
        assert_eq!(config.max_circular_refs, 0);
        assert_eq!(config.circular_ref_bound(), DEFAULT_MAX_CIRCULAR_REFS);

        let explicit = DiffConfig {
            max_circular_refs: 2,
            ..DiffConfig::default()
        };
        assert_eq!(explicit.circular_ref_bound(), 2);
    }

    #[test]
    fn test_exclude_element_from_str_round_trip() {
        for element in ExcludeElement::all() {
            let parsed: ExcludeElement = element.as_str().parse().expect("parses");
            assert_eq!(parsed, *element);
        }
        assert!("bogus".parse::<ExcludeElement>().is_err());
    }
}

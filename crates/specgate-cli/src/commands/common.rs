//! Flags, loading and rendering shared across subcommands.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, ValueEnum};
use regex::Regex;

use specgate_checker::{localizer_for, Change, Changes, CheckConfig, IgnoreList, Level};
use specgate_diff::{DiffConfig, ExcludeElement, DEFAULT_MAX_CIRCULAR_REFS};
use specgate_model::Spec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Yaml,
    Json,
    Text,
}

/// Flags mapped onto `DiffConfig`.
#[derive(Debug, Args)]
pub struct DiffFlags {
    /// Treat base and revision as glob patterns over multiple documents
    #[arg(long)]
    pub composed: bool,

    /// Prefix added to base paths before matching
    #[arg(long, default_value = "")]
    pub prefix_base: String,

    /// Prefix added to revision paths before matching
    #[arg(long, default_value = "")]
    pub prefix_revision: String,

    /// Prefix stripped from base paths before matching
    #[arg(long, default_value = "")]
    pub strip_prefix_base: String,

    /// Prefix stripped from revision paths before matching
    #[arg(long, default_value = "")]
    pub strip_prefix_revision: String,

    /// Match path parameter names literally instead of collapsing them
    #[arg(long)]
    pub include_path_params: bool,

    /// Regular expression; only matching paths take part in the comparison
    #[arg(long, short = 'p')]
    pub match_path: Option<String>,

    /// Merge allOf members into their parent before schema comparison
    #[arg(long)]
    pub flatten_allof: bool,

    /// Elements excluded from comparison
    /// (examples, description, title, summary, extensions)
    #[arg(long, value_delimiter = ',')]
    pub exclude_elements: Vec<String>,

    /// Regular expression of extension keys excluded from comparison
    #[arg(long)]
    pub exclude_extensions: Option<String>,

    /// Bound on circular schema reference traversal
    #[arg(long, default_value_t = DEFAULT_MAX_CIRCULAR_REFS)]
    pub max_circular_refs: u32,
}

impl DiffFlags {
    pub fn to_config(&self, breaking_only: bool) -> Result<DiffConfig> {
        let mut exclude_elements = Vec::new();
        for name in &self.exclude_elements {
            let element = name
                .parse::<ExcludeElement>()
                .map_err(|e| anyhow!("invalid --exclude-elements: {e}"))?;
            exclude_elements.push(element);
        }
        let exclude_extensions_pattern = self
            .exclude_extensions
            .as_deref()
            .map(Regex::new)
            .transpose()
            .context("invalid --exclude-extensions pattern")?;
        let match_path = self
            .match_path
            .as_deref()
            .map(Regex::new)
            .transpose()
            .context("invalid --match-path pattern")?;

        Ok(DiffConfig {
            breaking_only,
            exclude_elements,
            prefix_base: self.prefix_base.clone(),
            prefix_revision: self.prefix_revision.clone(),
            strip_prefix_base: self.strip_prefix_base.clone(),
            strip_prefix_revision: self.strip_prefix_revision.clone(),
            include_path_params: self.include_path_params,
            match_path,
            flatten_allof: self.flatten_allof,
            exclude_extensions_pattern,
            max_circular_refs: self.max_circular_refs,
        })
    }
}

/// Flags mapped onto `CheckConfig` and the suppression files.
#[derive(Debug, Args)]
pub struct CheckFlags {
    /// Optional rule ids to activate in addition to the required baseline
    #[arg(long = "include-checks", value_delimiter = ',')]
    pub include_checks: Vec<String>,

    /// Minimum days between deprecation and sunset for beta endpoints
    #[arg(long, default_value_t = specgate_checker::DEFAULT_BETA_DEPRECATION_DAYS)]
    pub deprecation_days_beta: i64,

    /// Minimum days between deprecation and sunset for stable endpoints
    #[arg(long, default_value_t = specgate_checker::DEFAULT_STABLE_DEPRECATION_DAYS)]
    pub deprecation_days_stable: i64,

    /// Language tag for record text
    #[arg(long, default_value = "en")]
    pub lang: String,

    /// YAML file of accepted WARN-level changes
    #[arg(long)]
    pub warn_ignore: Option<PathBuf>,

    /// YAML file of accepted ERR-level changes
    #[arg(long)]
    pub err_ignore: Option<PathBuf>,
}

impl CheckFlags {
    pub fn to_config(&self) -> Result<CheckConfig> {
        let localizer = localizer_for(&self.lang)
            .ok_or_else(|| anyhow!("unsupported language tag '{}'", self.lang))?;
        Ok(CheckConfig {
            localizer,
            include_checks: self.include_checks.clone(),
            beta_deprecation_days: self.deprecation_days_beta,
            stable_deprecation_days: self.deprecation_days_stable,
            today: None,
        })
    }

    pub fn load_ignores(&self) -> Result<(IgnoreList, IgnoreList)> {
        let warn = match &self.warn_ignore {
            Some(path) => IgnoreList::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => IgnoreList::default(),
        };
        let err = match &self.err_ignore {
            Some(path) => IgnoreList::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => IgnoreList::default(),
        };
        Ok((warn, err))
    }
}

/// Load one side of the comparison.
///
/// In composed mode the argument is a glob pattern and every match is
/// loaded; otherwise it is a single document path.
pub fn load_documents(pattern: &str, composed: bool) -> Result<Vec<Spec>> {
    if !composed {
        let spec = Spec::from_file(pattern)?;
        return Ok(vec![spec]);
    }

    let mut specs = Vec::new();
    let matches =
        glob::glob(pattern).with_context(|| format!("invalid glob pattern '{pattern}'"))?;
    for entry in matches {
        let path = entry.context("unreadable glob match")?;
        specs.push(Spec::from_file(&path)?);
    }
    if specs.is_empty() {
        bail!("no documents match '{pattern}'");
    }
    Ok(specs)
}

/// Render a record sequence in the requested format.
///
/// Text output is markdown-compatible and grouped by level, highest first.
pub fn render_changes(changes: &Changes, format: Format) -> Result<String> {
    Ok(match format {
        Format::Yaml => serde_yaml::to_string(changes)?,
        Format::Json => serde_json::to_string_pretty(changes)?,
        Format::Text => text_changes(changes),
    })
}

fn count_level(changes: &Changes, level: Level) -> usize {
    changes.iter().filter(|c| c.level == level).count()
}

fn text_record(record: &Change) -> String {
    let mut line = format!("- **[{}]**", record.id);
    if !record.operation.is_empty() {
        line.push_str(&format!(" {} {}", record.operation, record.path));
    } else if !record.path.is_empty() {
        line.push_str(&format!(" {}", record.path));
    }
    line.push_str(&format!(": {}", record.text));
    if !record.source.is_empty() {
        line.push_str(&format!(" ({})", record.source));
    }
    line
}

fn text_changes(changes: &Changes) -> String {
    let mut out = format!(
        "{} changes: {} error, {} warning, {} info\n",
        changes.len(),
        count_level(changes, Level::Err),
        count_level(changes, Level::Warn),
        count_level(changes, Level::Info),
    );
    for level in [Level::Err, Level::Warn, Level::Info] {
        let records: Vec<&Change> = changes.iter().filter(|c| c.level == level).collect();
        if records.is_empty() {
            continue;
        }
        out.push_str(&format!("\n## {level}\n\n"));
        for record in records {
            out.push_str(&text_record(record));
            out.push('\n');
        }
    }
    out
}

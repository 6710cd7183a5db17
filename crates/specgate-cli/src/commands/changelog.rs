//! Per-change changelog command.

use anyhow::Result;
use clap::Args;
use tracing::warn;

use specgate_checker::{apply_ignores, changelog, Changes, Level};
use specgate_diff::compare_composed;

use super::common::{load_documents, render_changes, CheckFlags, DiffFlags, Format};

#[derive(Debug, Args)]
pub struct ChangelogArgs {
    /// Base document path, or glob pattern with --composed
    pub base: String,

    /// Revision document path, or glob pattern with --composed
    pub revision: String,

    #[command(flatten)]
    pub diff_flags: DiffFlags,

    #[command(flatten)]
    pub check_flags: CheckFlags,

    /// Exit with status 1 when a record at this level or above survives
    #[arg(long)]
    pub fail_on: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

pub fn execute(args: ChangelogArgs) -> Result<bool> {
    let fail_on: Option<Level> = args.fail_on.as_deref().map(str::parse).transpose()?;
    let diff_config = args.diff_flags.to_config(false)?;
    let check_config = args.check_flags.to_config()?;
    let (warn_ignores, err_ignores) = args.check_flags.load_ignores()?;

    let bases = load_documents(&args.base, args.diff_flags.composed)?;
    let revisions = load_documents(&args.revision, args.diff_flags.composed)?;
    let (diff, sources) = compare_composed(&bases, &revisions, &diff_config)?;

    let (records, gaps) = changelog(&check_config, &diff, &sources);
    for gap in &gaps {
        warn!(
            path = %gap.path,
            operation = %gap.operation,
            element = %gap.element,
            "change not covered by any rule"
        );
    }

    let (kept, unmatched) = apply_ignores(records.0, &warn_ignores, &err_ignores);
    for entry in &unmatched {
        warn!(
            id = %entry.id,
            path = %entry.entry.path,
            operation = %entry.entry.operation,
            "ignore entry matched no record"
        );
    }
    let changes = Changes::new(kept);

    print!("{}", render_changes(&changes, args.format)?);

    Ok(fail_on.is_some_and(|level| changes.has_level_or_higher(level)))
}

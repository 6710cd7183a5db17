//! Breaking-change gate command.

use anyhow::Result;
use clap::Args;
use tracing::warn;

use specgate_checker::{apply_ignores, check_until_level, Changes, Level};
use specgate_diff::compare_composed;

use super::common::{load_documents, render_changes, CheckFlags, DiffFlags, Format};

#[derive(Debug, Args)]
pub struct BreakingArgs {
    /// Base document path, or glob pattern with --composed
    pub base: String,

    /// Revision document path, or glob pattern with --composed
    pub revision: String,

    #[command(flatten)]
    pub diff_flags: DiffFlags,

    #[command(flatten)]
    pub check_flags: CheckFlags,

    /// Exit with status 1 when a record at this level or above survives
    #[arg(long, default_value = "err")]
    pub fail_on: String,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

pub fn execute(args: BreakingArgs) -> Result<bool> {
    // Configuration errors surface before any comparison runs
    let fail_on: Level = args.fail_on.parse()?;
    let diff_config = args.diff_flags.to_config(true)?;
    let check_config = args.check_flags.to_config()?;
    let (warn_ignores, err_ignores) = args.check_flags.load_ignores()?;

    let bases = load_documents(&args.base, args.diff_flags.composed)?;
    let revisions = load_documents(&args.revision, args.diff_flags.composed)?;
    let (diff, sources) = compare_composed(&bases, &revisions, &diff_config)?;

    let records = check_until_level(&check_config, &diff, &sources, Level::Warn);
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

    Ok(changes.has_level_or_higher(fail_on))
}

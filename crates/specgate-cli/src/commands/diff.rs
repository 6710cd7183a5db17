//! Structural diff command.

use anyhow::Result;
use clap::Args;

use specgate_diff::{compare_composed, Diff};

use super::common::{load_documents, DiffFlags, Format};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Base document path, or glob pattern with --composed
    pub base: String,

    /// Revision document path, or glob pattern with --composed
    pub revision: String,

    #[command(flatten)]
    pub diff_flags: DiffFlags,

    #[arg(long, value_enum, default_value_t = Format::Yaml)]
    pub format: Format,

    /// Exit with status 1 when any difference is found
    #[arg(long)]
    pub fail_on_diff: bool,
}

pub fn execute(args: DiffArgs) -> Result<bool> {
    let config = args.diff_flags.to_config(false)?;
    let bases = load_documents(&args.base, args.diff_flags.composed)?;
    let revisions = load_documents(&args.revision, args.diff_flags.composed)?;

    let (diff, _sources) = compare_composed(&bases, &revisions, &config)?;

    match args.format {
        Format::Yaml => print!("{}", serde_yaml::to_string(&diff)?),
        Format::Json => println!("{}", serde_json::to_string_pretty(&diff)?),
        Format::Text => print!("{}", text_summary(&diff)),
    }

    Ok(args.fail_on_diff && !diff.is_empty())
}

fn text_summary(diff: &Diff) -> String {
    if diff.is_empty() {
        return "no changes\n".to_string();
    }
    let mut out = String::new();
    if let Some(paths) = &diff.paths {
        for path in &paths.added {
            out.push_str(&format!("+ {path}\n"));
        }
        for path in &paths.deleted {
            out.push_str(&format!("- {path}\n"));
        }
        for path in paths.modified.keys() {
            out.push_str(&format!("~ {path}\n"));
        }
    }
    if diff.info.is_some() {
        out.push_str("~ info\n");
    }
    if diff.spec_version.is_some() {
        out.push_str("~ openapi version\n");
    }
    if diff.security.is_some() {
        out.push_str("~ security\n");
    }
    if diff.servers.is_some() {
        out.push_str("~ servers\n");
    }
    if diff.extensions.is_some() {
        out.push_str("~ extensions\n");
    }
    out
}

//! List the rule catalog.

use anyhow::Result;
use clap::Args;

use specgate_checker::{checks, optional_checks};

use super::common::Format;

#[derive(Debug, Args)]
pub struct ChecksArgs {
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

pub fn execute(args: ChecksArgs) -> Result<bool> {
    let required = checks();
    let optional = optional_checks();

    match args.format {
        Format::Json => {
            let listing = serde_json::json!({
                "required": required,
                "optional": optional,
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        Format::Yaml => {
            let listing = serde_json::json!({
                "required": required,
                "optional": optional,
            });
            print!("{}", serde_yaml::to_string(&listing)?);
        }
        Format::Text => {
            println!("required checks:");
            for id in &required {
                println!("  {id}");
            }
            println!("\noptional checks (enable with --include-checks):");
            for id in &optional {
                println!("  {id}");
            }
        }
    }

    Ok(false)
}

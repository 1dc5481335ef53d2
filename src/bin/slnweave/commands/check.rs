//! `slnweave check` command

use anyhow::{Context, Result};

use super::GlobalArgs;
use crate::cli::{CheckArgs, OutputFormat};
use slnweave::util::diagnostic::emit;

pub fn execute(args: CheckArgs, global: &GlobalArgs) -> Result<i32> {
    let mut config = super::load(global)?;
    super::apply_scan_args(&mut config, args.scan);

    let analysis = super::analyze(&config)?;
    let report = &analysis.report;

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            let color = global.stderr_color();
            for diagnostic in report.diagnostics() {
                emit(&diagnostic, color);
            }
            super::warn_if_empty(&config, report);
            println!(
                "Checked {} projects against {} precompiled libraries ({} configuration): {}",
                report.projects,
                report.libraries,
                report.configuration,
                if report.is_clean() {
                    "no problems".to_string()
                } else {
                    format!("{} problems", report.problem_count())
                }
            );
        }
    }

    Ok(if report.is_clean() { 0 } else { 1 })
}

//! `slnweave generate` command

use anyhow::{Context, Result};

use super::GlobalArgs;
use crate::cli::GenerateArgs;
use slnweave::ops::{write_build_file, BuildFileOptions};
use slnweave::util::diagnostic::emit;
use slnweave::util::fs::absolute;

pub fn execute(args: GenerateArgs, global: &GlobalArgs) -> Result<i32> {
    let mut config = super::load(global)?;
    super::apply_scan_args(&mut config, args.scan);

    let output = args.output.unwrap_or_else(|| config.output());
    let output = absolute(&output)
        .with_context(|| format!("cannot resolve output path {}", output.display()))?;

    let analysis = super::analyze(&config)?;
    let report = &analysis.report;

    let color = global.stderr_color();
    for diagnostic in report.diagnostics() {
        emit(&diagnostic, color);
    }
    super::warn_if_empty(&config, report);

    write_build_file(
        &analysis.workspace,
        &analysis.resolve,
        &BuildFileOptions {
            output: output.clone(),
        },
    )?;
    println!(
        "Wrote {} ({} projects, {} configuration)",
        output.display(),
        report.projects,
        report.configuration
    );

    if args.strict && !report.is_clean() {
        eprintln!("error: {} problems found", report.problem_count());
        return Ok(1);
    }
    Ok(0)
}

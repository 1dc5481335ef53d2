//! `slnweave tree` command

use anyhow::Result;

use super::GlobalArgs;
use crate::cli::TreeArgs;
use slnweave::ops::Analysis;
use slnweave::resolver::Resolution;
use slnweave::util::diagnostic::suggestions;

pub fn execute(args: TreeArgs, global: &GlobalArgs) -> Result<i32> {
    let mut config = super::load(global)?;
    super::apply_scan_args(&mut config, args.scan);

    let analysis = super::analyze(&config)?;
    print!("{}", render(&analysis));

    let report = &analysis.report;
    super::warn_if_empty(&config, report);
    if !report.is_clean() {
        eprintln!("warning: {} problems found", report.problem_count());
        eprintln!("{}", suggestions::RUN_CHECK);
    }
    Ok(0)
}

/// One block per project: the project, then one line per reference.
fn render(analysis: &Analysis) -> String {
    let ws = &analysis.workspace;
    let mut out = String::new();

    for (idx, project) in ws.iter() {
        out.push_str(&format!("{} ({})\n", project.name(), project.path().display()));

        let references = project.references();
        let resolutions = analysis.resolve.for_project(idx);
        for (i, (reference, resolution)) in references.iter().zip(resolutions).enumerate() {
            let branch = if i + 1 == references.len() { "└── " } else { "├── " };
            let target = match resolution {
                Resolution::Project(target) => format!("-> {}", ws.project(*target).name()),
                Resolution::Precompiled => "(precompiled)".to_string(),
                Resolution::Unresolved => "(unresolved)".to_string(),
            };
            out.push_str(&format!("{}{} {}\n", branch, reference.name(), target));
        }
    }

    out
}

//! Scan-and-resolve runs.

use crate::core::{Configuration, Diagnostics, ProjectLoader, Report, Workspace};
use crate::ops::scan::{scan_workspace, ScanOptions};
use crate::resolver::{self, ProjectGraph, Resolve};
use crate::scan::ScanError;
use crate::util::Config;

/// Options for a full run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub scan: ScanOptions,
    /// Configuration whose outputs resolve library references.
    pub configuration: Configuration,
}

impl RunOptions {
    pub fn from_config(config: &Config) -> Self {
        RunOptions {
            scan: ScanOptions::from_config(config),
            configuration: config.configuration(),
        }
    }
}

/// Everything one run produced.
#[derive(Debug)]
pub struct Analysis {
    pub workspace: Workspace,
    pub resolve: Resolve,
    pub report: Report,
}

impl Analysis {
    /// The one-hop project graph of this run.
    pub fn graph(&self) -> ProjectGraph {
        ProjectGraph::build(&self.workspace, &self.resolve)
    }
}

/// Resolve every reference in an already scanned workspace.
pub fn resolve_workspace(
    ws: &Workspace,
    configuration: Configuration,
    diagnostics: &mut Diagnostics,
) -> Resolve {
    resolver::resolve(ws.projects(), ws.libraries(), configuration, diagnostics)
}

/// Scan, load, and resolve from scratch.
///
/// Nothing is carried over between calls; running twice on an unchanged
/// tree gives the same result. A completed run may still carry problems in
/// its [`Report`].
pub fn run(opts: &RunOptions, loader: &dyn ProjectLoader) -> Result<Analysis, ScanError> {
    let mut diagnostics = Diagnostics::new();
    let workspace = scan_workspace(&opts.scan, loader, &mut diagnostics)?;
    let resolve = resolve_workspace(&workspace, opts.configuration, &mut diagnostics);
    let report = Report::new(&workspace, opts.configuration, diagnostics);

    if report.is_clean() {
        tracing::info!("No problems found");
    } else {
        tracing::warn!("Found {} problems", report.problem_count());
    }

    Ok(Analysis {
        workspace,
        resolve,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use crate::core::{Issue, MsBuildReader, Project, ProjectIdx, Reference};
    use crate::resolver::Resolution;
    use crate::test_support::{guid, temp_dir, write_file, write_project, CsprojFixture, MockLoader};

    fn opts(root: &Path, libs: Option<&Path>, configuration: Configuration) -> RunOptions {
        RunOptions {
            scan: ScanOptions {
                source_paths: vec![root.to_path_buf()],
                precompiled_paths: libs.map(Path::to_path_buf).into_iter().collect(),
                ..Default::default()
            },
            configuration,
        }
    }

    #[test]
    fn test_duplicate_identity_scenario() {
        let tmp = temp_dir();
        let root = tmp.path();
        let p1 = write_file(root, "P1/P1.csproj", "");
        let p2 = write_file(root, "P2/P2.csproj", "");
        let p3 = write_file(root, "P3/P3.csproj", "");

        let loader = MockLoader::new()
            .with_project(
                Project::new(guid(1), &p1)
                    .with_output(Configuration::Release, "/out/P1.dll")
                    .with_reference(Reference::project("P2", guid(2))),
            )
            .with_project(Project::new(guid(2), &p2).with_output(Configuration::Release, "/out/P2.dll"))
            .with_project(Project::new(guid(1), &p3).with_output(Configuration::Release, "/out/P3.dll"));

        let analysis = run(&opts(root, None, Configuration::Release), &loader).unwrap();

        let dups = &analysis.report.duplicate_identities;
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].guid, guid(1));
        assert_eq!(dups[0].projects, vec![p1.clone(), p3.clone()]);

        assert_eq!(
            analysis.resolve.get(ProjectIdx(0), 0),
            Some(Resolution::Project(ProjectIdx(1)))
        );
        assert!(!analysis
            .report
            .issues
            .iter()
            .any(|i| matches!(i, Issue::UnresolvedLibrary { .. } | Issue::UnresolvedProject { .. })));
    }

    #[test]
    fn test_project_output_beats_precompiled_library() {
        let tmp = temp_dir();
        let root = tmp.path();
        let libs = root.join("libs");
        let acme = write_file(root, "libs/Acme.dll", "");
        let q = write_file(root, "src/Q/Q.csproj", "");
        let app = write_file(root, "src/App/App.csproj", "");

        let loader = MockLoader::new()
            .with_project(Project::new(guid(1), &q).with_output(Configuration::Debug, &acme))
            .with_project(
                Project::new(guid(2), &app)
                    .with_output(Configuration::Debug, root.join("out/App.exe"))
                    .with_reference(Reference::library("Acme", &acme)),
            );

        let analysis = run(&opts(&root.join("src"), Some(&libs), Configuration::Debug), &loader).unwrap();

        let app_idx = analysis.workspace.find_by_path(&app).unwrap();
        let q_idx = analysis.workspace.find_by_path(&q).unwrap();
        assert_eq!(analysis.resolve.get(app_idx, 0), Some(Resolution::Project(q_idx)));
        assert!(analysis.report.is_clean());
    }

    #[test]
    fn test_failed_project_is_reported_and_its_references_unresolved() {
        let tmp = temp_dir();
        let root = tmp.path();
        let good = write_file(root, "Good/Good.csproj", "");
        let bad = write_file(root, "Bad/Bad.csproj", "");

        let loader = MockLoader::new()
            .with_project(
                Project::new(guid(1), &good)
                    .with_reference(Reference::project("Bad", guid(2)))
                    .with_reference(Reference::library("Bad", root.join("Bad/bin/Debug/Bad.dll"))),
            )
            .with_failure(&bad, "root element is missing");

        let analysis = run(&opts(root, None, Configuration::Debug), &loader).unwrap();
        let report = &analysis.report;

        assert_eq!(analysis.workspace.len(), 1);
        assert_eq!(report.failed_projects.len(), 1);
        assert_eq!(report.failed_projects[0].path, bad);
        assert!(report.failed_projects[0].message.contains("root element is missing"));
        assert_eq!(analysis.resolve.unresolved_count(), 2);
        assert!(matches!(report.issues[0], Issue::UnresolvedProject { .. }));
        assert!(matches!(report.issues[1], Issue::UnresolvedLibrary { .. }));
        assert!(!report.is_clean());
        assert_eq!(report.problem_count(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_release_run_resolves_against_release_outputs() {
        let tmp = temp_dir();
        let root = tmp.path();
        write_project(
            root,
            "src/Core/Core.csproj",
            &CsprojFixture::new("{11111111-1111-4111-8111-111111111111}")
                .output_paths(r"..\..\out\Debug\", r"..\..\out\Release\"),
        );
        write_project(
            root,
            "src/App/App.csproj",
            &CsprojFixture::new("{22222222-2222-4222-8222-222222222222}")
                .output_type("Exe")
                .hint_reference("Core", r"..\..\out\Release\Core.dll"),
        );

        let release = run(&opts(root, None, Configuration::Release), &MsBuildReader::new()).unwrap();
        let app = release
            .workspace
            .find_by_path(&root.join("src/App/App.csproj"))
            .unwrap();
        let core = release
            .workspace
            .find_by_path(&root.join("src/Core/Core.csproj"))
            .unwrap();
        assert_eq!(release.resolve.get(app, 0), Some(Resolution::Project(core)));
        assert!(release.report.is_clean());

        let debug = run(&opts(root, None, Configuration::Debug), &MsBuildReader::new()).unwrap();
        assert_eq!(debug.resolve.get(app, 0), Some(Resolution::Unresolved));
        assert_eq!(debug.report.issues.len(), 1);
    }

    #[test]
    fn test_run_is_idempotent() {
        let tmp = temp_dir();
        let root = tmp.path();
        write_project(
            root,
            "Core/Core.csproj",
            &CsprojFixture::new("{33333333-3333-4333-8333-333333333333}"),
        );
        write_project(
            root,
            "App/App.csproj",
            &CsprojFixture::new("{44444444-4444-4444-8444-444444444444}")
                .project_reference(r"..\Core\Core.csproj", "{33333333-3333-4333-8333-333333333333}", None)
                .hint_reference("Missing", r"..\lib\Missing.dll"),
        );

        let o = opts(root, None, Configuration::Debug);
        let first = run(&o, &MsBuildReader::new()).unwrap();
        let second = run(&o, &MsBuildReader::new()).unwrap();

        let paths = |a: &Analysis| -> Vec<_> {
            a.workspace.projects().iter().map(|p| p.path().to_path_buf()).collect()
        };
        assert_eq!(paths(&first), paths(&second));
        assert_eq!(
            first.resolve.iter().collect::<Vec<_>>(),
            second.resolve.iter().collect::<Vec<_>>()
        );
        assert_eq!(first.report.issues, second.report.issues);
        assert_eq!(first.graph().edge_count(), 1);
    }

    #[test]
    fn test_overlapping_source_roots_stay_clean() {
        let tmp = temp_dir();
        let root = tmp.path();
        write_project(
            root,
            "src/App/App.csproj",
            &CsprojFixture::new("{55555555-5555-4555-8555-555555555555}"),
        );

        let mut o = opts(&root.join("src"), None, Configuration::Debug);
        o.scan.source_paths.push(root.join("src/App"));
        let analysis = run(&o, &MsBuildReader::new()).unwrap();

        assert_eq!(analysis.workspace.len(), 1);
        assert!(analysis.report.duplicate_identities.is_empty());
        assert!(analysis.report.is_clean());
    }
}

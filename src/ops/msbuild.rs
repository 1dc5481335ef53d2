//! Writing the consolidated MSBuild build file.
//!
//! One target per loaded project, depending on the targets of the projects
//! its references resolved to. MSBuild works out the build order from
//! `DependsOnTargets`; nothing here sorts the graph.

use std::collections::HashSet;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::core::{Configuration, ProjectIdx, Workspace};
use crate::resolver::{ProjectGraph, Resolve};
use crate::util::fs::{relative_path, write_bytes};

const MSBUILD_NAMESPACE: &str = "http://schemas.microsoft.com/developer/msbuild/2003";
const DEFAULT_TARGET: &str = "Build";
const TOOLS_VERSION: &str = "3.5";

/// Options for writing the build file.
#[derive(Debug, Clone)]
pub struct BuildFileOptions {
    /// Where the build file goes; project paths are written relative to its
    /// directory.
    pub output: PathBuf,
}

/// Render and write the build file for a resolved workspace.
pub fn write_build_file(ws: &Workspace, resolve: &Resolve, opts: &BuildFileOptions) -> Result<()> {
    let base = opts.output.parent().unwrap_or(Path::new(""));
    let xml = render_build_file(ws, resolve, base)?;
    write_bytes(&opts.output, xml.as_bytes())?;

    tracing::info!(
        "Wrote {} project targets to {}",
        ws.len(),
        opts.output.display()
    );
    Ok(())
}

/// Render the build file as a string; project paths are made relative to `base`.
pub fn render_build_file(ws: &Workspace, resolve: &Resolve, base: &Path) -> Result<String> {
    let graph = ProjectGraph::build(ws, resolve);
    let targets = target_names(ws);

    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .context("failed to write XML declaration")?;

    let mut root = BytesStart::new("Project");
    root.push_attribute(("ToolsVersion", TOOLS_VERSION));
    root.push_attribute(("DefaultTargets", DEFAULT_TARGET));
    root.push_attribute(("xmlns", MSBUILD_NAMESPACE));
    writer.write_event(Event::Start(root))?;

    write_properties(&mut writer, resolve.configuration())?;

    for (idx, project) in ws.iter() {
        let depends: Vec<&str> = graph
            .dependencies(idx)
            .into_iter()
            .map(|dep| targets[dep.0].as_str())
            .collect();

        let mut target = BytesStart::new("Target");
        target.push_attribute(("Name", targets[idx.0].as_str()));
        if !depends.is_empty() {
            target.push_attribute(("DependsOnTargets", depends.join(";").as_str()));
        }
        writer.write_event(Event::Start(target))?;

        let file = relative_path(base, project.path());
        let mut task = BytesStart::new("MSBuild");
        task.push_attribute(("Projects", msbuild_text(&file).as_str()));
        task.push_attribute(("Properties", "Configuration=$(Configuration)"));
        writer.write_event(Event::Empty(task))?;

        writer.write_event(Event::End(BytesEnd::new("Target")))?;
    }

    let all: Vec<&str> = targets.iter().map(String::as_str).collect();
    let mut build = BytesStart::new("Target");
    build.push_attribute(("Name", DEFAULT_TARGET));
    build.push_attribute(("DependsOnTargets", all.join(";").as_str()));
    writer.write_event(Event::Empty(build))?;

    writer.write_event(Event::End(BytesEnd::new("Project")))?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).context("build file is not valid UTF-8")
}

fn write_properties(writer: &mut Writer<Cursor<Vec<u8>>>, configuration: Configuration) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("PropertyGroup")))?;

    let mut element = BytesStart::new("Configuration");
    // Raw bytes: the escaping tuple form would turn the quotes into `&apos;`.
    element.push_attribute((b"Condition".as_slice(), b" '$(Configuration)' == '' ".as_slice()));
    writer.write_event(Event::Start(element))?;
    writer.write_event(Event::Text(BytesText::new(configuration.msbuild_name())))?;
    writer.write_event(Event::End(BytesEnd::new("Configuration")))?;

    writer.write_event(Event::End(BytesEnd::new("PropertyGroup")))?;
    Ok(())
}

/// One target name per project, in project order.
///
/// Names are the display name restricted to `[A-Za-z0-9_]`; collisions get
/// a numeric suffix. `Build` is reserved for the default target.
fn target_names(ws: &Workspace) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    taken.insert(DEFAULT_TARGET.to_lowercase());

    ws.iter()
        .map(|(idx, project)| {
            let base = sanitize(project.name(), idx);
            let mut name = base.clone();
            let mut n = 2;
            while !taken.insert(name.to_lowercase()) {
                name = format!("{}_{}", base, n);
                n += 1;
            }
            name
        })
        .collect()
}

fn sanitize(name: &str, idx: ProjectIdx) -> String {
    let mut out: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if out.is_empty() {
        out = format!("Project{}", idx.0);
    } else if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// MSBuild spells paths with backslashes.
fn msbuild_text(path: &Path) -> String {
    path.to_string_lossy().replace('/', "\\")
}

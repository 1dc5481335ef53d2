//! Project file fixtures.
//!
//! Builders for classic MSBuild project files and helpers that lay them
//! out on disk for scanner and end-to-end tests.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Builder for a classic `.csproj` document.
#[derive(Debug, Clone)]
pub struct CsprojFixture {
    guid: String,
    assembly_name: Option<String>,
    output_type: Option<String>,
    output_paths: Option<(String, String)>,
    references: Vec<String>,
    project_references: Vec<String>,
}

impl CsprojFixture {
    pub fn new(guid: impl Into<String>) -> Self {
        CsprojFixture {
            guid: guid.into(),
            assembly_name: None,
            output_type: None,
            output_paths: None,
            references: Vec::new(),
            project_references: Vec::new(),
        }
    }

    pub fn assembly_name(mut self, name: &str) -> Self {
        self.assembly_name = Some(name.to_string());
        self
    }

    pub fn output_type(mut self, output_type: &str) -> Self {
        self.output_type = Some(output_type.to_string());
        self
    }

    /// `OutputPath` for the Debug and Release property groups.
    pub fn output_paths(mut self, debug: &str, release: &str) -> Self {
        self.output_paths = Some((debug.to_string(), release.to_string()));
        self
    }

    /// A `<Reference>` with a `<HintPath>`.
    pub fn hint_reference(mut self, include: &str, hint_path: &str) -> Self {
        self.references.push(format!(
            "    <Reference Include=\"{include}\">\n      <SpecificVersion>False</SpecificVersion>\n      <HintPath>{hint_path}</HintPath>\n    </Reference>\n"
        ));
        self
    }

    /// A `<Reference>` to a framework assembly (no `<HintPath>`).
    pub fn framework_reference(mut self, include: &str) -> Self {
        self.references
            .push(format!("    <Reference Include=\"{include}\" />\n"));
        self
    }

    pub fn project_reference(mut self, include: &str, guid: &str, name: Option<&str>) -> Self {
        let mut item = format!(
            "    <ProjectReference Include=\"{include}\">\n      <Project>{guid}</Project>\n"
        );
        if let Some(name) = name {
            let _ = writeln!(item, "      <Name>{name}</Name>");
        }
        item.push_str("    </ProjectReference>\n");
        self.project_references.push(item);
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        out.push_str(
            "<Project ToolsVersion=\"3.5\" DefaultTargets=\"Build\" xmlns=\"http://schemas.microsoft.com/developer/msbuild/2003\">\n",
        );

        out.push_str("  <PropertyGroup>\n");
        out.push_str(
            "    <Configuration Condition=\" '$(Configuration)' == '' \">Debug</Configuration>\n",
        );
        let _ = writeln!(out, "    <ProjectGuid>{}</ProjectGuid>", self.guid);
        if let Some(output_type) = &self.output_type {
            let _ = writeln!(out, "    <OutputType>{output_type}</OutputType>");
        }
        if let Some(name) = &self.assembly_name {
            let _ = writeln!(out, "    <AssemblyName>{name}</AssemblyName>");
        }
        out.push_str("  </PropertyGroup>\n");

        for (configuration, output_path) in [
            ("Debug", self.output_paths.as_ref().map(|(d, _)| d)),
            ("Release", self.output_paths.as_ref().map(|(_, r)| r)),
        ] {
            let _ = writeln!(
                out,
                "  <PropertyGroup Condition=\" '$(Configuration)|$(Platform)' == '{configuration}|AnyCPU' \">"
            );
            if let Some(output_path) = output_path {
                let _ = writeln!(out, "    <OutputPath>{output_path}</OutputPath>");
            }
            out.push_str("    <WarningLevel>4</WarningLevel>\n");
            out.push_str("  </PropertyGroup>\n");
        }

        if !self.references.is_empty() {
            out.push_str("  <ItemGroup>\n");
            self.references.iter().for_each(|r| out.push_str(r));
            out.push_str("  </ItemGroup>\n");
        }
        out.push_str("  <ItemGroup>\n    <Compile Include=\"Class1.cs\" />\n  </ItemGroup>\n");
        if !self.project_references.is_empty() {
            out.push_str("  <ItemGroup>\n");
            self.project_references.iter().for_each(|r| out.push_str(r));
            out.push_str("  </ItemGroup>\n");
        }

        out.push_str("  <Import Project=\"$(MSBuildBinPath)\\Microsoft.CSharp.targets\" />\n");
        out.push_str("</Project>\n");
        out
    }
}

/// Write `fixture` to `root/relative`, creating parent directories.
pub fn write_project(root: &Path, relative: &str, fixture: &CsprojFixture) -> PathBuf {
    write_file(root, relative, &fixture.render())
}

/// Write `contents` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create fixture directory");
    }
    std::fs::write(&path, contents).expect("failed to write fixture");
    path
}

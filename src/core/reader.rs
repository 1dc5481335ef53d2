//! Project file loading.
//!
//! The engine only depends on [`ProjectLoader`]; [`MsBuildReader`] is the
//! implementation for classic MSBuild project files (`.csproj`, `.vbproj`).

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use miette::Diagnostic as MietteDiagnostic;
use quick_xml::errors::IllFormedError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use regex::Regex;
use thiserror::Error;

use crate::core::{Configuration, OutputKind, Project, ProjectGuid, Reference};
use crate::util::fs::msbuild_path;

/// Default `OutputPath` values MSBuild uses when a project omits them.
const DEFAULT_DEBUG_OUTPUT: &str = r"bin\Debug\";
const DEFAULT_RELEASE_OUTPUT: &str = r"bin\Release\";

/// Matches the configuration half of a `PropertyGroup` condition such as
/// `'$(Configuration)|$(Platform)' == 'Debug|AnyCPU'`.
static CONDITION_CONFIGURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)==\s*'\s*(debug|release)\s*[|']").expect("condition pattern is valid")
});

/// Turns a project file path into a [`Project`].
pub trait ProjectLoader {
    fn load(&self, path: &Path) -> Result<Project, LoadError>;
}

/// Error loading a single project file.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    #[diagnostic(code(slnweave::load::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed XML in {}: {source}", path.display())]
    #[diagnostic(code(slnweave::load::xml))]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::Error,
    },

    #[error("{} does not declare a <ProjectGuid>", path.display())]
    #[diagnostic(
        code(slnweave::load::missing_guid),
        help("Add a <ProjectGuid> to the first <PropertyGroup> of the project file")
    )]
    MissingGuid { path: PathBuf },

    #[error("invalid GUID `{value}` in {}", path.display())]
    #[diagnostic(code(slnweave::load::invalid_guid))]
    InvalidGuid {
        path: PathBuf,
        value: String,
        #[source]
        source: uuid::Error,
    },

    #[error("project reference `{include}` in {} has no <Project> GUID", path.display())]
    #[diagnostic(
        code(slnweave::load::missing_reference_guid),
        help("Re-add the reference from the IDE so it records the referenced project's GUID")
    )]
    MissingReferenceGuid { path: PathBuf, include: String },

    #[error("invalid project file {}: {message}", path.display())]
    #[diagnostic(code(slnweave::load::invalid))]
    Invalid { path: PathBuf, message: String },
}

/// Loader for classic MSBuild project files.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsBuildReader;

impl MsBuildReader {
    pub fn new() -> Self {
        MsBuildReader
    }
}

impl ProjectLoader for MsBuildReader {
    fn load(&self, path: &Path) -> Result<Project, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse_project(path, &text)
    }
}

/// Parse the contents of the project file at `path` (which must be absolute).
pub fn parse_project(path: &Path, text: &str) -> Result<Project, LoadError> {
    let mut parser = ProjectParser::new(path);
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let xml = |source: quick_xml::Error| LoadError::Xml {
        path: path.to_path_buf(),
        source,
    };

    loop {
        match reader.read_event().map_err(xml)? {
            Event::Start(e) => {
                parser.open(&e).map_err(xml)?;
                parser.stack.push(local_name(&e));
            }
            Event::Empty(e) => {
                parser.open(&e).map_err(xml)?;
                parser.close(&local_name(&e))?;
            }
            Event::End(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                parser.stack.pop();
                parser.close(&name)?;
            }
            Event::Text(t) => {
                let value = t.unescape().map_err(xml)?;
                parser.text(value.trim());
            }
            Event::Eof => {
                if let Some(open) = parser.stack.pop() {
                    return Err(xml(IllFormedError::MissingEndTag(open).into()));
                }
                break;
            }
            _ => {}
        }
    }

    parser.finish()
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn attribute(e: &BytesStart<'_>, name: &str) -> Result<Option<String>, quick_xml::Error> {
    match e.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

/// Which configuration a `PropertyGroup` applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupScope {
    Unconditional,
    Only(Configuration),
    Other,
}

impl GroupScope {
    fn from_condition(condition: Option<&str>) -> Self {
        let Some(condition) = condition else {
            return GroupScope::Unconditional;
        };
        match CONDITION_CONFIGURATION
            .captures(condition)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<Configuration>().ok())
        {
            Some(configuration) => GroupScope::Only(configuration),
            None => GroupScope::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemKind {
    Reference,
    ProjectReference,
}

#[derive(Debug)]
struct PendingItem {
    kind: ItemKind,
    include: String,
    hint_path: Option<String>,
    project: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Default)]
struct Properties {
    guid: Option<String>,
    assembly_name: Option<String>,
    output_type: Option<String>,
    output_path: Option<String>,
    debug_output_path: Option<String>,
    release_output_path: Option<String>,
}

struct ProjectParser<'a> {
    path: &'a Path,
    dir: PathBuf,
    stack: Vec<String>,
    scope: Option<GroupScope>,
    item: Option<PendingItem>,
    props: Properties,
    references: Vec<Reference>,
}

impl<'a> ProjectParser<'a> {
    fn new(path: &'a Path) -> Self {
        ProjectParser {
            path,
            dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            stack: Vec::new(),
            scope: None,
            item: None,
            props: Properties::default(),
            references: Vec::new(),
        }
    }

    fn parent(&self) -> Option<&str> {
        self.stack.last().map(String::as_str)
    }

    fn open(&mut self, e: &BytesStart<'_>) -> Result<(), quick_xml::Error> {
        match e.local_name().as_ref() {
            b"PropertyGroup" => {
                let condition = attribute(e, "Condition")?;
                self.scope = Some(GroupScope::from_condition(condition.as_deref()));
            }
            b"Reference" | b"ProjectReference" if self.parent() == Some("ItemGroup") => {
                let kind = if e.local_name().as_ref() == b"Reference" {
                    ItemKind::Reference
                } else {
                    ItemKind::ProjectReference
                };
                self.item = Some(PendingItem {
                    kind,
                    include: attribute(e, "Include")?.unwrap_or_default(),
                    hint_path: None,
                    project: None,
                    name: None,
                });
            }
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, name: &str) -> Result<(), LoadError> {
        match name {
            "PropertyGroup" => self.scope = None,
            "Reference" | "ProjectReference" => {
                if let Some(item) = self.item.take() {
                    self.finish_item(item)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn text(&mut self, value: &str) {
        if value.is_empty() {
            return;
        }
        let Some(element) = self.stack.last().map(String::as_str) else {
            return;
        };

        if let Some(item) = self.item.as_mut() {
            let slot = match (item.kind, element) {
                (ItemKind::Reference, "HintPath") => &mut item.hint_path,
                (ItemKind::ProjectReference, "Project") => &mut item.project,
                (ItemKind::ProjectReference, "Name") => &mut item.name,
                _ => return,
            };
            *slot = Some(value.to_string());
            return;
        }

        let in_property_group = self.stack.len() >= 2
            && self.stack[self.stack.len() - 2] == "PropertyGroup";
        let Some(scope) = self.scope.filter(|_| in_property_group) else {
            return;
        };

        let props = &mut self.props;
        match (element, scope) {
            (_, GroupScope::Other) => {}
            ("ProjectGuid", _) => {
                props.guid.get_or_insert_with(|| value.to_string());
            }
            ("AssemblyName", _) => {
                props.assembly_name.get_or_insert_with(|| value.to_string());
            }
            ("OutputType", _) => {
                props.output_type.get_or_insert_with(|| value.to_string());
            }
            ("OutputPath", GroupScope::Unconditional) => {
                props.output_path = Some(value.to_string());
            }
            ("OutputPath", GroupScope::Only(Configuration::Debug)) => {
                props.debug_output_path = Some(value.to_string());
            }
            ("OutputPath", GroupScope::Only(Configuration::Release)) => {
                props.release_output_path = Some(value.to_string());
            }
            _ => {}
        }
    }

    fn finish_item(&mut self, item: PendingItem) -> Result<(), LoadError> {
        match item.kind {
            ItemKind::Reference => {
                let Some(hint_path) = item.hint_path else {
                    tracing::trace!("Skipping framework reference {}", item.include);
                    return Ok(());
                };
                let name = item
                    .include
                    .split(',')
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();
                self.references
                    .push(Reference::library(name, msbuild_path(&self.dir, &hint_path)));
            }
            ItemKind::ProjectReference => {
                let Some(raw_guid) = item.project else {
                    return Err(LoadError::MissingReferenceGuid {
                        path: self.path.to_path_buf(),
                        include: item.include,
                    });
                };
                let guid = self.parse_guid(&raw_guid)?;
                let name = item.name.unwrap_or_else(|| {
                    msbuild_path(&self.dir, &item.include)
                        .file_stem()
                        .map(|s| s.to_string_lossy().into_owned())
                        .unwrap_or(item.include)
                });
                self.references.push(Reference::project(name, guid));
            }
        }
        Ok(())
    }

    fn parse_guid(&self, value: &str) -> Result<ProjectGuid, LoadError> {
        ProjectGuid::parse(value).map_err(|source| LoadError::InvalidGuid {
            path: self.path.to_path_buf(),
            value: value.to_string(),
            source,
        })
    }

    fn finish(self) -> Result<Project, LoadError> {
        let raw_guid = self.props.guid.as_deref().ok_or_else(|| LoadError::MissingGuid {
            path: self.path.to_path_buf(),
        })?;
        let guid = self.parse_guid(raw_guid)?;

        let mut project = Project::new(guid, self.path);
        if let Some(assembly_name) = &self.props.assembly_name {
            project = project.with_assembly_name(assembly_name.clone());
        }
        if let Some(output_type) = &self.props.output_type {
            project = project.with_output_kind(OutputKind::from_output_type(output_type));
        }

        let file_name = format!(
            "{}.{}",
            project.assembly_name(),
            project.output_kind().extension()
        );
        let debug_dir = self
            .props
            .debug_output_path
            .as_deref()
            .or(self.props.output_path.as_deref())
            .unwrap_or(DEFAULT_DEBUG_OUTPUT);
        let release_dir = self
            .props
            .release_output_path
            .as_deref()
            .or(self.props.output_path.as_deref())
            .unwrap_or(DEFAULT_RELEASE_OUTPUT);

        let debug_output = msbuild_path(&self.dir, debug_dir).join(&file_name);
        let release_output = msbuild_path(&self.dir, release_dir).join(&file_name);

        Ok(project
            .with_output(Configuration::Debug, debug_output)
            .with_output(Configuration::Release, release_output)
            .with_references(self.references))
    }
}

//! Source emitters.
//!
//! Emitters render a [`ResourceBinding`] as source text. They spell every
//! identifier exactly as the binding does and make no naming decisions of
//! their own; the emitter for a binding is picked by its language.

pub mod dotnet;
pub mod nodejs;
pub mod python;

use crate::binding::ResourceBinding;
use crate::error::CodegenError;
use crate::naming::{to_camel_case, to_pascal_case, to_snake_case};
use crate::rules::Language;
use std::fs;
use std::path::{Path, PathBuf};

/// Tool name stamped into the generated-file banner by [`emit`].
pub const DEFAULT_TOOL: &str = "ironbind";

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output root.
    pub path: PathBuf,
    /// File contents.
    pub contents: String,
}

impl GeneratedFile {
    /// Creates a generated file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// Writes the file under `root`, creating parent directories.
    ///
    /// Returns the full path written.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` if a directory or the file cannot be
    /// written.
    pub fn write_to(&self, root: &Path) -> Result<PathBuf, CodegenError> {
        let target = root.join(&self.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, &self.contents)?;
        Ok(target)
    }
}

/// Renders a binding with the default banner.
#[must_use]
pub fn emit(binding: &ResourceBinding) -> GeneratedFile {
    emit_as(binding, DEFAULT_TOOL)
}

/// Renders a binding, naming `tool` in the generated-file banner.
#[must_use]
pub fn emit_as(binding: &ResourceBinding, tool: &str) -> GeneratedFile {
    let contents = match binding.language {
        Language::DotNet => dotnet::render(binding, tool),
        Language::NodeJs => nodejs::render(binding, tool),
        Language::Python => python::render(binding, tool),
    };
    GeneratedFile::new(output_path(binding), contents)
}

/// Returns the output path of a binding, relative to the output root.
///
/// Depends only on the resource type and the language: the module segment
/// of the token becomes a directory, so equally named types of different
/// modules never share a file.
#[must_use]
pub fn output_path(binding: &ResourceBinding) -> PathBuf {
    let class = binding.class_name();
    let language = binding.language;
    let (directories, file) = match language {
        Language::DotNet => (
            module_segments(&binding.token, to_pascal_case),
            format!("{class}.cs"),
        ),
        Language::NodeJs => (
            module_segments(&binding.token, to_camel_case),
            format!("{}.ts", to_camel_case(class)),
        ),
        Language::Python => (
            module_segments(&binding.token, to_snake_case),
            format!("{}.py", to_snake_case(class)),
        ),
    };
    let mut path = PathBuf::from(language.tag());
    path.extend(directories);
    path.push(file);
    path
}

/// Splits the module part of a `package:module:Type` token into cased
/// segments.
///
/// Segments are separated by `/`; segments that case to nothing are
/// dropped.
pub(crate) fn module_segments(token: &str, case: fn(&str) -> String) -> Vec<String> {
    let mut parts = token.split(':');
    let module = match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(module), Some(_)) => module,
        _ => return Vec::new(),
    };
    module
        .split('/')
        .map(case)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Returns the warning banner lines.
fn banner_lines(tool: &str) -> [String; 2] {
    [
        format!("*** WARNING: this file was generated by {tool}. ***"),
        "*** Do not edit by hand unless you're certain you know what you are doing! ***"
            .to_string(),
    ]
}

/// Renders the banner behind a line-comment marker.
pub(crate) fn banner(comment: &str, tool: &str) -> String {
    let mut output = String::new();
    for line in banner_lines(tool) {
        output.push_str(&format!("{comment} {line}\n"));
    }
    output
}

/// Returns the type name a reference token renders as.
pub(crate) fn reference_name(token: &str) -> String {
    let name = token.rsplit(':').next().unwrap_or(token);
    to_pascal_case(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::BindingBuilder;
    use crate::rules::LanguageRules;
    use ironbind_schema::{Package, PropertyDef, ResourceType, ValueShape};

    fn bind(language: Language, token: &str) -> ResourceBinding {
        let resource = ResourceType::new(token)
            .with_property(PropertyDef::new("bar", ValueShape::string()).output_only());
        let package = Package::new("example", "0.0.1").with_resource(resource.clone());
        BindingBuilder::new(&LanguageRules::preset(language))
            .build(&package, &resource)
            .expect("binding builds")
    }

    #[test]
    fn test_output_paths() {
        let token = "example::ResourceInput";
        assert_eq!(
            output_path(&bind(Language::DotNet, token)),
            PathBuf::from("dotnet/ResourceInput.cs")
        );
        assert_eq!(
            output_path(&bind(Language::NodeJs, token)),
            PathBuf::from("nodejs/resourceInput.ts")
        );
        assert_eq!(
            output_path(&bind(Language::Python, token)),
            PathBuf::from("python/resource_input.py")
        );
    }

    #[test]
    fn test_output_paths_keep_module() {
        let compute = "example:compute:Disk";
        let storage = "example:storage:Disk";
        assert_eq!(
            output_path(&bind(Language::DotNet, compute)),
            PathBuf::from("dotnet/Compute/Disk.cs")
        );
        assert_eq!(
            output_path(&bind(Language::NodeJs, compute)),
            PathBuf::from("nodejs/compute/disk.ts")
        );
        assert_eq!(
            output_path(&bind(Language::Python, storage)),
            PathBuf::from("python/storage/disk.py")
        );
        for language in Language::ALL {
            assert_ne!(
                output_path(&bind(language, compute)),
                output_path(&bind(language, storage))
            );
        }
    }

    #[test]
    fn test_module_segments() {
        assert!(module_segments("example::Widget", to_pascal_case).is_empty());
        assert_eq!(
            module_segments("example:network/v1:Subnet", to_pascal_case),
            vec!["Network", "V1"]
        );
        assert_eq!(
            module_segments("example:dataPlane:Subnet", to_snake_case),
            vec!["data_plane"]
        );
        assert!(module_segments("Widget", to_pascal_case).is_empty());
    }

    #[test]
    fn test_emit_starts_with_banner() {
        for language in Language::ALL {
            let file = emit(&bind(language, "example::ResourceInput"));
            assert!(
                file.contents
                    .contains("*** WARNING: this file was generated by ironbind. ***"),
                "{language} banner missing"
            );
        }
    }

    #[test]
    fn test_emit_is_deterministic() {
        for language in Language::ALL {
            let binding = bind(language, "example::ResourceInput");
            assert_eq!(emit(&binding), emit(&binding));
        }
    }

    #[test]
    fn test_write_to_creates_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = emit(&bind(Language::Python, "example::ResourceInput"));
        let written = file.write_to(dir.path()).expect("write succeeds");
        assert_eq!(written, dir.path().join("python/resource_input.py"));
        let contents = fs::read_to_string(&written).expect("read back");
        assert_eq!(contents, file.contents);
    }

    #[test]
    fn test_reference_name() {
        assert_eq!(reference_name("example::widget"), "Widget");
        assert_eq!(reference_name("example:net:SubnetGroup"), "SubnetGroup");
    }
}

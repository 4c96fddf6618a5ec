//! Resource binding construction.
//!
//! [`BindingBuilder`] drives the namer over one resource type in a fixed
//! order and assembles the resulting [`ResourceBinding`]:
//!
//! 1. structural members, pre-registered in a type scope so the class
//!    name never shares a spelling with one of its own members;
//! 2. the class name and args type name, in the same type scope;
//! 3. every schema property, once, in declaration order;
//! 4. entry-point parameters, in their own scope.

use crate::binding::{
    ArgsContainer, ArgsField, EntryKind, EntryPoint, FieldDefault, OutputAccessor, Parameter,
    ParameterRole, PropertyBinding, ResourceBinding,
};
use crate::error::CodegenError;
use crate::naming::{CollisionResolved, Identifier, IdentifierKind, Namer, ResolveError, Scope};
use crate::options::OptionsMergePlan;
use crate::rules::{Language, LanguageRules};
use ironbind_schema::{Package, ResourceType, SchemaError, SchemaPath, validate_resource};

/// Builds resource bindings for one target language.
#[derive(Debug, Clone, Copy)]
pub struct BindingBuilder<'a> {
    namer: Namer<'a>,
}

impl<'a> BindingBuilder<'a> {
    /// Creates a builder using the given language rules.
    #[must_use]
    pub const fn new(rules: &'a LanguageRules) -> Self {
        Self {
            namer: Namer::new(rules),
        }
    }

    /// Returns the target language.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.namer.rules().language
    }

    /// Builds the binding of `resource`, a member of `package`.
    ///
    /// # Errors
    /// Returns `CodegenError::Schema` if the resource type is malformed and
    /// `CodegenError::Naming` if the language rules cannot produce
    /// collision-free names.
    pub fn build(
        &self,
        package: &Package,
        resource: &ResourceType,
    ) -> Result<ResourceBinding, CodegenError> {
        validate_resource(&package.name, resource)?;

        let rules = self.namer.rules();
        let language = rules.language;
        let path = SchemaPath::resource(&resource.token);
        let mut collisions = Vec::new();

        tracing::debug!(token = %resource.token, %language, "building resource binding");

        let mut types = Scope::new(format!("{} types", resource.token), rules.case_equality);
        for name in &rules.structural_member_names {
            types.reserve(name);
        }
        types.reserve(&rules.lookup_method);
        if let Some(factory) = &rules.args_factory {
            types.reserve(factory);
        }

        let class_name = self.resolve(
            resource.desired_name(language.tag()),
            IdentifierKind::Type,
            &mut types,
            &path.field("token"),
            &mut collisions,
        )?;
        let args_type = self.resolve(
            &format!("{}{}", class_name.spelling, rules.args_suffix),
            IdentifierKind::Type,
            &mut types,
            &path.field("token"),
            &mut collisions,
        )?;

        let mut members = types.child(class_name.spelling.clone());

        let mut properties = Vec::with_capacity(resource.properties.len());
        for property in &resource.properties {
            let identifier = self.resolve(
                property.desired_name(language.tag()),
                IdentifierKind::Member,
                &mut members,
                &path.property(&property.name),
                &mut collisions,
            )?;
            properties.push((
                property.output_only,
                PropertyBinding {
                    schema_name: property.name.clone(),
                    identifier,
                    shape: property.shape.clone(),
                    required: property.required,
                    description: property.description.clone(),
                },
            ));
        }

        let mut parameters = Scope::new(
            format!("{} parameters", class_name.spelling),
            rules.case_equality,
        );
        let names = &rules.parameter_names;
        let param_path = path.field("parameters");
        let name_param = self.resolve(
            &names.name,
            IdentifierKind::Parameter,
            &mut parameters,
            &param_path,
            &mut collisions,
        )?;
        let args_param = self.resolve(
            &names.args,
            IdentifierKind::Parameter,
            &mut parameters,
            &param_path,
            &mut collisions,
        )?;
        let id_param = self.resolve(
            &names.id,
            IdentifierKind::Parameter,
            &mut parameters,
            &param_path,
            &mut collisions,
        )?;
        let options_param = self.resolve(
            &names.options,
            IdentifierKind::Parameter,
            &mut parameters,
            &param_path,
            &mut collisions,
        )?;

        let fields = properties
            .iter()
            .filter(|(output_only, _)| !output_only)
            .map(|(_, property)| ArgsField {
                default: if property.required {
                    FieldDefault::Required
                } else {
                    FieldDefault::Absent
                },
                property: property.clone(),
            })
            .collect();

        let outputs = properties
            .into_iter()
            .map(|(_, property)| OutputAccessor {
                property,
                deferred: true,
            })
            .collect();

        let create = EntryPoint {
            kind: EntryKind::Create,
            identifier: Identifier::verbatim(class_name.spelling.clone(), IdentifierKind::Structural),
            parameters: vec![
                param(&name_param, ParameterRole::Name, false),
                param(&args_param, ParameterRole::Args, true),
                param(&options_param, ParameterRole::Options, true),
            ],
        };
        let lookup = EntryPoint {
            kind: EntryKind::LookupExisting,
            identifier: Identifier::verbatim(rules.lookup_method.clone(), IdentifierKind::Structural),
            parameters: vec![
                param(&name_param, ParameterRole::Name, false),
                param(&id_param, ParameterRole::Id, false),
                param(&options_param, ParameterRole::Options, true),
            ],
        };

        let version = resource
            .version
            .clone()
            .unwrap_or_else(|| package.version.clone());

        tracing::debug!(
            token = %resource.token,
            %language,
            class = %class_name.spelling,
            renames = collisions.len(),
            "built resource binding"
        );

        Ok(ResourceBinding {
            language,
            package: package.name.clone(),
            token: resource.token.clone(),
            class_name,
            description: resource.description.clone(),
            args: ArgsContainer {
                type_name: args_type,
                factory: rules
                    .args_factory
                    .as_ref()
                    .map(|f| Identifier::verbatim(f.clone(), IdentifierKind::Structural)),
                fields,
            },
            outputs,
            create,
            lookup,
            options: OptionsMergePlan::new(version),
            collisions,
        })
    }

    fn resolve(
        &self,
        desired: &str,
        kind: IdentifierKind,
        scope: &mut Scope,
        path: &SchemaPath,
        collisions: &mut Vec<CollisionResolved>,
    ) -> Result<Identifier, CodegenError> {
        match self.namer.resolve(desired, kind, scope) {
            Ok(resolution) => {
                collisions.extend(resolution.collision);
                Ok(resolution.identifier)
            }
            Err(ResolveError::Unrepresentable { name }) => {
                Err(SchemaError::unrepresentable(path.clone(), name).into())
            }
            Err(ResolveError::Configuration(err)) => {
                tracing::error!(
                    language = %self.language(),
                    scope = %scope.label(),
                    error = %err,
                    "naming rules cannot produce a collision-free name"
                );
                Err(err.into())
            }
        }
    }
}

fn param(identifier: &Identifier, role: ParameterRole, optional: bool) -> Parameter {
    Parameter {
        identifier: identifier.clone(),
        role,
        optional,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NamingConfigurationError;
    use crate::rules::{CaseEquality, Disambiguation};
    use crate::naming::Collided;
    use ironbind_schema::{PropertyDef, SchemaErrorKind, ValueShape};
    use std::collections::BTreeMap;

    fn package_with(resource: ResourceType) -> Package {
        Package::new("example", "0.0.1").with_resource(resource)
    }

    fn resource_input() -> ResourceType {
        ResourceType::new("example::ResourceInput")
            .with_property(PropertyDef::new("bar", ValueShape::string()).output_only())
    }

    #[test]
    fn test_build_resource_input_dotnet() {
        let rules = LanguageRules::dotnet();
        let resource = resource_input();
        let package = package_with(resource.clone());
        let binding = BindingBuilder::new(&rules)
            .build(&package, &resource)
            .expect("binding builds");

        assert_eq!(binding.class_name(), "ResourceInput");
        assert_eq!(binding.args.type_name.spelling, "ResourceInputArgs");
        assert_eq!(
            binding.args.factory.as_ref().map(Identifier::as_str),
            Some("Empty")
        );
        assert!(binding.args.is_empty());

        assert_eq!(binding.outputs.len(), 1);
        let bar = binding.output("Bar").expect("Bar output");
        assert!(bar.deferred);
        assert_eq!(bar.property.schema_name, "bar");

        assert_eq!(binding.create.signature(), "(name, args?, options?)");
        assert_eq!(binding.lookup.signature(), "(name, id, options?)");
        assert_eq!(binding.lookup.identifier.spelling, "Get");
        assert_eq!(binding.version(), "0.0.1");
        assert!(binding.options.force_lookup_id);
        assert!(binding.collisions.is_empty());
    }

    #[test]
    fn test_build_zero_properties() {
        let rules = LanguageRules::python();
        let resource = ResourceType::new("example::Empty");
        let package = package_with(resource.clone());
        let binding = BindingBuilder::new(&rules)
            .build(&package, &resource)
            .expect("binding builds");
        assert!(binding.args.is_empty());
        assert!(binding.outputs.is_empty());
        assert_eq!(binding.create.signature(), "(resource_name, args?, opts?)");
    }

    #[test]
    fn test_build_case_insensitive_collision() {
        let rules = LanguageRules {
            disambiguation: Disambiguation::default(),
            ..LanguageRules::dotnet()
        };
        assert_eq!(rules.case_equality, CaseEquality::CaseInsensitive);
        let resource = ResourceType::new("example::Widget")
            .with_property(PropertyDef::new("size", ValueShape::string()))
            .with_property(PropertyDef::new("SIZE", ValueShape::string()));
        let package = package_with(resource.clone());
        let binding = BindingBuilder::new(&rules)
            .build(&package, &resource)
            .expect("binding builds");

        let spellings: Vec<_> = binding.outputs.iter().map(|o| o.property.spelling()).collect();
        assert_eq!(spellings, vec!["Size", "SIZE_1"]);

        assert_eq!(binding.collisions.len(), 1);
        let collision = &binding.collisions[0];
        assert_eq!(collision.original, "SIZE");
        assert!(matches!(
            &collision.collided_with,
            Collided::Identifier { origin, .. } if origin == "size"
        ));
    }

    #[test]
    fn test_build_args_field_and_output_share_spelling() {
        let rules = LanguageRules::dotnet();
        let resource = ResourceType::new("example::Widget")
            .with_property(PropertyDef::new("id", ValueShape::string()).required())
            .with_property(PropertyDef::new("tags", ValueShape::array_of(ValueShape::string())));
        let package = package_with(resource.clone());
        let binding = BindingBuilder::new(&rules)
            .build(&package, &resource)
            .expect("binding builds");

        let field = binding.args.field("ResourceId").expect("renamed id field");
        assert!(field.is_required());
        assert!(binding.output("ResourceId").is_some());
        assert_eq!(
            binding.args.field("Tags").map(|f| f.default),
            Some(FieldDefault::Absent)
        );
    }

    #[test]
    fn test_build_members_avoid_class_name() {
        let rules = LanguageRules::dotnet();
        let resource = ResourceType::new("example::Widget")
            .with_property(PropertyDef::new("widget", ValueShape::string()));
        let package = package_with(resource.clone());
        let binding = BindingBuilder::new(&rules)
            .build(&package, &resource)
            .expect("binding builds");
        assert_eq!(binding.outputs[0].property.spelling(), "Widget_1");
    }

    #[test]
    fn test_build_class_name_avoids_structural_members() {
        let rules = LanguageRules::dotnet();
        let resource = ResourceType::new("example::Get");
        let package = package_with(resource.clone());
        let binding = BindingBuilder::new(&rules)
            .build(&package, &resource)
            .expect("binding builds");

        assert_eq!(binding.lookup.identifier.spelling, "Get");
        assert_ne!(binding.class_name(), binding.lookup.identifier.spelling);
        assert_eq!(binding.class_name(), "Get_1");
        assert_eq!(binding.args.type_name.spelling, "Get_1Args");
        assert_eq!(binding.collisions.len(), 1);
        assert!(matches!(
            &binding.collisions[0].collided_with,
            Collided::Identifier { identifier_kind: IdentifierKind::Structural, .. }
        ));

        let lowered = ResourceType::new("example::empty");
        let package = package_with(lowered.clone());
        let binding = BindingBuilder::new(&rules)
            .build(&package, &lowered)
            .expect("binding builds");
        assert!(!rules.case_equality.same(binding.class_name(), "Empty"));
    }

    #[test]
    fn test_build_structural_members_are_never_taken() {
        for rules in [
            LanguageRules::dotnet(),
            LanguageRules::nodejs(),
            LanguageRules::python(),
        ] {
            let mut resource = ResourceType::new("example::Widget");
            for name in &rules.structural_member_names {
                resource.add_property(PropertyDef::new(name.clone(), ValueShape::string()));
            }
            let package = package_with(resource.clone());
            let binding = BindingBuilder::new(&rules)
                .build(&package, &resource)
                .expect("binding builds");

            for output in &binding.outputs {
                let spelling = output.property.spelling();
                assert!(
                    !rules
                        .structural_member_names
                        .iter()
                        .any(|s| rules.case_equality.same(s, spelling)),
                    "{} kept structural spelling {spelling}",
                    rules.language
                );
            }
        }
    }

    #[test]
    fn test_build_outputs_pairwise_distinct() {
        let rules = LanguageRules::dotnet();
        let resource = ResourceType::new("example::Widget")
            .with_property(PropertyDef::new("id", ValueShape::string()))
            .with_property(PropertyDef::new("Id", ValueShape::string()))
            .with_property(PropertyDef::new("resource_id", ValueShape::string()))
            .with_property(PropertyDef::new("ID_1", ValueShape::string()));
        let package = package_with(resource.clone());
        let binding = BindingBuilder::new(&rules)
            .build(&package, &resource)
            .expect("binding builds");

        let spellings: Vec<_> = binding.outputs.iter().map(|o| o.property.spelling()).collect();
        for (i, a) in spellings.iter().enumerate() {
            for b in &spellings[i + 1..] {
                assert!(!rules.case_equality.same(a, b), "{a} collides with {b}");
            }
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let rules = LanguageRules::nodejs();
        let resource = ResourceType::new("example::Widget")
            .with_property(PropertyDef::new("get", ValueShape::string()))
            .with_property(PropertyDef::new("urn", ValueShape::string()).required());
        let package = package_with(resource.clone());
        let builder = BindingBuilder::new(&rules);
        let first = builder.build(&package, &resource).expect("builds");
        let second = builder.build(&package, &resource).expect("builds");
        assert_eq!(
            first.to_json().expect("serializes"),
            second.to_json().expect("serializes")
        );
    }

    #[test]
    fn test_build_resource_version_overrides_package() {
        let rules = LanguageRules::nodejs();
        let resource = resource_input().with_version("2.1.0");
        let package = package_with(resource.clone());
        let binding = BindingBuilder::new(&rules)
            .build(&package, &resource)
            .expect("builds");
        assert_eq!(binding.version(), "2.1.0");
    }

    #[test]
    fn test_build_language_name_override() {
        let rules = LanguageRules::python();
        let resource = ResourceType::new("example::Widget").with_property(
            PropertyDef::new("x", ValueShape::string()).with_language_name("python", "x_coordinate"),
        );
        let package = package_with(resource.clone());
        let binding = BindingBuilder::new(&rules)
            .build(&package, &resource)
            .expect("builds");
        assert_eq!(binding.outputs[0].property.spelling(), "x_coordinate");
        assert_eq!(binding.outputs[0].property.schema_name, "x");
    }

    #[test]
    fn test_build_rejects_malformed_resource() {
        let rules = LanguageRules::nodejs();
        let resource = ResourceType::new("example::Widget")
            .with_property(PropertyDef::new("", ValueShape::string()));
        let package = package_with(resource.clone());
        let err = BindingBuilder::new(&rules)
            .build(&package, &resource)
            .expect_err("empty property name");
        assert!(!err.is_fatal());
        assert!(matches!(
            err,
            CodegenError::Schema(SchemaError {
                kind: SchemaErrorKind::EmptyName,
                ..
            })
        ));
    }

    #[test]
    fn test_build_broken_rules_are_fatal() {
        let rules = LanguageRules {
            disambiguation: Disambiguation::FixedRenameTable {
                renames: BTreeMap::new(),
                fallback: None,
            },
            ..LanguageRules::dotnet()
        };
        let resource = ResourceType::new("example::Widget")
            .with_property(PropertyDef::new("urn", ValueShape::string()));
        let package = package_with(resource.clone());
        let err = BindingBuilder::new(&rules)
            .build(&package, &resource)
            .expect_err("no rename for Urn");
        assert!(err.is_fatal());
        assert!(matches!(
            err,
            CodegenError::Naming(NamingConfigurationError::MissingRename { .. })
        ));
    }
}

//! C# emitter.

use super::{banner, module_segments, reference_name};
use crate::binding::{ArgsField, OutputAccessor, ParameterRole, ResourceBinding};
use crate::naming::to_pascal_case;
use ironbind_schema::{PrimitiveType, ValueShape};

/// Renders a binding as a C# source file.
#[must_use]
pub fn render(binding: &ResourceBinding, tool: &str) -> String {
    let mut output = banner("//", tool);
    output.push('\n');
    output.push_str("using System;\n");
    output.push_str("using System.Collections.Generic;\n");
    output.push_str("using System.Collections.Immutable;\n");
    output.push_str("using System.Threading.Tasks;\n");
    output.push_str("using Pulumi.Serialization;\n\n");

    let package = to_pascal_case(&binding.package);
    let mut namespace = format!("Pulumi.{package}");
    for segment in module_segments(&binding.token, to_pascal_case) {
        namespace.push('.');
        namespace.push_str(&segment);
    }
    output.push_str(&format!("namespace {namespace}\n{{\n"));
    output.push_str(&resource_class(binding, &package));
    output.push('\n');
    output.push_str(&args_class(binding));
    output.push_str("}\n");
    output
}

fn resource_class(binding: &ResourceBinding, package: &str) -> String {
    let mut output = String::new();
    let class = binding.class_name();
    let args_type = binding.args.type_name.as_str();
    let token = &binding.token;
    let create = &binding.create;
    let lookup = &binding.lookup;
    let param = |role| {
        create
            .parameter(role)
            .or_else(|| lookup.parameter(role))
            .map_or("", |p| p.identifier.as_str())
    };
    let (name, args, id, options) = (
        param(ParameterRole::Name),
        param(ParameterRole::Args),
        param(ParameterRole::Id),
        param(ParameterRole::Options),
    );

    if let Some(description) = &binding.description {
        output.push_str(&summary(description, "    "));
    }
    output.push_str(&format!("    [{package}ResourceType(\"{token}\")]\n"));
    output.push_str(&format!(
        "    public partial class {class} : global::Pulumi.CustomResource\n    {{\n"
    ));

    for accessor in &binding.outputs {
        output.push_str(&output_property(accessor));
    }
    output.push('\n');

    output.push_str("\n        /// <summary>\n");
    output.push_str(&format!(
        "        /// Create a {class} resource with the given unique name, arguments, and options.\n"
    ));
    output.push_str("        /// </summary>\n");
    output.push_str("        ///\n");
    output.push_str(&format!(
        "        /// <param name=\"{name}\">The unique name of the resource</param>\n"
    ));
    output.push_str(&format!(
        "        /// <param name=\"{args}\">The arguments used to populate this resource's properties</param>\n"
    ));
    output.push_str(&format!(
        "        /// <param name=\"{options}\">A bag of options that control this resource's behavior</param>\n"
    ));
    output.push_str(&format!(
        "        public {class}(string {name}, {args_type}? {args} = null, CustomResourceOptions? {options} = null)\n"
    ));
    output.push_str(&format!(
        "            : base(\"{token}\", {name}, {args} ?? new {args_type}(), MakeResourceOptions({options}, null))\n"
    ));
    output.push_str("        {\n        }\n\n");

    output.push_str(&format!(
        "        private {class}(string {name}, Input<string> {id}, CustomResourceOptions? {options} = null)\n"
    ));
    output.push_str(&format!(
        "            : base(\"{token}\", {name}, null, MakeResourceOptions({options}, {id}))\n"
    ));
    output.push_str("        {\n        }\n\n");

    output.push_str(&format!(
        "        private static CustomResourceOptions MakeResourceOptions(CustomResourceOptions? {options}, Input<string>? {id})\n"
    ));
    output.push_str("        {\n");
    output.push_str("            var defaultOptions = new CustomResourceOptions\n");
    output.push_str("            {\n");
    output.push_str("                Version = Utilities.Version,\n");
    output.push_str("            };\n");
    output.push_str(&format!(
        "            var merged = CustomResourceOptions.Merge(defaultOptions, {options});\n"
    ));
    output.push_str("            // Override the ID if one was specified for consistency with other language SDKs.\n");
    output.push_str(&format!("            merged.Id = {id} ?? merged.Id;\n"));
    output.push_str("            return merged;\n");
    output.push_str("        }\n");

    let get = lookup.identifier.as_str();
    output.push_str("        /// <summary>\n");
    output.push_str(&format!(
        "        /// Get an existing {class} resource's state with the given name, ID, and optional extra\n"
    ));
    output.push_str("        /// properties used to qualify the lookup.\n");
    output.push_str("        /// </summary>\n");
    output.push_str("        ///\n");
    output.push_str(&format!(
        "        /// <param name=\"{name}\">The unique name of the resulting resource.</param>\n"
    ));
    output.push_str(&format!(
        "        /// <param name=\"{id}\">The unique provider ID of the resource to lookup.</param>\n"
    ));
    output.push_str(&format!(
        "        /// <param name=\"{options}\">A bag of options that control this resource's behavior</param>\n"
    ));
    output.push_str(&format!(
        "        public static {class} {get}(string {name}, Input<string> {id}, CustomResourceOptions? {options} = null)\n"
    ));
    output.push_str("        {\n");
    output.push_str(&format!(
        "            return new {class}({name}, {id}, {options});\n"
    ));
    output.push_str("        }\n");
    output.push_str("    }\n");
    output
}

fn output_property(accessor: &OutputAccessor) -> String {
    let property = &accessor.property;
    let mut ty = type_name(&property.shape);
    if !property.required {
        ty.push('?');
    }
    let mut output = String::new();
    if let Some(description) = &property.description {
        output.push_str(&summary(description, "        "));
    }
    output.push_str(&format!("        [Output(\"{}\")]\n", property.schema_name));
    output.push_str(&format!(
        "        public Output<{ty}> {} {{ get; private set; }} = null!;\n",
        property.spelling()
    ));
    output
}

fn args_class(binding: &ResourceBinding) -> String {
    let mut output = String::new();
    let args_type = binding.args.type_name.as_str();

    output.push_str(&format!(
        "    public sealed class {args_type} : global::Pulumi.ResourceArgs\n    {{\n"
    ));
    for field in &binding.args.fields {
        output.push_str(&args_field(field));
    }
    output.push_str(&format!("        public {args_type}()\n        {{\n        }}\n"));
    if let Some(factory) = &binding.args.factory {
        output.push_str(&format!(
            "        public static new {args_type} {} => new {args_type}();\n",
            factory.as_str()
        ));
    }
    output.push_str("    }\n");
    output
}

fn args_field(field: &ArgsField) -> String {
    let property = &field.property;
    let mut output = String::new();
    if let Some(description) = &property.description {
        output.push_str(&summary(description, "        "));
    }
    if field.is_required() {
        output.push_str(&format!(
            "        [Input(\"{}\", required: true)]\n",
            property.schema_name
        ));
        output.push_str(&format!(
            "        public {} {} {{ get; set; }} = null!;\n\n",
            input_type(&property.shape),
            property.spelling()
        ));
    } else {
        output.push_str(&format!("        [Input(\"{}\")]\n", property.schema_name));
        output.push_str(&format!(
            "        public {}? {} {{ get; set; }}\n\n",
            input_type(&property.shape),
            property.spelling()
        ));
    }
    output
}

fn summary(description: &str, indent: &str) -> String {
    let mut output = format!("{indent}/// <summary>\n");
    for line in description.lines() {
        output.push_str(&format!("{indent}/// {line}\n"));
    }
    output.push_str(&format!("{indent}/// </summary>\n"));
    output
}

fn input_type(shape: &ValueShape) -> String {
    match shape {
        ValueShape::Array(element) => format!("InputList<{}>", type_name(element)),
        ValueShape::Map(value) => format!("InputMap<{}>", type_name(value)),
        other => format!("Input<{}>", type_name(other)),
    }
}

fn type_name(shape: &ValueShape) -> String {
    match shape {
        ValueShape::Primitive(primitive) => match primitive {
            PrimitiveType::String => "string",
            PrimitiveType::Integer => "int",
            PrimitiveType::Number => "double",
            PrimitiveType::Boolean => "bool",
            PrimitiveType::Any => "object",
        }
        .to_string(),
        ValueShape::Reference(token) => reference_name(token),
        ValueShape::Array(element) => format!("ImmutableArray<{}>", type_name(element)),
        ValueShape::Map(value) => format!("ImmutableDictionary<string, {}>", type_name(value)),
    }
}

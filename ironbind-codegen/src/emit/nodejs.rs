//! TypeScript emitter.

use super::{banner, reference_name};
use crate::binding::{ParameterRole, ResourceBinding};
use ironbind_schema::{PrimitiveType, ValueShape};

/// Renders a binding as a TypeScript source file.
#[must_use]
pub fn render(binding: &ResourceBinding, tool: &str) -> String {
    let mut output = banner("//", tool);
    output.push('\n');
    output.push_str("import * as pulumi from \"@pulumi/pulumi\";\n");
    output.push_str("import * as utilities from \"./utilities\";\n\n");
    output.push_str(&resource_class(binding));
    output.push('\n');
    output.push_str(&args_interface(binding));
    output
}

fn resource_class(binding: &ResourceBinding) -> String {
    let mut output = String::new();
    let class = binding.class_name();
    let args_type = binding.args.type_name.as_str();
    let get = binding.lookup.identifier.as_str();
    let param = |role| {
        binding
            .create
            .parameter(role)
            .or_else(|| binding.lookup.parameter(role))
            .map_or("", |p| p.identifier.as_str())
    };
    let (name, args, id, opts) = (
        param(ParameterRole::Name),
        param(ParameterRole::Args),
        param(ParameterRole::Id),
        param(ParameterRole::Options),
    );

    if let Some(description) = &binding.description {
        output.push_str(&jsdoc(description, ""));
    }
    output.push_str(&format!(
        "export class {class} extends pulumi.CustomResource {{\n"
    ));

    output.push_str("    /**\n");
    output.push_str(&format!(
        "     * Get an existing {class} resource's state with the given name, ID, and optional extra\n"
    ));
    output.push_str("     * properties used to qualify the lookup.\n");
    output.push_str("     *\n");
    output.push_str(&format!(
        "     * @param {name} The _unique_ name of the resulting resource.\n"
    ));
    output.push_str(&format!(
        "     * @param {id} The _unique_ provider ID of the resource to lookup.\n"
    ));
    output.push_str(&format!(
        "     * @param {opts} Optional settings to control the behavior of the CustomResource.\n"
    ));
    output.push_str("     */\n");
    output.push_str(&format!(
        "    public static {get}({name}: string, {id}: pulumi.Input<pulumi.ID>, {opts}?: pulumi.CustomResourceOptions): {class} {{\n"
    ));
    output.push_str(&format!(
        "        return new {class}({name}, undefined as any, {class}.makeResourceOptions({opts}, {id}));\n"
    ));
    output.push_str("    }\n\n");

    output.push_str("    /** @internal */\n");
    output.push_str(&format!(
        "    public static readonly __pulumiType = '{}';\n\n",
        binding.token
    ));

    output.push_str("    /**\n");
    output.push_str(&format!(
        "     * Returns true if the given object is an instance of {class}. This is designed to work even\n"
    ));
    output.push_str("     * when multiple copies of the Pulumi SDK have been loaded into the same process.\n");
    output.push_str("     */\n");
    output.push_str(&format!(
        "    public static isInstance(obj: any): obj is {class} {{\n"
    ));
    output.push_str("        if (obj === undefined || obj === null) {\n");
    output.push_str("            return false;\n");
    output.push_str("        }\n");
    output.push_str(&format!(
        "        return obj['__pulumiType'] === {class}.__pulumiType;\n"
    ));
    output.push_str("    }\n\n");

    output.push_str(&format!(
        "    private static makeResourceOptions({opts}: pulumi.CustomResourceOptions | undefined, {id}: pulumi.Input<pulumi.ID> | undefined): pulumi.CustomResourceOptions {{\n"
    ));
    output.push_str(
        "        const merged = pulumi.mergeOptions({ version: utilities.getVersion() }, ",
    );
    output.push_str(&format!("{opts});\n"));
    output.push_str(&format!(
        "        return {id} === undefined ? merged : {{ ...merged, id: {id} }};\n"
    ));
    output.push_str("    }\n\n");

    for accessor in &binding.outputs {
        let property = &accessor.property;
        if let Some(description) = &property.description {
            output.push_str(&jsdoc(description, "    "));
        }
        let mut ty = type_name(&property.shape);
        if !property.required {
            ty.push_str(" | undefined");
        }
        output.push_str(&format!(
            "    public readonly {}!: pulumi.Output<{ty}>;\n",
            property.spelling()
        ));
    }
    if !binding.outputs.is_empty() {
        output.push('\n');
    }

    output.push_str("    /**\n");
    output.push_str(&format!(
        "     * Create a {class} resource with the given unique name, arguments, and options.\n"
    ));
    output.push_str("     *\n");
    output.push_str(&format!("     * @param {name} The _unique_ name of the resource.\n"));
    output.push_str(&format!(
        "     * @param {args} The arguments to use to populate this resource's properties.\n"
    ));
    output.push_str(&format!(
        "     * @param {opts} A bag of options that control this resource's behavior.\n"
    ));
    output.push_str("     */\n");
    output.push_str(&format!(
        "    constructor({name}: string, {args}?: {args_type}, {opts}?: pulumi.CustomResourceOptions) {{\n"
    ));
    output.push_str("        let resourceInputs: pulumi.Inputs = {};\n");
    output.push_str(&format!(
        "        {opts} = {class}.makeResourceOptions({opts}, undefined);\n"
    ));
    output.push_str(&format!("        if (!{opts}.id) {{\n"));
    for field in binding.args.required_fields() {
        let spelling = field.property.spelling();
        output.push_str(&format!(
            "            if (({args}?.{spelling} === undefined) && !{opts}.urn) {{\n"
        ));
        output.push_str(&format!(
            "                throw new Error(\"Missing required property '{spelling}'\");\n"
        ));
        output.push_str("            }\n");
    }
    for field in &binding.args.fields {
        output.push_str(&format!(
            "            resourceInputs[\"{}\"] = {args} ? {args}.{} : undefined;\n",
            field.property.schema_name,
            field.property.spelling()
        ));
    }
    for accessor in binding.outputs.iter().filter(|o| {
        binding
            .args
            .field(o.property.spelling())
            .is_none()
    }) {
        output.push_str(&format!(
            "            resourceInputs[\"{}\"] = undefined /*out*/;\n",
            accessor.property.schema_name
        ));
    }
    output.push_str("        } else {\n");
    for accessor in &binding.outputs {
        output.push_str(&format!(
            "            resourceInputs[\"{}\"] = undefined /*out*/;\n",
            accessor.property.schema_name
        ));
    }
    output.push_str("        }\n");
    output.push_str(&format!(
        "        super({class}.__pulumiType, {name}, resourceInputs, {opts});\n"
    ));
    output.push_str("    }\n");
    output.push_str("}\n");
    output
}

fn args_interface(binding: &ResourceBinding) -> String {
    let mut output = String::new();
    output.push_str("/**\n");
    output.push_str(&format!(
        " * The set of arguments for constructing a {} resource.\n",
        binding.class_name()
    ));
    output.push_str(" */\n");
    output.push_str(&format!(
        "export interface {} {{\n",
        binding.args.type_name.as_str()
    ));
    for field in &binding.args.fields {
        let property = &field.property;
        if let Some(description) = &property.description {
            output.push_str(&jsdoc(description, "    "));
        }
        let marker = if field.is_required() { "" } else { "?" };
        output.push_str(&format!(
            "    {}{marker}: pulumi.Input<{}>;\n",
            property.spelling(),
            type_name(&property.shape)
        ));
    }
    output.push_str("}\n");
    output
}

fn jsdoc(description: &str, indent: &str) -> String {
    let mut output = format!("{indent}/**\n");
    for line in description.lines() {
        output.push_str(&format!("{indent} * {line}\n"));
    }
    output.push_str(&format!("{indent} */\n"));
    output
}

fn type_name(shape: &ValueShape) -> String {
    match shape {
        ValueShape::Primitive(primitive) => match primitive {
            PrimitiveType::String => "string",
            PrimitiveType::Integer | PrimitiveType::Number => "number",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Any => "any",
        }
        .to_string(),
        ValueShape::Reference(token) => reference_name(token),
        ValueShape::Array(element) => format!("{}[]", type_name(element)),
        ValueShape::Map(value) => format!("{{[key: string]: {}}}", type_name(value)),
    }
}

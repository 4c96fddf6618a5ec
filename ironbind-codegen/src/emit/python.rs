//! Python emitter.

use super::{banner, reference_name};
use crate::binding::{ParameterRole, PropertyBinding, ResourceBinding};
use ironbind_schema::{PrimitiveType, ValueShape};

/// Renders a binding as a Python module.
#[must_use]
pub fn render(binding: &ResourceBinding, tool: &str) -> String {
    let mut output = String::from("# coding=utf-8\n");
    output.push_str(&banner("#", tool));
    output.push('\n');
    output.push_str("import pulumi\n");
    output.push_str("import pulumi.runtime\n");
    output.push_str("from typing import Any, Mapping, Optional, Sequence, Union\n");
    output.push_str("from . import _utilities\n\n");
    output.push_str(&format!(
        "__all__ = ['{}', '{}']\n\n",
        binding.args.type_name.as_str(),
        binding.class_name()
    ));
    output.push_str(&args_class(binding));
    output.push_str("\n\n");
    output.push_str(&resource_class(binding));
    output
}

fn args_class(binding: &ResourceBinding) -> String {
    let mut output = String::new();
    let args_type = binding.args.type_name.as_str();
    let fields = &binding.args.fields;

    output.push_str("@pulumi.input_type\n");
    output.push_str(&format!("class {args_type}:\n"));
    if fields.is_empty() {
        output.push_str("    def __init__(__self__):\n");
    } else {
        output.push_str("    def __init__(__self__, *,\n");
        // Required keyword arguments first, then optional ones.
        let ordered: Vec<_> = fields
            .iter()
            .filter(|f| f.is_required())
            .chain(fields.iter().filter(|f| !f.is_required()))
            .collect();
        for (i, field) in ordered.iter().enumerate() {
            let property = &field.property;
            let ty = input_type(&property.shape);
            let close = if i + 1 == ordered.len() { "):" } else { "," };
            if field.is_required() {
                output.push_str(&format!(
                    "                 {}: {ty}{close}\n",
                    property.spelling()
                ));
            } else {
                output.push_str(&format!(
                    "                 {}: Optional[{ty}] = None{close}\n",
                    property.spelling()
                ));
            }
        }
    }
    output.push_str("        \"\"\"\n");
    output.push_str(&format!(
        "        The set of arguments for constructing a {} resource.\n",
        binding.class_name()
    ));
    for field in fields {
        if let Some(description) = &field.property.description {
            output.push_str(&format!(
                "        :param {}: {}\n",
                field.property.spelling(),
                first_line(description)
            ));
        }
    }
    output.push_str("        \"\"\"\n");
    for field in fields {
        let property = &field.property;
        let spelling = property.spelling();
        if field.is_required() {
            output.push_str(&format!(
                "        pulumi.set(__self__, \"{}\", {spelling})\n",
                property.schema_name
            ));
        } else {
            output.push_str(&format!("        if {spelling} is not None:\n"));
            output.push_str(&format!(
                "            pulumi.set(__self__, \"{}\", {spelling})\n",
                property.schema_name
            ));
        }
    }

    for field in fields {
        let property = &field.property;
        let spelling = property.spelling();
        let mut ty = input_type(&property.shape);
        if !field.is_required() {
            ty = format!("Optional[{ty}]");
        }
        output.push('\n');
        output.push_str("    @property\n");
        output.push_str(&getter(property));
        output.push_str(&format!("    def {spelling}(self) -> {ty}:\n"));
        output.push_str(&docstring(property));
        output.push_str(&format!(
            "        return pulumi.get(self, \"{}\")\n\n",
            property.schema_name
        ));
        output.push_str(&format!("    @{spelling}.setter\n"));
        output.push_str(&format!("    def {spelling}(self, value: {ty}):\n"));
        output.push_str(&format!(
            "        pulumi.set(self, \"{}\", value)\n",
            property.schema_name
        ));
    }
    output
}

fn resource_class(binding: &ResourceBinding) -> String {
    let mut output = String::new();
    let class = binding.class_name();
    let args_type = binding.args.type_name.as_str();
    let token = &binding.token;
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

    output.push_str(&format!("class {class}(pulumi.CustomResource):\n"));
    output.push_str("    def __init__(__self__,\n");
    output.push_str(&format!("                 {name}: str,\n"));
    output.push_str(&format!(
        "                 {args}: Optional['{args_type}'] = None,\n"
    ));
    output.push_str(&format!(
        "                 {opts}: Optional[pulumi.ResourceOptions] = None):\n"
    ));
    output.push_str("        \"\"\"\n");
    match &binding.description {
        Some(description) => output.push_str(&format!("        {}\n\n", first_line(description))),
        None => output.push_str(&format!(
            "        Create a {class} resource with the given unique name, arguments, and options.\n\n"
        )),
    }
    output.push_str(&format!(
        "        :param str {name}: The name of the resource.\n"
    ));
    output.push_str(&format!(
        "        :param {args_type} {args}: The arguments to use to populate this resource's properties.\n"
    ));
    output.push_str(&format!(
        "        :param pulumi.ResourceOptions {opts}: Options for the resource.\n"
    ));
    output.push_str("        \"\"\"\n");

    output.push_str(&format!("        if {args} is None:\n"));
    match binding.args.required_fields().next() {
        Some(field) => output.push_str(&format!(
            "            raise TypeError(\"Missing required property '{}'\")\n",
            field.property.spelling()
        )),
        None => output.push_str(&format!("            {args} = {args_type}()\n")),
    }
    output.push_str("        __props__ = dict()\n");
    for field in &binding.args.fields {
        output.push_str(&format!(
            "        __props__[\"{}\"] = {args}.{}\n",
            field.property.schema_name,
            field.property.spelling()
        ));
    }
    for accessor in binding
        .outputs
        .iter()
        .filter(|o| binding.args.field(o.property.spelling()).is_none())
    {
        output.push_str(&format!(
            "        __props__[\"{}\"] = None\n",
            accessor.property.schema_name
        ));
    }
    output.push_str(&format!("        super({class}, __self__).__init__(\n"));
    output.push_str(&format!("            '{token}',\n"));
    output.push_str(&format!("            {name},\n"));
    output.push_str("            __props__,\n");
    output.push_str(&format!(
        "            {class}._make_resource_options({opts}, None))\n\n"
    ));

    output.push_str("    @staticmethod\n");
    output.push_str(&format!(
        "    def _make_resource_options({opts}: Optional[pulumi.ResourceOptions], {id}: Optional[pulumi.Input[str]]) -> pulumi.ResourceOptions:\n"
    ));
    output.push_str(
        "        defaults = pulumi.ResourceOptions(version=_utilities.get_version())\n",
    );
    output.push_str(&format!(
        "        merged = pulumi.ResourceOptions.merge(defaults, {opts})\n"
    ));
    output.push_str(&format!("        if {id} is not None:\n"));
    output.push_str(&format!("            merged.id = {id}\n"));
    output.push_str("        return merged\n\n");

    output.push_str("    @staticmethod\n");
    output.push_str(&format!("    def {get}({name}: str,\n"));
    output.push_str(&format!("            {id}: pulumi.Input[str],\n"));
    output.push_str(&format!(
        "            {opts}: Optional[pulumi.ResourceOptions] = None) -> '{class}':\n"
    ));
    output.push_str("        \"\"\"\n");
    output.push_str(&format!(
        "        Get an existing {class} resource's state with the given name, id, and optional extra\n"
    ));
    output.push_str("        properties used to qualify the lookup.\n\n");
    output.push_str(&format!(
        "        :param str {name}: The unique name of the resulting resource.\n"
    ));
    output.push_str(&format!(
        "        :param pulumi.Input[str] {id}: The unique provider ID of the resource to lookup.\n"
    ));
    output.push_str(&format!(
        "        :param pulumi.ResourceOptions {opts}: Options for the resource.\n"
    ));
    output.push_str("        \"\"\"\n");
    output.push_str("        __props__ = dict()\n");
    for accessor in &binding.outputs {
        output.push_str(&format!(
            "        __props__[\"{}\"] = None\n",
            accessor.property.schema_name
        ));
    }
    output.push_str(&format!("        resource = {class}.__new__({class})\n"));
    output.push_str("        pulumi.CustomResource.__init__(\n");
    output.push_str("            resource,\n");
    output.push_str(&format!("            '{token}',\n"));
    output.push_str(&format!("            {name},\n"));
    output.push_str("            __props__,\n");
    output.push_str(&format!(
        "            {class}._make_resource_options({opts}, {id}))\n"
    ));
    output.push_str("        return resource\n");

    for accessor in &binding.outputs {
        let property = &accessor.property;
        let mut ty = type_name(&property.shape);
        if !property.required {
            ty = format!("Optional[{ty}]");
        }
        output.push('\n');
        output.push_str("    @property\n");
        output.push_str(&getter(property));
        output.push_str(&format!(
            "    def {}(self) -> pulumi.Output[{ty}]:\n",
            property.spelling()
        ));
        output.push_str(&docstring(property));
        output.push_str(&format!(
            "        return pulumi.get(self, \"{}\")\n",
            property.schema_name
        ));
    }
    output
}

fn getter(property: &PropertyBinding) -> String {
    if property.spelling() == property.schema_name {
        "    @pulumi.getter\n".to_string()
    } else {
        format!("    @pulumi.getter(name=\"{}\")\n", property.schema_name)
    }
}

fn docstring(property: &PropertyBinding) -> String {
    match &property.description {
        Some(description) => format!("        \"\"\"\n        {}\n        \"\"\"\n", first_line(description)),
        None => String::new(),
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

fn input_type(shape: &ValueShape) -> String {
    match shape {
        ValueShape::Array(element) => format!("pulumi.Input[Sequence[{}]]", type_name(element)),
        ValueShape::Map(value) => format!("pulumi.Input[Mapping[str, {}]]", type_name(value)),
        other => format!("pulumi.Input[{}]", type_name(other)),
    }
}

fn type_name(shape: &ValueShape) -> String {
    match shape {
        ValueShape::Primitive(primitive) => match primitive {
            PrimitiveType::String => "str",
            PrimitiveType::Integer => "int",
            PrimitiveType::Number => "float",
            PrimitiveType::Boolean => "bool",
            PrimitiveType::Any => "Any",
        }
        .to_string(),
        ValueShape::Reference(token) => format!("'{}'", reference_name(token)),
        ValueShape::Array(element) => format!("Sequence[{}]", type_name(element)),
        ValueShape::Map(value) => format!("Mapping[str, {}]", type_name(value)),
    }
}

//! Executable form of a binding's construction contract.
//!
//! Every emitted class turns its constructor and lookup calls into a
//! registration request the same way. [`ResourceBinding::create`] and
//! [`ResourceBinding::lookup`] perform that translation directly, so the
//! contract can be checked without compiling generated code.

use crate::binding::{ArgsContainer, ResourceBinding};
use crate::options::ResourceOptions;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised while building a registration request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The logical resource name is empty.
    #[error("resource name must not be empty")]
    EmptyName,

    /// The lookup ID is empty.
    #[error("lookup of '{name}' requires a non-empty ID")]
    EmptyId {
        /// Logical name of the lookup.
        name: String,
    },

    /// A required args field has no value.
    #[error("missing required field '{field}' in {args}")]
    MissingField {
        /// Args type name.
        args: String,
        /// Field spelling.
        field: String,
    },

    /// An args value names a field the container does not declare.
    #[error("unknown field '{field}' in {args}")]
    UnknownField {
        /// Args type name.
        args: String,
        /// Field spelling.
        field: String,
    },
}

/// An instance of an args container, keyed by field spelling.
///
/// `Value::Null` is treated the same as an absent field.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ArgsValue {
    values: BTreeMap<String, Value>,
}

impl ArgsValue {
    /// Creates an args value with every field absent.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sets a field.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Sets a field, replacing any previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(field.into(), value.into());
    }

    /// Returns the value of a field, if present and not null.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field).filter(|v| !v.is_null())
    }

    /// Returns true if no field has a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.values().all(Value::is_null)
    }

    /// Checks the value against an args container.
    ///
    /// # Errors
    /// Returns `RequestError::UnknownField` for a field the container does
    /// not declare and `RequestError::MissingField` for an absent required
    /// field.
    pub fn validate(&self, args: &ArgsContainer) -> Result<(), RequestError> {
        let type_name = args.type_name.as_str();
        if let Some(unknown) = self.values.keys().find(|k| args.field(k).is_none()) {
            return Err(RequestError::UnknownField {
                args: type_name.to_string(),
                field: unknown.clone(),
            });
        }
        if let Some(missing) = args.required_fields().find(|f| self.get(f.property.spelling()).is_none()) {
            return Err(RequestError::MissingField {
                args: type_name.to_string(),
                field: missing.property.spelling().to_string(),
            });
        }
        Ok(())
    }
}

/// A resource registration, as handed to the deployment engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Type token.
    #[serde(rename = "type")]
    pub token: String,
    /// Logical name.
    pub name: String,
    /// Input values keyed by wire (schema) name.
    pub inputs: BTreeMap<String, Value>,
    /// Effective options.
    pub options: ResourceOptions,
    /// Whether the resource is managed by a provider.
    pub custom: bool,
}

impl RegisterRequest {
    /// Returns the effective ID, if any.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.options.id.as_deref()
    }

    /// Returns true if this request adopts an existing resource.
    #[must_use]
    pub fn is_lookup(&self) -> bool {
        self.inputs.is_empty() && self.id().is_some()
    }
}

impl ResourceBinding {
    /// Computes the effective options of a construction call.
    #[must_use]
    pub fn make_resource_options(
        &self,
        options: Option<&ResourceOptions>,
        id: Option<&str>,
    ) -> ResourceOptions {
        self.options.effective(options, id)
    }

    /// Performs the Create entry point.
    ///
    /// Absent args behave as the empty args value.
    ///
    /// # Errors
    /// Returns `RequestError` for an empty name or args that do not match
    /// the args container.
    pub fn create(
        &self,
        name: &str,
        args: Option<ArgsValue>,
        options: Option<&ResourceOptions>,
    ) -> Result<RegisterRequest, RequestError> {
        if name.is_empty() {
            return Err(RequestError::EmptyName);
        }
        let args = args.unwrap_or_default();
        args.validate(&self.args)?;

        let inputs = self
            .args
            .fields
            .iter()
            .filter_map(|field| {
                args.get(field.property.spelling())
                    .map(|value| (field.property.schema_name.clone(), value.clone()))
            })
            .collect();

        Ok(RegisterRequest {
            token: self.token.clone(),
            name: name.to_string(),
            inputs,
            options: self.make_resource_options(options, None),
            custom: true,
        })
    }

    /// Performs the Lookup-existing entry point.
    ///
    /// The returned request always carries `id`, whatever the caller's
    /// options say.
    ///
    /// # Errors
    /// Returns `RequestError` for an empty name or ID.
    pub fn lookup(
        &self,
        name: &str,
        id: &str,
        options: Option<&ResourceOptions>,
    ) -> Result<RegisterRequest, RequestError> {
        if name.is_empty() {
            return Err(RequestError::EmptyName);
        }
        if id.is_empty() {
            return Err(RequestError::EmptyId {
                name: name.to_string(),
            });
        }
        Ok(RegisterRequest {
            token: self.token.clone(),
            name: name.to_string(),
            inputs: BTreeMap::new(),
            options: self.make_resource_options(options, Some(id)),
            custom: true,
        })
    }
}

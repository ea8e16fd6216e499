//! Transient argument form for one command.
//!
//! A form is built fresh from a command's [`ArgumentSchema`] every time the
//! command is selected and is discarded on submit or close, so values never
//! carry over from one command to another.

use indexmap::IndexMap;

use crate::catalog::{ArgumentSchema, ArgumentType};
use crate::error::{Error, Result};
use crate::request::ExecutionRequest;

/// Which input widget a field is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Numeric,
    Text,
}

impl From<ArgumentType> for InputKind {
    fn from(argument_type: ArgumentType) -> Self {
        match argument_type {
            ArgumentType::Integer => InputKind::Numeric,
            ArgumentType::Text => InputKind::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub argument_type: ArgumentType,
    pub value: String,
    pub required: bool,
}

impl FormField {
    fn new(name: &str, argument_type: ArgumentType) -> Self {
        Self {
            name: name.to_string(),
            argument_type,
            value: String::new(),
            required: true,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn input_kind(&self) -> InputKind {
        self.argument_type.into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    command: String,
    fields: Vec<FormField>,
}

impl FormState {
    /// Opens an empty form with one field per argument, in schema order.
    pub fn open(command: &str, schema: &ArgumentSchema) -> Self {
        Self {
            command: command.to_string(),
            fields: schema
                .iter()
                .map(|(name, argument_type)| FormField::new(name, argument_type))
                .collect(),
        }
    }

    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!("Execute: {}", self.command)
    }

    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Updates a field value.
    ///
    /// Returns `false` when the field does not exist or the value is not
    /// admissible for the field's input kind, in which case nothing changes.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(field) if field.argument_type.accepts(&value) => {
                field.value = value;
                true
            }
            _ => false,
        }
    }

    /// Names of required fields that still have no value.
    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|field| field.required && field.value.is_empty())
            .map(|field| field.name.as_str())
    }

    /// Validates the form and builds the request to send.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingArgument`] for the first empty required field, or
    /// [`Error::NotAnInteger`] for an integer field whose value does not parse.
    pub fn to_request(&self) -> Result<ExecutionRequest> {
        let mut args = IndexMap::new();

        for field in &self.fields {
            if field.required && field.value.is_empty() {
                return Err(Error::MissingArgument(field.name.clone()));
            }

            field.argument_type.coerce(&field.name, &field.value)?;
            args.insert(field.name.clone(), field.value.clone());
        }

        Ok(ExecutionRequest::new(self.command.clone(), args))
    }
}

//! Command catalog served by `GET /api/commands`.
//!
//! The catalog maps each command name to its argument schema, and each schema
//! maps argument names to a type tag. Both maps keep the order in which the
//! server listed them, which is also the order forms are rendered in.

use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Wire tag for integer arguments. Every other tag is free text.
pub const INTEGER_TAG: &str = "int";

/// Wire tag emitted for text arguments when a catalog is re-serialized.
pub const TEXT_TAG: &str = "str";

/// The kind of value an argument takes.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum ArgumentType {
    Integer,
    Text,
}

impl ArgumentType {
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        if tag == INTEGER_TAG {
            ArgumentType::Integer
        } else {
            ArgumentType::Text
        }
    }

    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            ArgumentType::Integer => INTEGER_TAG,
            ArgumentType::Text => TEXT_TAG,
        }
    }

    /// Whether a partially typed value may be entered into an input of this kind.
    ///
    /// Integer inputs behave like a numeric field: an optional leading `-`
    /// followed by ASCII digits. Empty input is always admissible.
    #[must_use]
    pub fn accepts(self, partial: &str) -> bool {
        match self {
            ArgumentType::Text => true,
            ArgumentType::Integer => {
                let digits = partial.strip_prefix('-').unwrap_or(partial);
                digits.chars().all(|c| c.is_ascii_digit())
            }
        }
    }

    /// Checks a complete value for the argument `name`.
    ///
    /// Integer values must be something an integer input admits, so a
    /// leading `+` is refused even though it would parse.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAnInteger`] if an integer argument does not parse.
    pub fn coerce(self, name: &str, value: &str) -> Result<()> {
        match self {
            ArgumentType::Text => Ok(()),
            ArgumentType::Integer if self.accepts(value) && value.parse::<i64>().is_ok() => Ok(()),
            ArgumentType::Integer => Err(Error::not_an_integer(name, value)),
        }
    }
}

impl From<String> for ArgumentType {
    fn from(tag: String) -> Self {
        ArgumentType::from_tag(&tag)
    }
}

impl From<ArgumentType> for String {
    fn from(argument_type: ArgumentType) -> Self {
        argument_type.tag().to_string()
    }
}

impl Display for ArgumentType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.tag())
    }
}

/// Ordered argument name to type mapping for one command.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct ArgumentSchema {
    arguments: IndexMap<String, ArgumentType>,
}

impl ArgumentSchema {
    pub fn iter(&self) -> impl Iterator<Item = (&str, ArgumentType)> {
        self.arguments
            .iter()
            .map(|(name, argument_type)| (name.as_str(), *argument_type))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<ArgumentType> {
        self.arguments.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.arguments.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, ArgumentType)> for ArgumentSchema {
    fn from_iter<T: IntoIterator<Item = (S, ArgumentType)>>(iter: T) -> Self {
        Self {
            arguments: iter
                .into_iter()
                .map(|(name, argument_type)| (name.into(), argument_type))
                .collect(),
        }
    }
}

impl Display for ArgumentSchema {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (name, argument_type) in self.iter() {
            if !first {
                formatter.write_str(" ")?;
            }
            first = false;
            write!(formatter, "<{name}:{argument_type}>")?;
        }

        Ok(())
    }
}

/// The full set of commands the server offers.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Catalog {
    commands: IndexMap<String, ArgumentSchema>,
}

impl Catalog {
    /// Parses and validates a catalog document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CatalogParse`] if the body is not a JSON object of
    /// objects of strings, or [`Error::EmptyName`] if any command or argument
    /// name is empty.
    pub fn from_json(body: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(body).map_err(Error::CatalogParse)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        for (name, schema) in &self.commands {
            if name.is_empty() {
                return Err(Error::EmptyName);
            }

            if schema.names().any(str::is_empty) {
                return Err(Error::EmptyName);
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ArgumentSchema> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgumentSchema)> {
        self.commands
            .iter()
            .map(|(name, schema)| (name.as_str(), schema))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, ArgumentSchema)> for Catalog {
    fn from_iter<T: IntoIterator<Item = (S, ArgumentSchema)>>(iter: T) -> Self {
        Self {
            commands: iter
                .into_iter()
                .map(|(name, schema)| (name.into(), schema))
                .collect(),
        }
    }
}

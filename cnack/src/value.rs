// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::{Display, Formatter, Write};

/// A runtime value. Every value serializes to exactly one of four textual
/// forms: a bare number, a quoted string, a bracketed array or a braced
/// struct.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Array(Vec<Value>),
    Struct(Vec<StructField>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    pub name: Option<String>,
    pub value: Value,
}

impl Value {
    pub const ZERO: Self = Self::Number(0.0);
    pub const TRUE: Self = Self::Number(1.0);
    pub const FALSE: Self = Self::Number(0.0);

    /// Arrays never hold more elements than this.
    pub const MAX_ARRAY_LEN: usize = 1 << 16;

    #[must_use]
    pub fn from_bool(b: bool) -> Self {
        if b { Self::TRUE } else { Self::FALSE }
    }

    /// Answers read from the input queue become numbers when they look like
    /// one, and strings otherwise.
    #[must_use]
    pub fn from_answer(answer: &str) -> Self {
        match answer.trim().parse::<f64>() {
            Ok(number) => Self::Number(number),
            Err(..) => Self::Text(answer.to_string()),
        }
    }

    #[must_use]
    pub fn zeroed_array(len: usize) -> Self {
        Self::Array(vec![Self::ZERO; len])
    }

    #[must_use]
    pub fn as_number(&self) -> f64 {
        match self {
            Self::Number(number) => *number,
            Self::Text(text) => text.trim().parse().unwrap_or(0.0),
            Self::Array(..) | Self::Struct(..) => 0.0,
        }
    }

    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Number(number) => *number != 0.0,
            Self::Text(text) => !text.is_empty(),
            Self::Array(elements) => !elements.is_empty(),
            Self::Struct(..) => true,
        }
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(..))
    }

    /// Array element access. Non-arrays, negative and out-of-range indices
    /// yield `None`.
    #[must_use]
    pub fn element(&self, index: f64) -> Option<&Value> {
        let Self::Array(elements) = self else {
            return None;
        };

        if index < 0.0 {
            return None;
        }

        elements.get(index as usize)
    }

    /// Overwrites an array element, growing the array with zeroes when the
    /// index lies past the end. A non-array value is turned into an array.
    /// Indices that are negative or at least [`Self::MAX_ARRAY_LEN`] are
    /// refused.
    pub fn set_element(&mut self, index: f64, value: Value) -> bool {
        if !(0.0..Self::MAX_ARRAY_LEN as f64).contains(&index) {
            return false;
        }

        if !matches!(self, Self::Array(..)) {
            *self = Self::Array(Vec::new());
        }

        let Self::Array(elements) = self else {
            return false;
        };

        let index = index as usize;
        if index >= elements.len() {
            elements.resize(index + 1, Self::ZERO);
        }

        elements[index] = value;
        true
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        let Self::Struct(fields) = self else {
            return None;
        };

        fields.iter()
            .find(|field| field.name.as_deref() == Some(name))
            .map(|field| &field.value)
    }

    pub fn set_field(&mut self, name: &str, value: Value) {
        if !matches!(self, Self::Struct(..)) {
            *self = Self::Struct(Vec::new());
        }

        let Self::Struct(fields) = self else {
            return;
        };

        match fields.iter_mut().find(|field| field.name.as_deref() == Some(name)) {
            Some(field) => field.value = value,
            None => fields.push(StructField {
                name: Some(name.to_string()),
                value,
            }),
        }
    }

    /// Gives the positional fields of a struct literal the given names.
    #[must_use]
    pub fn with_field_names<'a>(self, names: impl IntoIterator<Item = &'a str>) -> Self {
        let Self::Struct(mut fields) = self else {
            return self;
        };

        for (field, name) in fields.iter_mut().zip(names) {
            if field.name.is_none() {
                field.name = Some(name.to_string());
            }
        }

        Self::Struct(fields)
    }

    /// The serialized form, as stored in the symbol table.
    #[must_use]
    pub fn serialize(&self) -> String {
        let mut buffer = String::new();
        _ = self.write_serialized(&mut buffer);
        buffer
    }

    /// The text `display` prints: like the serialized form, but a string at
    /// the top level loses its quotes.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            _ => self.serialize(),
        }
    }

    fn write_serialized(&self, f: &mut impl Write) -> std::fmt::Result {
        match self {
            Self::Number(number) => f.write_str(&format_number(*number)),
            Self::Text(text) => write!(f, "\"{text}\""),
            Self::Array(elements) => {
                f.write_char('[')?;
                for (index, element) in elements.iter().enumerate() {
                    if index != 0 {
                        f.write_str(", ")?;
                    }
                    element.write_serialized(f)?;
                }
                f.write_char(']')
            }
            Self::Struct(fields) => {
                f.write_char('{')?;
                for (index, field) in fields.iter().enumerate() {
                    if index != 0 {
                        f.write_str(", ")?;
                    }
                    if let Some(name) = &field.name {
                        write!(f, "{name}: ")?;
                    }
                    field.value.write_serialized(f)?;
                }
                f.write_char('}')
            }
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.write_serialized(f)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Integral numbers print without a fractional part; `-0` prints as `0`.
#[must_use]
pub fn format_number(number: f64) -> String {
    if number == 0.0 {
        return "0".to_string();
    }

    format!("{number}")
}

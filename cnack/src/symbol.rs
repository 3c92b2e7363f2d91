// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub value: Value,
    pub is_array: bool,
    pub is_const: bool,
    /// The names this symbol aliases, if it was declared as an alias set.
    pub alias_targets: Option<Vec<String>>,
}

impl Symbol {
    #[must_use]
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
            is_array: false,
            is_const: false,
            alias_targets: None,
        }
    }

    #[must_use]
    pub const fn is_alias_set(&self) -> bool {
        self.alias_targets.is_some()
    }
}

/// One flat, insertion-ordered namespace. Lookup is a linear scan and
/// re-declaring a name overwrites the existing entry in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|symbol| symbol.name == name)
    }

    #[must_use]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        self.symbols.iter_mut().find(|symbol| symbol.name == name)
    }

    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).map(|symbol| &symbol.value)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Declares or redeclares a symbol. A redeclaration replaces every
    /// attribute but keeps the symbol's position.
    pub fn declare(&mut self, symbol: Symbol) {
        log::debug!("Declaring `{}` = {}", symbol.name, symbol.value);

        match self.get_mut(&symbol.name) {
            Some(existing) => *existing = symbol,
            None => self.symbols.push(symbol),
        }
    }

    /// Writes a value, creating a plain symbol when the name is unknown.
    pub fn set(&mut self, name: &str, value: Value) {
        log::debug!("Setting `{name}` = {value}");

        match self.get_mut(name) {
            Some(symbol) => symbol.value = value,
            None => self.symbols.push(Symbol::new(name, value)),
        }
    }

    /// Records `name` as an alias set over `targets`. Its value is the
    /// comma-joined list of target names.
    pub fn set_alias(&mut self, name: &str, targets: Vec<String>) {
        let mut symbol = Symbol::new(name, Value::Text(targets.join(",")));
        symbol.alias_targets = Some(targets);
        self.declare(symbol);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDefinition {
    pub name: String,
    pub fields: Vec<(String, Value)>,
}

impl StructDefinition {
    /// A fresh value of this type, with every field at its default.
    #[must_use]
    pub fn instantiate(&self) -> Value {
        let mut value = Value::Struct(Vec::new());

        for (name, default) in &self.fields {
            value.set_field(name, default.clone());
        }

        value
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

/// The user-defined types of one unit, registered by `struct` declarations.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    structs: Vec<StructDefinition>,
}

impl TypeRegistry {
    pub fn register(&mut self, definition: StructDefinition) {
        log::debug!("Registering struct `{}` with {} field(s)", definition.name, definition.fields.len());

        match self.structs.iter_mut().find(|existing| existing.name == definition.name) {
            Some(existing) => *existing = definition,
            None => self.structs.push(definition),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StructDefinition> {
        self.structs.iter().find(|definition| definition.name == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

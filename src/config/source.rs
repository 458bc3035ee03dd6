//! External configuration stores consulted when a provider setting is not
//! given explicitly.

use std::{collections::HashMap, path::Path};

use toml::{Table, Value};

use crate::prelude::*;

/// Read-only lookup of dotted configuration keys such as `static-auth.token`.
pub trait PropertySource: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn property(&self, key: &str) -> Option<String>;
}

impl<T: PropertySource + ?Sized> PropertySource for Box<T> {
    fn property(&self, key: &str) -> Option<String> {
        (**self).property(key)
    }
}

impl<T: PropertySource + ?Sized> PropertySource for std::sync::Arc<T> {
    fn property(&self, key: &str) -> Option<String> {
        (**self).property(key)
    }
}

/// In-memory properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl PropertySource for MapSource {
    fn property(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Process environment.
///
/// A dotted key is mapped to an upper-snake variable name, so
/// `static-auth.token` is read from `STATIC_AUTH_TOKEN`, or from
/// `APP_STATIC_AUTH_TOKEN` with the prefix `APP`.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    prefix: Option<String>,
}

impl EnvSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// Environment variable name consulted for `key`.
    pub fn var_name(&self, key: &str) -> String {
        let name: String = key
            .chars()
            .map(|c| match c {
                '.' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();
        match &self.prefix {
            Some(prefix) => format!("{}_{name}", prefix.to_ascii_uppercase()),
            None => name,
        }
    }
}

impl PropertySource for EnvSource {
    fn property(&self, key: &str) -> Option<String> {
        std::env::var(self.var_name(key)).ok()
    }
}

/// Properties read from a TOML document.
///
/// `static-auth.token` resolves to the `token` entry of the `[static-auth]`
/// table; a top-level quoted key `"static-auth.token"` is matched as well.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TomlSource {
    table: Table,
}

impl TomlSource {
    /// Load properties from a TOML file.
    pub fn from_file(file_path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(file_path)?;
        Self::from_toml(&contents)
    }

    /// Parse properties from a TOML string.
    pub fn from_toml(value: &str) -> Result<Self> {
        Ok(Self {
            table: toml::from_str(value)?,
        })
    }
}

fn lookup<'a>(table: &'a Table, key: &str) -> Option<&'a Value> {
    if let Some(value) = table.get(key) {
        return Some(value);
    }
    let (head, rest) = key.split_once('.')?;
    match table.get(head)? {
        Value::Table(inner) => lookup(inner, rest),
        _ => None,
    }
}

impl PropertySource for TomlSource {
    fn property(&self, key: &str) -> Option<String> {
        match lookup(&self.table, key)? {
            Value::String(s) => Some(s.clone()),
            Value::Array(_) | Value::Table(_) => None,
            scalar => Some(scalar.to_string()),
        }
    }
}

/// Ordered stack of sources; the first one holding a key wins.
#[derive(Default)]
pub struct LayeredSource {
    layers: Vec<Box<dyn PropertySource>>,
}

impl LayeredSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: impl PropertySource + 'static) -> Self {
        self.layers.push(Box::new(source));
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl PropertySource for LayeredSource {
    fn property(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.property(key))
    }
}

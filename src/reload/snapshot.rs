//! Immutable configuration snapshots.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Key holding the greeting template.
pub const MESSAGE_KEY: &str = "message";
/// Key holding the log level name.
pub const LEVEL_KEY: &str = "level";
/// Log level applied when a snapshot carries none.
pub const DEFAULT_LEVEL: &str = "INFO";

/// One fetched configuration: a flat, ordered string map.
///
/// Ordering makes equality independent of the source document's key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigSnapshot {
    entries: BTreeMap<String, String>,
}

impl ConfigSnapshot {
    /// Flatten a parsed document into a snapshot.
    ///
    /// Returns `None` if the top level is not a mapping. A `null`
    /// document (e.g. an empty YAML file) yields an empty snapshot.
    pub fn from_document(document: Value) -> Option<Self> {
        let object = match document {
            Value::Object(object) => object,
            Value::Null => return Some(Self::default()),
            _ => return None,
        };

        let entries = object
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::Null => return None,
                    Value::String(s) => s,
                    Value::Bool(b) => b.to_string(),
                    Value::Number(n) => n.to_string(),
                    nested => nested.to_string(),
                };
                Some((key, text))
            })
            .collect();

        Some(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// The greeting template, if configured.
    pub fn message(&self) -> Option<&str> {
        self.get(MESSAGE_KEY)
    }

    /// The configured log level, defaulting to `INFO`.
    pub fn level(&self) -> &str {
        self.get(LEVEL_KEY).unwrap_or(DEFAULT_LEVEL)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Substitute `name` into the first `%s` placeholder of `template`.
///
/// `%%` in the template is a literal `%`. Further `%s` placeholders are
/// kept as written; the name itself is inserted verbatim.
pub fn render_greeting(template: &str, name: &str) -> String {
    let mut out = String::with_capacity(template.len() + name.len());
    let mut substituted = false;
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if tail.starts_with("%%") {
            out.push('%');
            rest = &tail[2..];
        } else if !substituted && tail.starts_with("%s") {
            out.push_str(name);
            substituted = true;
            rest = &tail[2..];
        } else {
            out.push('%');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

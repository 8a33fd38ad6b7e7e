//! Template placeholder substitution
//!
//! Tokens look like `{name}`. Substitution is literal; a token with no value
//! is left in the text as written.

use std::collections::HashMap;

/// Token values for one document
#[derive(Debug, Clone, Default)]
pub struct Placeholders {
    values: HashMap<String, String>,
}

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a token value (name without braces)
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Replace every known `{token}` in `template`
    ///
    /// Values are inserted verbatim and never rescanned, so a value containing
    /// braces cannot trigger another substitution.
    pub fn apply(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find(['}', '{']) {
                Some(close) if after.as_bytes()[close] == b'}' => {
                    let name = &after[..close];
                    match self.values.get(name) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push('{');
                            out.push_str(name);
                            out.push('}');
                        }
                    }
                    rest = &after[close + 1..];
                }
                _ => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// One-shot substitution from `(name, value)` pairs
pub fn substitute(template: &str, pairs: &[(&str, &str)]) -> String {
    let mut placeholders = Placeholders::new();
    for (name, value) in pairs {
        placeholders.set(*name, *value);
    }
    placeholders.apply(template)
}

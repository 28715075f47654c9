use std::collections::HashMap;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::coerce::Payload;
use crate::handler::Handler;
use crate::parser::ConfigError;

/// The definition installed for each spelling of an option.
#[derive(Debug, Clone)]
pub struct OptionDef {
    key: String,
    handler: Handler,
    payload: Option<Payload>,
}

impl OptionDef {
    /// The key under which this option's values are recorded.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The handler that consumes this option's tokens.
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// The fixed value or coercer passed to the handler.
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }
}

/// Maps every recognized option spelling (ex: `-v`, `--verbose`) to its [`OptionDef`].
#[derive(Debug, Clone, Default)]
pub struct Registry {
    definitions: HashMap<String, OptionDef>,
}

impl Registry {
    /// Register an alias group.
    ///
    /// Each alias string may hold several whitespace separated aliases.
    /// Aliases are normalized before registration:
    /// * a single character `x` becomes `-x`,
    /// * a word without a leading hyphen `word` becomes `--word`,
    /// * a short cluster `-xyz` becomes `-x`, `-y`, `-z`.
    ///
    /// All aliases share the key derived from the last alias.
    /// An existing definition for the same spelling is replaced.
    /// Returns the key.
    pub fn register<I, S>(
        &mut self,
        aliases: I,
        handler: Handler,
        payload: Option<Payload>,
    ) -> Result<String, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut spellings: Vec<String> = Vec::default();

        for group in aliases {
            for alias in group.as_ref().split_whitespace() {
                spellings.extend(normalize(alias));
            }
        }

        let key = match spellings.last() {
            Some(last) => derive_key(last),
            None => {
                return Err(ConfigError(
                    "Cannot register an option without any aliases.".to_string(),
                ));
            }
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Registering {spellings:?} as '{key}' with {handler:?}.");
        }

        for spelling in spellings {
            self.definitions.insert(
                spelling,
                OptionDef {
                    key: key.clone(),
                    handler: handler.clone(),
                    payload: payload.clone(),
                },
            );
        }

        Ok(key)
    }

    /// Get the definition for an exact spelling.
    pub fn get(&self, spelling: &str) -> Option<&OptionDef> {
        self.definitions.get(spelling)
    }

    /// Whether the exact spelling is registered.
    pub fn contains(&self, spelling: &str) -> bool {
        self.definitions.contains_key(spelling)
    }

    /// Get the key for an exact spelling.
    pub fn key_of(&self, spelling: &str) -> Option<&str> {
        self.get(spelling).map(OptionDef::key)
    }

    /// Resolve an option name, written without hyphens, to its key.
    ///
    /// The name is tried as a key, then as a long alias (`--name`), then as a short alias (`-n`).
    pub fn resolve(&self, name: &str) -> Option<&str> {
        if let Some(def) = self.definitions.values().find(|def| def.key == name) {
            return Some(def.key());
        }

        if name.starts_with('-') {
            return None;
        }

        normalize(name)
            .iter()
            .find_map(|spelling| self.key_of(spelling))
    }

    /// Iterate the registered spellings, in no particular order.
    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    /// The number of registered spellings.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Normalize a single alias into one or more option spellings.
pub(crate) fn normalize(alias: &str) -> Vec<String> {
    if alias.chars().count() == 1 {
        return vec![format!("-{alias}")];
    }

    if !alias.starts_with('-') {
        return vec![format!("--{alias}")];
    }

    match alias.strip_prefix('-') {
        Some(cluster) if !cluster.starts_with('-') && !cluster.contains('-') => {
            cluster.chars().map(|c| format!("-{c}")).collect()
        }
        _ => vec![alias.to_string()],
    }
}

/// Derive the key for an option spelling: strip the leading hyphens and replace non-alphanumerics with `_`.
pub(crate) fn derive_key(spelling: &str) -> String {
    spelling
        .trim_start_matches('-')
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

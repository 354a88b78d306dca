mod rule;

#[cfg(test)]
mod tests;

pub use regex::Regex;
pub use rule::{EnvValue, Rule};

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

/// Header line of the aggregated validation failure message
const FAILURE_HEADER: &str = "Environment variables validation failed.";

/// One environment variable that failed its rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Full dotted path of the failing key
    pub path: Vec<String>,
    /// Original source value, `None` when the variable was absent
    pub raw: Option<String>,
    /// Rule-specific failure message
    pub message: String,
}

impl Issue {
    fn render(&self) -> String {
        format!(
            "[{}] is {} ({})",
            self.path.join("."),
            self.raw.as_deref().unwrap_or("undefined"),
            self.message
        )
    }
}

/// Startup-time environment validation failure
///
/// Aggregates every failing key into one error; callers are expected to let
/// it escape and abort startup.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("{}", render_failure(.0))]
    Validation(Vec<Issue>),
}

fn render_failure(issues: &[Issue]) -> String {
    let mut lines = vec![FAILURE_HEADER.to_owned()];
    lines.extend(issues.iter().map(Issue::render));
    lines.join("\n")
}

pub type Result<T> = std::result::Result<T, EnvError>;

/// Ordered set of bindings from variable name to validation rule
#[derive(Debug, Clone, Default)]
pub struct EnvSchema {
    bindings: Vec<(String, Rule)>,
}

impl EnvSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a rule to a variable name; evaluation follows insertion order
    pub fn key(mut self, name: impl Into<String>, rule: Rule) -> Self {
        self.bindings.push((name.into(), rule));
        self
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.bindings.iter().map(|(name, rule)| (name.as_str(), rule))
    }
}

/// Validated environment: the coerced values plus the schema that produced them
#[derive(Debug, Clone)]
pub struct EnvOutput {
    pub env: BTreeMap<String, EnvValue>,
    pub schema: EnvSchema,
}

impl EnvOutput {
    pub fn get(&self, name: &str) -> Option<&EnvValue> {
        self.env.get(name)
    }
}

/// Validate the process environment against the schema
///
/// Entries whose name or value is not valid Unicode are treated as absent,
/// so a bound key backed by such an entry reports `is undefined` instead of
/// panicking mid-iteration.
pub fn load(schema: &EnvSchema) -> Result<EnvOutput> {
    let source: HashMap<String, String> = std::env::vars_os()
        .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
        .collect();
    load_from(schema, &source)
}

/// Validate an explicit source mapping against the schema
///
/// Every binding is evaluated; nothing short-circuits. Any failure aborts
/// the whole load with an [`EnvError`] listing one line per failing key.
pub fn load_from(schema: &EnvSchema, source: &HashMap<String, String>) -> Result<EnvOutput> {
    let mut env = BTreeMap::new();
    let mut issues = Vec::new();

    for (name, rule) in schema.iter() {
        let raw = source.get(name).map(String::as_str);
        match rule.apply(raw) {
            Ok(Some(value)) => {
                env.insert(name.to_owned(), value);
            }
            Ok(None) => {}
            Err(message) => issues.push(Issue {
                path: name.split('.').map(ToOwned::to_owned).collect(),
                raw: raw.map(ToOwned::to_owned),
                message,
            }),
        }
    }

    if !issues.is_empty() {
        return Err(EnvError::Validation(issues));
    }

    tracing::debug!(keys = env.len(), "environment validated");
    Ok(EnvOutput {
        env,
        schema: schema.clone(),
    })
}

use regex::Regex;
use serde::Serialize;
use url::Url;

/// An environment value after coercion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EnvValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<String>),
}

impl EnvValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            EnvValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            EnvValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            EnvValue::Float(n) => Some(*n),
            EnvValue::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            EnvValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            EnvValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Numeric view used by the min/max/positive refinements
    fn numeric(&self) -> Option<f64> {
        match self {
            EnvValue::Int(n) => Some(*n as f64),
            EnvValue::Float(n) => Some(*n),
            _ => None,
        }
    }
}

/// Target type a raw string is coerced into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Str,
    Int,
    Float,
    Bool,
    List,
}

/// Secondary constraint run after coercion succeeds
#[derive(Debug, Clone)]
enum Refinement {
    Url,
    Pattern { regex: Regex, message: String },
    OneOf(Vec<String>),
    MinLen(usize),
    Positive,
    Min(f64),
    Max(f64),
}

impl Refinement {
    fn check(&self, value: &EnvValue) -> Result<(), String> {
        match self {
            Refinement::Url => match value.as_str() {
                Some(s) if Url::parse(s).is_ok() => Ok(()),
                _ => Err("Invalid URL".to_owned()),
            },
            Refinement::Pattern { regex, message } => match value.as_str() {
                Some(s) if regex.is_match(s) => Ok(()),
                _ => Err(message.clone()),
            },
            Refinement::OneOf(allowed) => match value.as_str() {
                Some(s) if allowed.iter().any(|a| a == s) => Ok(()),
                _ => Err(format!("Expected one of: {}", allowed.join(", "))),
            },
            Refinement::MinLen(min) => match value.as_str() {
                Some(s) if s.chars().count() >= *min => Ok(()),
                _ => Err(format!("Must be at least {min} characters")),
            },
            Refinement::Positive => match value.numeric() {
                Some(n) if n > 0.0 => Ok(()),
                _ => Err("Number must be positive".to_owned()),
            },
            Refinement::Min(min) => match value.numeric() {
                Some(n) if n >= *min => Ok(()),
                _ => Err(format!("Number must be >= {min}")),
            },
            Refinement::Max(max) => match value.numeric() {
                Some(n) if n <= *max => Ok(()),
                _ => Err(format!("Number must be <= {max}")),
            },
        }
    }
}

/// Validation rule for one environment variable
///
/// A rule names a target type plus a chain of refinements, applied in the
/// order they were added. Rules are required by default; `optional` skips
/// absent values and `default` substitutes a raw string before coercion.
#[derive(Debug, Clone)]
pub struct Rule {
    kind: Kind,
    refinements: Vec<Refinement>,
    required: bool,
    default: Option<String>,
}

impl Rule {
    fn of(kind: Kind) -> Self {
        Self {
            kind,
            refinements: Vec::new(),
            required: true,
            default: None,
        }
    }

    /// Accept the raw string as-is
    pub fn string() -> Self {
        Self::of(Kind::Str)
    }

    /// Coerce to a 64-bit integer
    pub fn integer() -> Self {
        Self::of(Kind::Int)
    }

    /// Coerce to a 64-bit float
    pub fn float() -> Self {
        Self::of(Kind::Float)
    }

    /// Coerce `"true"`/`"false"` to a boolean
    pub fn boolean() -> Self {
        Self::of(Kind::Bool)
    }

    /// Split on commas into a list of strings
    pub fn list() -> Self {
        Self::of(Kind::List)
    }

    /// Value must parse as a URL
    pub fn url(mut self) -> Self {
        self.refinements.push(Refinement::Url);
        self
    }

    /// Value must match the regex; `message` is reported on mismatch
    pub fn pattern(mut self, regex: Regex, message: impl Into<String>) -> Self {
        self.refinements.push(Refinement::Pattern {
            regex,
            message: message.into(),
        });
        self
    }

    /// Value must be one of the listed strings
    pub fn one_of<I, S>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.refinements
            .push(Refinement::OneOf(allowed.into_iter().map(Into::into).collect()));
        self
    }

    /// Value must be at least `min` characters long
    pub fn min_len(mut self, min: usize) -> Self {
        self.refinements.push(Refinement::MinLen(min));
        self
    }

    /// Numeric value must be > 0
    pub fn positive(mut self) -> Self {
        self.refinements.push(Refinement::Positive);
        self
    }

    /// Numeric value must be >= `min`
    pub fn min(mut self, min: f64) -> Self {
        self.refinements.push(Refinement::Min(min));
        self
    }

    /// Numeric value must be <= `max`
    pub fn max(mut self, max: f64) -> Self {
        self.refinements.push(Refinement::Max(max));
        self
    }

    /// Absent values are skipped instead of rejected
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Raw string substituted when the variable is absent, then coerced
    /// and refined like a real value
    pub fn default(mut self, raw: impl Into<String>) -> Self {
        self.default = Some(raw.into());
        self
    }

    /// Apply the rule to a raw value; `Ok(None)` means optional-and-absent
    pub(crate) fn apply(&self, raw: Option<&str>) -> Result<Option<EnvValue>, String> {
        let raw = match raw {
            Some(v) => v.to_owned(),
            None => match &self.default {
                Some(d) => d.clone(),
                None if self.required => return Err("Required".to_owned()),
                None => return Ok(None),
            },
        };

        let value = self.coerce(&raw)?;
        for refinement in &self.refinements {
            refinement.check(&value)?;
        }
        Ok(Some(value))
    }

    fn coerce(&self, raw: &str) -> Result<EnvValue, String> {
        match self.kind {
            Kind::Str => Ok(EnvValue::Str(raw.to_owned())),
            Kind::Int => raw
                .parse::<i64>()
                .map(EnvValue::Int)
                .map_err(|_| "Expected number".to_owned()),
            Kind::Float => raw
                .parse::<f64>()
                .map(EnvValue::Float)
                .map_err(|_| "Expected number".to_owned()),
            Kind::Bool => match raw {
                "true" => Ok(EnvValue::Bool(true)),
                "false" => Ok(EnvValue::Bool(false)),
                _ => Err("Expected boolean".to_owned()),
            },
            Kind::List => Ok(EnvValue::List(
                raw.split(',').map(ToOwned::to_owned).collect(),
            )),
        }
    }
}

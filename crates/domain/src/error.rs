//! Error taxonomy shared across the workspace.
//!
//! - [`ValidationError`] / [`SchemaDispatchError`] are user errors found
//!   before any code is generated. They are collected into
//!   [`ConfigErrors`] so one run reports all of them.
//! - [`UnresolvedReferenceError`] is fatal at scheduler drain time.
//! - [`DuplicateDeclarationError`] is a programming defect and aborts the run.

use crate::codegen::TypeRef;
use crate::id::Identifier;
use crate::path::ConfigPath;
use crate::schema::CapabilityTier;

/// A malformed, out-of-range, duplicate, or excess field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{path}: expected {expected}")]
    WrongType {
        path: ConfigPath,
        expected: &'static str,
    },

    #[error("{path}: value {value} is out of range, accepted {range}")]
    OutOfRange {
        path: ConfigPath,
        value: String,
        range: &'static str,
    },

    #[error("{path}: '{value}' is not a valid {format}")]
    InvalidFormat {
        path: ConfigPath,
        value: String,
        format: &'static str,
    },

    #[error("{path}: required field is missing")]
    MissingField { path: ConfigPath },

    #[error("{path}: unknown field")]
    UnknownField { path: ConfigPath },

    #[error("{path}: expected at least {min} entries, found {found}")]
    TooFewEntries {
        path: ConfigPath,
        min: usize,
        found: usize,
    },

    #[error("{path}: each entry must hold exactly one key, found {found}")]
    NotSingleKey { path: ConfigPath, found: usize },

    #[error("{path}: at least one of {} must be set", .keys.join(", "))]
    MissingAnyOf {
        path: ConfigPath,
        keys: &'static [&'static str],
    },

    #[error("{path}: found the effect name '{name}' twice, all effects must have unique names")]
    DuplicateName { path: ConfigPath, name: String },

    #[error("{path}: the id '{id}' is already used")]
    DuplicateId { path: ConfigPath, id: Identifier },

    #[error("{path}: '{first}' and '{second}' cannot be set together")]
    MutuallyExclusive {
        path: ConfigPath,
        first: &'static str,
        second: &'static str,
    },
}

/// An effect or action tag that is unknown, or not allowed for the light's
/// capability tier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaDispatchError {
    #[error("{path}: '{tag}' does not exist")]
    UnknownTag { path: ConfigPath, tag: String },

    #[error("{path}: the effect '{tag}' is not allowed for {tier} lights")]
    TagNotAllowed {
        path: ConfigPath,
        tag: String,
        tier: CapabilityTier,
    },
}

/// Any user error found while validating the configuration tree.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Dispatch(#[from] SchemaDispatchError),
}

/// Every [`ConfigError`] of one compilation, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, thiserror::Error)]
#[error("{}", summary(.0))]
pub struct ConfigErrors(Vec<ConfigError>);

impl ConfigErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: impl Into<ConfigError>) {
        self.0.push(error.into());
    }

    pub fn extend(&mut self, other: ConfigErrors) {
        self.0.extend(other.0);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigError> {
        self.0.iter()
    }

    /// `Ok(value)` when nothing was collected, the errors otherwise.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one error was collected.
    pub fn into_result<T>(self, value: T) -> Result<T, ConfigErrors> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Count first, then one error per indented line.
fn summary(errors: &[ConfigError]) -> String {
    let mut out = format!("invalid configuration ({} error(s))", errors.len());
    for error in errors {
        out.push_str(&format!("\n  {error}"));
    }
    out
}

impl From<ValidationError> for ConfigErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error.into()])
    }
}

impl From<SchemaDispatchError> for ConfigErrors {
    fn from(error: SchemaDispatchError) -> Self {
        Self(vec![error.into()])
    }
}

impl IntoIterator for ConfigErrors {
    type Item = ConfigError;
    type IntoIter = std::vec::IntoIter<ConfigError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// One identifier nobody declared, with the tasks left waiting on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub identifier: Identifier,
    pub waiting: Vec<String>,
}

/// The scheduler drained its queue while tasks were still blocked.
///
/// Either a declaration is genuinely missing from the configuration or two
/// tasks wait on each other.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("couldn't find {}", listed(.references))]
pub struct UnresolvedReferenceError {
    pub references: Vec<UnresolvedReference>,
}

impl UnresolvedReferenceError {
    /// Whether `identifier` is among the unresolved ones.
    #[must_use]
    pub fn mentions(&self, identifier: &str) -> bool {
        self.references
            .iter()
            .any(|r| r.identifier.as_str() == identifier)
    }
}

fn listed(references: &[UnresolvedReference]) -> String {
    references
        .iter()
        .map(|reference| {
            format!(
                "ID '{}' (required by {})",
                reference.identifier,
                reference.waiting.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// An identifier was declared twice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{identifier}' is already declared as {existing}, refusing to redeclare it as {attempted}")]
pub struct DuplicateDeclarationError {
    pub identifier: Identifier,
    pub existing: TypeRef,
    pub attempted: TypeRef,
}

/// Everything that can stop a compilation.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Config(#[from] ConfigErrors),

    #[error(transparent)]
    Unresolved(#[from] UnresolvedReferenceError),

    #[error(transparent)]
    DuplicateDeclaration(#[from] DuplicateDeclarationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> ConfigPath {
        ConfigPath::root().key("light").index(0).key("effects")
    }

    #[test]
    fn should_display_duplicate_name_with_path_and_value() {
        let err = ValidationError::DuplicateName {
            path: path().index(1),
            name: "Strobe".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "light[0].effects[1]: found the effect name 'Strobe' twice, all effects must have unique names"
        );
    }

    #[test]
    fn should_display_missing_any_of_keys() {
        let err = ValidationError::MissingAnyOf {
            path: path(),
            keys: &["state", "brightness"],
        };
        assert_eq!(
            err.to_string(),
            "light[0].effects: at least one of state, brightness must be set"
        );
    }

    #[test]
    fn should_display_tag_not_allowed_with_tier() {
        let err = SchemaDispatchError::TagNotAllowed {
            path: path().index(0),
            tag: "random".to_string(),
            tier: CapabilityTier::Binary,
        };
        assert_eq!(
            err.to_string(),
            "light[0].effects[0]: the effect 'random' is not allowed for binary lights"
        );
    }

    #[test]
    fn should_collect_errors_in_order() {
        let mut errors = ConfigErrors::new();
        errors.push(ValidationError::MissingField {
            path: path().key("name"),
        });
        errors.push(SchemaDispatchError::UnknownTag {
            path: path().index(0),
            tag: "sparkle".to_string(),
        });
        assert_eq!(errors.len(), 2);
        let collected: Vec<_> = errors.iter().collect();
        assert!(matches!(collected[0], ConfigError::Validation(_)));
        assert!(matches!(collected[1], ConfigError::Dispatch(_)));
    }

    #[test]
    fn should_return_ok_from_into_result_when_empty() {
        let errors = ConfigErrors::new();
        assert_eq!(errors.into_result(5).unwrap(), 5);
    }

    #[test]
    fn should_return_err_from_into_result_when_not_empty() {
        let errors = ConfigErrors::from(ValidationError::UnknownField { path: path() });
        assert!(errors.into_result(()).is_err());
    }

    #[test]
    fn should_display_every_unresolved_reference() {
        let err = UnresolvedReferenceError {
            references: vec![
                UnresolvedReference {
                    identifier: "kitchen".parse().unwrap(),
                    waiting: vec!["light.toggle 'light_toggleaction'".to_string()],
                },
                UnresolvedReference {
                    identifier: "porch".parse().unwrap(),
                    waiting: vec!["light 'porch_light'".to_string()],
                },
            ],
        };
        assert!(err.mentions("kitchen"));
        assert!(err.mentions("porch"));
        assert!(!err.mentions("garage"));
        assert_eq!(
            err.to_string(),
            "couldn't find ID 'kitchen' (required by light.toggle 'light_toggleaction'); ID 'porch' (required by light 'porch_light')"
        );
    }

    #[test]
    fn should_display_config_errors_one_per_line() {
        let mut errors = ConfigErrors::new();
        errors.push(ValidationError::MissingField {
            path: path().key("name"),
        });
        errors.push(ValidationError::UnknownField {
            path: path().key("colour"),
        });
        assert_eq!(
            errors.to_string(),
            "invalid configuration (2 error(s))\n  \
             light[0].effects.name: required field is missing\n  \
             light[0].effects.colour: unknown field"
        );
        let err: &dyn std::error::Error = &errors;
        assert!(err.source().is_none());
    }

    #[test]
    fn should_convert_config_errors_into_compile_error() {
        let errors = ConfigErrors::from(ValidationError::UnknownField { path: path() });
        let err: CompileError = errors.into();
        assert!(matches!(err, CompileError::Config(_)));
    }
}

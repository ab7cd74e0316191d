//! Field-by-field reader over one configuration mapping.
//!
//! Keeps track of the keys a schema consumed so leftovers can be reported
//! as unknown fields, and collects every error instead of stopping at the
//! first one.

use serde_json::{Map, Value};

use crate::error::{ConfigError, ConfigErrors, ValidationError};
use crate::id::{IdMinter, Identifier};
use crate::path::ConfigPath;
use crate::value::{self, Parser, Templatable};

pub(crate) struct Fields<'a> {
    map: Option<&'a Map<String, Value>>,
    path: ConfigPath,
    consumed: Vec<&'static str>,
    errors: ConfigErrors,
}

impl<'a> Fields<'a> {
    /// Start reading `value`; `null` reads as an empty mapping.
    pub(crate) fn new(value: &'a Value, path: &ConfigPath) -> Result<Self, ConfigErrors> {
        let map = match value {
            Value::Object(map) => Some(map),
            Value::Null => None,
            _ => {
                return Err(ValidationError::WrongType {
                    path: path.clone(),
                    expected: "mapping",
                }
                .into());
            }
        };
        Ok(Self {
            map,
            path: path.clone(),
            consumed: Vec::new(),
            errors: ConfigErrors::new(),
        })
    }

    pub(crate) fn path(&self) -> &ConfigPath {
        &self.path
    }

    pub(crate) fn has(&self, key: &str) -> bool {
        self.map.is_some_and(|map| map.contains_key(key))
    }

    pub(crate) fn error(&mut self, error: impl Into<ConfigError>) {
        self.errors.push(error);
    }

    /// Accept `key` without reading it.
    pub(crate) fn ignore(&mut self, key: &'static str) {
        self.consumed.push(key);
    }

    fn take(&mut self, key: &'static str) -> Option<&'a Value> {
        self.consumed.push(key);
        self.map.and_then(|map| map.get(key))
    }

    pub(crate) fn optional<T>(&mut self, key: &'static str, parser: Parser<T>) -> Option<T> {
        let raw = self.take(key)?;
        match parser(raw, &self.path.key(key)) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                self.errors.push(err);
                None
            }
        }
    }

    pub(crate) fn required<T>(&mut self, key: &'static str, parser: Parser<T>) -> Option<T> {
        if !self.has(key) {
            self.consumed.push(key);
            self.errors.push(ValidationError::MissingField {
                path: self.path.key(key),
            });
            return None;
        }
        self.optional(key, parser)
    }

    /// Optional field validated by a nested schema.
    pub(crate) fn nested<T>(
        &mut self,
        key: &'static str,
        validate: impl FnOnce(&'a Value, &ConfigPath) -> Result<T, ConfigErrors>,
    ) -> Option<T> {
        let raw = self.take(key)?;
        match validate(raw, &self.path.key(key)) {
            Ok(parsed) => Some(parsed),
            Err(errors) => {
                self.errors.extend(errors);
                None
            }
        }
    }

    pub(crate) fn templatable<T>(
        &mut self,
        key: &'static str,
        parser: Parser<T>,
    ) -> Option<Templatable<T>> {
        let raw = self.take(key)?;
        match value::templatable(raw, &self.path.key(key), parser) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                self.errors.push(err);
                None
            }
        }
    }

    /// Identifier declared by this node: the user's, when given under
    /// `key`, or a freshly minted one.
    pub(crate) fn declared_id(
        &mut self,
        key: &'static str,
        type_name: &str,
        minter: &mut IdMinter,
    ) -> Identifier {
        let Some(id) = self.optional(key, value::identifier) else {
            return minter.mint(type_name);
        };
        if !minter.claim(&id) {
            self.errors.push(ValidationError::DuplicateId {
                path: self.path.key(key),
                id: id.clone(),
            });
        }
        id
    }

    /// Finish reading: report unknown keys, then build the node.
    ///
    /// `make` only returns `None` when a required field failed, and that
    /// failure has already been recorded.
    pub(crate) fn build<T>(mut self, make: impl FnOnce() -> Option<T>) -> Result<T, ConfigErrors> {
        if let Some(map) = self.map {
            for key in map.keys() {
                if !self.consumed.contains(&key.as_str()) {
                    self.errors.push(ValidationError::UnknownField {
                        path: self.path.key(key),
                    });
                }
            }
        }
        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        make().ok_or(self.errors)
    }
}

/// Split a single-key mapping into its key and body.
pub(crate) fn single_entry<'a>(
    entry: &'a Value,
    path: &ConfigPath,
) -> Result<(&'a str, &'a Value), ConfigErrors> {
    let Value::Object(map) = entry else {
        return Err(ValidationError::WrongType {
            path: path.clone(),
            expected: "single-key mapping",
        }
        .into());
    };
    let mut entries = map.iter();
    match (entries.next(), entries.next()) {
        (Some((key, body)), None) => Ok((key.as_str(), body)),
        _ => Err(ValidationError::NotSingleKey {
            path: path.clone(),
            found: map.len(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn should_report_missing_required_field() {
        let raw = json!({});
        let mut fields = Fields::new(&raw, &ConfigPath::root()).unwrap();
        let name = fields.required("name", value::string);
        let result = fields.build(|| Some(name?));
        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors.iter().next(),
            Some(ConfigError::Validation(ValidationError::MissingField { .. }))
        ));
    }

    #[test]
    fn should_report_unknown_fields() {
        let raw = json!({"name": "a", "colour": "red"});
        let mut fields = Fields::new(&raw, &ConfigPath::root().key("strobe")).unwrap();
        let name = fields.optional("name", value::string);
        let errors = fields.build(|| name).unwrap_err();
        let first = errors.iter().next().unwrap();
        assert_eq!(first.to_string(), "strobe.colour: unknown field");
    }

    #[test]
    fn should_treat_null_as_empty_mapping() {
        let raw = Value::Null;
        let mut fields = Fields::new(&raw, &ConfigPath::root()).unwrap();
        let name = fields.optional("name", value::string);
        assert!(name.is_none());
        assert!(fields.build(|| Some(())).is_ok());
    }

    #[test]
    fn should_collect_every_field_error() {
        let raw = json!({"alpha": 4, "intensity": "lots"});
        let mut fields = Fields::new(&raw, &ConfigPath::root()).unwrap();
        let alpha = fields.optional("alpha", value::percentage);
        let intensity = fields.optional("intensity", value::percentage);
        let errors = fields.build(|| Some((alpha, intensity))).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn should_mint_identifier_when_absent() {
        let raw = json!({});
        let mut minter = IdMinter::new();
        let mut fields = Fields::new(&raw, &ConfigPath::root()).unwrap();
        let id = fields.declared_id("effect_id", "light::ScanEffect", &mut minter);
        assert_eq!(id.as_str(), "light_scaneffect");
    }

    #[test]
    fn should_report_duplicate_user_identifier() {
        let raw = json!({"id": "kitchen"});
        let mut minter = IdMinter::new();
        minter.claim(&"kitchen".parse().unwrap());
        let mut fields = Fields::new(&raw, &ConfigPath::root()).unwrap();
        let _ = fields.declared_id("id", "light::LightState", &mut minter);
        let errors = fields.build(|| Some(())).unwrap_err();
        assert!(matches!(
            errors.iter().next(),
            Some(ConfigError::Validation(ValidationError::DuplicateId { .. }))
        ));
    }

    #[test]
    fn should_reject_entries_with_several_keys() {
        let raw = json!({"strobe": {}, "flicker": {}});
        let errors = single_entry(&raw, &ConfigPath::root()).unwrap_err();
        assert!(matches!(
            errors.iter().next(),
            Some(ConfigError::Validation(ValidationError::NotSingleKey { found: 2, .. }))
        ));
    }

    #[test]
    fn should_reject_empty_entries() {
        let raw = json!({});
        let errors = single_entry(&raw, &ConfigPath::root()).unwrap_err();
        assert!(matches!(
            errors.iter().next(),
            Some(ConfigError::Validation(ValidationError::NotSingleKey { found: 0, .. }))
        ));
    }
}

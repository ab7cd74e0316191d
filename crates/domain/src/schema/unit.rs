//! A whole compilation unit: external declarations, lights, actions.

use serde::Serialize;
use serde_json::Value;

use super::fields::Fields;
use super::{ActionGroup, LightConfig};
use crate::codegen::TypeRef;
use crate::error::{ConfigErrors, ValidationError};
use crate::id::{IdMinter, Identifier};
use crate::path::ConfigPath;
use crate::value;

/// An entity registered by another subsystem, e.g. a light output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalDeclaration {
    pub id: Identifier,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Initializer, emitted verbatim.
    pub value: String,
}

impl ExternalDeclaration {
    fn validate(
        raw: &Value,
        path: &ConfigPath,
        minter: &mut IdMinter,
    ) -> Result<Self, ConfigErrors> {
        let mut fields = Fields::new(raw, path)?;
        let id = fields.required("id", value::identifier);
        if let Some(id) = &id
            && !minter.claim(id)
        {
            let path = fields.path().key("id");
            fields.error(ValidationError::DuplicateId {
                path,
                id: id.clone(),
            });
        }
        let ty = fields.required("type", value::string);
        let initializer = fields.required("value", value::string);
        fields.build(|| {
            Some(Self {
                id: id?,
                ty: TypeRef::new(ty?),
                value: initializer?,
            })
        })
    }
}

/// The validated configuration of one compilation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UnitConfig {
    #[serde(rename = "declare", skip_serializing_if = "Vec::is_empty")]
    pub declarations: Vec<ExternalDeclaration>,
    #[serde(rename = "light", skip_serializing_if = "Vec::is_empty")]
    pub lights: Vec<LightConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionGroup>,
}

fn validate_list<T>(
    raw: &Value,
    path: &ConfigPath,
    minter: &mut IdMinter,
    validate: fn(&Value, &ConfigPath, &mut IdMinter) -> Result<T, ConfigErrors>,
) -> Result<Vec<T>, ConfigErrors> {
    let mut errors = ConfigErrors::new();
    let mut items = Vec::new();
    for (index, entry) in value::ensure_list(raw).into_iter().enumerate() {
        match validate(entry, &path.index(index), minter) {
            Ok(item) => items.push(item),
            Err(errs) => errors.extend(errs),
        }
    }
    errors.into_result(items)
}

impl UnitConfig {
    /// Validate a raw configuration tree.
    ///
    /// Every id written in the tree is reserved first, so a minted name
    /// never takes one a later entry declares. Claiming and minting then
    /// follow source order (`declare`, then `light`, then `actions`), so the
    /// same tree always yields the same names.
    ///
    /// # Errors
    ///
    /// Returns every validation and dispatch error of the whole tree.
    pub fn validate(raw: &Value) -> Result<Self, ConfigErrors> {
        let mut minter = IdMinter::new();
        for id in explicit_ids(raw) {
            minter.reserve(id);
        }
        let mut fields = Fields::new(raw, &ConfigPath::root())?;
        let declarations = fields
            .nested("declare", |raw, path| {
                validate_list(raw, path, &mut minter, ExternalDeclaration::validate)
            })
            .unwrap_or_default();
        let lights = fields
            .nested("light", |raw, path| {
                validate_list(raw, path, &mut minter, LightConfig::validate)
            })
            .unwrap_or_default();
        let actions = fields
            .nested("actions", |raw, path| {
                validate_list(raw, path, &mut minter, ActionGroup::validate)
            })
            .unwrap_or_default();
        fields.build(|| {
            Some(Self {
                declarations,
                lights,
                actions,
            })
        })
    }
}

/// Well-formed ids written under `declare[].id`, `light[].id` and
/// `light[].effects[].<tag>.effect_id`. Malformed ones are left for
/// validation to report.
fn explicit_ids(raw: &Value) -> Vec<Identifier> {
    let mut written = Vec::new();
    for declaration in listed(raw, "declare") {
        written.extend(declaration.get("id"));
    }
    for light in listed(raw, "light") {
        written.extend(light.get("id"));
        for effect in listed(light, "effects") {
            let bodies = effect.as_object().into_iter().flat_map(|entry| entry.values());
            written.extend(bodies.filter_map(|body| body.get("effect_id")));
        }
    }
    written
        .into_iter()
        .filter_map(|id| id.as_str()?.parse().ok())
        .collect()
}

fn listed<'a>(node: &'a Value, key: &str) -> Vec<&'a Value> {
    node.get(key).map(value::ensure_list).unwrap_or_default()
}

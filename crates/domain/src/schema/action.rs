//! Light control actions, grouped by the argument type of the trigger that
//! runs them.

use serde::Serialize;
use serde_json::{Value, json};

use super::fields::{Fields, single_entry};
use crate::codegen::{Literal, TypeRef, host};
use crate::error::{ConfigErrors, SchemaDispatchError, ValidationError};
use crate::id::{IdMinter, Identifier};
use crate::path::ConfigPath;
use crate::value::{self, Milliseconds, Templatable};

/// Key of one action variant in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionTag {
    Toggle,
    TurnOff,
    TurnOn,
}

impl ActionTag {
    pub const ALL: [ActionTag; 3] = [Self::Toggle, Self::TurnOff, Self::TurnOn];

    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.as_str() == tag)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Toggle => "light.toggle",
            Self::TurnOff => "light.turn_off",
            Self::TurnOn => "light.turn_on",
        }
    }

    /// Host action class, before templating on the argument type.
    #[must_use]
    pub fn host_class(self) -> &'static str {
        match self {
            Self::Toggle => host::TOGGLE_ACTION,
            Self::TurnOff => host::TURN_OFF_ACTION,
            Self::TurnOn => host::TURN_ON_ACTION,
        }
    }

    /// Factory method on the light state that creates the action.
    #[must_use]
    pub fn factory(self) -> &'static str {
        match self {
            Self::Toggle => "make_toggle_action",
            Self::TurnOff => "make_turn_off_action",
            Self::TurnOn => "make_turn_on_action",
        }
    }
}

/// Body of `light.toggle` and `light.turn_off`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionAction {
    pub id: Identifier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition_length: Option<Templatable<Milliseconds>>,
}

/// Body of `light.turn_on`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnOnAction {
    pub id: Identifier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition_length: Option<Templatable<Milliseconds>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash_length: Option<Templatable<Milliseconds>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<Templatable<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub red: Option<Templatable<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub green: Option<Templatable<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blue: Option<Templatable<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white: Option<Templatable<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_temperature: Option<Templatable<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<Templatable<String>>,
}

/// A validated action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ActionConfig {
    #[serde(rename = "light.toggle")]
    Toggle(TransitionAction),
    #[serde(rename = "light.turn_off")]
    TurnOff(TransitionAction),
    #[serde(rename = "light.turn_on")]
    TurnOn(TurnOnAction),
}

/// One `set_<field>(value)` call an action needs, with the C++ type a
/// lambda for it must return.
#[derive(Debug, Clone, PartialEq)]
pub struct Setter {
    pub field: &'static str,
    pub value: Templatable<Literal>,
    pub return_type: &'static str,
}

impl Setter {
    #[must_use]
    pub fn method(&self) -> String {
        format!("set_{}", self.field)
    }
}

fn push_setter<T>(
    setters: &mut Vec<Setter>,
    field: &'static str,
    value: Option<&Templatable<T>>,
    return_type: &'static str,
) where
    T: Clone + Into<Literal>,
{
    if let Some(value) = value {
        setters.push(Setter {
            field,
            value: value.clone().map(Into::into),
            return_type,
        });
    }
}

impl ActionConfig {
    #[must_use]
    pub fn tag(&self) -> ActionTag {
        match self {
            Self::Toggle(_) => ActionTag::Toggle,
            Self::TurnOff(_) => ActionTag::TurnOff,
            Self::TurnOn(_) => ActionTag::TurnOn,
        }
    }

    /// The light the action controls.
    #[must_use]
    pub fn light(&self) -> &Identifier {
        match self {
            Self::Toggle(action) | Self::TurnOff(action) => &action.id,
            Self::TurnOn(action) => &action.id,
        }
    }

    /// Setters for every present field, in emission order.
    #[must_use]
    pub fn setters(&self) -> Vec<Setter> {
        let mut setters = Vec::new();
        match self {
            Self::Toggle(action) | Self::TurnOff(action) => {
                push_setter(
                    &mut setters,
                    "transition_length",
                    action.transition_length.as_ref(),
                    host::UINT32,
                );
            }
            Self::TurnOn(action) => {
                push_setter(
                    &mut setters,
                    "transition_length",
                    action.transition_length.as_ref(),
                    host::UINT32,
                );
                push_setter(&mut setters, "flash_length", action.flash_length.as_ref(), host::UINT32);
                push_setter(&mut setters, "brightness", action.brightness.as_ref(), host::FLOAT);
                push_setter(&mut setters, "red", action.red.as_ref(), host::FLOAT);
                push_setter(&mut setters, "green", action.green.as_ref(), host::FLOAT);
                push_setter(&mut setters, "blue", action.blue.as_ref(), host::FLOAT);
                push_setter(&mut setters, "white", action.white.as_ref(), host::FLOAT);
                push_setter(
                    &mut setters,
                    "color_temperature",
                    action.color_temperature.as_ref(),
                    host::FLOAT,
                );
                push_setter(&mut setters, "effect", action.effect.as_ref(), host::STD_STRING);
            }
        }
        setters
    }

    fn validate(tag: ActionTag, body: &Value, path: &ConfigPath) -> Result<Self, ConfigErrors> {
        // A bare string is shorthand for `{id: <string>}`.
        let expanded;
        let body = if body.is_string() {
            expanded = json!({ "id": body });
            &expanded
        } else {
            body
        };

        let mut fields = Fields::new(body, path)?;
        let id = fields.required("id", value::identifier);
        let transition_length = fields.templatable("transition_length", value::milliseconds);

        match tag {
            ActionTag::Toggle | ActionTag::TurnOff => fields.build(|| {
                let action = TransitionAction {
                    id: id?,
                    transition_length,
                };
                Some(if tag == ActionTag::Toggle {
                    Self::Toggle(action)
                } else {
                    Self::TurnOff(action)
                })
            }),
            ActionTag::TurnOn => {
                if fields.has("transition_length") && fields.has("flash_length") {
                    let path = fields.path().clone();
                    fields.error(ValidationError::MutuallyExclusive {
                        path,
                        first: "transition_length",
                        second: "flash_length",
                    });
                }
                let flash_length = fields.templatable("flash_length", value::milliseconds);
                let brightness = fields.templatable("brightness", value::percentage);
                let red = fields.templatable("red", value::percentage);
                let green = fields.templatable("green", value::percentage);
                let blue = fields.templatable("blue", value::percentage);
                let white = fields.templatable("white", value::percentage);
                let color_temperature =
                    fields.templatable("color_temperature", value::positive_float);
                let effect = fields.templatable("effect", value::string);
                fields.build(|| {
                    Some(Self::TurnOn(TurnOnAction {
                        id: id?,
                        transition_length,
                        flash_length,
                        brightness,
                        red,
                        green,
                        blue,
                        white,
                        color_temperature,
                        effect,
                    }))
                })
            }
        }
    }
}

/// An action together with the identifier its declaration will carry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionEntry {
    #[serde(skip)]
    pub action_id: Identifier,
    #[serde(flatten)]
    pub config: ActionConfig,
}

/// Actions that share one trigger argument type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionGroup {
    pub arg_type: TypeRef,
    #[serde(rename = "then")]
    pub actions: Vec<ActionEntry>,
}

fn type_name(raw: &Value, path: &ConfigPath) -> Result<TypeRef, ValidationError> {
    let name = value::string(raw, path)?;
    if name.trim().is_empty() {
        return Err(ValidationError::InvalidFormat {
            path: path.clone(),
            value: name,
            format: "type name",
        });
    }
    Ok(TypeRef::new(name.trim()))
}

impl ActionGroup {
    /// Validate one `{arg_type, then}` group. Action ids are minted in input
    /// order.
    ///
    /// # Errors
    ///
    /// Returns every error found in the group.
    pub fn validate(
        raw: &Value,
        path: &ConfigPath,
        minter: &mut IdMinter,
    ) -> Result<Self, ConfigErrors> {
        let mut fields = Fields::new(raw, path)?;
        let arg_type = fields
            .optional("arg_type", type_name)
            .unwrap_or_else(|| TypeRef::new(host::NO_ARG));
        let actions = fields.nested("then", |raw, path| validate_actions(raw, path, minter));
        if !fields.has("then") {
            let path = fields.path().key("then");
            fields.error(ValidationError::MissingField { path });
        }
        fields.build(|| {
            Some(Self {
                arg_type,
                actions: actions?,
            })
        })
    }
}

fn validate_actions(
    raw: &Value,
    path: &ConfigPath,
    minter: &mut IdMinter,
) -> Result<Vec<ActionEntry>, ConfigErrors> {
    let mut errors = ConfigErrors::new();
    let mut actions = Vec::new();
    for (index, entry) in value::ensure_list(raw).into_iter().enumerate() {
        match validate_action(entry, &path.index(index)) {
            Ok(config) => actions.push(ActionEntry {
                action_id: minter.mint(config.tag().host_class()),
                config,
            }),
            Err(errs) => errors.extend(errs),
        }
    }
    errors.into_result(actions)
}

fn validate_action(entry: &Value, path: &ConfigPath) -> Result<ActionConfig, ConfigErrors> {
    let (key, body) = single_entry(entry, path)?;
    let Some(tag) = ActionTag::parse(key) else {
        return Err(SchemaDispatchError::UnknownTag {
            path: path.clone(),
            tag: key.to_string(),
        }
        .into());
    };
    ActionConfig::validate(tag, body, &path.key(key))
}

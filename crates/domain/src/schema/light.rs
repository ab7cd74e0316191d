//! Light entries of the configuration.

use serde::Serialize;
use serde_json::Value;

use super::fields::Fields;
use super::{CapabilityTier, EffectConfig, validate_effects};
use crate::codegen::host;
use crate::error::{ConfigErrors, ValidationError};
use crate::id::{IdMinter, Identifier};
use crate::path::ConfigPath;
use crate::value::{self, Milliseconds};

/// Output platform of a light; decides its capability tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LightPlatform {
    Binary,
    Monochromatic,
    Rgb,
    Rgbw,
    FastledClockless,
    FastledSpi,
}

impl LightPlatform {
    pub const ALL: [LightPlatform; 6] = [
        Self::Binary,
        Self::Monochromatic,
        Self::Rgb,
        Self::Rgbw,
        Self::FastledClockless,
        Self::FastledSpi,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Monochromatic => "monochromatic",
            Self::Rgb => "rgb",
            Self::Rgbw => "rgbw",
            Self::FastledClockless => "fastled_clockless",
            Self::FastledSpi => "fastled_spi",
        }
    }

    #[must_use]
    pub fn tier(self) -> CapabilityTier {
        match self {
            Self::Binary => CapabilityTier::Binary,
            Self::Monochromatic => CapabilityTier::Monochromatic,
            Self::Rgb | Self::Rgbw => CapabilityTier::Rgb,
            Self::FastledClockless | Self::FastledSpi => CapabilityTier::Addressable,
        }
    }

    fn parse(raw: &Value, path: &ConfigPath) -> Result<Self, ValidationError> {
        let name = value::string(raw, path)?;
        Self::ALL
            .into_iter()
            .find(|platform| platform.as_str() == name)
            .ok_or(ValidationError::InvalidFormat {
                path: path.clone(),
                value: name,
                format: "light platform",
            })
    }
}

/// A validated light.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightConfig {
    pub id: Identifier,
    pub name: String,
    pub platform: LightPlatform,
    pub output: Identifier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_transition_length: Option<Milliseconds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gamma_correct: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<EffectConfig>,
}

impl LightConfig {
    /// Validate one light entry; its effects are checked against the tier
    /// of its platform.
    ///
    /// # Errors
    ///
    /// Returns every error found in the entry and its effects.
    pub fn validate(
        raw: &Value,
        path: &ConfigPath,
        minter: &mut IdMinter,
    ) -> Result<Self, ConfigErrors> {
        let mut fields = Fields::new(raw, path)?;
        let id = fields.declared_id("id", host::LIGHT_STATE, minter);
        let name = fields.required("name", value::string);
        let platform = fields.required("platform", LightPlatform::parse);
        let output = fields.required("output", value::identifier);
        let internal = fields.optional("internal", value::boolean);
        let default_transition_length =
            fields.optional("default_transition_length", value::milliseconds);
        let gamma_correct = fields.optional("gamma_correct", value::positive_float);
        // Without a valid platform there is no tier to check effects against.
        let effects = match platform {
            Some(platform) => fields
                .nested("effects", |raw, path| {
                    validate_effects(platform.tier()).validate(raw, path, minter)
                })
                .unwrap_or_default(),
            None => {
                fields.ignore("effects");
                Vec::new()
            }
        };
        fields.build(|| {
            Some(Self {
                id,
                name: name?,
                platform: platform?,
                output: output?,
                internal,
                default_transition_length,
                gamma_correct,
                effects,
            })
        })
    }

    #[must_use]
    pub fn tier(&self) -> CapabilityTier {
        self.platform.tier()
    }
}

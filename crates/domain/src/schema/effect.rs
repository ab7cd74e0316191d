//! Effect variants and the per-tier effect list validator.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use super::fields::{Fields, single_entry};
use super::{CapabilityTier, EffectTag};
use crate::error::{ConfigErrors, SchemaDispatchError, ValidationError};
use crate::id::{IdMinter, Identifier};
use crate::path::ConfigPath;
use crate::value::{self, LambdaSource, Milliseconds};

/// `lambda` and `fastled_lambda`: user code run on every update.
///
/// Declared under `effect_id` like every other effect, instead of being
/// passed inline to `add_effects`, so the id may also be written by the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LambdaEffect {
    pub effect_id: Identifier,
    pub name: String,
    pub lambda: LambdaSource,
    pub update_interval: Milliseconds,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RandomEffect {
    pub effect_id: Identifier,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition_length: Option<Milliseconds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_interval: Option<Milliseconds>,
}

/// One step of a strobe sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrobeColor {
    pub state: bool,
    pub brightness: f32,
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub white: f32,
    pub duration: Milliseconds,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrobeEffect {
    pub effect_id: Identifier,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<StrobeColor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlickerEffect {
    pub effect_id: Identifier,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RainbowEffect {
    pub effect_id: Identifier,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

/// One segment pushed by a color wipe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorWipeColor {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub random: bool,
    pub num_leds: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorWipeEffect {
    pub effect_id: Identifier,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<ColorWipeColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_led_interval: Option<Milliseconds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanEffect {
    pub effect_id: Identifier,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_interval: Option<Milliseconds>,
}

/// `fastled_twinkle` and `fastled_random_twinkle`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwinkleEffect {
    pub effect_id: Identifier,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twinkle_probability: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_interval: Option<Milliseconds>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FireworksEffect {
    pub effect_id: Identifier,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_interval: Option<Milliseconds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spark_probability: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_random_color: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fade_out_rate: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FastledFlickerEffect {
    pub effect_id: Identifier,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_interval: Option<Milliseconds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f32>,
}

/// A validated effect, tagged the same way as in the configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectConfig {
    Lambda(LambdaEffect),
    Random(RandomEffect),
    Strobe(StrobeEffect),
    Flicker(FlickerEffect),
    FastledLambda(LambdaEffect),
    FastledRainbow(RainbowEffect),
    FastledColorWipe(ColorWipeEffect),
    FastledScan(ScanEffect),
    FastledTwinkle(TwinkleEffect),
    FastledRandomTwinkle(TwinkleEffect),
    FastledFireworks(FireworksEffect),
    FastledFlicker(FastledFlickerEffect),
}

impl EffectConfig {
    #[must_use]
    pub fn tag(&self) -> EffectTag {
        match self {
            Self::Lambda(_) => EffectTag::Lambda,
            Self::Random(_) => EffectTag::Random,
            Self::Strobe(_) => EffectTag::Strobe,
            Self::Flicker(_) => EffectTag::Flicker,
            Self::FastledLambda(_) => EffectTag::FastledLambda,
            Self::FastledRainbow(_) => EffectTag::FastledRainbow,
            Self::FastledColorWipe(_) => EffectTag::FastledColorWipe,
            Self::FastledScan(_) => EffectTag::FastledScan,
            Self::FastledTwinkle(_) => EffectTag::FastledTwinkle,
            Self::FastledRandomTwinkle(_) => EffectTag::FastledRandomTwinkle,
            Self::FastledFireworks(_) => EffectTag::FastledFireworks,
            Self::FastledFlicker(_) => EffectTag::FastledFlicker,
        }
    }

    fn header(&self) -> (&Identifier, &str) {
        match self {
            Self::Lambda(e) | Self::FastledLambda(e) => (&e.effect_id, &e.name),
            Self::Random(e) => (&e.effect_id, &e.name),
            Self::Strobe(e) => (&e.effect_id, &e.name),
            Self::Flicker(e) => (&e.effect_id, &e.name),
            Self::FastledRainbow(e) => (&e.effect_id, &e.name),
            Self::FastledColorWipe(e) => (&e.effect_id, &e.name),
            Self::FastledScan(e) => (&e.effect_id, &e.name),
            Self::FastledTwinkle(e) | Self::FastledRandomTwinkle(e) => (&e.effect_id, &e.name),
            Self::FastledFireworks(e) => (&e.effect_id, &e.name),
            Self::FastledFlicker(e) => (&e.effect_id, &e.name),
        }
    }

    #[must_use]
    pub fn effect_id(&self) -> &Identifier {
        self.header().0
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.header().1
    }

    fn validate(
        tag: EffectTag,
        body: &Value,
        path: &ConfigPath,
        minter: &mut IdMinter,
    ) -> Result<Self, ConfigErrors> {
        let mut fields = Fields::new(body, path)?;
        let effect_id = fields.declared_id("effect_id", tag.host_class(), minter);
        let name = match tag.default_name() {
            Some(default) => Some(
                fields
                    .optional("name", value::string)
                    .unwrap_or_else(|| default.to_string()),
            ),
            None => fields.required("name", value::string),
        };

        match tag {
            EffectTag::Lambda | EffectTag::FastledLambda => {
                let lambda = fields.required("lambda", value::lambda);
                let update_interval = fields
                    .optional("update_interval", value::milliseconds)
                    .unwrap_or_default();
                fields.build(|| {
                    let effect = LambdaEffect {
                        effect_id,
                        name: name?,
                        lambda: lambda?,
                        update_interval,
                    };
                    Some(if tag == EffectTag::Lambda {
                        Self::Lambda(effect)
                    } else {
                        Self::FastledLambda(effect)
                    })
                })
            }
            EffectTag::Random => {
                let transition_length = fields.optional("transition_length", value::milliseconds);
                let update_interval = fields.optional("update_interval", value::milliseconds);
                fields.build(|| {
                    Some(Self::Random(RandomEffect {
                        effect_id,
                        name: name?,
                        transition_length,
                        update_interval,
                    }))
                })
            }
            EffectTag::Strobe => {
                let colors = fields.nested("colors", strobe_colors).unwrap_or_default();
                fields.build(|| {
                    Some(Self::Strobe(StrobeEffect {
                        effect_id,
                        name: name?,
                        colors,
                    }))
                })
            }
            EffectTag::Flicker => {
                let alpha = fields.optional("alpha", value::percentage);
                let intensity = fields.optional("intensity", value::percentage);
                fields.build(|| {
                    Some(Self::Flicker(FlickerEffect {
                        effect_id,
                        name: name?,
                        alpha,
                        intensity,
                    }))
                })
            }
            EffectTag::FastledRainbow => {
                let speed = fields.optional("speed", value::uint32);
                let width = fields.optional("width", value::uint32);
                fields.build(|| {
                    Some(Self::FastledRainbow(RainbowEffect {
                        effect_id,
                        name: name?,
                        speed,
                        width,
                    }))
                })
            }
            EffectTag::FastledColorWipe => {
                let colors = fields.nested("colors", color_wipe_colors).unwrap_or_default();
                let add_led_interval = fields.optional("add_led_interval", value::milliseconds);
                let reverse = fields.optional("reverse", value::boolean);
                fields.build(|| {
                    Some(Self::FastledColorWipe(ColorWipeEffect {
                        effect_id,
                        name: name?,
                        colors,
                        add_led_interval,
                        reverse,
                    }))
                })
            }
            EffectTag::FastledScan => {
                let move_interval = fields.optional("move_interval", value::milliseconds);
                fields.build(|| {
                    Some(Self::FastledScan(ScanEffect {
                        effect_id,
                        name: name?,
                        move_interval,
                    }))
                })
            }
            EffectTag::FastledTwinkle | EffectTag::FastledRandomTwinkle => {
                let twinkle_probability = fields.optional("twinkle_probability", value::percentage);
                let progress_interval = fields.optional("progress_interval", value::milliseconds);
                fields.build(|| {
                    let effect = TwinkleEffect {
                        effect_id,
                        name: name?,
                        twinkle_probability,
                        progress_interval,
                    };
                    Some(if tag == EffectTag::FastledTwinkle {
                        Self::FastledTwinkle(effect)
                    } else {
                        Self::FastledRandomTwinkle(effect)
                    })
                })
            }
            EffectTag::FastledFireworks => {
                let update_interval = fields.optional("update_interval", value::milliseconds);
                let spark_probability = fields.optional("spark_probability", value::percentage);
                let use_random_color = fields.optional("use_random_color", value::boolean);
                let fade_out_rate = fields.optional("fade_out_rate", value::uint8);
                fields.build(|| {
                    Some(Self::FastledFireworks(FireworksEffect {
                        effect_id,
                        name: name?,
                        update_interval,
                        spark_probability,
                        use_random_color,
                        fade_out_rate,
                    }))
                })
            }
            EffectTag::FastledFlicker => {
                let update_interval = fields.optional("update_interval", value::milliseconds);
                let intensity = fields.optional("intensity", value::percentage);
                fields.build(|| {
                    Some(Self::FastledFlicker(FastledFlickerEffect {
                        effect_id,
                        name: name?,
                        update_interval,
                        intensity,
                    }))
                })
            }
        }
    }
}

const STROBE_COLOR_KEYS: &[&str] = &["state", "brightness", "red", "green", "blue", "white"];

fn strobe_colors(raw: &Value, path: &ConfigPath) -> Result<Vec<StrobeColor>, ConfigErrors> {
    let entries = value::ensure_list(raw);
    let mut errors = ConfigErrors::new();
    if let Err(err) = value::min_entries(path, entries.len(), 2) {
        errors.push(err);
    }
    let mut colors = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match strobe_color(entry, &path.index(index)) {
            Ok(color) => colors.push(color),
            Err(errs) => errors.extend(errs),
        }
    }
    errors.into_result(colors)
}

fn strobe_color(raw: &Value, path: &ConfigPath) -> Result<StrobeColor, ConfigErrors> {
    let mut fields = Fields::new(raw, path)?;
    if !STROBE_COLOR_KEYS.iter().any(|key| fields.has(key)) {
        fields.error(ValidationError::MissingAnyOf {
            path: path.clone(),
            keys: STROBE_COLOR_KEYS,
        });
    }
    let state = fields.optional("state", value::boolean).unwrap_or(true);
    let brightness = fields.optional("brightness", value::percentage).unwrap_or(1.0);
    let red = fields.optional("red", value::percentage).unwrap_or(1.0);
    let green = fields.optional("green", value::percentage).unwrap_or(1.0);
    let blue = fields.optional("blue", value::percentage).unwrap_or(1.0);
    let white = fields.optional("white", value::percentage).unwrap_or(1.0);
    let duration = fields.required("duration", value::milliseconds);
    fields.build(|| {
        Some(StrobeColor {
            state,
            brightness,
            red,
            green,
            blue,
            white,
            duration: duration?,
        })
    })
}

fn color_wipe_colors(raw: &Value, path: &ConfigPath) -> Result<Vec<ColorWipeColor>, ConfigErrors> {
    let mut errors = ConfigErrors::new();
    let mut colors = Vec::new();
    for (index, entry) in value::ensure_list(raw).into_iter().enumerate() {
        match color_wipe_color(entry, &path.index(index)) {
            Ok(color) => colors.push(color),
            Err(errs) => errors.extend(errs),
        }
    }
    errors.into_result(colors)
}

fn led_count(raw: &Value, path: &ConfigPath) -> Result<u32, ValidationError> {
    let count = value::uint32(raw, path)?;
    if count == 0 {
        return Err(ValidationError::OutOfRange {
            path: path.clone(),
            value: raw.to_string(),
            range: "[1, 4294967295]",
        });
    }
    Ok(count)
}

fn color_wipe_color(raw: &Value, path: &ConfigPath) -> Result<ColorWipeColor, ConfigErrors> {
    let mut fields = Fields::new(raw, path)?;
    let red = fields.optional("red", value::percentage).unwrap_or(1.0);
    let green = fields.optional("green", value::percentage).unwrap_or(1.0);
    let blue = fields.optional("blue", value::percentage).unwrap_or(1.0);
    let random = fields.optional("random", value::boolean).unwrap_or(false);
    let num_leds = fields.required("num_leds", led_count);
    fields.build(|| {
        Some(ColorWipeColor {
            red,
            green,
            blue,
            random,
            num_leds: num_leds?,
        })
    })
}

/// Effect list validator bound to one capability tier.
#[derive(Debug, Clone, Copy)]
pub struct EffectsValidator {
    tier: CapabilityTier,
}

/// Build the effect list validator for lights of `tier`.
#[must_use]
pub fn validate_effects(tier: CapabilityTier) -> EffectsValidator {
    EffectsValidator { tier }
}

impl EffectsValidator {
    #[must_use]
    pub fn tier(&self) -> CapabilityTier {
        self.tier
    }

    /// Validate a sequence (or single item) of single-key effect mappings.
    ///
    /// Effect ids are claimed or minted through `minter`, in input order.
    ///
    /// # Errors
    ///
    /// Returns every [`ValidationError`] and [`SchemaDispatchError`] found
    /// across the list, including repeated effect names.
    pub fn validate(
        &self,
        raw: &Value,
        path: &ConfigPath,
        minter: &mut IdMinter,
    ) -> Result<Vec<EffectConfig>, ConfigErrors> {
        let mut errors = ConfigErrors::new();
        let mut names = HashSet::new();
        let mut effects = Vec::new();

        for (index, entry) in value::ensure_list(raw).into_iter().enumerate() {
            let entry_path = path.index(index);
            match self.validate_entry(entry, &entry_path, minter) {
                Ok(effect) => {
                    if names.insert(effect.name().to_string()) {
                        effects.push(effect);
                    } else {
                        errors.push(ValidationError::DuplicateName {
                            path: entry_path,
                            name: effect.name().to_string(),
                        });
                    }
                }
                Err(errs) => errors.extend(errs),
            }
        }

        errors.into_result(effects)
    }

    fn validate_entry(
        &self,
        entry: &Value,
        path: &ConfigPath,
        minter: &mut IdMinter,
    ) -> Result<EffectConfig, ConfigErrors> {
        let (key, body) = single_entry(entry, path)?;
        let Some(tag) = EffectTag::parse(key) else {
            return Err(SchemaDispatchError::UnknownTag {
                path: path.clone(),
                tag: key.to_string(),
            }
            .into());
        };
        if !self.tier.allows(tag) {
            return Err(SchemaDispatchError::TagNotAllowed {
                path: path.clone(),
                tag: key.to_string(),
                tier: self.tier,
            }
            .into());
        }
        EffectConfig::validate(tag, body, &path.key(key), minter)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ConfigError;

    fn validate(tier: CapabilityTier, raw: &Value) -> Result<Vec<EffectConfig>, ConfigErrors> {
        let mut minter = IdMinter::new();
        validate_effects(tier).validate(raw, &ConfigPath::root().key("effects"), &mut minter)
    }

    fn first_error(errors: &ConfigErrors) -> &ConfigError {
        errors.iter().next().unwrap()
    }

    #[test]
    fn should_default_strobe_name_and_keep_color_order() {
        let raw = json!([{"strobe": {"colors": [
            {"state": true, "duration": "100ms"},
            {"state": false, "duration": 200},
        ]}}]);
        let effects = validate(CapabilityTier::Binary, &raw).unwrap();
        assert_eq!(effects.len(), 1);
        let EffectConfig::Strobe(strobe) = &effects[0] else {
            panic!("expected strobe, got {:?}", effects[0]);
        };
        assert_eq!(strobe.name, "Strobe");
        assert_eq!(strobe.effect_id.as_str(), "light_strobelighteffect");
        assert_eq!(strobe.colors.len(), 2);
        assert!(strobe.colors[0].state);
        assert!(!strobe.colors[1].state);
        assert_eq!(strobe.colors[1].duration, Milliseconds(200));
        assert!((strobe.colors[1].brightness - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn should_reject_strobe_with_a_single_color() {
        let raw = json!([{"strobe": {"colors": [{"state": true, "duration": "1s"}]}}]);
        let errors = validate(CapabilityTier::Binary, &raw).unwrap_err();
        assert!(matches!(
            first_error(&errors),
            ConfigError::Validation(ValidationError::TooFewEntries { min: 2, found: 1, .. })
        ));
    }

    #[test]
    fn should_require_one_color_key_per_strobe_step() {
        let raw = json!([{"strobe": {"colors": [
            {"duration": "1s"},
            {"brightness": "50%", "duration": "1s"},
        ]}}]);
        let errors = validate(CapabilityTier::Binary, &raw).unwrap_err();
        assert_eq!(errors.len(), 1);
        let err = first_error(&errors);
        assert!(matches!(
            err,
            ConfigError::Validation(ValidationError::MissingAnyOf { .. })
        ));
        assert!(err.to_string().starts_with("effects[0].strobe.colors[0]:"));
    }

    #[test]
    fn should_report_duplicate_effect_names() {
        let raw = json!([
            {"strobe": {"name": "Party"}},
            {"flicker": {"name": "Party"}},
        ]);
        let errors = validate(CapabilityTier::Monochromatic, &raw).unwrap_err();
        let err = first_error(&errors);
        assert!(matches!(
            err,
            ConfigError::Validation(ValidationError::DuplicateName { name, .. }) if name == "Party"
        ));
    }

    #[test]
    fn should_accept_unique_effect_names() {
        let raw = json!([{"strobe": null}, {"flicker": {}}]);
        let effects = validate(CapabilityTier::Monochromatic, &raw).unwrap();
        let names: Vec<_> = effects.iter().map(EffectConfig::name).collect();
        assert_eq!(names, vec!["Strobe", "Flicker"]);
    }

    #[test]
    fn should_reject_effect_outside_the_tier() {
        let raw = json!([{"random": {}}]);
        let errors = validate(CapabilityTier::Monochromatic, &raw).unwrap_err();
        assert!(matches!(
            first_error(&errors),
            ConfigError::Dispatch(SchemaDispatchError::TagNotAllowed {
                tier: CapabilityTier::Monochromatic,
                ..
            })
        ));
    }

    #[test]
    fn should_accept_effect_inside_the_tier() {
        let raw = json!({"random": {"transition_length": "2s"}});
        let effects = validate(CapabilityTier::Rgb, &raw).unwrap();
        assert!(matches!(
            &effects[0],
            EffectConfig::Random(RandomEffect {
                transition_length: Some(Milliseconds(2000)),
                update_interval: None,
                ..
            })
        ));
    }

    #[test]
    fn should_reject_unknown_effect_tag() {
        let raw = json!([{"sparkle": {}}]);
        let errors = validate(CapabilityTier::Addressable, &raw).unwrap_err();
        assert!(matches!(
            first_error(&errors),
            ConfigError::Dispatch(SchemaDispatchError::UnknownTag { tag, .. }) if tag == "sparkle"
        ));
    }

    #[test]
    fn should_require_name_and_code_for_lambda_effects() {
        let raw = json!([{"lambda": {}}]);
        let errors = validate(CapabilityTier::Binary, &raw).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|err| matches!(
            err,
            ConfigError::Validation(ValidationError::MissingField { .. })
        )));
    }

    #[test]
    fn should_extract_lambda_references() {
        let raw = json!([{"fastled_lambda": {
            "name": "Follow",
            "lambda": "it.all() = id(other).current_values;",
            "update_interval": "16ms",
        }}]);
        let effects = validate(CapabilityTier::Addressable, &raw).unwrap();
        let EffectConfig::FastledLambda(effect) = &effects[0] else {
            panic!("expected fastled_lambda, got {:?}", effects[0]);
        };
        assert_eq!(effect.lambda.requires()[0].as_str(), "other");
        assert_eq!(effect.update_interval, Milliseconds(16));
    }

    #[test]
    fn should_keep_user_effect_id() {
        let raw = json!([{"fastled_scan": {"effect_id": "scanner"}}]);
        let effects = validate(CapabilityTier::Addressable, &raw).unwrap();
        assert_eq!(effects[0].effect_id().as_str(), "scanner");
    }

    #[test]
    fn should_reject_color_wipe_without_leds() {
        let raw = json!([{"fastled_color_wipe": {"colors": [{"red": 1.0, "num_leds": 0}]}}]);
        let errors = validate(CapabilityTier::Addressable, &raw).unwrap_err();
        assert!(matches!(
            first_error(&errors),
            ConfigError::Validation(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn should_reject_unknown_effect_field() {
        let raw = json!([{"fastled_fireworks": {"sparks": 3}}]);
        let errors = validate(CapabilityTier::Addressable, &raw).unwrap_err();
        assert_eq!(
            first_error(&errors).to_string(),
            "effects[0].fastled_fireworks.sparks: unknown field"
        );
    }

    #[test]
    fn should_reject_entry_with_two_tags() {
        let raw = json!([{"strobe": {}, "flicker": {}}]);
        let errors = validate(CapabilityTier::Monochromatic, &raw).unwrap_err();
        assert!(matches!(
            first_error(&errors),
            ConfigError::Validation(ValidationError::NotSingleKey { found: 2, .. })
        ));
    }

    #[test]
    fn should_serialize_back_to_the_input_shape() {
        let raw = json!([{"fastled_fireworks": {"name": "Boom", "fade_out_rate": 120}}]);
        let effects = validate(CapabilityTier::Addressable, &raw).unwrap();
        let dumped = serde_json::to_value(&effects).unwrap();
        assert_eq!(
            dumped,
            json!([{"fastled_fireworks": {
                "effect_id": "light_fastledfireworkseffect",
                "name": "Boom",
                "fade_out_rate": 120,
            }}])
        );
    }
}

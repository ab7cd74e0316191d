//! Schema registry: capability tiers, effect tags, and the validators that
//! turn raw configuration into typed nodes.
//!
//! Tag dispatch is an exhaustive `match` over [`EffectTag`] and
//! [`ActionTag`]; the string tags only exist at the input boundary.

mod action;
mod effect;
mod fields;
mod light;
mod unit;

use std::fmt;

use serde::Serialize;

pub use action::{ActionConfig, ActionEntry, ActionGroup, ActionTag, Setter, TransitionAction, TurnOnAction};
pub use effect::{
    ColorWipeColor, ColorWipeEffect, EffectConfig, EffectsValidator, FastledFlickerEffect,
    FireworksEffect, FlickerEffect, LambdaEffect, RainbowEffect, RandomEffect, ScanEffect,
    StrobeColor, StrobeEffect, TwinkleEffect, validate_effects,
};
pub use light::{LightConfig, LightPlatform};
pub use unit::{ExternalDeclaration, UnitConfig};

use crate::codegen::host;

/// What a light's output can render. Each tier allows every effect of the
/// tiers below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityTier {
    Binary,
    Monochromatic,
    Rgb,
    Addressable,
}

impl CapabilityTier {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Monochromatic => "monochromatic",
            Self::Rgb => "rgb",
            Self::Addressable => "addressable",
        }
    }

    #[must_use]
    pub fn allows(self, tag: EffectTag) -> bool {
        tag.min_tier() <= self
    }

    /// Every effect tag this tier accepts, in declaration order.
    pub fn allowed_effects(self) -> impl Iterator<Item = EffectTag> {
        EffectTag::ALL.into_iter().filter(move |tag| self.allows(*tag))
    }
}

impl fmt::Display for CapabilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key of one effect variant in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectTag {
    Lambda,
    Strobe,
    Flicker,
    Random,
    FastledLambda,
    FastledRainbow,
    FastledColorWipe,
    FastledScan,
    FastledTwinkle,
    FastledRandomTwinkle,
    FastledFireworks,
    FastledFlicker,
}

impl EffectTag {
    pub const ALL: [EffectTag; 12] = [
        Self::Lambda,
        Self::Strobe,
        Self::Flicker,
        Self::Random,
        Self::FastledLambda,
        Self::FastledRainbow,
        Self::FastledColorWipe,
        Self::FastledScan,
        Self::FastledTwinkle,
        Self::FastledRandomTwinkle,
        Self::FastledFireworks,
        Self::FastledFlicker,
    ];

    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.as_str() == tag)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lambda => "lambda",
            Self::Strobe => "strobe",
            Self::Flicker => "flicker",
            Self::Random => "random",
            Self::FastledLambda => "fastled_lambda",
            Self::FastledRainbow => "fastled_rainbow",
            Self::FastledColorWipe => "fastled_color_wipe",
            Self::FastledScan => "fastled_scan",
            Self::FastledTwinkle => "fastled_twinkle",
            Self::FastledRandomTwinkle => "fastled_random_twinkle",
            Self::FastledFireworks => "fastled_fireworks",
            Self::FastledFlicker => "fastled_flicker",
        }
    }

    /// Lowest tier that accepts this effect.
    #[must_use]
    pub fn min_tier(self) -> CapabilityTier {
        match self {
            Self::Lambda | Self::Strobe => CapabilityTier::Binary,
            Self::Flicker => CapabilityTier::Monochromatic,
            Self::Random => CapabilityTier::Rgb,
            Self::FastledLambda
            | Self::FastledRainbow
            | Self::FastledColorWipe
            | Self::FastledScan
            | Self::FastledTwinkle
            | Self::FastledRandomTwinkle
            | Self::FastledFireworks
            | Self::FastledFlicker => CapabilityTier::Addressable,
        }
    }

    /// Host class the effect builder instantiates.
    #[must_use]
    pub fn host_class(self) -> &'static str {
        match self {
            Self::Lambda => host::LAMBDA_LIGHT_EFFECT,
            Self::Strobe => host::STROBE_LIGHT_EFFECT,
            Self::Flicker => host::FLICKER_LIGHT_EFFECT,
            Self::Random => host::RANDOM_LIGHT_EFFECT,
            Self::FastledLambda => host::FASTLED_LAMBDA_EFFECT,
            Self::FastledRainbow => host::FASTLED_RAINBOW_EFFECT,
            Self::FastledColorWipe => host::FASTLED_COLOR_WIPE_EFFECT,
            Self::FastledScan => host::FASTLED_SCAN_EFFECT,
            Self::FastledTwinkle => host::FASTLED_TWINKLE_EFFECT,
            Self::FastledRandomTwinkle => host::FASTLED_RANDOM_TWINKLE_EFFECT,
            Self::FastledFireworks => host::FASTLED_FIREWORKS_EFFECT,
            Self::FastledFlicker => host::FASTLED_FLICKER_EFFECT,
        }
    }

    /// Name used when the configuration leaves `name` out. Lambda effects
    /// have none and require it.
    #[must_use]
    pub fn default_name(self) -> Option<&'static str> {
        match self {
            Self::Lambda | Self::FastledLambda => None,
            Self::Strobe => Some("Strobe"),
            Self::Flicker => Some("Flicker"),
            Self::Random => Some("Random"),
            Self::FastledRainbow => Some("Rainbow"),
            Self::FastledColorWipe => Some("Color Wipe"),
            Self::FastledScan => Some("Scan"),
            Self::FastledTwinkle => Some("Twinkle"),
            Self::FastledRandomTwinkle => Some("Random Twinkle"),
            Self::FastledFireworks => Some("Fireworks"),
            Self::FastledFlicker => Some("FastLED Flicker"),
        }
    }
}

impl fmt::Display for EffectTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_allow_only_lambda_and_strobe_for_binary() {
        let allowed: Vec<_> = CapabilityTier::Binary.allowed_effects().collect();
        assert_eq!(allowed, vec![EffectTag::Lambda, EffectTag::Strobe]);
    }

    #[test]
    fn should_extend_each_tier_with_the_previous_one() {
        let tiers = [
            CapabilityTier::Binary,
            CapabilityTier::Monochromatic,
            CapabilityTier::Rgb,
            CapabilityTier::Addressable,
        ];
        for pair in tiers.windows(2) {
            for tag in pair[0].allowed_effects() {
                assert!(pair[1].allows(tag), "{} lost {tag}", pair[1]);
            }
        }
    }

    #[test]
    fn should_reject_random_for_monochromatic() {
        assert!(!CapabilityTier::Monochromatic.allows(EffectTag::Random));
        assert!(CapabilityTier::Monochromatic.allows(EffectTag::Flicker));
    }

    #[test]
    fn should_allow_every_effect_for_addressable() {
        assert_eq!(CapabilityTier::Addressable.allowed_effects().count(), 12);
    }

    #[test]
    fn should_parse_every_tag_back_from_its_name() {
        for tag in EffectTag::ALL {
            assert_eq!(EffectTag::parse(tag.as_str()), Some(tag));
        }
        assert_eq!(EffectTag::parse("sparkle"), None);
    }

    #[test]
    fn should_display_tier_in_lowercase() {
        assert_eq!(CapabilityTier::Addressable.to_string(), "addressable");
    }
}

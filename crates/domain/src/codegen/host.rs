//! Names from the host object model the generated code configures.
//!
//! The host classes themselves live in the embedded runtime; the compiler
//! only needs their spelled-out names.

pub const APP: &str = "App";

pub const LIGHT_STATE: &str = "light::LightState";
pub const LIGHT_COLOR_VALUES: &str = "light::LightColorValues";
pub const FASTLED_OUTPUT: &str = "light::FastLEDLightOutputComponent";

pub const LAMBDA_LIGHT_EFFECT: &str = "light::LambdaLightEffect";
pub const RANDOM_LIGHT_EFFECT: &str = "light::RandomLightEffect";
pub const STROBE_LIGHT_EFFECT: &str = "light::StrobeLightEffect";
pub const STROBE_LIGHT_EFFECT_COLOR: &str = "light::StrobeLightEffectColor";
pub const FLICKER_LIGHT_EFFECT: &str = "light::FlickerLightEffect";
pub const FASTLED_LAMBDA_EFFECT: &str = "light::FastLEDLambdaLightEffect";
pub const FASTLED_RAINBOW_EFFECT: &str = "light::FastLEDRainbowLightEffect";
pub const FASTLED_COLOR_WIPE_EFFECT: &str = "light::FastLEDColorWipeEffect";
pub const FASTLED_COLOR_WIPE_EFFECT_COLOR: &str = "light::FastLEDColorWipeEffectColor";
pub const FASTLED_SCAN_EFFECT: &str = "light::FastLEDScanEffect";
pub const FASTLED_TWINKLE_EFFECT: &str = "light::FastLEDTwinkleEffect";
pub const FASTLED_RANDOM_TWINKLE_EFFECT: &str = "light::FastLEDRandomTwinkleEffect";
pub const FASTLED_FIREWORKS_EFFECT: &str = "light::FastLEDFireworksEffect";
pub const FASTLED_FLICKER_EFFECT: &str = "light::FastLEDFlickerEffect";

pub const TOGGLE_ACTION: &str = "light::ToggleAction";
pub const TURN_OFF_ACTION: &str = "light::TurnOffAction";
pub const TURN_ON_ACTION: &str = "light::TurnOnAction";

pub const VOID: &str = "void";
pub const UINT32: &str = "uint32_t";
pub const FLOAT: &str = "float";
pub const STD_STRING: &str = "std::string";
pub const NO_ARG: &str = "NoArg";

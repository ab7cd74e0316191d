//! Effect builders: one `new light::<Effect>(...)` declaration per effect,
//! followed by a setter for every optional field that is present.

use lightgen_domain::codegen::{Expression, Parameter, TypeRef, Variable, host};
use lightgen_domain::schema::{ColorWipeColor, EffectConfig, StrobeColor};

use super::Setters;
use crate::lambda::LambdaTask;
use crate::scheduler::{Context, Step};

/// Builds one effect. Only lambda effects can suspend, while their body
/// waits for the identifiers it references.
#[derive(Debug, Clone)]
pub struct EffectBuilder {
    config: EffectConfig,
    lambda: Option<LambdaTask>,
}

impl EffectBuilder {
    #[must_use]
    pub fn new(config: EffectConfig) -> Self {
        let void = Some(TypeRef::new(host::VOID));
        let lambda = match &config {
            EffectConfig::Lambda(effect) => {
                Some(LambdaTask::new(effect.lambda.clone(), Vec::new(), void))
            }
            EffectConfig::FastledLambda(effect) => Some(LambdaTask::new(
                effect.lambda.clone(),
                vec![Parameter::reference(TypeRef::new(host::FASTLED_OUTPUT), "it")],
                void,
            )),
            _ => None,
        };
        Self { config, lambda }
    }

    #[must_use]
    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    /// Declare the effect and emit its setters.
    ///
    /// # Errors
    ///
    /// Suspends while a lambda body waits for a reference; aborts if the
    /// effect id is already declared.
    pub fn step(&mut self, cx: &mut Context<'_>) -> Step<Variable> {
        let lambda = self.lambda.as_mut().map(|task| task.step(cx)).transpose()?;

        let class = TypeRef::new(self.config.tag().host_class());
        let mut args = vec![Expression::literal(self.config.name())];
        let mut setters = Setters::default();
        match &self.config {
            EffectConfig::Lambda(effect) | EffectConfig::FastledLambda(effect) => {
                args.extend(lambda.map(Expression::Lambda));
                args.push(Expression::literal(effect.update_interval));
            }
            EffectConfig::Random(effect) => {
                setters.optional("set_transition_length", effect.transition_length);
                setters.optional("set_update_interval", effect.update_interval);
            }
            EffectConfig::Strobe(effect) => {
                if !effect.colors.is_empty() {
                    let colors = effect.colors.iter().map(strobe_color).collect();
                    setters.push("set_colors", Expression::Array(colors));
                }
            }
            EffectConfig::Flicker(effect) => {
                setters.optional("set_alpha", effect.alpha);
                setters.optional("set_intensity", effect.intensity);
            }
            EffectConfig::FastledRainbow(effect) => {
                setters.optional("set_speed", effect.speed);
                setters.optional("set_width", effect.width);
            }
            EffectConfig::FastledColorWipe(effect) => {
                setters.optional("set_add_led_interval", effect.add_led_interval);
                setters.optional("set_reverse", effect.reverse);
                if !effect.colors.is_empty() {
                    let colors = effect.colors.iter().map(color_wipe_color).collect();
                    setters.push("set_colors", Expression::Array(colors));
                }
            }
            EffectConfig::FastledScan(effect) => {
                setters.optional("set_move_interval", effect.move_interval);
            }
            EffectConfig::FastledTwinkle(effect) | EffectConfig::FastledRandomTwinkle(effect) => {
                setters.optional("set_twinkle_probability", effect.twinkle_probability);
                setters.optional("set_progress_interval", effect.progress_interval);
            }
            EffectConfig::FastledFireworks(effect) => {
                setters.optional("set_update_interval", effect.update_interval);
                setters.optional("set_spark_probability", effect.spark_probability);
                setters.optional("set_use_random_color", effect.use_random_color);
                setters.optional("set_fade_out_rate", effect.fade_out_rate);
            }
            EffectConfig::FastledFlicker(effect) => {
                setters.optional("set_update_interval", effect.update_interval);
                setters.optional("set_intensity", effect.intensity);
            }
        }

        let value = Expression::New {
            ty: class.clone(),
            args,
        };
        let effect = cx.declare(self.config.effect_id().clone(), class, value)?;
        for (method, value) in setters.into_calls() {
            cx.emit(effect.call(method, vec![value]));
        }
        Ok(effect)
    }
}

fn strobe_color(color: &StrobeColor) -> Expression {
    let values = Expression::Construct {
        ty: TypeRef::new(host::LIGHT_COLOR_VALUES),
        args: vec![
            Expression::literal(color.state),
            Expression::literal(color.brightness),
            Expression::literal(color.red),
            Expression::literal(color.green),
            Expression::literal(color.blue),
            Expression::literal(color.white),
        ],
    };
    Expression::Struct {
        ty: TypeRef::new(host::STROBE_LIGHT_EFFECT_COLOR),
        fields: vec![
            ("color".to_string(), values),
            ("duration".to_string(), Expression::literal(color.duration)),
        ],
    }
}

fn color_wipe_color(color: &ColorWipeColor) -> Expression {
    Expression::Struct {
        ty: TypeRef::new(host::FASTLED_COLOR_WIPE_EFFECT_COLOR),
        fields: vec![
            ("r".to_string(), Expression::literal(color.red)),
            ("g".to_string(), Expression::literal(color.green)),
            ("b".to_string(), Expression::literal(color.blue)),
            ("random".to_string(), Expression::literal(color.random)),
            ("num_leds".to_string(), Expression::literal(color.num_leds)),
        ],
    }
}

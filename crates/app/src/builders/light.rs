//! Light builder: the light state, its core setters, and its effects.

use lightgen_domain::codegen::{Expression, TypeRef, Variable, host};
use lightgen_domain::schema::LightConfig;

use super::{EffectBuilder, Setters};
use crate::scheduler::{Context, Step, Task};

#[derive(Debug)]
enum Stage {
    /// Waiting for the output; nothing emitted yet.
    Output,
    /// Light declared; building effects.
    Effects(Variable),
    Done,
}

/// Task for one `light:` entry.
#[derive(Debug)]
pub struct LightBuilder {
    config: LightConfig,
    effects: Vec<EffectBuilder>,
    built: Vec<Variable>,
    stage: Stage,
}

impl LightBuilder {
    #[must_use]
    #[tracing::instrument(skip_all, fields(light = %config.id, effects = config.effects.len()))]
    pub fn new(config: LightConfig) -> Self {
        let effects = config.effects.iter().cloned().map(EffectBuilder::new).collect();
        Self {
            config,
            effects,
            built: Vec::new(),
            stage: Stage::Output,
        }
    }

    fn declare_light(&self, cx: &mut Context<'_>) -> Step<Variable> {
        let output = cx.resolve_external(&self.config.output)?;
        let value = Expression::dot_call(
            Expression::raw(host::APP),
            "make_light",
            vec![Expression::literal(self.config.name.as_str()), output.expr()],
        );
        let light = cx.declare(self.config.id.clone(), TypeRef::new(host::LIGHT_STATE), value)?;

        let mut setters = Setters::default();
        setters.optional("set_internal", self.config.internal);
        setters.optional(
            "set_default_transition_length",
            self.config.default_transition_length,
        );
        setters.optional("set_gamma_correct", self.config.gamma_correct);
        for (method, value) in setters.into_calls() {
            cx.emit(light.call(method, vec![value]));
        }
        Ok(light)
    }
}

impl Task for LightBuilder {
    fn describe(&self) -> String {
        format!("light '{}'", self.config.id)
    }

    fn step(&mut self, cx: &mut Context<'_>) -> Step<()> {
        if matches!(self.stage, Stage::Output) {
            let light = self.declare_light(cx)?;
            self.stage = Stage::Effects(light);
        }
        let Stage::Effects(light) = &self.stage else {
            return Ok(());
        };

        while let Some(builder) = self.effects.get_mut(self.built.len()) {
            let effect = builder.step(cx)?;
            self.built.push(effect);
        }
        if !self.built.is_empty() {
            let effects = self.built.iter().map(Variable::expr).collect();
            cx.emit(light.call("add_effects", vec![Expression::Array(effects)]));
        }

        self.stage = Stage::Done;
        Ok(())
    }
}

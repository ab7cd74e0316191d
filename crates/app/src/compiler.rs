//! Compile entry point: validated configuration in, ordered statements out.

use std::fmt;

use lightgen_domain::codegen::Statement;
use lightgen_domain::error::CompileError;
use lightgen_domain::schema::UnitConfig;
use serde_json::Value;

use crate::builders::{ActionBuilder, ExternalBuilder, LightBuilder};
use crate::scheduler::Scheduler;

/// The ordered statements of one compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    statements: Vec<Statement>,
}

impl Program {
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    #[must_use]
    pub fn into_statements(self) -> Vec<Statement> {
        self.statements
    }
}

/// One statement per line.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{statement}")?;
        }
        Ok(())
    }
}

/// Queue one task per node in source order (external declarations, then
/// lights, then actions) and drain the scheduler.
///
/// # Errors
///
/// Returns [`CompileError::Unresolved`] when a referenced identifier is
/// never declared, and [`CompileError::DuplicateDeclaration`] when two
/// nodes declare the same identifier.
#[tracing::instrument(skip_all, fields(
    declarations = unit.declarations.len(),
    lights = unit.lights.len(),
    action_groups = unit.actions.len(),
))]
pub fn compile(unit: &UnitConfig) -> Result<Program, CompileError> {
    let mut scheduler = Scheduler::new();
    for declaration in &unit.declarations {
        scheduler.add(ExternalBuilder::new(declaration.clone()));
    }
    for light in &unit.lights {
        scheduler.add(LightBuilder::new(light.clone()));
    }
    for group in &unit.actions {
        for entry in &group.actions {
            scheduler.add(ActionBuilder::new(entry.clone(), group.arg_type.clone()));
        }
    }

    scheduler.run()?;
    let program = Program {
        statements: scheduler.into_statements(),
    };
    tracing::info!(statements = program.len(), "compiled");
    Ok(program)
}

/// Validate a raw configuration tree, then [`compile`] it.
///
/// # Errors
///
/// Returns [`CompileError::Config`] with every validation error of the
/// tree, or any error of [`compile`].
#[tracing::instrument(skip_all)]
pub fn compile_value(raw: &Value) -> Result<Program, CompileError> {
    let unit = UnitConfig::validate(raw)?;
    compile(&unit)
}

#[cfg(test)]
mod tests {
    use lightgen_domain::error::{ConfigError, ValidationError};
    use serde_json::json;

    use super::*;

    fn lines(program: &Program) -> Vec<String> {
        program.statements().iter().map(ToString::to_string).collect()
    }

    fn relay() -> Value {
        json!({"id": "relay", "type": "output::GPIOBinaryOutputComponent", "value": "App.make_gpio_output(4)"})
    }

    #[test]
    fn should_compile_a_strobe_light() {
        let program = compile_value(&json!({
            "declare": [relay()],
            "light": [{
                "id": "desk",
                "name": "Desk",
                "platform": "binary",
                "output": "relay",
                "effects": [{"strobe": {"colors": [
                    {"state": true, "duration": "100ms"},
                    {"state": false, "duration": "200ms"},
                ]}}],
            }],
        }))
        .unwrap();
        assert_eq!(
            program.to_string(),
            "output::GPIOBinaryOutputComponent *relay = App.make_gpio_output(4);\n\
             light::LightState *desk = App.make_light(\"Desk\", relay);\n\
             light::StrobeLightEffect *light_strobelighteffect = new light::StrobeLightEffect(\"Strobe\");\n\
             light_strobelighteffect->set_colors({\
             light::StrobeLightEffectColor{.color = light::LightColorValues(true, 1.0f, 1.0f, 1.0f, 1.0f, 1.0f), .duration = 100}, \
             light::StrobeLightEffectColor{.color = light::LightColorValues(false, 1.0f, 1.0f, 1.0f, 1.0f, 1.0f), .duration = 200}\
             });\n\
             desk->add_effects({light_strobelighteffect});\n"
        );
    }

    #[test]
    fn should_render_identically_across_compilations() {
        let raw = json!({
            "declare": [relay()],
            "light": [
                {"id": "a", "name": "A", "platform": "binary", "output": "relay",
                 "effects": [{"lambda": {"name": "Mirror", "lambda": "id(b)->toggle();"}}, {"strobe": null}]},
                {"id": "b", "name": "B", "platform": "binary", "output": "relay",
                 "effects": [{"strobe": {}}]},
            ],
            "actions": [{"arg_type": "bool", "then": [
                {"light.turn_on": {"id": "b", "brightness": {"lambda": "return x ? 1.0 : 0.0;"}}},
                {"light.toggle": "a"},
            ]}],
        });
        let first = compile_value(&raw).unwrap().to_string();
        let second = compile_value(&raw).unwrap().to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn should_place_dependents_after_forward_references() {
        let program = compile_value(&json!({
            "declare": [relay()],
            "light": [
                {"id": "a", "name": "A", "platform": "binary", "output": "relay",
                 "effects": [{"lambda": {"name": "Mirror", "lambda": "id(b)->toggle();"}}]},
                {"id": "b", "name": "B", "platform": "binary", "output": "relay"},
            ],
        }))
        .unwrap();
        let lines = lines(&program);
        let position = |prefix: &str| lines.iter().position(|line| line.starts_with(prefix)).unwrap();
        assert!(position("light::LightState *b") < position("light::LambdaLightEffect *"));
    }

    #[test]
    fn should_name_a_reference_that_is_never_declared() {
        let err = compile_value(&json!({
            "light": [{"id": "a", "name": "A", "platform": "binary", "output": "missing_output"}],
        }))
        .unwrap_err();
        let CompileError::Unresolved(err) = err else {
            panic!("expected unresolved reference, got {err:?}");
        };
        assert!(err.mentions("missing_output"));
        assert_eq!(err.references[0].waiting, vec!["light 'a'"]);
    }

    #[test]
    fn should_emit_exactly_one_setter_per_present_action_field() {
        let program = compile_value(&json!({
            "declare": [relay()],
            "light": [{"id": "desk", "name": "Desk", "platform": "rgb", "output": "relay"}],
            "actions": [{"then": [{"light.turn_on": {"id": "desk", "brightness": 0.5, "red": 1.0}}]}],
        }))
        .unwrap();
        let lines = lines(&program);
        let setters: Vec<_> = lines
            .iter()
            .filter(|line| line.starts_with("light_turnonaction->"))
            .collect();
        assert_eq!(
            setters,
            vec![
                "light_turnonaction->set_brightness(0.5f);",
                "light_turnonaction->set_red(1.0f);",
            ]
        );
    }

    #[test]
    fn should_reject_transition_and_flash_together() {
        let err = compile_value(&json!({
            "actions": [{"then": [{"light.turn_on": {
                "id": "desk",
                "transition_length": "1s",
                "flash_length": "1s",
            }}]}],
        }))
        .unwrap_err();
        let CompileError::Config(errors) = err else {
            panic!("expected configuration errors, got {err:?}");
        };
        assert!(errors.iter().any(|error| matches!(
            error,
            ConfigError::Validation(ValidationError::MutuallyExclusive { .. })
        )));
    }

    #[test]
    fn should_declare_same_named_effects_of_different_lights_separately() {
        let program = compile_value(&json!({
            "declare": [relay()],
            "light": [
                {"id": "a", "name": "A", "platform": "binary", "output": "relay", "effects": [{"strobe": {}}]},
                {"id": "b", "name": "B", "platform": "binary", "output": "relay", "effects": [{"strobe": {}}]},
            ],
        }))
        .unwrap();
        let lines = lines(&program);
        assert!(lines.contains(&"a->add_effects({light_strobelighteffect});".to_string()));
        assert!(lines.contains(&"b->add_effects({light_strobelighteffect_2});".to_string()));
    }

    #[test]
    fn should_compile_an_empty_unit() {
        let program = compile_value(&json!({})).unwrap();
        assert!(program.is_empty());
        assert_eq!(program.to_string(), "");
    }
}

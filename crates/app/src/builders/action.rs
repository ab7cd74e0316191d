//! Action builders, templated over the argument type of the trigger that
//! runs the action.

use lightgen_domain::codegen::{Expression, Parameter, TypeRef, Variable};
use lightgen_domain::id::Identifier;
use lightgen_domain::schema::{ActionConfig, ActionEntry, Setter};
use lightgen_domain::value::Templatable;

use crate::lambda::LambdaTask;
use crate::scheduler::{Context, Step, Task};

#[derive(Debug)]
enum Stage {
    /// Waiting for the light; nothing emitted yet.
    Light,
    /// Action declared; `next` is the first setter not emitted yet.
    Setters {
        action: Variable,
        next: usize,
        lambda: Option<LambdaTask>,
    },
    Done,
}

/// Task for one entry of an action group's `then:` list.
#[derive(Debug)]
pub struct ActionBuilder {
    action_id: Identifier,
    arg_type: TypeRef,
    config: ActionConfig,
    setters: Vec<Setter>,
    stage: Stage,
}

impl ActionBuilder {
    #[must_use]
    #[tracing::instrument(skip_all, fields(action = %entry.action_id, arg_type = %arg_type))]
    pub fn new(entry: ActionEntry, arg_type: TypeRef) -> Self {
        let setters = entry.config.setters();
        Self {
            action_id: entry.action_id,
            arg_type,
            config: entry.config,
            setters,
            stage: Stage::Light,
        }
    }

    fn declare_action(&self, cx: &mut Context<'_>) -> Step<Variable> {
        let light = cx.resolve(self.config.light())?;
        let tag = self.config.tag();
        let ty = TypeRef::new(tag.host_class()).template(&self.arg_type);
        let value = light.call_templated(tag.factory(), &self.arg_type, Vec::new());
        cx.declare(self.action_id.clone(), ty, value)
    }
}

impl Task for ActionBuilder {
    fn describe(&self) -> String {
        format!("{} '{}'", self.config.tag().as_str(), self.action_id)
    }

    fn step(&mut self, cx: &mut Context<'_>) -> Step<()> {
        if matches!(self.stage, Stage::Light) {
            let action = self.declare_action(cx)?;
            self.stage = Stage::Setters {
                action,
                next: 0,
                lambda: None,
            };
        }
        let Stage::Setters {
            action,
            next,
            lambda,
        } = &mut self.stage
        else {
            return Ok(());
        };

        while let Some(setter) = self.setters.get(*next) {
            let value = match &setter.value {
                Templatable::Static(literal) => Expression::Literal(literal.clone()),
                Templatable::Lambda(source) => {
                    let task = lambda.get_or_insert_with(|| {
                        LambdaTask::new(
                            source.clone(),
                            vec![Parameter::value(self.arg_type.clone(), "x")],
                            Some(TypeRef::new(setter.return_type)),
                        )
                    });
                    let compiled = task.step(cx)?;
                    *lambda = None;
                    Expression::Lambda(compiled)
                }
            };
            cx.emit(action.call(&setter.method(), vec![value]));
            *next += 1;
        }

        self.stage = Stage::Done;
        Ok(())
    }
}

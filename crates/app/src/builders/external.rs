//! Declarations owned by other subsystems, such as the outputs lights
//! render to.

use lightgen_domain::codegen::Expression;
use lightgen_domain::schema::ExternalDeclaration;

use crate::scheduler::{Context, Step, Task};

/// Task that declares one external entity with its raw initializer.
#[derive(Debug)]
pub struct ExternalBuilder {
    declaration: ExternalDeclaration,
}

impl ExternalBuilder {
    #[must_use]
    pub fn new(declaration: ExternalDeclaration) -> Self {
        Self { declaration }
    }
}

impl Task for ExternalBuilder {
    fn describe(&self) -> String {
        format!("declare '{}'", self.declaration.id)
    }

    fn step(&mut self, cx: &mut Context<'_>) -> Step<()> {
        let ExternalDeclaration { id, ty, value } = &self.declaration;
        cx.declare(id.clone(), ty.clone(), Expression::raw(value.as_str()))?;
        Ok(())
    }
}

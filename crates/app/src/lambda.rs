//! Lambda sub-task: waits for every identifier a lambda body references,
//! then wraps the body into a lambda expression.

use lightgen_domain::codegen::{LambdaExpression, Parameter, TypeRef};
use lightgen_domain::value::LambdaSource;

use crate::scheduler::{Context, Step};

#[derive(Debug, Clone)]
pub struct LambdaTask {
    source: LambdaSource,
    parameters: Vec<Parameter>,
    return_type: Option<TypeRef>,
    /// Index of the first reference not resolved yet.
    next: usize,
}

impl LambdaTask {
    #[must_use]
    pub fn new(source: LambdaSource, parameters: Vec<Parameter>, return_type: Option<TypeRef>) -> Self {
        Self {
            source,
            parameters,
            return_type,
            next: 0,
        }
    }

    /// Resolve the remaining references in order, then build the lambda.
    ///
    /// # Errors
    ///
    /// Suspends on the first reference that is not declared yet; the next
    /// call starts from that reference.
    pub fn step(&mut self, cx: &mut Context<'_>) -> Step<LambdaExpression> {
        while let Some(reference) = self.source.requires().get(self.next) {
            cx.resolve(reference)?;
            self.next += 1;
        }
        Ok(LambdaExpression {
            parameters: self.parameters.clone(),
            return_type: self.return_type.clone(),
            body: self.source.rewritten(),
        })
    }
}

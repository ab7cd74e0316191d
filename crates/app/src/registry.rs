//! Variable registry: the identifier to variable bindings of one compilation.

use std::collections::HashMap;

use lightgen_domain::codegen::Variable;
use lightgen_domain::error::DuplicateDeclarationError;
use lightgen_domain::id::Identifier;

/// Every variable declared so far. A binding never changes once made.
#[derive(Debug, Default)]
pub struct VariableRegistry {
    variables: HashMap<Identifier, Variable>,
    /// Bound since the scheduler last looked, in declaration order.
    recent: Vec<Identifier>,
}

impl VariableRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: &Identifier) -> Option<&Variable> {
        self.variables.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &Identifier) -> bool {
        self.variables.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Bind `variable` under its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateDeclarationError`] if the identifier is already
    /// bound; the existing binding is kept.
    pub fn bind(&mut self, variable: Variable) -> Result<(), DuplicateDeclarationError> {
        if let Some(existing) = self.variables.get(&variable.id) {
            return Err(DuplicateDeclarationError {
                identifier: variable.id,
                existing: existing.ty.clone(),
                attempted: variable.ty,
            });
        }
        tracing::trace!(id = %variable.id, ty = %variable.ty, "bound variable");
        self.recent.push(variable.id.clone());
        self.variables.insert(variable.id.clone(), variable);
        Ok(())
    }

    /// Identifiers bound since the last call.
    pub(crate) fn take_recent(&mut self) -> Vec<Identifier> {
        std::mem::take(&mut self.recent)
    }
}

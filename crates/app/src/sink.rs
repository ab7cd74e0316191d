//! Append-only statement sink.

use lightgen_domain::codegen::Statement;

/// Statements in emission order. Nothing is ever reordered or removed.
#[derive(Debug, Default)]
pub struct StatementSink {
    statements: Vec<Statement>,
}

impl StatementSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, statement: Statement) {
        tracing::trace!(%statement, "emit");
        self.statements.push(statement);
    }

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

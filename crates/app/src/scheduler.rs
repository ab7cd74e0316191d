//! Cooperative scheduler for code-generation tasks.
//!
//! A [`Task`] advances in [`Task::step`] until it either completes or needs a
//! variable nobody has declared yet. In the latter case it returns
//! [`Interrupt::Suspend`] and keeps its progress in its own fields; the
//! scheduler parks it on the missing identifier and re-enqueues it once that
//! identifier is declared. Statements a task already emitted are never
//! emitted again.
//!
//! Everything runs on one thread, in a fixed order: tasks start in the order
//! they were added, and tasks blocked on the same identifier wake in the
//! order they blocked.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use lightgen_domain::codegen::{Expression, Statement, TypeRef, Variable};
use lightgen_domain::error::{
    CompileError, DuplicateDeclarationError, UnresolvedReference, UnresolvedReferenceError,
};
use lightgen_domain::id::Identifier;

use crate::registry::VariableRegistry;
use crate::sink::StatementSink;

/// Why a step stopped before completing.
#[derive(Debug)]
pub enum Interrupt {
    /// The identifier is not declared yet; resume once it is.
    Suspend(Identifier),
    /// A declaration clashed with an existing one. Ends the whole run.
    Abort(DuplicateDeclarationError),
}

impl From<DuplicateDeclarationError> for Interrupt {
    fn from(error: DuplicateDeclarationError) -> Self {
        Self::Abort(error)
    }
}

/// Outcome of one step, or of a sub-task inside a step.
pub type Step<T> = Result<T, Interrupt>;

/// What a task sees while it runs: the registry to resolve and declare
/// through, and the sink to emit into.
pub struct Context<'a> {
    registry: &'a mut VariableRegistry,
    sink: &'a mut StatementSink,
}

impl<'a> Context<'a> {
    pub fn new(registry: &'a mut VariableRegistry, sink: &'a mut StatementSink) -> Self {
        Self { registry, sink }
    }

    /// The variable bound to `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Interrupt::Suspend`] when `id` is not declared yet.
    pub fn resolve(&self, id: &Identifier) -> Step<Variable> {
        self.registry
            .get(id)
            .cloned()
            .ok_or_else(|| Interrupt::Suspend(id.clone()))
    }

    /// Same as [`Context::resolve`], for identifiers owned by another
    /// subsystem (light outputs, for instance).
    ///
    /// # Errors
    ///
    /// Returns [`Interrupt::Suspend`] when `id` is not declared yet.
    pub fn resolve_external(&self, id: &Identifier) -> Step<Variable> {
        self.resolve(id)
    }

    /// Bind `id` and emit its declaration, `T *id = value;`.
    ///
    /// # Errors
    ///
    /// Returns [`Interrupt::Abort`] if `id` is already declared.
    pub fn declare(&mut self, id: Identifier, ty: TypeRef, value: Expression) -> Step<Variable> {
        declare(self.registry, self.sink, id, ty, value).map_err(Interrupt::Abort)
    }

    /// Emit `expression;`.
    pub fn emit(&mut self, expression: Expression) {
        self.sink.emit(Statement::Expression(expression));
    }
}

fn declare(
    registry: &mut VariableRegistry,
    sink: &mut StatementSink,
    id: Identifier,
    ty: TypeRef,
    value: Expression,
) -> Result<Variable, DuplicateDeclarationError> {
    let variable = Variable::new(id.clone(), ty.clone());
    registry.bind(variable.clone())?;
    sink.emit(Statement::Declare { id, ty, value });
    Ok(variable)
}

/// A suspendable unit of code generation.
pub trait Task {
    /// Short label used in logs and in unresolved-reference reports, e.g.
    /// `light 'desk'`.
    fn describe(&self) -> String;

    /// Advance as far as possible.
    ///
    /// After a [`Interrupt::Suspend`] the task is stepped again once the
    /// identifier is declared, and must pick up where it stopped.
    ///
    /// # Errors
    ///
    /// Returns the [`Interrupt`] that stopped this step.
    fn step(&mut self, cx: &mut Context<'_>) -> Step<()>;
}

/// Handle of a task added to a [`Scheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(usize);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Suspended(Identifier),
    Completed,
}

struct Slot {
    task: Box<dyn Task>,
    state: TaskState,
}

/// Owns the registry, the sink, and every task of one compilation.
#[derive(Default)]
pub struct Scheduler {
    registry: VariableRegistry,
    sink: StatementSink,
    tasks: Vec<Slot>,
    queue: VecDeque<TaskId>,
    blocked: BTreeMap<Identifier, Vec<TaskId>>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a task behind every task already queued.
    pub fn add(&mut self, task: impl Task + 'static) -> TaskId {
        let id = TaskId(self.tasks.len());
        tracing::debug!(task = %task.describe(), %id, "task added");
        self.tasks.push(Slot {
            task: Box::new(task),
            state: TaskState::Pending,
        });
        self.queue.push_back(id);
        id
    }

    #[must_use]
    pub fn state(&self, id: TaskId) -> Option<&TaskState> {
        self.tasks.get(id.0).map(|slot| &slot.state)
    }

    #[must_use]
    pub fn registry(&self) -> &VariableRegistry {
        &self.registry
    }

    /// Declare a variable on behalf of another subsystem: bind it, emit its
    /// declaration, and wake every task blocked on it.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateDeclarationError`] if `id` is already declared.
    pub fn declare(
        &mut self,
        id: Identifier,
        ty: TypeRef,
        value: Expression,
    ) -> Result<Variable, DuplicateDeclarationError> {
        let variable = declare(&mut self.registry, &mut self.sink, id, ty, value)?;
        self.wake_declared();
        Ok(variable)
    }

    /// Step queued tasks until the queue is empty.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::DuplicateDeclaration`] as soon as a task
    /// declares an identifier twice, and [`CompileError::Unresolved`] when
    /// the queue drains while tasks are still blocked.
    pub fn run(&mut self) -> Result<(), CompileError> {
        while let Some(task_id) = self.queue.pop_front() {
            let Some(slot) = self.tasks.get_mut(task_id.0) else {
                continue;
            };
            let mut cx = Context::new(&mut self.registry, &mut self.sink);
            match slot.task.step(&mut cx) {
                Ok(()) => {
                    tracing::debug!(task = %slot.task.describe(), "task completed");
                    slot.state = TaskState::Completed;
                }
                Err(Interrupt::Suspend(missing)) => {
                    tracing::debug!(task = %slot.task.describe(), %missing, "task suspended");
                    slot.state = TaskState::Suspended(missing.clone());
                    self.blocked.entry(missing).or_default().push(task_id);
                }
                Err(Interrupt::Abort(err)) => {
                    tracing::debug!(task = %slot.task.describe(), error = %err, "task aborted");
                    return Err(err.into());
                }
            }
            self.wake_declared();
        }

        if self.blocked.is_empty() {
            return Ok(());
        }
        let references = self
            .blocked
            .iter()
            .map(|(identifier, waiting)| UnresolvedReference {
                identifier: identifier.clone(),
                waiting: waiting
                    .iter()
                    .filter_map(|id| self.tasks.get(id.0))
                    .map(|slot| slot.task.describe())
                    .collect(),
            })
            .collect();
        Err(UnresolvedReferenceError { references }.into())
    }

    fn wake_declared(&mut self) {
        for declared in self.registry.take_recent() {
            let Some(waiting) = self.blocked.remove(&declared) else {
                continue;
            };
            for task_id in waiting {
                if let Some(slot) = self.tasks.get_mut(task_id.0) {
                    tracing::debug!(task = %slot.task.describe(), %declared, "task resumed");
                    slot.state = TaskState::Pending;
                }
                self.queue.push_back(task_id);
            }
        }
    }

    /// Hand over the emitted statements.
    #[must_use]
    pub fn into_statements(self) -> Vec<Statement> {
        self.sink.into_statements()
    }
}

//! Builders turn validated configuration nodes into statements.
//!
//! [`LightBuilder`], [`ActionBuilder`] and [`ExternalBuilder`] are scheduler
//! tasks. [`EffectBuilder`] is a sub-task run by the light that owns the
//! effect.

mod action;
mod effect;
mod external;
mod light;

pub use action::ActionBuilder;
pub use effect::EffectBuilder;
pub use external::ExternalBuilder;
pub use light::LightBuilder;

use lightgen_domain::codegen::{Expression, Literal};

/// `set_*` calls collected before the receiver exists.
#[derive(Debug, Default)]
pub(crate) struct Setters(Vec<(&'static str, Expression)>);

impl Setters {
    /// Queue `method(value)` when the field is present.
    pub(crate) fn optional<T: Into<Literal>>(&mut self, method: &'static str, value: Option<T>) {
        if let Some(value) = value {
            self.0.push((method, Expression::literal(value)));
        }
    }

    pub(crate) fn push(&mut self, method: &'static str, value: Expression) {
        self.0.push((method, value));
    }

    pub(crate) fn into_calls(self) -> impl Iterator<Item = (&'static str, Expression)> {
        self.0.into_iter()
    }
}

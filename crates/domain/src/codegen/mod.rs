//! Statement model: the inert output of a compilation.
//!
//! Builders never produce source text directly. They produce [`Statement`]s
//! built from [`Expression`]s, which a downstream emitter lowers into the
//! target language. The [`Display`](std::fmt::Display) impls here render the
//! C++-like form used by the CLI and by tests comparing two compilations.

pub mod host;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::Identifier;

/// A (possibly templated) host type name, e.g. `light::TurnOnAction<float>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRef(String);

impl TypeRef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Instantiate this type with a single template argument.
    #[must_use]
    pub fn template(&self, arg: &TypeRef) -> Self {
        Self(format!("{}<{}>", self.0, arg.0))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A scalar literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Bool(bool),
    UInt(u64),
    Float(f32),
    String(String),
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u8> for Literal {
    fn from(value: u8) -> Self {
        Self::UInt(u64::from(value))
    }
}

impl From<u32> for Literal {
    fn from(value: u32) -> Self {
        Self::UInt(u64::from(value))
    }
}

impl From<f32> for Literal {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::UInt(value) => write!(f, "{value}"),
            Self::Float(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{value:.1}f")
            }
            Self::Float(value) => write!(f, "{value}f"),
            Self::String(value) => write_quoted(f, value),
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in value.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() => write!(f, "\\x{:02x}", u32::from(c))?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

/// How a method call reaches its receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// `receiver.method()`, for value receivers such as `App`.
    Dot,
    /// `receiver->method()`, for pointer receivers (every declared variable).
    Arrow,
}

/// One lambda parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub ty: TypeRef,
    pub name: String,
    pub by_ref: bool,
}

impl Parameter {
    #[must_use]
    pub fn value(ty: TypeRef, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
            by_ref: false,
        }
    }

    #[must_use]
    pub fn reference(ty: TypeRef, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
            by_ref: true,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.by_ref {
            write!(f, "{} &{}", self.ty, self.name)
        } else {
            write!(f, "{} {}", self.ty, self.name)
        }
    }
}

/// A compiled inline lambda, ready to be passed as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaExpression {
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeRef>,
    /// Foreign code with every `id(name)` already replaced by `name`.
    pub body: String,
}

impl fmt::Display for LambdaExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[=](")?;
        write_list(f, &self.parameters)?;
        f.write_str(")")?;
        if let Some(return_type) = &self.return_type {
            write!(f, " -> {return_type}")?;
        }
        write!(f, " {{\n{}\n}}", self.body.trim())
    }
}

/// An expression in the generated code.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Literal),
    /// Opaque foreign code, emitted verbatim.
    Raw(String),
    Variable(Identifier),
    /// `new T(args)`.
    New { ty: TypeRef, args: Vec<Expression> },
    /// `T(args)`: a value, not a heap allocation.
    Construct { ty: TypeRef, args: Vec<Expression> },
    Call {
        receiver: Box<Expression>,
        access: Access,
        method: String,
        template: Option<TypeRef>,
        args: Vec<Expression>,
    },
    /// `T{.field = value, ...}`.
    Struct {
        ty: TypeRef,
        fields: Vec<(String, Expression)>,
    },
    /// `{a, b, ...}`.
    Array(Vec<Expression>),
    Lambda(LambdaExpression),
}

impl Expression {
    /// `receiver->method(args)`.
    #[must_use]
    pub fn call(receiver: Expression, method: &str, args: Vec<Expression>) -> Self {
        Self::Call {
            receiver: Box::new(receiver),
            access: Access::Arrow,
            method: method.to_string(),
            template: None,
            args,
        }
    }

    /// `receiver.method(args)`.
    #[must_use]
    pub fn dot_call(receiver: Expression, method: &str, args: Vec<Expression>) -> Self {
        Self::Call {
            receiver: Box::new(receiver),
            access: Access::Dot,
            method: method.to_string(),
            template: None,
            args,
        }
    }

    #[must_use]
    pub fn raw(code: impl Into<String>) -> Self {
        Self::Raw(code.into())
    }

    #[must_use]
    pub fn literal(value: impl Into<Literal>) -> Self {
        Self::Literal(value.into())
    }
}

impl From<Literal> for Expression {
    fn from(value: Literal) -> Self {
        Self::Literal(value)
    }
}

impl From<LambdaExpression> for Expression {
    fn from(value: LambdaExpression) -> Self {
        Self::Lambda(value)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => fmt::Display::fmt(literal, f),
            Self::Raw(code) => f.write_str(code),
            Self::Variable(id) => fmt::Display::fmt(id, f),
            Self::New { ty, args } => {
                write!(f, "new {ty}(")?;
                write_list(f, args)?;
                f.write_str(")")
            }
            Self::Construct { ty, args } => {
                write!(f, "{ty}(")?;
                write_list(f, args)?;
                f.write_str(")")
            }
            Self::Call {
                receiver,
                access,
                method,
                template,
                args,
            } => {
                let op = match access {
                    Access::Dot => ".",
                    Access::Arrow => "->",
                };
                write!(f, "{receiver}{op}{method}")?;
                if let Some(template) = template {
                    write!(f, "<{template}>")?;
                }
                f.write_str("(")?;
                write_list(f, args)?;
                f.write_str(")")
            }
            Self::Struct { ty, fields } => {
                write!(f, "{ty}{{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, ".{name} = {value}")?;
                }
                f.write_str("}")
            }
            Self::Array(items) => {
                f.write_str("{")?;
                write_list(f, items)?;
                f.write_str("}")
            }
            Self::Lambda(lambda) => fmt::Display::fmt(lambda, f),
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        fmt::Display::fmt(item, f)?;
    }
    Ok(())
}

/// The concrete entity bound to an [`Identifier`] once declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub id: Identifier,
    pub ty: TypeRef,
}

impl Variable {
    #[must_use]
    pub fn new(id: Identifier, ty: TypeRef) -> Self {
        Self { id, ty }
    }

    /// Reference to this variable usable inside other expressions.
    #[must_use]
    pub fn expr(&self) -> Expression {
        Expression::Variable(self.id.clone())
    }

    /// `id->method(args)`.
    #[must_use]
    pub fn call(&self, method: &str, args: Vec<Expression>) -> Expression {
        Expression::call(self.expr(), method, args)
    }

    /// `id->method<T>(args)`.
    #[must_use]
    pub fn call_templated(&self, method: &str, template: &TypeRef, args: Vec<Expression>) -> Expression {
        Expression::Call {
            receiver: Box::new(self.expr()),
            access: Access::Arrow,
            method: method.to_string(),
            template: Some(template.clone()),
            args,
        }
    }
}

/// One unit of emitted initialization code.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `T *id = value;`
    Declare {
        id: Identifier,
        ty: TypeRef,
        value: Expression,
    },
    /// `expr;`
    Expression(Expression),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declare { id, ty, value } => write!(f, "{ty} *{id} = {value};"),
            Self::Expression(expr) => write!(f, "{expr};"),
        }
    }
}

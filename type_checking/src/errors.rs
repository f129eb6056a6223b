//! Static type errors.
//!
//! Every error carries the names, counts and type lists that describe the
//! problem, so callers can build their own diagnostics without re-deriving
//! context. Use [`TypeError::kind`] to branch on the category.

use failure::Fail;
use std::fmt;
use utils::parenthesized_list;

#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum TypeError {
    /// A value of one type is used where an incompatible type is required.
    #[fail(display = "{}", _0)]
    TypeMismatch(Mismatch),
    /// A call or instantiation passes the wrong number of arguments.
    #[fail(
        display = "Wrong number of arguments for {}: expected {}, got {}",
        callable, expected, actual
    )]
    ArgumentCountMismatch {
        callable: Callable,
        expected: usize,
        actual: usize,
    },
    /// A method name that neither the receiver type nor any of its ancestors
    /// declares, or a receiver that cannot have methods at all.
    #[fail(display = "{}", _0)]
    NoSuchMethod(MissingMethod),
    #[fail(display = "Type {} cannot be instantiated: {}", ty, reason)]
    IllegalInstantiation { ty: String, reason: NotInstantiable },
}

/// The category of a [`TypeError`], without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeErrorKind {
    TypeMismatch,
    ArgumentCountMismatch,
    NoSuchMethod,
    IllegalInstantiation,
}

impl TypeError {
    pub fn kind(&self) -> TypeErrorKind {
        match self {
            TypeError::TypeMismatch(_) => TypeErrorKind::TypeMismatch,
            TypeError::ArgumentCountMismatch { .. } => TypeErrorKind::ArgumentCountMismatch,
            TypeError::NoSuchMethod(_) => TypeErrorKind::NoSuchMethod,
            TypeError::IllegalInstantiation { .. } => TypeErrorKind::IllegalInstantiation,
        }
    }
}

/// Something that takes arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callable {
    Method { ty: String, method: String },
    Constructor { ty: String },
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &'_ mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Method { ty, method } => write!(f, "{}.{}()", ty, method),
            Callable::Constructor { ty } => write!(f, "{} constructor", ty),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// `variable` is set if the left-hand side is a plain variable.
    Assignment {
        variable: Option<String>,
        expected: String,
        actual: String,
    },
    /// Lists all parameter types and all argument types, not only the
    /// first offending position.
    Arguments {
        callable: Callable,
        expected: Vec<String>,
        actual: Vec<String>,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &'_ mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Assignment {
                variable: Some(variable),
                expected,
                actual,
            } => write!(
                f,
                "Cannot assign {} to variable {} of type {}",
                actual, variable, expected
            ),
            Mismatch::Assignment {
                variable: None,
                expected,
                actual,
            } => write!(f, "Cannot assign {} to {}", actual, expected),
            Mismatch::Arguments {
                callable,
                expected,
                actual,
            } => write!(
                f,
                "{} expects arguments of type {}, but got {}",
                callable,
                parenthesized_list(expected),
                parenthesized_list(actual)
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingMethod {
    /// The receiver is a primitive or `null`.
    NotAnObject { ty: String, method: String },
    NotFound {
        ty: String,
        method: String,
        suggestion: Option<String>,
    },
}

impl MissingMethod {
    pub fn ty(&self) -> &str {
        match self {
            MissingMethod::NotAnObject { ty, .. } | MissingMethod::NotFound { ty, .. } => ty,
        }
    }

    pub fn method(&self) -> &str {
        match self {
            MissingMethod::NotAnObject { method, .. } | MissingMethod::NotFound { method, .. } => {
                method
            }
        }
    }
}

impl fmt::Display for MissingMethod {
    fn fmt(&self, f: &'_ mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingMethod::NotAnObject { ty, .. } => write!(f, "Type {} does not have methods", ty),
            MissingMethod::NotFound {
                ty,
                method,
                suggestion,
            } => {
                write!(f, "{} has no method named {}", ty, method)?;
                if let Some(suggestion) = suggestion {
                    write!(f, "; did you mean '{}'?", suggestion)?;
                }
                Ok(())
            }
        }
    }
}

/// Why `new T(..)` is rejected.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum NotInstantiable {
    #[display(fmt = "it is an interface")]
    Interface,
    #[display(fmt = "it is an abstract class")]
    AbstractClass,
    #[display(fmt = "it is a primitive type")]
    Primitive,
    #[display(fmt = "it is the null type")]
    Null,
    #[display(fmt = "its type is unknown")]
    Unknown,
}

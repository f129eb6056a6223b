#![warn(rust_2018_idioms)]
#![warn(clippy::print_stdout)]
#![warn(
    clippy::unimplemented,
    clippy::doc_markdown,
    clippy::match_same_arms,
    clippy::use_self
)]

//! Static type checking of Java expressions.
//!
//! A [`TypeSystem`] holds the classes and interfaces of a program and decides
//! the nominal subtype relation between them. Expressions ([`Expr`]) are
//! checked against it with [`Expr::check_types`], which reports the first
//! [`TypeError`] it finds, and typed with [`Expr::static_type`].

#[macro_use]
extern crate derive_more;

pub mod ast;
pub mod builtin_types;
pub mod errors;
pub mod expr_typechecker;
mod print;
pub mod type_system;

#[cfg(test)]
mod fixtures;

pub use self::{
    ast::Expr,
    builtin_types::BuiltinTypes,
    errors::{TypeError, TypeErrorKind},
    expr_typechecker::ExprTypeChecker,
    type_system::{
        CheckedType, ClassDef, ClassDefId, ClassKind, ClassMethodDef, ConstructorDef,
        PrimitiveType, TypeSystem,
    },
};

//! Static types and type checking of expressions.
//!
//! `static_type` never validates anything, it is safe to call on ill-typed
//! trees. `check_types` validates all subexpressions before it looks at their
//! static types and stops at the first error.

use crate::{
    ast::Expr,
    errors::{Callable, Mismatch, MissingMethod, NotInstantiable, TypeError},
    type_system::{CheckedType, ClassKind, ClassMethodDef, TypeSystem},
};
use strtab::Symbol;

pub struct ExprTypeChecker<'ts, 'src> {
    type_system: &'ts TypeSystem<'src>,
}

impl<'ts, 'src> ExprTypeChecker<'ts, 'src> {
    pub fn new(type_system: &'ts TypeSystem<'src>) -> Self {
        ExprTypeChecker { type_system }
    }

    pub fn static_type(&self, expr: &Expr<'src>) -> CheckedType<'src> {
        use crate::ast::Expr::*;
        match expr {
            Var(_, ty) | Literal(_, ty) | NewObject(ty, _) => *ty,
            Null => CheckedType::Null,
            Assign(lhs, _) => self.static_type(lhs),
            MethodInvocation(receiver, name, _) => {
                match self.static_type(receiver) {
                    CheckedType::TypeRef(class_id) => self
                        .type_system
                        .class(class_id)
                        .resolve_method(*name, self.type_system)
                        .map(|method| method.return_ty)
                        .unwrap_or(CheckedType::Unknown(*name)),
                    _ => CheckedType::Unknown(*name),
                }
            }
        }
    }

    pub fn check_types(&self, expr: &Expr<'src>) -> Result<(), TypeError> {
        use crate::ast::Expr::*;
        log::trace!("checking {}", expr);

        let result = match expr {
            // leaves never contain type errors
            Var(..) | Literal(..) | Null => Ok(()),
            Assign(lhs, rhs) => self.check_assignment(lhs, rhs),
            MethodInvocation(receiver, name, args) => {
                self.check_method_invocation(receiver, *name, args)
            }
            NewObject(ty, args) => self.check_new_object(*ty, args),
        };

        if let Err(err) = &result {
            log::debug!("type error in `{}`: {}", expr, err);
        }
        result
    }

    fn check_assignment(&self, lhs: &Expr<'src>, rhs: &Expr<'src>) -> Result<(), TypeError> {
        self.check_types(lhs)?;
        self.check_types(rhs)?;

        let lhs_type = self.static_type(lhs);
        let rhs_type = self.static_type(rhs);

        if rhs_type.is_subtype_of(&lhs_type, self.type_system) {
            return Ok(());
        }

        let variable = match lhs {
            Expr::Var(name, _) => Some(name.to_string()),
            _ => None,
        };

        Err(TypeError::TypeMismatch(Mismatch::Assignment {
            variable,
            expected: lhs_type.to_string(),
            actual: rhs_type.to_string(),
        }))
    }

    fn check_method_invocation(
        &self,
        receiver: &Expr<'src>,
        name: Symbol<'src>,
        args: &[Expr<'src>],
    ) -> Result<(), TypeError> {
        self.check_types(receiver)?;
        let receiver_type = self.static_type(receiver);
        let method = self.resolve_method(receiver_type, name)?;

        let callable = Callable::Method {
            ty: receiver_type.to_string(),
            method: name.to_string(),
        };
        self.check_arguments(callable, &method.params, args)
    }

    fn resolve_method(
        &self,
        receiver_type: CheckedType<'src>,
        name: Symbol<'src>,
    ) -> Result<&'ts ClassMethodDef<'src>, TypeError> {
        match receiver_type {
            CheckedType::TypeRef(class_id) => self
                .type_system
                .class(class_id)
                .method_named(name, self.type_system),
            CheckedType::Primitive(_) | CheckedType::Null | CheckedType::Unknown(_) => {
                Err(TypeError::NoSuchMethod(MissingMethod::NotAnObject {
                    ty: receiver_type.to_string(),
                    method: name.to_string(),
                }))
            }
        }
    }

    fn check_new_object(&self, ty: CheckedType<'src>, args: &[Expr<'src>]) -> Result<(), TypeError> {
        let illegal = |reason| TypeError::IllegalInstantiation {
            ty: ty.to_string(),
            reason,
        };

        let class_def = match ty {
            CheckedType::TypeRef(class_id) => self.type_system.class(class_id),
            CheckedType::Primitive(_) => return Err(illegal(NotInstantiable::Primitive)),
            CheckedType::Null => return Err(illegal(NotInstantiable::Null)),
            CheckedType::Unknown(_) => return Err(illegal(NotInstantiable::Unknown)),
        };

        match class_def.kind {
            ClassKind::Class => {}
            ClassKind::AbstractClass => return Err(illegal(NotInstantiable::AbstractClass)),
            ClassKind::Interface => return Err(illegal(NotInstantiable::Interface)),
        }

        let callable = Callable::Constructor { ty: ty.to_string() };
        self.check_arguments(callable, &class_def.constructor().params, args)
    }

    /// Shared by method invocations and instantiations: arity first, then
    /// every argument is checked, then compared to its parameter.
    fn check_arguments(
        &self,
        callable: Callable,
        params: &[CheckedType<'src>],
        args: &[Expr<'src>],
    ) -> Result<(), TypeError> {
        if params.len() != args.len() {
            return Err(TypeError::ArgumentCountMismatch {
                callable,
                expected: params.len(),
                actual: args.len(),
            });
        }

        for arg in args {
            self.check_types(arg)?;
        }

        let arg_types: Vec<_> = args.iter().map(|arg| self.static_type(arg)).collect();
        let all_assignable = arg_types
            .iter()
            .zip(params)
            .all(|(arg_type, param_type)| arg_type.is_subtype_of(param_type, self.type_system));

        if all_assignable {
            Ok(())
        } else {
            Err(TypeError::TypeMismatch(Mismatch::Arguments {
                callable,
                expected: params.iter().map(CheckedType::to_string).collect(),
                actual: arg_types.iter().map(CheckedType::to_string).collect(),
            }))
        }
    }
}

impl<'src> Expr<'src> {
    /// The compile-time type of this expression. Does not check anything.
    pub fn static_type(&self, type_system: &TypeSystem<'src>) -> CheckedType<'src> {
        ExprTypeChecker::new(type_system).static_type(self)
    }

    /// Looks for static type errors in this expression and all of its
    /// subexpressions and returns the first one found.
    pub fn check_types(&self, type_system: &TypeSystem<'src>) -> Result<(), TypeError> {
        ExprTypeChecker::new(type_system).check_types(self)
    }
}

//! Builds a type system and the expressions to check from a
//! [`ProgramDesc`].
//!
//! Loading runs in passes: first every type name is declared, then
//! supertypes and signatures are resolved (so types may refer to each other
//! in any order), then the expressions are built. All errors of a pass are
//! reported before loading is aborted.

use crate::program::{ExprDesc, KindDesc, ProgramDesc, TypeDesc};
use diagnostics::Diagnostics;
use failure::Fail;
use std::fmt;
use strtab::{StringTable, Symbol};
use strum::IntoEnumIterator;
use type_checking::{
    BuiltinTypes, CheckedType, ClassDef, ClassDefId, ClassKind, ClassMethodDef, ConstructorDef,
    Expr, PrimitiveType, TypeSystem,
};

#[derive(Debug, Fail)]
pub enum LoadError {
    #[fail(display = "unknown type '{}' in {}{}", name, used_in, suggestion)]
    UnknownType {
        name: String,
        used_in: String,
        suggestion: Suggestion,
    },
    #[fail(
        display = "type '{}' cannot be a supertype of {}: only classes and interfaces can",
        name, class
    )]
    IllegalSupertype { name: String, class: String },
    #[fail(display = "parameter {} of {} cannot have type {}", position, used_in, ty)]
    IllegalParameterType {
        position: usize,
        used_in: String,
        ty: String,
    },
    #[fail(display = "type name '{}' is reserved for a built-in type", name)]
    ReservedTypeName { name: String },
}

/// Renders as `; did you mean 'x'?` if there is something to suggest.
#[derive(Debug, Default)]
pub struct Suggestion(Option<String>);

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(name) => write!(f, "; did you mean '{}'?", name),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Fail)]
#[fail(display = "loading the program failed with {} errors", errors)]
pub struct LoadAborted {
    pub errors: usize,
}

/// A loaded program, ready to be checked.
#[derive(Debug)]
pub struct Program<'src> {
    pub type_system: TypeSystem<'src>,
    pub expressions: Vec<Expr<'src>>,
}

/// Loads `desc`, reporting every problem to `diagnostics`.
pub fn load<'src>(
    desc: &'src ProgramDesc,
    diagnostics: &Diagnostics,
) -> Result<Program<'src>, LoadAborted> {
    let mut strtab = StringTable::new();
    let mut type_system = TypeSystem::default();
    let builtins = match BuiltinTypes::add_to(&mut type_system, &mut strtab) {
        Ok(builtins) => builtins,
        Err(err) => {
            diagnostics.error(&err);
            return Err(abort(diagnostics));
        }
    };

    let mut loader = Loader {
        strtab,
        type_system,
        builtins,
        diagnostics,
    };

    let declared = loader.declare_types(&desc.types);
    for (type_desc, id) in declared {
        loader.define_type(type_desc, id);
    }
    if diagnostics.errored() {
        return Err(abort(diagnostics));
    }

    let expressions: Vec<_> = desc
        .expressions
        .iter()
        .enumerate()
        .map(|(i, expr)| loader.expr(expr, &format!("expression #{}", i + 1)))
        .collect();
    if diagnostics.errored() {
        return Err(abort(diagnostics));
    }

    log::debug!(
        "loaded {} types and {} expressions",
        desc.types.len(),
        expressions.len()
    );

    Ok(Program {
        type_system: loader.type_system,
        expressions: expressions.into_iter().flatten().collect(),
    })
}

fn abort(diagnostics: &Diagnostics) -> LoadAborted {
    LoadAborted {
        errors: diagnostics.count(diagnostics::MessageLevel::Error),
    }
}

struct Loader<'src, 'd> {
    strtab: StringTable<'src>,
    type_system: TypeSystem<'src>,
    builtins: BuiltinTypes<'src>,
    diagnostics: &'d Diagnostics,
}

impl<'src, 'd> Loader<'src, 'd> {
    /// First pass. Duplicates and names of primitives or `null` are reported
    /// and left out of the result.
    fn declare_types(
        &mut self,
        types: &'src [TypeDesc],
    ) -> Vec<(&'src TypeDesc, ClassDefId<'src>)> {
        let mut declared = Vec::with_capacity(types.len());

        for type_desc in types {
            let kind = match type_desc.kind {
                KindDesc::Class => ClassKind::Class,
                KindDesc::Abstract => ClassKind::AbstractClass,
                KindDesc::Interface => ClassKind::Interface,
            };
            let name = self.strtab.intern(&type_desc.name);
            match self.type_system.type_named(name) {
                Some(CheckedType::Primitive(_)) | Some(CheckedType::Null) => {
                    self.diagnostics.error(&LoadError::ReservedTypeName {
                        name: type_desc.name.clone(),
                    });
                    continue;
                }
                _ => {}
            }

            let class_def = ClassDef::new(name, kind);

            match self.type_system.add_class_def(class_def) {
                Ok(id) => declared.push((type_desc, id)),
                Err(err) => self.diagnostics.error(&err),
            }
        }

        declared
    }

    /// Second pass: supertypes, constructor and methods of one type.
    fn define_type(&mut self, type_desc: &'src TypeDesc, id: ClassDefId<'src>) {
        let supertypes: Vec<_> = if type_desc.supertypes.is_empty() {
            vec![self.builtins.object_id()]
        } else {
            type_desc
                .supertypes
                .iter()
                .filter_map(|name| self.supertype(name, id))
                .collect()
        };

        let constructor = self.param_types(&type_desc.constructor, &format!("{} constructor", id));

        let mut methods = Vec::with_capacity(type_desc.methods.len());
        for method in &type_desc.methods {
            let used_in = format!("{}.{}()", id, method.name);
            let params = self.param_types(&method.params, &used_in);
            let return_ty = self.resolve_type(&method.returns, &used_in);

            if let (Some(params), Some(return_ty)) = (params, return_ty) {
                let name = self.strtab.intern(&method.name);
                methods.push(ClassMethodDef::new(name, params, return_ty));
            }
        }

        let class_def = self.type_system.class_mut(id);
        for supertype in supertypes {
            class_def.add_supertype(supertype);
        }
        if let Some(params) = constructor {
            class_def.set_constructor(ConstructorDef::new(params));
        }
        for method in methods {
            if let Err(err) = class_def.add_method(method) {
                self.diagnostics.error(&err);
            }
        }
    }

    fn supertype(&mut self, name: &'src str, class: ClassDefId<'src>) -> Option<ClassDefId<'src>> {
        match self.resolve_type(name, &format!("supertypes of {}", class))? {
            CheckedType::TypeRef(id) => Some(id),
            _ => {
                self.diagnostics.error(&LoadError::IllegalSupertype {
                    name: name.to_string(),
                    class: class.to_string(),
                });
                None
            }
        }
    }

    /// Resolves all parameter types, reporting every unknown or illegal one.
    fn param_types(
        &mut self,
        names: &'src [String],
        used_in: &str,
    ) -> Option<Vec<CheckedType<'src>>> {
        let params: Vec<_> = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let ty = self.resolve_type(name, used_in)?;
                match ty {
                    CheckedType::Primitive(PrimitiveType::Void) | CheckedType::Null => {
                        self.diagnostics.error(&LoadError::IllegalParameterType {
                            position: i + 1,
                            used_in: used_in.to_string(),
                            ty: ty.to_string(),
                        });
                        None
                    }
                    _ => Some(ty),
                }
            })
            .collect();

        params.into_iter().collect()
    }

    fn resolve_type(&mut self, name: &'src str, used_in: &str) -> Option<CheckedType<'src>> {
        let symbol = self.strtab.intern(name);
        let ty = self.type_system.type_named(symbol);

        if ty.is_none() {
            self.diagnostics.error(&LoadError::UnknownType {
                name: name.to_string(),
                used_in: used_in.to_string(),
                suggestion: self.suggest_type(symbol),
            });
        }
        ty
    }

    fn suggest_type(&mut self, name: Symbol<'src>) -> Suggestion {
        let mut candidates: Vec<Symbol<'src>> = self
            .type_system
            .defined_classes()
            .map(|class| class.name)
            .collect();
        candidates.extend(PrimitiveType::iter().map(|primitive| self.strtab.intern(primitive.keyword())));
        candidates.sort_by_key(|candidate| candidate.as_str());

        Suggestion(strtab::most_related(&name, &candidates).map(Symbol::to_string))
    }

    /// Builds one expression. All unknown types in it are reported.
    fn expr(&mut self, desc: &'src ExprDesc, used_in: &str) -> Option<Expr<'src>> {
        let expr = match desc {
            ExprDesc::Var(name, ty) => {
                let ty = self.resolve_type(ty, used_in)?;
                Expr::var(self.strtab.intern(name), ty)
            }
            ExprDesc::Literal(value, ty) => {
                let ty = self.resolve_type(ty, used_in)?;
                Expr::literal(value.as_str(), ty)
            }
            ExprDesc::Null => Expr::Null,
            ExprDesc::Assign { lhs, rhs } => {
                let lhs = self.expr(lhs, used_in);
                let rhs = self.expr(rhs, used_in);
                Expr::assign(lhs?, rhs?)
            }
            ExprDesc::Call {
                receiver,
                method,
                args,
            } => {
                let receiver = self.expr(receiver, used_in);
                let args = self.exprs(args, used_in);
                Expr::method_invocation(receiver?, self.strtab.intern(method), args?)
            }
            ExprDesc::New(ty, args) => {
                let ty = self.resolve_type(ty, used_in);
                let args = self.exprs(args, used_in);
                Expr::new_object(ty?, args?)
            }
        };
        Some(expr)
    }

    fn exprs(&mut self, descs: &'src [ExprDesc], used_in: &str) -> Option<Vec<Expr<'src>>> {
        let exprs: Vec<_> = descs
            .iter()
            .map(|desc| self.expr(desc, used_in))
            .collect();
        exprs.into_iter().collect()
    }
}

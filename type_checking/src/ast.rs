use crate::type_system::CheckedType;
use strtab::Symbol;

/// A Java expression, as handed to the type checker.
///
/// Expressions are built once and never mutated by checking. Compound
/// expressions own their subexpressions; types are referenced through the
/// `TypeSystem` they were created in.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'src> {
    /// Read of a variable, e.g. `x` in `x = 5`. The declared type would
    /// normally be filled in by name resolution; here it is given directly.
    Var(Symbol<'src>, CheckedType<'src>),
    /// A literal with its value as written in the source and its type.
    Literal(String, CheckedType<'src>),
    /// The literal `null`.
    Null,
    /// `lhs = rhs`
    Assign(Box<Expr<'src>>, Box<Expr<'src>>),
    /// `receiver.name(args)`
    MethodInvocation(Box<Expr<'src>>, Symbol<'src>, Vec<Expr<'src>>),
    /// `new Type(args)`
    NewObject(CheckedType<'src>, Vec<Expr<'src>>),
}

impl<'src> Expr<'src> {
    pub fn var(name: Symbol<'src>, declared_type: CheckedType<'src>) -> Self {
        Expr::Var(name, declared_type)
    }

    pub fn literal(value: impl Into<String>, ty: CheckedType<'src>) -> Self {
        Expr::Literal(value.into(), ty)
    }

    pub fn assign(lhs: Expr<'src>, rhs: Expr<'src>) -> Self {
        Expr::Assign(Box::new(lhs), Box::new(rhs))
    }

    pub fn method_invocation(receiver: Expr<'src>, name: Symbol<'src>, args: Vec<Expr<'src>>) -> Self {
        Expr::MethodInvocation(Box::new(receiver), name, args)
    }

    pub fn new_object(ty: CheckedType<'src>, args: Vec<Expr<'src>>) -> Self {
        Expr::NewObject(ty, args)
    }

    /// Direct subexpressions, in evaluation order.
    pub fn children(&self) -> Vec<&Expr<'src>> {
        use self::Expr::*;
        match self {
            Var(..) | Literal(..) | Null => vec![],
            Assign(lhs, rhs) => vec![&**lhs, &**rhs],
            MethodInvocation(receiver, _, args) => {
                let mut children = vec![&**receiver];
                children.extend(args.iter());
                children
            }
            NewObject(_, args) => args.iter().collect(),
        }
    }

    /// Number of nodes in this expression tree.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Expr::node_count)
            .sum::<usize>()
    }
}

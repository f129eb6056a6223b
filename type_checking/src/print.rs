//! Renders expressions as Java source.

use crate::ast::Expr;
use std::fmt;

impl<'src> fmt::Display for Expr<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::ast::Expr::*;
        match self {
            Var(name, _) => write!(f, "{}", name),
            Literal(value, _) => write!(f, "{}", value),
            Null => write!(f, "null"),
            Assign(lhs, rhs) => {
                write_parenthesized(lhs, f)?;
                // assignment is right-associative, `a = b = c` needs no parens
                write!(f, " = {}", rhs)
            }
            MethodInvocation(receiver, name, args) => {
                write_parenthesized(receiver, f)?;
                write!(f, ".{}(", name)?;
                write_argument_list(args, f)?;
                write!(f, ")")
            }
            NewObject(ty, args) => {
                write!(f, "new {}(", ty)?;
                write_argument_list(args, f)?;
                write!(f, ")")
            }
        }
    }
}

fn write_parenthesized(expr: &Expr<'_>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match expr {
        Expr::Assign(..) => write!(f, "({})", expr),
        _ => write!(f, "{}", expr),
    }
}

fn write_argument_list(args: &[Expr<'_>], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        // no parentheses for arguments
        write!(f, "{}", arg)?;

        if i != args.len() - 1 {
            write!(f, ", ")?;
        }
    }
    Ok(())
}

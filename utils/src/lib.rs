pub mod color;

use itertools::Itertools;

/// Panics (in debug builds) unless `$expression` matches one of the given
/// patterns. Used by tests to inspect enum variants with structured fields.
#[macro_export]
macro_rules! assert_matches {
    ($expression: expr, $( $pattern: pat )|*) => {{
        if cfg!(debug_assertions) {
            match $expression {
                $( $pattern )|* => (),
                expression => panic!(
                    r#"assertion failed: `(if let pattern = expression), {}:{}:{}`
pattern: `{}`,
expression: `{:?}`"#,
                    file!(),
                    line!(),
                    column!(),
                    stringify!($( $pattern )|*),
                    expression
                ),
            }
        }
    }};
}

/// Writes `items` as a parenthesized, comma separated list, e.g. `(int, Shape)`.
pub fn parenthesized_list<I, T>(items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: std::fmt::Display,
{
    format!("({})", items.into_iter().join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parenthesized_list_of_names() {
        assert_eq!("()", parenthesized_list(Vec::<String>::new()));
        assert_eq!("(int)", parenthesized_list(vec!["int"]));
        assert_eq!("(Graphics, int)", parenthesized_list(vec!["Graphics", "int"]));
    }

    #[test]
    fn assert_matches_accepts_alternatives() {
        let value: Result<u8, ()> = Ok(3);
        assert_matches!(value, Ok(1) | Ok(3));
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    #[cfg(debug_assertions)]
    fn assert_matches_panics_on_mismatch() {
        let value: Option<u8> = None;
        assert_matches!(value, Some(_));
    }
}

#![warn(
    clippy::print_stdout,
    clippy::unimplemented,
    clippy::doc_markdown,
    clippy::items_after_statements,
    clippy::match_same_arms,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::use_self,
    clippy::use_debug
)]

//! Interned type and method names.
//!
//! Two symbols are equal iff they were interned by the same table from equal
//! strings, so comparing names is a pointer comparison. Symbols also know how
//! "close" they are to each other, which is used to suggest a method name
//! when a lookup fails.

use std::{
    collections::HashSet,
    fmt,
    hash::{Hash, Hasher},
};

/// Maximum edit distance at which two names are still considered related.
pub const MAX_RELATED_DISTANCE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Unrelated,
    Related { distance: usize },
}

impl std::cmp::Ord for Relation {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use self::Relation::*;
        match (self, other) {
            (Unrelated, Unrelated) => std::cmp::Ordering::Equal,
            (Unrelated, _) => std::cmp::Ordering::Greater,
            (_, Unrelated) => std::cmp::Ordering::Less,
            (Related { distance: d1 }, Related { distance: d2 }) => d1.cmp(d2),
        }
    }
}

impl std::cmp::PartialOrd for Relation {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

pub trait Relational {
    fn relation(&self, other: &Self) -> Relation;
}

/// Picks the candidate most closely related to `target`.
///
/// Candidates equal to `target` (distance 0) are skipped: a suggestion that
/// repeats the name the user already wrote is useless. Ties are broken by
/// iteration order, the first candidate wins.
pub fn most_related<'a, T, I>(target: &T, candidates: I) -> Option<&'a T>
where
    T: Relational + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut best: Option<(Relation, &'a T)> = None;

    for candidate in candidates {
        let relation = target.relation(candidate);
        match relation {
            Relation::Unrelated | Relation::Related { distance: 0 } => continue,
            Relation::Related { .. } => {}
        }

        best = match best {
            Some((best_relation, _)) if best_relation <= relation => best,
            _ => Some((relation, candidate)),
        };
    }

    best.map(|(_, candidate)| candidate)
}

#[derive(Debug, Clone, Copy, Eq, PartialOrd, Ord)]
pub struct Symbol<'f>(&'f str);

impl<'f> Symbol<'f> {
    fn as_raw(&self) -> *const str {
        self.0 as *const str
    }

    pub fn as_str(&self) -> &'f str {
        self.0
    }
}

impl<'f> Relational for Symbol<'f> {
    fn relation(&self, other: &Symbol<'f>) -> Relation {
        let distance = levenshtein::levenshtein(self.0, other.0);
        if distance <= MAX_RELATED_DISTANCE {
            Relation::Related { distance }
        } else {
            Relation::Unrelated
        }
    }
}

impl Hash for Symbol<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_raw().hash(state)
    }
}

impl PartialEq for Symbol<'_> {
    fn eq(&self, other: &Symbol<'_>) -> bool {
        self.as_raw() as *const u8 as usize == other.as_raw() as *const u8 as usize
    }
}

impl PartialEq<str> for Symbol<'_> {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl fmt::Display for Symbol<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Default)]
pub struct StringTable<'f> {
    entries: HashSet<&'f str>,
}

impl<'f> StringTable<'f> {
    pub fn new() -> Self {
        StringTable::default()
    }

    pub fn intern(&mut self, value: &'f str) -> Symbol<'f> {
        match self.entries.get(value) {
            Some(entry) => Symbol(*entry),
            None => {
                self.entries.insert(value);
                Symbol(value)
            }
        }
    }

    /// Returns the symbol for `value` if it was interned before.
    pub fn lookup(&self, value: &str) -> Option<Symbol<'f>> {
        self.entries.get(value).map(|s| Symbol(*s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

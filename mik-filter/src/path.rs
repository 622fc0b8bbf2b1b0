//! Dot-separated field paths and the right-to-left fold.
//!
//! A path such as `company.departments.teams.lead.role` names four relation
//! hops and one terminal attribute. Folding it around a leaf condition yields
//!
//! ```text
//! {company: {departments: {teams: {lead: {role: <leaf>}}}}}
//! ```
//!
//! The fold is the single primitive shared by equality filters, OR members,
//! substring search, range bounds and ordering; only the leaf differs.

use crate::node::Node;
use std::fmt;

/// Separator between relation hops and the terminal attribute.
pub const SEPARATOR: char = '.';

/// A borrowed view of a dot-separated field path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldPath<'a> {
    raw: &'a str,
}

impl<'a> FieldPath<'a> {
    /// Wrap a raw path string.
    #[must_use]
    pub const fn new(raw: &'a str) -> Self {
        Self { raw }
    }

    /// The path as written.
    #[must_use]
    pub const fn as_str(self) -> &'a str {
        self.raw
    }

    /// All segments, outer to inner.
    pub fn segments(self) -> impl DoubleEndedIterator<Item = &'a str> + 'a {
        self.raw.split(SEPARATOR)
    }

    /// The relation hops: every segment but the last.
    pub fn relations(self) -> impl Iterator<Item = &'a str> + 'a {
        self.raw
            .rsplit_once(SEPARATOR)
            .map(|(head, _)| head)
            .into_iter()
            .flat_map(|head| head.split(SEPARATOR))
    }

    /// The terminal attribute.
    #[must_use]
    pub fn terminal(self) -> &'a str {
        self.raw
            .rsplit_once(SEPARATOR)
            .map_or(self.raw, |(_, last)| last)
    }

    /// Number of relation hops (the number of dots).
    #[must_use]
    pub fn depth(self) -> usize {
        self.raw.matches(SEPARATOR).count()
    }

    /// Returns `true` if the path traverses at least one relation.
    #[must_use]
    pub fn is_nested(self) -> bool {
        self.raw.contains(SEPARATOR)
    }
}

impl fmt::Display for FieldPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw)
    }
}

impl<'a> From<&'a str> for FieldPath<'a> {
    fn from(raw: &'a str) -> Self {
        Self::new(raw)
    }
}

/// Fold a path around a leaf condition with plain nesting.
///
/// `fold("a.b.c", leaf)` produces `{a: {b: {c: leaf}}}`; a path without dots
/// produces `{field: leaf}` with no wrapping.
///
/// # Example
///
/// ```
/// use mik_filter::{Node, fold};
///
/// let node = fold("author.profile.region", Node::from("US"));
/// assert_eq!(
///     node.pointer(["author", "profile", "region"]),
///     Some(&Node::from("US"))
/// );
/// ```
pub fn fold<'a>(path: impl Into<FieldPath<'a>>, leaf: Node) -> Node {
    fold_with(path.into(), leaf, |segment, inner| Node::entry(segment, inner))
}

/// Fold a path around a leaf, delegating each relation hop to `wrap`.
///
/// The terminal segment is always attached as `{terminal: leaf}`; `wrap`
/// receives each relation segment from innermost to outermost together with
/// the structure built so far and returns the next enclosing level.
pub fn fold_with<F>(path: FieldPath<'_>, leaf: Node, mut wrap: F) -> Node
where
    F: FnMut(&str, Node) -> Node,
{
    let mut segments = path.segments().rev();
    let terminal = segments.next().unwrap_or_default();
    segments.fold(Node::entry(terminal, leaf), |inner, segment| {
        wrap(segment, inner)
    })
}

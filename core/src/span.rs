//! Borrowed view over the trailing variadic tokens.

use std::fmt;
use std::ops::Index;

/// Read-only view over a contiguous run of argument tokens.
///
/// The span never copies token data; it borrows the caller's argument
/// storage and is only valid as long as that storage is. `S` is the token
/// element type, `&str` by default or `String` when parsing
/// `std::env::args()` collected into a `Vec`.
///
/// # Examples
///
/// ```
/// use argschema_core::ArgSpan;
///
/// let argv = ["first", "middle", "last"];
/// let span = ArgSpan::new(&argv);
/// assert_eq!(span.len(), 3);
/// assert_eq!(span.front(), Some("first"));
/// assert_eq!(span.back(), Some("last"));
/// assert_eq!(&span[1], "middle");
/// assert_eq!(span.iter().collect::<Vec<_>>(), argv);
/// ```
pub struct ArgSpan<'a, S = &'a str> {
    args: &'a [S],
}

impl<'a, S> ArgSpan<'a, S> {
    /// Creates a span over `args`.
    pub const fn new(args: &'a [S]) -> Self {
        Self { args }
    }

    /// Number of tokens in the span.
    pub const fn len(&self) -> usize {
        self.args.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// The underlying token slice.
    pub const fn as_slice(&self) -> &'a [S] {
        self.args
    }
}

impl<'a, S: AsRef<str>> ArgSpan<'a, S> {
    /// Token at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).map(AsRef::as_ref)
    }

    pub fn front(&self) -> Option<&'a str> {
        self.args.first().map(AsRef::as_ref)
    }

    pub fn back(&self) -> Option<&'a str> {
        self.args.last().map(AsRef::as_ref)
    }

    /// Iterates over the tokens in order.
    pub fn iter(&self) -> Iter<'a, S> {
        Iter {
            inner: self.args.iter(),
        }
    }
}

impl<S> Default for ArgSpan<'_, S> {
    fn default() -> Self {
        Self { args: &[] }
    }
}

impl<S> Clone for ArgSpan<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for ArgSpan<'_, S> {}

impl<S: AsRef<str>> fmt::Debug for ArgSpan<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<S: AsRef<str>> PartialEq for ArgSpan<'_, S> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<S: AsRef<str>> Eq for ArgSpan<'_, S> {}

impl<S: AsRef<str>> Index<usize> for ArgSpan<'_, S> {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        self.args[index].as_ref()
    }
}

impl<'a, S: AsRef<str>> IntoIterator for ArgSpan<'a, S> {
    type Item = &'a str;
    type IntoIter = Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, S: AsRef<str>> IntoIterator for &ArgSpan<'a, S> {
    type Item = &'a str;
    type IntoIter = Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: AsRef<str>> serde::Serialize for ArgSpan<'_, S> {
    fn serialize<Ser: serde::Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Iterator over the tokens of an [`ArgSpan`].
pub struct Iter<'a, S> {
    inner: std::slice::Iter<'a, S>,
}

impl<'a, S: AsRef<str>> Iterator for Iter<'a, S> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner.next().map(AsRef::as_ref)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<S: AsRef<str>> DoubleEndedIterator for Iter<'_, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(AsRef::as_ref)
    }
}

impl<S: AsRef<str>> ExactSizeIterator for Iter<'_, S> {}

use std::fmt;

use crate::foundation::error::{PixrleError, PixrleResult};

/// Op code tagging an encoded [`Repeat`].
pub const REPEAT_OP: u8 = 1;
/// Op code tagging an encoded [`Pixel`].
pub const PIXEL_OP: u8 = 2;

/// Largest child list a [`Repeat`] may hold (the count is stored in one byte).
pub const MAX_CHILDREN: usize = u8::MAX as usize;

/// Darkest intensity.
pub const BLACK: Pixel = Pixel(0);
/// Brightest intensity.
pub const WHITE: Pixel = Pixel(255);

/// A single grayscale intensity, the leaf of a run-length tree.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct Pixel(u8);

impl Pixel {
    /// Wrap an intensity. Every `u8` is a valid pixel.
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Build a pixel from a wider integer, rejecting anything outside `[0, 256)`.
    pub fn try_from_int(value: i64) -> PixrleResult<Self> {
        u8::try_from(value)
            .map(Self)
            .map_err(|_| PixrleError::range(format!("pixel value {value} is outside [0, 256)")))
    }

    /// Intensity value.
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl From<u8> for Pixel {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl TryFrom<i64> for Pixel {
    type Error = PixrleError;

    fn try_from(value: i64) -> PixrleResult<Self> {
        Self::try_from_int(value)
    }
}

impl TryFrom<i32> for Pixel {
    type Error = PixrleError;

    fn try_from(value: i32) -> PixrleResult<Self> {
        Self::try_from_int(i64::from(value))
    }
}

impl fmt::Debug for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pixel({})", self.0)
    }
}

/// `count` back-to-back copies of the concatenated child sequence.
///
/// The child list is owned by value and never longer than [`MAX_CHILDREN`], so
/// every `Repeat` that exists can be encoded.
#[derive(Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RepeatRepr")]
pub struct Repeat {
    count: u16,
    children: Vec<Node>,
}

#[derive(serde::Deserialize)]
struct RepeatRepr {
    count: u16,
    #[serde(default)]
    children: Vec<Node>,
}

impl TryFrom<RepeatRepr> for Repeat {
    type Error = PixrleError;

    fn try_from(repr: RepeatRepr) -> PixrleResult<Self> {
        Self::new(repr.count, repr.children)
    }
}

impl Repeat {
    /// Build a repeat, rejecting child lists longer than [`MAX_CHILDREN`].
    pub fn new(count: u16, children: Vec<Node>) -> PixrleResult<Self> {
        if children.len() > MAX_CHILDREN {
            return Err(PixrleError::validation(format!(
                "repeat has {} children, at most {MAX_CHILDREN} fit the wire format",
                children.len()
            )));
        }
        Ok(Self { count, children })
    }

    /// Like [`Repeat::new`], also rejecting counts outside `[0, 65535]`.
    pub fn try_new(count: i64, children: Vec<Node>) -> PixrleResult<Self> {
        let count = u16::try_from(count).map_err(|_| {
            PixrleError::validation(format!("repeat count {count} is outside [0, 65535]"))
        })?;
        Self::new(count, children)
    }

    /// Number of times the child sequence is tiled.
    pub fn count(&self) -> u16 {
        self.count
    }

    /// Children in tiling order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Split into `(count, children)`.
    pub fn into_parts(self) -> (u16, Vec<Node>) {
        (self.count, self.children)
    }
}

impl fmt::Debug for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Repeat({}, ", self.count)?;
        f.debug_list().entries(&self.children).finish()?;
        f.write_str(")")
    }
}

/// A run-length tree: either a single pixel or a tiled group of subtrees.
#[derive(Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    /// Leaf intensity.
    Pixel(Pixel),
    /// Tiled child sequence.
    Repeat(Repeat),
}

impl Node {
    /// Shorthand for `Node::Pixel(Pixel::new(value))`.
    pub const fn pixel(value: u8) -> Self {
        Self::Pixel(Pixel::new(value))
    }

    /// Shorthand for a validated `Node::Repeat`.
    pub fn repeat(count: u16, children: Vec<Node>) -> PixrleResult<Self> {
        Repeat::new(count, children).map(Self::Repeat)
    }

    /// Nesting depth of `Repeat` nodes; a lone pixel has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Self::Pixel(_) => 0,
            Self::Repeat(r) => 1 + r.children.iter().map(Node::depth).max().unwrap_or(0),
        }
    }
}

impl From<Pixel> for Node {
    fn from(p: Pixel) -> Self {
        Self::Pixel(p)
    }
}

impl From<Repeat> for Node {
    fn from(r: Repeat) -> Self {
        Self::Repeat(r)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixel(p) => p.fmt(f),
            Self::Repeat(r) => r.fmt(f),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/node.rs"]
mod tests;

use std::{fmt, sync::Arc};

use crate::{
    foundation::error::{PixrleError, PixrleResult},
    model::node::{Node, Pixel, Repeat},
};

/// A unary function of the context value standing in for concrete data.
pub struct Placeholder<C, T> {
    f: Arc<dyn Fn(C) -> T + Send + Sync>,
}

impl<C, T> Placeholder<C, T> {
    /// Wrap a closure.
    pub fn new(f: impl Fn(C) -> T + Send + Sync + 'static) -> Self {
        Self { f: Arc::new(f) }
    }

    /// Invoke with a context value.
    pub fn call(&self, ctx: C) -> T {
        (self.f)(ctx)
    }
}

impl<C, T> Clone for Placeholder<C, T> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl<C, T> fmt::Debug for Placeholder<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Placeholder(<fn>)")
    }
}

/// Tile count position of a repeat template.
#[derive(Clone, Debug)]
pub enum CountTemplate<C> {
    /// Known count.
    Fixed(u16),
    /// Count computed from the context; must land in `[0, 65535]`.
    Placeholder(Placeholder<C, i64>),
}

impl<C> CountTemplate<C> {
    /// Count computed from the context.
    pub fn with(f: impl Fn(C) -> i64 + Send + Sync + 'static) -> Self {
        Self::Placeholder(Placeholder::new(f))
    }
}

impl<C> From<u16> for CountTemplate<C> {
    fn from(count: u16) -> Self {
        Self::Fixed(count)
    }
}

/// Child list position of a repeat template.
#[derive(Clone, Debug)]
pub enum ChildrenTemplate<C> {
    /// Children evaluated one by one, order preserved.
    List(Vec<Template<C>>),
    /// Whole child list computed from the context.
    Placeholder(Placeholder<C, PixrleResult<Vec<Node>>>),
}

impl<C> ChildrenTemplate<C> {
    /// Child list computed from the context.
    pub fn with(f: impl Fn(C) -> PixrleResult<Vec<Node>> + Send + Sync + 'static) -> Self {
        Self::Placeholder(Placeholder::new(f))
    }
}

impl<C> From<Vec<Template<C>>> for ChildrenTemplate<C> {
    fn from(children: Vec<Template<C>>) -> Self {
        Self::List(children)
    }
}

impl<C> From<Vec<Node>> for ChildrenTemplate<C> {
    fn from(children: Vec<Node>) -> Self {
        Self::List(children.into_iter().map(Template::Concrete).collect())
    }
}

/// A run-length tree that may defer parts of itself to a context value.
///
/// `C` is the type of the context (a frame index, a time, a sweep position).
#[derive(Clone, Debug)]
pub enum Template<C> {
    /// Fully concrete subtree.
    Concrete(Node),
    /// Subtree produced by a function of the context.
    Placeholder(Placeholder<C, PixrleResult<Node>>),
    /// Repeat whose count and/or children are themselves templates.
    Repeat {
        /// Tile count.
        count: CountTemplate<C>,
        /// Child sequence.
        children: ChildrenTemplate<C>,
    },
}

impl<C> Template<C> {
    /// Concrete subtree.
    pub fn concrete(node: impl Into<Node>) -> Self {
        Self::Concrete(node.into())
    }

    /// Subtree produced by `f`.
    pub fn placeholder(f: impl Fn(C) -> PixrleResult<Node> + Send + Sync + 'static) -> Self {
        Self::Placeholder(Placeholder::new(f))
    }

    /// Repeat template from any count and children positions.
    pub fn repeat(
        count: impl Into<CountTemplate<C>>,
        children: impl Into<ChildrenTemplate<C>>,
    ) -> Self {
        Self::Repeat {
            count: count.into(),
            children: children.into(),
        }
    }

    /// Repeat whose count is computed from the context.
    pub fn repeat_with(
        count: impl Fn(C) -> i64 + Send + Sync + 'static,
        children: impl Into<ChildrenTemplate<C>>,
    ) -> Self {
        Self::repeat(CountTemplate::with(count), children)
    }

    /// True when no placeholder appears anywhere in the template.
    pub fn is_concrete(&self) -> bool {
        match self {
            Self::Concrete(_) => true,
            Self::Placeholder(_) => false,
            Self::Repeat { count, children } => {
                matches!(count, CountTemplate::Fixed(_))
                    && match children {
                        ChildrenTemplate::List(items) => items.iter().all(Template::is_concrete),
                        ChildrenTemplate::Placeholder(_) => false,
                    }
            }
        }
    }
}

impl<C: Copy> Template<C> {
    /// Resolve every placeholder against `ctx`, producing a concrete tree.
    ///
    /// A placeholder's result is used as-is; it is not walked again.
    /// Recurses once per nesting level of the template.
    #[tracing::instrument(skip_all)]
    pub fn evaluate(&self, ctx: C) -> PixrleResult<Node> {
        self.eval_at(ctx)
    }

    fn eval_at(&self, ctx: C) -> PixrleResult<Node> {
        match self {
            Self::Concrete(node) => Ok(node.clone()),
            Self::Placeholder(p) => p.call(ctx),
            Self::Repeat { count, children } => {
                let count = count.eval_at(ctx)?;
                let children = children.eval_at(ctx)?;
                Ok(Node::Repeat(Repeat::new(count, children)?))
            }
        }
    }
}

impl<C: Copy> CountTemplate<C> {
    fn eval_at(&self, ctx: C) -> PixrleResult<u16> {
        match self {
            Self::Fixed(count) => Ok(*count),
            Self::Placeholder(p) => {
                let raw = p.call(ctx);
                u16::try_from(raw).map_err(|_| {
                    PixrleError::validation(format!(
                        "placeholder produced repeat count {raw}, outside [0, 65535]"
                    ))
                })
            }
        }
    }
}

impl<C: Copy> ChildrenTemplate<C> {
    fn eval_at(&self, ctx: C) -> PixrleResult<Vec<Node>> {
        match self {
            Self::List(items) => items.iter().map(|t| t.eval_at(ctx)).collect(),
            Self::Placeholder(p) => p.call(ctx),
        }
    }
}

impl<C> From<Node> for Template<C> {
    fn from(node: Node) -> Self {
        Self::Concrete(node)
    }
}

impl<C> From<Pixel> for Template<C> {
    fn from(p: Pixel) -> Self {
        Self::Concrete(Node::Pixel(p))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/model.rs"]
mod tests;

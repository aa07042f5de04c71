use crate::{
    foundation::error::{PixrleError, PixrleResult},
    model::node::Node,
};

/// Limits applied by [`Node::flatten_with`].
#[derive(Clone, Copy, Debug)]
pub struct FlattenOpts {
    /// Largest pixel sequence the caller is willing to materialize.
    pub max_pixels: u64,
}

impl Default for FlattenOpts {
    fn default() -> Self {
        Self { max_pixels: 1 << 30 }
    }
}

impl Node {
    /// Expand the tree into the literal pixel sequence it denotes.
    ///
    /// A repeat concatenates its children once and then tiles that sequence
    /// `count` times, so `Repeat(0, ..)` is always empty.
    ///
    /// The output is allocated without a size check; use [`Node::flatten_with`]
    /// for trees from untrusted input.
    pub fn flatten(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    /// Append the expanded pixel sequence to `out`.
    pub fn flatten_into(&self, out: &mut Vec<u8>) {
        match self {
            Node::Pixel(p) => out.push(p.value()),
            Node::Repeat(r) => {
                if r.count() == 0 {
                    return;
                }
                let start = out.len();
                for child in r.children() {
                    child.flatten_into(out);
                }
                let base_len = out.len() - start;
                out.reserve(base_len * (usize::from(r.count()) - 1));
                for _ in 1..r.count() {
                    out.extend_from_within(start..start + base_len);
                }
            }
        }
    }

    /// Length of [`Node::flatten`] without materializing it, `None` on overflow.
    pub fn pixel_count(&self) -> Option<u64> {
        match self {
            Node::Pixel(_) => Some(1),
            Node::Repeat(r) => {
                let mut base = 0u64;
                for child in r.children() {
                    base = base.checked_add(child.pixel_count()?)?;
                }
                base.checked_mul(u64::from(r.count()))
            }
        }
    }

    /// [`Node::flatten`] guarded by a size limit.
    pub fn flatten_with(&self, opts: &FlattenOpts) -> PixrleResult<Vec<u8>> {
        let len = self.pixel_count().ok_or_else(|| {
            PixrleError::validation("flattened length overflows u64")
        })?;
        if len > opts.max_pixels {
            return Err(PixrleError::validation(format!(
                "flattened length {len} exceeds limit of {} pixels",
                opts.max_pixels
            )));
        }
        let mut out = Vec::with_capacity(len as usize);
        self.flatten_into(&mut out);
        tracing::debug!(pixels = out.len(), "flattened tree");
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/flatten.rs"]
mod tests;

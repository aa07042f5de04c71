use crate::{
    foundation::error::{PixrleError, PixrleResult},
    model::node::{Node, PIXEL_OP, Pixel, REPEAT_OP, Repeat},
};

const HEADER_LEN: usize = 4;

/// Limits applied while decoding untrusted bytes.
#[derive(Clone, Copy, Debug)]
pub struct DecodeOpts {
    /// Deepest `Repeat` nesting accepted before decoding fails.
    pub max_depth: usize,
}

impl Default for DecodeOpts {
    fn default() -> Self {
        Self { max_depth: 1024 }
    }
}

/// Decode one document from the front of `data`.
///
/// Returns the node and the unconsumed suffix of `data`.
pub fn decode(data: &[u8]) -> PixrleResult<(Node, &[u8])> {
    decode_with(data, &DecodeOpts::default())
}

/// [`decode`] with explicit limits.
#[tracing::instrument(skip(data), fields(len = data.len()))]
pub fn decode_with<'a>(data: &'a [u8], opts: &DecodeOpts) -> PixrleResult<(Node, &'a [u8])> {
    let mut cursor = Cursor { data, pos: 0 };
    let node = cursor.node(opts, 0)?;
    tracing::debug!(consumed = cursor.pos, "decoded document");
    Ok((node, &data[cursor.pos..]))
}

/// Decode a buffer that holds exactly one document.
pub fn decode_exact(data: &[u8]) -> PixrleResult<Node> {
    let (node, rest) = decode(data)?;
    if !rest.is_empty() {
        return Err(PixrleError::format(format!(
            "{} trailing bytes after document",
            rest.len()
        )));
    }
    Ok(node)
}

/// Decode back-to-back documents until `data` is exhausted.
pub fn decode_all(data: &[u8]) -> PixrleResult<Vec<Node>> {
    decode_all_with(data, &DecodeOpts::default())
}

/// [`decode_all`] with explicit limits.
pub fn decode_all_with(data: &[u8], opts: &DecodeOpts) -> PixrleResult<Vec<Node>> {
    let mut out = Vec::new();
    let mut rest = data;
    while !rest.is_empty() {
        let (node, tail) = decode_with(rest, opts)?;
        out.push(node);
        rest = tail;
    }
    Ok(out)
}

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn header(&mut self) -> PixrleResult<[u8; HEADER_LEN]> {
        let remaining = self.data.len() - self.pos;
        let Some(bytes) = self.data.get(self.pos..self.pos + HEADER_LEN) else {
            return Err(PixrleError::format(format!(
                "truncated header at offset {}: need {HEADER_LEN} bytes, {remaining} left",
                self.pos
            )));
        };
        let mut header = [0u8; HEADER_LEN];
        header.copy_from_slice(bytes);
        self.pos += HEADER_LEN;
        Ok(header)
    }

    fn node(&mut self, opts: &DecodeOpts, depth: usize) -> PixrleResult<Node> {
        let offset = self.pos;
        let [op, a, b, c] = self.header()?;
        match op {
            PIXEL_OP => {
                if a != b || b != c {
                    return Err(PixrleError::format(format!(
                        "pixel at offset {offset} is not grayscale: ({a}, {b}, {c})"
                    )));
                }
                Ok(Node::Pixel(Pixel::new(a)))
            }
            REPEAT_OP => {
                if depth >= opts.max_depth {
                    return Err(PixrleError::format(format!(
                        "repeat at offset {offset} exceeds max nesting depth {}",
                        opts.max_depth
                    )));
                }
                let elements = usize::from(a);
                let count = u16::from_le_bytes([b, c]);
                let mut children = Vec::with_capacity(elements);
                for _ in 0..elements {
                    children.push(self.node(opts, depth + 1)?);
                }
                Ok(Node::Repeat(Repeat::new(count, children)?))
            }
            other => Err(PixrleError::format(format!(
                "unknown op code {other} at offset {offset}"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/decode.rs"]
mod tests;

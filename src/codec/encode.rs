use crate::{
    foundation::error::{PixrleError, PixrleResult},
    model::node::{Node, PIXEL_OP, Pixel, REPEAT_OP, Repeat},
};

/// Encode one document.
pub fn encode(node: &Node) -> PixrleResult<Vec<u8>> {
    let mut out = Vec::with_capacity(encoded_len(node));
    encode_into(node, &mut out)?;
    Ok(out)
}

/// Append the encoding of `node` to `out`.
///
/// On error `out` may hold a partial encoding. Recurses once per `Repeat` level.
pub fn encode_into(node: &Node, out: &mut Vec<u8>) -> PixrleResult<()> {
    match node {
        Node::Pixel(p) => {
            encode_pixel(*p, out);
            Ok(())
        }
        Node::Repeat(r) => encode_repeat(r, out),
    }
}

/// Exact size of [`encode`]'s output.
pub fn encoded_len(node: &Node) -> usize {
    match node {
        Node::Pixel(_) => 4,
        Node::Repeat(r) => 4 + r.children().iter().map(encoded_len).sum::<usize>(),
    }
}

fn encode_pixel(p: Pixel, out: &mut Vec<u8>) {
    // The intensity fills all three channel slots.
    let v = p.value();
    out.extend_from_slice(&[PIXEL_OP, v, v, v]);
}

fn encode_repeat(r: &Repeat, out: &mut Vec<u8>) -> PixrleResult<()> {
    let elements = u8::try_from(r.children().len()).map_err(|_| {
        PixrleError::validation(format!(
            "cannot encode repeat with {} children",
            r.children().len()
        ))
    })?;
    out.push(REPEAT_OP);
    out.push(elements);
    out.extend_from_slice(&r.count().to_le_bytes());
    for child in r.children() {
        encode_into(child, out)?;
    }
    Ok(())
}

impl Node {
    /// Encode this tree as one wire document.
    pub fn encode(&self) -> PixrleResult<Vec<u8>> {
        encode(self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/encode.rs"]
mod tests;

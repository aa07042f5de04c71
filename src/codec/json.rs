use serde::Deserialize as _;

use crate::{
    codec::decode::DecodeOpts,
    foundation::error::{PixrleError, PixrleResult},
    model::node::Node,
};

// Each repeat level nests an object, an object and an array; the leaf adds one.
const JSON_LEVELS_PER_REPEAT: usize = 3;

/// Parse a JSON tree description with the default depth limit.
pub fn tree_from_json(data: &[u8]) -> PixrleResult<Node> {
    tree_from_json_with(data, &DecodeOpts::default())
}

/// Parse a JSON tree description, accepting the same nesting depth as the
/// wire decoder with the same `opts`.
#[tracing::instrument(skip(data), fields(len = data.len()))]
pub fn tree_from_json_with(data: &[u8], opts: &DecodeOpts) -> PixrleResult<Node> {
    let max_nesting = opts.max_depth * JSON_LEVELS_PER_REPEAT + 1;
    let nesting = json_nesting(data);
    if nesting > max_nesting {
        return Err(PixrleError::format(format!(
            "tree JSON nests {nesting} levels, more than {} repeats allow",
            opts.max_depth
        )));
    }

    let mut json = serde_json::Deserializer::from_slice(data);
    json.disable_recursion_limit();
    let node = Node::deserialize(serde_stacker::Deserializer::new(&mut json))
        .map_err(|e| PixrleError::format(format!("parse tree JSON: {e}")))?;
    json.end()
        .map_err(|e| PixrleError::format(format!("parse tree JSON: {e}")))?;

    if node.depth() > opts.max_depth {
        return Err(PixrleError::format(format!(
            "tree nests {} repeats, limit is {}",
            node.depth(),
            opts.max_depth
        )));
    }
    Ok(node)
}

/// Deepest bracket nesting outside string literals.
fn json_nesting(data: &[u8]) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for &b in data {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                max = max.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

#[cfg(test)]
#[path = "../../tests/unit/codec/json.rs"]
mod tests;

//! pixrle describes long runs of grayscale pixels as a nested run-length tree.
//!
//! A tree is either a [`Pixel`] or a [`Repeat`] that tiles the concatenation of
//! its children `count` times. Trees can be:
//!
//! - flattened into the literal pixel sequence they denote ([`Node::flatten`])
//! - encoded into and decoded from a compact binary format ([`encode`], [`decode`])
//! - authored as [`Template`]s whose counts or subtrees are functions of a
//!   context value, then resolved for one context ([`Template::evaluate`])
//! - written to and read from grayscale PNG rasters ([`save_png`], [`load_raster`])
//!
//! # Wire format
//!
//! Little-endian, 4-byte headers:
//!
//! - Pixel: `[PIXEL_OP, v, v, v]`
//! - Repeat: `[REPEAT_OP, child_count, count_lo, count_hi]` followed by each
//!   child's encoding in order.
//!
//! Decoding consumes a prefix of the buffer and returns the rest untouched.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod codec;
mod foundation;
mod model;
mod raster;
mod template;

pub use codec::decode::{
    DecodeOpts, decode, decode_all, decode_all_with, decode_exact, decode_with,
};
pub use codec::encode::{encode, encode_into, encoded_len};
pub use codec::json::{tree_from_json, tree_from_json_with};
pub use foundation::error::{PixrleError, PixrleResult};
pub use model::flatten::FlattenOpts;
pub use model::node::{BLACK, MAX_CHILDREN, Node, PIXEL_OP, Pixel, REPEAT_OP, Repeat, WHITE};
pub use raster::{from_raster, load_raster, save_png, to_raster};
pub use template::model::{ChildrenTemplate, CountTemplate, Placeholder, Template};
pub use template::patterns::horizontal_wipe;

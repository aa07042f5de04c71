//! Binary wire format.
//!
//! Every node starts with a 4-byte header whose first byte is the op code.
//! Pixels carry their intensity three times; repeats carry a child count byte
//! and a little-endian `u16` tile count, followed by each child's encoding.

pub(crate) mod decode;
pub(crate) mod encode;
pub(crate) mod json;

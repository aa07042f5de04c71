pub(crate) mod flatten;
pub(crate) mod node;

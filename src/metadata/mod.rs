pub(crate) mod traversal;
pub(crate) mod tree;

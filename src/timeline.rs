pub(crate) mod constraints;
pub(crate) mod selector;

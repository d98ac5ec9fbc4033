pub(crate) mod extent;
pub(crate) mod model;

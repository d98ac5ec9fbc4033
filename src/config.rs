pub(crate) mod derive;
pub(crate) mod loader;
pub(crate) mod model;

pub(crate) mod list;
pub(crate) mod ops;
pub(crate) mod regular;
pub(crate) mod restricted;
pub(crate) mod stepper;

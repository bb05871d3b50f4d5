#[allow(clippy::module_inception)]
pub(crate) mod motion;
pub(crate) mod path;

#[allow(clippy::module_inception)]
pub(crate) mod color;
pub(crate) mod gradient;

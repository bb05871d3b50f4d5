pub mod ansi;
pub(crate) mod canvas;
pub(crate) mod input;

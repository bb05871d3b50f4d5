pub(crate) mod character;
pub(crate) mod events;

pub(crate) mod callback;
pub(crate) mod table;

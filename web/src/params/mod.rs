pub(crate) mod callback;

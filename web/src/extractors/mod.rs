pub(crate) mod session_token;

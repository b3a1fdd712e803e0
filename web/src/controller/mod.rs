pub(crate) mod api_controller;
pub(crate) mod oauth_controller;
pub(crate) mod page_controller;

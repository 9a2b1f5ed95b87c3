pub(crate) mod auth_controller;
pub(crate) mod contact_controller;
pub(crate) mod health_check_controller;
pub(crate) mod sentiment_controller;
pub(crate) mod youtube_controller;

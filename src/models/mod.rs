pub mod api;
pub mod clear_sky;

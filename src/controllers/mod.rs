pub mod clear_sky_controller;

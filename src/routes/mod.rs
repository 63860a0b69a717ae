pub mod clear_sky_routes;

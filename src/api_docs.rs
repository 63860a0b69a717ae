use utoipa::OpenApi;
use crate::controllers::clear_sky_controller;
use crate::models::{api, clear_sky};
use crate::{config, error};

#[derive(OpenApi)]
#[openapi(
    paths(
        clear_sky_controller::compute_clear_sky,
        clear_sky_controller::compute_clear_sky_batch,
        clear_sky_controller::list_sites,
        clear_sky_controller::compute_site_clear_sky,
        clear_sky_controller::get_default_atmosphere,
        clear_sky_controller::get_health
    ),
    components(
        schemas(
            clear_sky::ClearSkyInputs,
            clear_sky::ClearSkyOutputs,
            clear_sky::ModifiedIrradiance,
            clear_sky::Atmosphere,
            api::ClearSkyRequest,
            api::SiteClearSkyRequest,
            api::ClearSkyResponse,
            api::BatchResponse,
            api::BatchItem,
            api::ErrorBody,
            api::HealthStatus,
            config::SiteConfig,
            error::Parameter
        )
    ),
    tags(
        (name = "bird-clear-sky", description = "Bird Clear Sky Irradiance API")
    )
)]
pub struct ApiDoc;

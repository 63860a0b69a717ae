use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::Parameter;
use crate::models::clear_sky::{Atmosphere, ClearSkyInputs, ClearSkyOutputs};

// ─── Requests ────────────────────────────────────────────────────────────────

/// Ad-hoc computation. Atmospheric fields left out are taken from the
/// configured default atmosphere.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ClearSkyRequest {
    /// Solar zenith angle (deg)
    pub zenith: f64,
    /// Earth radius vector (AU)
    pub r: f64,
    pub pressure: Option<f64>,
    pub ozone: Option<f64>,
    pub water: Option<f64>,
    pub taua: Option<f64>,
    pub ba: Option<f64>,
    pub albedo: Option<f64>,
    pub dni_mod: Option<f64>,
}

impl ClearSkyRequest {
    pub fn resolve(&self, defaults: &Atmosphere) -> ClearSkyInputs {
        ClearSkyInputs {
            zenith: self.zenith,
            r: self.r,
            pressure: self.pressure.unwrap_or(defaults.pressure),
            ozone: self.ozone.unwrap_or(defaults.ozone),
            water: self.water.unwrap_or(defaults.water),
            taua: self.taua.unwrap_or(defaults.taua),
            ba: self.ba.unwrap_or(defaults.ba),
            albedo: self.albedo.unwrap_or(defaults.albedo),
            dni_mod: self.dni_mod,
        }
    }
}

/// Computation against a configured site's atmosphere.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SiteClearSkyRequest {
    pub zenith: f64,
    pub r: f64,
    pub dni_mod: Option<f64>,
}

// ─── Responses ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct ClearSkyResponse {
    pub timestamp: DateTime<Utc>,
    /// Inputs after defaults were applied
    pub inputs: ClearSkyInputs,
    pub outputs: ClearSkyOutputs,
    /// False when the sun is at or below the horizon
    pub sun_up: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<Parameter>,
}

/// One entry of a batch response: either outputs or the validation error.
#[derive(Debug, Serialize, ToSchema)]
pub struct BatchItem {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<ClearSkyOutputs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BatchResponse {
    pub timestamp: DateTime<Utc>,
    pub succeeded: usize,
    pub failed: usize,
    pub items: Vec<BatchItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub computations: u64,
    pub rejected: u64,
    pub sites_total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_fills_missing_fields_from_defaults() {
        let req: ClearSkyRequest =
            serde_json::from_str(r#"{"zenith": 40, "r": 1.0, "albedo": 0.9}"#).unwrap();
        let defaults = Atmosphere::default();
        let inputs = req.resolve(&defaults);
        assert_eq!(inputs.albedo, 0.9);
        assert_eq!(inputs.pressure, defaults.pressure);
        assert_eq!(inputs.taua, defaults.taua);
        assert_eq!(inputs.dni_mod, None);
    }
}

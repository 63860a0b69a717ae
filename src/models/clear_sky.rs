use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ─── Model inputs ────────────────────────────────────────────────────────────

/// One set of geometric and atmospheric conditions for the Bird model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClearSkyInputs {
    /// Solar zenith angle (deg) — from a solar position algorithm
    pub zenith: f64,
    /// Earth radius vector (AU) — from a solar position algorithm
    pub r: f64,
    /// Annual average local pressure (mb)
    pub pressure: f64,
    /// Total column ozone thickness (cm), typically 0.05 – 0.4
    pub ozone: f64,
    /// Total column water vapor (cm), typically 0.01 – 6.5
    pub water: f64,
    /// Broadband aerosol optical depth, typically 0.02 – 0.5
    pub taua: f64,
    /// Forward scattering factor — 0.85 recommended for rural aerosols
    pub ba: f64,
    /// Ground reflectance — earth 0.2, snow 0.9, vegetation 0.25
    pub albedo: f64,
    /// Direct normal modification factor, typically 0.0 – 1.0.
    /// `None` skips the modified irradiance set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dni_mod: Option<f64>,
}

impl ClearSkyInputs {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        zenith: f64,
        r: f64,
        pressure: f64,
        ozone: f64,
        water: f64,
        taua: f64,
        ba: f64,
        albedo: f64,
        dni_mod: Option<f64>,
    ) -> Self {
        Self { zenith, r, pressure, ozone, water, taua, ba, albedo, dni_mod }
    }

    /// Same geometry over a preset atmosphere.
    pub fn from_atmosphere(zenith: f64, r: f64, atmosphere: &Atmosphere, dni_mod: Option<f64>) -> Self {
        Self {
            zenith,
            r,
            pressure: atmosphere.pressure,
            ozone: atmosphere.ozone,
            water: atmosphere.water,
            taua: atmosphere.taua,
            ba: atmosphere.ba,
            albedo: atmosphere.albedo,
            dni_mod,
        }
    }
}

/// Maps the signed convention, where a negative factor means "not requested",
/// onto the optional form.
pub fn dni_mod_from_sentinel(value: f64) -> Option<f64> {
    if value < 0.0 { None } else { Some(value) }
}

/// Atmospheric state shared by every computation at a site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Atmosphere {
    pub pressure: f64,
    pub ozone: f64,
    pub water: f64,
    pub taua: f64,
    pub ba: f64,
    pub albedo: f64,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            pressure: 1013.0,
            ozone: 0.3,
            water: 1.5,
            taua: 0.08,
            ba: 0.85,
            albedo: 0.2,
        }
    }
}

// ─── Model outputs ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct ClearSkyOutputs {
    /// Relative optical air mass (not pressure corrected)
    pub amass: f64,
    /// Direct normal irradiance (W/m²)
    pub direct_normal: f64,
    /// Global horizontal irradiance (W/m²)
    pub global_horiz: f64,
    /// Diffuse horizontal irradiance (W/m²)
    pub diffuse_horiz: f64,
    /// Irradiance recomputed from `direct_normal * dni_mod`; present only
    /// when a modification factor was supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<ModifiedIrradiance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct ModifiedIrradiance {
    pub direct_normal: f64,
    pub global_horiz: f64,
    pub diffuse_horiz: f64,
}

/// Attenuation factors along the slant path, each in (0, 1] for
/// physically reasonable inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Transmittances {
    pub rayleigh: f64,
    pub ozone: f64,
    pub gases: f64,
    pub water: f64,
    pub aerosol: f64,
}

impl Transmittances {
    pub fn product(&self) -> f64 {
        self.rayleigh * self.ozone * self.gases * self.water * self.aerosol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_negative_is_absent() {
        assert_eq!(dni_mod_from_sentinel(-1.0), None);
        assert_eq!(dni_mod_from_sentinel(0.0), Some(0.0));
        assert_eq!(dni_mod_from_sentinel(0.7), Some(0.7));
    }

    #[test]
    fn test_inputs_deserialize_without_dni_mod() {
        let json = r#"{"zenith":30,"r":1,"pressure":1013,"ozone":0.3,"water":1.5,
                       "taua":0.08,"ba":0.85,"albedo":0.2}"#;
        let inputs: ClearSkyInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.dni_mod, None);
        assert_eq!(inputs.zenith, 30.0);
    }

    #[test]
    fn test_from_atmosphere_copies_every_field() {
        let atm = Atmosphere { pressure: 820.0, ..Atmosphere::default() };
        let inputs = ClearSkyInputs::from_atmosphere(45.0, 0.99, &atm, Some(1.0));
        assert_eq!(inputs.pressure, 820.0);
        assert_eq!(inputs.albedo, atm.albedo);
        assert_eq!(inputs.dni_mod, Some(1.0));
    }

    #[test]
    fn test_outputs_omit_absent_modified_set() {
        let json = serde_json::to_value(ClearSkyOutputs::default()).unwrap();
        assert!(json.get("modified").is_none());
    }
}

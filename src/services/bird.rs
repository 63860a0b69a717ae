//! ============================================================
//!  Bird Clear Sky Broadband Solar Radiation Model
//!
//!  After R.E. Bird & R.L. Hulstrom, "A Simplified Clear Sky
//!  Model for Direct and Diffuse Insolation on Horizontal
//!  Surfaces" (SERI/TR-642-761).
//!
//!  Algorithm pipeline:
//!   1. Extraterrestrial normal irradiance – 1367 W/m² / r²
//!   2. Relative optical air mass – Kasten type, not pressure corrected
//!   3. Path lengths – pressure, ozone, water vapour
//!   4. Transmittances – Rayleigh, ozone, mixed gases, water, aerosol
//!   5. Direct normal irradiance
//!   6. Sky diffuse term + ground / sky multiple reflection
//!   7. Horizontal split – GHI, DHI (optionally for a scaled DNI)
//! ============================================================
use std::f64::consts::PI;

use crate::error::{ClearSkyError, Parameter, Result};
use crate::models::clear_sky::{
    ClearSkyInputs, ClearSkyOutputs, ModifiedIrradiance, Transmittances,
};

// ─── Physical constants ──────────────────────────────────────
const SC: f64 = 1367.0; // Solar constant W/m²
const DEG: f64 = PI / 180.0;
const P0: f64 = 1013.0; // Reference pressure mb

const RANGE_MIN: f64 = 0.0;
const RANGE_MAX: f64 = 100.0;

/// Checks the atmospheric inputs, first failure wins.
///
/// `zenith`, `r` and `pressure` are trusted as given.
pub fn validate(inputs: &ClearSkyInputs) -> Result<()> {
    let checks = [
        (Parameter::Ozone, inputs.ozone),
        (Parameter::Water, inputs.water),
        (Parameter::Taua, inputs.taua),
        (Parameter::Ba, inputs.ba),
        (Parameter::Albedo, inputs.albedo),
    ];
    for (parameter, value) in checks {
        check_range(parameter, value)?;
    }
    if let Some(dni_mod) = inputs.dni_mod {
        // Documented range is 0.0 – 1.0, the wider bound is kept for compatibility.
        check_range(Parameter::DniMod, dni_mod)?;
    }
    Ok(())
}

fn check_range(parameter: Parameter, value: f64) -> Result<()> {
    // NaN fails too
    if (RANGE_MIN..=RANGE_MAX).contains(&value) {
        Ok(())
    } else {
        Err(ClearSkyError::InvalidParameter { parameter, value })
    }
}

/// True when the sun is above the horizon at a physical distance.
pub fn sun_is_up(inputs: &ClearSkyInputs) -> bool {
    inputs.zenith >= 0.0 && inputs.zenith < 90.0 && inputs.r > 0.0
}

/// Relative optical air mass for a zenith angle in degrees.
pub fn air_mass(zenith_deg: f64) -> f64 {
    let coszen = (zenith_deg * DEG).cos();
    1.0 / (coszen + 0.50572 * (96.07995 - zenith_deg).powf(-1.6364))
}

/// The five attenuation terms for a given air mass.
pub fn transmittances(inputs: &ClearSkyInputs, amass: f64) -> Transmittances {
    let press = inputs.pressure * amass / P0;
    let oz = inputs.ozone * amass;
    let wat = inputs.water * amass;
    let taua = inputs.taua;

    let rayleigh = (-0.0903 * press.powf(0.84) * (1.0 + press - press.powf(1.01))).exp();
    let ozone = 1.0
        - 0.1611 * oz * (1.0 + 139.48 * oz).powf(-0.3034)
        - 0.002715 * oz / (1.0 + 0.044 * oz + 0.0003 * oz * oz);
    let gases = (-0.0127 * press.powf(0.26)).exp();
    let water = 1.0 - 2.4959 * wat / ((1.0 + 79.034 * wat).powf(0.6828) + 6.385 * wat);
    let aerosol =
        (-(taua.powf(0.873)) * (1.0 + taua - taua.powf(0.7088)) * amass.powf(0.9108)).exp();

    Transmittances { rayleigh, ozone, gases, water, aerosol }
}

/// Validates and runs the full model, returning a fresh output record.
pub fn compute(inputs: &ClearSkyInputs) -> Result<ClearSkyOutputs> {
    validate(inputs)?;

    if !sun_is_up(inputs) {
        return Ok(ClearSkyOutputs {
            modified: inputs.dni_mod.map(|_| ModifiedIrradiance::default()),
            ..ClearSkyOutputs::default()
        });
    }

    let etrn = SC / (inputs.r * inputs.r);
    let coszen = (inputs.zenith * DEG).cos();
    let amass = air_mass(inputs.zenith);
    let t = transmittances(inputs, amass);

    let direct_normal = 0.9662 * etrn * t.aerosol * t.water * t.gases * t.ozone * t.rayleigh;

    let taa = 1.0 - 0.1 * (1.0 - amass + amass.powf(1.06)) * (1.0 - t.aerosol);
    let rs = 0.0685 + (1.0 - inputs.ba) * (1.0 - t.aerosol / taa);
    let ias = etrn * coszen * 0.79 * t.ozone * t.gases * t.water * taa
        * (0.5 * (1.0 - t.rayleigh) + inputs.ba * (1.0 - t.aerosol / taa))
        / (1.0 - amass + amass.powf(1.02));

    #[cfg(feature = "verbose_log")]
    tracing::debug!(
        amass,
        etrn,
        t_rayleigh = t.rayleigh,
        t_ozone = t.ozone,
        t_gases = t.gases,
        t_water = t.water,
        t_aerosol = t.aerosol,
        taa,
        rs,
        ias,
        "[BIRD] intermediates"
    );

    let sky = SkyCoupling { coszen, ias, albedo: inputs.albedo, rs };
    let (global_horiz, diffuse_horiz) = sky.horizontal(direct_normal);

    let modified = inputs.dni_mod.map(|dni_mod| {
        let direct_normal_mod = direct_normal * dni_mod;
        let (global_horiz, diffuse_horiz) = sky.horizontal(direct_normal_mod);
        ModifiedIrradiance { direct_normal: direct_normal_mod, global_horiz, diffuse_horiz }
    });

    Ok(ClearSkyOutputs { amass, direct_normal, global_horiz, diffuse_horiz, modified })
}

/// Runs [`compute`] over each record independently.
pub fn compute_series(series: &[ClearSkyInputs]) -> Vec<Result<ClearSkyOutputs>> {
    series.iter().map(compute).collect()
}

// ─── Horizontal split ────────────────────────────────────────
/// Terms shared by the unmodified and modified horizontal split.
struct SkyCoupling {
    coszen: f64,
    ias: f64,
    albedo: f64,
    rs: f64,
}

impl SkyCoupling {
    /// (global, diffuse) horizontal irradiance for a direct normal value.
    fn horizontal(&self, dni: f64) -> (f64, f64) {
        let dir_horiz = dni * self.coszen;
        let global = (dir_horiz + self.ias) / (1.0 - self.albedo * self.rs);
        (global, global - dir_horiz)
    }
}

// ─── Stateful wrapper ────────────────────────────────────────
/// Holds one input record with the outputs computed from it.
///
/// Inputs can only change through [`ClearSkyModel::update`], which
/// recomputes before committing, so the outputs never go stale.
#[derive(Debug, Clone, PartialEq)]
pub struct ClearSkyModel {
    inputs: ClearSkyInputs,
    outputs: ClearSkyOutputs,
}

impl ClearSkyModel {
    pub fn new(inputs: ClearSkyInputs) -> Result<Self> {
        let outputs = compute(&inputs)?;
        Ok(Self { inputs, outputs })
    }

    pub fn inputs(&self) -> &ClearSkyInputs {
        &self.inputs
    }

    pub fn outputs(&self) -> &ClearSkyOutputs {
        &self.outputs
    }

    /// Edits the inputs and recomputes. On failure nothing changes.
    pub fn update(&mut self, edit: impl FnOnce(&mut ClearSkyInputs)) -> Result<()> {
        let mut next = self.inputs;
        edit(&mut next);
        self.outputs = compute(&next)?;
        self.inputs = next;
        Ok(())
    }

    pub fn recompute(&mut self) -> Result<()> {
        self.outputs = compute(&self.inputs)?;
        Ok(())
    }

    pub fn amass(&self) -> f64 {
        self.outputs.amass
    }

    pub fn direct_normal(&self) -> f64 {
        self.outputs.direct_normal
    }

    pub fn global_horiz(&self) -> f64 {
        self.outputs.global_horiz
    }

    pub fn diffuse_horiz(&self) -> f64 {
        self.outputs.diffuse_horiz
    }

    pub fn direct_normal_mod(&self) -> Option<f64> {
        self.outputs.modified.map(|m| m.direct_normal)
    }

    pub fn global_horiz_mod(&self) -> Option<f64> {
        self.outputs.modified.map(|m| m.global_horiz)
    }

    pub fn diffuse_horiz_mod(&self) -> Option<f64> {
        self.outputs.modified.map(|m| m.diffuse_horiz)
    }
}

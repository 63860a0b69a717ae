use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Input fields that carry a range check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    Ozone,
    Water,
    Taua,
    Ba,
    Albedo,
    DniMod,
}

impl Parameter {
    pub fn name(self) -> &'static str {
        match self {
            Parameter::Ozone => "ozone",
            Parameter::Water => "water",
            Parameter::Taua => "taua",
            Parameter::Ba => "ba",
            Parameter::Albedo => "albedo",
            Parameter::DniMod => "dni_mod",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Parameter::Ozone => "ozone thickness [cm]",
            Parameter::Water => "water vapor [cm]",
            Parameter::Taua => "broadband aerosol optical depth",
            Parameter::Ba => "forward scattering factor",
            Parameter::Albedo => "ground reflectance",
            Parameter::DniMod => "direct normal irradiance modification factor",
        }
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ClearSkyError {
    #[error("invalid {}: {value} (expected 0 to 100)", .parameter.description())]
    InvalidParameter { parameter: Parameter, value: f64 },
}

impl ClearSkyError {
    pub fn parameter(&self) -> Parameter {
        match self {
            ClearSkyError::InvalidParameter { parameter, .. } => *parameter,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClearSkyError>;

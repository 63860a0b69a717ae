//! Bird clear-sky broadband irradiance: direct normal, global horizontal and
//! diffuse horizontal from solar geometry and a column atmosphere.
//!
//! ```
//! use bird_clear_sky::models::clear_sky::ClearSkyInputs;
//! use bird_clear_sky::services::bird;
//!
//! let inputs = ClearSkyInputs::new(
//!     50.11162202402973, 0.9965422973539708, 820.0, 0.3, 1.5, 0.08, 0.85, 0.2, None,
//! );
//! let out = bird::compute(&inputs)?;
//! assert!((out.direct_normal - 874.5066).abs() < 0.01);
//! # Ok::<(), bird_clear_sky::error::ClearSkyError>(())
//! ```

pub mod api_docs;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod shared_state;

pub use error::{ClearSkyError, Parameter};
pub use models::clear_sky::{ClearSkyInputs, ClearSkyOutputs, ModifiedIrradiance};
pub use services::bird::{ClearSkyModel, compute, validate};

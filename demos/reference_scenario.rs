//! Reference run of the Bird model: Golden, CO, 820 mb.
//!
//! Expected:
//!   direct normal solar irradiance:      874.5066 [W/m^2]
//!   global horizontal solar irradiance:  664.8749 [W/m^2]
//!   diffuse horizontal solar irradiance: 104.0591 [W/m^2]

use bird_clear_sky::{ClearSkyInputs, ClearSkyModel};

fn main() {
    // zenith and r as produced by a solar position algorithm for the site
    let inputs = ClearSkyInputs::new(
        50.11162202402973,
        0.9965422973539708,
        820.0,
        0.3,
        1.5,
        0.08,
        0.85,
        0.2,
        Some(0.0),
    );

    let model = match ClearSkyModel::new(inputs) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };
    println!("relative optical air mass:           {:.4}", model.amass());
    println!("direct normal solar irradiance:      {:.4} [W/m^2]", model.direct_normal());
    println!("global horizontal solar irradiance:  {:.4} [W/m^2]", model.global_horiz());
    println!("diffuse horizontal solar irradiance: {:.4} [W/m^2]", model.diffuse_horiz());
}

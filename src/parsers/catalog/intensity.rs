//! Conversion of tabulated catalog intensities into absolute quantities
//!
//! Catalog files list log10 of the integrated intensity at 300 K. Together
//! with the 300 K partition function this yields the line strength S μ² and
//! the Einstein A coefficient (Pickett et al. 1998, JQSRT 60, 883).

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{
    EINSTEIN_A_PREFACTOR, INTENSITY_PREFACTOR, REFERENCE_TEMPERATURE_K,
    SECOND_RADIATION_CONSTANT, UPPER_ENERGY_SCALE,
};

/// 29979.2458 MHz per cm^-1, exact in decimal form
const MHZ_PER_WAVENUMBER_DECIMAL: Decimal = Decimal::from_parts(299_792_458, 0, 0, false, 4);

/// Derived strength quantities of one transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStrength {
    /// S μ² in D^2
    pub s_ij_mu2: f64,
    /// Einstein A coefficient in s^-1
    pub a_ij: f64,
}

/// Upper state energy in cm^-1 from the lower state energy and frequency (MHz)
pub fn upper_state_energy(lower_state_energy: Decimal, frequency: Decimal) -> Decimal {
    let mut energy = (lower_state_energy + frequency / MHZ_PER_WAVENUMBER_DECIMAL)
        .round_dp_with_strategy(UPPER_ENERGY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    energy.rescale(UPPER_ENERGY_SCALE);
    energy
}

/// Boltzmann population difference between lower and upper state at 300 K
fn population_difference(lower_state_energy: f64, upper_state_energy: f64) -> f64 {
    let scale = -SECOND_RADIATION_CONSTANT / REFERENCE_TEMPERATURE_K;
    (scale * lower_state_energy).exp() - (scale * upper_state_energy).exp()
}

/// Line strength and Einstein A from catalog columns
///
/// Returns `None` when the inputs do not describe a physical transition
/// (non-positive frequency or degeneracy, or a vanishing population
/// difference).
pub fn line_strength(
    frequency_mhz: f64,
    log_intensity: f64,
    lower_state_energy: f64,
    upper_state_energy: f64,
    upper_state_degeneracy: u32,
    partition_function_300: f64,
) -> Option<LineStrength> {
    if frequency_mhz <= 0.0 || upper_state_degeneracy == 0 {
        return None;
    }

    let population = population_difference(lower_state_energy, upper_state_energy);
    if !(population.is_finite() && population > 0.0) {
        return None;
    }

    let intensity = 10f64.powf(log_intensity);
    let s_ij_mu2 =
        intensity * partition_function_300 / (INTENSITY_PREFACTOR * frequency_mhz * population);
    let a_ij = EINSTEIN_A_PREFACTOR * frequency_mhz.powi(3) * s_ij_mu2
        / f64::from(upper_state_degeneracy);

    (s_ij_mu2.is_finite() && a_ij.is_finite()).then_some(LineStrength { s_ij_mu2, a_ij })
}

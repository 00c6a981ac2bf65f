//! Circular mean of compass bearings

/// Mean of a set of bearings via unit-vector summation, in [0, 360)
///
/// Averaging raw degree values breaks at the 0/360 wraparound; summing
/// sines and cosines does not: the mean of 350 and 10 is 0, not 180.
/// The pipeline guarantees a non-empty input; an empty slice would yield
/// `atan2(0, 0) = 0`, which is not a meaningful average.
pub fn mean_bearing_deg(bearings: &[f64]) -> f64 {
    let sin_sum: f64 = bearings.iter().map(|b| b.to_radians().sin()).sum();
    let cos_sum: f64 = bearings.iter().map(|b| b.to_radians().cos()).sum();

    (sin_sum.atan2(cos_sum).to_degrees() + 360.0) % 360.0
}

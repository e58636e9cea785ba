//! Natural Earth raw projection.
//!
//! Pseudocylindrical, equal-area-ish; the polynomial coefficients are the
//! published Natural Earth I constants. Input is geographic radians,
//! output is unitless projection-plane coordinates with north up.

/// Projects (longitude, latitude) radians onto the projection plane.
pub fn natural_earth_raw(lambda: f64, phi: f64) -> (f64, f64) {
    let phi2 = phi * phi;
    let phi4 = phi2 * phi2;
    let x = lambda
        * (0.870_7 - 0.131_979 * phi2
            + phi4 * (-0.013_791 + phi4 * (0.003_971 * phi2 - 0.001_529 * phi4)));
    let y = phi
        * (1.007_226
            + phi2 * (0.015_085 + phi4 * (-0.044_475 + 0.028_874 * phi2 - 0.005_916 * phi4)));
    (x, y)
}

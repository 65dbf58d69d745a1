//! The CIEDE2000 color-difference formula.
//! <https://en.wikipedia.org/wiki/Color_difference#CIEDE2000>

use crate::Component;

use std::f64::consts::PI;

/// 25^7, the fixed denominator of both chroma compensation factors.
const POW_25_7: Component = 6103515625.0;

/// Compute the CIEDE2000 (ΔE00) difference between two CIE-Lab colors.
///
/// The function is total over `f64`: non-finite inputs propagate into the
/// result rather than failing. Identical inputs give exactly `0.0` and the
/// result does not change when the two colors swap places.
///
/// Peer implementations in other languages agree with this one to an
/// absolute tolerance of `1e-10`, which requires the operation order below
/// to stay as written.
#[allow(clippy::many_single_char_names)]
pub fn ciede_2000(
    l_1: Component,
    a_1: Component,
    b_1: Component,
    l_2: Component,
    a_2: Component,
    b_2: Component,
) -> Component {
    // k_L, k_C and k_H weight the lightness, chroma and hue terms for
    // non-reference viewing conditions. Reference conditions fix all
    // three at 1.
    const K_L: Component = 1.0;
    const K_C: Component = 1.0;
    const K_H: Component = 1.0;

    // G factor from the mean raw chroma, raised to the 7th power. It
    // compresses the a axis for near-neutral colors.
    let mut n = (a_1.hypot(b_1) + a_2.hypot(b_2)) * 0.5;
    n = n * n * n * n * n * n * n;
    n = 1.0 + 0.5 * (1.0 - (n / (n + POW_25_7)).sqrt());

    // Chroma and hue angle of each color on the rescaled a axis. hypot
    // and atan2 keep both stable over the full component range.
    let c_1: Component = (a_1 * n).hypot(b_1);
    let c_2: Component = (a_2 * n).hypot(b_2);
    let mut h_1 = b_1.atan2(a_1 * n);
    let mut h_2 = b_2.atan2(a_2 * n);
    if h_1 < 0.0 {
        h_1 += 2.0 * PI;
    }
    if h_2 < 0.0 {
        h_2 += 2.0 * PI;
    }

    // A raw hue difference within 1e-14 of π is treated as exactly π, so
    // every peer implementation takes the same branch below no matter how
    // its platform rounded atan2.
    n = (h_2 - h_1).abs();
    if (PI - 1e-14..=PI + 1e-14).contains(&n) {
        n = PI;
    }

    // Circular mean of the two hue angles. When they lie more than π
    // apart the plain average points into the wrong quadrant and both the
    // mean and the half difference need a π correction.
    let mut h_m = 0.5 * h_1 + 0.5 * h_2;
    let mut h_d = (h_2 - h_1) * 0.5;
    if PI < n {
        if 0.0 < h_d {
            h_d -= PI;
        } else {
            h_d += PI;
        }
        h_m += PI;
    }

    // Rotation term, strongest in the blue region around h ≈ 275°.
    let p = 36.0 * h_m - 55.0 * PI;
    n = (c_1 + c_2) * 0.5;
    n = n * n * n * n * n * n * n;
    let r_t =
        -2.0 * (n / (n + POW_25_7)).sqrt() * (PI / 3.0 * (p * p / (-25.0 * PI * PI)).exp()).sin();

    // Lightness term, with the compensation weight centered at L = 50.
    n = (l_1 + l_2) * 0.5;
    n = (n - 50.0) * (n - 50.0);
    let l = (l_2 - l_1) / (K_L * (1.0 + 0.015 * n / (20.0 + n).sqrt()));

    // Hue compensation weight T, four sinusoidal harmonics of the mean
    // hue with fixed coefficients and phases.
    let t = 1.0 + 0.24 * (2.0 * h_m + PI * 0.5).sin() + 0.32 * (3.0 * h_m + 8.0 * PI / 15.0).sin()
        - 0.17 * (h_m + PI / 3.0).sin()
        - 0.20 * (4.0 * h_m + 3.0 * PI / 20.0).sin();

    // Hue and chroma terms.
    n = c_1 + c_2;
    let h = 2.0 * (c_1 * c_2).sqrt() * (h_d).sin() / (K_H * (1.0 + 0.0075 * n * t));
    let c = (c_2 - c_1) / (K_C * (1.0 + 0.0225 * n));

    (l * l + h * h + c * c + c * h * r_t).sqrt()
}

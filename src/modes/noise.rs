//! 2D simplex noise.
//!
//! Hash-permutation simplex noise (Gustavson/McEwan construction): skew to the
//! simplex grid, hash the three corner cells with a polynomial permutation,
//! and sum radially-attenuated gradient dot products. Pure function of its
//! input, output roughly in [-1, 1]. `organic_noise.wgsl` carries the same
//! formula line for line.

use super::math::{dot2, fract, Vec2};

const C_X: f32 = 0.211_324_87; // (3 - sqrt(3)) / 6
const C_Y: f32 = 0.366_025_4; // (sqrt(3) - 1) / 2
const C_Z: f32 = -0.577_350_26; // -1 + 2 * C_X
const C_W: f32 = 0.024_390_243; // 1 / 41

#[inline]
fn mod289(x: f32) -> f32 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn permute(x: f32) -> f32 {
    mod289(((x * 34.0) + 1.0) * x)
}

/// Evaluate simplex noise at `v`.
pub fn simplex2(v: Vec2) -> f32 {
    // First corner.
    let skew = dot2(v, [C_Y, C_Y]);
    let mut i = [(v[0] + skew).floor(), (v[1] + skew).floor()];
    let unskew = dot2(i, [C_X, C_X]);
    let x0 = [v[0] - i[0] + unskew, v[1] - i[1] + unskew];

    // Other corners.
    let i1 = if x0[0] > x0[1] { [1.0, 0.0] } else { [0.0, 1.0] };
    let x1 = [x0[0] + C_X - i1[0], x0[1] + C_X - i1[1]];
    let x2 = [x0[0] + C_Z, x0[1] + C_Z];

    // Permutations.
    i = [mod289(i[0]), mod289(i[1])];
    let hash = |dy: f32, dx: f32| permute(permute(i[1] + dy) + i[0] + dx);
    let p = [hash(0.0, 0.0), hash(i1[1], i1[0]), hash(1.0, 1.0)];

    let corners = [x0, x1, x2];
    let mut total = 0.0;
    for (corner, hashed) in corners.iter().zip(p) {
        let mut m = (0.5 - dot2(*corner, *corner)).max(0.0);
        m *= m;
        m *= m;

        // Gradients from 41 points on a line, mapped onto a diamond.
        let x = 2.0 * fract(hashed * C_W) - 1.0;
        let h = x.abs() - 0.5;
        let ox = (x + 0.5).floor();
        let a0 = x - ox;

        // Normalise gradients implicitly by scaling m.
        m *= 1.792_842_9 - 0.853_734_7 * (a0 * a0 + h * h);

        total += m * (a0 * corner[0] + h * corner[1]);
    }

    130.0 * total
}

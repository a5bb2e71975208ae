//! Scalar and 2D vector helpers matching the WGSL builtins the programs use.

pub type Vec2 = [f32; 2];
pub type Vec3 = [f32; 3];

/// Hermite interpolation; `edge0 > edge1` yields the reversed ramp.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear blend, exact at both endpoints.
#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

#[inline]
pub fn mix3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    [mix(a[0], b[0], t), mix(a[1], b[1], t), mix(a[2], b[2], t)]
}

#[inline]
pub fn scale3(v: Vec3, s: f32) -> Vec3 {
    [v[0] * s, v[1] * s, v[2] * s]
}

#[inline]
pub fn add3(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
pub fn add2(a: Vec2, b: Vec2) -> Vec2 {
    [a[0] + b[0], a[1] + b[1]]
}

#[inline]
pub fn sub2(a: Vec2, b: Vec2) -> Vec2 {
    [a[0] - b[0], a[1] - b[1]]
}

#[inline]
pub fn scale2(v: Vec2, s: f32) -> Vec2 {
    [v[0] * s, v[1] * s]
}

#[inline]
pub fn dot2(a: Vec2, b: Vec2) -> f32 {
    a[0] * b[0] + a[1] * b[1]
}

#[inline]
pub fn length2(v: Vec2) -> f32 {
    dot2(v, v).sqrt()
}

#[inline]
pub fn distance2(a: Vec2, b: Vec2) -> f32 {
    length2(sub2(a, b))
}

/// Fractional part with GLSL/WGSL semantics (`x - floor(x)`).
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothstep_endpoints() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
    }

    #[test]
    fn test_smoothstep_reversed_edges() {
        assert_eq!(smoothstep(10.0, 0.0, 0.0), 1.0);
        assert_eq!(smoothstep(10.0, 0.0, 10.0), 0.0);
        let forward = smoothstep(0.0, 10.0, 3.0);
        assert!((smoothstep(10.0, 0.0, 3.0) - (1.0 - forward)).abs() < 1e-6);
    }

    #[test]
    fn test_fract_negative() {
        assert!((fract(-0.25) - 0.75).abs() < 1e-6);
    }
}

//! Waveform rendering shared by both strategies.
//!
//! Both strategies read the same sample buffer and both re-derive `N` from
//! the live slice every frame. They differ only in where the work happens:
//! per pixel (SDF) or per vertex (line strip).

use super::math::{dot2, length2, scale2, sub2, Vec2};
use super::{ModeProgram, WaveformDirectProgram, WaveformSdfProgram, WaveformStrategy};
use crate::config::Palette;

/// Result of projecting a point onto a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Clamped position along the segment, 0 at `a` and 1 at `b`.
    pub h: f32,
    /// Distance from the point to its projection.
    pub distance: f32,
}

/// Distance from `p` to segment `a`-`b`.
///
/// A degenerate segment (`a == b`) measures distance to `a`.
#[inline]
pub fn segment_distance(p: Vec2, a: Vec2, b: Vec2) -> SegmentProjection {
    let pa = sub2(p, a);
    let ba = sub2(b, a);
    let len_sq = dot2(ba, ba);
    let h = if len_sq > 0.0 {
        (dot2(pa, ba) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    SegmentProjection {
        h,
        distance: length2(sub2(pa, scale2(ba, h))),
    }
}

/// Pixel-space (y-up) position of sample `k` out of `n`.
///
/// x spans the full width; a sample of -1 sits on the bottom edge and +1 on the top.
/// With fewer than two samples there is no span, so x is pinned to 0.
#[inline]
pub fn sample_point(k: usize, n: usize, sample: f32, resolution: Vec2) -> Vec2 {
    let x = if n < 2 { 0.0 } else { k as f32 / (n - 1) as f32 };
    let y = (sample + 1.0) * 0.5;
    [x * resolution[0], y * resolution[1]]
}

/// Create the program for a waveform strategy.
pub fn waveform_program(strategy: WaveformStrategy, palette: &Palette) -> Box<dyn ModeProgram> {
    match strategy {
        WaveformStrategy::Sdf => Box::new(WaveformSdfProgram::new(palette)),
        WaveformStrategy::LineStrip => Box::new(WaveformDirectProgram::new(palette)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perpendicular_distance() {
        let proj = segment_distance([5.0, 5.0], [0.0, 0.0], [10.0, 0.0]);
        assert_eq!(proj.h, 0.5);
        assert_eq!(proj.distance, 5.0);
    }

    #[test]
    fn test_distance_clamps_to_near_endpoint() {
        let proj = segment_distance([-5.0, 0.0], [0.0, 0.0], [10.0, 0.0]);
        assert_eq!(proj.h, 0.0);
        assert_eq!(proj.distance, 5.0);

        let proj = segment_distance([13.0, 4.0], [0.0, 0.0], [10.0, 0.0]);
        assert_eq!(proj.h, 1.0);
        assert_eq!(proj.distance, 5.0);
    }

    #[test]
    fn test_point_on_segment_is_zero() {
        let proj = segment_distance([2.5, 2.5], [0.0, 0.0], [10.0, 10.0]);
        assert_eq!(proj.distance, 0.0);
    }

    #[test]
    fn test_degenerate_segment() {
        let proj = segment_distance([3.0, 4.0], [0.0, 0.0], [0.0, 0.0]);
        assert_eq!(proj.distance, 5.0);
    }

    #[test]
    fn test_sample_point_mapping() {
        let res = [800.0, 600.0];
        assert_eq!(sample_point(0, 5, -1.0, res), [0.0, 0.0]);
        assert_eq!(sample_point(4, 5, 1.0, res), [800.0, 600.0]);
        assert_eq!(sample_point(2, 5, 0.0, res), [400.0, 300.0]);
    }

    #[test]
    fn test_sample_point_without_span() {
        let res = [100.0, 100.0];
        assert_eq!(sample_point(0, 1, 0.0, res), [0.0, 50.0]);
        assert_eq!(sample_point(0, 0, 1.0, res), [0.0, 100.0]);
    }
}

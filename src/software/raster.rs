//! Pixel buffer, blending, and line walking for the software renderer.

/// Floating-point RGBA canvas with GPU-style alpha blending.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 4]>,
}

impl Canvas {
    /// Canvas cleared to an opaque background.
    pub fn new(width: u32, height: u32, background: [f32; 3]) -> Self {
        let [r, g, b] = background;
        Self {
            width,
            height,
            pixels: vec![[r, g, b, 1.0]; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> [f32; 4] {
        self.pixels[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Blend `src` over pixel `(x, y)` the way `BlendState::ALPHA_BLENDING` does
    /// on a unorm target. Out-of-bounds coordinates are ignored.
    pub fn blend(&mut self, x: i64, y: i64, src: [f32; 4]) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let index = (y as usize) * (self.width as usize) + x as usize;
        let dst = self.pixels[index];
        // Unorm attachments clamp the fragment output before blending.
        let src = src.map(|c| c.clamp(0.0, 1.0));
        let a = src[3];
        self.pixels[index] = [
            src[0] * a + dst[0] * (1.0 - a),
            src[1] * a + dst[1] * (1.0 - a),
            src[2] * a + dst[2] * (1.0 - a),
            a + dst[3] * (1.0 - a),
        ];
    }

    /// Quantize to tightly packed RGBA8 rows, top row first.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|px| px.map(quantize))
            .collect()
    }
}

/// Unorm conversion: clamp, scale, round to nearest.
#[inline]
pub fn quantize(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Clip-space position to continuous pixel coordinates (origin top-left).
#[inline]
pub fn clip_to_pixel(clip: [f32; 2], width: u32, height: u32) -> [f32; 2] {
    [
        (clip[0] + 1.0) * 0.5 * width as f32,
        (1.0 - clip[1]) * 0.5 * height as f32,
    ]
}

/// Clip segment `a -> b` to the rectangle `[0, width] x [0, height]` (Liang-Barsky).
///
/// Returns `None` when nothing of the segment is inside or an endpoint is not finite.
pub fn clip_segment(a: [f32; 2], b: [f32; 2], width: f32, height: f32) -> Option<([f32; 2], [f32; 2])> {
    if !a.iter().chain(b.iter()).all(|c| c.is_finite()) {
        return None;
    }
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    let edges = [
        (-dx, a[0]),
        (dx, width - a[0]),
        (-dy, a[1]),
        (dy, height - a[1]),
    ];

    let (mut t0, mut t1) = (0.0f32, 1.0f32);
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        [a[0] + dx * t0, a[1] + dy * t0],
        [a[0] + dx * t1, a[1] + dy * t1],
    ))
}

/// Walk the segment `a -> b` with a DDA, calling `plot` for every pixel it crosses
/// inside a `width` x `height` canvas.
///
/// The segment is clipped first, so the step count is bounded by the canvas
/// size however far the endpoints lie outside it. Both clipped endpoints are
/// visited; a degenerate segment plots a single pixel.
pub fn walk_segment(a: [f32; 2], b: [f32; 2], width: u32, height: u32, mut plot: impl FnMut(i64, i64)) {
    let Some((a, b)) = clip_segment(a, b, width as f32, height as f32) else {
        return;
    };
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as u32;
    for step in 0..=steps {
        let t = step as f32 / steps as f32;
        let x = a[0] + dx * t;
        let y = a[1] + dy * t;
        plot(x.floor() as i64, y.floor() as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_alpha_over_background() {
        let mut canvas = Canvas::new(1, 1, [0.0, 0.0, 1.0]);
        canvas.blend(0, 0, [1.0, 0.0, 0.0, 0.25]);
        let px = canvas.pixel(0, 0);
        assert!((px[0] - 0.25).abs() < 1e-6);
        assert!((px[2] - 0.75).abs() < 1e-6);
        assert_eq!(px[3], 1.0);
    }

    #[test]
    fn test_blend_clamps_overbright_source() {
        let mut canvas = Canvas::new(1, 1, [0.0; 3]);
        canvas.blend(0, 0, [2.5, 0.5, 0.0, 1.0]);
        assert_eq!(canvas.pixel(0, 0), [1.0, 0.5, 0.0, 1.0]);
    }

    #[test]
    fn test_blend_out_of_bounds_ignored() {
        let mut canvas = Canvas::new(2, 2, [0.0; 3]);
        canvas.blend(-1, 0, [1.0; 4]);
        canvas.blend(2, 1, [1.0; 4]);
        assert!(canvas.to_rgba8().chunks(4).all(|p| p == [0, 0, 0, 255]));
    }

    #[test]
    fn test_quantize_rounds() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 255);
        assert_eq!(quantize(0.5), 128);
        assert_eq!(quantize(-3.0), 0);
    }

    #[test]
    fn test_clip_to_pixel_corners() {
        assert_eq!(clip_to_pixel([-1.0, 1.0], 100, 50), [0.0, 0.0]);
        assert_eq!(clip_to_pixel([1.0, -1.0], 100, 50), [100.0, 50.0]);
        assert_eq!(clip_to_pixel([0.0, 0.0], 100, 50), [50.0, 25.0]);
    }

    #[test]
    fn test_walk_segment_is_connected() {
        let mut visited = Vec::new();
        walk_segment([0.5, 0.5], [10.5, 3.5], 16, 8, |x, y| visited.push((x, y)));
        assert_eq!(visited.first(), Some(&(0, 0)));
        assert_eq!(visited.last(), Some(&(10, 3)));
        for pair in visited.windows(2) {
            assert!((pair[1].0 - pair[0].0).abs() <= 1);
            assert!((pair[1].1 - pair[0].1).abs() <= 1);
        }
    }

    #[test]
    fn test_walk_degenerate_segment() {
        let mut count = 0;
        walk_segment([3.2, 4.7], [3.2, 4.7], 16, 8, |x, y| {
            assert_eq!((x, y), (3, 4));
            count += 1;
        });
        assert!(count >= 1);
    }

    #[test]
    fn test_walk_far_offscreen_endpoint_is_bounded() {
        let mut count = 0usize;
        walk_segment([0.0, 32.0], [96.0, -1.6e7], 96, 64, |x, _| {
            assert!((0..=96).contains(&x));
            count += 1;
        });
        assert!(count > 0);
        assert!(count <= 97, "{count} plots");
    }

    #[test]
    fn test_walk_segment_outside_canvas_plots_nothing() {
        let mut count = 0;
        walk_segment([-50.0, -10.0], [-5.0, 300.0], 32, 32, |_, _| count += 1);
        walk_segment([0.0, f32::NAN], [10.0, 5.0], 32, 32, |_, _| count += 1);
        walk_segment([0.0, 0.0], [f32::INFINITY, 5.0], 32, 32, |_, _| count += 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_clip_segment_keeps_inside_segment() {
        let clipped = clip_segment([1.0, 2.0], [5.0, 6.0], 10.0, 10.0);
        assert_eq!(clipped, Some(([1.0, 2.0], [5.0, 6.0])));
    }

    #[test]
    fn test_clip_segment_trims_to_edges() {
        let (a, b) = clip_segment([-10.0, 5.0], [20.0, 5.0], 10.0, 10.0).unwrap();
        assert!(a[0].abs() < 1e-4 && a[1] == 5.0);
        assert!((b[0] - 10.0).abs() < 1e-4 && b[1] == 5.0);
    }
}

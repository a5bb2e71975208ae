//! Full-screen stage: one oversized triangle from three synthetic indices.

/// Vertices emitted per full-screen draw.
pub const FULLSCREEN_VERTEX_COUNT: u32 = 3;

/// Clip-space corner `index` of the covering triangle.
///
/// Indices 0, 1, 2 map to (-1,-1), (3,-1), (-1,3): the triangle's hypotenuse
/// passes through (1,1), so the [-1,1] square is covered for any aspect ratio.
#[inline]
pub fn fullscreen_vertex(index: u32) -> [f32; 2] {
    let u = ((index << 1) & 2) as f32;
    let v = (index & 2) as f32;
    [u * 2.0 - 1.0, v * 2.0 - 1.0]
}

/// Column-major 4x4 matrix, laid out exactly as WGSL's `mat4x4<f32>`.
///
/// `self.0[c]` is column `c`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Mat4(pub [[f32; 4]; 4]);

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    /// Transforms the point `(x, y, z, 1)` and returns the resulting homogeneous vector.
    pub fn transform_point(&self, x: f32, y: f32, z: f32) -> [f32; 4] {
        let m = &self.0;
        let mut out = [0.0f32; 4];
        for (row, slot) in out.iter_mut().enumerate() {
            *slot = m[0][row] * x + m[1][row] * y + m[2][row] * z + m[3][row];
        }
        out
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Orthographic (parallel) projection that maps an arbitrary viewport to clip space.
///
/// The originating space is right-handed; passing `top < bottom` yields the usual
/// top-left origin with +Y down. Depth maps `near -> 1` and `far -> 0`, so flat
/// content at `z = 0` with the usual `(-1, 1)` range sits at `0.5`.
pub fn ortho_projection(
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
    near: f32,
    far: f32,
) -> Mat4 {
    let xs = 2.0 / (right - left);
    let ys = 2.0 / (top - bottom);
    let zs = -1.0 / (far - near);
    let tx = (left + right) / (left - right);
    let ty = (top + bottom) / (bottom - top);
    let tz = -near / (far - near);

    Mat4([
        [xs, 0.0, 0.0, 0.0],
        [0.0, ys, 0.0, 0.0],
        [0.0, 0.0, zs, 0.0],
        [tx, ty, tz, 1.0],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    // ── ortho_projection ─────────────────────────────────────────────────

    #[test]
    fn top_left_maps_to_ndc_top_left() {
        let m = ortho_projection(0.0, 0.0, 800.0, 600.0, -1.0, 1.0);
        let p = m.transform_point(0.0, 0.0, 0.0);
        assert!(approx(p[0], -1.0));
        assert!(approx(p[1], 1.0));
        assert!(approx(p[3], 1.0));
    }

    #[test]
    fn bottom_right_maps_to_ndc_bottom_right() {
        let m = ortho_projection(0.0, 0.0, 800.0, 600.0, -1.0, 1.0);
        let p = m.transform_point(800.0, 600.0, 0.0);
        assert!(approx(p[0], 1.0));
        assert!(approx(p[1], -1.0));
    }

    #[test]
    fn center_maps_to_origin() {
        let m = ortho_projection(0.0, 0.0, 1000.0, 500.0, -1.0, 1.0);
        let p = m.transform_point(500.0, 250.0, 0.0);
        assert!(approx(p[0], 0.0));
        assert!(approx(p[1], 0.0));
    }

    #[test]
    fn flat_content_lands_inside_depth_range() {
        let m = ortho_projection(0.0, 0.0, 10.0, 10.0, -1.0, 1.0);
        let z = m.transform_point(3.0, 3.0, 0.0)[2];
        assert!(approx(z, 0.5));
    }

    #[test]
    fn offset_viewport_is_respected() {
        let m = ortho_projection(100.0, 50.0, 300.0, 250.0, -1.0, 1.0);
        let p = m.transform_point(100.0, 50.0, 0.0);
        assert!(approx(p[0], -1.0));
        assert!(approx(p[1], 1.0));
    }

    // ── Mat4 ─────────────────────────────────────────────────────────────

    #[test]
    fn identity_is_default_and_passes_points_through() {
        let p = Mat4::default().transform_point(3.0, -4.0, 0.25);
        assert_eq!(p, [3.0, -4.0, 0.25, 1.0]);
    }

    #[test]
    fn matrix_is_64_bytes() {
        assert_eq!(std::mem::size_of::<Mat4>(), 64);
    }
}

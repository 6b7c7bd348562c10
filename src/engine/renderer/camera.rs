// Screen-space projection for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Fixed camera mapping arena pixel coordinates to clip space.
///
/// The arena uses a top-left origin with y growing downward; the projection
/// flips y so that convention carries straight through to the GPU.
#[derive(Debug, Clone)]
pub struct ScreenCamera {
    width: f32,
    height: f32,
}

impl ScreenCamera {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Orthographic view-projection matrix
    pub fn view_proj(&self) -> Mat4 {
        Mat4::orthographic_rh(0.0, self.width, self.height, 0.0, -1.0, 1.0)
    }

    /// Uniform payload for the sprite shader
    pub fn uniform(&self) -> ScreenUniform {
        ScreenUniform {
            view_proj: self.view_proj().to_cols_array_2d(),
        }
    }
}

/// GPU-side camera uniform
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct ScreenUniform {
    pub view_proj: [[f32; 4]; 4],
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec4;

    #[test]
    fn test_origin_maps_to_top_left_of_clip_space() {
        let camera = ScreenCamera::new(1400.0, 770.0);
        let clip = camera.view_proj() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(clip.x, -1.0);
        assert_relative_eq!(clip.y, 1.0);
    }

    #[test]
    fn test_far_corner_maps_to_bottom_right() {
        let camera = ScreenCamera::new(1400.0, 770.0);
        let clip = camera.view_proj() * Vec4::new(1400.0, 770.0, 0.0, 1.0);
        assert_relative_eq!(clip.x, 1.0);
        assert_relative_eq!(clip.y, -1.0);
    }

    #[test]
    fn test_center_maps_to_clip_origin() {
        let camera = ScreenCamera::new(1400.0, 770.0);
        let clip = camera.view_proj() * Vec4::new(700.0, 385.0, 0.0, 1.0);
        assert_relative_eq!(clip.x, 0.0);
        assert_relative_eq!(clip.y, 0.0);
    }
}

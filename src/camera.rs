use crate::vector::Vector2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vector2,
    direction: Vector2, // not renormalised, only its angle matters
    plane: Vector2,     // screen-space basis, derived from direction
    plane_length: f64,  // tan(fov / 2)
}

impl Camera {
    pub fn new(position: Vector2, direction: Vector2, fov_degrees: f64) -> Self {
        let mut camera = Self {
            position,
            direction,
            plane: Vector2::ZERO,
            plane_length: 0.0,
        };
        camera.set_fov(fov_degrees);
        camera
    }

    #[inline]
    pub fn direction(&self) -> Vector2 {
        self.direction
    }

    #[inline]
    pub fn plane(&self) -> Vector2 {
        self.plane
    }

    #[inline]
    pub fn plane_length(&self) -> f64 {
        self.plane_length
    }

    pub fn set_fov(&mut self, fov_degrees: f64) {
        self.plane_length = (0.5 * fov_degrees.to_radians()).tan();
        self.update_plane();
    }

    /// Turns the camera counter-clockwise by `angle` radians.
    pub fn rotate(&mut self, angle: f64) {
        self.direction = self.direction.rotate(angle);
        self.update_plane();
    }

    /// Strafe basis, a quarter turn clockwise from the facing direction.
    #[inline]
    pub fn right(&self) -> Vector2 {
        Vector2::new(self.direction.y, -self.direction.x)
    }

    /// Ray direction through screen column `column` of `width`.
    /// Column 0 is the left edge of the view, `width` would be the right edge.
    #[inline]
    pub fn ray_direction(&self, column: usize, width: usize) -> Vector2 {
        let offset = 2.0 * column as f64 / width as f64 - 1.0;
        self.direction + self.plane * offset
    }

    fn update_plane(&mut self) {
        self.plane = self.right() * self.plane_length;
    }
}

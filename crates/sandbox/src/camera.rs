//! A free-flying perspective camera.

use std::f64::consts::PI;

use anyhow::{ensure, Context};

use crate::linalg::{
    projection::{look_at, perspective},
    transform::rotate_vector,
    Matrix, Real, Vector,
};

/// Multiply by this to convert degrees to radians.
pub const DEG2RAD: Real = (PI / 180.0) as Real;

/// Multiply by this to convert radians to degrees.
pub const RAD2DEG: Real = (180.0 / PI) as Real;

/// Initial state of a [`Camera`].
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSettings {
    /// Vertical field of view, in degrees. Must be in `(0, 360)`.
    pub fovy: Real,
    /// Distance of the near clipping plane. Must not be negative.
    pub near: Real,
    /// Distance of the far clipping plane. Must be larger than `near`.
    pub far: Real,
    /// Translation speed, in units per second.
    pub speed: Real,
    /// Rotation speed, in radians per second.
    pub angular_speed: Real,
    pub position: [Real; 3],
    /// Viewing direction. Does not have to be normalized.
    pub front: [Real; 3],
    /// Up direction of the world. The camera's initial up vector is derived from this.
    pub up: [Real; 3],
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            near: 0.1,
            far: 100.0,
            speed: 5.0,
            angular_speed: 3.0,
            position: [0.0, 0.0, 3.0],
            front: [0.0, 0.0, -1.0],
            up: [0.0, 1.0, 0.0],
        }
    }
}

/// A rectangular region of the render target, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn aspect_ratio(&self) -> Real {
        self.width as Real / self.height as Real
    }
}

/// A perspective camera that can move and rotate freely.
///
/// The camera keeps an orthonormal basis (`front`, `up`, `right`) plus a position. Movement and
/// rotation methods take the elapsed time in seconds and scale it by the configured (angular)
/// speed.
///
/// The [`projection`](Camera::projection) and [`view`](Camera::view) matrices are only recomputed
/// by [`Camera::update`], which is meant to be called once per frame after handling input.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vector,
    front: Vector,
    up: Vector,
    right: Vector,
    world_up: Vector,
    speed: Real,
    angular_speed: Real,
    fovy: Real,
    near: Real,
    far: Real,
    viewport: Option<Viewport>,
    surface_size: (u32, u32),
    projection: Matrix,
    view: Matrix,
}

impl Camera {
    /// Creates a camera that renders to a surface of `surface_size` (width, height) pixels.
    ///
    /// The projection and view matrices are computed immediately.
    pub fn new(settings: CameraSettings, surface_size: (u32, u32)) -> anyhow::Result<Self> {
        let CameraSettings {
            fovy,
            near,
            far,
            speed,
            angular_speed,
            position,
            front,
            up,
        } = settings;

        ensure!(
            fovy > 0.0 && fovy < 360.0,
            "field of view must be between 0° and 360°, got {fovy}°"
        );
        ensure!(near >= 0.0, "near plane must not be negative, got {near}");
        ensure!(
            far > near,
            "far plane ({far}) must be further away than near plane ({near})"
        );
        ensure!(speed >= 0.0, "speed must not be negative, got {speed}");
        ensure!(
            angular_speed >= 0.0,
            "angular speed must not be negative, got {angular_speed}"
        );
        ensure!(
            surface_size.0 > 0 && surface_size.1 > 0,
            "surface size must not be zero, got {}x{}",
            surface_size.0,
            surface_size.1,
        );

        let front = Vector::from(front)
            .unit()
            .context("invalid camera front vector")?;
        let world_up = Vector::from(up).unit().context("invalid camera up vector")?;
        let (right, up) = basis(&front, &world_up)?;

        let mut this = Self {
            position: Vector::from(position),
            front,
            up,
            right,
            world_up,
            speed,
            angular_speed,
            fovy,
            near,
            far,
            viewport: None,
            surface_size,
            projection: crate::linalg::mat4(),
            view: crate::linalg::mat4(),
        };
        this.update()?;
        Ok(this)
    }

    /// Recomputes the projection and view matrices from the current camera state.
    ///
    /// The aspect ratio is taken from the viewport if one was set, and from the surface size
    /// otherwise.
    pub fn update(&mut self) -> anyhow::Result<()> {
        let aspect = match &self.viewport {
            Some(vp) => vp.aspect_ratio(),
            None => self.surface_size.0 as Real / self.surface_size.1 as Real,
        };

        self.projection = perspective(self.fovy * DEG2RAD, aspect, self.near, self.far)
            .context("failed to compute projection matrix")?;

        let target = self.position.checked_add(&self.front)?;
        self.view = look_at(&self.position, &target, &self.up)
            .context("failed to compute view matrix")?;

        log::debug!(
            "camera updated: position={}, front={}, aspect={}",
            self.position,
            self.front,
            aspect
        );
        Ok(())
    }

    /// Restricts rendering to a region of the surface and updates the matrices accordingly.
    pub fn set_viewport(&mut self, x: u32, y: u32, width: u32, height: u32) -> anyhow::Result<()> {
        ensure!(
            width > 0 && height > 0,
            "viewport must not be empty, got {width}x{height}"
        );
        self.viewport = Some(Viewport {
            x,
            y,
            width,
            height,
        });
        log::debug!("camera viewport set to {width}x{height}+{x}+{y}");
        self.update()
    }

    /// Changes the size of the surface, eg. after the window was resized.
    pub fn set_surface_size(&mut self, width: u32, height: u32) -> anyhow::Result<()> {
        ensure!(
            width > 0 && height > 0,
            "surface size must not be zero, got {width}x{height}"
        );
        self.surface_size = (width, height);
        self.update()
    }

    pub fn set_speed(&mut self, speed: Real) -> anyhow::Result<()> {
        ensure!(speed >= 0.0, "speed must not be negative, got {speed}");
        self.speed = speed;
        Ok(())
    }

    pub fn set_angular_speed(&mut self, speed: Real) -> anyhow::Result<()> {
        ensure!(speed >= 0.0, "angular speed must not be negative, got {speed}");
        self.angular_speed = speed;
        Ok(())
    }

    /// Moves the camera along an arbitrary `direction` (scaled by speed and `dt`).
    pub fn move_along(&mut self, dt: Real, direction: &Vector) -> anyhow::Result<()> {
        self.position = self
            .position
            .checked_add(&(direction * (self.speed * dt)))
            .context("invalid movement direction")?;
        Ok(())
    }

    pub fn move_forward(&mut self, dt: Real) {
        self.position += &self.front * (self.speed * dt);
    }

    pub fn move_backward(&mut self, dt: Real) {
        self.position -= &self.front * (self.speed * dt);
    }

    pub fn move_left(&mut self, dt: Real) {
        self.position -= &self.right * (self.speed * dt);
    }

    pub fn move_right(&mut self, dt: Real) {
        self.position += &self.right * (self.speed * dt);
    }

    pub fn move_up(&mut self, dt: Real) {
        self.position += &self.up * (self.speed * dt);
    }

    pub fn move_down(&mut self, dt: Real) {
        self.position -= &self.up * (self.speed * dt);
    }

    /// Turns the camera around its own up vector. Positive `dt` turns left.
    ///
    /// Combined with [`Camera::pitch`], this rolls the camera relative to the world over time (like
    /// an aircraft). Use [`Camera::rotate_view`] for mouse look, or [`Camera::level`] to remove
    /// the roll.
    pub fn yaw(&mut self, dt: Real) -> anyhow::Result<()> {
        let angle = self.angular_speed * dt;
        let front = rotate_vector(&self.front, angle, &self.up)?;
        self.reorient(front, self.up.clone())
    }

    /// Tilts the camera around its right vector. Positive `dt` looks up.
    pub fn pitch(&mut self, dt: Real) -> anyhow::Result<()> {
        let angle = self.angular_speed * dt;
        let front = rotate_vector(&self.front, angle, &self.right)?;
        let up = rotate_vector(&self.up, angle, &self.right)?;
        self.reorient(front, up)
    }

    /// Rolls the camera around its front vector. Positive `dt` rolls clockwise, as seen by the
    /// camera.
    pub fn roll(&mut self, dt: Real) -> anyhow::Result<()> {
        let angle = self.angular_speed * dt;
        let up = rotate_vector(&self.up, angle, &self.front)?;
        self.reorient(self.front.clone(), up)
    }

    /// Turns the view towards an offset `(dx, dy)` in the image plane (X right, Y up), eg. a
    /// mouse movement.
    ///
    /// The horizontal part turns the camera around the world's up direction rather than its own,
    /// followed by a pitch by `dy`. The right vector therefore stays perpendicular to the world's
    /// up direction, and no roll builds up.
    pub fn rotate_view(&mut self, dt: Real, dx: Real, dy: Real) -> anyhow::Result<()> {
        let angle = -dx * dt * self.angular_speed;
        let front = rotate_vector(&self.front, angle, &self.world_up)?;
        let up = rotate_vector(&self.up, angle, &self.world_up)?;
        self.reorient(front, up)?;
        self.pitch(dy * dt)
    }

    /// Removes any roll, aligning the camera's up vector with the world's up direction again.
    pub fn level(&mut self) -> anyhow::Result<()> {
        self.reorient(self.front.clone(), self.world_up.clone())
    }

    fn reorient(&mut self, front: Vector, up: Vector) -> anyhow::Result<()> {
        let front = front.unit().context("camera front vector degenerated")?;
        let (right, up) = basis(&front, &up)?;
        self.front = front;
        self.right = right;
        self.up = up;
        Ok(())
    }

    /// Computes the model-view-projection matrix for an object with the given `model` transform.
    pub fn mvp(&self, model: &Matrix) -> anyhow::Result<Matrix> {
        let model_view = self
            .view
            .matmul(model)
            .context("model matrix must be a 4x4 matrix")?;
        Ok(self.projection.matmul(&model_view)?)
    }

    pub fn position(&self) -> &Vector {
        &self.position
    }

    pub fn front(&self) -> &Vector {
        &self.front
    }

    pub fn up(&self) -> &Vector {
        &self.up
    }

    /// The camera's right vector (`front × up`).
    pub fn right(&self) -> &Vector {
        &self.right
    }

    pub fn world_up(&self) -> &Vector {
        &self.world_up
    }

    pub fn projection(&self) -> &Matrix {
        &self.projection
    }

    pub fn view(&self) -> &Matrix {
        &self.view
    }

    pub fn speed(&self) -> Real {
        self.speed
    }

    pub fn angular_speed(&self) -> Real {
        self.angular_speed
    }

    /// Vertical field of view, in degrees.
    pub fn fovy(&self) -> Real {
        self.fovy
    }

    pub fn near(&self) -> Real {
        self.near
    }

    pub fn far(&self) -> Real {
        self.far
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn surface_size(&self) -> (u32, u32) {
        self.surface_size
    }
}

/// Computes the right and (orthogonalized) up vector for a unit `front` vector.
fn basis(front: &Vector, up: &Vector) -> anyhow::Result<(Vector, Vector)> {
    let right = front
        .cross(up)?
        .unit()
        .context("camera up vector must not be parallel to its front vector")?;
    let up = right.cross(front)?;
    Ok((right, up))
}

//! The host node a sprite button draws through.
//!
//! [`SpriteNode`] is the renderable part of a button: a positioned, sized box
//! with a tint color and an optional texture. The renderer reads it; the
//! button writes `color` and `texture` as its interaction state changes.
//!
//! Local coordinates are centered on the node, so a node of size `w x h`
//! covers `-w/2 < x < w/2` and `-h/2 < y < h/2` in its own space.

use horizon_sprite_render::{Color, Point, Rect, Size, Texture, Transform2D};

/// A positioned, sized, renderable node with mutable color and texture.
#[derive(Debug, Clone)]
pub struct SpriteNode {
    position: Point,
    size: Size,
    x_scale: f32,
    y_scale: f32,
    rotation: f32,
    z_position: f32,
    color: Color,
    texture: Option<Texture>,
    user_interaction_enabled: bool,
}

impl Default for SpriteNode {
    fn default() -> Self {
        Self::new(None, Color::WHITE, Size::ZERO)
    }
}

impl SpriteNode {
    /// Create a node at the scene origin.
    pub fn new(texture: Option<Texture>, color: Color, size: Size) -> Self {
        Self {
            position: Point::ZERO,
            size,
            x_scale: 1.0,
            y_scale: 1.0,
            rotation: 0.0,
            z_position: 0.0,
            color,
            texture,
            user_interaction_enabled: false,
        }
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Position of the node's center in scene space.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Move the node's center.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Unscaled size of the node.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Set the unscaled size of the node.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Horizontal and vertical scale factors.
    pub fn scale(&self) -> (f32, f32) {
        (self.x_scale, self.y_scale)
    }

    /// Set horizontal and vertical scale factors.
    pub fn set_scale(&mut self, x_scale: f32, y_scale: f32) {
        self.x_scale = x_scale;
        self.y_scale = y_scale;
    }

    /// Rotation in radians, counter-clockwise.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Set the rotation in radians.
    pub fn set_rotation(&mut self, radians: f32) {
        self.rotation = radians;
    }

    /// Stacking order; larger values are nearer the viewer.
    pub fn z_position(&self) -> f32 {
        self.z_position
    }

    /// Set the stacking order.
    pub fn set_z_position(&mut self, z: f32) {
        self.z_position = z;
    }

    /// Transform from node-local space to scene space.
    pub fn local_transform(&self) -> Transform2D {
        Transform2D::translate(self.position.x, self.position.y)
            .then(&Transform2D::rotate(self.rotation))
            .then(&Transform2D::scale_xy(self.x_scale, self.y_scale))
    }

    /// Project a scene-space point into this node's local space.
    ///
    /// A node scaled to zero has no inverse transform; every point then maps
    /// to [`Point::INFINITY`], which no bounds contain.
    pub fn location_in_local_space(&self, scene_point: Point) -> Point {
        self.local_transform()
            .inverse()
            .map(|inverse| inverse.transform_point(scene_point))
            .unwrap_or(Point::INFINITY)
    }

    /// Check a local-space point against the node's centered bounds.
    ///
    /// The point is inside only when `|x| < width/2` and `|y| < height/2`.
    pub fn contains_local(&self, local: Point) -> bool {
        self.local_bounds().contains(local)
    }

    /// The node's bounds in local space, centered on the origin.
    pub fn local_bounds(&self) -> Rect {
        Rect::from_center(Point::ZERO, self.size)
    }

    /// Check a scene-space point against the node's bounds.
    pub fn contains_point(&self, scene_point: Point) -> bool {
        self.contains_local(self.location_in_local_space(scene_point))
    }

    // =========================================================================
    // Paint
    // =========================================================================

    /// The currently displayed tint color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Replace the displayed tint color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// The currently displayed texture, if any.
    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    /// Replace the displayed texture.
    pub fn set_texture(&mut self, texture: Option<Texture>) {
        self.texture = texture;
    }

    // =========================================================================
    // Input gating
    // =========================================================================

    /// Whether the host should deliver pointer input to this node.
    pub fn is_user_interaction_enabled(&self) -> bool {
        self.user_interaction_enabled
    }

    /// Enable or disable pointer delivery at the host level.
    pub fn set_user_interaction_enabled(&mut self, enabled: bool) {
        self.user_interaction_enabled = enabled;
    }
}

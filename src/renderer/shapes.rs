//! Shape generation for 2D primitives
//!
//! All coordinates are field units (origin top-left, y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};

/// Axis-aligned rectangle with a vertical color gradient
pub fn gradient_rect(min: Vec2, size: Vec2, top: [f32; 4], bottom: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    vec![
        Vertex::new(min.x, min.y, top),
        Vertex::new(max.x, min.y, top),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(max.x, min.y, top),
        Vertex::new(max.x, max.y, bottom),
    ]
}

/// Solid axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    gradient_rect(min, size, color, color)
}

/// Quad from four corners in order (top-left, top-right, bottom-right, bottom-left)
pub fn quad(corners: [Vec2; 4], color: [f32; 4]) -> Vec<Vertex> {
    let [a, b, c, d] = corners;
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
        Vertex::new(d.x, d.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Basket: tapered body with a darker rim and weave bands, filling the sprite box
pub fn basket(pos: Vec2, size: Vec2) -> Vec<Vertex> {
    let rim_h = size.y * 0.18;
    let taper = size.x * 0.12;
    let body_top = pos.y + rim_h;
    let bottom = pos.y + size.y;

    let mut vertices = quad(
        [
            Vec2::new(pos.x, body_top),
            Vec2::new(pos.x + size.x, body_top),
            Vec2::new(pos.x + size.x - taper, bottom),
            Vec2::new(pos.x + taper, bottom),
        ],
        colors::BASKET,
    );

    // Weave bands
    let band_h = size.y * 0.06;
    for i in 1..4 {
        let t = i as f32 / 4.0;
        let y = body_top + (bottom - body_top) * t;
        let inset = taper * t;
        vertices.extend(rect(
            Vec2::new(pos.x + inset, y - band_h * 0.5),
            Vec2::new(size.x - inset * 2.0, band_h),
            colors::BASKET_RIM,
        ));
    }

    vertices.extend(rect(pos, Vec2::new(size.x, rim_h), colors::BASKET_RIM));
    vertices
}

/// Apple: round body, stem and leaf, filling the sprite box
pub fn apple(pos: Vec2, size: Vec2) -> Vec<Vertex> {
    let radius = size.x.min(size.y * 0.85) * 0.5;
    let center = Vec2::new(pos.x + size.x * 0.5, pos.y + size.y - radius);

    let mut vertices = circle(center, radius, colors::APPLE, 20);

    let stem_w = size.x * 0.08;
    let stem_top = pos.y;
    vertices.extend(rect(
        Vec2::new(center.x - stem_w * 0.5, stem_top),
        Vec2::new(stem_w, center.y - radius - stem_top + 2.0),
        colors::APPLE_STEM,
    ));
    vertices.extend(circle(
        Vec2::new(center.x + size.x * 0.14, stem_top + size.y * 0.15),
        size.x * 0.12,
        colors::LEAF,
        8,
    ));
    vertices
}

/// Particle as a small coin that fades with age.
///
/// `scale` is relative to a 200-unit source sprite.
pub fn coin(pos: Vec2, scale: f32, life: f32) -> Vec<Vertex> {
    let radius = (200.0 * scale * 0.5).max(1.0);
    let [r, g, b, _] = colors::COIN;
    circle(pos, radius, [r, g, b, life.clamp(0.0, 1.0)], 8)
}

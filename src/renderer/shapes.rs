//! Shape tessellation for 2D primitives
//!
//! Every helper appends triangles for one primitive into the frame's vertex
//! buffer. Coordinates are field pixels, y down; the pipeline maps to NDC.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Axis-aligned filled rectangle
pub fn push_rect(out: &mut Vec<Vertex>, x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) {
    push_quad(
        out,
        [
            Vec2::new(x, y),
            Vec2::new(x + width, y),
            Vec2::new(x + width, y + height),
            Vec2::new(x, y + height),
        ],
        color,
    );
}

/// Arbitrary convex quad, corners in winding order
pub fn push_quad(out: &mut Vec<Vertex>, corners: [Vec2; 4], color: [f32; 4]) {
    let [a, b, c, d] = corners;
    push_triangle(out, a, b, c, color);
    push_triangle(out, a, c, d, color);
}

pub fn push_triangle(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));
}

/// Filled circle as a triangle fan
pub fn push_circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    push_ellipse(out, center, radius, radius, color, segments);
}

/// Filled axis-aligned ellipse as a triangle fan
pub fn push_ellipse(
    out: &mut Vec<Vertex>,
    center: Vec2,
    rx: f32,
    ry: f32,
    color: [f32; 4],
    segments: u32,
) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        push_triangle(
            out,
            center,
            Vec2::new(center.x + rx * theta1.cos(), center.y + ry * theta1.sin()),
            Vec2::new(center.x + rx * theta2.cos(), center.y + ry * theta2.sin()),
            color,
        );
    }
}

/// Thick line segment as a single quad
pub fn push_line(out: &mut Vec<Vertex>, from: Vec2, to: Vec2, width: f32, color: [f32; 4]) {
    let dir = (to - from).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    push_quad(
        out,
        [from + perp, to + perp, to - perp, from - perp],
        color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_makes_two_triangles() {
        let mut out = Vec::new();
        push_rect(&mut out, 0.0, 0.0, 10.0, 20.0, [1.0; 4]);
        assert_eq!(out.len(), 6);
        // Corners stay inside the rectangle bounds
        for v in &out {
            assert!((0.0..=10.0).contains(&v.position[0]));
            assert!((0.0..=20.0).contains(&v.position[1]));
        }
    }

    #[test]
    fn test_circle_vertex_count() {
        let mut out = Vec::new();
        push_circle(&mut out, Vec2::new(5.0, 5.0), 2.0, [1.0; 4], 16);
        assert_eq!(out.len(), 16 * 3);
    }

    #[test]
    fn test_line_is_one_quad() {
        let mut out = Vec::new();
        push_line(&mut out, Vec2::ZERO, Vec2::new(10.0, 0.0), 4.0, [1.0; 4]);
        assert_eq!(out.len(), 6);
        // A horizontal line of width 4 spans y in [-2, 2]
        for v in &out {
            assert!((-2.0..=2.0).contains(&v.position[1]));
        }
    }
}

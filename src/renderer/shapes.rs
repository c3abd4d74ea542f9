//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in canvas units.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

use super::vertex::{Vertex, colors};

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse(center, radius, radius, color, segments)
}

/// Generate vertices for a filled axis-aligned ellipse
pub fn ellipse(center: Vec2, rx: f32, ry: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + rx * theta1.cos(),
            center.y + ry * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + rx * theta2.cos(),
            center.y + ry * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Fill a polygon that is star-shaped around `center`
pub fn fan(center: Vec2, points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(points.len() * 3);

    for (i, p1) in points.iter().enumerate() {
        let p2 = points[(i + 1) % points.len()];
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Stroke a closed polyline with quads `width` wide, centered on the edges
pub fn outline(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(points.len() * 6);
    let half = width / 2.0;

    for (i, &p1) in points.iter().enumerate() {
        let p2 = points[(i + 1) % points.len()];

        let dir = (p2 - p1).normalize_or_zero();
        let perp = Vec2::new(-dir.y, dir.x) * half;

        let a = p1 + perp;
        let b = p1 - perp;
        let c = p2 + perp;
        let d = p2 - perp;

        // Two triangles per edge
        vertices.push(Vertex::new(a.x, a.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
        vertices.push(Vertex::new(c.x, c.y, color));

        vertices.push(Vertex::new(c.x, c.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
        vertices.push(Vertex::new(d.x, d.y, color));
    }

    vertices
}

/// Rotate `offset` by `angle` and move it to `center`
#[inline]
fn place(center: Vec2, offset: Vec2, angle: f32) -> Vec2 {
    center + Vec2::from_angle(angle).rotate(offset)
}

/// Arrow hull around `center`: nose up, notched tail
pub fn ship_hull(center: Vec2, width: f32, height: f32) -> [Vec2; 5] {
    let (w, h) = (width, height);
    [
        center + Vec2::new(0.0, -h / 2.0),
        center + Vec2::new(-w / 2.0, h / 2.0),
        center + Vec2::new(-w / 4.0, h / 3.0),
        center + Vec2::new(w / 4.0, h / 3.0),
        center + Vec2::new(w / 2.0, h / 2.0),
    ]
}

/// Player ship: hull, white outline, and engine glow under the tail
pub fn ship(center: Vec2, width: f32, height: f32) -> Vec<Vertex> {
    let [nose, bottom_left, inner_left, inner_right, bottom_right] =
        ship_hull(center, width, height);

    // The tail notch makes the hull concave, so it is split into three
    // triangles sharing the nose
    let mut vertices = Vec::with_capacity(9 + 30 + 16 * 3);
    for [a, b] in [
        [bottom_left, inner_left],
        [inner_left, inner_right],
        [inner_right, bottom_right],
    ] {
        vertices.push(Vertex::new(nose.x, nose.y, colors::PLAYER));
        vertices.push(Vertex::new(a.x, a.y, colors::PLAYER));
        vertices.push(Vertex::new(b.x, b.y, colors::PLAYER));
    }

    vertices.extend(outline(
        &[nose, bottom_left, inner_left, inner_right, bottom_right],
        2.0,
        colors::PLAYER_OUTLINE,
    ));

    vertices.extend(ellipse(
        center + Vec2::new(0.0, height / 2.0 + 3.0),
        width / 6.0,
        4.0,
        colors::ENGINE_GLOW,
        16,
    ));

    vertices
}

/// Irregular octagon outline for a meteor of edge `size`
pub fn meteor_points(center: Vec2, size: f32, rotation: f32) -> [Vec2; 8] {
    std::array::from_fn(|i| {
        let angle = i as f32 / 8.0 * TAU;
        let radius = size / 2.0 * (0.8 + (angle * 3.0).sin() * 0.2);
        place(center, Vec2::from_angle(angle) * radius, rotation)
    })
}

/// Rocky meteor: filled octagon, dark rim, and one crater
pub fn meteor(center: Vec2, size: f32, rotation: f32, hue: f32) -> Vec<Vertex> {
    let points = meteor_points(center, size, rotation);
    let [r, g, b] = hsl_to_rgb(hue, 0.7, 0.5);

    let mut vertices = fan(center, &points, [r, g, b, 1.0]);
    vertices.extend(outline(&points, 1.0, colors::METEOR_OUTLINE));

    let crater = place(center, Vec2::splat(-size / 6.0), rotation);
    let crater_shape = ellipse(Vec2::ZERO, size / 8.0, size / 12.0, colors::METEOR_CRATER, 12);
    vertices.extend(crater_shape.into_iter().map(|v| {
        let p = place(crater, Vec2::from(v.position), rotation);
        Vertex::new(p.x, p.y, v.color)
    }));

    vertices
}

/// Alternating outer/inner points of a five-pointed star, first point up
pub fn star_points(center: Vec2, size: f32, rotation: f32) -> [Vec2; 10] {
    let outer = size / 2.0;
    let inner = outer * 0.4;
    std::array::from_fn(|i| {
        let angle = (i / 2) as f32 / 5.0 * TAU - PI / 2.0;
        let (angle, radius) = if i % 2 == 0 {
            (angle, outer)
        } else {
            (angle + PI / 5.0, inner)
        };
        place(center, Vec2::from_angle(angle) * radius, rotation)
    })
}

/// Collectible star: yellow fill, white rim, and a center sparkle
pub fn star(center: Vec2, size: f32, rotation: f32) -> Vec<Vertex> {
    let points = star_points(center, size, rotation);

    let mut vertices = fan(center, &points, colors::STAR);
    vertices.extend(outline(&points, 1.0, colors::STAR_OUTLINE));
    vertices.extend(circle(center, size / 6.0, colors::STAR_SPARKLE, 10));

    vertices
}

/// HSL (hue in degrees, saturation/lightness in 0..1) to sRGB
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = lightness - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r + m, g + m, b + m]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_hsl_to_rgb() {
        let [r, g, b] = hsl_to_rgb(0.0, 1.0, 0.5);
        assert!(close(r, 1.0) && close(g, 0.0) && close(b, 0.0));

        // hsl(30, 70%, 50%) = rgb(217, 128, 38)
        let [r, g, b] = hsl_to_rgb(30.0, 0.7, 0.5);
        assert!(close(r, 0.85) && close(g, 0.5) && close(b, 0.15));

        let [r, g, b] = hsl_to_rgb(240.0, 0.0, 0.25);
        assert!(close(r, 0.25) && close(g, 0.25) && close(b, 0.25));
    }

    #[test]
    fn test_meteor_points_are_irregular() {
        let points = meteor_points(Vec2::ZERO, 20.0, 0.0);
        let radii: Vec<f32> = points.iter().map(|p| p.length()).collect();
        // First vertex sits at angle 0: radius = 10 * 0.8
        assert!(close(radii[0], 8.0));
        assert!(radii.iter().all(|&r| (6.0..=10.0).contains(&r)));
        assert!(radii.iter().any(|&r| !close(r, 8.0)));
    }

    #[test]
    fn test_star_points_alternate() {
        let points = star_points(Vec2::new(50.0, 50.0), 12.0, 0.0);
        // First point is straight up (y down in canvas units)
        assert!(close(points[0].x, 50.0) && close(points[0].y, 44.0));
        for (i, p) in points.iter().enumerate() {
            let r = p.distance(Vec2::new(50.0, 50.0));
            let expected = if i % 2 == 0 { 6.0 } else { 2.4 };
            assert!(close(r, expected), "point {} radius {}", i, r);
        }
    }

    #[test]
    fn test_rotation_moves_points() {
        let rest = star_points(Vec2::ZERO, 12.0, 0.0);
        let turned = star_points(Vec2::ZERO, 12.0, PI / 2.0);
        assert!(close(turned[0].x, -rest[0].y) && close(turned[0].y, rest[0].x));
    }

    #[test]
    fn test_ship_hull_fits_player_box() {
        let center = Vec2::new(200.0, 570.0);
        let hull = ship_hull(center, 30.0, 20.0);
        for p in hull {
            assert!((185.0..=215.0).contains(&p.x));
            assert!((560.0..=580.0).contains(&p.y));
        }
        let vertices = ship(center, 30.0, 20.0);
        assert_eq!(vertices.len() % 3, 0);
        assert_eq!(vertices[0].color, colors::PLAYER);
    }

    #[test]
    fn test_outline_two_triangles_per_edge() {
        let square = [
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        assert_eq!(outline(&square, 1.0, colors::STAR_OUTLINE).len(), 24);
        assert_eq!(fan(Vec2::splat(5.0), &square, colors::STAR).len(), 12);
    }
}

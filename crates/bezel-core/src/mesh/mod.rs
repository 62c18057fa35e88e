mod filled;
mod simple;
mod tiled;

pub use self::filled::{build_filled, Corner, Edge, FillMethod, FillSettings};
pub use self::simple::build_simple;
pub use self::tiled::build_tiled;

use crate::math::{Rect, Vec2, Vec4};

/// A single mesh vertex: local position, UV and vertex color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: Vec2,
    pub tex: Vec2,
    pub color: Vec4,
}

/// Parameters of one axis-aligned textured quad.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quad {
    pub min: Vec2,
    pub max: Vec2,
    pub tex_min: Vec2,
    pub tex_max: Vec2,
    pub color: Vec4,
}

/// Reusable vertex/index buffer the mesh builders append into.
///
/// Rebuilt from scratch on every geometry rebuild; [`Mesh::clear`] keeps the
/// allocations around between rebuilds.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Mesh {
        Mesh::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn add_vertex(&mut self, pos: Vec2, tex: Vec2, color: Vec4) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(Vertex { pos, tex, color });
        index
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Appends one quad: 4 vertices ordered (min), (min.x, max.y), (max),
    /// (max.x, min.y) and two triangles (n, n+1, n+2), (n+2, n+3, n), where
    /// n is the vertex count before the call.
    pub fn add_quad(&mut self, quad: Quad) {
        let a = self.add_vertex(
            Vec2::new(quad.min.x, quad.min.y),
            Vec2::new(quad.tex_min.x, quad.tex_min.y),
            quad.color,
        );
        let b = self.add_vertex(
            Vec2::new(quad.min.x, quad.max.y),
            Vec2::new(quad.tex_min.x, quad.tex_max.y),
            quad.color,
        );
        let c = self.add_vertex(
            Vec2::new(quad.max.x, quad.max.y),
            Vec2::new(quad.tex_max.x, quad.tex_max.y),
            quad.color,
        );
        let d = self.add_vertex(
            Vec2::new(quad.max.x, quad.min.y),
            Vec2::new(quad.tex_max.x, quad.tex_min.y),
            quad.color,
        );
        self.indices.extend_from_slice(&[a, b, c, c, d, a]);
    }

    /// Smallest rectangle containing every vertex, or `None` for an empty
    /// mesh.
    pub fn bounding_rect(&self) -> Option<Rect> {
        let mut vertices = self.vertices.iter();
        let first = vertices.next()?.pos;

        let (min, max) = vertices.fold((first, first), |(min, max), vertex| {
            (min.min(vertex.pos), max.max(vertex.pos))
        });

        Some(Rect::new(min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(min: Vec2, max: Vec2) -> Quad {
        Quad {
            min,
            max,
            tex_min: Vec2::ZERO,
            tex_max: Vec2::ONE,
            color: Vec4::ONE,
        }
    }

    #[test]
    fn add_quad_orders_vertices_clockwise_from_min() {
        let mut mesh = Mesh::new();
        mesh.add_quad(quad(Vec2::new(1.0, 2.0), Vec2::new(5.0, 8.0)));

        let positions: Vec<Vec2> = mesh.vertices.iter().map(|v| v.pos).collect();
        assert_eq!(
            positions,
            [
                Vec2::new(1.0, 2.0),
                Vec2::new(1.0, 8.0),
                Vec2::new(5.0, 8.0),
                Vec2::new(5.0, 2.0),
            ]
        );
        assert_eq!(mesh.indices, [0, 1, 2, 2, 3, 0]);
    }

    #[test]
    fn uv_corners_follow_position_corners() {
        let mut mesh = Mesh::new();
        mesh.add_quad(Quad {
            min: Vec2::ZERO,
            max: Vec2::ONE,
            tex_min: Vec2::new(0.25, 0.5),
            tex_max: Vec2::new(0.75, 1.0),
            color: Vec4::ONE,
        });

        let uvs: Vec<Vec2> = mesh.vertices.iter().map(|v| v.tex).collect();
        assert_eq!(
            uvs,
            [
                Vec2::new(0.25, 0.5),
                Vec2::new(0.25, 1.0),
                Vec2::new(0.75, 1.0),
                Vec2::new(0.75, 0.5),
            ]
        );
    }

    #[test]
    fn successive_quads_offset_their_indices() {
        let mut mesh = Mesh::new();
        mesh.add_quad(quad(Vec2::ZERO, Vec2::ONE));
        mesh.add_quad(quad(Vec2::ONE, Vec2::splat(2.0)));

        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(&mesh.indices[6..], [4, 5, 6, 6, 7, 4]);
        assert_eq!(mesh.triangle_count(), 4);
    }

    #[test]
    fn clear_empties_the_buffers() {
        let mut mesh = Mesh::new();
        mesh.add_quad(quad(Vec2::ZERO, Vec2::ONE));
        mesh.clear();

        assert!(mesh.is_empty());
        assert_eq!(mesh.vertices.len(), 0);
        assert_eq!(mesh.bounding_rect(), None);
    }

    #[test]
    fn bounding_rect_spans_all_quads() {
        let mut mesh = Mesh::new();
        mesh.add_quad(quad(Vec2::new(-3.0, 0.0), Vec2::new(1.0, 1.0)));
        mesh.add_quad(quad(Vec2::ZERO, Vec2::new(10.0, 4.0)));

        assert_eq!(
            mesh.bounding_rect(),
            Some(Rect::new(Vec2::new(-3.0, 0.0), Vec2::new(10.0, 4.0)))
        );
    }
}

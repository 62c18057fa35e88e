use crate::color::Color;
use crate::math::Rect;
use crate::mesh::{Mesh, Quad};
use crate::sprite::SpriteData;

/// Emits the simple/sliced geometry: one quad over the whole rectangle,
/// inflated on every side by half the falloff distance so the border
/// shader's anti-aliased edge is not clipped by the mesh bounds.
///
/// UVs cover the sprite's outer rectangle, or stay zero without a sprite.
/// Always appends exactly 4 vertices and 2 triangles.
pub fn build_simple(
    mesh: &mut Mesh,
    rect: Rect,
    sprite: Option<&SpriteData>,
    falloff: f32,
    color: Color,
) {
    let uv = sprite.map(|sprite| sprite.outer_uv).unwrap_or(Rect::ZERO);
    let inflated = rect.inflate(falloff.max(0.0) * 0.5);

    mesh.add_quad(Quad {
        min: inflated.min,
        max: inflated.max,
        tex_min: uv.min,
        tex_max: uv.max,
        color: color.into(),
    });
}

use log::trace;

use crate::color::Color;
use crate::math::{Rect, Vec2, Vec4};
use crate::mesh::{Mesh, Quad};
use crate::sprite::{SpriteBorder, SpriteData};

/// Tile sizes with a smaller magnitude collapse to one tile spanning the
/// whole center region, so tiny sprites cannot explode the quad count.
const MIN_TILE_SIZE: f32 = 0.1;

/// Emits the classic 9-slice tiled geometry for `rect`.
///
/// The center region repeats tiles sized from the sprite's texel size minus
/// its borders, converted through pixels-per-unit. The four border strips
/// tile along their long axis, and the four corners are single quads mixing
/// the sprite's outer and inner UV corners. Tiles clipped by a region
/// boundary get a proportionally clipped UV rectangle.
///
/// The center is skipped when `fill_center` is false; strips and corners are
/// skipped when the sprite declares no border. Unlike the simple path, tiled
/// geometry is not inflated by the falloff distance.
pub fn build_tiled(
    mesh: &mut Mesh,
    rect: Rect,
    sprite: Option<&SpriteData>,
    fill_center: bool,
    color: Color,
) {
    // Without a sprite, draw with the engine-default metrics: a borderless
    // 100×100 texel sprite with zero UVs at one texel per unit.
    let (outer, inner, sprite_border, sprite_size, ppu) = match sprite {
        Some(sprite) => (
            sprite.outer_uv,
            sprite.inner_uv,
            sprite.border,
            sprite.size,
            sprite.pixels_per_unit.max(f32::EPSILON),
        ),
        None => (
            Rect::ZERO,
            Rect::ZERO,
            SpriteBorder::ZERO,
            Vec2::splat(100.0),
            1.0,
        ),
    };

    let has_border = sprite.is_some_and(SpriteData::has_border);

    // A border sum can exceed the texel size; the tile size must not go
    // negative or the tiling loops below would never advance.
    let mut tile_w = ((sprite_size.x - sprite_border.horizontal()) / ppu).max(0.0);
    let mut tile_h = ((sprite_size.y - sprite_border.vertical()) / ppu).max(0.0);

    let size = rect.size();
    let border = adjusted_borders(sprite_border.scaled(1.0 / ppu), size);

    let x1 = border.left;
    let x2 = size.x - border.right;
    let y1 = border.bottom;
    let y2 = size.y - border.top;

    if tile_w.abs() < MIN_TILE_SIZE {
        trace!("tile width {tile_w} is degenerate, tiling the center in one step");
        tile_w = x2 - x1;
    }

    if tile_h.abs() < MIN_TILE_SIZE {
        trace!("tile height {tile_h} is degenerate, tiling the center in one step");
        tile_h = y2 - y1;
    }

    let color = Vec4::from(color);
    let uv_min = inner.min;
    let uv_max = inner.max;

    if fill_center {
        let mut y3 = y1;
        while y3 < y2 {
            let mut y4 = y3 + tile_h;
            let mut row_uv_max_y = uv_max.y;
            if y4 > y2 {
                row_uv_max_y = partial_uv(uv_min.y, uv_max.y, y2 - y3, tile_h);
                y4 = y2;
            }

            let mut x3 = x1;
            while x3 < x2 {
                let mut x4 = x3 + tile_w;
                let mut tile_uv_max_x = uv_max.x;
                if x4 > x2 {
                    tile_uv_max_x = partial_uv(uv_min.x, uv_max.x, x2 - x3, tile_w);
                    x4 = x2;
                }

                mesh.add_quad(Quad {
                    min: rect.min + Vec2::new(x3, y3),
                    max: rect.min + Vec2::new(x4, y4),
                    tex_min: uv_min,
                    tex_max: Vec2::new(tile_uv_max_x, row_uv_max_y),
                    color,
                });

                x3 += tile_w;
            }

            y3 += tile_h;
        }
    }

    if !has_border {
        return;
    }

    // left and right strips, tiled vertically
    let mut y3 = y1;
    while y3 < y2 {
        let mut y4 = y3 + tile_h;
        let mut tile_uv_max_y = uv_max.y;
        if y4 > y2 {
            tile_uv_max_y = partial_uv(uv_min.y, uv_max.y, y2 - y3, tile_h);
            y4 = y2;
        }

        mesh.add_quad(Quad {
            min: rect.min + Vec2::new(0.0, y3),
            max: rect.min + Vec2::new(x1, y4),
            tex_min: Vec2::new(outer.min.x, uv_min.y),
            tex_max: Vec2::new(uv_min.x, tile_uv_max_y),
            color,
        });
        mesh.add_quad(Quad {
            min: rect.min + Vec2::new(x2, y3),
            max: rect.min + Vec2::new(size.x, y4),
            tex_min: Vec2::new(uv_max.x, uv_min.y),
            tex_max: Vec2::new(outer.max.x, tile_uv_max_y),
            color,
        });

        y3 += tile_h;
    }

    // bottom and top strips, tiled horizontally
    let mut x3 = x1;
    while x3 < x2 {
        let mut x4 = x3 + tile_w;
        let mut tile_uv_max_x = uv_max.x;
        if x4 > x2 {
            tile_uv_max_x = partial_uv(uv_min.x, uv_max.x, x2 - x3, tile_w);
            x4 = x2;
        }

        mesh.add_quad(Quad {
            min: rect.min + Vec2::new(x3, 0.0),
            max: rect.min + Vec2::new(x4, y1),
            tex_min: Vec2::new(uv_min.x, outer.min.y),
            tex_max: Vec2::new(tile_uv_max_x, uv_min.y),
            color,
        });
        mesh.add_quad(Quad {
            min: rect.min + Vec2::new(x3, y2),
            max: rect.min + Vec2::new(x4, size.y),
            tex_min: Vec2::new(uv_min.x, uv_max.y),
            tex_max: Vec2::new(tile_uv_max_x, outer.max.y),
            color,
        });

        x3 += tile_w;
    }

    // corners: bottom-left, bottom-right, top-left, top-right
    mesh.add_quad(Quad {
        min: rect.min,
        max: rect.min + Vec2::new(x1, y1),
        tex_min: outer.min,
        tex_max: uv_min,
        color,
    });
    mesh.add_quad(Quad {
        min: rect.min + Vec2::new(x2, 0.0),
        max: rect.min + Vec2::new(size.x, y1),
        tex_min: Vec2::new(uv_max.x, outer.min.y),
        tex_max: Vec2::new(outer.max.x, uv_min.y),
        color,
    });
    mesh.add_quad(Quad {
        min: rect.min + Vec2::new(0.0, y2),
        max: rect.min + Vec2::new(x1, size.y),
        tex_min: Vec2::new(outer.min.x, uv_max.y),
        tex_max: Vec2::new(uv_min.x, outer.max.y),
        color,
    });
    mesh.add_quad(Quad {
        min: rect.min + Vec2::new(x2, y2),
        max: rect.min + size,
        tex_min: uv_max,
        tex_max: outer.max,
        color,
    });
}

/// Shrinks opposing border pairs proportionally so they never exceed the
/// rectangle dimension they share. Pairs summing to ≈0 are left alone.
fn adjusted_borders(mut border: SpriteBorder, size: Vec2) -> SpriteBorder {
    let horizontal = border.horizontal();
    if size.x < horizontal && horizontal > MIN_TILE_SIZE {
        let scale = size.x / horizontal;
        border.left *= scale;
        border.right *= scale;
    }

    let vertical = border.vertical();
    if size.y < vertical && vertical > MIN_TILE_SIZE {
        let scale = size.y / vertical;
        border.bottom *= scale;
        border.top *= scale;
    }

    border
}

/// UV extent of a tile clipped to `visible` out of its full `span`.
///
/// A non-positive span cannot be interpolated against and yields the full
/// extent.
fn partial_uv(uv_min: f32, uv_max: f32, visible: f32, span: f32) -> f32 {
    if span <= 0.0 {
        return uv_max;
    }

    uv_min + (uv_max - uv_min) * visible / span
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const RECT_100X50: Rect = Rect::new(Vec2::ZERO, Vec2::new(100.0, 50.0));

    /// Borderless sprite whose center tile is `size` local units at one
    /// texel per unit.
    fn tile_sprite(size: Vec2) -> SpriteData {
        SpriteData {
            size,
            border: SpriteBorder::ZERO,
            pixels_per_unit: 1.0,
            outer_uv: Rect::new(Vec2::ZERO, Vec2::ONE),
            inner_uv: Rect::new(Vec2::ZERO, Vec2::ONE),
        }
    }

    /// 30×30 texel sprite with a 10 texel border on every side.
    fn framed_sprite() -> SpriteData {
        SpriteData::from_texture_rect(
            Vec2::splat(30.0),
            Rect::new(Vec2::ZERO, Vec2::splat(30.0)),
            SpriteBorder::new(10.0, 10.0, 10.0, 10.0),
            1.0,
        )
    }

    fn quad_rect(mesh: &Mesh, i: usize) -> Rect {
        Rect::new(mesh.vertices[i * 4].pos, mesh.vertices[i * 4 + 2].pos)
    }

    fn quad_uv(mesh: &Mesh, i: usize) -> Rect {
        Rect::new(mesh.vertices[i * 4].tex, mesh.vertices[i * 4 + 2].tex)
    }

    // ── center tiling ─────────────────────────────────────────────────────

    #[test]
    fn center_grid_with_partial_last_column() {
        let mut mesh = Mesh::new();
        let sprite = tile_sprite(Vec2::new(40.0, 25.0));
        build_tiled(&mut mesh, RECT_100X50, Some(&sprite), true, Color::WHITE);

        // 3 columns (40, 40, 20) × 2 full rows
        assert_eq!(mesh.vertices.len() / 4, 6);

        assert_eq!(quad_rect(&mesh, 0), Rect::new(Vec2::ZERO, Vec2::new(40.0, 25.0)));
        assert_eq!(
            quad_rect(&mesh, 2),
            Rect::new(Vec2::new(80.0, 0.0), Vec2::new(100.0, 25.0))
        );
        assert_eq!(
            quad_rect(&mesh, 5),
            Rect::new(Vec2::new(80.0, 25.0), Vec2::new(100.0, 50.0))
        );

        // the clipped column shows half a tile, so its UV spans half
        assert_relative_eq!(quad_uv(&mesh, 2).max.x, 0.5);
        assert_relative_eq!(quad_uv(&mesh, 2).max.y, 1.0);
        assert_relative_eq!(quad_uv(&mesh, 1).max.x, 1.0);
    }

    #[test]
    fn partial_row_clips_uv_proportionally() {
        let mut mesh = Mesh::new();
        let sprite = tile_sprite(Vec2::new(40.0, 25.0));
        let rect = Rect::new(Vec2::ZERO, Vec2::new(100.0, 60.0));
        build_tiled(&mut mesh, rect, Some(&sprite), true, Color::WHITE);

        // rows at 0, 25, 50 where the last shows 10 of 25 units
        assert_eq!(mesh.vertices.len() / 4, 9);
        let last_row = quad_uv(&mesh, 8);
        assert_relative_eq!(last_row.max.y, 0.4);
    }

    #[test]
    fn no_center_and_no_border_is_empty() {
        let mut mesh = Mesh::new();
        let sprite = tile_sprite(Vec2::new(40.0, 25.0));
        build_tiled(&mut mesh, RECT_100X50, Some(&sprite), false, Color::WHITE);
        assert!(mesh.is_empty());

        build_tiled(&mut mesh, RECT_100X50, None, false, Color::WHITE);
        assert!(mesh.is_empty());
    }

    #[test]
    fn without_sprite_uses_engine_default_tiles() {
        let mut mesh = Mesh::new();
        let rect = Rect::new(Vec2::ZERO, Vec2::new(250.0, 100.0));
        build_tiled(&mut mesh, rect, None, true, Color::WHITE);

        // 100 unit tiles: columns (100, 100, 50) × 1 row, zero UVs
        assert_eq!(mesh.vertices.len() / 4, 3);
        assert_eq!(
            quad_rect(&mesh, 2),
            Rect::new(Vec2::new(200.0, 0.0), Vec2::new(250.0, 100.0))
        );
        for vertex in &mesh.vertices {
            assert_eq!(vertex.tex, Vec2::ZERO);
        }
    }

    // ── border frame ──────────────────────────────────────────────────────

    #[test]
    fn border_strips_and_corners_form_the_frame() {
        let mut mesh = Mesh::new();
        let rect = Rect::new(Vec2::ZERO, Vec2::splat(90.0));
        build_tiled(&mut mesh, rect, Some(&framed_sprite()), false, Color::WHITE);

        // center span 10..80 tiles in 10 unit steps: 7 iterations for the
        // vertical strip pair, 7 for the horizontal pair, plus 4 corners
        assert_eq!(mesh.vertices.len() / 4, 7 * 2 + 7 * 2 + 4);

        let corners_start = mesh.vertices.len() / 4 - 4;
        assert_eq!(
            quad_rect(&mesh, corners_start),
            Rect::new(Vec2::ZERO, Vec2::splat(10.0))
        );
        assert_eq!(
            quad_rect(&mesh, corners_start + 3),
            Rect::new(Vec2::splat(80.0), Vec2::splat(90.0))
        );

        let third = 10.0 / 30.0;
        let bottom_left_uv = quad_uv(&mesh, corners_start);
        assert_relative_eq!(bottom_left_uv.max.x, third);
        assert_relative_eq!(bottom_left_uv.max.y, third);

        let top_right_uv = quad_uv(&mesh, corners_start + 3);
        assert_relative_eq!(top_right_uv.min.x, 2.0 * third);
        assert_relative_eq!(top_right_uv.max.y, 1.0);
    }

    #[test]
    fn strip_tiles_clip_uv_like_center_tiles() {
        let mut mesh = Mesh::new();
        // center span 10..75 = 6 full steps and a 5 unit remainder
        let rect = Rect::new(Vec2::ZERO, Vec2::new(85.0, 85.0));
        build_tiled(&mut mesh, rect, Some(&framed_sprite()), false, Color::WHITE);

        // vertical strips: 7 iterations × 2 quads, the last pair clipped to
        // half a tile, landing halfway between the inner UV bounds
        let last_left = quad_uv(&mesh, 12);
        assert_relative_eq!(last_left.max.y, 0.5, epsilon = 1e-6);

        let last_left_rect = quad_rect(&mesh, 12);
        assert_eq!(last_left_rect.max.y, 75.0);
    }

    #[test]
    fn oversized_borders_shrink_to_the_rect() {
        let mut mesh = Mesh::new();
        let sprite = SpriteData::from_texture_rect(
            Vec2::splat(60.0),
            Rect::new(Vec2::ZERO, Vec2::splat(60.0)),
            SpriteBorder::new(30.0, 30.0, 30.0, 30.0),
            1.0,
        );
        let rect = Rect::new(Vec2::ZERO, Vec2::splat(40.0));
        build_tiled(&mut mesh, rect, Some(&sprite), true, Color::WHITE);

        // borders scale from 30 to 20 per side, leaving no center or strip
        // span: only the 4 corners remain
        assert_eq!(mesh.vertices.len() / 4, 4);
        assert_eq!(quad_rect(&mesh, 0), Rect::new(Vec2::ZERO, Vec2::splat(20.0)));
        assert_eq!(
            quad_rect(&mesh, 3),
            Rect::new(Vec2::splat(20.0), Vec2::splat(40.0))
        );
    }

    // ── degenerate tiles ──────────────────────────────────────────────────

    #[test]
    fn degenerate_tile_size_fills_the_span_in_one_step() {
        let mut mesh = Mesh::new();
        // 2 texels of center at 128 texels per unit: 0.015625 local units
        let sprite = SpriteData::from_texture_rect(
            Vec2::splat(10.0),
            Rect::new(Vec2::ZERO, Vec2::splat(10.0)),
            SpriteBorder::new(4.0, 4.0, 4.0, 4.0),
            128.0,
        );
        let rect = Rect::new(Vec2::ZERO, Vec2::splat(64.0));
        build_tiled(&mut mesh, rect, Some(&sprite), true, Color::WHITE);

        // center must be a single quad, not thousands of slivers
        let center_quads = mesh.vertices.len() / 4 - 2 - 2 - 4;
        assert_eq!(center_quads, 1);

        let center = quad_rect(&mesh, 0);
        assert_relative_eq!(center.min.x, 0.03125);
        assert_relative_eq!(center.max.x, 63.96875);
    }

    #[test]
    fn borders_wider_than_the_texture_tile_in_one_step() {
        let mut mesh = Mesh::new();
        // 15 texels of horizontal and 12 of vertical border on a 10×10
        // sprite: the raw center tile size is negative on both axes
        let sprite = SpriteData::from_texture_rect(
            Vec2::splat(10.0),
            Rect::new(Vec2::ZERO, Vec2::splat(10.0)),
            SpriteBorder::new(8.0, 6.0, 7.0, 6.0),
            1.0,
        );
        let rect = Rect::new(Vec2::ZERO, Vec2::new(60.0, 40.0));
        build_tiled(&mut mesh, rect, Some(&sprite), true, Color::WHITE);

        // one-step center, one strip pair per axis, 4 corners
        assert_eq!(mesh.vertices.len() / 4, 9);
        assert_eq!(
            quad_rect(&mesh, 0),
            Rect::new(Vec2::new(8.0, 6.0), Vec2::new(53.0, 34.0))
        );
        assert_eq!(mesh.bounding_rect(), Some(rect));
    }

    // ── quad colors ───────────────────────────────────────────────────────

    #[test]
    fn tint_reaches_every_vertex() {
        let mut mesh = Mesh::new();
        let tint = Color::rgba(1.0, 0.5, 0.25, 0.75);
        build_tiled(&mut mesh, RECT_100X50, Some(&framed_sprite()), true, tint);

        for vertex in &mesh.vertices {
            assert_eq!(vertex.color, Vec4::from(tint));
        }
    }

    // ── helpers ───────────────────────────────────────────────────────────

    #[test]
    fn adjusted_borders_keep_fitting_borders() {
        let border = SpriteBorder::new(5.0, 6.0, 7.0, 8.0);
        assert_eq!(adjusted_borders(border, Vec2::new(100.0, 100.0)), border);
    }

    #[test]
    fn adjusted_borders_scale_each_axis_independently() {
        let border = SpriteBorder::new(30.0, 5.0, 30.0, 5.0);
        let adjusted = adjusted_borders(border, Vec2::new(30.0, 100.0));
        assert_relative_eq!(adjusted.left, 15.0);
        assert_relative_eq!(adjusted.right, 15.0);
        assert_eq!(adjusted.bottom, 5.0);
        assert_eq!(adjusted.top, 5.0);
    }

    #[test]
    fn partial_uv_guards_zero_spans() {
        assert_eq!(partial_uv(0.2, 0.8, 1.0, 0.0), 0.8);
        assert_relative_eq!(partial_uv(0.2, 0.8, 1.0, 2.0), 0.5);
    }
}

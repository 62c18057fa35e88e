use smallvec::SmallVec;

use crate::color::Color;
use crate::math::{Rect, Vec2};
use crate::mesh::{Mesh, Quad};
use crate::sprite::SpriteData;

/// Fill amounts at or below this show nothing at all.
const MIN_FILL_AMOUNT: f32 = 0.001;

/// Angular slack when testing whether a rectangle corner lies strictly
/// inside a sweep, in degrees.
const ANGLE_EPSILON: f32 = 1e-4;

/// Rectangle corner a 90 degree radial fill pivots around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Corner {
    #[default]
    BottomLeft,
    TopLeft,
    TopRight,
    BottomRight,
}

/// Rectangle edge a 180 or 360 degree radial fill starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Edge {
    #[default]
    Bottom,
    Left,
    Top,
    Right,
}

/// How a filled widget reveals its sprite as the amount grows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillMethod {
    /// Crops a vertical bar growing along the x axis.
    Horizontal { from_right: bool },
    /// Crops a horizontal bar growing along the y axis.
    Vertical { from_top: bool },
    /// Sweeps a quarter turn around the given corner.
    Radial90 { corner: Corner },
    /// Sweeps a half turn around the midpoint of the given edge.
    Radial180 { edge: Edge },
    /// Sweeps a full turn around the center, starting over the given edge.
    Radial360 { edge: Edge },
}

/// Parameters of the filled draw mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillSettings {
    pub method: FillMethod,
    /// Visible fraction, clamped into `0..=1` when building.
    pub amount: f32,
    /// Sweep direction for the radial methods. Bar fills ignore it.
    pub clockwise: bool,
}

impl Default for FillSettings {
    fn default() -> FillSettings {
        FillSettings {
            method: FillMethod::Horizontal { from_right: false },
            amount: 1.0,
            clockwise: true,
        }
    }
}

/// Emits geometry for a partially revealed sprite.
///
/// Bar fills crop a single quad along one axis; radial fills emit a triangle
/// fan sweeping around a pivot. UVs follow the cropped positions, so the
/// sprite appears to be wiped rather than squashed. Filled geometry is never
/// inflated by the falloff distance.
pub fn build_filled(
    mesh: &mut Mesh,
    rect: Rect,
    sprite: Option<&SpriteData>,
    fill: &FillSettings,
    color: Color,
) {
    let amount = fill.amount.clamp(0.0, 1.0);
    if amount <= MIN_FILL_AMOUNT {
        return;
    }

    let uv = match sprite {
        Some(sprite) => sprite.outer_uv,
        None => Rect::ZERO,
    };

    match fill.method {
        FillMethod::Horizontal { from_right } => {
            let (t0, t1) = if from_right {
                (1.0 - amount, 1.0)
            } else {
                (0.0, amount)
            };

            mesh.add_quad(Quad {
                min: Vec2::new(rect.lerp(Vec2::new(t0, 0.0)).x, rect.min.y),
                max: Vec2::new(rect.lerp(Vec2::new(t1, 0.0)).x, rect.max.y),
                tex_min: Vec2::new(uv.lerp(Vec2::new(t0, 0.0)).x, uv.min.y),
                tex_max: Vec2::new(uv.lerp(Vec2::new(t1, 0.0)).x, uv.max.y),
                color: color.into(),
            });
        }
        FillMethod::Vertical { from_top } => {
            let (t0, t1) = if from_top {
                (1.0 - amount, 1.0)
            } else {
                (0.0, amount)
            };

            mesh.add_quad(Quad {
                min: Vec2::new(rect.min.x, rect.lerp(Vec2::new(0.0, t0)).y),
                max: Vec2::new(rect.max.x, rect.lerp(Vec2::new(0.0, t1)).y),
                tex_min: Vec2::new(uv.min.x, uv.lerp(Vec2::new(0.0, t0)).y),
                tex_max: Vec2::new(uv.max.x, uv.lerp(Vec2::new(0.0, t1)).y),
                color: color.into(),
            });
        }
        FillMethod::Radial90 { corner } => {
            let (pivot_t, start) = match corner {
                Corner::BottomLeft => (Vec2::new(0.0, 0.0), 0.0),
                Corner::BottomRight => (Vec2::new(1.0, 0.0), 90.0),
                Corner::TopRight => (Vec2::new(1.0, 1.0), 180.0),
                Corner::TopLeft => (Vec2::new(0.0, 1.0), 270.0),
            };

            fill_radial(mesh, rect, uv, color, amount, fill.clockwise, pivot_t, start, 90.0);
        }
        FillMethod::Radial180 { edge } => {
            let (pivot_t, start) = match edge {
                Edge::Bottom => (Vec2::new(0.5, 0.0), 0.0),
                Edge::Right => (Vec2::new(1.0, 0.5), 90.0),
                Edge::Top => (Vec2::new(0.5, 1.0), 180.0),
                Edge::Left => (Vec2::new(0.0, 0.5), 270.0),
            };

            fill_radial(mesh, rect, uv, color, amount, fill.clockwise, pivot_t, start, 180.0);
        }
        FillMethod::Radial360 { edge } => {
            let start = match edge {
                Edge::Right => 0.0,
                Edge::Top => 90.0,
                Edge::Left => 180.0,
                Edge::Bottom => 270.0,
            };

            fill_radial(
                mesh,
                rect,
                uv,
                color,
                amount,
                fill.clockwise,
                Vec2::splat(0.5),
                start,
                360.0,
            );
        }
    }
}

/// Emits a triangle fan sweeping `range * amount` degrees around a pivot
/// given in normalized rectangle coordinates. Angles are measured
/// counterclockwise from the positive x axis.
#[allow(clippy::too_many_arguments)]
fn fill_radial(
    mesh: &mut Mesh,
    rect: Rect,
    uv: Rect,
    color: Color,
    amount: f32,
    clockwise: bool,
    pivot_t: Vec2,
    start: f32,
    range: f32,
) {
    if amount >= 1.0 {
        mesh.add_quad(Quad {
            min: rect.min,
            max: rect.max,
            tex_min: uv.min,
            tex_max: uv.max,
            color: color.into(),
        });
        return;
    }

    let size = rect.size();
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }

    let sweep = range * amount;
    let (from, to) = if clockwise {
        (start + range - sweep, start + range)
    } else {
        (start, start + sweep)
    };

    let pivot = rect.lerp(pivot_t);

    // boundary angles of the sweep plus every rect corner it passes, in
    // ascending order
    let mut angles: SmallVec<[f32; 8]> = SmallVec::new();
    angles.push(from);
    for corner_t in [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ] {
        let offset = rect.lerp(corner_t) - pivot;
        if offset == Vec2::ZERO {
            continue;
        }

        let degrees = offset.y.atan2(offset.x).to_degrees();
        let relative = (degrees - from).rem_euclid(360.0);
        if relative > ANGLE_EPSILON && relative < sweep - ANGLE_EPSILON {
            angles.push(from + relative);
        }
    }
    angles.sort_by(f32::total_cmp);
    angles.push(to);

    let vertex_uv = |point: Vec2| uv.lerp(rect.inverse_lerp(point));

    let center = mesh.add_vertex(pivot, vertex_uv(pivot), color.into());
    let mut prev = None;
    for &degrees in &angles {
        let point = boundary_point(rect, pivot, degrees);
        let current = mesh.add_vertex(point, vertex_uv(point), color.into());
        if let Some(prev) = prev {
            mesh.add_triangle(center, current, prev);
        }
        prev = Some(current);
    }
}

/// Intersects a ray leaving `pivot` at `degrees` with the rectangle
/// boundary. Falls back to the pivot itself if the ray escapes nowhere,
/// which only happens for degenerate rectangles.
fn boundary_point(rect: Rect, pivot: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let dir = Vec2::new(cos, sin);

    let mut t = f32::INFINITY;
    if dir.x > 1e-6 {
        t = t.min((rect.max.x - pivot.x) / dir.x);
    } else if dir.x < -1e-6 {
        t = t.min((rect.min.x - pivot.x) / dir.x);
    }
    if dir.y > 1e-6 {
        t = t.min((rect.max.y - pivot.y) / dir.y);
    } else if dir.y < -1e-6 {
        t = t.min((rect.min.y - pivot.y) / dir.y);
    }

    if !t.is_finite() {
        return pivot;
    }

    pivot + dir * t
}

use crate::corner_radii::CornerRadii;
use crate::math::{Rect, Vec3};

/// How the widget fills its rectangle with the sprite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DrawMode {
    /// One quad stretching the sprite over the whole rectangle.
    #[default]
    Simple,
    /// Same geometry as [`DrawMode::Simple`]; the border shader draws the
    /// frame, so no slice geometry is needed.
    Sliced,
    /// Classic 9-slice tiling: fixed corners, tiled edge strips and center.
    Tiled,
    /// Partial coverage controlled by the widget's fill settings.
    Filled,
}

/// The three authorable border parameters of a bordered image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderStyle {
    /// Thickness of the drawn border, in local units. Negative values are
    /// treated as zero.
    pub width: f32,
    /// Width of the anti-aliased fade at the border edge, in local units.
    /// Expected to be positive.
    pub falloff: f32,
    /// Per-corner rounding radii, in local units.
    pub radius: CornerRadii,
}

impl Default for BorderStyle {
    fn default() -> BorderStyle {
        BorderStyle {
            width: 0.0,
            falloff: 1.0,
            radius: CornerRadii::default(),
        }
    }
}

/// Snapshot of a widget's placement for one draw: its pixel-adjusted local
/// rectangle and the world positions of the rectangle's corners.
///
/// Corners are ordered bottom-left, top-left, top-right, bottom-right.
/// Recomputed by the host every draw, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetGeometry {
    pub rect: Rect,
    pub world_corners: [Vec3; 4],
}

impl WidgetGeometry {
    /// Creates a geometry for a widget that sits in the world axis-aligned
    /// and unscaled, using the rectangle's own coordinates as world
    /// positions.
    pub fn from_rect(rect: Rect) -> WidgetGeometry {
        WidgetGeometry {
            rect,
            world_corners: [
                Vec3::new(rect.min.x, rect.min.y, 0.0),
                Vec3::new(rect.min.x, rect.max.y, 0.0),
                Vec3::new(rect.max.x, rect.max.y, 0.0),
                Vec3::new(rect.max.x, rect.min.y, 0.0),
            ],
        }
    }

    /// World length of the rectangle's top edge divided by its local width:
    /// how many world units one local unit currently spans.
    ///
    /// Returns 0 for degenerate rectangles instead of a non-finite value.
    pub fn world_units_per_pixel(&self) -> f32 {
        let width = self.rect.width();
        if width <= 0.0 {
            return 0.0;
        }

        self.world_corners[1].distance(self.world_corners[2]) / width
    }
}

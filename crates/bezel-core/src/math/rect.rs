use crate::math::Vec2;

/// An axis-aligned rectangle given by its minimum and maximum corners.
///
/// Local widget space is y-up with the origin at the bottom-left, so `min` is
/// the bottom-left corner and `max` the top-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub const ZERO: Rect = Rect::new(Vec2::ZERO, Vec2::ZERO);

    pub const fn new(min: Vec2, max: Vec2) -> Rect {
        Rect { min, max }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Rect {
        Rect::new(pos, pos + size)
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Grows the rectangle by `amount` on every side. Negative amounts shrink
    /// it.
    pub fn inflate(self, amount: f32) -> Rect {
        Rect::new(self.min - Vec2::splat(amount), self.max + Vec2::splat(amount))
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Maps normalized coordinates (`(0, 0)` at `min`, `(1, 1)` at `max`) to a
    /// point.
    pub fn lerp(&self, t: Vec2) -> Vec2 {
        self.min + self.size() * t
    }

    /// Maps a point to normalized coordinates, the inverse of [`Rect::lerp`].
    ///
    /// Axes with zero extent map to 0.
    pub fn inverse_lerp(&self, point: Vec2) -> Vec2 {
        let size = self.size();
        let offset = point - self.min;

        Vec2::new(
            if size.x != 0.0 { offset.x / size.x } else { 0.0 },
            if size.y != 0.0 { offset.y / size.y } else { 0.0 },
        )
    }
}

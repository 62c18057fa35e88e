use crate::math::{Vec2, Vec4};

/// Defines the radii of four rectangle corners.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerRadii {
    /// Radius of the top-left corner.
    pub top_left: f32,
    /// Radius of the top-right corner.
    pub top_right: f32,
    /// Radius of the bottom-right corner.
    pub bottom_right: f32,
    /// Radius of the bottom-left corner.
    pub bottom_left: f32,
}

impl CornerRadii {
    /// Creates [`CornerRadii`] with all four specified corners, starting from
    /// top-left in clockwise order.
    #[inline]
    pub fn new(top_left: f32, top_right: f32, bottom_right: f32, bottom_left: f32) -> CornerRadii {
        CornerRadii {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// Creates [`CornerRadii`] with all corners' radii equal to the specified
    /// value.
    #[inline]
    pub fn new_equal(v: f32) -> CornerRadii {
        CornerRadii::new(v, v, v, v)
    }

    /// Clamps each radius to zero and uniformly scales the result down until
    /// no two radii sharing a rectangle edge sum to more than that edge's
    /// length.
    ///
    /// Radii that already fit are returned unchanged. Edges whose radii pair
    /// sums to zero impose no constraint.
    pub fn scaled_to_fit(self, size: Vec2) -> CornerRadii {
        let tl = self.top_left.max(0.0);
        let tr = self.top_right.max(0.0);
        let br = self.bottom_right.max(0.0);
        let bl = self.bottom_left.max(0.0);

        let width = size.x.max(0.0);
        let height = size.y.max(0.0);

        let mut factor = 1.0f32;
        for (extent, sum) in [
            (width, tl + tr),
            (width, br + bl),
            (height, tl + bl),
            (height, br + tr),
        ] {
            if sum > 0.0 {
                factor = factor.min(extent / sum);
            }
        }

        CornerRadii::new(tl * factor, tr * factor, br * factor, bl * factor)
    }
}

impl From<[f32; 4]> for CornerRadii {
    #[inline]
    fn from([tl, tr, br, bl]: [f32; 4]) -> Self {
        Self::new(tl, tr, br, bl)
    }
}

impl From<f32> for CornerRadii {
    #[inline]
    fn from(v: f32) -> Self {
        Self::new_equal(v)
    }
}

impl From<CornerRadii> for Vec4 {
    fn from(v: CornerRadii) -> Self {
        Vec4::new(v.top_left, v.top_right, v.bottom_right, v.bottom_left)
    }
}

use std::ops::RangeInclusive;

use crate::native;

/// A range of 3D space iterating in the order of x-y-z.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeXYZ {
    /// The range of the x axis.
    pub x: RangeInclusive<f32>,
    /// The range of the y axis.
    pub y: RangeInclusive<f32>,
    /// The range of the z axis.
    pub z: RangeInclusive<f32>,
    /// The resolution of the range.
    pub resolution: f32,
}

impl From<&RangeXYZ> for native::RangeXYZ {
    fn from(range: &RangeXYZ) -> Self {
        Self {
            x_start: *range.x.start(),
            x_end: *range.x.end(),
            y_start: *range.y.start(),
            y_end: *range.y.end(),
            z_start: *range.z.start(),
            z_end: *range.z.end(),
            resolution: range.resolution,
        }
    }
}

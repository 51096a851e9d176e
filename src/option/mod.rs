mod range;

pub use range::RangeXYZ;

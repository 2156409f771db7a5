/// Minimum drag extent (in display pixels) on each axis for a drawn
/// rectangle to be accepted as a region. Filters accidental clicks and
/// single-pixel drags; a data-quality threshold would live server-side.
pub const MIN_DRAG_EXTENT: f64 = 20.0;

/// Tolerance for display/native round-trip comparisons.
pub const ROUND_TRIP_EPSILON: f64 = 1e-6;

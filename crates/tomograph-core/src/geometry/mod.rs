//! Scanner geometry: the working canvas and the rotating emitter/detector rig.
//!
//! # Coordinate System
//!
//! - Pixel `(x, y)` covers the continuous square `[x, x+1) × [y, y+1)`
//! - Origin is the top-left corner of the square canvas
//! - The rig rotates around the canvas center `(N/2, N/2)` on a circle of
//!   radius `N/√2`, which passes through the canvas corners
//! - Angles are in radians, measured from the +x axis towards +y
//!
//! Both the forward projector and the back projector trace rays through
//! [`ScanGeometry::ray_path`], so the two passes always visit the same
//! pixels for a given `(angle, detector)` pair.

mod canvas;
mod scan;

pub use canvas::{crop_to_original, pad_to_square, Geometry, Offset};
pub use scan::{angle_steps, Point, RayPath, ScanGeometry, SAMPLES_PER_PIXEL};

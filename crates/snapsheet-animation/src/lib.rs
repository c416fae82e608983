//! Motion primitives for Snapsheet: spring profiles, the animated position
//! value, and the elastic overdrag response.

pub mod motion_value;
pub mod profile;
pub mod rubber_band;

pub use motion_value::MotionValue;
pub use profile::MotionProfile;
pub use rubber_band::{rubber_band, RUBBER_BAND_COEFFICIENT};

mod euler_characteristic;
mod is_valid;
mod loop_points;

pub use euler_characteristic::{EulerCharacteristic, EulerCounts};
pub use is_valid::IsValid;
pub use loop_points::LoopPoints;

pub mod curve;

pub use curve::{Arc, EdgeCurve, Line};

// Domain layer: value types and ports. No HTTP here.

pub mod model;
pub mod ports;

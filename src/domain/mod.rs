// Domain layer: value types and ports. Arithmetic lives in core.

pub mod model;
pub mod ports;

// Domain layer: board model, wire types and ports. No I/O here.

pub mod model;
pub mod ports;

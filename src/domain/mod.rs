// Domain layer: plain sprite/canvas models and the ports (interfaces) the core drives.

pub mod model;
pub mod ports;

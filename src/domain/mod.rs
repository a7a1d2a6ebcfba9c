// Domain layer: content models and the source port. No network code here.

pub mod model;
pub mod ports;

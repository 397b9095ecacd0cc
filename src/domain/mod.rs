// Domain layer: stock records, filter conditions and the ports the service depends on.

pub mod model;
pub mod ports;

// Domain layer: drawing models and the capability ports of the hosted platform.

pub mod model;
pub mod ports;

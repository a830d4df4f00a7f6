// Domain layer: template model, ports and the generation services.

pub mod model;
pub mod ports;

pub mod services;

// Domain layer: purchase model, collaborator ports and the purchase service.

pub mod model;
pub mod ports;

pub mod services;

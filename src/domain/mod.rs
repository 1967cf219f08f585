// Domain layer: import models and the remote user service port.

pub mod model;
pub mod ports;

// Domain layer: the persisted records and the shared JSON contract they implement.

pub mod model;
pub mod ports;
pub mod sequence;
pub mod user;

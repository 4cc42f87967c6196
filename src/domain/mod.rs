// Domain layer: series records, the report, and the ports the shell plugs into.

pub mod model;
pub mod ports;

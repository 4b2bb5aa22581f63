pub mod ddb;
pub mod telemetry;

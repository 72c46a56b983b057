pub mod configuration;
pub mod reader;
pub mod routes;
pub mod startup;
pub mod telemetry;

pub mod configuration;
pub mod domain;
pub mod error;
pub mod output;
pub mod stack_exchange;
pub mod startup;
pub mod telemetry;

pub mod aggregator;
pub mod orchestrator;
pub mod shared;
pub mod upstream;

pub mod bootstrap;
pub mod data_processing;
pub mod error;
pub mod experiment_config;
pub mod metrics;
pub mod numerical;
pub mod opponents;
pub mod summary;
pub mod systems;

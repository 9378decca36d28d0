pub mod config;
pub mod ensemble;
pub mod simulation;

pub use config::{count_epochs, RecordFlags, SimConfig};
pub use ensemble::{run_ensemble, EnsembleSummary};
pub use simulation::Simulation;

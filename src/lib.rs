pub mod bodies;
pub mod constants;
pub mod dataset;
pub mod env_state;
pub mod errors;
pub mod horizons;
pub mod parser;
pub mod persist;
pub mod phase;
pub mod pipeline;
pub mod time_window;

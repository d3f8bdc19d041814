pub mod artwork;
pub mod carousel;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod events;
pub mod inputs;
pub mod keys;
pub mod sources;
pub mod slider;
pub mod state;
pub mod transport;

pub use state::*;

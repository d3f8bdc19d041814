pub mod player;
pub mod popups;

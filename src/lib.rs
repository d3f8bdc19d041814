pub mod app;
pub mod catalog;
pub mod engine;
pub mod logging;
pub mod task;
pub mod ui;

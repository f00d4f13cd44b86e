pub mod app;
pub mod catalog;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod copy;
pub mod feedback;
pub mod keybindings;
pub mod logging;
pub mod report;
pub mod search;
pub mod session;
pub mod ui;
pub mod utils;

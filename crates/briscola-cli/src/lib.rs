pub mod config;
pub mod console;
pub mod deal;
pub mod display;
pub mod logging;
pub mod session;

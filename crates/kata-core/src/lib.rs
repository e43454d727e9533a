pub mod calendar;
pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod io;
pub mod paths;
pub mod runner;
pub mod session;
pub mod stats;
pub mod store;
pub mod task;
pub mod types;

pub use error::{KataError, Result};

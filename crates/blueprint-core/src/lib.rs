pub mod action;
pub mod answer;
pub mod artifact;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod paths;
pub mod project;
pub mod repair;
pub mod sequencer;
pub mod store;
pub mod types;

pub use error::{BlueprintError, Result};

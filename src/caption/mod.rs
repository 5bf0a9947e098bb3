//! Caption text and style configuration.

pub mod config;
pub mod model;

pub mod config;
pub mod datefmt;
pub mod geo;
pub mod models;
pub mod projection;
pub mod store;
pub mod tiles;

// src/services/mod.rs
pub mod cache;
pub mod error;
pub mod forecast;
pub mod open_meteo;
pub mod summary;

// src/infrastructure/mod.rs
pub mod analysis;
pub mod http;
pub mod market;
pub mod news;
pub mod strategy;

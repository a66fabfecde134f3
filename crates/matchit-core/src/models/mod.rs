//! Data models for flyers, aggregated tables and configuration.

pub mod config;
pub mod flyer;
pub mod tables;

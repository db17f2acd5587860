pub mod audit;
pub mod config;
pub mod data;
pub mod error;
pub mod notify;
pub mod pricing;
pub mod settings;

pub mod audit;
pub mod settings;

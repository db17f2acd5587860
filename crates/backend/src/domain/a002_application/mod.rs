pub mod comments;
pub mod history;
pub mod repository;
pub mod service;
pub mod workflow;

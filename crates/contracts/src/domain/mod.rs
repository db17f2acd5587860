pub mod a001_car;
pub mod a002_application;
pub mod a003_payment;
pub mod a004_blacklist;
pub mod a005_document;
pub mod common;

pub mod aggregate;

pub use aggregate::{Car, CarId, CarListParams, CarListResponse, CarView};

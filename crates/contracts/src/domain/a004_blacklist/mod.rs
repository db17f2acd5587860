pub mod aggregate;

pub use aggregate::{BlacklistCreateDto, BlacklistEntry, BlacklistListResponse};

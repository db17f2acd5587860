pub mod aggregate;

pub use aggregate::{Payment, PaymentCreateDto, PaymentId, PaymentRejectDto, PaymentStats};

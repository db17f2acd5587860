pub mod application_status;
pub mod blacklist;
pub mod contact_status;
pub mod document_type;
pub mod payment;
pub mod rejection_reason;
pub mod role;

pub use application_status::ApplicationStatus;
pub use blacklist::{BlacklistReason, BlockType};
pub use contact_status::ContactStatus;
pub use document_type::DocumentType;
pub use payment::{PaymentMethod, PaymentStatus};
pub use rejection_reason::RejectionReason;
pub use role::Role;

//! Mail transport adapters.
//!
//! - `ResendMailTransport` - Delivery through the Resend HTTP API
//! - `InMemoryMailTransport` - Captures messages for tests and dry runs

mod in_memory;
mod resend;

pub use in_memory::InMemoryMailTransport;
pub use resend::{ResendConfig, ResendMailTransport, DEFAULT_RESEND_BASE_URL};

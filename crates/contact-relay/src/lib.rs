//! Contact form relay: validates a JSON form submission and forwards it
//! by email.

pub mod config;
pub mod error;
pub mod handler;
pub mod mailer;
pub mod request;

pub use config::RelayConfig;
pub use error::ContactError;
pub use handler::{router, SEND_EMAIL_PATH};
pub use mailer::{Mailer, SmtpMailer};
pub use request::{ContactMessage, ContactRequest};

use std::net::SocketAddr;

use crate::error::ContactError;

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Relay settings, read from the environment at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    /// Account the relay logs in as; also the sender address.
    pub email_user: String,
    pub email_pass: String,
    /// Where submissions are delivered. Defaults to `email_user`.
    pub contact_to: String,
    pub smtp_host: String,
    pub bind_addr: SocketAddr,
}

impl RelayConfig {
    /// Read `EMAIL_USER`, `EMAIL_PASS`, `CONTACT_TO`, `SMTP_HOST` and `BIND_ADDR`.
    pub fn from_env() -> Result<Self, ContactError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ContactError> {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let require = |key: &str| get(key).ok_or_else(|| ContactError::Config(format!("{} is not set", key)));

        let email_user = require("EMAIL_USER")?;
        let email_pass = require("EMAIL_PASS")?;
        let contact_to = get("CONTACT_TO").unwrap_or_else(|| email_user.clone());
        let smtp_host = get("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string());
        let bind = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind
            .parse()
            .map_err(|e| ContactError::Config(format!("BIND_ADDR {:?}: {}", bind, e)))?;

        Ok(Self {
            email_user,
            email_pass,
            contact_to,
            smtp_host,
            bind_addr,
        })
    }
}

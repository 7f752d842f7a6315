use crate::config::{required, var_or};
use crate::core::Result;
use serde::Deserialize;

/// SMTP relay used for submission notifications
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    /// SMTP login, also the sender address
    pub user: String,
    pub password: String,
    /// Mailbox that receives notifications
    pub to: String,
}

impl MailConfig {
    pub fn from_env() -> Result<Self> {
        Ok(MailConfig {
            host: required("EMAIL_HOST")?,
            port: var_or("EMAIL_PORT", "587")?,
            user: required("EMAIL_USER")?,
            password: required("EMAIL_PASS")?,
            to: required("EMAIL_TO")?,
        })
    }
}

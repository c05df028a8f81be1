//! Verification-code email delivery.
//!
//! The API only depends on the [`VerificationSender`] trait. [`SmtpMailer`]
//! sends plain-text mail through `lettre`'s async SMTP transport;
//! [`LogMailer`] is used when `SMTP_HOST` is not configured and writes the
//! code to the log instead. [`MemoryMailer`] keeps messages in memory so
//! tests can read the code back.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// MailerConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@lisan.local";

/// Configuration for the SMTP mailer.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl MailerConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set.
    ///
    /// | Variable        | Required | Default               |
    /// |-----------------|----------|-----------------------|
    /// | `SMTP_HOST`     | yes      |                       |
    /// | `SMTP_PORT`     | no       | `587`                 |
    /// | `SMTP_FROM`     | no       | `noreply@lisan.local` |
    /// | `SMTP_USER`     | no       |                       |
    /// | `SMTP_PASSWORD` | no       |                       |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// Subject line of every verification email.
pub const VERIFICATION_SUBJECT: &str = "[LISAN] Your verification code";

/// Render the plain-text body of a verification email.
pub fn verification_body(name: &str, code: &str) -> String {
    format!(
        "Hello {name},\n\n\
         Your LISAN verification code is: {code}\n\n\
         The code expires in 24 hours. If you did not create an account, \
         you can ignore this message.\n"
    )
}

// ---------------------------------------------------------------------------
// Sender trait
// ---------------------------------------------------------------------------

/// Delivers a verification code to a user.
#[async_trait]
pub trait VerificationSender: Send + Sync {
    async fn send_verification_code(
        &self,
        recipient: &str,
        name: &str,
        code: &str,
    ) -> Result<(), MailerError>;
}

/// Build the sender for the current environment: SMTP when configured,
/// otherwise the logging fallback.
pub fn sender_from_env() -> Arc<dyn VerificationSender> {
    match MailerConfig::from_env() {
        Some(config) => {
            tracing::info!(host = %config.smtp_host, port = config.smtp_port, "SMTP mailer configured");
            Arc::new(SmtpMailer::new(config))
        }
        None => {
            tracing::warn!("SMTP_HOST not set, verification codes will only be logged");
            Arc::new(LogMailer)
        }
    }
}

// ---------------------------------------------------------------------------
// SmtpMailer
// ---------------------------------------------------------------------------

/// Sends verification emails via SMTP.
pub struct SmtpMailer {
    config: MailerConfig,
}

impl SmtpMailer {
    pub fn new(config: MailerConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl VerificationSender for SmtpMailer {
    async fn send_verification_code(
        &self,
        recipient: &str,
        name: &str,
        code: &str,
    ) -> Result<(), MailerError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(recipient.parse()?)
            .subject(VERIFICATION_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(verification_body(name, code))
            .map_err(|e| MailerError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(to = recipient, "Verification email sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// LogMailer
// ---------------------------------------------------------------------------

/// Fallback sender for local development: logs the code.
pub struct LogMailer;

#[async_trait]
impl VerificationSender for LogMailer {
    async fn send_verification_code(
        &self,
        recipient: &str,
        _name: &str,
        code: &str,
    ) -> Result<(), MailerError> {
        tracing::warn!(to = recipient, code, "SMTP not configured, verification code not emailed");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryMailer
// ---------------------------------------------------------------------------

/// A delivered message captured by [`MemoryMailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentCode {
    pub recipient: String,
    pub name: String,
    pub code: String,
}

/// Keeps every message in memory.
#[derive(Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<SentCode>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent code sent to `recipient`.
    pub async fn last_code_for(&self, recipient: &str) -> Option<String> {
        self.sent
            .lock()
            .await
            .iter()
            .rev()
            .find(|m| m.recipient == recipient)
            .map(|m| m.code.clone())
    }

    pub async fn sent(&self) -> Vec<SentCode> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl VerificationSender for MemoryMailer {
    async fn send_verification_code(
        &self,
        recipient: &str,
        name: &str,
        code: &str,
    ) -> Result<(), MailerError> {
        self.sent.lock().await.push(SentCode {
            recipient: recipient.to_string(),
            name: name.to_string(),
            code: code.to_string(),
        });
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_returns_none_without_smtp_host() {
        std::env::remove_var("SMTP_HOST");
        assert!(MailerConfig::from_env().is_none());
    }

    #[test]
    fn body_contains_name_and_code() {
        let body = verification_body("Rania", "123456");
        assert!(body.starts_with("Hello Rania,"));
        assert!(body.contains("123456"));
    }

    #[test]
    fn mailer_error_display_build() {
        let err = MailerError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }

    #[test]
    fn mailer_error_display_address() {
        let addr_err: Result<lettre::Address, _> = "not-an-email".parse();
        let err = MailerError::Address(addr_err.unwrap_err());
        assert!(err.to_string().contains("Email address parse error"));
    }

    #[tokio::test]
    async fn memory_mailer_returns_latest_code_per_recipient() {
        let mailer = MemoryMailer::new();
        mailer.send_verification_code("a@x.io", "A", "111111").await.unwrap();
        mailer.send_verification_code("b@x.io", "B", "222222").await.unwrap();
        mailer.send_verification_code("a@x.io", "A", "333333").await.unwrap();

        assert_eq!(mailer.last_code_for("a@x.io").await.as_deref(), Some("333333"));
        assert_eq!(mailer.last_code_for("b@x.io").await.as_deref(), Some("222222"));
        assert_eq!(mailer.last_code_for("c@x.io").await, None);
        assert_eq!(mailer.sent().await.len(), 3);
    }

    #[tokio::test]
    async fn log_mailer_never_fails() {
        LogMailer
            .send_verification_code("dev@lisan.local", "Dev", "654321")
            .await
            .unwrap();
    }
}

//! Outbound email for the candidate contact operation.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use thiserror::Error;
use tracing::info;

use crate::config::SmtpConfig;

/// SMTPS: TLS from the first byte. Every other port upgrades with STARTTLS.
const IMPLICIT_TLS_PORT: u16 = 465;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TlsMode {
    Implicit,
    StartTls,
}

fn tls_mode(port: u16) -> TlsMode {
    if port == IMPLICIT_TLS_PORT {
        TlsMode::Implicit
    } else {
        TlsMode::StartTls
    }
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("could not build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("mail task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let builder = match tls_mode(config.port) {
            TlsMode::Implicit => SmtpTransport::relay(&config.host)?,
            TlsMode::StartTls => SmtpTransport::starttls_relay(&config.host)?,
        };
        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(config.user.clone(), config.pass.clone()))
            .build();
        Ok(Self {
            transport,
            from: config.from.parse()?,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse::<Mailbox>()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        // lettre's SMTP transport blocks; keep it off the async workers.
        let transport = self.transport.clone();
        tokio::task::spawn_blocking(move || transport.send(&message)).await??;

        info!("Email sent to {to}");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records messages instead of sending them.
    #[derive(Default)]
    pub(crate) struct RecordingMailer {
        pub sent: Mutex<Vec<(String, String, String)>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), subject.to_string(), body.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_default_port_uses_starttls() {
        assert_eq!(tls_mode(crate::config::DEFAULT_SMTP_PORT), TlsMode::StartTls);
        assert_eq!(tls_mode(25), TlsMode::StartTls);
    }

    #[test]
    fn test_smtps_port_uses_implicit_tls() {
        assert_eq!(tls_mode(465), TlsMode::Implicit);
    }

    #[test]
    fn test_invalid_from_address_is_rejected() {
        let config = SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: crate::config::DEFAULT_SMTP_PORT,
            user: "u".to_string(),
            pass: "p".to_string(),
            from: "not an address".to_string(),
        };
        assert!(matches!(
            SmtpMailer::new(&config),
            Err(MailError::Address(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_recipient_fails_before_sending() {
        let config = SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: crate::config::DEFAULT_SMTP_PORT,
            user: "u".to_string(),
            pass: "p".to_string(),
            from: "Recruiting <jobs@example.com>".to_string(),
        };
        let mailer = SmtpMailer::new(&config).unwrap();
        let err = mailer.send("nope", "Hi", "Body").await.unwrap_err();
        assert!(matches!(err, MailError::Address(_)));
    }
}

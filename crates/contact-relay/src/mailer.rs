use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::config::RelayConfig;
use crate::error::ContactError;
use crate::request::ContactMessage;

/// Delivers a validated contact message. Blocking; the handler runs it off
/// the async executor.
pub trait Mailer: Send + Sync + 'static {
    fn send(&self, message: &ContactMessage) -> Result<(), ContactError>;
}

/// SMTP delivery through an authenticated relay account.
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(config: &RelayConfig) -> Result<Self, ContactError> {
        let from: Mailbox = config
            .email_user
            .parse()
            .map_err(|e| ContactError::Config(format!("EMAIL_USER: {}", e)))?;
        let to: Mailbox = config
            .contact_to
            .parse()
            .map_err(|e| ContactError::Config(format!("CONTACT_TO: {}", e)))?;
        let transport = SmtpTransport::relay(&config.smtp_host)
            .map_err(|e| ContactError::Config(format!("SMTP_HOST: {}", e)))?
            .credentials(Credentials::new(
                config.email_user.clone(),
                config.email_pass.clone(),
            ))
            .build();

        Ok(Self { transport, from, to })
    }

    /// Build the outgoing email: plain text and HTML alternatives, with
    /// replies going to the submitter.
    pub fn compose(&self, message: &ContactMessage) -> Result<Message, ContactError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(message.subject_line());

        match message.email.parse::<Mailbox>() {
            Ok(reply_to) => builder = builder.reply_to(reply_to),
            Err(e) => log::warn!("contact relay: no reply-to for {:?}: {}", message.email, e),
        }

        builder
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(message.text_body()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(message.html_body()),
                    ),
            )
            .map_err(|e| ContactError::Mail(e.to_string()))
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, message: &ContactMessage) -> Result<(), ContactError> {
        let email = self.compose(message)?;
        self.transport
            .send(&email)
            .map_err(|e| ContactError::Mail(e.to_string()))?;
        log::info!("contact relay: delivered message from {}", message.email);
        Ok(())
    }
}

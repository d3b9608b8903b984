//! Outbound mail delivery through the SMTP relay.

use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::info;

/// Default sender address on update mails.
pub const DEFAULT_MAIL_FROM: &str = "arXivUpdate@nut.physik.uni-mainz.de";

/// Default SMTP relay host.
pub const DEFAULT_RELAY_HOST: &str = "mailgate.zdv.uni-mainz.de";

/// Default SMTP relay port.
pub const DEFAULT_RELAY_PORT: u16 = 25;

/// Subject line on every update mail.
pub const SUBJECT: &str = "arXiv update";

/// Errors that can occur while building or delivering an update mail.
#[derive(Debug, Error)]
pub enum MailError {
    /// An address did not parse as a mailbox.
    #[error("invalid email address: '{address}'")]
    InvalidEmailAddress {
        /// The unparseable address.
        address: String,
    },

    /// The message could not be assembled.
    #[error("failed to build mail message: {source}")]
    Message {
        /// The underlying builder error.
        #[source]
        source: lettre::error::Error,
    },

    /// The relay refused or the connection failed.
    #[error("SMTP delivery via {relay} failed: {source}")]
    Smtp {
        /// The relay host that was contacted.
        relay: String,
        /// The underlying transport error.
        #[source]
        source: smtp::Error,
    },
}

impl MailError {
    /// Creates an `InvalidEmailAddress` error.
    #[must_use]
    pub fn invalid_address(address: impl Into<String>) -> Self {
        Self::InvalidEmailAddress {
            address: address.into(),
        }
    }

    fn message(source: lettre::error::Error) -> Self {
        Self::Message { source }
    }

    fn smtp(relay: impl Into<String>, source: smtp::Error) -> Self {
        Self::Smtp {
            relay: relay.into(),
            source,
        }
    }
}

/// Sends plain-text update mails over one SMTP relay.
pub struct MailSender {
    relay_host: String,
    relay_port: u16,
    from: Mailbox,
}

impl MailSender {
    /// Creates a sender using the default relay and sender address.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::InvalidEmailAddress`] if the default sender
    /// address fails to parse (only possible if the constant is edited).
    pub fn new() -> Result<Self, MailError> {
        Self::with_relay(DEFAULT_RELAY_HOST, DEFAULT_RELAY_PORT, DEFAULT_MAIL_FROM)
    }

    /// Creates a sender for an explicit relay and sender address.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::InvalidEmailAddress`] if `from` fails to parse.
    pub fn with_relay(
        host: impl Into<String>,
        port: u16,
        from: &str,
    ) -> Result<Self, MailError> {
        Ok(Self {
            relay_host: host.into(),
            relay_port: port,
            from: parse_mailbox(from)?,
        })
    }

    /// Sends `text` to every recipient in one message.
    ///
    /// All recipients are validated before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::InvalidEmailAddress`] for an unparseable
    /// recipient, [`MailError::Message`] if the message cannot be built, and
    /// [`MailError::Smtp`] when the relay rejects the delivery.
    pub async fn send(&self, text: &str, recipients: &[String]) -> Result<(), MailError> {
        let mailboxes = recipients
            .iter()
            .map(|address| parse_mailbox(address))
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = Message::builder().from(self.from.clone()).subject(SUBJECT);
        for mailbox in mailboxes {
            builder = builder.to(mailbox);
        }
        let message = builder
            .header(ContentType::TEXT_PLAIN)
            .body(text.to_string())
            .map_err(MailError::message)?;

        // The relay is an internal mailgate listening on plain SMTP.
        let transport: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.relay_host)
                .port(self.relay_port)
                .build();

        transport
            .send(message)
            .await
            .map_err(|e| MailError::smtp(&self.relay_host, e))?;

        info!(recipients = recipients.len(), "update mailed");
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .trim()
        .parse()
        .map_err(|_| MailError::invalid_address(address))
}

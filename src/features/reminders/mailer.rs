//! Mail transmission
//!
//! The dispatcher talks to a [`Mailer`]; production uses [`SmtpMailer`], an
//! implicit-TLS SMTP relay with a single set of sender credentials.

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::message::ReminderMessage;
use crate::core::SmtpConfig;

/// Sends one rendered reminder. Either the whole message is accepted or an
/// error is returned.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &ReminderMessage) -> Result<()>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let sender = sender_mailbox(config)?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .with_context(|| format!("Invalid SMTP host {}", config.host))?
            .port(config.port)
            .credentials(Credentials::new(
                config.sender_email.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { transport, sender })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &ReminderMessage) -> Result<()> {
        let email = build_email(&self.sender, message)?;
        self.transport.send(email).await?;
        Ok(())
    }
}

fn sender_mailbox(config: &SmtpConfig) -> Result<Mailbox> {
    let address: Address = config
        .sender_email
        .parse()
        .with_context(|| format!("Invalid sender address {}", config.sender_email))?;
    Ok(Mailbox::new(config.sender_name.clone(), address))
}

/// Plain-text message to the recipient, blind-copied to the sender
fn build_email(sender: &Mailbox, message: &ReminderMessage) -> Result<Message> {
    let address: Address = message
        .recipient
        .trim()
        .parse()
        .with_context(|| format!("Invalid recipient address '{}'", message.recipient))?;
    let name = Some(message.recipient_name.clone()).filter(|n| !n.is_empty());

    let email = Message::builder()
        .from(sender.clone())
        .to(Mailbox::new(name, address))
        .bcc(sender.clone())
        .subject(message.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(message.body.clone())?;
    Ok(email)
}

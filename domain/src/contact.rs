use crate::{
    error::Error,
    gateway::mailersend::{
        is_valid_email, EmailRecipient, EmailSender, MailerSendClient, SendEmailRequest,
    },
};

use html_escape::encode_text;
use log::*;
use service::config::Config;

pub const MISSING_FIELDS_MESSAGE: &str = "All fields are required.";
pub const INVALID_EMAIL_MESSAGE: &str = "Please provide a valid email address.";

/// A contact form submission whose fields have been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    name: String,
    email: String,
    message: String,
}

impl ContactMessage {
    /// Validates a submission. Every field is required; blank counts as missing.
    pub fn new(
        name: Option<&str>,
        email: Option<&str>,
        message: Option<&str>,
    ) -> Result<Self, Error> {
        let (Some(name), Some(email), Some(message)) =
            (present(name), present(email), present(message))
        else {
            return Err(Error::invalid(MISSING_FIELDS_MESSAGE));
        };

        if !is_valid_email(email) {
            debug!("Rejecting contact submission with malformed email {email:?}");
            return Err(Error::invalid(INVALID_EMAIL_MESSAGE));
        }

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn subject(&self) -> String {
        format!("New Contact Form Submission from {}", self.name)
    }

    fn html_body(&self) -> String {
        format!(
            "<p><strong>Name:</strong> {}</p>\
             <p><strong>Email:</strong> {}</p>\
             <p><strong>Message:</strong></p>\
             <p>{}</p>",
            encode_text(&self.name),
            encode_text(&self.email),
            encode_text(&self.message)
        )
    }
}

fn present(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|f| !f.is_empty())
}

/// Forwards a contact form submission to the site owner's inbox.
pub async fn send_contact_message(config: &Config, contact: &ContactMessage) -> Result<(), Error> {
    info!("Forwarding contact form submission from {}", contact.email());

    let email_request = build_email_request(config, contact)?;
    let mailersend_client = MailerSendClient::new(config)?;
    let response = mailersend_client.send_email(email_request).await?;

    debug!(
        "Contact message from {} accepted, message_id: {:?}",
        contact.email(),
        response.message_id
    );
    Ok(())
}

fn build_email_request(config: &Config, contact: &ContactMessage) -> Result<SendEmailRequest, Error> {
    let from = config.contact_email_from().ok_or_else(|| {
        error!("Contact sender address not configured");
        Error::config("Contact sender address is not configured")
    })?;
    let to = config.contact_email_to().ok_or_else(|| {
        error!("Contact inbox address not configured");
        Error::config("Contact inbox address is not configured")
    })?;

    // The relay only sends from verified domains, so the submitter goes in reply_to.
    Ok(SendEmailRequest {
        from: EmailSender {
            email: from,
            name: Some(contact.name.clone()),
        },
        to: vec![EmailRecipient {
            email: to,
            name: None,
        }],
        reply_to: Some(EmailRecipient {
            email: contact.email.clone(),
            name: Some(contact.name.clone()),
        }),
        subject: contact.subject(),
        text: Some(contact.message.clone()),
        html: Some(contact.html_body()),
    })
}

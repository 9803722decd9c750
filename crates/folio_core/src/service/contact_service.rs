//! Visitor contact messages.

use super::{require_email, require_text, ServiceResult};
use crate::api::ContactApi;
use crate::model::contact::ContactMessage;
use log::info;

pub const CONTACT_SENT_MESSAGE: &str = "Message sent successfully!";

/// Checks every field is present and the email looks like `local@domain`.
pub fn validate_contact(message: &ContactMessage) -> ServiceResult<()> {
    require_text("name", &message.name)?;
    require_text("subject", &message.subject)?;
    require_text("message", &message.message)?;
    require_email("email", &message.email)
}

pub struct ContactService<C: ContactApi> {
    api: C,
}

impl<C: ContactApi> ContactService<C> {
    pub fn new(api: C) -> Self {
        Self { api }
    }

    /// Validates and submits a message. Delivery is the server's concern.
    pub async fn send(&self, message: &ContactMessage) -> ServiceResult<()> {
        validate_contact(message)?;
        let trimmed = ContactMessage {
            name: message.name.trim().to_string(),
            email: message.email.trim().to_string(),
            subject: message.subject.trim().to_string(),
            message: message.message.trim().to_string(),
        };
        self.api.send_contact(&trimmed).await?;
        info!("event=contact_send module=contact status=ok");
        Ok(())
    }
}

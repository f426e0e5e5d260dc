use lettre::message::Mailbox;
use lettre::{Message, SmtpTransport, Transport};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use thiserror::Error;
use crate::config::MailParameters;

/// Sends run reports by mail
pub struct Mail {
    sender: SmtpTransport,
    from: Mailbox,
    to: Mailbox,
    report_success: bool,
}

impl Mail {
    /// Returns a new instance of the Mail struct
    ///
    /// # Arguments
    ///
    /// * 'config' - mail configuration parameters
    pub fn new(config: &MailParameters) -> Result<Self, MailError> {
        let credentials = Credentials::new(config.smtp_user.to_owned(), config.smtp_password.to_owned());
        let sender = SmtpTransport::relay(&config.smtp_endpoint)
            .map_err(|e| MailError::SMTPTransportError(e.to_string()))?
            .credentials(credentials)
            .build();

        let from = parse_mailbox(&config.from, "from")?;
        let to = parse_mailbox(&config.to, "to")?;

        Ok(
            Self {
                sender,
                from,
                to,
                report_success: config.report_success,
            }
        )
    }

    /// Whether successful runs should be reported as well as failed ones
    pub fn report_success(&self) -> bool {
        self.report_success
    }

    /// Sends a mail with the given subject and body
    ///
    /// # Arguments
    ///
    /// * 'subject' - the subject of the mail
    /// * 'body' - the body of the mail
    pub fn send_mail(&self, subject: String, body: String) -> Result<(), MailError> {

        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| MailError::MessageError(e.to_string()))?;

        self.sender.send(&message)
            .map_err(|e| MailError::TransportError(e.to_string()))?;

        Ok(())
    }
}

/// Parses a mailbox such as `Badge <badge@example.com>`
///
/// # Arguments
///
/// * 'address' - the address to parse
/// * 'role' - which address it is, used in the error message
fn parse_mailbox(address: &str, role: &str) -> Result<Mailbox, MailError> {
    address.parse::<Mailbox>()
        .map_err(|e| MailError::ParseError(format!("{} address: {}", role, e)))
}

/// Error depicting errors that occur while sending emails
///
#[derive(Debug, Error)]
pub enum MailError {
    #[error("SMTPTransportError: {0}")]
    SMTPTransportError(String),
    #[error("TransportError: {0}")]
    TransportError(String),
    #[error("ParseError: {0}")]
    ParseError(String),
    #[error("MessageError: {0}")]
    MessageError(String),
}

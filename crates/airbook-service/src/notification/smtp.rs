//! Activation email delivery via SMTP.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use airbook_core::config::EmailConfig;
use airbook_core::error::{AppError, ErrorKind};
use airbook_core::result::AppResult;
use airbook_entity::account::Account;

use super::notifier::ActivationNotifier;

const SUBJECT: &str = "Activate your Airbook account";

/// Sends activation emails through a STARTTLS relay.
pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    activation_base_url: String,
}

impl std::fmt::Debug for SmtpNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpNotifier")
            .field("from", &self.from.to_string())
            .field("activation_base_url", &self.activation_base_url)
            .finish_non_exhaustive()
    }
}

impl SmtpNotifier {
    /// Builds the transport. No connection is made until the first send.
    pub fn new(config: &EmailConfig) -> AppResult<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Invalid SMTP relay host", e)
            })?
            .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_username, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let address: Address = config.sender_address.parse().map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid sender address", e)
        })?;

        Ok(Self {
            mailer: builder.build(),
            from: Mailbox::new(Some(config.sender_name.clone()), address),
            activation_base_url: config.activation_base_url.clone(),
        })
    }
}

#[async_trait]
impl ActivationNotifier for SmtpNotifier {
    async fn notify(&self, account: &Account, activation_code: &str) -> AppResult<()> {
        let link = activation_link(&self.activation_base_url, activation_code);
        let message = activation_message(&self.from, account, &link, activation_code)?;

        self.mailer.send(message).await.map_err(|e| {
            AppError::with_source(ErrorKind::Notification, "Failed to send activation email", e)
        })?;

        info!(account_id = %account.id, "Activation email sent");
        Ok(())
    }
}

/// `{base}?code={code}`, or `&code=` when the base already has a query.
pub fn activation_link(base: &str, code: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}code={code}")
}

fn activation_message(
    from: &Mailbox,
    account: &Account,
    link: &str,
    activation_code: &str,
) -> AppResult<Message> {
    let address: Address = account.email.parse().map_err(|e| {
        AppError::with_source(ErrorKind::Notification, "Invalid recipient address", e)
    })?;
    let to = Mailbox::new(Some(account.username.clone()), address);

    let sender = from.name.as_deref().unwrap_or("Airbook");
    let body = format!(
        "Hello {username},\n\n\
         Thanks for registering. Open the link below to activate your account:\n\n\
         {link}\n\n\
         If the link does not work, submit this activation code instead:\n\
         {activation_code}\n\n\
         Thanks,\n{sender}\n",
        username = account.username,
    );

    Message::builder()
        .from(from.clone())
        .to(to)
        .subject(SUBJECT)
        .header(ContentType::TEXT_PLAIN)
        .body(body)
        .map_err(|e| AppError::with_source(ErrorKind::Notification, "Failed to build email", e))
}

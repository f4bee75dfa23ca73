use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::transport::smtp::PoolConfig;
use lettre::{Message, SmtpTransport, Transport};
use log::info;

use super::smtp::SmtpConfig;

/// Capability interface for dispatching account mail.
///
/// A failed send must abort whatever operation triggered it before that
/// operation reports success; no retries happen at this layer.
pub trait Mailer {
    fn send(&self, to_email: &str, subject: &str, body: &str) -> Result<(), String>;
}

/// Mailer over an authenticated TLS SMTP relay
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, to_email: &str, subject: &str, body: &str) -> Result<(), String> {
        // Create email message
        let email = Message::builder()
            .from(
                self.config
                    .from_address()
                    .parse()
                    .map_err(|e| format!("Invalid from address: {}", e))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| format!("Invalid to address: {}", e))?)
            .subject(subject)
            .header(lettre::message::header::ContentType::TEXT_HTML)
            .body(body.to_string())
            .map_err(|e| format!("Failed to create email: {}", e))?;

        // Configure TLS parameters
        let tls_parameters = TlsParameters::builder(self.config.host.clone())
            .build()
            .map_err(|e| format!("Failed to build TLS parameters: {}", e))?;

        // Set up SMTP transport with explicit TLS configuration
        let mailer = SmtpTransport::relay(&self.config.host)
            .map_err(|e| format!("Failed to create SMTP transport: {}", e))?
            .credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ))
            .port(self.config.port)
            .tls(Tls::Required(tls_parameters))
            .pool_config(PoolConfig::new().max_size(1))
            .timeout(Some(std::time::Duration::from_secs(10)))
            .build();

        match mailer.send(&email) {
            Ok(_) => {
                info!("Email sent to {}", to_email);
                Ok(())
            }
            Err(e) => Err(format!("Failed to send email: {}", e)),
        }
    }
}

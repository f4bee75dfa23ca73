use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_port() -> u16 {
    587
}

/// SMTP relay settings for outbound mail
#[derive(Serialize, Deserialize, Clone)]
pub struct SmtpConfig {
    // The email address/username for SMTP authentication
    pub username: String,
    // The password or app-specific password for SMTP
    pub password: String,
    // SMTP server hostname (e.g., smtp.gmail.com)
    pub host: String,
    // SMTP server port (typically 587 for TLS)
    #[serde(default = "default_port")]
    pub port: u16,
    // Display name used on outbound mail
    #[serde(default)]
    pub sender_name: String,
}

impl SmtpConfig {
    /// Load SMTP settings from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read SMTP config: {}", e))?;
        serde_json::from_str(&raw).map_err(|e| format!("Failed to parse SMTP config: {}", e))
    }

    /// The From header value, `Name <address>` when a sender name is set
    pub fn from_address(&self) -> String {
        if self.sender_name.is_empty() {
            self.username.clone()
        } else {
            format!("{} <{}>", self.sender_name, self.username)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"username":"ops@example.com","password":"app-password","host":"smtp.example.com","sender_name":"Accounts"}}"#
        )
        .unwrap();

        let config = SmtpConfig::from_file(file.path()).unwrap();
        assert_eq!(config.host, "smtp.example.com");
        assert_eq!(config.port, 587); // default applied
        assert_eq!(config.from_address(), "Accounts <ops@example.com>");
    }

    #[test]
    fn test_config_missing_file() {
        let result = SmtpConfig::from_file("/nonexistent/smtp.json");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_address_without_sender_name() {
        let config = SmtpConfig {
            username: "ops@example.com".to_string(),
            password: "secret".to_string(),
            host: "smtp.example.com".to_string(),
            port: 587,
            sender_name: String::new(),
        };
        assert_eq!(config.from_address(), "ops@example.com");
    }
}

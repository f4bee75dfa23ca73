use env_logger::{Builder, WriteStyle};
use log::{error, info, warn, LevelFilter};
use std::fs::OpenOptions;

/// Initialize the logging system with file output
pub fn initialize_logging() -> Result<(), Box<dyn std::error::Error>> {
    // Create or append to log file with proper permissions
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("account-core.log")?;

    // Configure the logging system
    Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp_secs()
        .format_module_path(true)
        .write_style(WriteStyle::Auto)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    info!("Logging system initialized");
    Ok(())
}

/// Helper function to mask identifying data before it hits the log.
/// Works on characters, not bytes: usernames are caller-supplied and may
/// well be non-ASCII.
fn format_sensitive(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

/// Structured logging for authentication and confirmation events
pub fn log_auth_event(event_type: &str, account: &str, success: bool, details: Option<&str>) {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    if success {
        info!(
            "Auth event: type={}, account={}, success=true, timestamp={}, details={:?}",
            event_type,
            format_sensitive(account),
            timestamp,
            details
        );
    } else {
        warn!(
            "Auth event: type={}, account={}, success=false, timestamp={}, details={:?}",
            event_type,
            format_sensitive(account),
            timestamp,
            details
        );
    }
}

/// Structured logging for account store writes. Failed writes after a token
/// was consumed are the ones an operator has to chase, so failures log at
/// error level.
pub fn log_store_operation(operation: &str, account: &str, success: bool, details: Option<&str>) {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    if success {
        info!(
            "Store operation: op={}, account={}, success=true, timestamp={}, details={:?}",
            operation,
            format_sensitive(account),
            timestamp,
            details
        );
    } else {
        error!(
            "Store operation: op={}, account={}, success=false, timestamp={}, details={:?}",
            operation,
            format_sensitive(account),
            timestamp,
            details
        );
    }
}

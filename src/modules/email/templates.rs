/// Subject line for the confirmation-link email.
pub const CONFIRM_SUBJECT: &str = "Confirm your email address";
/// Subject line for the post-confirmation temporary-password email.
pub const WELCOME_SUBJECT: &str = "Account created";

/// Marker preceding the plaintext password in the welcome body.
const PASSWORD_MARKER: &str = "Temporary password: ";

/// Build the confirmation email body around the token link
pub fn confirmation_body(confirm_link: &str) -> String {
    format!(
        "<p>Please confirm your account by clicking the link below:</p>\
         <p><a href=\"{}\">Confirm my email</a></p>\
         <p>If you did not expect this email, you can ignore it.</p>",
        confirm_link
    )
}

/// Build the welcome email body delivering the one-time temporary password
pub fn welcome_body(temporary_password: &str) -> String {
    format!(
        "<p>Thank you for confirming your email.</p>\
         <p>{}{}</p>\
         <p>Please sign in and change this password right away.</p>",
        PASSWORD_MARKER, temporary_password
    )
}

/// Pull the plaintext password back out of a welcome body.
/// Mostly a test hook; the body layout and this parser stay in one place.
pub fn extract_temporary_password(body: &str) -> Option<&str> {
    let start = body.find(PASSWORD_MARKER)? + PASSWORD_MARKER.len();
    let rest = &body[start..];
    let end = rest.find('<').unwrap_or(rest.len());
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_body_embeds_link() {
        let body = confirmation_body("https://example.com/confirm?userid=u1&token=tok-123");
        assert!(body.contains("href=\"https://example.com/confirm?userid=u1&token=tok-123\""));
    }

    #[test]
    fn test_welcome_body_roundtrips_password() {
        let body = welcome_body("Ab3dEf9h");
        assert_eq!(extract_temporary_password(&body), Some("Ab3dEf9h"));
    }

    #[test]
    fn test_extract_on_unrelated_body() {
        assert_eq!(extract_temporary_password("<p>no password here</p>"), None);
    }
}

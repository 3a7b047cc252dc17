use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::ContactError;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Subject prefix so relayed mail is easy to filter.
pub const SUBJECT_PREFIX: &str = "[Site Contact]";

/// The form body as posted. Every field is optional here so a missing
/// field is reported as a validation error, not a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// A validated submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ContactError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ContactError::MissingField(field)),
    }
}

pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(EMAIL_PATTERN).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(email))
}

impl ContactRequest {
    /// Check presence of all fields, then the email format.
    pub fn validate(self) -> Result<ContactMessage, ContactError> {
        let name = required(self.name, "name")?;
        let email = required(self.email, "email")?;
        let subject = required(self.subject, "subject")?;
        let message = required(self.message, "message")?;

        if !is_valid_email(&email) {
            return Err(ContactError::InvalidEmail);
        }

        Ok(ContactMessage {
            name,
            email,
            subject,
            message,
        })
    }
}

/// Escape text for inclusion in HTML element content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

impl ContactMessage {
    pub fn subject_line(&self) -> String {
        format!("{} {}", SUBJECT_PREFIX, self.subject)
    }

    pub fn text_body(&self) -> String {
        format!(
            "New message from the site\n\n\
             Name: {}\n\
             Email: {}\n\
             Subject: {}\n\n\
             Message:\n{}\n\n\
             ---\n\
             Sent through the site contact form\n",
            self.name, self.email, self.subject, self.message
        )
    }

    pub fn html_body(&self) -> String {
        let field = |label: &str, value: &str| {
            format!(
                "<div class=\"field\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>",
                label, value
            )
        };
        let message = escape_html(&self.message).replace('\n', "<br>");

        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<style>\n\
             body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}\n\
             .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}\n\
             .header {{ background: linear-gradient(135deg, #00ff88 0%, #00d4ff 100%); color: white; padding: 20px; border-radius: 10px 10px 0 0; }}\n\
             .content {{ background: #f9f9f9; padding: 30px; border-radius: 0 0 10px 10px; }}\n\
             .field {{ margin-bottom: 20px; }}\n\
             .label {{ font-weight: bold; color: #00d4ff; margin-bottom: 5px; }}\n\
             .value {{ background: white; padding: 10px; border-radius: 5px; border-left: 3px solid #00ff88; }}\n\
             .footer {{ text-align: center; margin-top: 20px; color: #666; font-size: 12px; }}\n\
             </style>\n</head>\n<body>\n<div class=\"container\">\n\
             <div class=\"header\"><h2 style=\"margin: 0;\">New message from the site</h2></div>\n\
             <div class=\"content\">\n{}\n{}\n{}\n{}\n\
             <div class=\"footer\"><p>Sent through the site contact form</p></div>\n\
             </div>\n</div>\n</body>\n</html>\n",
            field("Name:", &escape_html(&self.name)),
            field("Email:", &escape_html(&self.email)),
            field("Subject:", &escape_html(&self.subject)),
            field("Message:", &message),
        )
    }
}

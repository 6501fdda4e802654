use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use reqwest::blocking::Client;
use serde::Serialize;

use crate::config::{EmailConfig, EmailMode};
use crate::errors::{DigestError, DigestResult};

const SENDGRID_API_URL: &str = "https://api.sendgrid.com/v3/mail/send";

#[derive(Debug, Serialize)]
struct SendgridPayload {
    personalizations: Vec<Personalization>,
    from: EmailAddress,
    subject: String,
    content: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Personalization {
    to: Vec<EmailAddress>,
}

#[derive(Debug, Serialize)]
struct EmailAddress {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(rename = "type")]
    content_type: String,
    value: String,
}

enum EmailTransport {
    Sendgrid {
        client: Client,
        url: String,
        api_key: String,
    },
    Smtp(SmtpTransport),
}

/// Sends the digest email over whichever transport the config selects:
/// the SendGrid v3 API or a direct SMTP relay.
pub struct EmailService {
    transport: EmailTransport,
    from_email: String,
    from_name: String,
    recipients: Vec<String>,
}

impl EmailService {
    pub fn new(config: &EmailConfig) -> DigestResult<Self> {
        let transport = match &config.mode {
            EmailMode::Sendgrid { api_key } => EmailTransport::Sendgrid {
                client: Client::builder()
                    .timeout(std::time::Duration::from_secs(15))
                    .build()
                    .unwrap_or_else(|_| Client::new()),
                url: SENDGRID_API_URL.to_string(),
                api_key: api_key.clone(),
            },
            EmailMode::Smtp { host, user, pass } => {
                let mailer = SmtpTransport::relay(host)
                    .map_err(|e| DigestError::Email(format!("invalid SMTP host: {}", e)))?
                    .credentials(Credentials::new(user.clone(), pass.clone()))
                    .build();
                EmailTransport::Smtp(mailer)
            }
        };

        Ok(Self {
            transport,
            from_email: config.from_email.clone(),
            from_name: config.from_name.clone(),
            recipients: config.recipients.clone(),
        })
    }

    pub fn send(&self, subject: &str, html_body: &str) -> DigestResult<()> {
        match &self.transport {
            EmailTransport::Sendgrid {
                client,
                url,
                api_key,
            } => self.send_via_sendgrid(client, url, api_key, subject, html_body),
            EmailTransport::Smtp(mailer) => self.send_via_smtp(mailer, subject, html_body),
        }
    }

    fn send_via_sendgrid(
        &self,
        client: &Client,
        url: &str,
        api_key: &str,
        subject: &str,
        html_body: &str,
    ) -> DigestResult<()> {
        let payload = build_sendgrid_payload(
            &self.from_email,
            &self.from_name,
            &self.recipients,
            subject,
            html_body,
        );

        let response = client
            .post(url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .map_err(|e| DigestError::Email(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(DigestError::Email(format!(
                "sendgrid returned status {}: {}",
                status.as_u16(),
                body
            )));
        }

        Ok(())
    }

    fn send_via_smtp(
        &self,
        mailer: &SmtpTransport,
        subject: &str,
        html_body: &str,
    ) -> DigestResult<()> {
        let from = build_mailbox(&self.from_email, &self.from_name)?;

        let mut builder = Message::builder().from(from).subject(subject);
        for recipient in &self.recipients {
            let to: Mailbox = recipient
                .parse()
                .map_err(|e| DigestError::Email(format!("invalid recipient {}: {}", recipient, e)))?;
            builder = builder.to(to);
        }

        let message = builder
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| DigestError::Email(format!("failed to build message: {}", e)))?;

        mailer
            .send(&message)
            .map_err(|e| DigestError::Email(e.to_string()))?;

        Ok(())
    }
}

fn build_mailbox(email: &str, name: &str) -> DigestResult<Mailbox> {
    let raw = if name.is_empty() {
        email.to_string()
    } else {
        format!("{} <{}>", name, email)
    };
    raw.parse()
        .map_err(|e| DigestError::Email(format!("invalid sender {}: {}", raw, e)))
}

fn build_sendgrid_payload(
    from_email: &str,
    from_name: &str,
    recipients: &[String],
    subject: &str,
    html_body: &str,
) -> SendgridPayload {
    let to: Vec<EmailAddress> = recipients
        .iter()
        .map(|email| EmailAddress {
            email: email.clone(),
            name: None,
        })
        .collect();

    SendgridPayload {
        personalizations: vec![Personalization { to }],
        from: EmailAddress {
            email: from_email.to_string(),
            name: if from_name.is_empty() {
                None
            } else {
                Some(from_name.to_string())
            },
        },
        subject: subject.to_string(),
        content: vec![Content {
            content_type: "text/html".to_string(),
            value: html_body.to_string(),
        }],
    }
}

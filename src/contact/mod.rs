use log::info;
use reqwest::Client as HttpClient;
use serde::Serialize;

use crate::cli::Args;
use crate::error::{ BotError, Result };

/// What the visitor typed into the contact shortcut.
#[derive(Debug, Clone)]
pub struct ContactRequest {
    pub from_name: String,
    pub reply_to: String,
    pub message: String,
}

#[derive(Serialize)]
struct EmailPayload<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

#[derive(Serialize)]
struct TemplateParams<'a> {
    from_name: &'a str,
    reply_to: &'a str,
    message: &'a str,
}

/// Builds the provider payload and hands the message off over HTTP.
/// Delivery, retries and bounces are entirely the provider's problem; this
/// client only reports whether the hand-off itself was accepted.
pub struct ContactMailer {
    http: HttpClient,
    endpoint: String,
    service_id: String,
    template_id: String,
    public_key: String,
}

impl ContactMailer {
    pub fn new(
        endpoint: String,
        service_id: String,
        template_id: String,
        public_key: String
    ) -> Self {
        Self {
            http: HttpClient::new(),
            endpoint,
            service_id,
            template_id,
            public_key,
        }
    }

    /// Returns `None` when the provider identifiers are not configured.
    pub fn from_args(args: &Args) -> Option<Self> {
        if
            args.email_service_id.is_empty() ||
            args.email_template_id.is_empty() ||
            args.email_public_key.is_empty()
        {
            return None;
        }
        Some(
            Self::new(
                args.email_endpoint.clone(),
                args.email_service_id.clone(),
                args.email_template_id.clone(),
                args.email_public_key.clone()
            )
        )
    }

    pub async fn send(&self, request: &ContactRequest) -> Result<()> {
        let payload = EmailPayload {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            template_params: TemplateParams {
                from_name: &request.from_name,
                reply_to: &request.reply_to,
                message: &request.message,
            },
        };

        let response = self.http.post(&self.endpoint).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BotError::ContactStatus(status));
        }
        info!("Contact message handed off for {}", request.reply_to);
        Ok(())
    }
}

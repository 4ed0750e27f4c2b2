use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Conversation Storage Args ---
    /// Conversation store type (file, memory)
    #[arg(long, env = "STORAGE_TYPE", default_value = "file")]
    pub storage_type: String,

    /// Directory the persisted transcript file lives in.
    #[arg(long, env = "STORAGE_DIR", default_value = ".limitless")]
    pub storage_dir: String,

    // --- Topic Table Args ---
    /// Optional path to a JSON topic table overriding the built-in one.
    #[arg(long, env = "TOPICS_PATH")]
    pub topics_path: Option<String>,

    // --- Response Timing Args ---
    /// Skip the simulated typing/thinking delay before bot replies.
    #[arg(long, env = "NO_TYPING", default_value = "false")]
    pub no_typing: bool,

    // --- Contact Email Args ---
    /// EmailJS-compatible endpoint used for the contact hand-off.
    #[arg(
        long,
        env = "EMAIL_ENDPOINT",
        default_value = "https://api.emailjs.com/api/v1.0/email/send"
    )]
    pub email_endpoint: String,

    /// Service identifier passed to the email provider.
    #[arg(long, env = "EMAIL_SERVICE_ID", default_value = "")]
    pub email_service_id: String,

    /// Template identifier passed to the email provider.
    #[arg(long, env = "EMAIL_TEMPLATE_ID", default_value = "")]
    pub email_template_id: String,

    /// Public key passed to the email provider.
    #[arg(long, env = "EMAIL_PUBLIC_KEY", default_value = "")]
    pub email_public_key: String,

    // --- General App Args ---
    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,
}

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use secrecy::ExposeSecret;

use editor_events::adapters::{
    InMemoryMailTransport, LocalFileStorage, ResendConfig, ResendMailTransport,
};
use editor_events::application::configure_editor;
use editor_events::config::AppConfig;
use editor_events::ports::MailTransport;

/// Open a document, optionally edit and save it, and let the configured
/// listeners react to the `open` and `save` events.
#[derive(Parser, Debug)]
#[command(name = "editor-events", version)]
struct Args {
    /// Document to open, relative to the configured storage root
    path: PathBuf,
    /// Save the document after opening it
    #[arg(short, long)]
    save: bool,
    /// Append this line to the document before saving (implies --save)
    #[arg(short, long)]
    append: Option<String>,
}

fn mail_transport(config: &AppConfig) -> anyhow::Result<Arc<dyn MailTransport>> {
    match &config.email.resend_api_key {
        Some(key) if config.email.has_api_key() => {
            let resend = ResendConfig::new(key.expose_secret().clone())
                .with_base_url(config.email.api_base_url.clone());
            Ok(Arc::new(ResendMailTransport::new(resend)?))
        }
        _ => {
            if config.has_email_listeners() {
                tracing::warn!("No Resend API key configured, alert e-mails will only be captured");
            }
            Ok(Arc::new(InMemoryMailTransport::new()))
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    config.logging.init_tracing()?;

    let storage = Arc::new(LocalFileStorage::new(config.storage.root.clone()));
    let transport = mail_transport(&config)?;
    let mut editor = configure_editor(&config, storage, transport);

    editor.open_file(&args.path)?;

    if let Some(line) = &args.append {
        let mut content = editor
            .current_document()
            .map(|d| d.content().to_string())
            .unwrap_or_default();
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        content.push_str(line);
        content.push('\n');
        editor.set_content(content)?;
    }

    if args.save || args.append.is_some() {
        editor.save_file()?;
    }

    Ok(())
}

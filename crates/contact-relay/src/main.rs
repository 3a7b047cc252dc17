use std::sync::Arc;

use anyhow::Result;
use contact_relay::{router, RelayConfig, SmtpMailer, SEND_EMAIL_PATH};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = RelayConfig::from_env()?;
    let mailer = SmtpMailer::from_config(&config)?;
    let app = router(Arc::new(mailer));

    log::info!("contact relay listening on http://{}{}", config.bind_addr, SEND_EMAIL_PATH);
    log::info!("  - delivering to {} via {}", config.contact_to, config.smtp_host);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

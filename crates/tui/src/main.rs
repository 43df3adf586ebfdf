use std::time::Duration;

use wallet_tui::{app, client, config, error::Result, logging, store::Session};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    logging::init(&config)?;
    tracing::info!(base_url = %config.base_url, user_id = %config.user_id, "starting");

    let client = client::Client::new(&config.base_url, config.token.clone())?;
    let session = Session::new(config.user_id.clone());
    let mut app = app::App::new(client, session, Duration::from_secs(config.toast_secs));
    app.run().await?;
    Ok(())
}

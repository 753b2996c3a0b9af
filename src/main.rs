use color_eyre::eyre::Result;
use member_persistence::{
    app,
    utils::{
        config::DatabaseSettings,
        tracing::{init_tracing, log_error_chain},
    },
};
use tracing::Level;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = DatabaseSettings::load()?;
    let member = app::run(&settings)
        .await
        .inspect_err(|e| log_error_chain(e, Level::ERROR))?;
    tracing::info!(member = %serde_json::to_string(&member)?, "Saved member");

    Ok(())
}

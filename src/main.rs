use calorie_tracker::{app, AppState};
use tokio::io::BufReader;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "calorie_tracker=info,sqlx=warn".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    // stdout belongs to the console
    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let state = AppState::init().await?;

    app::run(
        state.clone(),
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await?;

    state.db.close().await;
    Ok(())
}

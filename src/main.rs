mod app;
mod auth;
mod badges;
mod clock;
mod coach;
mod config;
mod error;
mod insights;
mod kv;
mod meals;
mod nudges;
mod state;
mod storage;
#[cfg(test)]
mod test_support;
mod wellness;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "mindbite=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = state::AppState::init().await?;
    tracing::info!(
        data_dir = %app_state.config.data_dir.display(),
        seed_demo_data = app_state.config.seed_demo_data,
        "state ready"
    );

    app::serve(app::build_app(app_state)).await
}

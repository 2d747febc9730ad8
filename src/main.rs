use api_rest::{create_app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ward_core::{
    config::{
        bed_filter_from_env_value, fetch_timeout_from_env_value, session_location_from_env_value,
    },
    CoreConfig, FeatureFlags, WardViewService, DEFAULT_WARD_DATA_DIR,
};

/// Main entry point for the ward view server
///
/// Loads the ward data directory once, then serves the REST API.
///
/// # Environment Variables
/// - `WARD_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `WARD_DATA_DIR`: Directory holding `locations.json` and `admission/` (default: "ward_data")
/// - `WARD_SESSION_LOCATION`: Default session location uuid (default: first known location)
/// - `WARD_FEATURE_FLAGS`: Comma-separated enabled feature flags
/// - `WARD_BED_FILTER`: `retain-all` (default) or `with-bed`
/// - `WARD_FETCH_TIMEOUT_MS`: How long a request waits for admission data (default: 2000)
/// - `WARD_MESSAGES_FILE`: Optional YAML file of message overrides
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ward_run=info".parse()?)
                .add_directive("ward_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("WARD_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = CoreConfig::new(
        std::env::var("WARD_DATA_DIR")
            .unwrap_or_else(|_| DEFAULT_WARD_DATA_DIR.into())
            .into(),
        session_location_from_env_value(std::env::var("WARD_SESSION_LOCATION").ok())?,
        FeatureFlags::from_env_value(std::env::var("WARD_FEATURE_FLAGS").ok()),
        bed_filter_from_env_value(std::env::var("WARD_BED_FILTER").ok())?,
        fetch_timeout_from_env_value(std::env::var("WARD_FETCH_TIMEOUT_MS").ok())?,
        std::env::var_os("WARD_MESSAGES_FILE").map(Into::into),
    )?;
    let service = WardViewService::from_config(&cfg)?;

    tracing::info!(
        data_dir = %cfg.ward_data_dir().display(),
        locations = service.locations().len(),
        bed_filter = cfg.bed_filter().as_str(),
        "++ Ward data loaded"
    );
    tracing::info!("++ Starting ward view REST on {}", rest_addr);

    let app = create_app(AppState::new(service));
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use api_shared::{LocationRes, WardViewRes};
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ward_core::{
    config::session_location_from_env_value, BedFilter, CoreConfig, FeatureFlags, Presentation,
    WardViewService, DEFAULT_FETCH_TIMEOUT_MS, DEFAULT_WARD_DATA_DIR,
};

#[derive(Parser)]
#[command(name = "ward")]
#[command(about = "Ward bed occupancy viewer")]
struct Cli {
    /// Directory holding locations.json and admission/<uuid>.json
    #[arg(long, env = "WARD_DATA_DIR", default_value = DEFAULT_WARD_DATA_DIR)]
    data_dir: PathBuf,
    /// Default session location uuid (first known location when unset)
    #[arg(long, env = "WARD_SESSION_LOCATION")]
    session_location: Option<String>,
    /// Comma-separated enabled feature flags
    #[arg(long, env = "WARD_FEATURE_FLAGS")]
    features: Option<String>,
    /// Bed filter policy: retain-all or with-bed
    #[arg(long, env = "WARD_BED_FILTER")]
    bed_filter: Option<BedFilter>,
    /// Milliseconds to wait for admission data before showing placeholders
    #[arg(long, env = "WARD_FETCH_TIMEOUT_MS", default_value_t = DEFAULT_FETCH_TIMEOUT_MS)]
    fetch_timeout_ms: u64,
    /// YAML file of message overrides
    #[arg(long, env = "WARD_MESSAGES_FILE")]
    messages_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all known locations
    Locations,
    /// Show the ward view of a location
    View {
        /// Location uuid (session location when omitted)
        #[arg(long)]
        location: Option<String>,
        /// Print the JSON served by the REST API instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("ward=warn".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let cfg = CoreConfig::new(
        cli.data_dir,
        session_location_from_env_value(cli.session_location)?,
        FeatureFlags::from_env_value(cli.features),
        cli.bed_filter.unwrap_or_default(),
        Duration::from_millis(cli.fetch_timeout_ms),
        cli.messages_file,
    )?;
    let service = WardViewService::from_config(&cfg)?;
    tracing::debug!(data_dir = %cfg.ward_data_dir().display(), "ward data loaded");

    match cli.command {
        Some(Commands::Locations) => {
            let locations = service.locations();
            if locations.is_empty() {
                println!("No locations found.");
            }
            for location in locations.iter() {
                let location = LocationRes::from(location);
                println!("{}  {}", location.uuid, location.display);
            }
        }
        Some(Commands::View { location, json }) => {
            let presentation = service.render(location, None).await;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&WardViewRes::from(&presentation))?
                );
            } else {
                print!("{}", render_text(&presentation));
            }
        }
        None => {
            println!("Use 'ward --help' for commands");
        }
    }

    Ok(())
}

fn render_text(presentation: &Presentation) -> String {
    let mut out = String::new();

    if let Some(header) = &presentation.header {
        let _ = writeln!(out, "== {header} ==");
    }

    if let Some(notification) = &presentation.notification {
        let _ = write!(out, "[{}] {}", notification.kind.as_str(), notification.title);
        if let Some(subtitle) = &notification.subtitle {
            let _ = write!(out, ": {subtitle}");
        }
        out.push('\n');
    }

    if presentation.placeholders > 0 {
        let _ = writeln!(out, "Loading ({} beds)...", presentation.placeholders);
    }

    for occupancy in &presentation.beds {
        let bed = &occupancy.bed;
        let number = bed.bed_number.as_deref().unwrap_or("-");
        let status = bed.status.map(|s| s.as_str()).unwrap_or("NO BED");
        let patients: Vec<&str> = occupancy
            .patient_infos
            .iter()
            .map(|info| {
                info.patient
                    .display
                    .as_deref()
                    .unwrap_or(info.patient.uuid.as_str())
            })
            .collect();

        if patients.is_empty() {
            let _ = writeln!(out, "{number:>6}  {status}");
        } else {
            let _ = writeln!(out, "{number:>6}  {status}  {}", patients.join(", "));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ward_core::{
        present, AdmissionFetchError, Location, LocationUuid, MessageCatalog, RenderMode,
    };

    fn loc1() -> Location {
        Location::new(LocationUuid::new("loc-1").unwrap(), "Inpatient Ward")
    }

    #[test]
    fn typed_arguments_parse() {
        let cli = Cli::try_parse_from([
            "ward",
            "--bed-filter",
            "with-bed",
            "--fetch-timeout-ms",
            "250",
            "locations",
        ])
        .expect("parse");
        assert_eq!(cli.bed_filter, Some(BedFilter::WithBed));
        assert_eq!(cli.fetch_timeout_ms, 250);

        assert!(Cli::try_parse_from(["ward", "--fetch-timeout-ms", "soon", "locations"]).is_err());
        assert!(Cli::try_parse_from(["ward", "--bed-filter", "sorted", "locations"]).is_err());
    }

    #[test]
    fn hidden_renders_nothing() {
        let p = present(&RenderMode::Hidden, &MessageCatalog::new());
        assert_eq!(render_text(&p), "");
    }

    #[test]
    fn loading_renders_header_and_placeholder_count() {
        let p = present(
            &RenderMode::Loading {
                location: loc1(),
                placeholders: 20,
            },
            &MessageCatalog::new(),
        );
        assert_eq!(render_text(&p), "== Inpatient Ward ==\nLoading (20 beds)...\n");
    }

    #[test]
    fn fetch_error_renders_banner() {
        let p = present(
            &RenderMode::FetchError {
                location: loc1(),
                error: AdmissionFetchError::with_message("network down"),
            },
            &MessageCatalog::new(),
        );
        assert_eq!(
            render_text(&p),
            "== Inpatient Ward ==\n[error] Error loading ward location: network down\n"
        );
    }
}

//! # Stairkit CLI Application
//!
//! Command-line configurator for welded metal staircases. Takes the same
//! parameters as the web form, builds the 3D model locally, rebuilds it from
//! the calculation service's answer when one is configured, and prints the
//! bill of materials.
//!
//! Logging goes to stderr and follows `RUST_LOG` (default `warn`, `-v` for
//! `info`, `-vv` for `debug`).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use stair_core::config::StairConfig;
use stair_core::errors::{StairError, StairResult};
use stair_core::file_io::{save_document, write_atomic, ModelDocument};
use stair_core::materials::{FrameColor, TreadMaterial};
use stair_core::policy::GeometryPolicy;
use stair_core::service::{CalculateRequest, DEFAULT_PAINT_CONSUMPTION};
use stair_core::session::{ApplyOutcome, Session};
use stair_core::validation::{validate_request, ValidationLimits};
use stair_core::{pdf, report, StaircaseSpec};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod client;

use client::ServiceClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Variant {
    Eco,
    Optima,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Limits {
    /// 300-6000 mm width, 100-3400 mm height
    Wide,
    /// 600-2000 mm width, 100-3000 mm height, 150-200 mm step rise
    Narrow,
}

#[derive(Parser, Debug)]
#[command(name = "stair")]
#[command(about = "Parametric metal staircase configurator", long_about = None)]
#[command(version)]
struct Cli {
    /// Staircase width (mm)
    #[arg(long)]
    width: f64,

    /// Total rise (mm)
    #[arg(long)]
    height: f64,

    /// Number of steps
    #[arg(long)]
    steps: u32,

    /// Tread material: ПВЛ, ДПК, ДПК+1 ПВЛ (or pvl, dpk, dpk+1pvl)
    #[arg(long, default_value = "ДПК")]
    material: String,

    /// Add a landing of this depth (mm) as the last step
    #[arg(long)]
    platform_depth: Option<f64>,

    /// Reinforcement column count; derived from width when omitted
    #[arg(long)]
    reinforcements: Option<u32>,

    /// Frame color: RAL9005, RAL8017 or RAL7024
    #[arg(long, default_value = "RAL9005")]
    frame_color: String,

    /// Paint consumption (g/m²)
    #[arg(long, default_value_t = DEFAULT_PAINT_CONSUMPTION)]
    paint_consumption: f64,

    /// Regular step depth (mm) of the local build; a service answer overrides it
    #[arg(long)]
    step_depth: Option<f64>,

    /// Composite board elevation (mm) of the local build; a service answer overrides it
    #[arg(long)]
    board_elevation: Option<f64>,

    /// Builder variant; overrides the policy from --config
    #[arg(long, value_enum)]
    variant: Option<Variant>,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input range preset; overrides the limits from --config
    #[arg(long, value_enum)]
    limits: Option<Limits>,

    /// Calculation service base URL; without one the CLI stays offline
    #[arg(long)]
    service_url: Option<String>,

    /// Write the model document (JSON) here
    #[arg(long)]
    model_json: Option<PathBuf>,

    /// Write the bill of materials PDF here (needs the service)
    #[arg(long)]
    pdf: Option<PathBuf>,

    /// Print the model JSON to stdout
    #[arg(long)]
    json: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file (or defaults) with command-line overrides applied
fn resolve_config(cli: &Cli) -> StairResult<StairConfig> {
    let mut config = match &cli.config {
        Some(path) => StairConfig::load(path)?,
        None => StairConfig::default(),
    };

    if let Some(variant) = cli.variant {
        config.policy = match variant {
            Variant::Eco => GeometryPolicy::eco(),
            Variant::Optima => GeometryPolicy::optima(),
        };
    }
    if let Some(limits) = cli.limits {
        config.limits = match limits {
            Limits::Wide => ValidationLimits::wide(),
            Limits::Narrow => ValidationLimits::narrow(),
        };
    }
    if let Some(url) = &cli.service_url {
        config.service.url = Some(url.clone());
    }

    config.validate()?;
    Ok(config)
}

fn build_request(cli: &Cli) -> StairResult<CalculateRequest> {
    let material = TreadMaterial::from_str_flexible(&cli.material)?;
    let frame_color = FrameColor::from_str_flexible(&cli.frame_color)?;

    let mut request = CalculateRequest::new(cli.width, cli.height, cli.steps, material)
        .with_frame_color(frame_color)
        .with_paint_consumption(cli.paint_consumption);
    if let Some(depth) = cli.platform_depth {
        request = request.with_platform(depth);
    }
    if let Some(count) = cli.reinforcements {
        request = request.with_reinforcements(count);
    }
    Ok(request)
}

async fn run(cli: Cli) -> StairResult<()> {
    let config = resolve_config(&cli)?;
    let request = build_request(&cli)?;
    validate_request(&request, &config.limits)?;
    let request = request.resolved(&config.policy);
    debug!(?request, "form accepted");

    let mut session = Session::new(config.policy);

    let mut spec = StaircaseSpec::from_request(&request);
    if let Some(depth) = cli.step_depth {
        spec = spec.with_step_depth(depth);
    }
    if let Some(elevation) = cli.board_elevation {
        spec = spec.with_board_elevation(elevation);
    }
    session.rebuild(spec)?;

    // The service's echoed dimensions replace the local preview.
    if let Some(url) = &config.service.url {
        let client = ServiceClient::new(url, &config.service)?;
        let ticket = session.begin_submission();
        info!(endpoint = client.endpoint(), ?ticket, "submitting to calculation service");
        let response = client.calculate(&request).await?;
        if let ApplyOutcome::Stale { ticket, current } = session.apply_response(ticket, response)? {
            warn!(?ticket, ?current, "response arrived after a newer one");
        }
    }

    let model = session
        .model()
        .ok_or_else(|| StairError::Internal {
            message: "no model after a successful build".to_string(),
        })?;
    let summary = model.summary();

    if let Some(response) = session.last_response() {
        print!("{}", report::render_text(response));
        println!();
    }
    print!("{}", report::render_summary(&summary));

    if cli.json {
        println!();
        println!("{}", serde_json::to_string_pretty(model)?);
    }

    if let Some(path) = &cli.model_json {
        let spec = session.spec().cloned().ok_or_else(|| StairError::Internal {
            message: "model without a spec".to_string(),
        })?;
        let doc = ModelDocument::new(spec, *session.policy(), model.clone());
        save_document(&doc, path)?;
        info!(path = %path.display(), "model document saved");
    }

    if let Some(path) = &cli.pdf {
        match session.last_response() {
            Some(response) => {
                let bytes = pdf::render_bom_pdf(response, &summary)?;
                write_atomic(path, &bytes)?;
                info!(path = %path.display(), bytes = bytes.len(), "bill of materials saved");
            }
            None => {
                return Err(StairError::invalid_input(
                    "pdf",
                    path.display().to_string(),
                    "The bill of materials needs a calculation service answer (--service-url)",
                ));
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.user_message());
            debug!(code = e.error_code(), error = ?e, "command failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("stair").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_request_from_flags() {
        let cli = parse(&[
            "--width", "1000", "--height", "800", "--steps", "4",
            "--material", "pvl", "--platform-depth", "600", "--frame-color", "ral7024",
        ]);
        let request = build_request(&cli).unwrap();
        assert_eq!(request.material, TreadMaterial::Pvl);
        assert_eq!(request.frame_color, FrameColor::Ral7024);
        assert!(request.has_platform);
        assert_eq!(request.platform_depth, 600.0);
        assert_eq!(request.reinforcements_count, 0);
    }

    #[test]
    fn test_unknown_material_rejected() {
        let cli = parse(&["--width", "1000", "--height", "800", "--steps", "4", "--material", "oak"]);
        assert_eq!(build_request(&cli).unwrap_err().error_code(), "UNKNOWN_MATERIAL");
    }

    #[test]
    fn test_overrides_apply() {
        let cli = parse(&[
            "--width", "1000", "--height", "800", "--steps", "4",
            "--variant", "optima", "--limits", "narrow", "--service-url", "http://localhost:5000",
        ]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.policy, GeometryPolicy::optima());
        assert_eq!(config.limits, ValidationLimits::narrow());
        assert_eq!(config.service.url.as_deref(), Some("http://localhost:5000"));
    }
}

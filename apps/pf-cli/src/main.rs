use clap::{Parser, Subcommand};
use pf_catalog::{CatalogQuery, CatalogStore};
use pf_core::{celsius, kg_m3, m, m3h, mm, pa_s};
use pf_hydraulics::{
    Fitting, FluidProperties, NominalSize, NpshAvailableModel, SegmentInput, SystemCurve,
    SystemCurveBuilder,
};
use pf_match::{CatalogMatcher, MatchOutcome, per_pump_curve};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "pf-cli")]
#[command(about = "Pumpflow CLI - centrifugal pump selection tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the system curve and match it against the pump catalog
    Select {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
    },
    /// Print the fitted system curve and design-point summary
    SystemCurve {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
    },
    /// Load and validate a catalog file
    Validate {
        /// Path to the catalog JSON file
        catalog_path: PathBuf,
    },
}

#[derive(Debug, Deserialize)]
struct Scenario {
    fluid: FluidSpec,
    /// Absolute pipe roughness, mm
    roughness_mm: f64,
    /// Total design flow, m³/h
    target_flow_m3h: f64,
    #[serde(default = "default_pumps")]
    pumps_in_parallel: u32,
    catalog: PathBuf,
    suction: SideSpec,
    discharge: SideSpec,
}

fn default_pumps() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
struct FluidSpec {
    /// Dynamic viscosity, mPa·s (cP)
    viscosity_mpa_s: f64,
    density_kg_m3: f64,
    temperature_c: f64,
}

#[derive(Debug, Deserialize)]
struct SideSpec {
    length_m: f64,
    /// Signed; positive = rise in the flow direction
    elevation_m: f64,
    /// Nominal size label, e.g. `50 (2")`
    size: String,
    #[serde(default)]
    fittings: BTreeMap<Fitting, u32>,
}

impl SideSpec {
    fn segment_input(&self) -> SegmentInput {
        SegmentInput {
            length: m(self.length_m),
            elevation: m(self.elevation_m),
            fittings: self.fittings.iter().map(|(&f, &q)| (f, q)).collect(),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Select { scenario_path } => run_select(&scenario_path),
        Commands::SystemCurve { scenario_path } => run_system_curve(&scenario_path),
        Commands::Validate { catalog_path } => run_validate(&catalog_path),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn load_scenario(path: &Path) -> CliResult<Scenario> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

fn build_curve(scenario: &Scenario) -> CliResult<(SystemCurve, FluidProperties)> {
    let fluid = FluidProperties::new(
        pa_s(scenario.fluid.viscosity_mpa_s / 1000.0),
        kg_m3(scenario.fluid.density_kg_m3),
        celsius(scenario.fluid.temperature_c),
    )?;

    let builder = SystemCurveBuilder::default();
    let curve = builder.build(
        &scenario.suction.segment_input(),
        NominalSize::from_label(&scenario.suction.size)?,
        &scenario.discharge.segment_input(),
        NominalSize::from_label(&scenario.discharge.size)?,
        m3h(scenario.target_flow_m3h),
        &fluid,
        mm(scenario.roughness_mm),
    )?;
    Ok((curve, fluid))
}

fn run_system_curve(path: &Path) -> CliResult<()> {
    let scenario = load_scenario(path)?;
    let (curve, fluid) = build_curve(&scenario)?;

    println!("System curve (head m vs flow m³/h, degree 5, highest first):");
    for c in curve.coeffs().coeffs() {
        println!("  {c:+.6e}");
    }
    println!("Flow domain: 0 .. {:.2} m³/h", curve.max_flow_m3h());
    println!(
        "Head loss at design flow ({:.2} m³/h): {:.2} m",
        curve.design_flow_m3h(),
        curve.head_at(curve.design_flow_m3h())
    );

    let npsh = NpshAvailableModel::default().available_at_design(
        -curve.suction_static_head_m(),
        curve.suction_friction_loss_m(),
        &fluid,
    );
    println!("NPSH available at design flow: {npsh:.2} m");
    Ok(())
}

fn run_select(path: &Path) -> CliResult<()> {
    let scenario = load_scenario(path)?;
    let (curve, fluid) = build_curve(&scenario)?;

    let catalog_path = resolve_relative(path, &scenario.catalog);
    let store = CatalogStore::open(&catalog_path)?;

    let n = scenario.pumps_in_parallel;
    let per_pump = per_pump_curve(&curve, n)?;
    let target_per_pump = scenario.target_flow_m3h / f64::from(n);

    let outcome = CatalogMatcher::default().match_pumps(
        &per_pump,
        &curve,
        &fluid,
        target_per_pump,
        &store,
    )?;

    match outcome {
        MatchOutcome::NoCandidates => {
            println!(
                "No catalog pump covers {:.2} m³/h per pump in its efficiency window.",
                target_per_pump
            );
        }
        MatchOutcome::NoSafeIntersection => {
            println!(
                "Candidates exist, but none intersects the system curve with an NPSH margin."
            );
        }
        MatchOutcome::Matches(points) => {
            println!(
                "{} feasible pump(s) for {:.2} m³/h per pump ({} in parallel):",
                points.len(),
                target_per_pump,
                n
            );
            println!(
                "{:<10} {:<18} {:>8} {:>8} {:>7} {:>7} {:>7} {:>8}",
                "Brand", "Model", "Q m³/h", "Head m", "Eff %", "NPSHr", "kW", "Margin m"
            );
            for p in &points {
                println!(
                    "{:<10} {:<18} {:>8.2} {:>8.2} {:>7.1} {:>7.2} {:>7.2} {:>8.2}",
                    p.brand,
                    p.model,
                    p.flow_m3h,
                    p.head_m,
                    p.efficiency_pct,
                    p.npshr_m,
                    p.power_kw,
                    p.npsh_margin_m
                );
            }
        }
    }
    Ok(())
}

fn run_validate(path: &Path) -> CliResult<()> {
    let store = CatalogStore::open(path)?;
    println!("Catalog OK: {} record(s)", store.len());
    for record in store.records() {
        println!(
            "  {} {} ({} rpm, {:.0} mm, window {:.1}..{:.1} m³/h)",
            record.brand,
            record.model,
            record.speed_rpm,
            record.impeller_diameter_mm,
            record.bep_window_min_m3h,
            record.bep_window_max_m3h
        );
    }
    // Exercise the query path once so an empty-window catalog is visible early
    if !store.is_empty() {
        let probe = store.records()[0].bep_flow_m3h;
        let hits = store.candidates_for(probe);
        tracing::debug!(probe, hits = hits.len(), "query smoke check");
    }
    Ok(())
}

/// Catalog paths inside a scenario are resolved against the scenario file.
fn resolve_relative(scenario_path: &Path, catalog: &Path) -> PathBuf {
    if catalog.is_absolute() {
        catalog.to_path_buf()
    } else {
        scenario_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(catalog)
    }
}

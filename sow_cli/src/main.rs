//! # SowGen CLI Application
//!
//! Terminal front end for SOW generation. Reads a takeoff JSON file when a
//! path is given, otherwise prompts for a minimal takeoff interactively,
//! then runs the full pipeline and prints the report.
//!
//! ```text
//! sowgen path/to/takeoff.json
//! sowgen                        # interactive demo
//! ```

use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use sow_core::pipeline::{SowPipeline, WorkflowReport, WorkflowStatus};
use sow_core::takeoff::TakeoffData;

fn prompt_string(prompt: &str, default: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default.to_string();
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    prompt_string(prompt, &default.to_string())
        .parse()
        .unwrap_or(default)
}

fn interactive_takeoff() -> TakeoffData {
    println!("No takeoff file given - building one interactively.");
    println!();

    TakeoffData {
        project_name: prompt_string("Project name [Demo Warehouse]: ", "Demo Warehouse"),
        address: prompt_string(
            "Address [100 Industrial Way, Tampa, FL]: ",
            "100 Industrial Way, Tampa, FL",
        ),
        roof_area: prompt_f64("Roof area (sqft) [41300]: ", 41300.0),
        building_height: Some(prompt_f64("Building height (ft) [42]: ", 42.0)),
        county: Some(prompt_string("County [Hillsborough]: ", "Hillsborough")),
        state: Some(prompt_string("State [FL]: ", "FL")),
        ..Default::default()
    }
}

fn load_takeoff(path: &str) -> Result<TakeoffData, String> {
    let contents =
        fs::read_to_string(path).map_err(|e| format!("cannot read '{}': {}", path, e))?;
    serde_json::from_str(&contents).map_err(|e| format!("invalid takeoff JSON in '{}': {}", path, e))
}

fn print_report(report: &WorkflowReport) {
    println!("═══════════════════════════════════════");
    println!("  SOW GENERATION RESULTS");
    println!("═══════════════════════════════════════");
    println!();
    println!("Workflow: {}  Status: {:?}", report.workflow_id, report.status);
    println!("Project:  {}", report.takeoff.project_name);
    println!();

    if let Some(resolved) = &report.jurisdiction {
        let r = &resolved.record;
        println!("Jurisdiction:");
        println!("  {} County, {} - {}", r.county, r.state, r.code_cycle);
        println!(
            "  ASCE {}  V = {:.0} mph  HVHZ: {}",
            r.asce_version.code(),
            r.basic_wind_speed,
            if r.hvhz { "yes" } else { "no" }
        );
        println!();
    }

    if let Some(wind) = &report.wind {
        let z = &wind.zone_pressures;
        println!("Wind Uplift (qh = {:.1} psf):", wind.velocity_pressure_psf);
        println!("  Zone 1' field:     {:>7.1} psf", z.zone1_field);
        println!("  Zone 1 perimeter:  {:>7.1} psf", z.zone1_perimeter);
        println!("  Zone 2 perimeter:  {:>7.1} psf", z.zone2_perimeter);
        println!("  Zone 3 corner:     {:>7.1} psf", z.zone3_corner);
        println!();
    }

    if let Some(geometry) = &report.geometry {
        let b = &geometry.building;
        let z = &geometry.zones;
        println!("Zone Geometry (est. {:.0}' x {:.0}'):", b.length_ft, b.width_ft);
        println!(
            "  corner a = {:.1} ft  perimeter = {:.1} ft",
            z.corner_dimension_ft, z.perimeter_width_ft
        );
        println!(
            "  field {:.0}% / perimeter {:.0}% / corner {:.0}%",
            z.field_percent, z.perimeter_percent, z.corner_percent
        );
        println!();
    }

    if let Some(template) = &report.template {
        println!(
            "Template: {} ({:?} confidence)",
            template.template_name, template.confidence
        );
        println!("  {}", template.description);
        println!();
    }

    if let Some(sections) = &report.sections {
        println!("Sections ({}):", sections.reasoning);
        for section in &sections.included {
            println!("  [x] {}", section.title);
        }
        for section in &sections.excluded {
            println!("  [ ] {} - {}", section.title, section.rationale);
        }
        println!();
    }

    if !report.validation.errors.is_empty() {
        println!("Validation errors:");
        for error in &report.validation.errors {
            println!("  ! {}", error);
        }
        println!();
    }

    if !report.warnings.is_empty() {
        println!("Warnings:");
        for warning in &report.warnings {
            println!("  * {}", warning);
        }
        println!();
    }

    println!("═══════════════════════════════════════");
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    println!("SowGen CLI - Commercial Roofing SOW Generator");
    println!("=============================================");
    println!();

    let takeoff = match env::args().nth(1) {
        Some(path) => match load_takeoff(&path) {
            Ok(takeoff) => takeoff,
            Err(message) => {
                eprintln!("Error: {}", message);
                return ExitCode::FAILURE;
            }
        },
        None => interactive_takeoff(),
    };

    let mut pipeline = SowPipeline::new();
    let report = pipeline.run(takeoff);

    println!();
    print_report(&report);

    if let Some(summary) = &report.summary {
        println!();
        println!("JSON Output (for LLM/API use):");
        if let Ok(json) = serde_json::to_string_pretty(summary) {
            println!("{}", json);
        }
    }

    match report.status {
        WorkflowStatus::Success => ExitCode::SUCCESS,
        WorkflowStatus::ValidationFailed | WorkflowStatus::Error => ExitCode::FAILURE,
    }
}

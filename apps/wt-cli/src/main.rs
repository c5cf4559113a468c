use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wt_app::{
    AppError, AppResult, CompensateRequest, SweepResponse, TuneProgressEvent,
    project_service, sweep_service, tune_service,
};
use wt_project::schema::SweepDef;
use wt_solver::ThinWireSolver;
use wt_sweep::{CutKind, PatternCut};

#[derive(Parser)]
#[command(name = "wt-cli")]
#[command(about = "WireTune CLI - wire antenna sweeps and radius compensation", long_about = None)]
struct Cli {
    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project YAML/JSON file
        project_path: PathBuf,
    },
    /// Sweep a frequency range
    Sweep {
        /// Path to the project YAML/JSON file
        project_path: PathBuf,
        /// Start frequency in MHz (defaults to the project's sweep section)
        #[arg(long, requires_all = ["end", "step"])]
        start: Option<f64>,
        /// End frequency in MHz
        #[arg(long, requires = "start")]
        end: Option<f64>,
        /// Step in MHz; 0 evaluates the start frequency only
        #[arg(long, requires = "start")]
        step: Option<f64>,
        /// Evaluate frequencies in parallel
        #[arg(long)]
        parallel: bool,
    },
    /// Characteristics at the design frequency
    Characteristics {
        /// Path to the project YAML/JSON file
        project_path: PathBuf,
    },
    /// Change a wire radius and rescale the affected wires to compensate
    Compensate {
        /// Path to the project YAML/JSON file
        project_path: PathBuf,
        /// Radius of the wires to change, meters
        #[arg(long)]
        from_radius: f64,
        /// New radius, meters
        #[arg(long)]
        to_radius: f64,
        /// Write the compensated project here (not saved when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Radiation pattern cut at the design frequency
    Pattern {
        /// Path to the project YAML/JSON file
        project_path: PathBuf,
        /// Vertical cut instead of horizontal
        #[arg(long)]
        vertical: bool,
        /// Elevation (horizontal cut) or azimuth (vertical cut), degrees
        #[arg(long, default_value_t = 0.0)]
        angle: f64,
    },
    /// Scale the geometry to a new design frequency
    RescaleFrequency {
        /// Path to the project YAML/JSON file
        project_path: PathBuf,
        /// New design frequency in MHz
        #[arg(long)]
        to_mhz: f64,
        /// Output project file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Sweep {
            project_path,
            start,
            end,
            step,
            parallel,
        } => {
            let range = match (start, end, step) {
                (Some(start_mhz), Some(end_mhz), Some(step_mhz)) => Some(SweepDef {
                    start_mhz,
                    end_mhz,
                    step_mhz,
                    parallel,
                }),
                _ => None,
            };
            cmd_sweep(&project_path, range, parallel, json)
        }
        Commands::Characteristics { project_path } => cmd_characteristics(&project_path, json),
        Commands::Compensate {
            project_path,
            from_radius,
            to_radius,
            output,
        } => cmd_compensate(
            &project_path,
            CompensateRequest {
                from_radius,
                to_radius,
            },
            output.as_deref(),
            json,
        ),
        Commands::Pattern {
            project_path,
            vertical,
            angle,
        } => {
            let kind = if vertical {
                CutKind::Vertical
            } else {
                CutKind::Horizontal
            };
            cmd_pattern(&project_path, kind, angle, json)
        }
        Commands::RescaleFrequency {
            project_path,
            to_mhz,
            output,
        } => cmd_rescale_frequency(&project_path, to_mhz, &output),
    }
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let text =
        serde_json::to_string_pretty(value).map_err(|e| AppError::Serialization(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    let summary = project_service::summarize(&project);
    println!("✓ Project is valid");
    println!(
        "  {} @ {} MHz: {} wires, {} loads, {} excitations",
        summary.name,
        summary.design_frequency_mhz,
        summary.wire_count,
        summary.load_count,
        summary.excitation_count
    );
    let radii: Vec<String> = summary.radii.iter().map(|r| format!("{r}")).collect();
    println!("  Radii: {}", radii.join(", "));
    Ok(())
}

fn cmd_sweep(
    project_path: &Path,
    range: Option<SweepDef>,
    parallel: bool,
    json: bool,
) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let solver = ThinWireSolver::new();
    let range = range.or_else(|| {
        project.sweep.clone().map(|mut s| {
            s.parallel |= parallel;
            s
        })
    });
    let response = sweep_service::sweep(&solver, &project, range.as_ref())?;
    if json {
        return print_json(&response);
    }
    print_characteristics(&response);
    Ok(())
}

fn cmd_characteristics(project_path: &Path, json: bool) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let solver = ThinWireSolver::new();
    let response = sweep_service::characteristics(&solver, &project)?;
    if json {
        return print_json(&response);
    }
    print_characteristics(&response);
    Ok(())
}

fn print_characteristics(response: &SweepResponse) {
    let ch = &response.characteristics;
    println!(
        "{} ({} points, solver {}, {:.3}s)",
        response.project_name,
        ch.len(),
        response.solver,
        response.elapsed_s
    );
    println!(
        "  {:>10}  {:>22}  {:>8}  {:>8}  {:>8}  {:>8}",
        "MHz", "Z (ohm)", "RL dB", "VSWR", "Gain dBi", "F/B dB"
    );
    let fmt_opt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{:.3}", v));
    for i in 0..ch.len() {
        let z = ch.impedances()[i];
        println!(
            "  {:>10.4}  {:>22}  {:>8}  {:>8}  {:>8.3}  {:>8.3}",
            ch.frequencies()[i],
            format!("{:.2}{:+.2}j", z.re, z.im),
            fmt_opt(ch.return_losses()[i]),
            fmt_opt(ch.vswrs()[i]),
            ch.gains()[i],
            ch.front_back_ratios()[i]
        );
    }
    match ch.peak() {
        Some(peak) => println!(
            "✓ Best match: {:.3} dB return loss at {:.4} MHz{}",
            peak.value,
            peak.frequency,
            if peak.interpolated { " (interpolated)" } else { "" }
        ),
        None => println!("No valid samples; no resonance estimate"),
    }
}

fn cmd_compensate(
    project_path: &Path,
    request: CompensateRequest,
    output: Option<&Path>,
    json: bool,
) -> AppResult<()> {
    let mut project = project_service::load_project(project_path)?;
    let solver = ThinWireSolver::new();
    if !json {
        println!(
            "Compensating radius {} -> {} in {}",
            request.from_radius,
            request.to_radius,
            project_path.display()
        );
    }

    let mut last_emit = Instant::now();
    let mut last_stage = None;
    let response = tune_service::compensate(
        &solver,
        &mut project,
        request,
        Some(&mut |event: TuneProgressEvent| {
            if json {
                return;
            }
            let emit_now =
                last_stage != Some(event.stage) || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&event);
                last_stage = Some(event.stage);
                last_emit = Instant::now();
            }
        }),
    )?;

    if let Some(path) = output {
        project_service::save_project(path, &project)?;
        info!(path = %path.display(), "compensated project saved");
    }
    if json {
        return print_json(&response);
    }
    clear_progress_line();

    for r in &response.reports {
        println!(
            "✓ Wire {} (tag {}): scale {:.6}, objective {:.4} (from {:.4}), {} evaluations{}",
            r.wire_index,
            r.tag,
            r.scale,
            r.objective,
            r.initial_objective,
            r.evaluations,
            if r.converged { "" } else { ", not converged" }
        );
    }
    println!("  Elapsed: {:.2}s", response.elapsed_s);
    if let Some(path) = output {
        println!("✓ Saved: {}", path.display());
    }
    Ok(())
}

fn cmd_pattern(project_path: &Path, kind: CutKind, angle: f64, json: bool) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let solver = ThinWireSolver::new();
    let cut = sweep_service::pattern(&solver, &project, kind, angle)?;
    if json {
        return print_json(&cut);
    }
    print_cut(&cut);
    Ok(())
}

fn print_cut(cut: &PatternCut) {
    let axis = match cut.kind {
        CutKind::Horizontal => "Azimuth",
        CutKind::Vertical => "Elevation",
    };
    println!("{:?} cut at {} MHz", cut.kind, cut.frequency_mhz);
    println!("  {:>9}  {:>9}", axis, "Gain dBi");
    for (a, g) in cut.angles_deg.iter().zip(&cut.gains_db) {
        println!("  {:>9.1}  {:>9.2}", a, g);
    }
    if let Some((gain, angle)) = cut.max_gain() {
        println!("✓ Max gain {:.2} dBi at {:.1}°", gain, angle);
    }
}

fn cmd_rescale_frequency(project_path: &Path, to_mhz: f64, output: &Path) -> AppResult<()> {
    let mut project = project_service::load_project(project_path)?;
    let from_mhz = project.design_frequency_mhz;
    tune_service::rescale_frequency(&mut project, to_mhz)?;
    project_service::save_project(output, &project)?;
    println!(
        "✓ Rescaled {} MHz -> {} MHz, saved: {}",
        from_mhz,
        to_mhz,
        output.display()
    );
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(120));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &TuneProgressEvent) {
    let spinner = ['|', '/', '-', '\\'];
    let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
    let mut line = format!(
        "\r{} {}  elapsed={:.2}s",
        spinner[spin_idx],
        event.stage.label(),
        event.elapsed_wall_s
    );
    if let Some(t) = &event.trial {
        line.push_str(&format!(
            "  wire={}  eval={}  scale={:.6}  objective={:.4}",
            t.wire_index, t.evaluation, t.scale, t.objective
        ));
    } else if let Some(msg) = &event.message {
        line.push_str(&format!("  {}", msg));
    }
    print!("{}", line);
    let _ = io::stdout().flush();
}

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use bem_app::{AppError, AppResult, PassReport, pass_service, scene_service};

#[derive(Parser)]
#[command(name = "bem-cli")]
#[command(about = "Broadcast, default and validate surface attributes of a building scene", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate scene file syntax and structure
    Check {
        /// Path to the scene YAML or JSON file
        scene_path: PathBuf,
    },
    /// List surfaces of a scene
    Surfaces {
        /// Path to the scene YAML or JSON file
        scene_path: PathBuf,
    },
    /// Mount one PV generator on each requested surface
    AttachPv {
        /// Path to the scene YAML or JSON file
        scene_path: PathBuf,
        /// Path to the PV request file
        request_path: PathBuf,
        /// Write the resulting surfaces to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Apply names, types, boundary conditions, constructions and materials
    AssignSurfaces {
        /// Path to the scene YAML or JSON file
        scene_path: PathBuf,
        /// Path to the surface request file
        request_path: PathBuf,
        /// Write the resulting surfaces to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { scene_path } => cmd_check(&scene_path),
        Commands::Surfaces { scene_path } => cmd_surfaces(&scene_path),
        Commands::AttachPv {
            scene_path,
            request_path,
            output,
        } => cmd_attach_pv(&scene_path, &request_path, output.as_deref()),
        Commands::AssignSurfaces {
            scene_path,
            request_path,
            output,
        } => cmd_assign_surfaces(&scene_path, &request_path, output.as_deref()),
    }
}

fn cmd_check(scene_path: &Path) -> AppResult<()> {
    println!("Checking scene: {}", scene_path.display());
    let scene = scene_service::load_scene(scene_path)?;
    scene_service::validate_scene(&scene)?;
    println!(
        "✓ Scene is valid ({} surfaces, {} inverters)",
        scene.surfaces.len(),
        scene.inverters.len()
    );
    Ok(())
}

fn cmd_surfaces(scene_path: &Path) -> AppResult<()> {
    let hive = scene_service::build_hive(scene_service::load_scene(scene_path)?)?;
    print_yaml(&scene_service::list_surfaces(&hive))
}

fn cmd_attach_pv(scene_path: &Path, request_path: &Path, output: Option<&Path>) -> AppResult<()> {
    let mut hive = scene_service::build_hive(scene_service::load_scene(scene_path)?)?;
    let request = pass_service::load_pv_request(request_path)?;
    let report = pass_service::attach_pv(&mut hive, &request)?;
    finish(&hive, &report, output)
}

fn cmd_assign_surfaces(
    scene_path: &Path,
    request_path: &Path,
    output: Option<&Path>,
) -> AppResult<()> {
    let mut hive = scene_service::build_hive(scene_service::load_scene(scene_path)?)?;
    let request = pass_service::load_surface_request(request_path)?;
    let report = pass_service::assign_surfaces(&mut hive, &request)?;
    finish(&hive, &report, output)
}

fn finish(hive: &bem_app::Hive, report: &PassReport, output: Option<&Path>) -> AppResult<()> {
    print_yaml(report)?;
    if let Some(path) = output {
        scene_service::save_surfaces(path, hive)?;
        println!("✓ Surfaces written to {}", path.display());
    }
    if report.warning_count() > 0 {
        tracing::warn!(warnings = report.warning_count(), "pass finished with warnings");
    }
    Ok(())
}

fn print_yaml<T: Serialize>(value: &T) -> AppResult<()> {
    let text = serde_yaml::to_string(value).map_err(|e| AppError::Output(e.to_string()))?;
    print!("{text}");
    Ok(())
}

//! Rhombus-Plotter CLI.
//!
//! Dünne Hülle um die Library: Live-Probe einzelner Punkte, Batch-Slicing
//! von SVG-Dateien zu Step-Tables und Dekodieren vorhandener Tabellen.

use anyhow::Result;
use clap::{Parser, Subcommand};
use glam::DVec2;
use rhombus_plotter::app;
use rhombus_plotter::{PlotterOptions, StepCommand, TableFormat, UnreachablePolicy};
use std::io::Write;
use std::path::PathBuf;

/// Kinematik und Step-Table-Slicer für den Rhombus-Arm-Plotter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Optionen-Datei (Standard: rhombus_plotter.toml neben der Binary)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug-Ausgaben aktivieren
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Kinematik für einen einzelnen Punkt berechnen
    Probe {
        #[arg(allow_hyphen_values = true)]
        x: f64,
        #[arg(allow_hyphen_values = true)]
        y: f64,
    },
    /// SVG-Datei in eine Step-Table umwandeln
    Slice {
        /// Eingabe-SVG
        input: PathBuf,
        /// Ausgabedatei (Standard: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Tabellenformat: text, binary, json
        #[arg(short, long)]
        format: Option<TableFormat>,
        /// Umgang mit nicht zeichenbaren Punkten: lift_and_skip, clamp
        #[arg(short, long)]
        policy: Option<UnreachablePolicy>,
    },
    /// Step-Table-Datei dekodieren und Befehle ausgeben
    Decode {
        input: PathBuf,
        /// Tabellenformat: text, binary, json
        #[arg(short, long)]
        format: Option<TableFormat>,
    },
    /// Vorlage der Optionen-Datei schreiben
    InitConfig {
        /// Zielpfad (Standard: --config bzw. neben der Binary)
        path: Option<PathBuf>,
    },
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    log::debug!("Rhombus-Plotter v{} startet...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(args) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config_path = args.config.unwrap_or_else(PlotterOptions::config_path);

    match args.command {
        Command::InitConfig { path } => {
            let target = path.unwrap_or(config_path);
            PlotterOptions::template().save_to_file(&target)
        }
        Command::Probe { x, y } => {
            let options = PlotterOptions::load_from_file(&config_path);
            let arm = options.arm_config()?;
            let report = app::probe(DVec2::new(x, y), &arm);
            println!("{report}");
            Ok(())
        }
        Command::Slice {
            input,
            output,
            format,
            policy,
        } => {
            let mut options = PlotterOptions::load_from_file(&config_path);
            if let Some(policy) = policy {
                options.policy = policy;
            }
            let format = format.unwrap_or(options.output);

            let report = app::slice_svg_file(&input, &options)?;
            match output {
                Some(file) => app::write_table_file(&report.table, format, &file),
                None => {
                    let bytes = format.render(&report.table)?;
                    std::io::stdout().lock().write_all(&bytes)?;
                    Ok(())
                }
            }
        }
        Command::Decode { input, format } => {
            let options = PlotterOptions::load_from_file(&config_path);
            let commands = app::read_table_file(&input, format.unwrap_or(options.output))?;
            let mut out = std::io::stdout().lock();
            for (index, command) in commands.iter().enumerate() {
                match command {
                    StepCommand::Actuate { step_a, step_b } => {
                        writeln!(out, "{index:>6}  A {step_a:>6}  B {step_b:>6}")?
                    }
                    StepCommand::PenLift => writeln!(out, "{index:>6}  PEN UP")?,
                }
            }
            Ok(())
        }
    }
}

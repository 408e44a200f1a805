//! landscape-gen - Blender landscape script generator
//!
//! Prints generated Blender Python scripts to stdout (or writes them with
//! `--output`). Run without a command to dump the preset tables to
//! `landscape_templates.json`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use landscape_gen::generators::{batch, export, landscape, material, scatter};
use landscape_gen::{BatchOptions, Catalog, ExportFormat};

#[derive(Parser)]
#[command(name = "landscape-gen")]
#[command(about = "Generate Blender Python scripts for procedural landscapes")]
#[command(version)]
struct Cli {
    /// Preset catalog JSON (same layout as landscape_templates.json)
    #[arg(long, global = true)]
    templates: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write both preset tables to a JSON file
    SaveTemplates {
        /// Output path
        #[arg(short, long, default_value = landscape_gen::TEMPLATES_FILE)]
        output: PathBuf,
    },

    /// List available presets
    List,

    /// Generate a landscape script
    Landscape {
        /// Terrain preset key
        #[arg(short, long)]
        template: String,

        /// Noise seed (0 picks a random one)
        #[arg(short, long, default_value_t = 0)]
        seed: u32,

        /// Fail instead of using the default preset for an unknown key
        #[arg(long)]
        strict: bool,

        /// Write the script here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate an export script
    Export {
        /// Destination file path (inside Blender)
        #[arg(short, long)]
        path: String,

        /// glb, obj or fbx
        #[arg(short, long, default_value = "glb")]
        format: String,

        /// Object to export
        #[arg(long, default_value = landscape_gen::DEFAULT_EXPORT_OBJECT)]
        object: String,

        /// Write the script here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a script that builds and exports several variations
    Batch {
        /// Terrain preset key
        #[arg(short, long)]
        template: String,

        /// Number of variations
        #[arg(short, long, default_value_t = landscape_gen::DEFAULT_BATCH_COUNT)]
        count: u32,

        /// Export directory (inside Blender)
        #[arg(short, long, default_value = landscape_gen::DEFAULT_EXPORT_DIR)]
        export_dir: String,

        /// glb, obj or fbx
        #[arg(short, long, default_value = "glb")]
        format: String,

        /// Write the script here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a scatter script
    Scatter {
        /// Scatter preset key
        #[arg(short, long)]
        preset: String,

        /// Object to scatter over
        #[arg(long, default_value = landscape_gen::DEFAULT_EXPORT_OBJECT)]
        target: String,

        /// Distribution seed (0 picks a random one)
        #[arg(short, long, default_value_t = 0)]
        seed: u32,

        /// Write the script here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a height-tinted material script
    Material {
        /// Terrain preset key
        #[arg(short, long)]
        template: String,

        /// Fail instead of using the default preset for an unknown key
        #[arg(long)]
        strict: bool,

        /// Write the script here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the generated script
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let loaded;
    let catalog = match &cli.templates {
        Some(path) => {
            loaded = Catalog::load(path)
                .with_context(|| format!("Failed to load presets from {}", path.display()))?;
            &loaded
        }
        None => Catalog::builtin(),
    };

    let command = cli.command.unwrap_or(Commands::SaveTemplates {
        output: PathBuf::from(landscape_gen::TEMPLATES_FILE),
    });

    match command {
        Commands::SaveTemplates { output } => {
            catalog
                .save(&output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::info!("Templates saved to {}", output.display());
        }

        Commands::List => {
            println!("Terrain presets:");
            for (key, preset) in catalog.landscapes().iter() {
                println!(
                    "  {:18} {} ({}) - {}",
                    key, preset.name, preset.params.noise_type, preset.description
                );
            }
            println!("Scatter presets:");
            for (key, preset) in catalog.scatter().iter() {
                println!(
                    "  {:18} {} (density {}, scale {}-{})",
                    key, preset.name, preset.density, preset.scale_min, preset.scale_max
                );
            }
        }

        Commands::Landscape {
            template,
            seed,
            strict,
            output,
        } => {
            let script = if strict {
                landscape::try_landscape_code(catalog, &template, seed)?
            } else {
                landscape::landscape_code(catalog, &template, seed)
            };
            emit(&script, output.as_deref())?;
        }

        Commands::Export {
            path,
            format,
            object,
            output,
        } => {
            let format: ExportFormat = format.parse()?;
            let script = export::export_script(&object, &path, format);
            emit(&script, output.as_deref())?;
        }

        Commands::Batch {
            template,
            count,
            export_dir,
            format,
            output,
        } => {
            let options = BatchOptions::new(template)
                .with_count(count)
                .with_export_dir(export_dir)
                .with_format(format.parse()?);
            let script = batch::batch_script(catalog, &options);
            emit(&script, output.as_deref())?;
        }

        Commands::Scatter {
            preset,
            target,
            seed,
            output,
        } => {
            let script = scatter::scatter_code(catalog, &preset, &target, seed)?;
            emit(&script, output.as_deref())?;
        }

        Commands::Material {
            template,
            strict,
            output,
        } => {
            let script = if strict {
                material::try_material_code(catalog, &template)?
            } else {
                material::material_code(catalog, &template)
            };
            emit(&script, output.as_deref())?;
        }
    }

    Ok(())
}

/// Print the script, or write it to `output` when given.
fn emit(script: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", script))
                .with_context(|| format!("Failed to write script to {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => println!("{}", script),
    }
    Ok(())
}

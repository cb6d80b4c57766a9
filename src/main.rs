use clap::{Parser, Subcommand};
use cropkit::config::CropConfig;
use cropkit::cropping::{self, Dimensions, Rect};
use cropkit::pipeline::{CropPipeline, ExportSettings};
use cropkit::profile::{AspectProfile, ImageRole};
use cropkit::raster::PixelSurface;
use cropkit::store::PersistedStore;
use cropkit::{loader, output};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let hash = env!("GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup — trivial, called exactly once
        Box::leak(format!("{}+{hash}", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "cropkit")]
#[command(about = "Aspect-locked image cropping with role-keyed export")]
#[command(long_about = "\
Aspect-locked image cropping with role-keyed export

Crops are locked to the aspect ratio configured for a role (cover = 16:9,
profile = 1:1 by default) and exported at the image's full resolution,
oversampled for the configured device pixel density. Results land in a JSON
role store as data: URIs — storing a role twice keeps only the latest crop.

Crop rectangles are given in displayed-image pixels: pass --display for the
size the image was rendered at, and --region for the rectangle selected
against that rendering. With neither, the centered initial crop of the
full-size image is exported.

Run 'cropkit inspect <image>' to see the initial crop for a role.")]
#[command(version = version_string())]
struct Cli {
    /// Path to a config.toml (optional; stock defaults apply without it)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Role store manifest
    #[arg(long, default_value = "images.json", global = true)]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show an image's dimensions and its initial crop for a role
    Inspect {
        image: PathBuf,
        /// Image role (cover|profile)
        #[arg(long, default_value = "cover")]
        role: ImageRole,
    },
    /// Crop an image and store the result under a role
    Crop {
        image: PathBuf,
        /// Image role (cover|profile)
        #[arg(long, default_value = "cover")]
        role: ImageRole,
        /// Crop rectangle in displayed-image pixels as x,y,width,height
        /// (defaults to the centered initial crop)
        #[arg(long)]
        region: Option<Rect>,
        /// Displayed size as WIDTHxHEIGHT (defaults to the natural size)
        #[arg(long)]
        display: Option<Dimensions>,
    },
    /// List entries in the role store
    Roles,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();
    let config = CropConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Command::Inspect { image, role } => {
            let profile = AspectProfile::resolve(role, &config)?;
            // Dismissed/unreadable selections are a silent no-op
            let Some(loaded) = loader::select_file(Some(&image)) else {
                return Ok(());
            };
            let natural = loaded.source.natural();
            let region = cropping::compute_initial_crop(
                natural.width,
                natural.height,
                profile.aspect(),
            );
            output::print_inspect(&image, natural, profile, region);
        }

        Command::Crop {
            image,
            role,
            region,
            display,
        } => {
            let profile = AspectProfile::resolve(role, &config)?;
            let export = ExportSettings::from_config(&config);
            let mut pipeline = CropPipeline::new(profile, PixelSurface::new(), export);
            let mut store = PersistedStore::new(&cli.store);
            store.rehydrate()?;

            let ticket = pipeline.begin_selection();
            let Some(loaded) = loader::select_file(Some(&image)) else {
                return Ok(());
            };
            let natural = loaded.source.natural();
            pipeline.complete_load(ticket, loaded.source);

            let displayed = display.unwrap_or(natural);
            let initial = pipeline
                .display_at(displayed)
                .ok_or("no image loaded")?;
            let rect = region.unwrap_or_else(|| initial.to_pixels(displayed));

            pipeline
                .settle(rect, &mut store)
                .map_err(|e| format!("crop could not be saved: {e}"))?;
            store.save()?;

            let scale = cropping::scale_factors(natural, displayed);
            let buffer = cropping::output_buffer_size(rect, scale, config.export.density);
            let encoded_bytes = store
                .get(profile.role())
                .map(|img| img.bytes().len())
                .unwrap_or(0);
            output::print_crop_result(profile, &image, buffer, encoded_bytes, &cli.store);
        }

        Command::Roles => {
            let mut store = PersistedStore::new(&cli.store);
            store.rehydrate()?;
            output::print_roles(&store.entries());
        }
    }

    Ok(())
}

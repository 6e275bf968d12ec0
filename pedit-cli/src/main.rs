use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pedit_cli::{adjust_scrollbar, load_recipe, EditorSettings, Frontend, Session, Step};
use pedit_io::{supported_formats, ImageBuffer};
use tracing::{debug, info};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pedit")]
#[command(version, about = "Load, edit and save raster images", long_about = None)]
struct Cli {
    /// Settings file (JSON)
    #[arg(long, value_name = "FILE", global = true)]
    settings: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply operations to an image and save the result
    Edit {
        /// Input image
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output image, format taken from the extension
        #[arg(short, long, value_name = "OUTPUT")]
        output: PathBuf,

        /// Operation such as rotate:90, flip:h, crop:x,y,w,h, resize:0.5,
        /// brightness:N, contrast:N, grayscale, rgb, sepia, hue, revert,
        /// or an action taken from the settings: rotate-cw, rotate-ccw,
        /// flip-horizontal, flip-vertical
        #[arg(long = "op", value_name = "OP")]
        ops: Vec<Step>,

        /// Recipe file applied before any --op
        #[arg(long, value_name = "FILE")]
        recipe: Option<PathBuf>,
    },

    /// Show size, colour mode and format of an image
    Inspect {
        /// Input image
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Zoom in this many steps
        #[arg(long, value_name = "N", default_value_t = 0)]
        zoom_in: u32,

        /// Zoom out this many steps
        #[arg(long, value_name = "N", default_value_t = 0)]
        zoom_out: u32,

        /// Mouse wheel deltas applied after the zoom steps
        #[arg(long, value_name = "DELTA", allow_hyphen_values = true)]
        wheel: Vec<i32>,

        /// Return to the natural size after zooming
        #[arg(long)]
        normal_size: bool,

        /// Scrollbar position and page step to follow through the zoom steps
        #[arg(long, value_name = "VALUE,PAGE", value_parser = parse_scroll)]
        scroll: Option<(i32, i32)>,

        /// Print the pixel at this position
        #[arg(long, value_name = "X,Y", value_parser = parse_point)]
        pixel: Option<(u32, u32)>,
    },

    /// Print the effective settings as JSON
    Settings,

    /// List the image formats available for loading and saving
    Formats,
}

/// Answers the session with the paths given on the command line
struct PathFrontend {
    open: Option<PathBuf>,
    save: Option<PathBuf>,
    error: Option<String>,
}

impl PathFrontend {
    fn new(open: Option<PathBuf>, save: Option<PathBuf>) -> Self {
        Self {
            open,
            save,
            error: None,
        }
    }
}

impl Frontend for PathFrontend {
    fn notify_image_loaded(&mut self, buffer: &ImageBuffer) {
        let (width, height) = buffer.dimensions();
        debug!(width, height, mode = %buffer.color_mode(), "image ready");
    }

    fn notify_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn request_open_path(&mut self) -> Option<PathBuf> {
        self.open.take()
    }

    fn request_save_path(&mut self) -> Option<PathBuf> {
        self.save.take()
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = EditorSettings::load_or_default(cli.settings.as_deref())
        .context("Failed to load settings")
        .and_then(|settings| match cli.command {
            Commands::Edit {
                input,
                output,
                ops,
                recipe,
            } => cmd_edit(settings, input, output, ops, recipe),
            Commands::Inspect {
                input,
                zoom_in,
                zoom_out,
                wheel,
                normal_size,
                scroll,
                pixel,
            } => cmd_inspect(
                settings,
                input,
                ZoomSteps {
                    zoom_in,
                    zoom_out,
                    wheel,
                    normal_size,
                },
                scroll,
                pixel,
            ),
            Commands::Settings => cmd_settings(&settings),
            Commands::Formats => cmd_formats(),
        });

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn cmd_edit(
    settings: EditorSettings,
    input: PathBuf,
    output: PathBuf,
    ops: Vec<Step>,
    recipe: Option<PathBuf>,
) -> Result<()> {
    let mut steps: Vec<Step> = match recipe {
        Some(path) => load_recipe(&path)?
            .into_iter()
            .map(Step::Operation)
            .collect(),
        None => Vec::new(),
    };
    steps.extend(ops);

    let mut session = Session::new(settings);
    let mut frontend = PathFrontend::new(Some(input.clone()), Some(output.clone()));

    if !session.open_image(&mut frontend) {
        bail!(
            "{} ({})",
            frontend.error.unwrap_or_default(),
            input.display()
        );
    }

    for (index, step) in steps.iter().enumerate() {
        session
            .run(step)
            .with_context(|| format!("Operation {} ({step}) failed", index + 1))?;
    }

    if !session.save_image(&mut frontend) {
        bail!(
            "{} ({})",
            frontend.error.unwrap_or_default(),
            output.display()
        );
    }

    let (width, height) = session.editor().buffer().dimensions();
    info!(
        operations = steps.len(),
        output = %output.display(),
        width,
        height,
        "edit complete"
    );
    println!(
        "Wrote {} ({}x{}, {} operations)",
        output.display(),
        width,
        height,
        steps.len()
    );
    Ok(())
}

/// View changes requested on the inspect command line, in application order
struct ZoomSteps {
    zoom_in: u32,
    zoom_out: u32,
    wheel: Vec<i32>,
    normal_size: bool,
}

fn cmd_inspect(
    settings: EditorSettings,
    input: PathBuf,
    zoom: ZoomSteps,
    scroll: Option<(i32, i32)>,
    pixel: Option<(u32, u32)>,
) -> Result<()> {
    let mut session = Session::new(settings);
    let mut frontend = PathFrontend::new(Some(input.clone()), None);
    if !session.open_image(&mut frontend) {
        bail!(
            "{} ({})",
            frontend.error.unwrap_or_default(),
            input.display()
        );
    }

    let mut applied = Vec::new();
    for _ in 0..zoom.zoom_in {
        applied.extend(session.zoom_in());
    }
    for _ in 0..zoom.zoom_out {
        applied.extend(session.zoom_out());
    }
    for delta in zoom.wheel {
        applied.extend(session.wheel(delta));
    }
    if zoom.normal_size {
        // The scrollbar follows the single step back to 100%
        let step = 1.0 / session.view().zoom();
        session.normal_size();
        applied.push(step);
    }

    let buffer = session.editor().buffer();
    let (width, height) = buffer.dimensions();
    println!("File:      {}", input.display());
    println!("Size:      {}x{}", width, height);
    println!("Mode:      {}", buffer.color_mode());
    match buffer.format() {
        Some(format) => println!("Format:    {:?}", format),
        None => println!("Format:    unknown"),
    }

    let view = session.view();
    if let Some((shown_w, shown_h)) = view.displayed_size() {
        println!(
            "Displayed: {}x{} at {:.1}%",
            shown_w,
            shown_h,
            view.zoom() * 100.0
        );
    }

    if let Some((value, page_step)) = scroll {
        let position = applied
            .iter()
            .fold(value, |value, &step| adjust_scrollbar(value, page_step, step));
        println!("Scroll:    {} -> {}", value, position);
    }

    if let Some((x, y)) = pixel {
        let color = buffer
            .pixel_at(x, y)
            .with_context(|| format!("Cannot read pixel {x},{y}"))?;
        println!("Pixel:     ({}, {}) = {}", x, y, color);
    }
    Ok(())
}

fn cmd_settings(settings: &EditorSettings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings).context("Failed to encode settings")?;
    println!("{json}");
    Ok(())
}

fn cmd_formats() -> Result<()> {
    println!("{:<10} {:<5} {:<5} EXTENSIONS", "FORMAT", "LOAD", "SAVE");
    for support in supported_formats() {
        let yes_no = |flag: bool| if flag { "yes" } else { "no" };
        println!(
            "{:<10} {:<5} {:<5} {}",
            format!("{:?}", support.format),
            yes_no(support.read),
            yes_no(support.write),
            support.extensions.join(", ")
        );
    }
    Ok(())
}

/// Parse a pixel position in the form "X,Y"
fn parse_point(s: &str) -> Result<(u32, u32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("Position must be X,Y, got: {}", s))?;
    let x = x
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid x coordinate: {}", x))?;
    let y = y
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid y coordinate: {}", y))?;
    Ok((x, y))
}

/// Parse a scrollbar state in the form "VALUE,PAGE"
fn parse_scroll(s: &str) -> Result<(i32, i32), String> {
    let (value, page) = s
        .split_once(',')
        .ok_or_else(|| format!("Scroll must be VALUE,PAGE, got: {}", s))?;
    let value = value
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("Invalid scroll value: {}", value))?;
    let page = page
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("Invalid page step: {}", page))?;
    Ok((value, page))
}

//! Textrude CLI - build extruded text meshes from the command line.
//!
//! Usage: textrude <COMMAND> [OPTIONS] <TEXT> [OUTPUT]
//!
//! Run `textrude --help` for available commands. Set `RUST_LOG=debug` for
//! per-stage details.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};

use textrude::classify::slot_histogram;
use textrude::font::{read_font_file, BlockFont, TtfFont};
use textrude::io;
use textrude::io::obj::slot_name;
use textrude::layout::line_advance;
use textrude::mesh::MaterialSlot;
use textrude::pipeline::{build_text_geometry, TextGeometry, TextOptions};

#[derive(Parser)]
#[command(name = "textrude")]
#[command(author, version, about = "Extruded 3D text mesh CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display layout, bounds and face groups for a string
    Info {
        /// Text to build
        text: String,

        #[command(flatten)]
        options: TextArgs,
    },

    /// Build meshes for a string and save them
    Build {
        /// Text to build
        text: String,

        /// Output mesh file (.stl or .obj)
        output: PathBuf,

        /// Also save the outline mesh to this file
        #[arg(long)]
        outline_output: Option<PathBuf>,

        #[command(flatten)]
        options: TextArgs,
    },
}

#[derive(Args)]
struct TextArgs {
    /// TrueType/OpenType font file (default: built-in block font)
    #[arg(short = 'F', long)]
    font: Option<PathBuf>,

    /// Font size
    #[arg(short, long, default_value = "10")]
    size: f32,

    /// Extrusion depth
    #[arg(short, long, default_value = "2")]
    depth: f32,

    /// Extra advance after every character
    #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
    letter_spacing: f32,

    /// Extra advance after whitespace
    #[arg(short = 'w', long, default_value = "0", allow_hyphen_values = true)]
    spacing_width: f32,

    /// Outline width at a text height of 10 (0 disables the outline)
    #[arg(short, long, default_value = "0")]
    outline_width: f32,

    /// Segments per curve
    #[arg(short, long, default_value = "12")]
    curve_segments: u32,

    /// Use single-threaded execution (for benchmarking)
    #[arg(long)]
    sequential: bool,
}

impl TextArgs {
    fn to_options(&self) -> TextOptions {
        TextOptions::default()
            .with_size(self.size)
            .with_depth(self.depth)
            .with_letter_spacing(self.letter_spacing)
            .with_spacing_width(self.spacing_width)
            .with_outline_width(self.outline_width)
            .with_curve_segments(self.curve_segments)
            .with_parallel(!self.sequential)
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { text, options } => {
            cmd_info(&text, &options)?;
        }

        Commands::Build {
            text,
            output,
            outline_output,
            options,
        } => {
            cmd_build(&text, &output, outline_output.as_deref(), &options)?;
        }
    }

    Ok(())
}

fn build(text: &str, args: &TextArgs) -> Result<TextGeometry, Box<dyn std::error::Error>> {
    let options = args.to_options();
    let geometry = match &args.font {
        Some(path) => {
            let data = read_font_file(path)?;
            build_text_geometry(text, &TtfFont::from_bytes(&data)?, &options)?
        }
        None => build_text_geometry(text, &BlockFont::new(), &options)?,
    };
    Ok(geometry)
}

fn cmd_info(text: &str, args: &TextArgs) -> Result<(), Box<dyn std::error::Error>> {
    let geometry = build(text, args)?;

    println!("Text: {:?}", text);
    println!("Glyphs: {}", geometry.spans.len());
    let missing: String = geometry.spans.iter().filter(|s| s.missing).map(|s| s.ch).collect();
    if !missing.is_empty() {
        println!("Missing glyphs: {:?}", missing);
    }
    println!("Line advance: {:.3}", line_advance(&geometry.spans));

    println!("Vertices: {}", geometry.main.num_vertices());
    println!("Triangles: {}", geometry.main.num_triangles());

    let m = &geometry.metrics;
    println!(
        "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
        m.min.x, m.min.y, m.min.z, m.max.x, m.max.y, m.max.z
    );
    println!("Dimensions: {:.3} x {:.3} x {:.3}", m.width(), m.height(), m.depth());

    if geometry.outline.is_empty() {
        println!("Outline: none");
    } else {
        println!(
            "Outline: offset {:.4}, {} triangles",
            geometry.outline_offset,
            geometry.outline.num_triangles()
        );
    }

    println!("Face groups:");
    let histogram = slot_histogram(&geometry.main);
    for (slot, count) in MaterialSlot::FACES.iter().zip(histogram) {
        println!("  {:<6} {}", slot_name(*slot), count);
    }

    Ok(())
}

fn cmd_build(
    text: &str,
    output: &Path,
    outline_output: Option<&Path>,
    args: &TextArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let geometry = build(text, args)?;
    let elapsed = start.elapsed();

    println!(
        "Built {:?}: {} triangles, {} outline triangles in {:.2?}",
        text,
        geometry.main.num_triangles(),
        geometry.outline.num_triangles(),
        elapsed
    );

    io::save(&geometry.main, output)?;
    println!("Saved to: {}", output.display());

    if let Some(path) = outline_output {
        if geometry.outline.is_empty() {
            eprintln!("Warning: outline is empty (use --outline-width), skipping {}", path.display());
        } else {
            io::save(&geometry.outline, path)?;
            println!("Saved outline to: {}", path.display());
        }
    }

    Ok(())
}

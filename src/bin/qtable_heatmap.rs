use clap::Parser;
use log::info;
use std::path::PathBuf;

use qviz::display::{OutputTarget, show_image};
use qviz::qtable::{build_grid, load_qtable};
use qviz::render::heatmap::{HeatmapRenderOptions, render_heatmap};

#[derive(Parser)]
#[command(author, version, about = "Visualize Q-table values as a heatmap", long_about = None)]
struct Args {
    /// Path to Q-table JSON file
    json_file: PathBuf,

    /// Output file path (e.g., qtable.png); omit to open the system image viewer
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Number of grid rows
    #[arg(short = 'r', long = "rows", requires = "cols")]
    rows: Option<usize>,

    /// Number of grid columns
    #[arg(short = 'c', long = "cols", requires = "rows")]
    cols: Option<usize>,

    /// Plot title
    #[arg(
        short = 't',
        long = "title",
        default_value = "Learned Q-values for each state"
    )]
    title: String,
}

// No catch-all here: any failure propagates with its full error chain.
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let entries = load_qtable(&args.json_file)?;
    let grid = build_grid(&entries, args.rows.zip(args.cols));
    info!(
        "rendering {}x{} grid from {} states",
        grid.rows(),
        grid.cols(),
        entries.len()
    );

    let image = render_heatmap(&grid, &args.title, &HeatmapRenderOptions::default())?;

    match OutputTarget::resolve(args.output) {
        OutputTarget::File(path) => {
            image.save(&path)?;
            println!("Visualization saved to {}", path.display());
        }
        OutputTarget::Viewer => {
            let tmp_path = std::env::temp_dir().join("qtable_heatmap.png");
            image.save(&tmp_path)?;
            show_image(&tmp_path)?;
        }
    }

    Ok(())
}

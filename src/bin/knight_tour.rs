use clap::Parser;
use std::path::PathBuf;

use qviz::render::board::{BoardRenderOptions, render_tour};
use qviz::tour::{TourData, hq_output_path};

#[derive(Parser)]
#[command(author, version, about = "Visualize a knight's tour path from JSON data", long_about = None)]
struct Args {
    /// Path to the tour JSON file
    json_path: PathBuf,

    /// Output image path (a `_hq` high-resolution variant is written next to it)
    output_path: PathBuf,
}

fn main() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    let args = Args::parse();

    // single catch-all: file, JSON and render failures are all reported the same way
    if let Err(e) = run(&args) {
        println!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let tour = TourData::load(&args.json_path)?;

    let standard = render_tour(&tour, &BoardRenderOptions::default())?;
    standard.save(&args.output_path)?;
    println!("Visualization saved successfully");

    let hq_path = hq_output_path(&args.output_path);
    let high_res = render_tour(&tour, &BoardRenderOptions::high_res())?;
    high_res.save(&hq_path)?;
    println!("High-quality version saved to: {}", hq_path.display());

    Ok(())
}

use std::path::PathBuf;

use clap::Parser;

/// Interactive cross-section viewer for multi-channel microscopy volumes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Multi-page TIFF volume to load
    #[arg(short, long)]
    pub volume: Option<PathBuf>,

    /// Acquisition metadata file describing channel layout and physical size
    #[arg(short, long)]
    pub metadata: Option<PathBuf>,

    /// Settings file, created on exit if missing
    #[arg(short, long, default_value = "cellview.json")]
    pub settings: PathBuf,
}

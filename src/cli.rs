use std::path::PathBuf;

use clap::Parser;

/// Category picker - browse, filter and select catalog categories from a command script on stdin
#[derive(Parser, Debug)]
#[command(name = "category_picker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON catalog to load (overrides `catalog_path` from the configuration)
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// Directory holding config.json (defaults to the per-user config directory)
    #[arg(long)]
    pub config_dir: Option<PathBuf>,
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use swatchy::HarmonyType;

#[derive(Parser)]
#[command(name = "swatchy")]
#[command(author = "MrMattias")]
#[command(version)]
#[command(about = "Color-harmony palette synthesizer for named color catalogs")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Color corpus (catalog JSON)
    #[arg(short, long, global = true)]
    pub(crate) corpus: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Seed for every random draw (reproducible output)
    #[arg(long, global = true)]
    pub(crate) rng_seed: Option<u64>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Generate themes for every eligible seed color
    Generate {
        /// Theme document to write
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Palette sizes, comma separated (e.g. "3,4,5,6")
        #[arg(short, long, value_delimiter = ',')]
        sizes: Option<Vec<usize>>,

        /// Keep existing themes in the output document
        #[arg(short, long)]
        append: bool,

        /// Run the single-threaded sweep
        #[arg(long)]
        sequential: bool,

        /// Stop after this many seconds and keep finished seeds
        #[arg(short, long)]
        timeout: Option<u64>,
    },
    /// Build a single palette around one seed color
    Palette {
        /// Seed color code or name
        #[arg(long)]
        seed: String,

        /// Number of colors
        #[arg(long, default_value = "5")]
        size: usize,

        /// Harmony rule (defaults to the first that fits)
        #[arg(long)]
        harmony: Option<HarmonyType>,

        /// Print the theme record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show HSV and temperature for a hex color
    Inspect {
        /// Hex color, with or without '#'
        hex: String,
    },
    /// Merge catalog pages into one deduplicated catalog
    Consolidate {
        /// Catalog pages ({"data": [...]})
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Merged catalog to write
        #[arg(short, long, default_value = "consolidated_colors.json")]
        output: PathBuf,
    },
    /// Fill catalog hex values from local swatch images
    Extract {
        /// Catalog to update in place
        catalog: PathBuf,

        /// Directory of swatch images named by color code
        #[arg(short, long, default_value = "images/swatches")]
        swatches: PathBuf,
    },
    /// Show theme counts by size and harmony
    Stats {
        /// Theme document (defaults to the configured output)
        file: Option<PathBuf>,
    },
    /// Regenerate heuristic names for an existing theme document
    Rename {
        /// Theme document (defaults to the configured output)
        file: Option<PathBuf>,
    },
}

use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context as _;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "ogcard", version, about = "Generate the 1200x630 Open Graph share image")]
struct Cli {
    /// Directory to write og-image.png and og-image.svg into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// JSON file overriding the built-in card content.
    #[arg(long)]
    content: Option<PathBuf>,

    /// JSON file overriding the built-in color palette.
    #[arg(long)]
    palette: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let content = match &cli.content {
        Some(path) => read_json(path)?,
        None => ogcard::CardContent::default(),
    };
    let palette = match &cli.palette {
        Some(path) => read_json(path)?,
        None => ogcard::Palette::default(),
    };

    eprintln!(
        "generating Open Graph image ({}x{})...",
        ogcard::CARD_WIDTH,
        ogcard::CARD_HEIGHT
    );

    let opts = ogcard::ComposeOpts {
        out_dir: cli.out_dir,
    };
    let report = ogcard::compose_card(&content, &palette, &opts)?;

    if let Some(raster) = &report.raster {
        eprintln!("wrote {}", raster.display());
    } else {
        eprintln!("raster backend unavailable, only the SVG artifact was produced");
    }
    eprintln!("wrote {}", report.vector.display());

    println!("Done! Use {} for social sharing.", ogcard::RASTER_FILE_NAME);
    println!("Update <meta property=\"og:image\"> in the page to point at the hosted image URL.");
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| format!("parse JSON '{}'", path.display()))
}

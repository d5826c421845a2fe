use std::path::PathBuf;

use crate::{
    error::{OgcardError, OgcardResult},
    model::{CardContent, Palette},
    render_cpu, svg,
};

/// Raster artifact name, overwritten on each run.
pub const RASTER_FILE_NAME: &str = "og-image.png";
/// Vector artifact name, overwritten on each run.
pub const VECTOR_FILE_NAME: &str = "og-image.svg";

#[derive(Clone, Debug)]
pub struct ComposeOpts {
    /// Directory both artifacts are written into.
    pub out_dir: PathBuf,
}

impl Default for ComposeOpts {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CardReport {
    /// Written raster artifact, `None` when the raster backend was
    /// unavailable on this host.
    pub raster: Option<PathBuf>,
    /// Written vector artifact. Always present.
    pub vector: PathBuf,
}

/// Produce both card artifacts.
///
/// The raster path is attempted first; its unavailability is logged and
/// skipped, never fatal, and never gates the vector artifact. I/O failures
/// on either artifact propagate.
pub fn compose_card(
    content: &CardContent,
    palette: &Palette,
    opts: &ComposeOpts,
) -> OgcardResult<CardReport> {
    compose_card_with(content, palette, opts, render_cpu::compose_raster)
}

/// [`compose_card`] with the raster composer injected, so both
/// orchestration branches can be driven regardless of which fonts the
/// host has installed.
#[tracing::instrument(skip_all)]
pub fn compose_card_with(
    content: &CardContent,
    palette: &Palette,
    opts: &ComposeOpts,
    raster: impl FnOnce(&CardContent, &Palette) -> OgcardResult<Vec<u8>>,
) -> OgcardResult<CardReport> {
    content.validate()?;
    std::fs::create_dir_all(&opts.out_dir)?;

    let raster = match raster(content, palette) {
        Ok(bytes) => {
            let path = opts.out_dir.join(RASTER_FILE_NAME);
            std::fs::write(&path, bytes)?;
            tracing::info!(path = %path.display(), "wrote raster artifact");
            Some(path)
        }
        Err(OgcardError::RasterUnavailable(reason)) => {
            tracing::warn!(%reason, "raster backend unavailable, skipping png artifact");
            None
        }
        Err(e) => return Err(e),
    };

    let markup = svg::compose_vector(content, palette)?;
    let vector = opts.out_dir.join(VECTOR_FILE_NAME);
    std::fs::write(&vector, markup)?;
    tracing::info!(path = %vector.display(), "wrote vector artifact");

    Ok(CardReport { raster, vector })
}

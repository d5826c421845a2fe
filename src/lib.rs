#![forbid(unsafe_code)]

pub mod chart;
pub mod encode_png;
pub mod error;
pub mod fonts;
pub mod model;
pub mod pipeline;
pub mod render_cpu;
pub mod svg;
pub mod text;

pub use error::{OgcardError, OgcardResult};
pub use model::{CARD_HEIGHT, CARD_WIDTH, CardContent, Color, Palette, PrimaryStat, Stat};
pub use pipeline::{
    CardReport, ComposeOpts, RASTER_FILE_NAME, VECTOR_FILE_NAME, compose_card, compose_card_with,
};
pub use render_cpu::{FrameRgba, compose_raster};
pub use svg::compose_vector;

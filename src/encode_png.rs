use std::io::Cursor;

use crate::{
    error::{OgcardError, OgcardResult},
    render_cpu::FrameRgba,
};

/// Encode a rendered frame as PNG bytes.
///
/// The card is rendered over an opaque background, so the premultiplied
/// pixel data is identical to straight-alpha data and can be handed to the
/// encoder as-is.
pub fn encode_png(frame: &FrameRgba) -> OgcardResult<Vec<u8>> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(OgcardError::render(format!(
            "frame byte length mismatch: got {}, expected {expected}",
            frame.data.len()
        )));
    }

    let mut cursor = Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut cursor,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| OgcardError::render(format!("png encode failed: {e}")))?;
    Ok(cursor.into_inner())
}

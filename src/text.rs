use crate::{
    error::{OgcardError, OgcardResult},
    fonts::FontFace,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Horizontal anchor for placed text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical anchor for placed text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Middle,
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape and lay out a single run of plain text using the provided face.
    pub fn layout_plain(
        &mut self,
        text: &str,
        face: &FontFace,
        size_px: f32,
        weight: parley::style::FontWeight,
        brush: TextBrushRgba8,
    ) -> OgcardResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(OgcardError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(face.bytes.as_ref().clone()),
            None,
        );
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            OgcardError::validation("no font families registered from font bytes")
        })?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| OgcardError::validation("registered font family has no name"))?
            .to_string();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(weight));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Top-left translation that places `layout` at `(x, y)` under the given
/// anchors. `y` means the text top for [`VAlign::Top`] and the vertical
/// center for [`VAlign::Middle`].
pub fn anchor_offset(
    layout: &parley::Layout<TextBrushRgba8>,
    x: f64,
    y: f64,
    halign: HAlign,
    valign: VAlign,
) -> (f64, f64) {
    let w = f64::from(layout.width());
    let h = f64::from(layout.height());
    let dx = match halign {
        HAlign::Left => 0.0,
        HAlign::Center => w / 2.0,
        HAlign::Right => w,
    };
    let dy = match valign {
        VAlign::Top => 0.0,
        VAlign::Middle => h / 2.0,
    };
    (x - dx, y - dy)
}

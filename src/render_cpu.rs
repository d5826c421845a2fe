use crate::{
    chart,
    error::{OgcardError, OgcardResult},
    fonts::{self, FontFace, SansSerifFonts},
    model::{CARD_HEIGHT, CARD_WIDTH, CardContent, Color, Palette},
    text::{HAlign, TextBrushRgba8, TextLayoutEngine, VAlign, anchor_offset},
};

#[derive(Clone, Debug)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

/// Device-pixel layout of the raster card on the 1200x630 canvas.
mod layout {
    pub const VIGNETTE_LAYERS: u32 = 20;
    pub const VIGNETTE_MAX_ALPHA: f32 = 0.01;

    pub const TITLE_POS: (f64, f64) = (50.0, 80.0);
    pub const TITLE_SIZE: f32 = 44.0;
    pub const SUBTITLE_POS: (f64, f64) = (50.0, 150.0);
    pub const SUBTITLE_SIZE: f32 = 25.0;

    pub const PANEL: (f64, f64, f64, f64) = (50.0, 190.0, 500.0, 410.0);
    pub const PANEL_RADIUS: f64 = 20.0;
    pub const PANEL_ALPHA: f32 = 0.9;
    pub const PANEL_CENTER_X: f64 = 275.0;
    pub const RANGE_Y: f64 = 240.0;
    pub const RANGE_SIZE: f32 = 50.0;
    pub const RANGE_LABEL_Y: f64 = 330.0;
    pub const RANGE_LABEL_SIZE: f32 = 19.0;
    pub const QUALIFIER_Y: f64 = 380.0;
    pub const QUALIFIER_SIZE: f32 = 15.0;

    pub const STAT_START_X: f64 = 580.0;
    pub const STAT_STEP_X: f64 = 200.0;
    pub const STAT_VALUE_Y: f64 = 270.0;
    pub const STAT_VALUE_SIZE: f32 = 33.0;
    pub const STAT_LABEL_Y: f64 = 340.0;
    pub const STAT_LABEL_SIZE: f32 = 15.0;

    pub const TAGLINE_POS: (f64, f64) = (50.0, 510.0);
    pub const TAGLINE_SIZE: f32 = 17.0;
    pub const URL_POS: (f64, f64) = (1150.0, 590.0);
    pub const URL_SIZE: f32 = 14.0;

    pub const CHART_X0: f64 = 50.0;
    pub const CHART_X_SCALE: f64 = 40.0;
    pub const CHART_Y0: f64 = 600.0;
    pub const CHART_Y_SCALE: f64 = 15.0;
    pub const CHART_STROKE_WIDTH: f64 = 2.8;
    pub const CHART_BAND_ALPHA: f32 = 0.2;
}

/// Render the card and encode it as PNG bytes.
///
/// Fails with [`OgcardError::RasterUnavailable`] when no system sans-serif
/// face resolves; everything else this path needs is compiled in.
pub fn compose_raster(content: &CardContent, palette: &Palette) -> OgcardResult<Vec<u8>> {
    content.validate()?;
    let fonts = fonts::load_system_sans_serif()?;
    let frame = render_card(content, palette, &fonts)?;
    crate::encode_png::encode_png(&frame)
}

#[tracing::instrument(skip_all)]
pub fn render_card(
    content: &CardContent,
    palette: &Palette,
    fonts: &SansSerifFonts,
) -> OgcardResult<FrameRgba> {
    let width_u16: u16 = CARD_WIDTH
        .try_into()
        .map_err(|_| OgcardError::render("canvas width exceeds u16"))?;
    let height_u16: u16 = CARD_HEIGHT
        .try_into()
        .map_err(|_| OgcardError::render("canvas height exceeds u16"))?;

    let mut pixmap = vello_cpu::Pixmap::new(width_u16, height_u16);
    clear_pixmap(&mut pixmap, opaque_rgba(palette.dark));

    let mut ctx = vello_cpu::RenderContext::new(width_u16, height_u16);
    let mut engine = TextLayoutEngine::new();
    let canvas = vello_cpu::kurbo::Rect::new(0.0, 0.0, CARD_WIDTH as f64, CARD_HEIGHT as f64);

    // Opaque background, then the soft primary vignette on top of it.
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(paint(palette.dark));
    ctx.fill_rect(&canvas);

    for i in 0..layout::VIGNETTE_LAYERS {
        let falloff = (layout::VIGNETTE_LAYERS - i) as f32 / layout::VIGNETTE_LAYERS as f32;
        let alpha = layout::VIGNETTE_MAX_ALPHA * falloff;
        ctx.set_paint(paint(palette.primary));
        ctx.push_opacity_layer(alpha);
        ctx.fill_rect(&canvas);
        ctx.pop_layer();
    }

    draw_text(
        &mut ctx,
        &mut engine,
        &content.title,
        &fonts.bold,
        layout::TITLE_SIZE,
        parley::style::FontWeight::BOLD,
        palette.white,
        1.0,
        layout::TITLE_POS,
        HAlign::Left,
        VAlign::Top,
    )?;
    draw_text(
        &mut ctx,
        &mut engine,
        &content.subtitle,
        &fonts.regular,
        layout::SUBTITLE_SIZE,
        parley::style::FontWeight::NORMAL,
        palette.primary,
        1.0,
        layout::SUBTITLE_POS,
        HAlign::Left,
        VAlign::Top,
    )?;

    let (px0, py0, px1, py1) = layout::PANEL;
    let panel = vello_cpu::kurbo::RoundedRect::new(px0, py0, px1, py1, layout::PANEL_RADIUS);
    let panel_path = {
        use vello_cpu::kurbo::Shape as _;
        panel.to_path(0.1)
    };
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(paint(palette.primary));
    ctx.push_opacity_layer(layout::PANEL_ALPHA);
    ctx.fill_path(&panel_path);
    ctx.pop_layer();

    draw_text(
        &mut ctx,
        &mut engine,
        &content.primary.range,
        &fonts.bold,
        layout::RANGE_SIZE,
        parley::style::FontWeight::BOLD,
        palette.white,
        1.0,
        (layout::PANEL_CENTER_X, layout::RANGE_Y),
        HAlign::Center,
        VAlign::Middle,
    )?;
    draw_text(
        &mut ctx,
        &mut engine,
        &content.primary.label,
        &fonts.regular,
        layout::RANGE_LABEL_SIZE,
        parley::style::FontWeight::NORMAL,
        palette.white,
        0.9,
        (layout::PANEL_CENTER_X, layout::RANGE_LABEL_Y),
        HAlign::Center,
        VAlign::Middle,
    )?;
    draw_text(
        &mut ctx,
        &mut engine,
        &content.primary.qualifier,
        &fonts.regular,
        layout::QUALIFIER_SIZE,
        parley::style::FontWeight::NORMAL,
        palette.white,
        0.7,
        (layout::PANEL_CENTER_X, layout::QUALIFIER_Y),
        HAlign::Center,
        VAlign::Middle,
    )?;

    for (i, stat) in content.secondary.iter().enumerate() {
        let x = layout::STAT_START_X + layout::STAT_STEP_X * i as f64;
        draw_text(
            &mut ctx,
            &mut engine,
            &stat.value,
            &fonts.bold,
            layout::STAT_VALUE_SIZE,
            parley::style::FontWeight::BOLD,
            palette.accent,
            1.0,
            (x, layout::STAT_VALUE_Y),
            HAlign::Center,
            VAlign::Middle,
        )?;
        draw_text(
            &mut ctx,
            &mut engine,
            &stat.label,
            &fonts.regular,
            layout::STAT_LABEL_SIZE,
            parley::style::FontWeight::NORMAL,
            palette.light,
            0.8,
            (x, layout::STAT_LABEL_Y),
            HAlign::Center,
            VAlign::Middle,
        )?;
    }

    draw_text(
        &mut ctx,
        &mut engine,
        &content.tagline,
        &fonts.regular,
        layout::TAGLINE_SIZE,
        parley::style::FontWeight::NORMAL,
        palette.light,
        0.6,
        layout::TAGLINE_POS,
        HAlign::Left,
        VAlign::Middle,
    )?;
    draw_text(
        &mut ctx,
        &mut engine,
        &content.url,
        &fonts.regular,
        layout::URL_SIZE,
        parley::style::FontWeight::NORMAL,
        palette.primary,
        1.0,
        layout::URL_POS,
        HAlign::Right,
        VAlign::Middle,
    )?;

    draw_trend_chart(&mut ctx, palette);

    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    Ok(FrameRgba {
        width: CARD_WIDTH,
        height: CARD_HEIGHT,
        data: pixmap.data_as_u8_slice().to_vec(),
        premultiplied: true,
    })
}

/// Uncertainty band (0.7x .. 1.3x of the baseline) plus the stroked curve.
fn draw_trend_chart(ctx: &mut vello_cpu::RenderContext, palette: &Palette) {
    let samples = chart::trend_samples(chart::TREND_SAMPLES);
    let to_device = |p: &kurbo::Point, scale: f64| {
        kurbo::Point::new(
            layout::CHART_X0 + layout::CHART_X_SCALE * p.x,
            layout::CHART_Y0 - layout::CHART_Y_SCALE * p.y * scale,
        )
    };
    let mid: Vec<kurbo::Point> = samples.iter().map(|p| to_device(p, 1.0)).collect();
    let lower: Vec<kurbo::Point> = samples.iter().map(|p| to_device(p, 0.7)).collect();
    let upper: Vec<kurbo::Point> = samples.iter().map(|p| to_device(p, 1.3)).collect();

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

    let band = chart::band(&lower, &upper);
    ctx.set_paint(paint(palette.primary));
    ctx.push_opacity_layer(layout::CHART_BAND_ALPHA);
    ctx.fill_path(&bezpath_to_cpu(&band));
    ctx.pop_layer();

    // Expand the stroke to a fill outline so only fill ops hit the backend.
    let line = chart::polyline(&mid);
    let outline = kurbo::stroke(
        line.elements().iter().copied(),
        &kurbo::Stroke::new(layout::CHART_STROKE_WIDTH),
        &kurbo::StrokeOpts::default(),
        0.25,
    );
    ctx.set_paint(paint(palette.accent));
    ctx.fill_path(&bezpath_to_cpu(&outline));
}

#[allow(clippy::too_many_arguments)]
fn draw_text(
    ctx: &mut vello_cpu::RenderContext,
    engine: &mut TextLayoutEngine,
    text: &str,
    face: &FontFace,
    size_px: f32,
    weight: parley::style::FontWeight,
    color: Color,
    alpha: f32,
    pos: (f64, f64),
    halign: HAlign,
    valign: VAlign,
) -> OgcardResult<()> {
    if text.is_empty() {
        return Ok(());
    }

    let brush = TextBrushRgba8 {
        r: color.r,
        g: color.g,
        b: color.b,
        a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
    };
    let layout = engine.layout_plain(text, face, size_px, weight, brush)?;
    let (dx, dy) = anchor_offset(&layout, pos.0, pos.1, halign, valign);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((dx, dy)));

    let font = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(face.bytes.as_ref().clone()),
        face.index,
    );
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };

            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));

            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }

    Ok(())
}

fn paint(color: Color) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, 255)
}

fn opaque_rgba(color: Color) -> [u8; 4] {
    [color.r, color.g, color.b, 255]
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

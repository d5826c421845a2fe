//! Vector card composer: builds the SVG artifact as an XML tree.
//!
//! This path has no host dependencies and must always succeed, so the
//! produced markup is parsed back through `usvg` before it is returned;
//! a document that fails to parse is a bug, not an artifact.

use simple_xml_builder::XMLElement;

use crate::{
    error::{OgcardError, OgcardResult},
    model::{CARD_HEIGHT, CARD_WIDTH, CardContent, Color, Palette},
};

const FONT_FAMILY: &str = "Arial, sans-serif";

/// Second stop of the background gradient, a slightly lighter dark than
/// the palette's background role.
const BG_GRADIENT_END: &str = "#2d2d2d";

/// Left edge of the first secondary-stat group.
const STAT_START_X: f64 = 520.0;
/// Horizontal distance between secondary-stat groups.
const STAT_STEP_X: f64 = 180.0;

/// Build the 1200x630 vector card. Byte-deterministic for fixed inputs.
pub fn compose_vector(content: &CardContent, palette: &Palette) -> OgcardResult<String> {
    content.validate()?;

    let root = build_document(content, palette);
    let mut buf = Vec::new();
    root.write(&mut buf)?;
    let svg =
        String::from_utf8(buf).map_err(|_| OgcardError::render("svg output was not utf-8"))?;

    let options = usvg::Options::default();
    usvg::Tree::from_str(&svg, &options)
        .map_err(|e| OgcardError::render(format!("generated svg failed to parse: {e}")))?;
    Ok(svg)
}

fn build_document(content: &CardContent, palette: &Palette) -> XMLElement {
    let mut root = XMLElement::new("svg");
    root.add_attribute("width", CARD_WIDTH);
    root.add_attribute("height", CARD_HEIGHT);
    root.add_attribute("xmlns", "http://www.w3.org/2000/svg");

    root.add_child(defs(palette));

    // Background and the two decorative corner circles.
    let mut bg = XMLElement::new("rect");
    bg.add_attribute("width", CARD_WIDTH);
    bg.add_attribute("height", CARD_HEIGHT);
    bg.add_attribute("fill", "url(#bg-gradient)");
    root.add_child(bg);
    root.add_child(circle(1100.0, 100.0, 200.0, palette.primary));
    root.add_child(circle(100.0, 530.0, 150.0, palette.accent));

    let mut title = text(60.0, 120.0, 48, palette.white);
    title.add_attribute("font-weight", "bold");
    title.add_text(&content.title);
    root.add_child(title);

    let mut subtitle = text(60.0, 170.0, 24, palette.primary);
    subtitle.add_text(&content.subtitle);
    root.add_child(subtitle);

    // Highlighted-stat panel with its three centered lines.
    let mut panel = XMLElement::new("rect");
    panel.add_attribute("x", 60);
    panel.add_attribute("y", 220);
    panel.add_attribute("width", 400);
    panel.add_attribute("height", 200);
    panel.add_attribute("rx", 16);
    panel.add_attribute("fill", "url(#accent-gradient)");
    root.add_child(panel);

    let mut range = text(260.0, 310.0, 56, palette.white);
    range.add_attribute("font-weight", "bold");
    range.add_attribute("text-anchor", "middle");
    range.add_text(&content.primary.range);
    root.add_child(range);

    let mut range_label = text(260.0, 360.0, 20, palette.white);
    range_label.add_attribute("opacity", "0.9");
    range_label.add_attribute("text-anchor", "middle");
    range_label.add_text(&content.primary.label);
    root.add_child(range_label);

    let mut qualifier = text(260.0, 395.0, 14, palette.white);
    qualifier.add_attribute("opacity", "0.7");
    qualifier.add_attribute("text-anchor", "middle");
    qualifier.add_text(&content.primary.qualifier);
    root.add_child(qualifier);

    // Secondary stats, one translated group per column.
    for (i, stat) in content.secondary.iter().enumerate() {
        let x = STAT_START_X + STAT_STEP_X * i as f64;
        let mut group = XMLElement::new("g");
        group.add_attribute("transform", format!("translate({x}, 280)"));

        let mut value = text(0.0, 0.0, 40, palette.accent);
        value.add_attribute("font-weight", "bold");
        value.add_attribute("text-anchor", "middle");
        value.add_text(&stat.value);
        group.add_child(value);

        let mut label = text(0.0, 40.0, 16, palette.light);
        label.add_attribute("opacity", "0.8");
        label.add_attribute("text-anchor", "middle");
        label.add_text(&stat.label);
        group.add_child(label);

        root.add_child(group);
    }

    // Upward trend curve, stroked alone and closed down to the baseline
    // for the shaded-area effect.
    const TREND_D: &str = "M 60 550 Q 200 520 350 480 T 550 400";
    let mut area = XMLElement::new("path");
    area.add_attribute("d", format!("{TREND_D} L 550 550 L 60 550 Z"));
    area.add_attribute("fill", palette.primary.to_hex());
    area.add_attribute("opacity", "0.2");
    root.add_child(area);

    let mut curve = XMLElement::new("path");
    curve.add_attribute("d", TREND_D);
    curve.add_attribute("stroke", palette.accent.to_hex());
    curve.add_attribute("stroke-width", 3);
    curve.add_attribute("fill", "none");
    root.add_child(curve);

    let mut tagline = text(60.0, 590.0, 16, palette.light);
    tagline.add_attribute("opacity", "0.6");
    tagline.add_text(&content.tagline);
    root.add_child(tagline);

    let mut url = text(1140.0, 600.0, 14, palette.primary);
    url.add_attribute("text-anchor", "end");
    url.add_text(&content.url);
    root.add_child(url);

    root
}

fn defs(palette: &Palette) -> XMLElement {
    let mut defs = XMLElement::new("defs");

    let mut bg = XMLElement::new("linearGradient");
    bg.add_attribute("id", "bg-gradient");
    bg.add_attribute("x1", "0%");
    bg.add_attribute("y1", "0%");
    bg.add_attribute("x2", "100%");
    bg.add_attribute("y2", "100%");
    bg.add_child(stop("0%", &palette.dark.to_hex()));
    bg.add_child(stop("100%", BG_GRADIENT_END));
    defs.add_child(bg);

    let mut accent = XMLElement::new("linearGradient");
    accent.add_attribute("id", "accent-gradient");
    accent.add_attribute("x1", "0%");
    accent.add_attribute("y1", "0%");
    accent.add_attribute("x2", "100%");
    accent.add_attribute("y2", "0%");
    accent.add_child(stop("0%", &palette.primary.to_hex()));
    accent.add_child(stop("100%", &palette.primary_dark.to_hex()));
    defs.add_child(accent);

    defs
}

fn stop(offset: &str, color: &str) -> XMLElement {
    let mut stop = XMLElement::new("stop");
    stop.add_attribute("offset", offset);
    stop.add_attribute("stop-color", color);
    stop.add_attribute("stop-opacity", 1);
    stop
}

fn circle(cx: f64, cy: f64, r: f64, fill: Color) -> XMLElement {
    let mut circle = XMLElement::new("circle");
    circle.add_attribute("cx", cx);
    circle.add_attribute("cy", cy);
    circle.add_attribute("r", r);
    circle.add_attribute("fill", fill.to_hex());
    circle.add_attribute("opacity", "0.1");
    circle
}

fn text(x: f64, y: f64, size: u32, fill: Color) -> XMLElement {
    let mut text = XMLElement::new("text");
    text.add_attribute("x", x);
    text.add_attribute("y", y);
    text.add_attribute("font-family", FONT_FAMILY);
    text.add_attribute("font-size", size);
    text.add_attribute("fill", fill.to_hex());
    text
}

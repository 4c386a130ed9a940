//! src/badge.rs
//!
//! Flat SVG badge in the shields.io style, served at `/badge.svg` with the
//! member counts as its status label.

const BADGE_HEIGHT: u32 = 20;
const FONT_SIZE: u32 = 11;

/// Padding added around each label, tuned for the font stack below.
const EXTRA_DX: f64 = 13.0;

pub fn render(subject: &str, status: &str, color: &str) -> String {
    let subject_dx = text_width(subject);
    let status_dx = text_width(status);
    let total_dx = subject_dx + status_dx;
    let subject_x = subject_dx / 2.0 + 1.0;
    let status_x = subject_dx + status_dx / 2.0 - 1.0;
    let subject = htmlescape::encode_minimal(subject);
    let status = htmlescape::encode_minimal(status);
    let color = htmlescape::encode_minimal(color);

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{total_dx}" height="{BADGE_HEIGHT}">
<linearGradient id="smooth" x2="0" y2="100%">
<stop offset="0" stop-color="#bbb" stop-opacity=".1"/>
<stop offset="1" stop-opacity=".1"/>
</linearGradient>
<mask id="round">
<rect width="{total_dx}" height="{BADGE_HEIGHT}" rx="3" fill="#fff"/>
</mask>
<g mask="url(#round)">
<rect width="{subject_dx}" height="{BADGE_HEIGHT}" fill="#555"/>
<rect x="{subject_dx}" width="{status_dx}" height="{BADGE_HEIGHT}" fill="{color}"/>
<rect width="{total_dx}" height="{BADGE_HEIGHT}" fill="url(#smooth)"/>
</g>
<g fill="#fff" text-anchor="middle" font-family="DejaVu Sans,Verdana,Geneva,sans-serif" font-size="{FONT_SIZE}">
<text x="{subject_x}" y="15" fill="#010101" fill-opacity=".3">{subject}</text>
<text x="{subject_x}" y="14">{subject}</text>
<text x="{status_x}" y="15" fill="#010101" fill-opacity=".3">{status}</text>
<text x="{status_x}" y="14">{status}</text>
</g>
</svg>"##
    )
}

/// Approximate rendered width of a label. A per-glyph lookup instead of
/// real font metrics; close enough for digits, slashes and short words.
fn text_width(text: &str) -> f64 {
    let glyphs: f64 = text.chars().map(char_width).sum();
    glyphs + EXTRA_DX
}

fn char_width(c: char) -> f64 {
    match c {
        'i' | 'j' | 'l' | '.' | ',' | '\'' | '|' => 3.0,
        'f' | 't' | 'r' | '/' | ':' | ' ' | '(' | ')' | '[' | ']' => 4.5,
        'm' | 'w' | '%' => 10.5,
        'M' | 'W' | '@' => 11.0,
        c if c.is_ascii_uppercase() => 8.0,
        _ => 7.0,
    }
}

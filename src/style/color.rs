//! Color normalization.
//!
//! Colors are compared in a canonical lowercase `#rrggbb` form. Alpha is
//! ignored for comparison. Named colors are not resolved, so `"red"` and
//! `"#ff0000"` stay distinct.

/// Normalize a color-like string for comparison.
///
/// - `#rgb`, `#rrggbb`, `#rrggbbaa` become `#rrggbb` (alpha dropped)
/// - `rgb(r, g, b)` / `rgba(r, g, b, a)` become `#rrggbb`, channels clamped
/// - other plain tokens (`red`, `hsl(...)`) come back trimmed and lowercased
///
/// Returns `None` for malformed hex or rgb syntax and for strings that
/// cannot be a color token at all.
pub fn normalize_color(input: &str) -> Option<String> {
    let s = input.trim().to_lowercase();

    if let Some(hex) = s.strip_prefix('#') {
        return normalize_hex(hex);
    }

    if let Some(inner) = rgb_function_args(&s) {
        return normalize_rgb(inner);
    }

    if s.starts_with("rgb") || !is_color_token(&s) {
        return None;
    }

    Some(s)
}

fn normalize_hex(hex: &str) -> Option<String> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => Some(format!("#{}", hex.chars().flat_map(|c| [c, c]).collect::<String>())),
        6 => Some(format!("#{}", hex)),
        8 => Some(format!("#{}", &hex[..6])),
        _ => None,
    }
}

/// Inner argument list of `rgb(...)` or `rgba(...)`.
fn rgb_function_args(s: &str) -> Option<&str> {
    let inner = s
        .strip_prefix("rgba(")
        .or_else(|| s.strip_prefix("rgb("))?;
    inner.strip_suffix(')')
}

fn normalize_rgb(inner: &str) -> Option<String> {
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    let mut hex = String::from("#");
    for part in &parts[..3] {
        let channel = leading_integer(part)?.clamp(0, 255);
        hex.push_str(&format!("{:02x}", channel));
    }
    Some(hex)
}

/// Integer prefix of a component: `"255"`, `"12.5"` and `"50%"` all parse,
/// `"abc"` does not.
fn leading_integer(s: &str) -> Option<i64> {
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Saturate absurdly long digit runs; the result is clamped anyway.
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * value)
}

fn is_color_token(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || c.is_ascii_whitespace()
                || matches!(c, '-' | '_' | '.' | ',' | '(' | ')' | '%' | '/')
        })
}

/// Convert `#rgb` or `#rrggbb` (the `#` is optional) to an `rgba(...)` string.
///
/// Unsupported lengths yield opaque black.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> String {
    let hex = hex.trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return "rgba(0, 0, 0, 1)".to_string();
    }
    let expanded = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => hex.to_string(),
        _ => return "rgba(0, 0, 0, 1)".to_string(),
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => format!("rgba({}, {}, {}, {})", r, g, b, alpha),
        _ => "rgba(0, 0, 0, 1)".to_string(),
    }
}

/// Convert an `rgb(...)`/`rgba(...)` string to `#rrggbb`, or `#000000` when
/// it cannot be read.
pub fn rgba_to_hex(rgba: &str) -> String {
    rgb_function_args(rgba.trim())
        .and_then(normalize_rgb)
        .unwrap_or_else(|| "#000000".to_string())
}

/// Tidy up a color typed by a user.
///
/// Recognized colors pass through unchanged, bare hex digits get a `#`
/// (3-digit forms expanded), and anything else falls back to `#000000`.
pub fn normalize_color_input(input: &str) -> String {
    let trimmed = input.trim();
    let is_hex = |s: &str| s.chars().all(|c| c.is_ascii_hexdigit());

    if trimmed.len() == 6 && is_hex(trimmed) {
        return format!("#{}", trimmed);
    }
    if trimmed.len() == 3 && is_hex(trimmed) {
        return format!("#{}", trimmed.chars().flat_map(|c| [c, c]).collect::<String>());
    }
    if normalize_color(trimmed).is_some() {
        return trimmed.to_string();
    }
    "#000000".to_string()
}

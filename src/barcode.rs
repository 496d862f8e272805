//! Code 39 barcode generation.
//!
//! Symbols are rendered as SVG and embedded as base64 data URIs, so the
//! same input always produces byte-identical markup.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BarcodeError {
    #[error("character {0:?} cannot be encoded as Code 39")]
    UnsupportedCharacter(char),
}

/// Nine-element width pattern for a symbol, alternating bar/space starting
/// with a bar. `n` is a narrow element (1 module), `w` a wide one (3).
fn pattern(c: char) -> Option<&'static str> {
    Some(match c {
        '0' => "nnnwwnwnn",
        '1' => "wnnwnnnnw",
        '2' => "nnwwnnnnw",
        '3' => "wnwwnnnnn",
        '4' => "nnnwwnnnw",
        '5' => "wnnwwnnnn",
        '6' => "nnwwwnnnn",
        '7' => "nnnwnnwnw",
        '8' => "wnnwnnwnn",
        '9' => "nnwwnnwnn",
        'A' => "wnnnnwnnw",
        'B' => "nnwnnwnnw",
        'C' => "wnwnnwnnn",
        'D' => "nnnnwwnnw",
        'E' => "wnnnwwnnn",
        'F' => "nnwnwwnnn",
        'G' => "nnnnnwwnw",
        'H' => "wnnnnwwnn",
        'I' => "nnwnnwwnn",
        'J' => "nnnnwwwnn",
        'K' => "wnnnnnnww",
        'L' => "nnwnnnnww",
        'M' => "wnwnnnnwn",
        'N' => "nnnnwnnww",
        'O' => "wnnnwnnwn",
        'P' => "nnwnwnnwn",
        'Q' => "nnnnnnwww",
        'R' => "wnnnnnwwn",
        'S' => "nnwnnnwwn",
        'T' => "nnnnwnwwn",
        'U' => "wwnnnnnnw",
        'V' => "nwwnnnnnw",
        'W' => "wwwnnnnnn",
        'X' => "nwnnwnnnw",
        'Y' => "wwnnwnnnn",
        'Z' => "nwwnwnnnn",
        '-' => "nwnnnnwnw",
        '.' => "wwnnnnwnn",
        ' ' => "nwwnnnwnn",
        '$' => "nwnwnwnnn",
        '/' => "nwnwnnnwn",
        '+' => "nwnnnwnwn",
        '%' => "nnnwnwnwn",
        '*' => "nwnnwnwnn",
        _ => return None,
    })
}

/// A horizontal run of modules: bars are drawn, spaces only advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    bar: bool,
    modules: u32,
}

/// A symbol encoded once, ready to be rasterized at any size.
#[derive(Debug, Clone)]
pub struct Code39 {
    runs: Vec<Run>,
}

impl Code39 {
    pub fn encode(text: &str) -> Result<Self, BarcodeError> {
        Ok(Self {
            runs: encode(text)?,
        })
    }

    /// Rasterize to SVG, `module_width` pixels per module and `height`
    /// pixels tall.
    pub fn to_svg(&self, module_width: u32, height: u32) -> String {
        let total_modules: u32 = self.runs.iter().map(|r| r.modules).sum();
        let width = total_modules * module_width;

        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
             viewBox=\"0 0 {width} {height}\" shape-rendering=\"crispEdges\">"
        );
        svg.push_str(&format!(
            "<rect width=\"{width}\" height=\"{height}\" fill=\"#ffffff\"/>"
        ));

        let mut x = 0u32;
        for run in &self.runs {
            let w = run.modules * module_width;
            if run.bar {
                svg.push_str(&format!(
                    "<rect x=\"{x}\" y=\"0\" width=\"{w}\" height=\"{height}\" fill=\"#000000\"/>"
                ));
            }
            x += w;
        }
        svg.push_str("</svg>");
        svg
    }

    /// Rasterize and wrap as a `data:` URI suitable for an `<img>` src.
    pub fn to_data_uri(&self, module_width: u32, height: u32) -> String {
        format!(
            "data:image/svg+xml;base64,{}",
            BASE64.encode(self.to_svg(module_width, height).as_bytes())
        )
    }
}

/// Encode `text` between start/stop delimiters into bar/space runs.
///
/// The delimiter `*` is reserved and rejected in the payload, as is any
/// character outside the Code 39 alphabet.
fn encode(text: &str) -> Result<Vec<Run>, BarcodeError> {
    let mut runs = Vec::with_capacity((text.len() + 2) * 10);

    let mut push_symbol = |p: &str| {
        for (i, elem) in p.chars().enumerate() {
            runs.push(Run {
                bar: i % 2 == 0,
                modules: if elem == 'w' { 3 } else { 1 },
            });
        }
        // inter-character gap
        runs.push(Run {
            bar: false,
            modules: 1,
        });
    };

    push_symbol(pattern('*').unwrap());
    for c in text.chars() {
        if c == '*' {
            return Err(BarcodeError::UnsupportedCharacter(c));
        }
        let p = pattern(c).ok_or(BarcodeError::UnsupportedCharacter(c))?;
        push_symbol(p);
    }
    push_symbol(pattern('*').unwrap());

    // no gap after the stop symbol
    runs.pop();
    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipping_id_encodes() {
        let runs = encode("54103029").unwrap();
        // 10 symbols of 9 elements, 9 inter-character gaps
        assert_eq!(runs.len(), 10 * 9 + 9);
        assert!(runs.first().unwrap().bar);
        assert!(runs.last().unwrap().bar);
    }

    #[test]
    fn every_symbol_has_three_wide_elements() {
        for c in "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ-. */+%$".chars() {
            let p = pattern(c).unwrap();
            assert_eq!(p.len(), 9, "{c:?}");
            assert_eq!(p.chars().filter(|&e| e == 'w').count(), 3, "{c:?}");
        }
    }

    #[test]
    fn unsupported_character_is_rejected() {
        assert_eq!(
            encode("ORDER!"),
            Err(BarcodeError::UnsupportedCharacter('!'))
        );
        assert_eq!(encode("a1"), Err(BarcodeError::UnsupportedCharacter('a')));
    }

    #[test]
    fn delimiter_is_not_a_payload_character() {
        assert_eq!(encode("*54*"), Err(BarcodeError::UnsupportedCharacter('*')));
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = Code39::encode("54103029").unwrap().to_data_uri(2, 60);
        let b = Code39::encode("54103029").unwrap().to_data_uri(2, 60);
        assert_eq!(a, b);
        assert!(a.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn svg_width_matches_module_count() {
        let bars = Code39::encode("1").unwrap();
        let modules: u32 = bars.runs.iter().map(|r| r.modules).sum();
        let svg = bars.to_svg(2, 60);
        assert!(svg.contains(&format!("width=\"{}\"", modules * 2)));
    }

    /// Decode an SVG produced by `to_svg` back into the payload string, by
    /// reading bar widths out of the rect elements.
    fn decode_svg(svg: &str, module_width: u32) -> String {
        let mut bars: Vec<(u32, u32)> = Vec::new();
        for rect in svg.split("<rect ").skip(1) {
            if !rect.contains("#000000") {
                continue;
            }
            let attr = |name: &str| -> u32 {
                let start = rect.find(&format!("{name}=\"")).unwrap() + name.len() + 2;
                let end = start + rect[start..].find('"').unwrap();
                rect[start..end].parse().unwrap()
            };
            bars.push((attr("x"), attr("width")));
        }

        // rebuild the n/w element sequence; every gap between consecutive
        // bars is a single space element (inter-character gaps included)
        let mut elements = String::new();
        for (i, (x, w)) in bars.iter().enumerate() {
            elements.push(if w / module_width == 3 { 'w' } else { 'n' });
            if let Some((next_x, _)) = bars.get(i + 1) {
                let gap = (next_x - x - w) / module_width;
                elements.push(if gap >= 3 { 'w' } else { 'n' });
            }
        }

        let mut decoded = String::new();
        let symbols: Vec<&str> = elements
            .as_bytes()
            .chunks(10)
            .map(|c| std::str::from_utf8(&c[..9]).unwrap())
            .collect();
        for symbol in symbols {
            for c in "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ-. */+%$".chars() {
                if pattern(c) == Some(symbol) {
                    decoded.push(c);
                    break;
                }
            }
        }
        decoded.trim_matches('*').to_string()
    }

    #[test]
    fn barcode_round_trips_through_svg() {
        let svg = Code39::encode("54103029").unwrap().to_svg(2, 60);
        assert_eq!(decode_svg(&svg, 2), "54103029");
    }
}

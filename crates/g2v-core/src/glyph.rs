// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Procedural glyph synthesis.
//!
//! A small, fixed vocabulary of tokens maps onto deterministic square bitmaps.
//! Tokens are matched after collapsing typographic hyphen variants, trimming
//! whitespace and lowercasing, so `"I-Glyph"`, `"I‑Glyph"` and `" i glyph "`
//! all name the same pattern. Pixel marking is always assignment, never
//! accumulation, so patterns that revisit a pixel stay binary.

use core::f64::consts::PI;
use core::fmt;
use core::str::FromStr;

use ndarray::{s, Array2};

use crate::error::{G2vError, G2vResult};
use crate::Glyph;

/// Edge length used when a caller does not pick one.
pub const DEFAULT_GLYPH_SIZE: usize = 32;

/// Smallest edge length that is still rejected.
const MIN_EXCLUSIVE_SIZE: usize = 4;

const SPIRAL_TURNS: u32 = 3;

/// Named procedural patterns understood by the synthesizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlyphToken {
    /// Filled square with a thin margin.
    IGlyph,
    /// Horizontal bar through the vertical centre.
    OctaveCycleDrive,
    /// Vertical bar through the horizontal centre.
    MirrorPulse,
    /// Both diagonals.
    MirrorHold,
    /// Square ring.
    GraviSystem,
    /// Three-turn Archimedean spiral.
    SpiralborneCodex,
}

impl GlyphToken {
    pub const ALL: [GlyphToken; 6] = [
        GlyphToken::IGlyph,
        GlyphToken::OctaveCycleDrive,
        GlyphToken::MirrorPulse,
        GlyphToken::MirrorHold,
        GlyphToken::GraviSystem,
        GlyphToken::SpiralborneCodex,
    ];

    pub fn canonical_name(self) -> &'static str {
        match self {
            GlyphToken::IGlyph => "I-Glyph",
            GlyphToken::OctaveCycleDrive => "Octave Cycle Drive",
            GlyphToken::MirrorPulse => "MirrorPulse",
            GlyphToken::MirrorHold => "MirrorHold",
            GlyphToken::GraviSystem => "GraviSystem",
            GlyphToken::SpiralborneCodex => "Spiralborne Codex",
        }
    }

    /// Renders the pattern on a `size × size` grid.
    pub fn synthesize(self, size: usize) -> G2vResult<Glyph> {
        ensure_size(size)?;
        Ok(self.render(size))
    }

    fn render(self, n: usize) -> Glyph {
        match self {
            GlyphToken::IGlyph => filled_square(n, (n / 8).max(1)),
            GlyphToken::OctaveCycleDrive => horizontal_bar(n, (n / 12).max(1)),
            GlyphToken::MirrorPulse => vertical_bar(n, (n / 12).max(1)),
            GlyphToken::MirrorHold => diagonal_cross(n, (n / 20).max(1)),
            GlyphToken::GraviSystem => {
                let outer = filled_square(n, (n / 6).max(1));
                let inner = filled_square(n, (n / 4).max(1));
                outer - inner
            }
            GlyphToken::SpiralborneCodex => spiral(n, SPIRAL_TURNS),
        }
    }
}

impl fmt::Display for GlyphToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

impl FromStr for GlyphToken {
    type Err = G2vError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let parsed = match normalise_token(token).as_str() {
            "i-glyph" | "i glyph" | "i" => GlyphToken::IGlyph,
            "octave cycle drive" => GlyphToken::OctaveCycleDrive,
            "mirrorpulse" => GlyphToken::MirrorPulse,
            "mirrorhold" => GlyphToken::MirrorHold,
            "gravisystem" => GlyphToken::GraviSystem,
            "spiralborne codex" => GlyphToken::SpiralborneCodex,
            _ => {
                return Err(G2vError::UnknownToken {
                    token: token.to_string(),
                })
            }
        };
        Ok(parsed)
    }
}

/// Collapses non-breaking hyphen, en dash and em dash to `-`, trims and lowercases.
pub fn normalise_token(token: &str) -> String {
    token
        .replace(['\u{2011}', '\u{2013}', '\u{2014}'], "-")
        .trim()
        .to_lowercase()
}

/// Synthesizes the glyph named by `token`.
///
/// The size is checked before the token is looked up.
pub fn glyph_from_token(token: &str, size: usize) -> G2vResult<Glyph> {
    ensure_size(size)?;
    let parsed: GlyphToken = token.parse()?;
    tracing::debug!(token, pattern = %parsed, size, "synthesizing glyph");
    Ok(parsed.render(size))
}

fn ensure_size(size: usize) -> G2vResult<()> {
    if size <= MIN_EXCLUSIVE_SIZE {
        return Err(G2vError::InvalidSize { size });
    }
    Ok(())
}

fn filled_square(n: usize, pad: usize) -> Glyph {
    let mut a = Array2::zeros((n, n));
    let end = n.saturating_sub(pad);
    if pad < end {
        a.slice_mut(s![pad..end, pad..end]).fill(1.0);
    }
    a
}

/// Half-open `[start, end)` span of a strip centred on `n / 2`, clipped to the grid.
fn centred_strip(n: usize, thickness: usize) -> (usize, usize) {
    let mid = n / 2;
    let start = mid.saturating_sub(thickness / 2);
    let end = (mid + (thickness - thickness / 2)).min(n);
    (start, end)
}

fn horizontal_bar(n: usize, thickness: usize) -> Glyph {
    let mut a = Array2::zeros((n, n));
    let (start, end) = centred_strip(n, thickness);
    a.slice_mut(s![start..end, ..]).fill(1.0);
    a
}

fn vertical_bar(n: usize, thickness: usize) -> Glyph {
    let mut a = Array2::zeros((n, n));
    let (start, end) = centred_strip(n, thickness);
    a.slice_mut(s![.., start..end]).fill(1.0);
    a
}

fn diagonal_cross(n: usize, thickness: usize) -> Glyph {
    let mut a = Array2::zeros((n, n));
    let side = n as i64;
    let thickness = thickness as i64;
    // Floor division: a thickness of 1 covers offsets {-1, 0}.
    let lo = (-thickness).div_euclid(2);
    let hi = (thickness + 1).div_euclid(2);
    for i in 0..side {
        for t in lo..hi {
            for j in [i + t, (side - 1 - i) + t] {
                if (0..side).contains(&j) {
                    a[[i as usize, j as usize]] = 1.0;
                }
            }
        }
    }
    a
}

fn spiral(n: usize, turns: u32) -> Glyph {
    let mut a = Array2::zeros((n, n));
    let side = n as i64;
    let centre = (n as f64 - 1.0) / 2.0;
    let max_radius = (n as f64 - 2.0) / 2.0;
    let steps = n * n;
    for k in 0..steps {
        let t = k as f64 / steps as f64;
        let angle = 2.0 * PI * f64::from(turns) * t;
        let r = max_radius * t;
        let x = (centre + r * angle.cos()).round_ties_even() as i64;
        let y = (centre + r * angle.sin()).round_ties_even() as i64;
        if (0..side).contains(&x) && (0..side).contains(&y) {
            a[[y as usize, x as usize]] = 1.0;
        }
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_binary(a: &Glyph) -> bool {
        a.iter().all(|&v| v == 0.0 || v == 1.0)
    }

    #[test]
    fn rejects_small_sizes() {
        for size in 0..=4 {
            let err = glyph_from_token("I-Glyph", size).unwrap_err();
            assert_eq!(err, G2vError::InvalidSize { size });
        }
        assert!(glyph_from_token("I-Glyph", 5).is_ok());
    }

    #[test]
    fn size_is_checked_before_token() {
        let err = glyph_from_token("nonsense", 2).unwrap_err();
        assert_eq!(err, G2vError::InvalidSize { size: 2 });
    }

    #[test]
    fn hyphen_variants_normalise_to_the_same_glyph() {
        let plain = glyph_from_token("I-Glyph", 32).unwrap();
        let nb_hyphen = glyph_from_token("I\u{2011}Glyph", 32).unwrap();
        let en_dash = glyph_from_token("I\u{2013}Glyph", 32).unwrap();
        let em_dash = glyph_from_token("  I\u{2014}GLYPH ", 32).unwrap();
        let spaced = glyph_from_token("i glyph", 32).unwrap();
        let short = glyph_from_token("I", 32).unwrap();
        for other in [&nb_hyphen, &en_dash, &em_dash, &spaced, &short] {
            assert_eq!(&plain, other);
        }
    }

    #[test]
    fn unknown_token_keeps_caller_spelling() {
        let err = glyph_from_token("  Unknown\u{2013}Token ", 32).unwrap_err();
        assert_eq!(
            err,
            G2vError::UnknownToken {
                token: "  Unknown\u{2013}Token ".to_string()
            }
        );
    }

    #[test]
    fn every_token_has_square_shape_and_distinct_content() {
        let glyphs: Vec<Glyph> = GlyphToken::ALL
            .iter()
            .map(|token| glyph_from_token(token.canonical_name(), 32).unwrap())
            .collect();
        for g in &glyphs {
            assert_eq!(g.dim(), (32, 32));
            assert!(g.sum() > 0.0);
        }
        for i in 0..glyphs.len() {
            for j in (i + 1)..glyphs.len() {
                assert_ne!(glyphs[i], glyphs[j], "{i} vs {j}");
            }
        }
    }

    #[test]
    fn canonical_names_round_trip_through_parse() {
        for token in GlyphToken::ALL {
            assert_eq!(token.canonical_name().parse::<GlyphToken>().unwrap(), token);
        }
    }

    #[test]
    fn filled_square_respects_padding() {
        let g = GlyphToken::IGlyph.synthesize(8).unwrap();
        assert_eq!(g.sum(), 36.0);
        assert_eq!(g[[0, 0]], 0.0);
        assert_eq!(g[[1, 1]], 1.0);
        assert_eq!(g[[6, 6]], 1.0);
        assert_eq!(g[[7, 6]], 0.0);
    }

    #[test]
    fn bars_are_centred() {
        let h = GlyphToken::OctaveCycleDrive.synthesize(32).unwrap();
        for row in 0..32 {
            let expected = if row == 15 || row == 16 { 32.0 } else { 0.0 };
            assert_eq!(h.row(row).sum(), expected, "row {row}");
        }
        let v = GlyphToken::MirrorPulse.synthesize(32).unwrap();
        assert_eq!(v, h.t());
    }

    #[test]
    fn thin_bar_on_small_grid() {
        let h = GlyphToken::OctaveCycleDrive.synthesize(6).unwrap();
        assert_eq!(h.sum(), 6.0);
        assert_eq!(h.row(3).sum(), 6.0);
    }

    #[test]
    fn diagonal_cross_covers_offset_below_diagonal() {
        let g = GlyphToken::MirrorHold.synthesize(32).unwrap();
        assert!(is_binary(&g));
        assert_eq!(g[[0, 0]], 1.0);
        assert_eq!(g[[0, 31]], 1.0);
        assert_eq!(g[[5, 5]], 1.0);
        assert_eq!(g[[5, 4]], 1.0);
        assert_eq!(g[[5, 6]], 0.0);
        assert_eq!(g[[5, 26]], 1.0);
        assert_eq!(g[[5, 25]], 1.0);
    }

    #[test]
    fn ring_has_hollow_centre() {
        let g = GlyphToken::GraviSystem.synthesize(32).unwrap();
        assert!(is_binary(&g));
        assert_eq!(g[[0, 0]], 0.0);
        assert_eq!(g[[5, 5]], 1.0);
        assert_eq!(g[[7, 16]], 1.0);
        assert_eq!(g[[16, 16]], 0.0);
        assert_eq!(g.sum(), (22 * 22 - 16 * 16) as f64);
    }

    #[test]
    fn spiral_starts_at_centre_and_stays_binary() {
        let g = GlyphToken::SpiralborneCodex.synthesize(32).unwrap();
        assert!(is_binary(&g));
        assert_eq!(g[[16, 16]], 1.0);
        assert_eq!(g.row(0).sum(), 0.0);
        assert_eq!(g.column(0).sum(), 0.0);
    }

    #[test]
    fn synthesis_is_deterministic() {
        for token in GlyphToken::ALL {
            assert_eq!(token.synthesize(17).unwrap(), token.synthesize(17).unwrap());
        }
    }
}

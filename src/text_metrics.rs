use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

/// Advance assumed for characters without a glyph, as a fraction of font size.
const FALLBACK_ADVANCE: f32 = 0.6;

static SYSTEM_METRICS: Lazy<Option<SystemFontMetrics>> =
    Lazy::new(SystemFontMetrics::monospace);

/// Text measurement capability injected into the layout engine.
///
/// Layout is the one place this crate touches a platform facility; everything
/// behind this trait is swappable so layout stays testable without fonts.
pub trait TextMeasure {
    /// Width of `text` at `font_size`, in the same units as layout coordinates.
    fn measure(&self, text: &str, font_size: f32) -> f32;
}

/// Fixed per-character advance. Deterministic on any machine; used by tests
/// and as the fallback when no system monospace face can be found.
#[derive(Debug, Clone, Copy)]
pub struct CharMetrics {
    /// Advance per character as a fraction of the font size.
    pub advance: f32,
}

impl CharMetrics {
    pub const fn new(advance: f32) -> Self {
        Self { advance }
    }
}

impl Default for CharMetrics {
    fn default() -> Self {
        Self::new(FALLBACK_ADVANCE)
    }
}

impl TextMeasure for CharMetrics {
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        let count = text.chars().filter(|ch| *ch != '\n').count();
        count as f32 * self.advance * font_size
    }
}

/// Glyph-advance measurement against the system monospace face.
pub struct SystemFontMetrics {
    data: Vec<u8>,
    index: u32,
    units_per_em: f32,
    ascii_advances: [u16; 128],
    wide_cache: Mutex<HashMap<char, Option<u16>>>,
}

impl SystemFontMetrics {
    /// Queries the system font database for a monospace face. `None` when the
    /// host has no usable font, in which case callers fall back to
    /// [`CharMetrics`].
    pub fn monospace() -> Option<Self> {
        let mut db = Database::new();
        db.load_system_fonts();
        let query = Query {
            families: &[Family::Monospace],
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = db.query(&query)?;
        let mut loaded: Option<SystemFontMetrics> = None;
        db.with_face_data(id, |data, index| {
            if let Ok(face) = Face::parse(data, index) {
                let units_per_em = face.units_per_em().max(1);
                let mut ascii_advances = [0u16; 128];
                for byte in 0u8..=127 {
                    if let Some(glyph) = face.glyph_index(byte as char) {
                        ascii_advances[byte as usize] =
                            face.glyph_hor_advance(glyph).unwrap_or(0);
                    }
                }
                loaded = Some(SystemFontMetrics {
                    data: data.to_vec(),
                    index,
                    units_per_em: units_per_em as f32,
                    ascii_advances,
                    wide_cache: Mutex::new(HashMap::new()),
                });
            }
        });
        loaded
    }

    fn wide_advance(&self, ch: char) -> Option<u16> {
        if let Ok(mut cache) = self.wide_cache.lock() {
            if let Some(cached) = cache.get(&ch) {
                return *cached;
            }
            let advance = Face::parse(&self.data, self.index)
                .ok()
                .and_then(|face| {
                    let glyph = face.glyph_index(ch)?;
                    face.glyph_hor_advance(glyph)
                });
            cache.insert(ch, advance);
            advance
        } else {
            None
        }
    }
}

impl TextMeasure for SystemFontMetrics {
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        if text.is_empty() || font_size <= 0.0 {
            return 0.0;
        }
        let scale = font_size / self.units_per_em;
        let fallback = font_size * FALLBACK_ADVANCE;
        let normalized = text.replace('\t', "    ");
        let mut width = 0.0f32;
        for ch in normalized.chars() {
            if ch == '\n' {
                continue;
            }
            let advance = if ch.is_ascii() {
                let units = self.ascii_advances[ch as usize];
                (units != 0).then_some(units)
            } else {
                self.wide_advance(ch)
            };
            width += match advance {
                Some(units) => units as f32 * scale,
                None => fallback,
            };
        }
        width.max(0.0)
    }
}

/// The process-wide system measurer, when a monospace face exists.
pub fn system_metrics() -> Option<&'static SystemFontMetrics> {
    SYSTEM_METRICS.as_ref()
}

use std::collections::{BTreeMap, HashSet};

use log::debug;
use tf_core::{Error, PixelGrid};

use crate::assemble::{Glyph, GlyphConfig, glyph_from_grid};

pub const NOTDEF: &str = ".notdef";

/// `uniXXXX` name for a character, with at least four hex digits.
pub fn glyph_name(c: char) -> String {
    format!("uni{:04X}", u32::from(c))
}

/// Characters in first-seen order with duplicates and `'\n'` removed.
///
/// Other control characters, `'\r'` included, are kept and traced like any
/// other character.
pub fn unique_chars<I>(chars: I) -> Vec<char>
where
    I: IntoIterator<Item = char>,
{
    let mut seen = HashSet::new();
    chars
        .into_iter()
        .filter(|&c| c != '\n' && seen.insert(c))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRecord {
    pub name: String,
    pub codepoint: Option<char>,
    pub glyph: Glyph,
}

/// Glyphs in font order together with their character map.
///
/// Index 0 is always `.notdef`: an empty outline one em wide.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphSet {
    units_per_em: u32,
    records: Vec<GlyphRecord>,
    cmap: BTreeMap<char, usize>,
}

impl GlyphSet {
    pub fn new(units_per_em: u32) -> Self {
        Self {
            units_per_em,
            records: vec![GlyphRecord {
                name: NOTDEF.to_string(),
                codepoint: None,
                glyph: Glyph::empty(units_per_em),
            }],
            cmap: BTreeMap::new(),
        }
    }

    /// Traces one glyph per unique character, in input order.
    pub fn build<I, F, E>(chars: I, cfg: &GlyphConfig, mut load: F) -> Result<Self, E>
    where
        I: IntoIterator<Item = char>,
        F: FnMut(char) -> Result<PixelGrid, E>,
        E: From<Error>,
    {
        cfg.validate()?;
        let mut set = Self::new(cfg.units_per_em);
        for c in unique_chars(chars) {
            let grid = load(c)?;
            let glyph = glyph_from_grid(&grid, cfg)?;
            set.push(c, glyph);
        }
        Ok(set)
    }

    /// Like [`GlyphSet::build`], but loads and traces glyphs on the rayon
    /// pool. Records are merged by input position, so the result matches the
    /// sequential build.
    #[cfg(feature = "parallel")]
    pub fn build_parallel<I, F, E>(chars: I, cfg: &GlyphConfig, load: F) -> Result<Self, E>
    where
        I: IntoIterator<Item = char>,
        F: Fn(char) -> Result<PixelGrid, E> + Sync,
        E: From<Error> + Send,
    {
        use rayon::prelude::*;

        cfg.validate()?;
        let chars = unique_chars(chars);
        let traced: Vec<Result<(char, Glyph), E>> = chars
            .par_iter()
            .map(|&c| {
                let grid = load(c)?;
                let glyph = glyph_from_grid(&grid, cfg)?;
                Ok((c, glyph))
            })
            .collect();

        let mut set = Self::new(cfg.units_per_em);
        for item in traced {
            let (c, glyph) = item?;
            set.push(c, glyph);
        }
        Ok(set)
    }

    /// Appends a glyph for `c`. Returns `false` and leaves the set unchanged
    /// if `c` is already mapped.
    pub fn push(&mut self, c: char, glyph: Glyph) -> bool {
        if self.cmap.contains_key(&c) {
            debug!("skipping duplicate glyph for {c:?}");
            return false;
        }

        let index = self.records.len();
        self.records.push(GlyphRecord {
            name: glyph_name(c),
            codepoint: Some(c),
            glyph,
        });
        self.cmap.insert(c, index);
        true
    }

    pub fn units_per_em(&self) -> u32 {
        self.units_per_em
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when only `.notdef` is present.
    pub fn is_empty(&self) -> bool {
        self.records.len() <= 1
    }

    pub fn records(&self) -> &[GlyphRecord] {
        &self.records
    }

    pub fn get(&self, c: char) -> Option<&GlyphRecord> {
        self.cmap.get(&c).map(|&i| &self.records[i])
    }

    pub fn glyph_order(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|r| r.name.as_str())
    }

    /// Codepoint to glyph name, ordered by codepoint.
    pub fn char_map(&self) -> impl Iterator<Item = (char, &str)> + '_ {
        self.cmap
            .iter()
            .map(|(&c, &i)| (c, self.records[i].name.as_str()))
    }

    /// `(name, advance width, left side bearing)` in glyph order.
    ///
    /// Outlines start at the left edge of the bitmap, so the side bearing
    /// recorded is always 0.
    pub fn horizontal_metrics(&self) -> impl Iterator<Item = (&str, u32, i32)> + '_ {
        self.records
            .iter()
            .map(|r| (r.name.as_str(), r.glyph.advance_width, 0))
    }
}

#[cfg(test)]
mod tests {
    use tf_core::{Error, PixelGrid};

    use super::{GlyphSet, NOTDEF, glyph_name, unique_chars};
    use crate::assemble::GlyphConfig;

    fn load(c: char) -> Result<PixelGrid, Error> {
        if c == ' ' {
            return PixelGrid::blank(8, 8);
        }
        PixelGrid::from_on_pixels(8, 8, (0..8).map(|i| (i, i)))
    }

    #[test]
    fn names_use_four_hex_digits() {
        assert_eq!(glyph_name('A'), "uni0041");
        assert_eq!(glyph_name('!'), "uni0021");
        assert_eq!(glyph_name('\u{1F600}'), "uni1F600");
    }

    #[test]
    fn unique_chars_drop_newlines_and_repeats() {
        assert_eq!(unique_chars("AB\nBA C".chars()), vec!['A', 'B', ' ', 'C']);
    }

    #[test]
    fn carriage_return_is_kept_as_a_character() {
        assert_eq!(unique_chars("A\r\nB\r\n".chars()), vec!['A', '\r', 'B']);
    }

    #[test]
    fn notdef_comes_first() {
        let set = GlyphSet::new(1024);

        assert!(set.is_empty());
        assert_eq!(set.len(), 1);
        assert_eq!(set.glyph_order().collect::<Vec<_>>(), vec![NOTDEF]);

        let notdef = &set.records()[0];
        assert!(notdef.glyph.is_empty());
        assert_eq!(notdef.glyph.advance_width, 1024);
    }

    #[test]
    fn build_keeps_input_order_and_maps_chars() {
        let set = GlyphSet::build("ZA Z".chars(), &GlyphConfig::default(), load)
            .expect("glyphs build");

        assert_eq!(
            set.glyph_order().collect::<Vec<_>>(),
            vec![NOTDEF, "uni005A", "uni0041", "uni0020"]
        );
        assert_eq!(
            set.char_map().collect::<Vec<_>>(),
            vec![(' ', "uni0020"), ('A', "uni0041"), ('Z', "uni005A")]
        );

        let space = set.get(' ').expect("space mapped");
        assert!(space.glyph.is_empty());
        assert_eq!(space.glyph.advance_width, 1024);

        let z = set.get('Z').expect("Z mapped");
        assert!(!z.glyph.is_empty());
        assert!(set.get('Q').is_none());

        let metrics: Vec<_> = set.horizontal_metrics().collect();
        assert_eq!(metrics.len(), 4);
        assert!(metrics.iter().all(|&(_, adv, lsb)| adv == 1024 && lsb == 0));
    }

    #[test]
    fn push_rejects_duplicates() {
        let mut set = GlyphSet::new(16);
        let grid = PixelGrid::blank(2, 2).expect("valid grid");
        let glyph = crate::glyph_from_grid(&grid, &GlyphConfig::default()).expect("valid config");

        assert!(set.push('x', glyph.clone()));
        assert!(!set.push('x', glyph));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn loader_errors_propagate() {
        let cfg = GlyphConfig::default();
        let out = GlyphSet::build("AB".chars(), &cfg, |c| {
            if c == 'B' {
                Err(Error::InvalidDimensions {
                    width: 0,
                    height: 0,
                })
            } else {
                load(c)
            }
        });
        assert!(out.is_err());

        let bad = GlyphConfig {
            units_per_em: 0,
            ..GlyphConfig::default()
        };
        assert_eq!(
            GlyphSet::build("A".chars(), &bad, load),
            Err(Error::InvalidUnitsPerEm(0))
        );
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_build_matches_sequential() {
        let chars = "THE QUICK BROWN FOX JUMPS OVER THE LAZY DOG!";
        let cfg = GlyphConfig::default();

        let seq = GlyphSet::build(chars.chars(), &cfg, load).expect("glyphs build");
        let par = GlyphSet::build_parallel(chars.chars(), &cfg, load).expect("glyphs build");
        assert_eq!(seq, par);
    }
}

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::caption::model::{FontFamily, normalize_family_key};
use crate::foundation::error::{MemeError, MemeResult};

/// Environment variable naming a directory of caption fonts.
pub const FONT_DIR_ENV: &str = "MEMEGEN_FONT_DIR";

const FONT_EXTENSIONS: [&str; 3] = ["ttf", "otf", "ttc"];

/// Raw font file bytes plus where they came from (for diagnostics).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontSource {
    bytes: Arc<Vec<u8>>,
    origin: String,
}

impl FontSource {
    /// Wrap in-memory font bytes. `origin` is only used in error messages and logs.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>, origin: impl Into<String>) -> Self {
        Self {
            bytes: Arc::new(bytes.into()),
            origin: origin.into(),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> MemeResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| MemeError::font(format!("read font '{}': {e}", path.display())))?;
        Ok(Self::from_bytes(bytes, path.display().to_string()))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }
}

/// Registry of font data for the caption font families.
///
/// A family without its own font resolves to the fallback font, which is the explicitly set
/// fallback, else the first registered family in [`FontFamily::ALL`] order, else the first
/// unmatched font file found by [`FontBook::from_dir`].
#[derive(Clone, Debug, Default)]
pub struct FontBook {
    families: BTreeMap<FontFamily, FontSource>,
    fallback: Option<FontSource>,
    /// Files found by a directory scan whose names match no family.
    spare: Vec<FontSource>,
}

/// Result of resolving a family against a [`FontBook`].
#[derive(Clone, Copy, Debug)]
pub struct ResolvedFont<'a> {
    /// Font bytes to draw the family with.
    pub source: &'a FontSource,
    /// `true` when the family had no font of its own.
    pub is_fallback: bool,
}

impl FontBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, family: FontFamily, source: FontSource) -> &mut Self {
        self.families.insert(family, source);
        self
    }

    pub fn with_font(mut self, family: FontFamily, source: FontSource) -> Self {
        self.insert(family, source);
        self
    }

    pub fn set_fallback(&mut self, source: FontSource) -> &mut Self {
        self.fallback = Some(source);
        self
    }

    pub fn with_fallback(mut self, source: FontSource) -> Self {
        self.set_fallback(source);
        self
    }

    /// Scan `dir` (non-recursively) for font files.
    ///
    /// A file is registered for a family when its stem, normalized the same way as
    /// [`FontFamily::normalized_name`], equals the family's name (`Impact.ttf`,
    /// `comic_sans_ms.ttf`, `Times-New-Roman.otf`). Other font files become fallback candidates.
    pub fn from_dir(dir: impl AsRef<Path>) -> MemeResult<Self> {
        let dir = dir.as_ref();
        let rd = std::fs::read_dir(dir)
            .map_err(|e| MemeError::font(format!("read font dir '{}': {e}", dir.display())))?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in rd {
            let entry = entry.map_err(|e| {
                MemeError::font(format!("read font dir '{}': {e}", dir.display()))
            })?;
            let path = entry.path();
            let is_font = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| FONT_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
            if is_font && path.is_file() {
                paths.push(path);
            }
        }
        // Deterministic fallback choice regardless of directory iteration order.
        paths.sort();

        let mut book = Self::new();
        for path in paths {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(normalize_family_key)
                .unwrap_or_default();
            let family = FontFamily::ALL
                .into_iter()
                .find(|f| f.normalized_name() == stem);
            let source = FontSource::from_path(&path)?;
            match family {
                Some(f) if !book.families.contains_key(&f) => {
                    tracing::debug!(family = %f, path = %path.display(), "registered font");
                    book.families.insert(f, source);
                }
                _ => book.spare.push(source),
            }
        }
        Ok(book)
    }

    /// Load fonts from the directory named by `MEMEGEN_FONT_DIR`, if set.
    pub fn from_env() -> MemeResult<Option<Self>> {
        match std::env::var_os(FONT_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::from_dir(PathBuf::from(dir)).map(Some),
            _ => Ok(None),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty() && self.fallback.is_none() && self.spare.is_empty()
    }

    pub fn contains(&self, family: FontFamily) -> bool {
        self.families.contains_key(&family)
    }

    pub fn families(&self) -> impl Iterator<Item = FontFamily> + '_ {
        self.families.keys().copied()
    }

    pub fn fallback(&self) -> Option<&FontSource> {
        self.fallback
            .as_ref()
            .or_else(|| self.families.values().next())
            .or_else(|| self.spare.first())
    }

    /// Font for `family`, or the fallback font when it has none. `None` only for an empty book.
    pub fn resolve(&self, family: FontFamily) -> Option<ResolvedFont<'_>> {
        if let Some(source) = self.families.get(&family) {
            return Some(ResolvedFont {
                source,
                is_fallback: false,
            });
        }
        self.fallback().map(|source| ResolvedFont {
            source,
            is_fallback: true,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;

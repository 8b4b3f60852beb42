//! Process-wide font registration.
//!
//! Custom font files are registered once, before the first conversion.
//! Family names are matched case-insensitively.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::OnceLock;

use thiserror::Error;
use tracing::info;

/// Errors raised while registering fonts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FontRegistryError {
    /// Fonts have already been registered for this process
    #[error("Fonts are already registered")]
    AlreadyInitialized,

    /// The same family was listed twice
    #[error("Font family registered twice: {0}")]
    DuplicateFamily(String),
}

/// A font file and the family name it is registered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSource {
    pub family: String,
    pub path: PathBuf,
}

impl FontSource {
    pub fn new(family: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            family: family.into(),
            path: path.into(),
        }
    }
}

/// Set of registered font families.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontRegistry {
    fonts: BTreeMap<String, FontSource>,
}

static REGISTRY: OnceLock<FontRegistry> = OnceLock::new();
static EMPTY: FontRegistry = FontRegistry {
    fonts: BTreeMap::new(),
};

impl FontRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from font sources.
    pub fn with_fonts<I>(fonts: I) -> Result<Self, FontRegistryError>
    where
        I: IntoIterator<Item = FontSource>,
    {
        let mut registry = Self::new();
        for font in fonts {
            let key = family_key(&font.family);
            if registry.fonts.contains_key(&key) {
                return Err(FontRegistryError::DuplicateFamily(font.family));
            }
            registry.fonts.insert(key, font);
        }
        Ok(registry)
    }

    /// Whether `family` has been registered.
    pub fn is_available(&self, family: &str) -> bool {
        self.fonts.contains_key(&family_key(family))
    }

    /// Look up the source registered for `family`.
    pub fn get(&self, family: &str) -> Option<&FontSource> {
        self.fonts.get(&family_key(family))
    }

    /// Registered family names, as given at registration.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.fonts.values().map(|f| f.family.as_str())
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

/// Register the process-wide fonts.
///
/// Succeeds at most once per process; later calls, including concurrent
/// ones that lose the race, return [`FontRegistryError::AlreadyInitialized`].
pub fn register_fonts<I>(fonts: I) -> Result<&'static FontRegistry, FontRegistryError>
where
    I: IntoIterator<Item = FontSource>,
{
    let registry = FontRegistry::with_fonts(fonts)?;
    let mut installed = false;
    let current = REGISTRY.get_or_init(|| {
        installed = true;
        registry
    });

    if !installed {
        return Err(FontRegistryError::AlreadyInitialized);
    }
    info!(count = current.len(), "Registered fonts");
    Ok(current)
}

/// The registered fonts, or an empty registry before registration.
pub fn font_registry() -> &'static FontRegistry {
    REGISTRY.get().unwrap_or(&EMPTY)
}

fn family_key(family: &str) -> String {
    family.trim().to_lowercase()
}

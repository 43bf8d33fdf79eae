//! Image asset manifest: which images a renderer can resolve by name.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::catalog::TileCatalog;
use crate::models::Side;

pub const BACKGROUND_IMAGE: &str = "zombicideQuestBackground";
pub const ITEMS_NEEDED_IMAGE: &str = "itemsNeeded";
pub const TILE_PLACEMENT_IMAGE: &str = "tilePlacementImage";

#[derive(Debug, Clone, Default)]
pub struct AssetManifest {
    names: HashSet<String>,
}

impl AssetManifest {
    #[cfg(test)]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Images shipped with the app: both faces of every catalog tile
    /// (`"{number}{R|V}{code}"`) and the sheet decorations.
    pub fn bundled(catalog: &TileCatalog) -> Self {
        let mut names: HashSet<String> = catalog
            .tiles()
            .iter()
            .flat_map(|tile| {
                [Side::R, Side::V].into_iter().map(move |side| {
                    format!(
                        "{}{}{}",
                        tile.label(),
                        side.as_str().to_ascii_uppercase(),
                        tile.source_game.code()
                    )
                })
            })
            .collect();
        names.extend(
            [BACKGROUND_IMAGE, ITEMS_NEEDED_IMAGE, TILE_PLACEMENT_IMAGE]
                .into_iter()
                .map(String::from),
        );
        Self { names }
    }

    /// Indexes the file stems of every regular file in `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read asset directory '{}'", dir.display()))?;

        let mut names = HashSet::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.insert(stem.to_string());
            }
        }

        info!("Indexed {} image assets from {}", names.len(), dir.display());
        Ok(Self { names })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

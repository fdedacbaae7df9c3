use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context as _;

use orrery::universe::Universe;

use crate::{ParameterSettings, UniverseTemplate};

/// Source of the universe to create/load.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum UniverseSource {
    /// Create a universe from a built-in template.
    Template(UniverseTemplate),
    /// Read the given save file.
    File(PathBuf),
}

impl UniverseSource {
    /// Creates or loads the universe, then applies the parameter overrides in `settings`
    /// to every scene.
    pub fn create_universe(self, settings: &ParameterSettings) -> Result<Universe, anyhow::Error> {
        let mut universe = match self {
            UniverseSource::Template(template) => {
                log::info!("Creating universe from template {template}");
                template.build(settings.defaults)
            }
            UniverseSource::File(path) => {
                log::info!("Loading universe from {}", path.display());
                let file = File::open(&path)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                serde_json::from_reader(BufReader::new(file))
                    .with_context(|| format!("failed to read universe from {}", path.display()))?
            }
        };
        settings.apply_to(&mut universe)?;
        Ok(universe)
    }
}

//! Startup seeding orchestration.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use thiserror::Error;
use tracing::info;

use crate::catalogue_seed::config::CatalogueSeedSettings;
use crate::domain::{CatalogueSeeder, CatalogueSeedingError, SeedDocument, SeedOutcome};

/// Errors returned while seeding at startup.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// The seed document could not be read.
    #[error("failed to read seed document at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The seed document is not valid JSON for the expected shape.
    #[error("invalid seed document at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Applying the document failed.
    #[error(transparent)]
    Seeding(#[from] CatalogueSeedingError),
}

/// Seed the catalogue when enabled; `None` means seeding was disabled.
///
/// # Examples
///
/// ```rust,no_run
/// use coursehub::catalogue_seed::{CatalogueSeedSettings, seed_catalogue_on_startup};
/// use coursehub::domain::CatalogueSeeder;
///
/// # async fn run(seeder: CatalogueSeeder) -> Result<(), Box<dyn std::error::Error>> {
/// let settings = CatalogueSeedSettings { enabled: false, path: None };
/// assert!(seed_catalogue_on_startup(&settings, &seeder).await?.is_none());
/// # Ok(())
/// # }
/// ```
pub async fn seed_catalogue_on_startup(
    settings: &CatalogueSeedSettings,
    seeder: &CatalogueSeeder,
) -> Result<Option<SeedOutcome>, StartupSeedingError> {
    if !settings.enabled {
        info!(reason = "disabled", "catalogue seeding skipped");
        return Ok(None);
    }

    let path = settings.path();
    let document = load_seed_document(&path)?;
    let outcome = seeder.seed(document).await?;
    match outcome {
        SeedOutcome::Applied { teachers, courses } => {
            info!(path = %path.display(), teachers, courses, "catalogue seed applied");
        }
        SeedOutcome::Skipped { existing_teachers } => {
            info!(existing_teachers, "catalogue already populated; seed skipped");
        }
    }
    Ok(Some(outcome))
}

/// Read and parse the seed document at `path`.
pub fn load_seed_document(path: &Path) -> Result<SeedDocument, StartupSeedingError> {
    let read_error = |source| StartupSeedingError::Read {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "seed path must name a file",
        ))
    })?;

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir.read_to_string(Path::new(file_name)).map_err(read_error)?;
    SeedDocument::from_json(&contents).map_err(|source| StartupSeedingError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

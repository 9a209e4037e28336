//! Catalogue seed configuration loaded via OrthoConfig.

use std::ffi::OsString;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

fn default_seed_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("catalogue-seed.json")
}

/// Settings controlling catalogue seeding at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CATALOGUE_SEED")]
pub struct CatalogueSeedSettings {
    /// Seed an empty catalogue on startup.
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// Seed document override.
    pub path: Option<PathBuf>,
}

impl CatalogueSeedSettings {
    /// Load settings from the environment and configuration files.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when a value cannot be parsed.
    pub fn load_from_env() -> std::io::Result<Self> {
        Self::load_from_iter([OsString::from("coursehub")])
            .map_err(|err| std::io::Error::other(format!("invalid seed settings: {err}")))
    }

    /// Seed document location, falling back to the bundled fixture.
    pub fn path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(default_seed_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load() -> CatalogueSeedSettings {
        CatalogueSeedSettings::load_from_env().expect("seed settings should load")
    }

    #[rstest]
    fn disabled_with_bundled_fixture_by_default() {
        let _guard = lock_env([
            ("CATALOGUE_SEED_ENABLED", None::<String>),
            ("CATALOGUE_SEED_PATH", None::<String>),
        ]);

        let settings = load();
        assert!(!settings.enabled);
        assert_eq!(settings.path(), default_seed_path());
        assert!(settings.path().ends_with("fixtures/catalogue-seed.json"));
    }

    #[rstest]
    fn environment_enables_and_relocates_the_seed() {
        let _guard = lock_env([
            ("CATALOGUE_SEED_ENABLED", Some("true".to_owned())),
            ("CATALOGUE_SEED_PATH", Some("/srv/seed/catalogue.json".to_owned())),
        ]);

        let settings = load();
        assert!(settings.enabled);
        assert_eq!(settings.path(), PathBuf::from("/srv/seed/catalogue.json"));
    }
}

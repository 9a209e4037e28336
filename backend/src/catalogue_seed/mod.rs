//! Startup wiring for catalogue seeding.

mod config;
mod startup;

pub use config::CatalogueSeedSettings;
pub use startup::{StartupSeedingError, load_seed_document, seed_catalogue_on_startup};

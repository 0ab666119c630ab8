//! Command implementations.

mod align;
mod crc;
mod info;
mod sweep;
mod validate;

pub use align::run_align;
pub use crc::run_crc_tables;
pub use info::run_info;
pub use sweep::run_sweep;
pub use validate::run_validate;

use std::path::Path;

use block_sync::Aligner;
use config_loader::{ConfigLoader, SyncBlueprint};
use tracing::info;

use crate::error::{CliError, Result};

/// Load the blueprint from `config`, or use the built-in defaults.
pub(crate) fn load_blueprint(config: Option<&Path>) -> Result<SyncBlueprint> {
    if let Some(path) = config {
        if !path.exists() {
            return Err(CliError::config_not_found(path.display().to_string()));
        }
        info!(config = %path.display(), "Loading configuration");
    }
    Ok(ConfigLoader::load_or_default(config)?)
}

pub(crate) fn build_aligner(blueprint: &SyncBlueprint) -> Result<Aligner> {
    Ok(Aligner::new(
        blueprint.geometry,
        blueprint.residues.clone(),
    )?)
}

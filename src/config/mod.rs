//! The `config` module loads registry and logging settings.
//!
//! Sources are layered, later ones winning:
//! 1. `config/default.{toml,yaml,json,...}` in the working directory (optional)
//! 2. variables from a `.env` file, if one is present
//! 3. `PUBSUB__SECTION__KEY` environment variables, e.g.
//!    `PUBSUB__REGISTRY__MATCH_MODE=segment`

mod settings;

use config::{Config, Environment, File};

use crate::utils::error::Result;
use settings::PartialSettings;

pub use settings::{LoggingSettings, RegistrySettings, Settings};

/// Environment variable prefix recognised by [`load_config`].
pub const ENV_PREFIX: &str = "PUBSUB";

/// Loads the configuration from the default file and environment variables
/// and merges it over `Settings::default()`.
pub fn load_config() -> Result<Settings> {
    // A missing .env file is not an error.
    let _ = dotenvy::dotenv();

    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        );

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    Ok(partial.merge_with_defaults())
}

#[cfg(test)]
mod tests;

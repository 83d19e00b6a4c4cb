//! Dataset config file source: a TOML file describing one dataset.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use config::FileFormat;
use std::path::Path;

/// Add the dataset config file to the builder. The file must exist.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    config_path: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = config_path.to_str().ok_or_else(|| {
        ConfigError::Message(format!(
            "Config path is not valid UTF-8: {}",
            config_path.display()
        ))
    })?;
    Ok(builder.add_source(File::new(path, FileFormat::Toml).required(true)))
}

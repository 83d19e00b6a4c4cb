//! Environment source: ANNOSTAT_<KEY>, nested keys joined by `__`.
//!
//! e.g. `ANNOSTAT_FILTER_CATEGORY=Diving`, `ANNOSTAT_LOGGING__LEVEL=debug`,
//! `ANNOSTAT_CLASS_LIST=Diving,Shotput`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const ENV_PREFIX: &str = "ANNOSTAT";

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("class_list")
            .try_parsing(true),
    )
}

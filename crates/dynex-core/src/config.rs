//! Runtime configuration.
//!
//! Every section has defaults, so an empty document (or no document at all)
//! is a valid configuration. Loading from disk lives in `dynex-store`.

use serde::{Deserialize, Serialize};

use crate::extract::ExtractOptions;
use crate::logging_facility::Profile;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynexConfig {
    pub extract: ExtractOptions,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub profile: Profile,
}

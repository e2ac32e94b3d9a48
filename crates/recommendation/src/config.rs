use serde::Deserialize;

/// Engine tunables with host-overridable defaults.
///
/// Hosts that configure the engine from a file deserialize this section;
/// everything has a default so an empty section (or `EngineConfig::default()`)
/// is valid.
#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    /// Fallback daily calorie target when neither the day's log nor the
    /// user's settings carry one
    #[serde(default = "default_calorie_target")]
    pub default_calorie_target: u32,
    /// Result count when the caller does not pass a limit
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    /// Upper bound on the catalog fetch, the largest and most variable-cost
    /// read in a recommendation request
    #[serde(default = "default_catalog_timeout_ms")]
    pub catalog_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_calorie_target: default_calorie_target(),
            default_limit: default_limit(),
            catalog_timeout_ms: default_catalog_timeout_ms(),
        }
    }
}

fn default_calorie_target() -> u32 {
    2000
}

fn default_limit() -> usize {
    10
}

fn default_catalog_timeout_ms() -> u64 {
    5_000
}

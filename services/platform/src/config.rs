use serde::Deserialize;

use encore_core::config::Config;

/// Platform service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct PlatformConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing session tokens. Required, no default.
    pub jwt_secret: String,
    /// Session token lifetime in seconds. Required, no default.
    pub jwt_ttl_secs: u64,
    /// TCP port to listen on (default 3110). Env var: `PLATFORM_PORT`.
    #[serde(default = "default_platform_port")]
    pub platform_port: u16,
    /// Period of the listen report task (default one week).
    #[serde(default = "default_stats_report_interval_secs")]
    pub stats_report_interval_secs: u64,
}

fn default_platform_port() -> u16 {
    3110
}

fn default_stats_report_interval_secs() -> u64 {
    7 * 24 * 60 * 60
}

impl Config for PlatformConfig {
    fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.trim().is_empty() {
            return Err("JWT_SECRET must not be empty".to_owned());
        }
        if self.jwt_ttl_secs == 0 {
            return Err("JWT_TTL_SECS must be positive".to_owned());
        }
        if self.stats_report_interval_secs == 0 {
            return Err("STATS_REPORT_INTERVAL_SECS must be positive".to_owned());
        }
        Ok(())
    }
}

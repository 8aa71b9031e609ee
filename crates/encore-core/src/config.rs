/// Trait for loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize` and call `Config::from_env()` at startup.
/// Field names map to upper-cased env vars (`jwt_secret` reads `JWT_SECRET`).
///
/// # Panics
///
/// `from_env` panics if any required env var is missing or cannot be deserialized,
/// or if [`Config::validate`] rejects the loaded values.
pub trait Config: Sized + serde::de::DeserializeOwned {
    fn from_env() -> Self {
        let config = Self::try_from_env().expect("failed to load config from environment");
        if let Err(reason) = config.validate() {
            panic!("invalid config: {reason}");
        }
        config
    }

    fn try_from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Semantic checks that deserialization alone cannot express.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

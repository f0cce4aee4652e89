/// Trait for loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize` and then call
/// `Config::from_env()` at startup. Field names map to upper-case env vars
/// (`database_url` ← `DATABASE_URL`).
///
/// # Panics
///
/// Panics if any required env var is missing or cannot be deserialized.
pub trait Config: Sized + serde::de::DeserializeOwned {
    fn from_env() -> Self {
        Self::try_from_env().expect("failed to load config from environment")
    }

    /// Like [`Config::from_env`], but returns the error instead of panicking.
    fn try_from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Load from an explicit list of `(NAME, value)` pairs. Used by tests.
    fn from_pairs<I>(pairs: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(pairs)
    }
}

use tracing::warn;

pub(crate) fn read_env_var(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        Ok(_) => None,
        Err(std::env::VarError::NotPresent) => None,
        Err(error) => {
            warn!(%name, %error, "environment variable could not be read; treating it as unset");
            None
        }
    }
}

//! Reading of Docker secrets mounted into the container.
use std::{fs, io, path::Path};

/// Where Docker mounts secret files.
const DOCKER_SECRETS_PATH: &str = "/run/secrets/";

/// Read the secret with the given name. Trailing newlines written by most
/// editors are stripped.
pub fn read_secret(name: &str) -> Result<String, io::Error> {
    let secret_val = fs::read_to_string(Path::new(DOCKER_SECRETS_PATH).join(name.to_lowercase()))?;
    Ok(secret_val.trim_end_matches(['\r', '\n']).to_owned())
}

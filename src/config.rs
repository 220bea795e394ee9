use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read host manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid host manifest {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no native host configured, pass --manifest or --host")]
    MissingHost,

    #[error("unsupported native host type {0:?}, only \"stdio\" is supported")]
    UnsupportedType(String),
}

/// A browser native-messaging host manifest.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HostManifest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub host_type: String,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(default)]
    pub allowed_extensions: Vec<String>,
}

impl HostManifest {
    /// Reads a manifest from disk. A relative `path` inside the manifest is
    /// resolved against the manifest's own directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut manifest: HostManifest =
            serde_json::from_str(&text).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        if manifest.host_type != "stdio" {
            return Err(ConfigError::UnsupportedType(manifest.host_type));
        }

        if manifest.path.is_relative() {
            if let Some(dir) = path.parent() {
                manifest.path = dir.join(&manifest.path);
            }
        }

        info!("Loaded native host manifest {}: {}", manifest.name, manifest.path.display());
        Ok(manifest)
    }
}

/// How to launch the native host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl HostConfig {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_manifest(manifest: &HostManifest) -> Self {
        Self::new(manifest.path.clone(), Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_manifest(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_manifest_with_absolute_path() {
        let file = write_manifest(
            r#"{
                "name": "com.example.wallet",
                "description": "Wallet host",
                "path": "/opt/wallet/host",
                "type": "stdio",
                "allowed_origins": ["chrome-extension://abc/"]
            }"#,
        );

        let manifest = HostManifest::load(file.path()).unwrap();
        assert_eq!(manifest.name, "com.example.wallet");
        assert_eq!(manifest.path, PathBuf::from("/opt/wallet/host"));
        assert_eq!(manifest.allowed_origins, vec!["chrome-extension://abc/"]);
        assert!(manifest.allowed_extensions.is_empty());

        let config = HostConfig::from_manifest(&manifest);
        assert_eq!(config.program, PathBuf::from("/opt/wallet/host"));
        assert!(config.args.is_empty());
    }

    #[test]
    fn resolves_relative_path_against_manifest_dir() {
        let file = write_manifest(r#"{"name": "h", "path": "bin/host", "type": "stdio"}"#);

        let manifest = HostManifest::load(file.path()).unwrap();
        let dir = file.path().parent().unwrap();
        assert_eq!(manifest.path, dir.join("bin/host"));
    }

    #[test]
    fn rejects_non_stdio_host() {
        let file = write_manifest(r#"{"name": "h", "path": "/h", "type": "socket"}"#);

        let err = HostManifest::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedType(t) if t == "socket"));
    }

    #[test]
    fn reports_missing_file() {
        let err = HostManifest::load(Path::new("/nonexistent/manifest.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn reports_malformed_manifest() {
        let file = write_manifest(r#"{"name": "h"}"#);

        let err = HostManifest::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
    }
}

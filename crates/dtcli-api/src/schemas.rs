//! Extension schema versions and bulk download

use crate::client::DynatraceClient;
use crate::error::ApiError;
use crate::transport::Transport;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

/// Version token that selects the newest schema version
pub const LATEST: &str = "latest";

/// `GET /api/v2/extensions/schemas` response
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SchemaVersions {
    /// Versions in server order, oldest first
    #[serde(default)]
    pub versions: Vec<String>,
}

/// `GET /api/v2/extensions/schemas/{version}` response
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SchemaManifest {
    /// Schema file names available for the version
    #[serde(default)]
    pub files: Vec<String>,
}

/// Result of [`DynatraceClient::download_schemas`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaDownload {
    /// Version the request resolved to
    pub version: String,
    /// Target directory
    pub directory: PathBuf,
    /// Whether the directory had to be created
    pub created_directory: bool,
    /// Written files, in manifest order
    pub files: Vec<PathBuf>,
}

/// Picks a schema version out of the tenant's list
///
/// `"latest"` selects the last entry. Any other token selects the first entry
/// starting with it, so `"1.25"` matches `"1.250.0"`.
///
/// # Errors
///
/// Returns [`ApiError::VersionNotFound`] carrying every available version if
/// nothing matches (including `"latest"` against an empty list)
pub fn resolve_schema_version(target: &str, versions: &[String]) -> Result<String, ApiError> {
    let found = if target == LATEST {
        versions.last()
    } else {
        versions.iter().find(|v| v.starts_with(target))
    };

    found.cloned().ok_or_else(|| ApiError::VersionNotFound {
        requested: target.to_string(),
        available: versions.to_vec(),
    })
}

/// Rejects manifest entries that would escape the target directory
fn validate_file_name(name: &str) -> Result<(), ApiError> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => Ok(()),
        _ => Err(ApiError::UnsafeFileName {
            name: name.to_string(),
        }),
    }
}

impl<T: Transport> DynatraceClient<T> {
    /// Schema versions offered by the tenant
    pub fn schema_versions(&self) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint(&["api", "v2", "extensions", "schemas"])?;
        let list: SchemaVersions = self.get_json(url)?;
        Ok(list.versions)
    }

    /// Resolves `target` (`"latest"` or a version prefix) against the tenant
    pub fn get_schema_target_version(&self, target: &str) -> Result<String, ApiError> {
        let versions = self.schema_versions()?;
        resolve_schema_version(target, &versions)
    }

    /// File names making up one schema version
    pub fn schema_files(&self, version: &str) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint(&["api", "v2", "extensions", "schemas", version])?;
        let manifest: SchemaManifest = self.get_json(url)?;
        Ok(manifest.files)
    }

    /// A single schema document
    pub fn schema_file(&self, version: &str, file: &str) -> Result<Value, ApiError> {
        let url = self.endpoint(&["api", "v2", "extensions", "schemas", version, file])?;
        self.get_json(url)
    }

    /// Downloads every schema file of a version into `download_dir`
    ///
    /// The directory is created if missing. Files are fetched one after the
    /// other and written pretty-printed; the first failure aborts the rest,
    /// leaving already written files in place.
    pub fn download_schemas(
        &self,
        target_version: &str,
        download_dir: impl AsRef<Path>,
    ) -> Result<SchemaDownload, ApiError> {
        let directory = download_dir.as_ref().to_path_buf();
        let version = self.get_schema_target_version(target_version)?;

        let created_directory = !directory.exists();
        if created_directory {
            fs::create_dir_all(&directory)?;
            tracing::info!(dir = %directory.display(), "Directory for schemas created");
        }

        tracing::info!(%version, "Downloading schemas");

        let manifest = self.schema_files(&version)?;
        let mut files = Vec::with_capacity(manifest.len());

        for name in &manifest {
            validate_file_name(name)?;

            let schema = self.schema_file(&version, name)?;
            let path = directory.join(name);
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, &schema).map_err(io::Error::from)?;
            writer.flush()?;

            tracing::debug!(file = %path.display(), "schema written");
            files.push(path);
        }

        tracing::info!(count = files.len(), "Finished");

        Ok(SchemaDownload {
            version,
            directory,
            created_directory,
            files,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versions(list: &[&str]) -> Vec<String> {
        list.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_latest_picks_last_entry() {
        let list = versions(&["1.249.0", "1.250.0", "1.251.1"]);
        assert_eq!(resolve_schema_version("latest", &list).unwrap(), "1.251.1");
    }

    #[test]
    fn test_prefix_picks_first_match() {
        let list = versions(&["1.249.0", "1.250.0", "1.250.3"]);
        assert_eq!(resolve_schema_version("1.250", &list).unwrap(), "1.250.0");
        assert_eq!(resolve_schema_version("1.249.0", &list).unwrap(), "1.249.0");
    }

    #[test]
    fn test_no_match_reports_available_versions() {
        let list = versions(&["1.249.0", "1.250.0"]);
        match resolve_schema_version("2", &list) {
            Err(ApiError::VersionNotFound {
                requested,
                available,
            }) => {
                assert_eq!(requested, "2");
                assert_eq!(available, list);
            }
            other => panic!("expected VersionNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_latest_on_empty_list_is_not_found() {
        assert!(matches!(
            resolve_schema_version("latest", &[]),
            Err(ApiError::VersionNotFound { .. })
        ));
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("extension.schema.json").is_ok());
        for bad in ["", "..", ".", "../x.json", "a/b.json", "/etc/passwd", "a\\b.json"] {
            assert!(
                matches!(validate_file_name(bad), Err(ApiError::UnsafeFileName { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_manifest_without_files_is_empty() {
        let manifest: SchemaManifest = serde_json::from_str("{}").unwrap();
        assert!(manifest.files.is_empty());
    }
}

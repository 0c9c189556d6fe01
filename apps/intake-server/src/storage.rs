//! On-disk archive of submitted forms

use std::path::{Path, PathBuf};

use intake_core::{ArchiveName, ARCHIVE_FOLDER};

/// `<root>/電子病歷_初診單`, created on first write
#[derive(Debug, Clone)]
pub struct ArchiveFolder {
    dir: PathBuf,
}

/// Where one submission ended up
#[derive(Debug, Clone)]
pub struct StoredFiles {
    pub json: PathBuf,
    pub pdf: PathBuf,
}

impl ArchiveFolder {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            dir: root.as_ref().join(ARCHIVE_FOLDER),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the received JSON (pretty-printed) and the rendered PDF.
    ///
    /// Files of the same name are overwritten.
    pub async fn store(
        &self,
        name: &ArchiveName,
        received: &serde_json::Value,
        pdf: &[u8],
    ) -> std::io::Result<StoredFiles> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let json = self.dir.join(name.json_file());
        let pretty = serde_json::to_vec_pretty(received)?;
        tokio::fs::write(&json, pretty).await?;

        let pdf_path = self.dir.join(name.pdf_file());
        tokio::fs::write(&pdf_path, pdf).await?;

        tracing::debug!(dir = %self.dir.display(), stem = name.stem(), "archived intake form");

        Ok(StoredFiles {
            json,
            pdf: pdf_path,
        })
    }
}

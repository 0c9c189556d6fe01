//! Virtual filesystem for in-memory compilation
//!
//! Holds the generated main source and the images it references. Nothing
//! here ever touches the real filesystem.

use std::collections::HashMap;

use typst::foundations::Bytes;
use typst::syntax::{FileId, Source, VirtualPath};

use crate::compiler::errors::EngineError;

const MAIN_PATH: &str = "/main.typ";

/// A file stored in the virtual filesystem
#[derive(Debug, Clone)]
struct VirtualFile {
    content: Bytes,
}

/// A virtual filesystem for in-memory compilation
#[derive(Debug, Default)]
pub struct VirtualFilesystem {
    files: HashMap<FileId, VirtualFile>,
    path_to_id: HashMap<String, FileId>,
}

impl VirtualFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount the main source file (main.typ)
    pub fn mount_main(&mut self, content: String) -> FileId {
        let id = file_id(MAIN_PATH);
        self.files.insert(
            id,
            VirtualFile {
                content: Bytes::from(content.into_bytes()),
            },
        );
        self.path_to_id.insert(MAIN_PATH.to_string(), id);
        id
    }

    /// Mount an additional file such as the signature image
    pub fn mount_file(&mut self, path: &str, content: Bytes) -> Result<FileId, EngineError> {
        validate_path(path)?;

        let normalized = normalize_path(path);
        let id = file_id(&normalized);

        self.files.insert(id, VirtualFile { content });
        self.path_to_id.insert(normalized, id);

        Ok(id)
    }

    /// Get a source file by ID (for .typ files)
    pub fn get_source(&self, id: FileId) -> Option<Source> {
        self.files.get(&id).and_then(|file| {
            let text = std::str::from_utf8(&file.content).ok()?;
            Some(Source::new(id, text.to_string()))
        })
    }

    /// Get a binary file by ID
    pub fn get_file(&self, id: FileId) -> Option<&Bytes> {
        self.files.get(&id).map(|f| &f.content)
    }

    /// Look up a file by path
    pub fn lookup_path(&self, path: &str) -> Option<FileId> {
        self.path_to_id.get(&normalize_path(path)).copied()
    }
}

fn file_id(path: &str) -> FileId {
    // No packages in the virtual fs
    FileId::new(None, VirtualPath::new(path))
}

fn validate_path(path: &str) -> Result<(), EngineError> {
    if path.contains("..") {
        return Err(EngineError::PathSecurityViolation(
            "Path traversal with '..' is not allowed".to_string(),
        ));
    }
    if path.contains('\\') || path.contains(':') {
        return Err(EngineError::PathSecurityViolation(
            "Only forward-slash virtual paths are allowed".to_string(),
        ));
    }
    if normalize_path(path) == MAIN_PATH {
        return Err(EngineError::PathSecurityViolation(
            "The main source cannot be replaced".to_string(),
        ));
    }
    Ok(())
}

fn normalize_path(path: &str) -> String {
    let mut normalized = path.to_string();

    if !normalized.starts_with('/') {
        normalized = format!("/{}", normalized);
    }
    while normalized.contains("//") {
        normalized = normalized.replace("//", "/");
    }

    normalized
}

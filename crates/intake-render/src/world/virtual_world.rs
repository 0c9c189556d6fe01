//! VirtualWorld implementation of the Typst World trait

use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, World};

use super::fonts::FontCache;
use super::virtual_fs::VirtualFilesystem;
use crate::compiler::errors::EngineError;

/// A single in-memory compilation: one main source plus its assets
pub struct VirtualWorld {
    filesystem: VirtualFilesystem,
    main: FileId,
    fonts: Arc<FontCache>,
    /// Captured once so every `datetime.today()` call agrees
    time: DateTime<Utc>,
    library: LazyHash<Library>,
}

impl VirtualWorld {
    pub fn new(
        source: String,
        assets: Vec<(String, Bytes)>,
        fonts: Arc<FontCache>,
    ) -> Result<Self, EngineError> {
        let mut filesystem = VirtualFilesystem::new();
        let main = filesystem.mount_main(source);

        for (path, content) in assets {
            filesystem.mount_file(&path, content)?;
        }

        Ok(Self {
            filesystem,
            main,
            fonts,
            time: Utc::now(),
            library: LazyHash::new(Library::builder().build()),
        })
    }

    pub fn filesystem(&self) -> &VirtualFilesystem {
        &self.filesystem
    }
}

impl World for VirtualWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        self.fonts.book()
    }

    fn main(&self) -> FileId {
        self.main
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        self.filesystem
            .get_source(id)
            .ok_or_else(|| FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        self.filesystem
            .get_file(id)
            .cloned()
            .ok_or_else(|| FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.font(index)
    }

    fn today(&self, offset: Option<i64>) -> Option<Datetime> {
        let adjusted = self.time + Duration::hours(offset.unwrap_or(0));

        Datetime::from_ymd_hms(
            adjusted.year(),
            adjusted.month() as u8,
            adjusted.day() as u8,
            adjusted.hour() as u8,
            adjusted.minute() as u8,
            adjusted.second() as u8,
        )
    }
}

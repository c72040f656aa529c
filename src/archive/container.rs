//! Container capability and its zip-backed implementation
//!
//! The walker only needs to enumerate entries, tell directories apart and
//! pull an entry's bytes; anything that can do that can stand in for a zip
//! reader.

use crate::{ArchiveError, ArchiveResult};
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Name and kind of an entry, without its contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryHeader {
    pub name: String,
    pub is_directory: bool,
}

/// A fully read entry. Lives only for the duration of one visit.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub name: String,
    pub is_directory: bool,
    pub bytes: Vec<u8>,
}

/// An opened container whose entries can be visited by index
pub trait Container {
    /// Number of entries, directories included
    fn len(&self) -> usize;

    /// Returns true if the container has no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads the header of the entry at `index`
    fn header(&mut self, index: usize) -> ArchiveResult<EntryHeader>;

    /// Reads the entry at `index`, materializing its bytes
    fn read_entry(&mut self, index: usize) -> ArchiveResult<ArchiveEntry>;
}

/// Opens outer containers from paths and nested containers from bytes
pub trait ContainerReader {
    type Outer: Container;
    type Nested: Container;

    /// Opens the outer container
    fn open_path(&self, path: &Path) -> ArchiveResult<Self::Outer>;

    /// Reopens an entry's bytes as a nested container
    fn open_bytes(&self, bytes: Vec<u8>) -> ArchiveResult<Self::Nested>;
}

/// Zip-format container (APK, XAPK, split APK)
pub struct ZipContainer<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> ZipContainer<R> {
    /// Wraps any seekable reader holding zip data
    pub fn new(reader: R) -> ArchiveResult<Self> {
        Ok(Self {
            archive: ZipArchive::new(reader)?,
        })
    }
}

impl ZipContainer<File> {
    /// Opens a zip container from the filesystem
    pub fn open(path: &Path) -> ArchiveResult<Self> {
        let file = File::open(path)?;
        Self::new(file)
    }
}

impl ZipContainer<Cursor<Vec<u8>>> {
    /// Opens a zip container held in memory
    pub fn from_bytes(bytes: Vec<u8>) -> ArchiveResult<Self> {
        Self::new(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> Container for ZipContainer<R> {
    fn len(&self) -> usize {
        self.archive.len()
    }

    fn header(&mut self, index: usize) -> ArchiveResult<EntryHeader> {
        // Raw access: no decompressor is set up just to read the name
        let file = self
            .archive
            .by_index_raw(index)
            .map_err(|e| ArchiveError::EntryRead {
                name: format!("#{}", index),
                reason: e.to_string(),
            })?;

        Ok(EntryHeader {
            name: file.name().to_string(),
            is_directory: file.is_dir(),
        })
    }

    fn read_entry(&mut self, index: usize) -> ArchiveResult<ArchiveEntry> {
        let mut file = self
            .archive
            .by_index(index)
            .map_err(|e| ArchiveError::EntryRead {
                name: format!("#{}", index),
                reason: e.to_string(),
            })?;

        let name = file.name().to_string();
        let is_directory = file.is_dir();
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| ArchiveError::EntryRead {
                name: name.clone(),
                reason: e.to_string(),
            })?;

        Ok(ArchiveEntry {
            name,
            is_directory,
            bytes,
        })
    }
}

/// [`ContainerReader`] backed by the `zip` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipReader;

impl ContainerReader for ZipReader {
    type Outer = ZipContainer<File>;
    type Nested = ZipContainer<Cursor<Vec<u8>>>;

    fn open_path(&self, path: &Path) -> ArchiveResult<Self::Outer> {
        ZipContainer::open(path)
    }

    fn open_bytes(&self, bytes: Vec<u8>) -> ArchiveResult<Self::Nested> {
        ZipContainer::from_bytes(bytes)
    }
}

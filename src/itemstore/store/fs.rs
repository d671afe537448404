use super::ItemRepository;
use crate::error::{Result, StoreError};
use crate::model::{Item, Items};
use log::{debug, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DEFAULT_ITEMS_FILE: &str = "items.json";

/// Item repository backed by one JSON file.
///
/// Every insert opens the file, decodes the whole collection, appends and
/// writes the whole collection back. Nothing is cached between calls and the
/// file handle never outlives the call.
///
/// In the default mode the file is truncated before the new content is
/// written, so a failure mid-write leaves it empty or partial.
/// [`FileItemStore::with_atomic_writes`] switches to writing a temporary
/// sibling and renaming it over the original.
#[derive(Debug, Clone)]
pub struct FileItemStore {
    path: PathBuf,
    atomic_writes: bool,
}

impl Default for FileItemStore {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_FILE)
    }
}

impl FileItemStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            atomic_writes: false,
        }
    }

    pub fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic_writes = atomic;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn atomic_writes(&self) -> bool {
        self.atomic_writes
    }

    /// Decode the collection currently in `file`.
    ///
    /// Only an empty stream (no bytes, or nothing but JSON whitespace) counts as
    /// an empty collection. Any other decode failure is corruption.
    fn decode(&self, file: &mut File) -> Result<Items> {
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;

        if buf.iter().all(|&b| matches!(b, b' ' | b'\t' | b'\n' | b'\r')) {
            return Ok(Items::default());
        }

        serde_json::from_slice(&buf).map_err(|source| {
            warn!(
                "refusing to overwrite corrupt item file {}: {}",
                self.path.display(),
                source
            );
            StoreError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })
    }

    /// Truncate `file` and write `items` into it from the start.
    fn rewrite(&self, file: &mut File, items: &Items) -> Result<()> {
        file.seek(SeekFrom::Start(0))?;
        file.set_len(0)?;
        write_items(file, items)
    }

    /// Write `items` to a temporary sibling and rename it over the backing file.
    fn replace(&self, items: &Items) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let stem = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_ITEMS_FILE.to_string());
        let tmp_path = dir.join(format!(".{}-{}.tmp", stem, Uuid::new_v4()));

        let written = File::create(&tmp_path)
            .map_err(StoreError::Io)
            .and_then(|mut tmp| {
                write_items(&mut tmp, items)?;
                tmp.sync_all().map_err(StoreError::Io)
            })
            .and_then(|_| fs::rename(&tmp_path, &self.path).map_err(StoreError::Io));

        if written.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        written
    }
}

fn write_items<W: Write>(out: W, items: &Items) -> Result<()> {
    let mut writer = BufWriter::new(out);
    serde_json::to_writer_pretty(&mut writer, items).map_err(io::Error::from)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

impl ItemRepository for FileItemStore {
    fn insert(&mut self, item: &Item) -> Result<()> {
        debug!("inserting item {:?} into {}", item.name, self.path.display());

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;

        let mut items = self.decode(&mut file)?;
        items.push(item.clone());

        if self.atomic_writes {
            drop(file);
            self.replace(&items)?;
        } else {
            self.rewrite(&mut file, &items)?;
        }

        debug!("{} now holds {} item(s)", self.path.display(), items.len());
        Ok(())
    }
}

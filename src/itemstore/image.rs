//! # Image Storage
//!
//! Items may carry an image, but how images are kept is up to the collaborator
//! plugged in behind [`ImageStore`]. The contract is only "accepts a name and
//! bytes, returns success or failure".
//!
//! - [`NoopImageStore`]: accepts everything and stores nothing.
//! - [`FsImageStore`]: one file per image under a directory.
//!
//! Uploads go through [`ImageStore::store_hashed`], which only takes `.jpg`
//! files and names them `<sha256 of the bytes>.jpg`. Identical images share a
//! file and names supplied by users never reach the filesystem.

use crate::error::{Result, StoreError};
use log::debug;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DEFAULT_IMAGES_DIR: &str = "images";
pub const IMAGE_EXTENSION: &str = ".jpg";

pub trait ImageStore {
    fn store_image(&self, name: &str, image: &[u8]) -> Result<()>;

    /// Store an uploaded image under its content hash and return the stored name.
    fn store_hashed(&self, upload_name: &str, image: &[u8]) -> Result<String> {
        let name = hashed_image_name(upload_name, image)?;
        self.store_image(&name, image)?;
        Ok(name)
    }
}

/// `<hex sha256 of image>.jpg`, or `NotJpeg` when `upload_name` is not a `.jpg`.
pub fn hashed_image_name(upload_name: &str, image: &[u8]) -> Result<String> {
    if !upload_name.ends_with(IMAGE_EXTENSION) {
        return Err(StoreError::NotJpeg(upload_name.to_string()));
    }
    Ok(format!("{}{}", hex::encode(Sha256::digest(image)), IMAGE_EXTENSION))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopImageStore;

impl ImageStore for NoopImageStore {
    fn store_image(&self, _name: &str, _image: &[u8]) -> Result<()> {
        Ok(())
    }
}

/// Writes each image to `<dir>/<name>`, replacing any previous image of that name.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    dir: PathBuf,
}

impl Default for FsImageStore {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGES_DIR)
    }
}

impl FsImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path an image of the given name is stored at.
    pub fn image_path(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.dir.join(name))
    }
}

/// Image names are single file names; anything that could escape the
/// directory is refused.
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0')
    {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

impl ImageStore for FsImageStore {
    fn store_image(&self, name: &str, image: &[u8]) -> Result<()> {
        let target = self.image_path(name)?;
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let tmp_path = self.dir.join(format!(".image-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, image)?;
        if let Err(e) = fs::rename(&tmp_path, &target) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::Io(e));
        }

        debug!("stored image {} ({} bytes)", target.display(), image.len());
        Ok(())
    }
}

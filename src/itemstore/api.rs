//! # API Facade
//!
//! A thin facade that any UI (HTTP handler, CLI, test) calls to add catalog
//! items. It checks inputs, hands the image to the [`ImageStore`] and the item
//! to the [`ItemRepository`], and returns a structured response.
//!
//! `CatalogApi<R, I>` is generic over both collaborators:
//! - Production: `CatalogApi<FileItemStore, FsImageStore>`
//! - Testing: `CatalogApi<InMemoryItemStore, NoopImageStore>`

use crate::error::{Result, StoreError};
use crate::image::ImageStore;
use crate::model::Item;
use crate::store::ItemRepository;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddItemResponse {
    pub message: String,
    /// Name the image was stored under, when one was uploaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
}

pub struct CatalogApi<R: ItemRepository, I: ImageStore> {
    repo: R,
    images: I,
}

impl<R: ItemRepository, I: ImageStore> CatalogApi<R, I> {
    pub fn new(repo: R, images: I) -> Self {
        Self { repo, images }
    }

    /// Store the optional `(upload name, bytes)` image, then append the item.
    ///
    /// A blank item name or a non-`.jpg` upload is rejected before anything is
    /// written. The image is stored under its content hash, see
    /// [`ImageStore::store_hashed`].
    pub fn add_item(
        &mut self,
        id: i64,
        name: &str,
        image: Option<(&str, &[u8])>,
    ) -> Result<AddItemResponse> {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidName(name.to_string()));
        }

        let image_name = match image {
            Some((upload_name, bytes)) => Some(self.images.store_hashed(upload_name, bytes)?),
            None => None,
        };

        self.repo.insert(&Item::new(id, name))?;

        Ok(AddItemResponse {
            message: format!("item received: {}", name),
            image_name,
        })
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn images(&self) -> &I {
        &self.images
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{hashed_image_name, FsImageStore, NoopImageStore};
    use crate::store::memory::InMemoryItemStore;
    use tempfile::TempDir;

    fn api() -> CatalogApi<InMemoryItemStore, NoopImageStore> {
        CatalogApi::new(InMemoryItemStore::new(), NoopImageStore)
    }

    #[test]
    fn test_add_item_inserts_and_reports() {
        let mut api = api();
        let resp = api.add_item(1, "apple", None).unwrap();

        assert_eq!(resp.message, "item received: apple");
        assert_eq!(resp.image_name, None);
        assert_eq!(api.repository().items().names(), vec!["apple"]);
        assert_eq!(api.repository().items().items[0].id, 1);
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut api = api();
        for name in ["", "   "] {
            let err = api.add_item(1, name, None).unwrap_err();
            assert!(matches!(err, StoreError::InvalidName(_)));
        }
        assert!(api.repository().items().is_empty());
    }

    #[test]
    fn test_repository_error_propagates() {
        let mut repo = InMemoryItemStore::new();
        repo.set_simulate_write_error(true);
        let mut api = CatalogApi::new(repo, NoopImageStore);

        assert!(api.add_item(1, "apple", None).unwrap_err().is_io());
    }

    #[test]
    fn test_image_is_stored_alongside_item() {
        let tmp = TempDir::new().unwrap();
        let mut api = CatalogApi::new(InMemoryItemStore::new(), FsImageStore::new(tmp.path()));

        let resp = api.add_item(1, "apple", Some(("apple.jpg", b"jpeg".as_slice()))).unwrap();

        let stored = resp.image_name.unwrap();
        assert_eq!(stored, hashed_image_name("apple.jpg", b"jpeg").unwrap());
        assert_eq!(std::fs::read(tmp.path().join(&stored)).unwrap(), b"jpeg");
        assert!(!tmp.path().join("apple.jpg").exists());
        assert_eq!(api.repository().items().len(), 1);
    }

    #[test]
    fn test_non_jpg_image_skips_insert() {
        let tmp = TempDir::new().unwrap();
        let mut api = CatalogApi::new(InMemoryItemStore::new(), FsImageStore::new(tmp.path()));

        let err = api
            .add_item(1, "apple", Some(("apple.png", b"png".as_slice())))
            .unwrap_err();

        assert!(matches!(err, StoreError::NotJpeg(_)));
        assert!(api.repository().items().is_empty());
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }
}

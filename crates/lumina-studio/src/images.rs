//! Reference image collection.
//!
//! Items keep insertion order. Uploaded items own a transient preview
//! reference minted by a [`PreviewHost`]; the collection hands it back to the
//! host when the item is removed, when the collection is cleared, and when the
//! collection is dropped.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;
use uuid::Uuid;

use lumina_models::{ImageId, ImageItem, LocalImage, Provenance};

/// Platform side of transient preview references.
pub trait PreviewHost: Send + Sync {
    /// Mint a displayable reference for a local file.
    fn create(&self, image: &LocalImage) -> String;

    /// Tell the platform a reference is no longer needed.
    fn release(&self, preview_url: &str);
}

/// In-process preview host minting `blob:lumina/<uuid>` references.
///
/// Tracks the live set so leaked references are observable.
#[derive(Debug, Default)]
pub struct BlobPreviews {
    live: Mutex<HashSet<String>>,
}

impl BlobPreviews {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of references created and not yet released.
    pub fn live_count(&self) -> usize {
        self.live.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_live(&self, preview_url: &str) -> bool {
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(preview_url)
    }
}

impl PreviewHost for BlobPreviews {
    fn create(&self, _image: &LocalImage) -> String {
        let url = format!("blob:lumina/{}", Uuid::new_v4());
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.clone());
        url
    }

    fn release(&self, preview_url: &str) {
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(preview_url);
    }
}

/// Ordered candidate images for video generation.
pub struct ImageCollection {
    items: Vec<ImageItem>,
    /// Transient references owned by uploaded items, keyed by item identity
    owned_previews: HashMap<ImageId, String>,
    host: Arc<dyn PreviewHost>,
}

impl ImageCollection {
    pub fn new(host: Arc<dyn PreviewHost>) -> Self {
        Self {
            items: Vec::new(),
            owned_previews: HashMap::new(),
            host,
        }
    }

    /// Append one uploaded item per file, in input order.
    pub fn add_from_files<I>(&mut self, files: I) -> usize
    where
        I: IntoIterator<Item = LocalImage>,
    {
        let before = self.items.len();
        for file in files {
            let preview = self.host.create(&file);
            let item = ImageItem::uploaded(file, preview.clone());
            self.owned_previews.insert(item.id, preview);
            self.items.push(item);
        }
        let added = self.items.len() - before;
        debug!(added, total = self.items.len(), "Added uploaded images");
        added
    }

    /// Append one remote item per URL, named "Product Image N" within this call.
    pub fn add_from_remote_urls<I, S>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.items.len();
        for (index, url) in urls.into_iter().enumerate() {
            self.items
                .push(ImageItem::remote(url, format!("Product Image {}", index + 1)));
        }
        let added = self.items.len() - before;
        debug!(added, total = self.items.len(), "Added remote images");
        added
    }

    /// Remove the item at `index`. Out of range removes nothing.
    pub fn remove_at(&mut self, index: usize) -> Option<ImageItem> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        self.release(&item.id);
        Some(item)
    }

    /// Remove every item, releasing owned previews.
    pub fn clear(&mut self) {
        self.items.clear();
        for (_, preview) in self.owned_previews.drain() {
            self.host.release(&preview);
        }
    }

    /// Uploaded items, in collection order. Only these need persisting.
    pub fn upload_candidates(&self) -> Vec<ImageItem> {
        self.items
            .iter()
            .filter(|item| item.provenance() == Provenance::Uploaded)
            .cloned()
            .collect()
    }

    pub fn count_of(&self, provenance: Provenance) -> usize {
        self.items
            .iter()
            .filter(|item| item.provenance() == provenance)
            .count()
    }

    pub fn get(&self, index: usize) -> Option<&ImageItem> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[ImageItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn release(&mut self, id: &ImageId) {
        if let Some(preview) = self.owned_previews.remove(id) {
            self.host.release(&preview);
        }
    }
}

impl fmt::Debug for ImageCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageCollection")
            .field("items", &self.items)
            .field("owned_previews", &self.owned_previews.len())
            .finish()
    }
}

impl Drop for ImageCollection {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection() -> (ImageCollection, Arc<BlobPreviews>) {
        let previews = Arc::new(BlobPreviews::new());
        (ImageCollection::new(previews.clone()), previews)
    }

    fn names(images: &ImageCollection) -> Vec<&str> {
        images.iter().map(|i| i.display_name.as_str()).collect()
    }

    #[test]
    fn test_files_append_in_order_as_uploaded() {
        let (mut images, _) = collection();
        images.add_from_files([LocalImage::from_path("a.png"), LocalImage::from_path("b.png")]);
        images.add_from_files([LocalImage::from_path("c.png")]);

        assert_eq!(names(&images), vec!["a.png", "b.png", "c.png"]);
        assert!(images.iter().all(|i| i.provenance() == Provenance::Uploaded));
        assert!(images.iter().all(|i| i.preview_url.starts_with("blob:lumina/")));
    }

    #[test]
    fn test_remote_names_are_scoped_to_each_call() {
        let (mut images, previews) = collection();
        images.add_from_remote_urls(["u1", "u2"]);
        images.add_from_remote_urls(vec!["u3".to_string()]);

        assert_eq!(
            names(&images),
            vec!["Product Image 1", "Product Image 2", "Product Image 1"]
        );
        assert_eq!(images.get(1).unwrap().preview_url, "u2");
        assert_eq!(previews.live_count(), 0);
    }

    #[test]
    fn test_remove_preserves_survivor_order() {
        let (mut images, _) = collection();
        images.add_from_files(["a", "b", "c", "d", "e"].map(LocalImage::from_path));

        for index in [1, 2, 0] {
            let before = images.len();
            assert!(images.remove_at(index).is_some());
            assert_eq!(images.len(), before - 1);
        }
        assert_eq!(names(&images), vec!["c", "e"]);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let (mut images, _) = collection();
        images.add_from_remote_urls(["u1"]);
        assert!(images.remove_at(1).is_none());
        assert_eq!(images.len(), 1);
    }

    #[test]
    fn test_previews_released_on_remove_clear_and_drop() {
        let (mut images, previews) = collection();
        images.add_from_files(["a.png", "b.png", "c.png"].map(LocalImage::from_path));
        images.add_from_remote_urls(["https://cdn.example.com/x.jpg"]);
        assert_eq!(previews.live_count(), 3);

        let removed = images.remove_at(0).unwrap();
        assert!(!previews.is_live(&removed.preview_url));
        assert_eq!(previews.live_count(), 2);

        // Removing a remote item releases nothing
        images.remove_at(2);
        assert_eq!(previews.live_count(), 2);

        images.clear();
        assert_eq!(previews.live_count(), 0);

        images.add_from_files([LocalImage::from_path("d.png")]);
        assert_eq!(previews.live_count(), 1);
        drop(images);
        assert_eq!(previews.live_count(), 0);
    }

    #[test]
    fn test_upload_candidates_skip_remote_items() {
        let (mut images, _) = collection();
        images.add_from_remote_urls(["u1"]);
        images.add_from_files([LocalImage::from_path("a.png")]);
        images.add_from_remote_urls(["u2"]);
        images.add_from_files([LocalImage::from_path("b.png")]);

        let candidates = images.upload_candidates();
        let files: Vec<_> = candidates
            .iter()
            .map(|i| i.local_image().unwrap().file_name.as_str())
            .collect();
        assert_eq!(files, vec!["a.png", "b.png"]);
        assert_eq!(images.count_of(Provenance::Remote), 2);
    }
}

//! Deferred image loading.
//!
//! Images that carry a deferred source are watched; the first time one
//! becomes visible its deferred source is promoted to the live source and it
//! stops being watched.

use tracing::debug;

use crate::page::LazyImage;
use crate::reveal::Intersection;

#[derive(Debug, Clone, PartialEq)]
pub struct ImageView {
    pub id: String,
    pub alt: String,
    pub src: Option<String>,
    pub data_src: Option<String>,
    pub observed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct LazyImages {
    images: Vec<ImageView>,
    threshold: f64,
}

impl LazyImages {
    pub fn setup(images: &[LazyImage], threshold: f64) -> Self {
        let images: Vec<ImageView> = images
            .iter()
            .map(|img| ImageView {
                id: img.id.clone(),
                alt: img.alt.clone(),
                src: img.src.clone(),
                data_src: img.data_src.clone(),
                observed: img.data_src.is_some(),
            })
            .collect();
        debug!(
            observed = images.iter().filter(|i| i.observed).count(),
            "Watching deferred images"
        );
        Self { images, threshold }
    }

    /// Returns `true` when this event loaded the image.
    pub fn observe(&mut self, id: &str, event: Intersection) -> bool {
        if !event.crosses(self.threshold) {
            return false;
        }
        let Some(img) = self.images.iter_mut().find(|i| i.id == id && i.observed) else {
            return false;
        };
        img.src = img.data_src.take();
        img.observed = false;
        debug!(id, src = ?img.src, "Image loaded");
        true
    }

    pub fn images(&self) -> &[ImageView] {
        &self.images
    }

    pub fn get(&self, id: &str) -> Option<&ImageView> {
        self.images.iter().find(|i| i.id == id)
    }

    /// Images still waiting for their deferred source.
    pub fn pending(&self) -> usize {
        self.images.iter().filter(|i| i.observed).count()
    }
}

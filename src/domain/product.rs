//! Product image record
//!
//! Snapshot of the per-product image fields owned by the catalog store. The
//! pipeline reads a snapshot and writes back only the remote URL fields it
//! newly populated; a remote URL already present for a slot is never
//! overwritten.

use crate::domain::slot::ImageSlot;
use chrono::{DateTime, Utc};

/// Per-product image fields, one local path and one remote URL per slot
#[derive(Debug, Clone, Default)]
pub struct ProductImages {
    /// Catalog product id
    pub product_id: i64,

    /// Product name, used as upload alt text
    pub product_name: Option<String>,

    /// Local path fields
    pub image_main: Option<String>,
    pub image1: Option<String>,
    pub image2: Option<String>,
    pub image3: Option<String>,
    pub image4: Option<String>,
    pub image5: Option<String>,

    /// Remote URL fields
    pub srv_image_main: Option<String>,
    pub srv_image1: Option<String>,
    pub srv_image2: Option<String>,
    pub srv_image3: Option<String>,
    pub srv_image4: Option<String>,
    pub srv_image5: Option<String>,

    /// Set once every populated slot has a remote URL
    pub flag_export: bool,

    /// When the export flag was stamped
    pub exported_at: Option<DateTime<Utc>>,
}

impl ProductImages {
    /// Local path stored for a slot
    pub fn local_path(&self, slot: ImageSlot) -> Option<&str> {
        let field = match slot {
            ImageSlot::Main => &self.image_main,
            ImageSlot::One => &self.image1,
            ImageSlot::Two => &self.image2,
            ImageSlot::Three => &self.image3,
            ImageSlot::Four => &self.image4,
            ImageSlot::Five => &self.image5,
        };
        field.as_deref()
    }

    /// Remote URL stored for a slot
    pub fn remote_url(&self, slot: ImageSlot) -> Option<&str> {
        let field = match slot {
            ImageSlot::Main => &self.srv_image_main,
            ImageSlot::One => &self.srv_image1,
            ImageSlot::Two => &self.srv_image2,
            ImageSlot::Three => &self.srv_image3,
            ImageSlot::Four => &self.srv_image4,
            ImageSlot::Five => &self.srv_image5,
        };
        field.as_deref()
    }

    /// Whether a slot already carries a non-empty remote URL
    ///
    /// Whitespace-only values count as "no remote URL", matching how the
    /// resolver classifies slots.
    pub fn has_remote(&self, slot: ImageSlot) -> bool {
        self.remote_url(slot)
            .map(|url| !url.trim().is_empty())
            .unwrap_or(false)
    }

    /// Set the remote URL for a slot
    pub fn set_remote_url(&mut self, slot: ImageSlot, url: String) {
        let field = match slot {
            ImageSlot::Main => &mut self.srv_image_main,
            ImageSlot::One => &mut self.srv_image1,
            ImageSlot::Two => &mut self.srv_image2,
            ImageSlot::Three => &mut self.srv_image3,
            ImageSlot::Four => &mut self.srv_image4,
            ImageSlot::Five => &mut self.srv_image5,
        };
        *field = Some(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_path_by_slot() {
        let product = ProductImages {
            product_id: 1,
            image_main: Some("a.jpg".to_string()),
            image3: Some("b.jpg".to_string()),
            ..Default::default()
        };

        assert_eq!(product.local_path(ImageSlot::Main), Some("a.jpg"));
        assert_eq!(product.local_path(ImageSlot::Three), Some("b.jpg"));
        assert_eq!(product.local_path(ImageSlot::One), None);
    }

    #[test]
    fn test_has_remote_ignores_whitespace() {
        let product = ProductImages {
            product_id: 1,
            srv_image_main: Some("https://cdn.example.com/a.jpg".to_string()),
            srv_image1: Some("   ".to_string()),
            ..Default::default()
        };

        assert!(product.has_remote(ImageSlot::Main));
        assert!(!product.has_remote(ImageSlot::One));
        assert!(!product.has_remote(ImageSlot::Two));
    }

    #[test]
    fn test_set_remote_url() {
        let mut product = ProductImages {
            product_id: 1,
            ..Default::default()
        };

        product.set_remote_url(ImageSlot::Five, "https://cdn.example.com/x.png".to_string());
        assert_eq!(
            product.remote_url(ImageSlot::Five),
            Some("https://cdn.example.com/x.png")
        );
    }
}

//! Image slot identity
//!
//! A product owns six fixed image slots: the main image plus five numbered
//! ones. Slots are never created or destroyed, only read; the declaration
//! order of [`ImageSlot::ALL`] is the order the resolver walks them in, which
//! decides which slot "claims" a shared local path.

use std::fmt;

/// One of the six fixed image roles a product may populate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    /// Main product image
    Main,
    /// Gallery image 1
    One,
    /// Gallery image 2
    Two,
    /// Gallery image 3
    Three,
    /// Gallery image 4
    Four,
    /// Gallery image 5
    Five,
}

impl ImageSlot {
    /// All slots in fixed declaration order (main first, then 1..5)
    pub const ALL: [ImageSlot; 6] = [
        ImageSlot::Main,
        ImageSlot::One,
        ImageSlot::Two,
        ImageSlot::Three,
        ImageSlot::Four,
        ImageSlot::Five,
    ];

    /// Column name of the local path field for this slot
    pub fn local_field(&self) -> &'static str {
        match self {
            ImageSlot::Main => "image_main",
            ImageSlot::One => "image1",
            ImageSlot::Two => "image2",
            ImageSlot::Three => "image3",
            ImageSlot::Four => "image4",
            ImageSlot::Five => "image5",
        }
    }

    /// Column name of the remote URL field for this slot
    pub fn remote_field(&self) -> &'static str {
        match self {
            ImageSlot::Main => "srv_image_main",
            ImageSlot::One => "srv_image1",
            ImageSlot::Two => "srv_image2",
            ImageSlot::Three => "srv_image3",
            ImageSlot::Four => "srv_image4",
            ImageSlot::Five => "srv_image5",
        }
    }
}

impl fmt::Display for ImageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.local_field())
    }
}

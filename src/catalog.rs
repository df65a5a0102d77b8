/// Static restaurant catalog
///
/// The catalog is fixed at compile time and never mutated. The core only
/// ever looks at `price`; everything else (rating, time window, image URL)
/// is opaque display payload owned by the UI layer.

/// A single restaurant available for ordering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogItem {
    /// Stable catalog identifier
    pub id: u32,
    /// Display name
    pub name: &'static str,
    /// Star rating, informational only
    pub rating: f32,
    /// Estimated delivery window in minutes, display string
    pub time: &'static str,
    /// Price in whole currency units
    pub price: u32,
    /// Image URL, never fetched (kept as an opaque reference)
    pub img: &'static str,
}

/// All restaurants, in display order
pub static CATALOG: [CatalogItem; 4] = [
    CatalogItem {
        id: 1,
        name: "The Burger Vault",
        rating: 4.8,
        time: "15-20",
        price: 85,
        img: "https://images.unsplash.com/photo-1571091718767-18b5b1457add?w=500",
    },
    CatalogItem {
        id: 2,
        name: "Neon Sushi Bar",
        rating: 4.9,
        time: "25-30",
        price: 120,
        img: "https://images.unsplash.com/photo-1553621042-f6e147245754?w=500",
    },
    CatalogItem {
        id: 3,
        name: "Pasta Lock-up",
        rating: 4.6,
        time: "20-25",
        price: 95,
        img: "https://images.unsplash.com/photo-1551183053-bf91a1d81141?w=500",
    },
    CatalogItem {
        id: 4,
        name: "Secret Taco Club",
        rating: 4.7,
        time: "10-15",
        price: 70,
        img: "https://images.unsplash.com/photo-1565299624946-b28f40a0ae38?w=500",
    },
];

/// Look up a catalog item by its identifier
pub fn find(id: u32) -> Option<&'static CatalogItem> {
    CATALOG.iter().find(|item| item.id == id)
}

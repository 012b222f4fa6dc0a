//! Read-only product catalog.
//!
//! The catalog is the single source of truth for product data. It is built
//! once at startup (either [`Catalog::demo`] or a file parsed with
//! [`Catalog::from_yaml_str`] / [`Catalog::from_json_str`]) and only ever
//! borrowed afterwards.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CatalogId, CurrencyCode, Price, Rating};

/// Errors that can occur when building a [`Catalog`].
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    /// An item has an empty id.
    #[error("catalog item \"{name}\" has an empty id")]
    EmptyId {
        /// Name of the offending item.
        name: String,
    },
    /// Two items share an id.
    #[error("duplicate catalog id: {0}")]
    DuplicateId(CatalogId),
    /// A price is negative.
    #[error("catalog item {id} has a negative price")]
    NegativePrice {
        /// Id of the offending item.
        id: CatalogId,
    },
    /// YAML input could not be parsed.
    #[error("invalid catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// JSON input could not be parsed.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A product available in the shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: CatalogId,
    pub name: String,
    /// Unit price in the shop currency.
    pub price: Decimal,
    /// Image path or URL, passed through untouched.
    pub image: String,
    #[serde(default)]
    pub rating: Rating,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
}

impl CatalogItem {
    /// The unit price tagged with a currency.
    #[must_use]
    pub const fn unit_price(&self, currency_code: CurrencyCode) -> Price {
        Price::new(self.price, currency_code)
    }
}

/// An insertion-ordered lookup table of [`CatalogItem`]s.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    index: HashMap<CatalogId, usize>,
}

impl Catalog {
    /// Build a catalog from items, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns an error if an id is empty or repeated, or a price is negative.
    pub fn from_items(items: Vec<CatalogItem>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if item.id.is_empty() {
                return Err(CatalogError::EmptyId {
                    name: item.name.clone(),
                });
            }
            if item.price.is_sign_negative() && !item.price.is_zero() {
                return Err(CatalogError::NegativePrice {
                    id: item.id.clone(),
                });
            }
            if index.insert(item.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
        }
        Ok(Self { items, index })
    }

    /// Parse a YAML sequence of items.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or the items fail validation.
    pub fn from_yaml_str(input: &str) -> Result<Self, CatalogError> {
        let items: Vec<CatalogItem> = serde_yaml::from_str(input)?;
        Self::from_items(items)
    }

    /// Parse a JSON array of items.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or the items fail validation.
    pub fn from_json_str(input: &str) -> Result<Self, CatalogError> {
        let items: Vec<CatalogItem> = serde_json::from_str(input)?;
        Self::from_items(items)
    }

    /// Look up an item by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.index.get(id).and_then(|&position| self.items.get(position))
    }

    /// Items in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct non-empty categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.items {
            let category = item.category.as_str();
            if !category.is_empty() && !seen.contains(&category) {
                seen.push(category);
            }
        }
        seen
    }

    /// The built-in demo catalog.
    #[must_use]
    pub fn demo() -> Self {
        let items = DEMO_ITEMS
            .iter()
            .map(|d| CatalogItem {
                id: CatalogId::from(d.id),
                name: d.name.to_owned(),
                price: Decimal::from(d.price),
                image: d.image.to_owned(),
                rating: Rating::new(d.rating).unwrap_or_default(),
                description: d.description.to_owned(),
                category: d.category.to_owned(),
            })
            .collect();

        // Ids in DEMO_ITEMS are unique and non-empty; covered by tests.
        Self::from_items(items).unwrap_or_default()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogItem;
    type IntoIter = std::slice::Iter<'a, CatalogItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

struct DemoItem {
    id: &'static str,
    name: &'static str,
    price: i64,
    image: &'static str,
    rating: f32,
    category: &'static str,
    description: &'static str,
}

const DEMO_ITEMS: &[DemoItem] = &[
    DemoItem {
        id: "wireless-headphones",
        name: "Wireless Headphones",
        price: 10_500,
        image: "images/wireless-headphones.png",
        rating: 4.5,
        category: "electronics",
        description: "High-fidelity wireless headphones with active noise isolation, plush ear cushions, and up to 30 hours of battery life.",
    },
    DemoItem {
        id: "dyson-airwrap",
        name: "Dyson Airwrap",
        price: 237_000,
        image: "images/dyson-airwrap.png",
        rating: 4.8,
        category: "beauty",
        description: "Premium multi-styler using Coanda airflow for curls, waves, smooth blow-drying, and volume with less heat damage.",
    },
    DemoItem {
        id: "mens-cotton-shirt",
        name: "Men's Cotton T-Shirt",
        price: 2_000,
        image: "images/men's-cotton-shirt.png",
        rating: 4.2,
        category: "fashion",
        description: "Breathable, lightweight 100% cotton tee. Soft hand-feel, classic fit, and easy to pair for daily wear.",
    },
    DemoItem {
        id: "nike-sneakers",
        name: "Nike Sneakers",
        price: 23_275,
        image: "images/nike-sneakers.png",
        rating: 4.7,
        category: "fashion",
        description: "Everyday sneakers with responsive cushioning, durable outsole grip, and a versatile style that goes with everything.",
    },
    DemoItem {
        id: "leather-laptop-bag",
        name: "Leather Laptop Bag",
        price: 5_300,
        image: "images/leather-laptop-bag2.png",
        rating: 4.5,
        category: "accessories",
        description: "Premium leather messenger with padded 15\" laptop sleeve, organized compartments, and a comfortable shoulder strap.",
    },
    DemoItem {
        id: "cloth-hanging-stand",
        name: "Cloth Hanging Stand",
        price: 2_699,
        image: "images/cloth-hanging-stand.png",
        rating: 4.1,
        category: "home",
        description: "Sturdy, rust-resistant drying rack with adjustable rails. Fits small spaces and quick laundry days.",
    },
    DemoItem {
        id: "hp-envy",
        name: "HP Envy x360",
        price: 250_000,
        image: "images/hp.png",
        rating: 4.8,
        category: "electronics",
        description: "Convertible 2-in-1 with 360° hinge, touchscreen, and fast performance for study, work, and creativity.",
    },
    DemoItem {
        id: "electric-chopper",
        name: "Electric Chopper",
        price: 12_000,
        image: "images/electric-chopper1.png",
        rating: 4.4,
        category: "home",
        description: "Compact, powerful food chopper for veggies, nuts, and meats. One-touch operation and easy clean bowl.",
    },
    DemoItem {
        id: "water-bottle",
        name: "Water Bottle for Kids",
        price: 1_500,
        image: "images/water-bottle.png",
        rating: 4.0,
        category: "kids",
        description: "Leak-proof, lightweight bottle with a flip top and fun graphics. Keeps kids hydrated on the go.",
    },
    DemoItem {
        id: "apple-watch",
        name: "Apple Watch",
        price: 7_000,
        image: "images/apple-touch-watch.png",
        rating: 4.6,
        category: "electronics",
        description: "Smartwatch for fitness tracking, notifications, and health insights, with customizable watch faces and bands.",
    },
    DemoItem {
        id: "ultralight-eyeglasses",
        name: "Ultralight Eyeglasses",
        price: 1_000,
        image: "images/enacolor-ultralight-eyeglasses.png",
        rating: 4.1,
        category: "accessories",
        description: "Featherlight frames with clear optics to reduce eye strain. Comfortable for all-day wear.",
    },
    DemoItem {
        id: "luxury-handbags",
        name: "Luxury Handbags",
        price: 5_500,
        image: "images/handbag.png",
        rating: 4.3,
        category: "fashion",
        description: "Elegant handbags with premium finish and practical compartments for a daily or party look.",
    },
];

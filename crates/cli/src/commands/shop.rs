//! Shop listing and product detail.
//!
//! # Usage
//!
//! ```bash
//! # Everything, in catalog order
//! bazaar shop
//!
//! # Electronics under a search term, cheapest first
//! bazaar shop --search watch --category electronics --sort price-asc
//!
//! # One product
//! bazaar product apple-watch
//! ```

use bazaar_core::{Catalog, CurrencyCode, ListingQuery, browse};

use super::CommandError;

/// Render the filtered, sorted product list.
#[must_use]
pub fn list(catalog: &Catalog, query: &ListingQuery, currency: CurrencyCode) -> String {
    let items = browse(catalog, query);
    if items.is_empty() {
        return "No products match your search.".to_owned();
    }

    let id_width = items.iter().map(|i| i.id.as_str().len()).max().unwrap_or(0);
    let name_width = items.iter().map(|i| i.name.chars().count()).max().unwrap_or(0);

    let mut lines: Vec<String> = items
        .iter()
        .map(|item| {
            format!(
                "{:<id_width$}  {:<name_width$}  {}  {:>14}",
                item.id.as_str(),
                item.name,
                item.rating.stars(),
                item.unit_price(currency).display(),
            )
        })
        .collect();
    lines.push(format!("{} product(s)", items.len()));
    lines.join("\n")
}

/// Render the detail view for one product.
///
/// # Errors
///
/// Returns [`CommandError::ProductNotFound`] if `id` is not in the catalog.
pub fn product(catalog: &Catalog, id: &str, currency: CurrencyCode) -> Result<String, CommandError> {
    let item = catalog
        .get(id)
        .ok_or_else(|| CommandError::ProductNotFound(id.to_owned()))?;

    let mut lines = vec![
        item.name.clone(),
        format!("{} ({})", item.rating.stars(), item.rating),
        item.unit_price(currency).display_fixed(),
    ];
    if !item.category.is_empty() {
        lines.push(format!("Category: {}", item.category));
    }
    if !item.description.is_empty() {
        lines.push(String::new());
        lines.push(item.description.clone());
    }
    lines.push(String::new());
    lines.push(format!("Image: {}", item.image));
    Ok(lines.join("\n"))
}

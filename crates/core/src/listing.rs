//! Shop listing: search, category filter and price sort over the catalog.

use std::convert::Infallible;
use std::str::FromStr;

use crate::catalog::{Catalog, CatalogItem};

/// Category value that disables the category filter.
pub const ALL_CATEGORIES: &str = "all";

/// Listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }
}

/// Unrecognized values fall back to [`SortOrder::Featured`].
impl FromStr for SortOrder {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            _ => Self::Featured,
        })
    }
}

/// Filter and sort options for [`browse`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    /// Case-insensitive substring of the product name. Empty matches all.
    pub search: String,
    /// Case-insensitive category. `None` or `"all"` matches all.
    pub category: Option<String>,
    pub sort: SortOrder,
}

impl ListingQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub const fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Whether `item` passes the search and category filters.
    #[must_use]
    pub fn matches(&self, item: &CatalogItem) -> bool {
        let category_ok = match self.category.as_deref() {
            None => true,
            Some(wanted) if wanted.eq_ignore_ascii_case(ALL_CATEGORIES) => true,
            Some(wanted) => item.category.to_lowercase() == wanted.to_lowercase(),
        };
        category_ok && item.name.to_lowercase().contains(&self.search.to_lowercase())
    }
}

/// Items matching `query`, in the requested order.
///
/// Price sorts are stable, so equally priced items keep catalog order.
#[must_use]
pub fn browse<'c>(catalog: &'c Catalog, query: &ListingQuery) -> Vec<&'c CatalogItem> {
    let mut items: Vec<&CatalogItem> = catalog.iter().filter(|item| query.matches(item)).collect();
    match query.sort {
        SortOrder::Featured => {}
        SortOrder::PriceAsc => items.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOrder::PriceDesc => items.sort_by(|a, b| b.price.cmp(&a.price)),
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[&CatalogItem]) -> Vec<String> {
        items.iter().map(|i| i.id.to_string()).collect()
    }

    #[test]
    fn test_default_query_lists_everything_in_order() {
        let catalog = Catalog::demo();
        let items = browse(&catalog, &ListingQuery::new());
        assert_eq!(items.len(), catalog.len());
        assert_eq!(items.first().map(|i| i.id.as_str()), Some("wireless-headphones"));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = Catalog::demo();
        let items = browse(&catalog, &ListingQuery::new().with_search("WATCH"));
        assert_eq!(ids(&items), ["apple-watch"]);
    }

    #[test]
    fn test_category_filter() {
        let catalog = Catalog::demo();
        let items = browse(&catalog, &ListingQuery::new().with_category("Electronics"));
        assert_eq!(ids(&items), ["wireless-headphones", "hp-envy", "apple-watch"]);

        let all = browse(&catalog, &ListingQuery::new().with_category("ALL"));
        assert_eq!(all.len(), catalog.len());
    }

    #[test]
    fn test_price_sorts() {
        let catalog = Catalog::demo();
        let asc = browse(
            &catalog,
            &ListingQuery::new()
                .with_category("electronics")
                .with_sort(SortOrder::PriceAsc),
        );
        assert_eq!(ids(&asc), ["apple-watch", "wireless-headphones", "hp-envy"]);

        let desc = browse(&catalog, &ListingQuery::new().with_sort(SortOrder::PriceDesc));
        assert_eq!(desc.first().map(|i| i.id.as_str()), Some("hp-envy"));
        assert_eq!(desc.last().map(|i| i.id.as_str()), Some("ultralight-eyeglasses"));
    }

    #[test]
    fn test_combined_filters_can_match_nothing() {
        let catalog = Catalog::demo();
        let items = browse(
            &catalog,
            &ListingQuery::new().with_search("watch").with_category("kids"),
        );
        assert!(items.is_empty());
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("price-asc".parse::<SortOrder>(), Ok(SortOrder::PriceAsc));
        assert_eq!("price-desc".parse::<SortOrder>(), Ok(SortOrder::PriceDesc));
        assert_eq!("newest".parse::<SortOrder>(), Ok(SortOrder::Featured));
        assert_eq!(SortOrder::PriceDesc.as_str(), "price-desc");
    }
}

// Catalog view state.
// A pure, synchronous state-transition function over tagged actions; all
// async orchestration lives in the coordinator, which only dispatches here.

use std::cmp::Ordering;

use crate::api::Product;

/// Price sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// State transitions for the catalog view.
#[derive(Debug, Clone)]
pub enum Action {
    /// A fresh unfiltered product list finished loading. Resets the visible
    /// list; active filters are not reapplied.
    InitialLoad(Vec<Product>),
    /// Set the category filter. Empty string clears it.
    SetCategory(String),
    /// Set the sort order. `None` is the unset sentinel: the visible list
    /// resets to the full product list re-sorted ascending.
    SetSort(Option<SortOrder>),
    /// Set the title search text. Empty string clears it.
    SetSearch(String),
    SetError(Option<String>),
    SetErrorFlag(bool),
    SetLoading(bool),
    SetOfflineMode(bool),
}

/// View state for the product catalog screen.
#[derive(Debug, Clone)]
pub struct CatalogState {
    /// Last successfully loaded, unfiltered product list. Changes only on
    /// a fresh load, never on a filter change.
    pub initial_products: Vec<Product>,
    /// Current derived view: `initial_products` with the active filters and
    /// sort applied.
    pub products: Vec<Product>,
    pub category: String,
    pub search: String,
    pub sort: SortOrder,
    pub is_loading: bool,
    pub is_error: bool,
    pub error: Option<String>,
    /// True when the displayed data came from cache rather than a live
    /// fetch, regardless of the network monitor's current signal.
    pub offline_mode: bool,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            initial_products: Vec::new(),
            products: Vec::new(),
            category: String::new(),
            search: String::new(),
            sort: SortOrder::default(),
            is_loading: true,
            is_error: false,
            error: None,
            offline_mode: false,
        }
    }
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action. Pure and synchronous; never suspends.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::InitialLoad(products) => {
                self.products = products.clone();
                self.initial_products = products;
            }
            Action::SetCategory(category) => {
                self.products =
                    derive_visible(&self.initial_products, &category, &self.search, self.sort);
                self.category = category;
            }
            Action::SetSort(Some(sort)) => {
                self.products =
                    derive_visible(&self.initial_products, &self.category, &self.search, sort);
                self.sort = sort;
            }
            Action::SetSort(None) => {
                // Unset: full list, default ascending order.
                self.sort = SortOrder::Ascending;
                self.products =
                    derive_visible(&self.initial_products, "", "", SortOrder::Ascending);
            }
            Action::SetSearch(search) => {
                self.products =
                    derive_visible(&self.initial_products, &self.category, &search, self.sort);
                self.search = search;
            }
            Action::SetError(error) => self.error = error,
            Action::SetErrorFlag(flag) => self.is_error = flag,
            Action::SetLoading(flag) => self.is_loading = flag,
            Action::SetOfflineMode(flag) => self.offline_mode = flag,
        }
    }
}

/// Compute the visible product list: category equality filter, then
/// case-insensitive title substring filter, then a stable price sort.
/// Sort always runs last.
pub fn derive_visible(
    products: &[Product],
    category: &str,
    search: &str,
    sort: SortOrder,
) -> Vec<Product> {
    let needle = search.to_lowercase();

    let mut visible: Vec<Product> = products
        .iter()
        .filter(|p| category.is_empty() || p.category == category)
        .filter(|p| needle.is_empty() || p.title.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    // Vec::sort_by is stable: price ties keep their original relative order.
    visible.sort_by(|a, b| {
        let ordering = a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal);
        match sort {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });

    visible
}

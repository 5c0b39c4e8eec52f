use std::path::Path;
use std::sync::Arc;

use crate::cli::DashboardConfig;
use crate::color::CategoryColors;
use crate::data::{
    global_metrics, list_categories, list_products, load_file, top_by_error, CategoryFilter,
    Dataset, FilterSelection, GlobalMetrics, LoadError, QueryError, Record, RecordMetrics,
};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<Arc<Dataset>>,

    /// Where the dataset came from, for the top bar.
    pub source_label: Option<String>,

    /// Distinct categories of the dataset (cached).
    pub categories: Vec<String>,

    /// Products available under the current category (cached).
    pub products: Vec<String>,

    pub selection: FilterSelection,

    /// Lookup result for `selection`, recomputed when it changes.
    pub selected: Option<Result<RecordMetrics, QueryError>>,

    /// Global metrics for the loaded dataset (cached).
    pub global: Option<Result<GlobalMetrics, QueryError>>,

    /// Worst predictions, largest error first (cached).
    pub top_errors: Vec<Record>,

    pub colors: CategoryColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            dataset: None,
            source_label: None,
            categories: Vec::new(),
            products: Vec::new(),
            selection: FilterSelection::default(),
            selected: None,
            global: None,
            top_errors: Vec::new(),
            colors: CategoryColors::default(),
            status_message: None,
        }
    }

    /// Load `path`, replacing the current dataset on success.
    ///
    /// On failure the previous dataset stays and the error is shown.
    pub fn load_path(&mut self, path: &Path) -> Result<(), LoadError> {
        match load_file(path) {
            Ok(dataset) => {
                self.set_dataset(dataset, path.display().to_string());
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
                Err(e)
            }
        }
    }

    /// Ingest a newly loaded dataset and reset the filters.
    pub fn set_dataset(&mut self, dataset: Dataset, source_label: String) {
        let dataset = Arc::new(dataset);

        self.categories = list_categories(&dataset);
        self.colors = CategoryColors::new(&self.categories);
        self.global = Some(global_metrics(&dataset));
        self.top_errors = match top_by_error(&dataset, self.config.top_n) {
            Ok(top) => top.into_iter().cloned().collect(),
            Err(e) => {
                log::warn!("Top-N table unavailable: {e}");
                Vec::new()
            }
        };

        self.dataset = Some(dataset);
        self.source_label = Some(source_label);
        self.status_message = None;
        self.selection = FilterSelection::default();
        self.refresh_products();
    }

    /// Change the category scope and select the first product in it.
    pub fn set_category(&mut self, category: CategoryFilter) {
        if self.selection.category == category {
            return;
        }
        self.selection.category = category;
        self.refresh_products();
    }

    pub fn set_product(&mut self, product_name: String) {
        if self.selection.product_name.as_deref() == Some(product_name.as_str()) {
            return;
        }
        self.selection.product_name = Some(product_name);
        self.refresh_selection();
    }

    fn refresh_products(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        self.products = list_products(ds, self.selection.category.as_option());
        self.selection.product_name = self.products.first().cloned();
        self.refresh_selection();
    }

    fn refresh_selection(&mut self) {
        self.selected = self
            .dataset
            .as_ref()
            .and_then(|ds| self.selection.resolve(ds));
    }
}

use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::CategoryFilter;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: category, then product.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Search filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // Clone what we need so we can mutate state inside the combo boxes.
    let categories = state.categories.clone();
    let products = state.products.clone();
    let current_category = state.selection.category.clone();
    let current_product = state.selection.product_name.clone().unwrap_or_default();

    ui.strong("Category");
    egui::ComboBox::from_id_salt("category")
        .width(ui.available_width())
        .selected_text(current_category.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(current_category == CategoryFilter::All, "All categories")
                .clicked()
            {
                state.set_category(CategoryFilter::All);
            }
            for category in &categories {
                let is_current = current_category.as_option() == Some(category.as_str());
                if ui.selectable_label(is_current, category).clicked() {
                    state.set_category(CategoryFilter::Only(category.clone()));
                }
            }
        });
    ui.add_space(8.0);

    ui.strong("Product");
    if products.is_empty() {
        ui.label(RichText::new("No products in this category.").weak());
        return;
    }
    egui::ComboBox::from_id_salt("product")
        .width(ui.available_width())
        .selected_text(&current_product)
        .show_ui(ui, |ui: &mut Ui| {
            for product in &products {
                if ui
                    .selectable_label(*product == current_product, product)
                    .clicked()
                {
                    state.set_product(product.clone());
                }
            }
        });
    ui.add_space(4.0);
    ui.label(RichText::new(format!("{} products", products.len())).small().weak());
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} products in {} categories, absolute error {}",
                ds.len(),
                state.categories.len(),
                ds.error_source()
            ));
            if let Some(source) = &state.source_label {
                ui.label(RichText::new(source).weak());
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open scored dataset")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        // Failures are logged and shown in the top bar by load_path.
        state.load_path(&path).ok();
    }
}

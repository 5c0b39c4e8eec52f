use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::format;
use crate::state::AppState;

const HEADERS: [&str; 7] = [
    "Product",
    "Category",
    "Actual price",
    "Predicted price",
    "Absolute error",
    "Rating",
    "Reviews",
];

// ---------------------------------------------------------------------------
// Worst predictions table
// ---------------------------------------------------------------------------

/// Render the top-N products by absolute error.
pub fn top_errors(ui: &mut Ui, state: &AppState) {
    ui.heading(format!(
        "Top {} products by absolute error",
        state.config.top_n
    ));

    if state.top_errors.is_empty() {
        ui.label("No products to rank.");
        return;
    }

    let symbol = state.config.currency.as_str();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::initial(280.0).at_least(120.0).clip(true))
        .column(Column::initial(180.0).at_least(80.0).clip(true))
        .columns(Column::auto().at_least(70.0), 4)
        .column(Column::remainder().at_least(60.0))
        .header(22.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for record in &state.top_errors {
                body.row(20.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&record.product_name);
                    });
                    row.col(|ui| {
                        ui.label(&record.category);
                    });
                    row.col(|ui| {
                        ui.label(format::currency(record.discounted_price, symbol));
                    });
                    row.col(|ui| {
                        ui.label(format::currency(record.predicted_discounted_price, symbol));
                    });
                    row.col(|ui| {
                        ui.label(format::currency(record.absolute_error, symbol));
                    });
                    row.col(|ui| {
                        ui.label(format::rating(record.rating));
                    });
                    row.col(|ui| {
                        ui.label(format::count(record.rating_count));
                    });
                });
            }
        });
}

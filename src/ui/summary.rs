use eframe::egui::{Color32, RichText, Ui};

use crate::data::ErrorPercent;
use crate::format;
use crate::state::AppState;

/// A labelled headline number.
fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.group(|ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(label).small().weak());
        ui.label(RichText::new(value).size(22.0).strong());
    });
}

// ---------------------------------------------------------------------------
// Selected product
// ---------------------------------------------------------------------------

pub fn selected_product(ui: &mut Ui, state: &AppState) {
    ui.heading("Selected product");

    let metrics = match &state.selected {
        Some(Ok(m)) => m,
        Some(Err(e)) => {
            ui.label(RichText::new(e.to_string()).color(Color32::YELLOW));
            ui.label("Pick another product in the filter panel.");
            return;
        }
        None => {
            ui.label("Select a product in the filter panel.");
            return;
        }
    };
    let record = &metrics.record;
    let symbol = state.config.currency.as_str();

    ui.label(RichText::new(&record.product_name).strong());
    ui.columns(4, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Actual price", format::currency(record.discounted_price, symbol));
        metric(
            &mut cols[1],
            "Predicted price",
            format::currency(record.predicted_discounted_price, symbol),
        );
        metric(&mut cols[2], "Absolute error", format::currency(metrics.absolute_error, symbol));
        metric(&mut cols[3], "Error percent", format::percent(metrics.error_percent));
    });

    ui.add_space(6.0);
    ui.label(format!("Category: {}", record.category));
    ui.label(format!("Rating: ⭐ {}", format::rating(record.rating)));
    ui.label(format!("Reviews: {}", format::count(record.rating_count)));
    if let Some(sentiment) = record.sentiment {
        ui.label(format!("Average review sentiment: {}", format::sentiment(sentiment)));
    }
}

// ---------------------------------------------------------------------------
// Global model performance
// ---------------------------------------------------------------------------

pub fn global_performance(ui: &mut Ui, state: &AppState) {
    ui.heading("Global model performance");

    let global = match &state.global {
        Some(Ok(g)) => g,
        Some(Err(e)) => {
            ui.label(RichText::new(e.to_string()).color(Color32::YELLOW));
            return;
        }
        None => return,
    };
    let symbol = state.config.currency.as_str();

    ui.columns(2, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Global MAE (mean absolute error)", format::currency(global.mae, symbol));
        metric(
            &mut cols[1],
            "Global MAPE (mean absolute percentage error)",
            format::percent(global.mape),
        );
    });

    if global.zero_price_count > 0 {
        let note = match global.mape {
            ErrorPercent::Defined(_) => format!(
                "{} of {} products have a zero price and are left out of MAPE.",
                global.zero_price_count, global.record_count
            ),
            ErrorPercent::Undefined => "Every product has a zero price; MAPE is undefined.".to_string(),
        };
        ui.label(RichText::new(note).small().weak());
    }
}

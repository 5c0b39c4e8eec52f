use std::collections::BTreeMap;

use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, LineStyle, MarkerShape, Plot, PlotPoints, Points};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Actual vs predicted scatter (central panel)
// ---------------------------------------------------------------------------

/// One point per product, coloured by category.  Points on the dashed
/// diagonal were predicted exactly; the selected product is a diamond.
pub fn price_scatter(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    ui.heading("Actual vs predicted price");

    let mut by_category: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    let mut max_price: f64 = 0.0;
    for r in dataset.records() {
        by_category
            .entry(r.category.as_str())
            .or_default()
            .push([r.discounted_price, r.predicted_discounted_price]);
        max_price = max_price
            .max(r.discounted_price)
            .max(r.predicted_discounted_price);
    }

    let selected = match &state.selected {
        Some(Ok(m)) => Some([m.record.discounted_price, m.record.predicted_discounted_price]),
        _ => None,
    };

    Plot::new("price_scatter")
        .legend(Legend::default())
        .height(380.0)
        .x_axis_label("Actual price")
        .y_axis_label("Predicted price")
        .data_aspect(1.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let diagonal = Line::new(PlotPoints::new(vec![[0.0, 0.0], [max_price, max_price]]))
                .name("actual = predicted")
                .color(Color32::GRAY)
                .style(LineStyle::dashed_loose());
            plot_ui.line(diagonal);

            for (category, points) in by_category {
                let series = Points::new(PlotPoints::new(points))
                    .name(category)
                    .color(state.colors.color_for(category))
                    .radius(2.0);
                plot_ui.points(series);
            }

            if let Some(point) = selected {
                let marker = Points::new(PlotPoints::new(vec![point]))
                    .name("selected product")
                    .shape(MarkerShape::Diamond)
                    .color(Color32::WHITE)
                    .filled(true)
                    .radius(6.0);
                plot_ui.points(marker);
            }
        });
}

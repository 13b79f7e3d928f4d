//! Rendering of the latest estimate: headline, per-resource lines, chart.

use bevy::prelude::*;
use bevy_egui::egui;

use estimator::estimate::ImpactEstimate;

use crate::format::{format_count, format_quantity};
use crate::resource_chart::draw_resource_chart;

/// Outcome of the most recent trigger action. `None` until the first
/// prediction; errors are stored pre-formatted for display.
#[derive(Resource, Default)]
pub struct EstimateState {
    pub outcome: Option<Result<ImpactEstimate, String>>,
}

pub fn show_results(ui: &mut egui::Ui, estimate: &EstimateState) {
    let Some(outcome) = &estimate.outcome else {
        return;
    };

    ui.separator();
    match outcome {
        Ok(result) => show_estimate(ui, result),
        Err(message) => {
            ui.label(
                egui::RichText::new(format!("Prediction failed: {message}"))
                    .color(egui::Color32::from_rgb(230, 90, 80)),
            );
        }
    }
}

fn show_estimate(ui: &mut egui::Ui, result: &ImpactEstimate) {
    ui.label(
        egui::RichText::new(format!(
            "Estimated Affected Population: {}",
            format_count(result.population as i64)
        ))
        .size(16.0)
        .strong()
        .color(egui::Color32::from_rgb(110, 200, 120)),
    );

    ui.add_space(8.0);
    ui.heading("Estimated Resource Requirements");
    for (kind, quantity) in result.resources {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(kind.label()).strong());
            ui.label(format_quantity(quantity));
        });
    }

    ui.add_space(8.0);
    draw_resource_chart(ui, result);
}

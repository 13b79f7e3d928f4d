//! Painter-drawn bar chart of the four resource quantities.

use bevy_egui::egui;

use estimator::estimate::ImpactEstimate;
use estimator::resources::ResourceKind;

use crate::format::format_quantity;

fn bar_color(kind: ResourceKind) -> egui::Color32 {
    match kind {
        ResourceKind::FoodPackets => egui::Color32::from_rgb(99, 110, 250),
        ResourceKind::WaterLiters => egui::Color32::from_rgb(239, 85, 59),
        ResourceKind::ShelterTents => egui::Color32::from_rgb(0, 204, 150),
        ResourceKind::MedicalKits => egui::Color32::from_rgb(171, 99, 250),
    }
}

pub fn draw_resource_chart(ui: &mut egui::Ui, result: &ImpactEstimate) {
    ui.heading("Resource Demand");

    let (rect, _) = ui.allocate_exact_size(egui::vec2(380.0, 180.0), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 2.0, egui::Color32::from_gray(30));

    let max_quantity = result
        .resources
        .iter()
        .map(|(_, q)| *q)
        .fold(0.01_f64, f64::max); // avoid div by zero when everything is 0

    let bar_width = rect.width() / result.resources.len() as f32;
    // Leave room above the bars for the value labels and below for names.
    let label_top = 16.0;
    let label_bottom = 14.0;
    let plot_height = rect.height() - label_top - label_bottom;

    for (i, (kind, quantity)) in result.resources.iter().enumerate() {
        let normalized = (*quantity / max_quantity) as f32;
        let bar_height = normalized * plot_height;

        let x = rect.min.x + i as f32 * bar_width;
        let baseline = rect.max.y - label_bottom;
        let bar_rect = egui::Rect::from_min_max(
            egui::pos2(x + 8.0, baseline - bar_height),
            egui::pos2(x + bar_width - 8.0, baseline),
        );
        painter.rect_filled(bar_rect, 1.0, bar_color(*kind));

        // Value on top of the bar
        painter.text(
            egui::pos2(x + bar_width / 2.0, baseline - bar_height - 2.0),
            egui::Align2::CENTER_BOTTOM,
            format_quantity(*quantity),
            egui::FontId::proportional(10.0),
            egui::Color32::LIGHT_GRAY,
        );

        // Resource name under the bar
        painter.text(
            egui::pos2(x + bar_width / 2.0, rect.max.y - 6.0),
            egui::Align2::CENTER_CENTER,
            kind.label(),
            egui::FontId::proportional(9.0),
            egui::Color32::GRAY,
        );
    }
}

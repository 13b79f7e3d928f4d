//! The descriptor form: nine input fields and the predict trigger.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use estimator::descriptor::{
    DisasterDescriptor, DisasterGroup, MAGNITUDE_MAX, MAGNITUDE_MIN, YEAR_MAX, YEAR_MIN,
};
use estimator::estimate::estimate_impact;
use estimator::model::LoadedModel;

use crate::results_panel::{show_results, EstimateState};

/// Editable form state. Defaults mirror the canonical example row: a 2025
/// flash flood in India.
#[derive(Resource)]
pub struct DescriptorForm {
    pub year: i32,
    pub country: String,
    pub region: String,
    pub continent: String,
    pub group: DisasterGroup,
    pub subgroup: String,
    pub disaster_type: String,
    pub subtype: String,
    pub magnitude: f64,
}

impl Default for DescriptorForm {
    fn default() -> Self {
        Self {
            year: 2025,
            country: "India".to_string(),
            region: "South Asia".to_string(),
            continent: "Asia".to_string(),
            group: DisasterGroup::Natural,
            subgroup: "Hydrological".to_string(),
            disaster_type: "Flood".to_string(),
            subtype: "Flash flood".to_string(),
            magnitude: 7.5,
        }
    }
}

impl DescriptorForm {
    /// Snapshot the form into an immutable descriptor. The numeric clamps
    /// here are the input-layer bounds enforcement; the estimator does not
    /// re-validate ranges.
    pub fn to_descriptor(&self) -> DisasterDescriptor {
        DisasterDescriptor {
            year: self.year.clamp(YEAR_MIN, YEAR_MAX),
            country: self.country.clone(),
            region: self.region.clone(),
            continent: self.continent.clone(),
            group: self.group,
            subgroup: self.subgroup.clone(),
            disaster_type: self.disaster_type.clone(),
            subtype: self.subtype.clone(),
            magnitude: self.magnitude.clamp(MAGNITUDE_MIN, MAGNITUDE_MAX),
        }
    }
}

pub fn form_panel_ui(
    mut contexts: EguiContexts,
    mut form: ResMut<DescriptorForm>,
    model: Res<LoadedModel>,
    mut estimate: ResMut<EstimateState>,
) {
    egui::CentralPanel::default().show(contexts.ctx_mut(), |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading("Disaster Resource Allocation Optimizer");
            ui.label("Enter disaster details below to estimate affected population and required resources:");
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("Year:");
                ui.add(egui::Slider::new(&mut form.year, YEAR_MIN..=YEAR_MAX));
            });

            text_field(ui, "Country", &mut form.country);
            text_field(ui, "Region", &mut form.region);
            text_field(ui, "Continent", &mut form.continent);

            ui.horizontal(|ui| {
                ui.label("Disaster Group:");
                egui::ComboBox::from_id_salt("disaster_group")
                    .selected_text(form.group.name())
                    .show_ui(ui, |ui| {
                        for group in DisasterGroup::ALL {
                            ui.selectable_value(&mut form.group, group, group.name());
                        }
                    });
            });

            text_field(ui, "Disaster Subgroup", &mut form.subgroup);
            text_field(ui, "Disaster Type", &mut form.disaster_type);
            text_field(ui, "Disaster Subtype", &mut form.subtype);

            ui.horizontal(|ui| {
                ui.label("Disaster Magnitude Value:");
                ui.add(egui::Slider::new(
                    &mut form.magnitude,
                    MAGNITUDE_MIN..=MAGNITUDE_MAX,
                ));
            });

            ui.add_space(12.0);
            let predict = egui::Button::new(egui::RichText::new("Predict Impact").size(16.0))
                .min_size(egui::vec2(140.0, 28.0));
            if ui.add(predict).clicked() {
                run_prediction(&model, &form, &mut estimate);
            }

            ui.add_space(12.0);
            show_results(ui, &estimate);
        });
    });
}

/// One triggered action: snapshot the form, run the estimator, store the
/// outcome for display. A failure replaces the previous result wholesale;
/// nothing partial is ever shown.
fn run_prediction(model: &LoadedModel, form: &DescriptorForm, estimate: &mut EstimateState) {
    let descriptor = form.to_descriptor();
    match estimate_impact(&model.0, &descriptor) {
        Ok(result) => {
            info!(
                "Predicted {} affected for {} / {} ({})",
                result.population,
                descriptor.country,
                descriptor.disaster_type,
                descriptor.year
            );
            estimate.outcome = Some(Ok(result));
        }
        Err(e) => {
            warn!("Prediction failed: {e}");
            estimate.outcome = Some(Err(e.to_string()));
        }
    }
}

fn text_field(ui: &mut egui::Ui, label: &str, value: &mut String) {
    ui.horizontal(|ui| {
        ui.label(format!("{label}:"));
        ui.add(
            egui::TextEdit::singleline(value)
                .desired_width(220.0)
                .char_limit(60),
        );
    });
}

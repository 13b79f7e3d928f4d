use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod form_panel;
pub mod format;
pub mod resource_chart;
pub mod results_panel;
pub mod theme;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<form_panel::DescriptorForm>()
            .init_resource::<results_panel::EstimateState>()
            .add_systems(Startup, theme::apply_theme)
            .add_systems(Update, form_panel::form_panel_ui);
    }
}

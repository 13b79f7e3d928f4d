use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use estimator::model::LoadedModel;

fn main() {
    // Startup precondition: without a valid model artifact the process
    // refuses to start. It never serves default or zero predictions.
    let model = match artifact::load_model(artifact::MODEL_PATH) {
        Ok(model) => model,
        Err(e) => {
            eprintln!(
                "Failed to load model artifact '{}': {e}",
                artifact::MODEL_PATH
            );
            std::process::exit(1);
        }
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Disaster Resource Allocation Optimizer".to_string(),
                resolution: (560.0, 780.0).into(),
                present_mode: PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        // The app only repaints on input; no reason to spin at full rate.
        .insert_resource(WinitSettings {
            focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
            unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
        })
        .insert_resource(LoadedModel(model))
        .add_plugins(ui::UiPlugin)
        .add_systems(Startup, log_model_summary)
        .run();
}

fn log_model_summary(model: Res<LoadedModel>) {
    let model = &model.0;
    info!(
        "Model ready: {} trees, {} countries, {} disaster types in vocabulary",
        model.regressor.trees.len(),
        model.encoders.country.len(),
        model.encoders.disaster_type.len(),
    );
}

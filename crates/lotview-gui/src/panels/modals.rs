use lotview_core::api::{CameraType, NewCamera};

use crate::app::LotviewApp;
use crate::messages::NetCommand;

pub fn show(ctx: &egui::Context, app: &mut LotviewApp) {
    show_add_camera(ctx, app);
    show_settings(ctx, app);
}

fn show_add_camera(ctx: &egui::Context, app: &mut LotviewApp) {
    if !app.dashboard.add_modal.open {
        return;
    }

    egui::Window::new("Add camera")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            let modal = &mut app.dashboard.add_modal;

            ui.horizontal(|ui| {
                ui.label("Name:");
                ui.text_edit_singleline(&mut modal.name);
            });

            ui.horizontal(|ui| {
                ui.label("Type:");
                ui.radio_value(&mut modal.kind, CameraType::Video, "Video file");
                ui.radio_value(&mut modal.kind, CameraType::Ip, "IP camera");
            });

            // URL field only applies to IP cameras, as in the original form.
            if modal.kind == CameraType::Ip {
                ui.horizontal(|ui| {
                    ui.label("URL:");
                    ui.text_edit_singleline(&mut modal.url);
                });
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(modal.can_submit(), egui::Button::new("Start calibration"))
                    .clicked()
                {
                    let camera = NewCamera {
                        name: modal.name.trim().to_string(),
                        kind: modal.kind,
                        url: modal.url.trim().to_string(),
                    };
                    modal.open = false;
                    let _ = app.cmd_tx.send(NetCommand::CreateCamera { camera });
                }

                if ui.button("Cancel").clicked() {
                    modal.reset();
                }
            });
        });
}

fn show_settings(ctx: &egui::Context, app: &mut LotviewApp) {
    if !app.dashboard.show_settings {
        return;
    }

    egui::Window::new("Settings")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::Grid::new("settings_grid").num_columns(2).show(ui, |ui| {
                ui.label("Backend:");
                ui.monospace(&app.config.base_url);
                ui.end_row();

                ui.label("Poll interval:");
                ui.monospace(format!("{} ms", app.config.poll_interval_ms));
                ui.end_row();

                ui.label("Cameras:");
                ui.monospace(app.dashboard.cameras.len().to_string());
                ui.end_row();
            });

            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button("Close").clicked() {
                    app.dashboard.show_settings = false;
                }
            });
        });
}

use crate::app::LotviewApp;
use crate::state::Screen;

pub fn show(ctx: &egui::Context, app: &mut LotviewApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area — fixed height for 3 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 3.0 + spacing * 2.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.log_messages.is_empty() {
                    for _ in 0..3 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            ui.label(format!("Backend: {}", app.config.base_url));
            ui.separator();
            match app.screen {
                Screen::Dashboard => {
                    if let Some(camera) = app.dashboard.current_camera() {
                        ui.label(format!(
                            "Camera {} — {} slots",
                            camera.id,
                            app.dashboard.slots.len()
                        ));
                    } else {
                        ui.label("No camera selected");
                    }
                }
                Screen::Calibration => {
                    if let Some(cal) = &app.calibration {
                        ui.label(format!(
                            "Calibrating camera {} — {} regions",
                            cal.camera_id,
                            cal.session.len()
                        ));
                    }
                }
            }
        });

        ui.add_space(2.0);
    });
}

use lotview_core::geometry::{FitTransform, NativeSize, Viewport};

use crate::app::LotviewApp;
use crate::messages::NetCommand;
use crate::panels::{full_uv, image_screen_rect};

pub fn show(ctx: &egui::Context, app: &mut LotviewApp) {
    show_toolbar(ctx, app);
    show_slot_cards(ctx, app);
    show_preview(ctx, app);
}

fn show_toolbar(ctx: &egui::Context, app: &mut LotviewApp) {
    egui::TopBottomPanel::top("dashboard_toolbar").show(ctx, |ui| {
        ui.add_space(2.0);
        ui.horizontal(|ui| {
            let multiple = app.dashboard.cameras.len() > 1;

            if ui.add_enabled(multiple, egui::Button::new("<")).clicked()
                && app.dashboard.select_previous()
            {
                app.on_camera_switched();
            }

            match app.dashboard.current_camera() {
                Some(camera) => {
                    ui.strong(format!("{} (camera {})", camera.name, camera.id));
                }
                None => {
                    ui.weak("No cameras");
                }
            }

            if ui.add_enabled(multiple, egui::Button::new(">")).clicked()
                && app.dashboard.select_next()
            {
                app.on_camera_switched();
            }

            ui.separator();

            if ui.button("Add camera...").clicked() {
                app.dashboard.add_modal.open = true;
            }

            let current = app.dashboard.current_camera().cloned();
            if ui
                .add_enabled(current.is_some(), egui::Button::new("Calibrate"))
                .clicked()
            {
                if let Some(camera) = &current {
                    app.open_calibration(camera.id, camera.name.clone());
                }
            }

            if ui
                .add_enabled(current.is_some(), egui::Button::new("Delete"))
                .clicked()
            {
                if let Some(camera) = &current {
                    app.send(NetCommand::DeleteCamera { camera_id: camera.id });
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Settings").clicked() {
                    app.dashboard.show_settings = true;
                }
                if ui
                    .add_enabled(current.is_some(), egui::Button::new("Refresh frame"))
                    .clicked()
                {
                    if let Some(camera) = &current {
                        app.send(NetCommand::FetchSnapshot { camera_id: camera.id });
                    }
                }
            });
        });
        ui.add_space(2.0);
    });
}

fn show_slot_cards(ctx: &egui::Context, app: &mut LotviewApp) {
    egui::TopBottomPanel::bottom("slot_cards").show(ctx, |ui| {
        ui.add_space(4.0);
        if app.dashboard.slots.is_empty() {
            ui.weak("No occupancy data yet.");
        } else {
            ui.horizontal_wrapped(|ui| {
                for slot in &app.dashboard.slots {
                    let (fill, label) = if slot.occupied {
                        (egui::Color32::from_rgb(130, 40, 40), "occupied")
                    } else {
                        (egui::Color32::from_rgb(30, 110, 55), "available")
                    };
                    ui.label(
                        egui::RichText::new(format!(" {} {label} ", slot.number))
                            .monospace()
                            .background_color(fill)
                            .color(egui::Color32::WHITE),
                    );
                }
            });
        }
        ui.add_space(4.0);
    });
}

fn show_preview(ctx: &egui::Context, app: &mut LotviewApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        ui.painter()
            .rect_filled(rect, 0.0, egui::Color32::from_gray(30));

        if app.dashboard.current_camera().is_none() {
            show_centered_hint(ui, rect, "No cameras configured. Add one to get started.");
            return;
        }

        let Some(texture) = &app.dashboard.preview else {
            show_centered_hint(ui, rect, "Waiting for camera frame...");
            return;
        };

        let tex_size = texture.size();
        let transform = FitTransform::contain(
            Viewport::new(rect.width() as f64, rect.height() as f64),
            NativeSize::new(tex_size[0] as f64, tex_size[1] as f64),
        );
        if let Ok(transform) = transform {
            let img_rect = image_screen_rect(rect, &transform);
            ui.painter()
                .image(texture.id(), img_rect, full_uv(), egui::Color32::WHITE);
        }
    });
}

fn show_centered_hint(ui: &egui::Ui, rect: egui::Rect, text: &str) {
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(16.0),
        egui::Color32::from_white_alpha(180),
    );
}

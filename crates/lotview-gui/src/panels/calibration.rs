//! Calibration view: draw parking-space regions over a paused camera frame.
//!
//! Pointer positions are converted to viewport-relative display
//! coordinates; the core session maps them to native pixels through the
//! current contain-fit transform. The in-progress drag is drawn at its raw
//! display coordinates and only becomes a region on release.

use lotview_core::geometry::{FitTransform, Point, Viewport};

use crate::app::{push_log, LotviewApp};
use crate::messages::NetCommand;
use crate::panels::{full_uv, image_screen_rect};
use crate::state::CalibrationState;

const REGION_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 255, 0);
const REGION_STROKE_WIDTH: f32 = 2.0;
/// Label position relative to a region's top-left corner.
const LABEL_OFFSET: egui::Vec2 = egui::vec2(5.0, 2.0);

pub fn show(ctx: &egui::Context, app: &mut LotviewApp) {
    let mut go_back = false;
    show_toolbar(ctx, app, &mut go_back);
    show_viewport(ctx, app);

    if go_back {
        app.close_calibration();
    }
}

fn show_toolbar(ctx: &egui::Context, app: &mut LotviewApp, go_back: &mut bool) {
    egui::TopBottomPanel::top("calibration_toolbar").show(ctx, |ui| {
        let Some(cal) = app.calibration.as_mut() else {
            return;
        };

        ui.add_space(2.0);
        ui.horizontal(|ui| {
            if ui.button("< Back").clicked() {
                *go_back = true;
            }

            ui.strong(format!("Calibrating: {}", cal.camera_name));
            ui.separator();
            ui.label(format!("{} spaces", cal.session.len()));
            ui.separator();

            let can_capture =
                cal.frame_data_url.is_some() && !cal.session.has_reference_frame();
            if ui
                .add_enabled(can_capture, egui::Button::new("Capture reference"))
                .clicked()
            {
                if let Some(data_url) = cal.frame_data_url.clone() {
                    cal.session.set_reference_frame(data_url);
                    push_log(&mut app.log_messages, "Reference frame captured".into());
                }
            }
            if cal.session.has_reference_frame() {
                ui.weak("Reference captured");
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let can_save = cal.session.is_submittable() && !cal.saving;
                if ui
                    .add_enabled(can_save, egui::Button::new("Save calibration"))
                    .clicked()
                {
                    match cal.session.upload() {
                        Ok(upload) => {
                            cal.saving = true;
                            let _ = app.cmd_tx.send(NetCommand::SaveCalibration {
                                camera_id: cal.camera_id,
                                upload,
                            });
                        }
                        Err(err) => {
                            push_log(&mut app.log_messages, format!("ERROR: {err}"));
                        }
                    }
                }

                if ui
                    .add_enabled(!cal.session.is_empty(), egui::Button::new("Export regions..."))
                    .clicked()
                {
                    export_regions(cal, &mut app.log_messages);
                }
            });
        });
        ui.add_space(2.0);
    });
}

fn export_regions(cal: &CalibrationState, log: &mut Vec<String>) {
    let Some(path) = rfd::FileDialog::new()
        .set_file_name("regions.json")
        .add_filter("JSON", &["json"])
        .save_file()
    else {
        return;
    };

    let result = serde_json::to_string_pretty(cal.session.regions())
        .map_err(anyhow::Error::from)
        .and_then(|json| std::fs::write(&path, json).map_err(anyhow::Error::from));

    match result {
        Ok(()) => push_log(
            log,
            format!(
                "Exported {} regions to {}",
                cal.session.len(),
                path.display()
            ),
        ),
        Err(err) => push_log(log, format!("ERROR: export failed: {err}")),
    }
}

fn show_viewport(ctx: &egui::Context, app: &mut LotviewApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        ui.painter()
            .rect_filled(rect, 0.0, egui::Color32::from_gray(30));

        let Some(cal) = app.calibration.as_mut() else {
            return;
        };

        let (Some(texture_id), Some(native)) =
            (cal.texture.as_ref().map(|t| t.id()), cal.native_size)
        else {
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Waiting for camera frame...",
                egui::FontId::proportional(16.0),
                egui::Color32::from_white_alpha(180),
            );
            return;
        };

        // The fit is recomputed (and fully replaced) every frame, so
        // viewport resizes and late-arriving frames are always reflected.
        let Ok(transform) = FitTransform::contain(
            Viewport::new(rect.width() as f64, rect.height() as f64),
            native,
        ) else {
            return;
        };

        let img_rect = image_screen_rect(rect, &transform);
        ui.painter()
            .image(texture_id, img_rect, full_uv(), egui::Color32::WHITE);

        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        handle_drag(&response, cal, &transform, rect, &mut app.log_messages);
        draw_regions(ui, cal, &transform, rect);
        draw_live_drag(ui, &response, cal);
    });
}

fn to_display_point(pos: egui::Pos2, panel_rect: egui::Rect) -> Point {
    Point::new(
        (pos.x - panel_rect.min.x) as f64,
        (pos.y - panel_rect.min.y) as f64,
    )
}

fn handle_drag(
    response: &egui::Response,
    cal: &mut CalibrationState,
    transform: &FitTransform,
    panel_rect: egui::Rect,
    log: &mut Vec<String>,
) {
    if response.drag_started_by(egui::PointerButton::Primary) {
        cal.drag_start = response.interact_pointer_pos();
    }

    if response.drag_stopped_by(egui::PointerButton::Primary) {
        let start = cal.drag_start.take();
        let end = response.interact_pointer_pos();
        if let (Some(start), Some(end)) = (start, end) {
            let a = to_display_point(start, panel_rect);
            let b = to_display_point(end, panel_rect);
            match cal.session.commit_drag(a, b, transform) {
                Ok(region) => push_log(log, format!("Region {} added", region.number)),
                // Accidental drags are dropped without bothering the user.
                Err(rejection) => tracing::debug!(?rejection, "drag rejected"),
            }
        }
    }
}

fn draw_regions(
    ui: &egui::Ui,
    cal: &CalibrationState,
    transform: &FitTransform,
    panel_rect: egui::Rect,
) {
    let stroke = egui::Stroke::new(REGION_STROKE_WIDTH, REGION_COLOR);
    let painter = ui.painter();

    for region in cal.session.regions() {
        let tl = transform.to_display(Point::new(region.x as f64, region.y as f64));
        let br = transform.to_display(Point::new(
            (region.x + region.w as i32) as f64,
            (region.y + region.h as i32) as f64,
        ));
        let screen = egui::Rect::from_min_max(
            panel_rect.min + egui::vec2(tl.x as f32, tl.y as f32),
            panel_rect.min + egui::vec2(br.x as f32, br.y as f32),
        );

        painter.rect_stroke(screen, 0.0, stroke, egui::epaint::StrokeKind::Outside);
        painter.text(
            screen.min + LABEL_OFFSET,
            egui::Align2::LEFT_TOP,
            region.number.to_string(),
            egui::FontId::proportional(16.0),
            REGION_COLOR,
        );
    }
}

fn draw_live_drag(ui: &egui::Ui, response: &egui::Response, cal: &CalibrationState) {
    if !response.dragged_by(egui::PointerButton::Primary) {
        return;
    }
    let (Some(start), Some(current)) = (cal.drag_start, ui.input(|i| i.pointer.hover_pos()))
    else {
        return;
    };

    ui.painter().rect_stroke(
        egui::Rect::from_two_pos(start, current),
        0.0,
        egui::Stroke::new(REGION_STROKE_WIDTH, REGION_COLOR),
        egui::epaint::StrokeKind::Outside,
    );
}

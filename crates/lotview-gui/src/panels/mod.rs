pub mod calibration;
pub mod dashboard;
pub mod modals;
pub mod status;

use lotview_core::geometry::FitTransform;

/// Full-texture UV rect.
pub(crate) fn full_uv() -> egui::Rect {
    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0))
}

/// Screen rect the letterboxed image occupies inside `panel_rect`.
pub(crate) fn image_screen_rect(panel_rect: egui::Rect, transform: &FitTransform) -> egui::Rect {
    let d = transform.display_rect();
    egui::Rect::from_min_size(
        panel_rect.min + egui::vec2(d.x as f32, d.y as f32),
        egui::vec2(d.w as f32, d.h as f32),
    )
}

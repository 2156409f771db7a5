/// Decode JPEG bytes from the camera feed into an egui ColorImage.
pub fn jpeg_to_color_image(jpeg: &[u8]) -> anyhow::Result<egui::ColorImage> {
    let decoded = image::load_from_memory(jpeg)?.to_rgba8();
    let size = [decoded.width() as usize, decoded.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        size,
        decoded.as_raw(),
    ))
}

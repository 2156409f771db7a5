//! One calibration session: an append-only sequence of operator-drawn
//! regions plus the captured reference frame.

use serde::{Deserialize, Serialize};

use crate::api::CalibrationUpload;
use crate::consts::MIN_DRAG_EXTENT;
use crate::error::{LotviewError, Result};
use crate::geometry::{DisplayRect, FitTransform, Point};

/// One monitored parking slot, in native integer pixels.
///
/// `number` is 1-based, assigned at creation, and never reused within a
/// session. Serializes as `{ number, x, y, w, h }` to match the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub number: u32,
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

/// Why a drag did not produce a region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragRejection {
    /// Horizontal extent at or under the minimum, in display pixels.
    TooNarrow { width: f64 },
    /// Vertical extent at or under the minimum, in display pixels.
    TooShort { height: f64 },
}

/// Session state for one calibration view.
///
/// Regions are append-only for the lifetime of the session; there is no
/// deletion or editing. Rejected drags do not consume a number, so the Nth
/// accepted region always gets number N.
#[derive(Debug, Default)]
pub struct CalibrationSession {
    regions: Vec<Region>,
    reference_frame: Option<String>,
}

impl CalibrationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Commit a completed drag given its two corner points in display
    /// space. The rectangle is normalized, debounced against accidental
    /// drags (both axes must exceed [`MIN_DRAG_EXTENT`] display pixels),
    /// then mapped corner-by-corner to native space and rounded to integer
    /// pixels.
    pub fn commit_drag(
        &mut self,
        a: Point,
        b: Point,
        transform: &FitTransform,
    ) -> std::result::Result<&Region, DragRejection> {
        let rect = DisplayRect::from_corners(a, b);

        if rect.w <= MIN_DRAG_EXTENT {
            return Err(DragRejection::TooNarrow { width: rect.w });
        }
        if rect.h <= MIN_DRAG_EXTENT {
            return Err(DragRejection::TooShort { height: rect.h });
        }

        let (top_left, bottom_right) = transform.rect_to_native(rect);
        let region = Region {
            number: self.regions.len() as u32 + 1,
            x: top_left.x.round() as i32,
            y: top_left.y.round() as i32,
            w: (bottom_right.x - top_left.x).round() as u32,
            h: (bottom_right.y - top_left.y).round() as u32,
        };

        tracing::debug!(
            number = region.number,
            x = region.x,
            y = region.y,
            w = region.w,
            h = region.h,
            "region committed"
        );

        self.regions.push(region);
        Ok(self.regions.last().unwrap())
    }

    /// Record the captured reference frame as an embedded image data URL.
    pub fn set_reference_frame(&mut self, data_url: String) {
        self.reference_frame = Some(data_url);
    }

    pub fn has_reference_frame(&self) -> bool {
        self.reference_frame.is_some()
    }

    /// True once the session can be submitted.
    pub fn is_submittable(&self) -> bool {
        !self.regions.is_empty() && self.reference_frame.is_some()
    }

    /// Build the calibration payload. Requires at least one region and a
    /// captured reference frame.
    pub fn upload(&self) -> Result<CalibrationUpload> {
        if self.regions.is_empty() {
            return Err(LotviewError::EmptyCalibration);
        }
        let reference_frame = self
            .reference_frame
            .clone()
            .ok_or(LotviewError::MissingReference)?;

        Ok(CalibrationUpload {
            spaces: self.regions.clone(),
            reference_frame,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{NativeSize, Viewport};

    fn transform() -> FitTransform {
        FitTransform::contain(
            Viewport::new(800.0, 600.0),
            NativeSize::new(1920.0, 1080.0),
        )
        .unwrap()
    }

    #[test]
    fn worked_example_drag_is_accepted() {
        let mut session = CalibrationSession::new();
        let region = session
            .commit_drag(Point::new(100.0, 100.0), Point::new(140.0, 130.0), &transform())
            .unwrap();

        assert_eq!(
            *region,
            Region {
                number: 1,
                x: 240,
                y: 60,
                w: 96,
                h: 72
            }
        );
    }

    #[test]
    fn nineteen_pixel_drags_are_rejected() {
        let mut session = CalibrationSession::new();
        let t = transform();

        // 19 px wide, tall enough.
        let err = session
            .commit_drag(Point::new(100.0, 100.0), Point::new(119.0, 200.0), &t)
            .unwrap_err();
        assert_eq!(err, DragRejection::TooNarrow { width: 19.0 });

        // Wide enough, 19 px tall.
        let err = session
            .commit_drag(Point::new(100.0, 100.0), Point::new(200.0, 119.0), &t)
            .unwrap_err();
        assert_eq!(err, DragRejection::TooShort { height: 19.0 });

        assert!(session.is_empty());
    }

    #[test]
    fn twenty_one_pixel_drags_are_accepted() {
        let mut session = CalibrationSession::new();
        let region = session
            .commit_drag(Point::new(100.0, 100.0), Point::new(121.0, 121.0), &transform())
            .unwrap();
        assert_eq!(region.number, 1);
    }

    #[test]
    fn exactly_twenty_pixels_is_still_rejected() {
        let mut session = CalibrationSession::new();
        assert!(session
            .commit_drag(Point::new(0.0, 75.0), Point::new(20.0, 95.0), &transform())
            .is_err());
    }

    #[test]
    fn numbering_skips_rejected_drags() {
        let mut session = CalibrationSession::new();
        let t = transform();

        session
            .commit_drag(Point::new(0.0, 75.0), Point::new(50.0, 125.0), &t)
            .unwrap();
        // Rejected drag in between must not consume a number.
        assert!(session
            .commit_drag(Point::new(0.0, 75.0), Point::new(5.0, 80.0), &t)
            .is_err());
        let second = session
            .commit_drag(Point::new(60.0, 75.0), Point::new(110.0, 125.0), &t)
            .unwrap();

        assert_eq!(second.number, 2);
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn reversed_corners_normalize_before_mapping() {
        let mut session = CalibrationSession::new();
        let region = session
            .commit_drag(Point::new(140.0, 130.0), Point::new(100.0, 100.0), &transform())
            .unwrap();
        assert_eq!((region.x, region.y, region.w, region.h), (240, 60, 96, 72));
    }

    #[test]
    fn upload_requires_regions_and_reference() {
        let mut session = CalibrationSession::new();
        assert!(matches!(
            session.upload(),
            Err(LotviewError::EmptyCalibration)
        ));

        session
            .commit_drag(Point::new(100.0, 100.0), Point::new(200.0, 200.0), &transform())
            .unwrap();
        assert!(matches!(
            session.upload(),
            Err(LotviewError::MissingReference)
        ));
        assert!(!session.is_submittable());

        session.set_reference_frame("data:image/jpeg;base64,AAAA".into());
        assert!(session.is_submittable());
        let upload = session.upload().unwrap();
        assert_eq!(upload.spaces.len(), 1);
    }

    #[test]
    fn region_serializes_with_short_field_names() {
        let region = Region {
            number: 3,
            x: 240,
            y: 60,
            w: 96,
            h: 72,
        };
        let json = serde_json::to_value(region).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "number": 3, "x": 240, "y": 60, "w": 96, "h": 72 })
        );
    }
}

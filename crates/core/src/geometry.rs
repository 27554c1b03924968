//! Preview overlay geometry.
//!
//! Face detections arrive in camera-stream pixel coordinates. The preview
//! control shows the stream letterboxed (or pillarboxed) to preserve its
//! aspect ratio, so a face box is mapped in two steps: find the part of the
//! control the video actually occupies, then scale the box into it.
//!
//! Degenerate input (zero or negative sizes, unknown stream properties)
//! never fails; it produces [`Rect::ZERO`].

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in UI units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A detected face in stream pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FaceBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FaceBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Rectangle inside a `control_width` x `control_height` control occupied by
/// a `stream_width` x `stream_height` video, centered with aspect ratio kept.
///
/// Equal aspect ratios fill the control exactly. When the control is wider
/// than the stream, the video fills the control's height and is centered
/// horizontally; otherwise it fills the width and is centered vertically.
pub fn letterbox_rect(
    stream_width: u32,
    stream_height: u32,
    control_width: f64,
    control_height: f64,
) -> Rect {
    // false for NaN as well as non-positive sizes
    let control_sized = control_width > 0.0 && control_height > 0.0;
    if !control_sized || stream_width == 0 || stream_height == 0 {
        return Rect::ZERO;
    }

    let stream_width = f64::from(stream_width);
    let stream_height = f64::from(stream_height);

    let control_aspect = control_width / control_height;
    let stream_aspect = stream_width / stream_height;

    if control_aspect == stream_aspect {
        // scaling either axis can round a hair short of the control
        return Rect::new(0.0, 0.0, control_width, control_height);
    }

    if control_aspect > stream_aspect {
        let scale = control_height / stream_height;
        let scaled_width = stream_width * scale;
        Rect::new(
            (control_width - scaled_width) / 2.0,
            0.0,
            scaled_width,
            control_height,
        )
    } else {
        let scale = control_width / stream_width;
        let scaled_height = stream_height * scale;
        Rect::new(
            0.0,
            (control_height - scaled_height) / 2.0,
            control_width,
            scaled_height,
        )
    }
}

/// Map a face box from stream pixels into UI coordinates inside `letterbox`.
pub fn map_face_box_to_ui(
    face: &FaceBox,
    stream_width: u32,
    stream_height: u32,
    letterbox: &Rect,
) -> Rect {
    if stream_width == 0 || stream_height == 0 {
        return Rect::ZERO;
    }

    let sx = letterbox.width / f64::from(stream_width);
    let sy = letterbox.height / f64::from(stream_height);

    Rect::new(
        letterbox.x + f64::from(face.x) * sx,
        letterbox.y + f64::from(face.y) * sy,
        f64::from(face.width) * sx,
        f64::from(face.height) * sy,
    )
}

/// Stream pixel dimensions reported by the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSize {
    pub width: u32,
    pub height: u32,
}

/// How an overlay should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayStyle {
    /// First face of a detection event.
    Primary,
    Secondary,
}

/// One face rectangle ready to draw over the preview.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceOverlay {
    pub rect: Rect,
    pub style: OverlayStyle,
}

/// Geometry of the preview at the time of a detection event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewGeometry {
    /// `None` until the camera reports its preview stream properties.
    pub stream: Option<StreamSize>,
    pub control_width: f64,
    pub control_height: f64,
}

impl PreviewGeometry {
    pub fn new(stream: Option<StreamSize>, control_width: f64, control_height: f64) -> Self {
        Self {
            stream,
            control_width,
            control_height,
        }
    }

    /// Part of the control occupied by video.
    pub fn letterbox(&self) -> Rect {
        match self.stream {
            Some(s) => letterbox_rect(s.width, s.height, self.control_width, self.control_height),
            None => Rect::ZERO,
        }
    }

    /// Map one face box into UI coordinates.
    pub fn map_face(&self, face: &FaceBox) -> Rect {
        match self.stream {
            Some(s) => map_face_box_to_ui(face, s.width, s.height, &self.letterbox()),
            None => Rect::ZERO,
        }
    }

    /// Overlays for every face of one detection event, in detection order.
    ///
    /// The first face is drawn [`OverlayStyle::Primary`].
    pub fn overlays(&self, faces: &[FaceBox]) -> Vec<FaceOverlay> {
        let letterbox = self.letterbox();
        faces
            .iter()
            .enumerate()
            .map(|(i, face)| FaceOverlay {
                rect: match self.stream {
                    Some(s) => map_face_box_to_ui(face, s.width, s.height, &letterbox),
                    None => Rect::ZERO,
                },
                style: if i == 0 {
                    OverlayStyle::Primary
                } else {
                    OverlayStyle::Secondary
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn contains(outer: &Rect, inner: &Rect) -> bool {
        inner.x >= outer.x - EPS
            && inner.y >= outer.y - EPS
            && inner.right() <= outer.right() + EPS
            && inner.bottom() <= outer.bottom() + EPS
    }

    const STREAMS: &[(u32, u32)] = &[
        (1280, 720),
        (640, 480),
        (1920, 1080),
        (480, 640),
        (1, 1),
        (320, 240),
        (720, 1280),
    ];

    const CONTROLS: &[(f64, f64)] = &[
        (800.0, 600.0),
        (1024.0, 768.0),
        (640.0, 360.0),
        (300.0, 900.0),
        (1.0, 1.0),
        (1366.5, 767.25),
        (1920.0, 1080.0),
        (1280.0, 720.0),
        (320.0, 240.0),
        (538.72, 303.030_000_000_000_03),
    ];

    #[test]
    fn pillarboxes_wide_stream_in_4_3_control() {
        let rect = letterbox_rect(1280, 720, 800.0, 600.0);
        assert_eq!(rect, Rect::new(0.0, 75.0, 800.0, 450.0));
    }

    #[test]
    fn centers_horizontally_when_control_is_wider() {
        let rect = letterbox_rect(640, 480, 1280.0, 480.0);
        assert_eq!(rect, Rect::new(320.0, 0.0, 640.0, 480.0));
    }

    #[test]
    fn equal_aspect_fills_control() {
        let rect = letterbox_rect(1280, 720, 640.0, 360.0);
        assert_eq!(rect, Rect::new(0.0, 0.0, 640.0, 360.0));
    }

    #[test]
    fn degenerate_sizes_yield_zero_rect() {
        assert_eq!(letterbox_rect(1280, 720, 0.0, 0.0), Rect::ZERO);
        assert_eq!(letterbox_rect(1280, 720, 800.0, 0.0), Rect::ZERO);
        assert_eq!(letterbox_rect(1280, 720, -5.0, 600.0), Rect::ZERO);
        assert_eq!(letterbox_rect(1280, 720, f64::NAN, 600.0), Rect::ZERO);
        assert_eq!(letterbox_rect(0, 720, 800.0, 600.0), Rect::ZERO);
        assert_eq!(letterbox_rect(1280, 0, 800.0, 600.0), Rect::ZERO);
    }

    #[test]
    fn equal_aspect_with_inexact_scale_fills_control() {
        let (cw, ch) = (538.72, 303.030_000_000_000_03);
        assert_eq!(cw / ch, 1280.0 / 720.0);
        let rect = letterbox_rect(1280, 720, cw, ch);
        assert_eq!(rect, Rect::new(0.0, 0.0, cw, ch));
    }

    #[test]
    fn letterbox_stays_inside_control_and_covers_one_axis() {
        let mut equal_pairs = 0;
        for &(sw, sh) in STREAMS {
            for &(cw, ch) in CONTROLS {
                let rect = letterbox_rect(sw, sh, cw, ch);
                let control = Rect::new(0.0, 0.0, cw, ch);
                assert!(contains(&control, &rect), "{sw}x{sh} in {cw}x{ch}: {rect:?}");

                let full_width = rect.width == cw;
                let full_height = rect.height == ch;
                if cw / ch == f64::from(sw) / f64::from(sh) {
                    equal_pairs += 1;
                    assert!(full_width && full_height, "{sw}x{sh} in {cw}x{ch}: {rect:?}");
                    assert_eq!((rect.x, rect.y), (0.0, 0.0));
                } else {
                    assert!(full_width != full_height, "{sw}x{sh} in {cw}x{ch}: {rect:?}");
                }
            }
        }
        // 16:9, 4:3 and 1:1 streams each meet matching controls
        assert!(equal_pairs >= 10, "only {equal_pairs} equal-aspect pairs");
    }

    #[test]
    fn maps_face_into_letterbox() {
        let letterbox = letterbox_rect(1280, 720, 800.0, 600.0);
        let face = FaceBox::new(100, 50, 40, 40);
        let rect = map_face_box_to_ui(&face, 1280, 720, &letterbox);
        assert_eq!(rect, Rect::new(62.5, 106.25, 25.0, 25.0));
    }

    #[test]
    fn map_face_with_zero_stream_yields_zero_rect() {
        let letterbox = Rect::new(0.0, 75.0, 800.0, 450.0);
        let face = FaceBox::new(10, 10, 10, 10);
        assert_eq!(map_face_box_to_ui(&face, 0, 720, &letterbox), Rect::ZERO);
        assert_eq!(map_face_box_to_ui(&face, 1280, 0, &letterbox), Rect::ZERO);
    }

    #[test]
    fn faces_inside_stream_map_inside_letterbox() {
        for &(sw, sh) in STREAMS {
            for &(cw, ch) in CONTROLS {
                let letterbox = letterbox_rect(sw, sh, cw, ch);
                let faces = [
                    FaceBox::new(0, 0, sw, sh),
                    FaceBox::new(0, 0, 1, 1),
                    FaceBox::new(sw / 2, sh / 2, sw - sw / 2, sh - sh / 2),
                    FaceBox::new(sw / 4, sh / 3, sw / 4, sh / 3),
                ];
                for face in &faces {
                    let rect = map_face_box_to_ui(face, sw, sh, &letterbox);
                    assert!(
                        contains(&letterbox, &rect),
                        "{face:?} in {sw}x{sh} -> {cw}x{ch}: {rect:?} not in {letterbox:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn overlays_mark_first_face_primary() {
        let geometry = PreviewGeometry::new(
            Some(StreamSize {
                width: 1280,
                height: 720,
            }),
            800.0,
            600.0,
        );
        let overlays = geometry.overlays(&[
            FaceBox::new(100, 50, 40, 40),
            FaceBox::new(0, 0, 1280, 720),
        ]);

        assert_eq!(overlays.len(), 2);
        assert_eq!(overlays[0].style, OverlayStyle::Primary);
        assert_eq!(overlays[0].rect, Rect::new(62.5, 106.25, 25.0, 25.0));
        assert_eq!(overlays[1].style, OverlayStyle::Secondary);
        assert_eq!(overlays[1].rect, geometry.letterbox());
    }

    #[test]
    fn overlays_without_stream_are_empty_rects() {
        let geometry = PreviewGeometry::new(None, 800.0, 600.0);
        let overlays = geometry.overlays(&[FaceBox::new(1, 2, 3, 4)]);
        assert_eq!(overlays[0].rect, Rect::ZERO);
        assert!(overlays[0].rect.is_empty());
        assert_eq!(geometry.map_face(&FaceBox::new(1, 2, 3, 4)), Rect::ZERO);
    }

    #[test]
    fn no_faces_no_overlays() {
        let geometry = PreviewGeometry::new(
            Some(StreamSize {
                width: 640,
                height: 480,
            }),
            640.0,
            480.0,
        );
        assert!(geometry.overlays(&[]).is_empty());
    }
}

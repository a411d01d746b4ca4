// Tests for multi-window routing against a recording render target.

use fnv::FnvHashMap;
use glam::{Vec3, Vec4};
use orbit_core::*;

struct Layout {
    regions: FnvHashMap<String, ScreenRect>,
    viewport: ScreenRect,
    target: (u32, u32),
}

impl Layout {
    fn new(w: f32, h: f32, scale: f32) -> Self {
        Self {
            regions: FnvHashMap::default(),
            viewport: ScreenRect::new(0.0, 0.0, w, h),
            target: ((w * scale) as u32, (h * scale) as u32),
        }
    }

    fn with(mut self, id: &str, rect: ScreenRect) -> Self {
        self.regions.insert(id.to_string(), rect);
        self
    }
}

impl LayoutSource for Layout {
    fn region_rect(&self, region_id: &str) -> Option<ScreenRect> {
        self.regions.get(region_id).copied()
    }

    fn viewport(&self) -> ScreenRect {
        self.viewport
    }

    fn target_size(&self) -> (u32, u32) {
        self.target
    }
}

#[derive(Debug, PartialEq)]
enum Call {
    Clear,
    Viewport(DeviceRect),
    Scissor(DeviceRect),
    Overrides(VisualOverrides),
    Render,
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl RenderTarget for Recorder {
    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn set_viewport(&mut self, viewport: &PassViewport) {
        self.calls.push(Call::Viewport(viewport.device));
    }

    fn set_scissor(&mut self, rect: DeviceRect) {
        self.calls.push(Call::Scissor(rect));
    }

    fn apply_overrides(&mut self, overrides: &VisualOverrides) {
        self.calls.push(Call::Overrides(*overrides));
    }

    fn render(&mut self) {
        self.calls.push(Call::Render);
    }
}

fn three_windows() -> ViewportRouter {
    ViewportRouter::new(vec![
        ViewportWindow::new("skills", true, VisualMode::Primary),
        ViewportWindow::new("projects", false, VisualMode::Recessed),
        ViewportWindow::new("contact", false, VisualMode::Tilted),
    ])
}

#[test]
fn clears_once_then_one_pass_per_window() {
    let layout = Layout::new(1000.0, 800.0, 1.0)
        .with("skills", ScreenRect::new(0.0, 0.0, 500.0, 400.0))
        .with("projects", ScreenRect::new(500.0, 0.0, 500.0, 400.0))
        .with("contact", ScreenRect::new(0.0, 400.0, 1000.0, 400.0));
    let mut rec = Recorder::default();
    let report = three_windows().render_all(&layout, &mut rec);

    assert_eq!(report.rendered.as_slice(), &[0, 1, 2]);
    assert!(report.skipped.is_empty());
    assert_eq!(rec.calls.iter().filter(|c| **c == Call::Clear).count(), 1);
    assert_eq!(rec.calls[0], Call::Clear);
    assert_eq!(rec.calls.iter().filter(|c| **c == Call::Render).count(), 3);

    let second = DeviceRect {
        x: 500,
        y: 0,
        width: 500,
        height: 400,
    };
    // Primary window: no restore afterwards.
    assert_eq!(rec.calls[3], Call::Overrides(VisualOverrides::NEUTRAL));
    assert_eq!(rec.calls[4], Call::Render);
    assert_eq!(rec.calls[5], Call::Viewport(second));
    assert_eq!(rec.calls[6], Call::Scissor(second));
    assert_eq!(rec.calls[7], Call::Overrides(VisualMode::Recessed.overrides()));
    assert_eq!(rec.calls[8], Call::Render);
    assert_eq!(rec.calls[9], Call::Overrides(VisualOverrides::NEUTRAL));
    assert_eq!(rec.calls.last(), Some(&Call::Overrides(VisualOverrides::NEUTRAL)));
}

#[test]
fn degenerate_missing_and_offscreen_windows_are_skipped() {
    let layout = Layout::new(1000.0, 800.0, 1.0)
        .with("skills", ScreenRect::new(0.0, 0.0, 9.0, 400.0))
        .with("contact", ScreenRect::new(0.0, 1200.0, 1000.0, 400.0));
    let mut rec = Recorder::default();
    let report = three_windows().render_all(&layout, &mut rec);

    assert!(report.rendered.is_empty());
    assert_eq!(
        report.skipped.as_slice(),
        &[
            (0, SkipReason::Degenerate),
            (1, SkipReason::MissingRegion),
            (2, SkipReason::Offscreen)
        ]
    );
    assert_eq!(rec.calls, vec![Call::Clear]);
}

#[test]
fn device_rect_follows_pixel_ratio() {
    let layout = Layout::new(800.0, 600.0, 2.0).with("skills", ScreenRect::new(100.0, 50.0, 200.0, 100.0));
    let vp = pass_viewport(layout.regions["skills"], &layout).unwrap();
    assert_eq!(
        vp.device,
        DeviceRect {
            x: 200,
            y: 100,
            width: 400,
            height: 200
        }
    );
    assert!((vp.aspect() - 2.0).abs() < 1e-6);
    assert_eq!(vp.crop, glam::Mat4::IDENTITY);
}

#[test]
fn partially_visible_window_is_clipped_with_matching_crop() {
    // Window hangs 100 px off the top of an 800x600 page.
    let rect = ScreenRect::new(0.0, -100.0, 400.0, 300.0);
    let layout = Layout::new(800.0, 600.0, 1.0).with("skills", rect);
    let vp = pass_viewport(rect, &layout).unwrap();
    assert_eq!(
        vp.device,
        DeviceRect {
            x: 0,
            y: 0,
            width: 400,
            height: 200
        }
    );

    // The bottom edge of the full window (ndc y = -1) must still land on the
    // bottom edge of the clipped viewport.
    let bottom = vp.crop * Vec4::new(0.0, -1.0, 0.0, 1.0);
    assert!((bottom.y + 1.0).abs() < 1e-5);
    // The top edge of the full window sits above the clipped viewport.
    let top = vp.crop * Vec4::new(0.0, 1.0, 0.0, 1.0);
    assert!((top.y - 2.0).abs() < 1e-5);
    // The unclipped centre row (y = 50 css) maps to ndc 0.5 in the clipped pass.
    let centre = vp.crop * Vec3::ZERO.extend(1.0);
    assert!((centre.y - 0.5).abs() < 1e-5);
}

#[test]
fn interactive_rect_requires_visible_interactive_window() {
    let router = three_windows();
    let layout = Layout::new(1000.0, 800.0, 1.0).with("skills", ScreenRect::new(10.0, 10.0, 300.0, 200.0));
    let (rect, ov) = router.interactive_rect(&layout).unwrap();
    assert_eq!(rect, ScreenRect::new(10.0, 10.0, 300.0, 200.0));
    assert_eq!(ov, VisualOverrides::NEUTRAL);

    let offscreen = Layout::new(1000.0, 800.0, 1.0).with("skills", ScreenRect::new(10.0, -500.0, 300.0, 200.0));
    assert!(router.interactive_rect(&offscreen).is_none());

    let passive = ViewportRouter::new(vec![ViewportWindow::new("skills", false, VisualMode::Primary)]);
    assert!(passive.interactive_rect(&layout).is_none());
}

#[test]
fn router_caps_window_count() {
    let windows = (0..MAX_WINDOWS + 2)
        .map(|i| ViewportWindow::new(&format!("w{}", i), false, VisualMode::Primary))
        .collect();
    assert_eq!(ViewportRouter::new(windows).windows().len(), MAX_WINDOWS);
}

#[test]
fn visual_modes_parse_from_region_names() {
    assert_eq!(VisualMode::parse("skills"), Some(VisualMode::Primary));
    assert_eq!(VisualMode::parse(" Projects "), Some(VisualMode::Recessed));
    assert_eq!(VisualMode::parse("tilted"), Some(VisualMode::Tilted));
    assert_eq!(VisualMode::parse("sideways"), None);
    assert!(VisualMode::Recessed.overrides().ring_scale < 1.0);
    assert!(VisualMode::Tilted.overrides().backdrop_roll < 0.0);
}

// Tests for the pointer state machine, driven by synthetic events.

use glam::Vec2;
use orbit_core::*;

const REGION: ScreenRect = ScreenRect::new(100.0, 100.0, 600.0, 400.0);

fn setup() -> (InteractionController, ObjectRegistry, Vec<ObjectHandle>) {
    let tools = vec![
        Tool::new("Docker", "Containers", ""),
        Tool::new("Helm", "Kubernetes", "").with_link("https://helm.sh"),
        Tool::new("Git", "VCS", ""),
    ];
    let mut reg = ObjectRegistry::build(&tools, &RegistryConfig::default());
    let handles = reg.iter().map(|o| o.handle).collect();
    let mut ctl = InteractionController::new(InteractionConfig::default());
    ctl.set_region(Some(REGION), &mut reg);
    (ctl, reg, handles)
}

fn inside() -> Vec2 {
    Vec2::new(300.0, 250.0)
}

fn fetches(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|e| matches!(e, Effect::FetchProjects { .. }))
        .count()
}

#[test]
fn hover_enter_and_exit() {
    let (mut ctl, mut reg, hs) = setup();
    ctl.handle(PointerInput::Move(inside()), &mut reg);
    assert_eq!(ctl.hover_point(), Some(inside()));

    let fx = ctl.apply_hit(Some(hs[0]), &mut reg);
    assert_eq!(ctl.phase(), Phase::Hovering(hs[0]));
    assert!(fx.contains(&Effect::SetCursor(Cursor::Pointer)));
    assert!(matches!(fx[0], Effect::ShowDetails { handle, .. } if handle == hs[0]));
    assert!(reg.find(hs[0]).unwrap().hovered);

    let fx = ctl.apply_hit(None, &mut reg);
    assert_eq!(ctl.phase(), Phase::Idle);
    assert!(fx.contains(&Effect::HideDetails));
    assert!(!reg.find(hs[0]).unwrap().hovered);
    assert_eq!(reg.find(hs[0]).unwrap().target_scale, IDLE_SCALE);
}

#[test]
fn switching_hover_resets_previous_first() {
    let (mut ctl, mut reg, hs) = setup();
    ctl.handle(PointerInput::Move(inside()), &mut reg);
    ctl.apply_hit(Some(hs[0]), &mut reg);
    ctl.apply_hit(Some(hs[2]), &mut reg);
    assert_eq!(reg.hovered(), Some(hs[2]));
    assert_eq!(reg.iter().filter(|o| o.hovered).count(), 1);
    assert_eq!(reg.find(hs[0]).unwrap().target_scale, IDLE_SCALE);
}

#[test]
fn same_hit_twice_is_quiet() {
    let (mut ctl, mut reg, hs) = setup();
    ctl.handle(PointerInput::Move(inside()), &mut reg);
    ctl.apply_hit(Some(hs[1]), &mut reg);
    assert!(ctl.apply_hit(Some(hs[1]), &mut reg).is_empty());
}

#[test]
fn moving_outside_region_clears_hover_immediately() {
    let (mut ctl, mut reg, hs) = setup();
    ctl.handle(PointerInput::Move(inside()), &mut reg);
    ctl.apply_hit(Some(hs[0]), &mut reg);

    let fx = ctl.handle(PointerInput::Move(Vec2::new(20.0, 20.0)), &mut reg);
    assert!(fx.contains(&Effect::HideDetails));
    assert_eq!(ctl.phase(), Phase::Idle);
    assert_eq!(reg.hovered(), None);
    assert_eq!(ctl.hover_point(), None);
    // Hit results for a pointer outside the region are ignored.
    ctl.apply_hit(Some(hs[0]), &mut reg);
    assert_eq!(ctl.phase(), Phase::Idle);
}

#[test]
fn leave_resets_to_neutral() {
    let (mut ctl, mut reg, hs) = setup();
    ctl.handle(PointerInput::Move(inside()), &mut reg);
    ctl.apply_hit(Some(hs[0]), &mut reg);
    ctl.handle(PointerInput::Press(inside()), &mut reg);
    ctl.handle(PointerInput::Leave, &mut reg);
    assert_eq!(ctl.state(), &InteractionState::default());
    assert_eq!(reg.hovered(), None);
}

#[test]
fn region_moving_away_drops_hover() {
    let (mut ctl, mut reg, hs) = setup();
    ctl.handle(PointerInput::Move(inside()), &mut reg);
    ctl.apply_hit(Some(hs[0]), &mut reg);
    let fx = ctl.set_region(Some(ScreenRect::new(900.0, 100.0, 200.0, 200.0)), &mut reg);
    assert!(fx.contains(&Effect::HideDetails));
    assert_eq!(ctl.phase(), Phase::Idle);
}

#[test]
fn hovered_click_fetches_projects_by_name() {
    let (mut ctl, mut reg, hs) = setup();
    ctl.handle(PointerInput::Move(inside()), &mut reg);
    ctl.apply_hit(Some(hs[0]), &mut reg);
    let fx = ctl.handle(
        PointerInput::Click {
            at: inside(),
            time_ms: 1000.0,
        },
        &mut reg,
    );
    assert_eq!(
        fx.as_slice(),
        &[Effect::FetchProjects {
            handle: hs[0],
            tool_key: "Docker".to_string()
        }]
    );
}

#[test]
fn two_clicks_inside_debounce_window_fetch_once() {
    let (mut ctl, mut reg, hs) = setup();
    ctl.handle(PointerInput::Move(inside()), &mut reg);
    ctl.apply_hit(Some(hs[0]), &mut reg);
    let mut all = Vec::new();
    for t in [1000.0, 1150.0] {
        all.extend(ctl.handle(
            PointerInput::Click {
                at: inside(),
                time_ms: t,
            },
            &mut reg,
        ));
    }
    assert_eq!(fetches(&all), 1);

    // Once the window has passed a new click goes through.
    let fx = ctl.handle(
        PointerInput::Click {
            at: inside(),
            time_ms: 1300.0,
        },
        &mut reg,
    );
    assert_eq!(fetches(&fx), 1);
}

#[test]
fn debounce_window_is_measured_from_accepted_click() {
    let mut d = ClickDebounce::new(300.0);
    assert!(d.accept(0.0));
    assert!(!d.accept(200.0));
    assert!(!d.accept(299.0));
    assert!(d.accept(300.0));
}

#[test]
fn click_without_hover_or_outside_region_does_nothing() {
    let (mut ctl, mut reg, hs) = setup();
    ctl.handle(PointerInput::Move(inside()), &mut reg);
    let fx = ctl.handle(
        PointerInput::Click {
            at: inside(),
            time_ms: 0.0,
        },
        &mut reg,
    );
    assert!(fx.is_empty());

    ctl.apply_hit(Some(hs[0]), &mut reg);
    let fx = ctl.handle(
        PointerInput::Click {
            at: Vec2::new(5.0, 5.0),
            time_ms: 10.0,
        },
        &mut reg,
    );
    assert!(fx.is_empty());
}

#[test]
fn links_open_directly_when_configured() {
    let (_, mut reg, hs) = setup();
    let mut ctl = InteractionController::new(InteractionConfig {
        open_links_directly: true,
        ..InteractionConfig::default()
    });
    ctl.set_region(Some(REGION), &mut reg);
    ctl.handle(PointerInput::Move(inside()), &mut reg);
    ctl.apply_hit(Some(hs[1]), &mut reg);
    let fx = ctl.handle(
        PointerInput::Click {
            at: inside(),
            time_ms: 0.0,
        },
        &mut reg,
    );
    assert_eq!(fx.as_slice(), &[Effect::OpenLink("https://helm.sh".into())]);

    // Tools without a link still open the projects modal.
    ctl.apply_hit(Some(hs[2]), &mut reg);
    let fx = ctl.handle(
        PointerInput::Click {
            at: inside(),
            time_ms: 1000.0,
        },
        &mut reg,
    );
    assert_eq!(fetches(&fx), 1);
}

#[test]
fn drag_emits_orbit_deltas_and_freezes_hover() {
    let (mut ctl, mut reg, hs) = setup();
    ctl.handle(PointerInput::Move(inside()), &mut reg);
    ctl.apply_hit(Some(hs[0]), &mut reg);

    let fx = ctl.handle(PointerInput::Press(inside()), &mut reg);
    assert_eq!(fx.as_slice(), &[Effect::SetCursor(Cursor::Grabbing)]);
    assert_eq!(ctl.phase(), Phase::Dragging);
    assert_eq!(ctl.hover_point(), None);

    let fx = ctl.handle(PointerInput::Move(inside() + Vec2::new(12.0, -4.0)), &mut reg);
    assert_eq!(fx.as_slice(), &[Effect::Orbit(Vec2::new(12.0, -4.0))]);

    // Hit results during a drag change nothing.
    assert!(ctl.apply_hit(Some(hs[2]), &mut reg).is_empty());
    assert!(ctl.apply_hit(None, &mut reg).is_empty());
    assert_eq!(reg.hovered(), Some(hs[0]));

    // Leaving the region mid-drag keeps orbiting.
    let fx = ctl.handle(PointerInput::Move(Vec2::new(20.0, 20.0)), &mut reg);
    assert!(matches!(fx.as_slice(), [Effect::Orbit(_)]));
    assert_eq!(reg.hovered(), Some(hs[0]));

    ctl.handle(PointerInput::Release(Vec2::new(20.0, 20.0)), &mut reg);
    assert_ne!(ctl.phase(), Phase::Dragging);
}

#[test]
fn release_always_ends_drag() {
    let (mut ctl, mut reg, _) = setup();
    ctl.handle(PointerInput::Press(inside()), &mut reg);
    ctl.handle(PointerInput::Release(Vec2::new(-50.0, -50.0)), &mut reg);
    assert!(!ctl.state().dragging);
    assert_eq!(ctl.state().drag_anchor, None);
}

#[test]
fn press_outside_region_does_not_drag() {
    let (mut ctl, mut reg, _) = setup();
    let fx = ctl.handle(PointerInput::Press(Vec2::new(10.0, 10.0)), &mut reg);
    assert!(fx.is_empty());
    assert_eq!(ctl.phase(), Phase::Idle);
}

#[test]
fn click_ending_a_long_drag_is_swallowed() {
    let (mut ctl, mut reg, hs) = setup();
    ctl.handle(PointerInput::Move(inside()), &mut reg);
    ctl.apply_hit(Some(hs[0]), &mut reg);
    ctl.handle(PointerInput::Press(inside()), &mut reg);
    ctl.handle(PointerInput::Move(inside() + Vec2::new(40.0, 0.0)), &mut reg);
    ctl.handle(PointerInput::Move(inside()), &mut reg);
    ctl.handle(PointerInput::Release(inside()), &mut reg);
    let click = PointerInput::Click {
        at: inside(),
        time_ms: 0.0,
    };
    assert!(ctl.handle(click, &mut reg).is_empty());
    // Only the one click is swallowed.
    let click = PointerInput::Click {
        at: inside(),
        time_ms: 1000.0,
    };
    assert_eq!(fetches(&ctl.handle(click, &mut reg)), 1);
}

#[test]
fn short_press_still_counts_as_click() {
    let (mut ctl, mut reg, hs) = setup();
    ctl.handle(PointerInput::Move(inside()), &mut reg);
    ctl.apply_hit(Some(hs[0]), &mut reg);
    ctl.handle(PointerInput::Press(inside()), &mut reg);
    ctl.handle(PointerInput::Move(inside() + Vec2::new(2.0, 1.0)), &mut reg);
    let fx = ctl.handle(PointerInput::Release(inside()), &mut reg);
    assert_eq!(fx.as_slice(), &[Effect::SetCursor(Cursor::Pointer)]);
    let click = PointerInput::Click {
        at: inside(),
        time_ms: 0.0,
    };
    assert_eq!(fetches(&ctl.handle(click, &mut reg)), 1);
}

#[test]
fn tooltip_flips_near_edges() {
    let vp = Vec2::new(1000.0, 800.0);
    assert_eq!(
        tooltip_position(Vec2::new(100.0, 100.0), vp),
        Vec2::new(100.0 + TOOLTIP_OFFSET_PX, 100.0 + TOOLTIP_OFFSET_PX)
    );
    let flipped = tooltip_position(Vec2::new(950.0, 780.0), vp);
    assert!(flipped.x + TOOLTIP_WIDTH_PX <= 950.0);
    assert!(flipped.y + TOOLTIP_HEIGHT_PX <= 780.0);
}

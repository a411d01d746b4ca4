// Tests for building the object registry and ray picking against it.

use glam::Vec3;
use orbit_core::*;

fn tools(n: usize) -> Vec<Tool> {
    (0..n)
        .map(|i| Tool::new(&format!("Tool{}", i), "Test", ""))
        .collect()
}

fn ring() -> CurveShape {
    CurveShape::Ellipse {
        radius_x: RING_RADIUS_X,
        radius_y: RING_RADIUS_Y,
        tilt: 0.0,
        depth: RING_DEPTH,
    }
}

fn ray_at(target: Vec3) -> Ray {
    let origin = Vec3::new(0.0, 0.0, CAMERA_DISTANCE);
    Ray {
        origin,
        dir: (target - origin).normalize(),
    }
}

#[test]
fn twenty_two_tools_are_evenly_spaced() {
    let reg = ObjectRegistry::build(&tools(22), &RegistryConfig::default());
    assert_eq!(reg.len(), 22);
    let mut seen = Vec::new();
    for (i, o) in reg.iter().enumerate() {
        assert!((o.base_t - i as f32 / 22.0).abs() < 1e-6);
        assert!(!seen.iter().any(|t: &f32| (t - o.base_t).abs() < 1e-6));
        seen.push(o.base_t);
    }
}

#[test]
fn handles_are_unique_and_reverse_lookup_works() {
    let reg = ObjectRegistry::build(&tools(5), &RegistryConfig::default());
    let handles: Vec<_> = reg.iter().map(|o| o.handle).collect();
    for (i, h) in handles.iter().enumerate() {
        assert_eq!(reg.find(*h).unwrap().tool.name, format!("Tool{}", i));
        assert!(!handles[i + 1..].contains(h));
    }
    assert!(reg.find(ObjectHandle(999)).is_none());
    assert_eq!(reg.find_by_name("tool3").unwrap().handle, handles[3]);
}

#[test]
fn seeded_jitter_is_reproducible() {
    let cfg = RegistryConfig {
        speed_jitter: 0.01,
        seed: 42,
        ..RegistryConfig::default()
    };
    let a = ObjectRegistry::build(&tools(6), &cfg);
    let b = ObjectRegistry::build(&tools(6), &cfg);
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.speed, y.speed);
        assert!(x.speed >= ORBIT_SPEED && x.speed < ORBIT_SPEED + 0.01);
    }
}

#[test]
fn advance_keeps_t_wrapped() {
    let mut reg = ObjectRegistry::build(&tools(4), &RegistryConfig::default());
    let curve = ring();
    for elapsed in [0.0, 10.0, 52.6, 1.0e5] {
        reg.advance(&curve, elapsed);
        for o in reg.iter() {
            assert!((0.0..1.0).contains(&o.t));
            assert!((o.position - curve.position(o.t)).length() < 1e-5);
        }
    }
}

#[test]
fn failed_icon_object_is_still_pickable() {
    let list = vec![
        Tool::new("Foo", "Test", ""),
        Tool::new("Bar", "Test", ""),
    ];
    let mut reg = ObjectRegistry::build(&list, &RegistryConfig::default());
    reg.advance(&ring(), 0.0);
    let foo = reg.find_by_name("Foo").unwrap().handle;
    assert!(reg.mark_icon_failed(foo));

    let obj = reg.find(foo).unwrap();
    assert_eq!(obj.icon_state(), IconState::Failed);
    assert_eq!(
        obj.visual(),
        Visual::Fallback {
            color: derive_color("Foo")
        }
    );
    let hit = reg.pick(&ray_at(obj.position), PICK_RADIUS, 1.0).unwrap();
    assert_eq!(hit.handle, foo);
}

#[test]
fn icons_start_loading_and_switch_to_layers() {
    let mut reg = ObjectRegistry::build(&tools(2), &RegistryConfig::default());
    let h = reg.iter().next().unwrap().handle;
    assert_eq!(reg.find(h).unwrap().icon_state(), IconState::Loading);
    assert!(matches!(reg.find(h).unwrap().visual(), Visual::Fallback { .. }));
    reg.mark_icon_ready(h, 3);
    assert_eq!(reg.find(h).unwrap().visual(), Visual::Icon { layer: 3 });
}

#[test]
fn nearest_hit_wins() {
    let mut reg = ObjectRegistry::build(&tools(2), &RegistryConfig::default());
    // Put both objects on the same line of sight, one closer to the camera.
    let mut it = reg.iter_mut();
    let near = it.next().unwrap();
    near.position = Vec3::new(0.0, 0.0, 4.0);
    let near_handle = near.handle;
    let far = it.next().unwrap();
    far.position = Vec3::new(0.0, 0.0, -4.0);
    drop(it);

    let ray = ray_at(Vec3::ZERO);
    let hits = reg.hits(&ray, PICK_RADIUS, 1.0);
    assert_eq!(hits.len(), 2);
    assert!(hits[0].distance < hits[1].distance);
    assert_eq!(reg.pick(&ray, PICK_RADIUS, 1.0).unwrap().handle, near_handle);
}

#[test]
fn at_most_one_object_hovered() {
    let mut reg = ObjectRegistry::build(&tools(3), &RegistryConfig::default());
    let hs: Vec<_> = reg.iter().map(|o| o.handle).collect();
    let idle = IDLE_SCALE;
    let hover = IDLE_SCALE * HOVER_SCALE_FACTOR;
    for h in hs.iter().chain(hs.iter().rev()) {
        reg.set_hovered(Some(*h), idle, hover);
        assert_eq!(reg.iter().filter(|o| o.hovered).count(), 1);
        assert_eq!(reg.hovered(), Some(*h));
        for o in reg.iter() {
            let expected = if o.handle == *h { hover } else { idle };
            assert_eq!(o.target_scale, expected);
        }
    }
    reg.set_hovered(None, idle, hover);
    assert_eq!(reg.hovered(), None);
}

#[test]
fn scale_smoothing_converges() {
    let mut reg = ObjectRegistry::build(&tools(1), &RegistryConfig::default());
    let h = reg.iter().next().unwrap().handle;
    reg.set_hovered(Some(h), IDLE_SCALE, 1.5);
    let mut last = reg.find(h).unwrap().current_scale;
    for _ in 0..120 {
        reg.smooth_scales(1.0 / 60.0, SCALE_SMOOTHING_RATE);
        let now = reg.find(h).unwrap().current_scale;
        assert!(now >= last);
        last = now;
    }
    assert!((last - 1.5).abs() < 1e-3);
}

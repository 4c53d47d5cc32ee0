use std::f32::consts::FRAC_PI_2;

use rasterkit::camera::OrbitCamera;
use rasterkit::colors;
use rasterkit::math::Vec3;
use rasterkit::parser::{parse_str, LoadError};
use rasterkit::render::{rasterizer, render, RenderMode, RenderTarget};
use rasterkit::{Engine, Scene};

const SIZE: u32 = 96;

const CUBE: &str = "\
# unit cube, outward counter-clockwise faces
v -0.5 -0.5 -0.5
v  0.5 -0.5 -0.5
v  0.5  0.5 -0.5
v -0.5  0.5 -0.5
v -0.5 -0.5  0.5
v  0.5 -0.5  0.5
v  0.5  0.5  0.5
v -0.5  0.5  0.5
f 5 6 7 8
f 2 1 4 3
f 6 2 3 7
f 1 5 8 4
f 8 7 3 4
f 1 2 6 5
";

fn scene_with(mesh: &str) -> Scene {
    let mut scene = Scene::new(SIZE, SIZE);
    scene.camera.aspect = 1.0;
    scene.add_model(parse_str("mesh", mesh).unwrap());
    scene.select(None);
    scene
}

fn draw(scene: &mut Scene, mode: RenderMode, background: u32) -> RenderTarget {
    let mut target = RenderTarget::new(SIZE, SIZE);
    render(scene, &mut target, colors::WHITE, background, mode);
    target
}

fn shade(camera: &OrbitCamera, normal: Vec3) -> u32 {
    colors::modulate(colors::WHITE, camera.light.intensity(normal))
}

#[test]
fn cube_from_outside_keeps_only_front_faces() {
    let mut scene = scene_with(CUBE);
    scene.camera.zeta = 1.0;
    scene.camera.phi = 0.8;
    let target = draw(&mut scene, RenderMode::Rasterized, colors::GRAY);

    // Eye is in the +X +Y +Z octant: three faces, two triangles each.
    let camera = &scene.camera;
    let triangles = rasterizer::model_triangles(&scene.models()[0], camera, colors::WHITE);
    assert_eq!(triangles.len(), 6);

    let front = [
        shade(camera, Vec3::UNIT_X),
        shade(camera, Vec3::UNIT_Y),
        shade(camera, Vec3::UNIT_Z),
    ];
    for triangle in &triangles {
        assert!(front.contains(&triangle.color));
    }
    for &pixel in target.pixels() {
        assert!(pixel == colors::GRAY || front.contains(&pixel), "unexpected {pixel:#010x}");
    }
    assert!(target.pixels().iter().any(|&p| p != colors::GRAY));
}

#[test]
fn nearer_triangle_wins_regardless_of_face_order() {
    let vertices = "\
v -1 -1 0.5
v  1 -1 0.5
v  0  1 0.5
v -1 -1 -0.5
v  1 -1 -0.5
v  0  1 0
";
    let near_first = format!("{vertices}f 1 2 3\nf 4 5 6\n");
    let far_first = format!("{vertices}f 4 5 6\nf 1 2 3\n");

    let frames: Vec<RenderTarget> = [near_first, far_first]
        .iter()
        .map(|mesh| {
            let mut scene = scene_with(mesh);
            scene.camera.zeta = FRAC_PI_2;
            scene.camera.phi = FRAC_PI_2;
            draw(&mut scene, RenderMode::Rasterized, colors::GRAY)
        })
        .collect();

    assert_eq!(frames[0].pixels(), frames[1].pixels());

    let camera = OrbitCamera::default();
    let center = (SIZE / 2) as i32;
    assert_eq!(
        frames[0].pixel(center, center),
        Some(shade(&camera, Vec3::UNIT_Z))
    );
}

#[test]
fn out_of_range_index_drops_only_its_primitive() {
    let valid = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
    let with_bad = format!("{valid}f 1 2 9\nf 3 1 0\n");

    for mode in [RenderMode::Wireframe, RenderMode::Rasterized] {
        let expected = draw(&mut scene_with(valid), mode, colors::BLACK);
        let actual = draw(&mut scene_with(&with_bad), mode, colors::BLACK);
        let drawn = expected
            .pixels()
            .iter()
            .filter(|&&p| p != colors::BLACK)
            .count();
        assert!(drawn > 0, "{mode} drew nothing");

        // The surviving edges of the bad faces retrace edges of the valid one.
        assert_eq!(expected.pixels(), actual.pixels());
    }
}

#[test]
fn wireframe_uses_foreground_color_only() {
    let mut scene = scene_with(CUBE);
    let target = draw(&mut scene, RenderMode::Wireframe, colors::BLACK);

    assert!(target.pixels().contains(&colors::WHITE));
    assert!(target
        .pixels()
        .iter()
        .all(|&p| p == colors::WHITE || p == colors::BLACK));
}

#[test]
fn selection_outline_is_drawn_in_highlight_color() {
    let mut scene = scene_with(CUBE);
    assert!(scene.select(Some(0)));
    let target = draw(&mut scene, RenderMode::Rasterized, colors::BLACK);
    assert!(target.pixels().contains(&colors::HIGHLIGHT));
}

#[test]
fn camera_orbit_changes_the_frame() {
    let mut engine = Engine::new(SIZE, SIZE);
    engine.scene_mut().add_model(parse_str("cube", CUBE).unwrap());
    engine.set_render_mode(RenderMode::Rasterized);

    let before = engine.frame().pixels().to_vec();
    engine.orbit(40.0, 10.0);
    let after = engine.frame().pixels().to_vec();
    assert_ne!(before, after);
}

#[test]
fn orbiting_over_the_poles_still_draws() {
    for mode in [RenderMode::Wireframe, RenderMode::Rasterized] {
        for dy in [1.0e6, -1.0e6] {
            let mut engine = Engine::new(SIZE, SIZE);
            engine.scene_mut().add_model(parse_str("cube", CUBE).unwrap());
            engine.scene_mut().select(None);
            engine.set_render_mode(mode);

            engine.orbit(0.0, dy);
            let frame = engine.frame();
            let drawn = frame.pixels().iter().filter(|&&p| p != colors::BLACK).count();
            assert!(drawn > 0, "{mode} dy={dy} drew nothing");

            let v0 = engine.scene().models()[0].transformed_vertices()[0];
            assert!(v0.x.is_finite() && v0.y.is_finite() && v0.z.is_finite());
        }
    }
}

#[test]
fn failed_load_keeps_existing_scene() {
    let dir = std::env::temp_dir();
    let good = dir.join(format!("rasterkit-good-{}.obj", std::process::id()));
    let bad = dir.join(format!("rasterkit-bad-{}.obj", std::process::id()));
    std::fs::write(&good, CUBE).unwrap();
    std::fs::write(&bad, "v 0 0 0\nv 1 nope 0\nf 1 2\n").unwrap();

    let mut engine = Engine::new(SIZE, SIZE);
    let loaded = engine.load_model(&good);
    let failed = engine.load_model(&bad);
    std::fs::remove_file(&good).unwrap();
    std::fs::remove_file(&bad).unwrap();

    assert_eq!(loaded.unwrap(), 0);
    assert!(matches!(failed, Err(LoadError::InvalidVertex { line: 2, .. })));
    assert_eq!(engine.scene().models().len(), 1);
    assert_eq!(engine.scene().selected_index(), Some(0));
}

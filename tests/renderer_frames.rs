use neonveil::{BackgroundRenderer, Palette, Rgba8Premul, SMOOTHING, Viewport};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn renderer(width: u32, height: u32, dpr: f64) -> BackgroundRenderer {
    BackgroundRenderer::new(Viewport::new(width, height, dpr).unwrap(), Palette::cosmetic())
        .unwrap()
}

#[test]
fn idle_frames_stay_opaque_black() {
    init_tracing();
    let mut r = renderer(160, 120, 1.0);
    r.step_frames(5).unwrap();

    let frame = r.frame();
    for y in 0..frame.height() {
        for x in 0..frame.width() {
            assert_eq!(frame.pixel(x, y), Rgba8Premul::BLACK);
        }
    }
}

#[test]
fn first_move_reveals_pattern_and_glow_near_the_pointer() {
    let mut r = renderer(800, 600, 1.0);
    r.pointer_moved(100.0, 100.0);
    r.step_frames(120).unwrap();

    let frame = r.frame();

    // Something is lit near the pointer now.
    let mut lit = 0usize;
    for y in 0..200u32 {
        for x in 0..200u32 {
            let px = frame.pixel(x, y);
            if px.r != 0 || px.g != 0 || px.b != 0 {
                lit += 1;
            }
        }
    }
    assert!(lit > 0);

    // The far corner is outside both the 300px reveal and the glow sprite;
    // it stays the opaque black base.
    assert_eq!(frame.pixel(799, 599), Rgba8Premul::BLACK);
}

#[test]
fn effect_freezes_after_the_pointer_stops_reporting() {
    let mut r = renderer(400, 300, 1.0);
    r.pointer_moved(200.0, 150.0);
    // Converge far enough that further easing is sub-quantization.
    r.step_frames(300).unwrap();
    let frozen = r.frame().clone();

    // No pointer_moved calls model pointer-leave. More frames must not
    // reset, hide, or shift the effect.
    r.step_frames(10).unwrap();
    assert_eq!(*r.frame(), frozen);
}

#[test]
fn eased_position_converges_monotonically_to_the_target() {
    let mut r = renderer(320, 200, 1.0);
    r.pointer_moved(160.0, 100.0);

    let mut prev = f64::INFINITY;
    for _ in 0..100 {
        r.render_frame().unwrap();
        let d = r.pointer().eased().distance(r.pointer().target());
        if prev.is_finite() && prev > 1e-9 {
            assert!(d < prev);
        }
        prev = d;
    }
}

#[test]
fn resize_reallocates_buffers_to_dpr_scaled_dimensions() {
    init_tracing();
    let mut r = renderer(320, 200, 1.0);
    assert_eq!((r.frame().width(), r.frame().height()), (320, 200));

    r.pointer_moved(10.0, 10.0);
    r.resize(Viewport::new(200, 100, 0.5).unwrap()).unwrap();
    assert_eq!((r.frame().width(), r.frame().height()), (100, 50));

    // Pointer state survives the resize.
    assert!(r.pointer().observed());

    // Repeated resizes render fine.
    for (w, h, dpr) in [(64, 48, 1.0), (300, 200, 0.75), (64, 48, 1.0)] {
        r.resize(Viewport::new(w, h, dpr).unwrap()).unwrap();
        r.render_frame().unwrap();
        let v = Viewport::new(w, h, dpr).unwrap();
        assert_eq!(r.frame().width(), v.physical_width());
        assert_eq!(r.frame().height(), v.physical_height());
    }
}

#[test]
fn example_scenario_from_idle_to_tracking() {
    // 1024x768, cosmetic colors, pointer moves to the center.
    let mut r = renderer(1024, 768, 1.0);
    r.render_frame().unwrap();
    assert_eq!(r.frame().pixel(512, 384), Rgba8Premul::BLACK);

    r.pointer_moved(512.0, 384.0);
    let d0 = r.pointer().eased().distance(r.pointer().target());

    r.step_frames(10).unwrap();
    let d10 = r.pointer().eased().distance(r.pointer().target());
    // Ten frames at factor 0.18 close ~86% of the gap.
    let expected = d0 * (1.0 - SMOOTHING).powi(10);
    assert!((d10 - expected).abs() < 1e-6);

    // Enough further frames bring the eased position within a pixel.
    r.step_frames(30).unwrap();
    assert!(r.pointer().eased().distance(r.pointer().target()) < 1.0);

    // Reveal and glow are centered there: the center is lit, and points
    // beyond the 300px reveal radius that the glow cannot reach are black.
    let center = r.frame().pixel(512, 384);
    assert!(center.g > 0 || center.b > 0);
    assert_eq!(r.frame().pixel(1023, 767), Rgba8Premul::BLACK);
}

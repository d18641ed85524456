//! End-to-end simulation scenarios exercising bodies, collision correction,
//! ropes and force fields together over many frames.

use flatphys::prelude::*;

const DT: f32 = 1.0 / 60.0;

fn static_floor(rect: Rect) -> StaticCollider {
    StaticCollider::new(rect)
}

#[test]
fn euler_and_verlet_agree_under_constant_gravity() {
    let mut euler = Body::from_box(Vec2::ZERO, Rect::new(0, 0, 10, 10), 1.0, 0.0);
    let mut verlet = Body::from_box(Vec2::ZERO, Rect::new(0, 0, 10, 10), 1.0, 0.0)
        .with_solver(Solver::Verlet);

    let frames = 300;
    for _ in 0..frames {
        euler.update(DT);
        verlet.update(DT);
    }

    // with zero initial velocity and no direct velocity writes both schemes
    // reduce to the same recurrence, so they track each other tightly
    assert!((euler.position().y - verlet.position().y).abs() < 1.0);

    // and both stay close to the closed-form 1/2 g t^2 fall
    let t = frames as f32 * DT;
    let analytic = 0.5 * flatphys::dynamics::GRAVITY * t * t;
    assert!((euler.position().y - analytic).abs() / analytic < 0.01);
    assert!((verlet.position().y - analytic).abs() / analytic < 0.01);
}

#[test]
fn doubly_anchored_rope_keeps_segment_lengths_under_gravity() {
    let start = Vec2::new(0.0, 0.0);
    let end = Vec2::new(100.0, 0.0);
    let mut rope = Rope::new(start, end, 10).unwrap();
    rope.end_anchor = true;

    for _ in 0..300 {
        rope.update(DT);
    }

    // anchors never drift
    assert!((rope.nodes()[0].center_position() - start).length() < 1e-3);
    assert!((rope.nodes()[10].center_position() - end).length() < 1e-3);

    // gravity sags the chain but relaxation holds every link near its rest
    // length
    let rest = rope.segment_length();
    for pair in rope.nodes().windows(2) {
        let dist = pair[0].center_position().distance(pair[1].center_position());
        assert!(
            (dist - rest).abs() < 1.0,
            "link stretched to {dist}, rest {rest}"
        );
    }
}

#[test]
fn ground_friction_halts_a_sliding_body() {
    let floor = static_floor(Rect::new(-100, 50, 600, 20));
    let mut slider = Body::new(
        Vec2::ZERO,
        Rect::new(0, 0, 20, 50),
        Rect::new(0, 0, 20, 1),
        1.0,
        0.0,
    );
    slider.set_velocity(Vec2::new(200.0, 0.0));

    for _ in 0..240 {
        let peers: [&dyn Collidable; 1] = [&floor];
        slider.update_with(DT, &peers);

        assert!(slider.on_ground());
        // friction decays the slide, it never reverses it
        assert!(slider.velocity().x >= -1e-3);
    }

    assert!(slider.speed() < 1.0);
}

#[test]
fn conveyor_drags_a_grounded_body_sideways() {
    let floor = static_floor(Rect::new(-100, 50, 600, 20));
    let belt = Conveyor::new(Rect::new(-100, 0, 600, 70), ConveyorDirection::Right, 2.0);

    let mut body = Body::new(
        Vec2::ZERO,
        Rect::new(0, 0, 20, 50),
        Rect::new(0, 0, 20, 1),
        1.0,
        0.0,
    );

    for _ in 0..120 {
        let peers: [&dyn Collidable; 1] = [&floor];
        belt.apply(&[&body]);
        body.update_with(DT, &peers);
    }

    // belt force beats ground friction until the two balance out
    assert!(body.velocity().x > 0.0);
    assert!(body.position().x > 0.0);
}

#[test]
fn identical_runs_are_bit_identical() {
    fn run() -> (Vec2, Vec2) {
        let floor = static_floor(Rect::new(-100, 200, 600, 20));
        let mut body = Body::from_box(Vec2::new(50.0, 0.0), Rect::new(0, 0, 20, 20), 2.0, 500.0);
        body.set_velocity(Vec2::new(35.0, -10.0));

        let mut rope = Rope::new(Vec2::new(0.0, 0.0), Vec2::new(60.0, 0.0), 6).unwrap();

        for _ in 0..180 {
            let peers: [&dyn Collidable; 1] = [&floor];
            body.update_with(DT, &peers);
            rope.update(DT);
        }
        (body.position(), rope.nodes()[6].center_position())
    }

    let (body_a, rope_a) = run();
    let (body_b, rope_b) = run();

    assert_eq!(body_a.to_array(), body_b.to_array());
    assert_eq!(rope_a.to_array(), rope_b.to_array());
}

#[test]
fn falling_body_lands_and_stays_on_a_static_floor() {
    let floor = static_floor(Rect::new(0, 300, 400, 20));
    let mut body = Body::from_box(Vec2::new(100.0, 0.0), Rect::new(0, 0, 20, 20), 1.0, 1000.0);

    for _ in 0..300 {
        let peers: [&dyn Collidable; 1] = [&floor];
        body.update_with(DT, &peers);
    }

    assert!(body.on_ground());
    assert_eq!(body.velocity().y, 0.0);
    // resting flush on the surface, snapped to whole pixels
    assert_eq!(body.vertical_bounds().bottom(), 300);
}

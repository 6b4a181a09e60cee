use std::rc::Rc;

use super::*;
use crate::{
    comparator::setup::{Comparator, ComparedChild, Container, Role, setup},
    foundation::core::{DIVIDER_RGBA8, Point, Vec2},
    media::image::ImageElement,
    schedule::Scheduler,
};

fn image_pair() -> Container {
    let child = |role, rgba| ComparedChild {
        element: Rc::new(ImageElement::solid(8, 4, rgba).unwrap()),
        role: Some(role),
        label: None,
        offset: Vec2::ZERO,
    };
    Container {
        children: vec![
            child(Role::Left, [0, 255, 0, 255]),
            child(Role::Right, [0, 0, 255, 255]),
        ],
        label_font: None,
    }
}

fn px(comp: &Comparator, x: u32, y: u32) -> [u8; 4] {
    let bytes = comp.canvas_rgba8();
    let i = 4 * (y * comp.width() + x) as usize;
    [bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]
}

#[test]
fn pointer_moves_update_split_but_defer_the_repaint() {
    let sched = Scheduler::new();
    let comp = setup(&image_pair(), &sched).unwrap();
    sched.run_deferred();
    assert_eq!(px(&comp, 4, 0), DIVIDER_RGBA8.to_array());

    comp.pointer_moved(2.0, 1.0);
    assert_eq!(comp.split(), Point::new(2.0, 1.0));
    // Not yet repainted: the divider is still where the last frame put it.
    assert_eq!(px(&comp, 4, 0), DIVIDER_RGBA8.to_array());

    sched.run_deferred();
    assert_eq!(px(&comp, 2, 0), DIVIDER_RGBA8.to_array());
    assert_ne!(px(&comp, 4, 0), DIVIDER_RGBA8.to_array());
}

#[test]
fn out_of_bounds_moves_are_ignored() {
    let sched = Scheduler::new();
    let comp = setup(&image_pair(), &sched).unwrap();
    sched.run_deferred();

    let center = comp.split();
    comp.pointer_moved(-0.5, 1.0);
    comp.pointer_moved(8.5, 1.0);
    comp.pointer_moved(1.0, -0.5);
    comp.pointer_moved(1.0, 4.5);
    assert_eq!(comp.split(), center);
}

#[test]
fn edge_positions_are_accepted_and_clamped_at_render() {
    let sched = Scheduler::new();
    let comp = setup(&image_pair(), &sched).unwrap();
    sched.run_deferred();

    // The canvas bounds themselves are inside the hit box.
    comp.pointer_moved(8.0, 0.0);
    assert_eq!(comp.split(), Point::new(8.0, 0.0));

    sched.run_deferred();
    assert_eq!(px(&comp, 7, 0), DIVIDER_RGBA8.to_array());
}

use super::*;
use crate::media::element::{MediaElement, ReadyState};
use crate::media::video::VideoElement;

fn playable_video(frames: usize) -> Rc<VideoElement> {
    let video = VideoElement::new(2, 2, 25.0).unwrap();
    for _ in 0..frames {
        video.push_frame(vec![0; 16]).unwrap();
    }
    video.set_ready_state(ReadyState::EnoughData);
    Rc::new(video)
}

#[test]
fn leader_seeks_drag_the_follower() {
    let leader = playable_video(50);
    let follower = playable_video(50);
    wire_seek_sync(
        &(Rc::clone(&leader) as SharedMedia),
        &(Rc::clone(&follower) as SharedMedia),
    );

    leader.set_current_time(1.0);
    assert_eq!(leader.current_time(), 1.0);
    assert_eq!(follower.current_time(), 1.0);

    leader.set_current_time(0.2);
    assert_eq!(follower.current_time(), 0.2);
}

#[test]
fn follower_seeks_do_not_propagate_back() {
    let leader = playable_video(50);
    let follower = playable_video(50);
    wire_seek_sync(
        &(Rc::clone(&leader) as SharedMedia),
        &(Rc::clone(&follower) as SharedMedia),
    );

    follower.set_current_time(1.5);
    assert_eq!(follower.current_time(), 1.5);
    assert_eq!(leader.current_time(), 0.0);
}

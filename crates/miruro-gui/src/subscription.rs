use std::time::Duration;

use iced::Subscription;

use crate::app::Message;
use crate::keyboard;

/// Frame interval of the skeleton pulse.
const SKELETON_FRAME: Duration = Duration::from_millis(60);

/// All app subscriptions. The pulse only runs while some cover is loading.
pub fn subscriptions(covers_loading: bool) -> Subscription<Message> {
    let mut subs = vec![
        keyboard::keyboard_subscription(),
        window_events(),
        pointer_presses(),
    ];
    if covers_loading {
        subs.push(skeleton_tick());
    }
    Subscription::batch(subs)
}

fn window_events() -> Subscription<Message> {
    iced::window::events().map(|(_id, event)| Message::WindowEvent(event))
}

/// Mouse presses no widget consumed, i.e. clicks on blank space.
fn pointer_presses() -> Subscription<Message> {
    iced::event::listen_with(|event, status, _id| match event {
        iced::Event::Mouse(iced::mouse::Event::ButtonPressed(_))
            if status == iced::event::Status::Ignored =>
        {
            Some(Message::PointerPressed)
        }
        _ => None,
    })
}

fn skeleton_tick() -> Subscription<Message> {
    iced::time::every(SKELETON_FRAME).map(|_| Message::SkeletonTick)
}

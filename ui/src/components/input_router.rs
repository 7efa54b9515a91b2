use crate::components::common::Msg;
use tui_realm_stdlib::Phantom;
use tuirealm::{Component, Event, MockComponent, NoUserEvent};

/// Invisible component subscribed to every event.
///
/// Keys and resizes are forwarded untouched; the controller decides what they
/// mean for the live screen.
#[derive(MockComponent, Default)]
pub struct InputRouter {
    component: Phantom,
}

impl Component<Msg, NoUserEvent> for InputRouter {
    fn on(&mut self, ev: Event<NoUserEvent>) -> Option<Msg> {
        match ev {
            Event::Keyboard(key) => Some(Msg::Input(key)),
            Event::WindowResize(width, height) => Some(Msg::Resize(width, height)),
            _ => None,
        }
    }
}

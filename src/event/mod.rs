mod bus;
mod events;

pub use bus::EventBus;
pub use events::CanvasEvent;

pub trait EventHandler {
    fn handle_event(&mut self, event: &CanvasEvent);
}

/// Collects every event it receives; useful for observers that poll.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<CanvasEvent>,
}

impl EventLog {
    pub fn events(&self) -> &[CanvasEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<CanvasEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventHandler for EventLog {
    fn handle_event(&mut self, event: &CanvasEvent) {
        self.events.push(event.clone());
    }
}

impl<H: EventHandler> EventHandler for std::rc::Rc<std::cell::RefCell<H>> {
    fn handle_event(&mut self, event: &CanvasEvent) {
        self.borrow_mut().handle_event(event);
    }
}

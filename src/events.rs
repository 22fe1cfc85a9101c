use crate::grid::Cell;

/// Notifications published by a running session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameEvent {
    /// One in-bounds cell changed state.
    CellChanged { x: i32, y: i32, cell: Cell },
    /// Game speed changed; also published once at session start.
    SpeedChanged(u32),
    /// Fruit was eaten; carries the new score.
    ScoreChanged(u32),
    /// The session ended. Published at most once and always last.
    GameOver,
}

/// Receives session notifications synchronously, in publication order.
pub trait GameObserver {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event);
    }
}

/// Registered-subscriber list owned by one session.
#[derive(Default)]
pub struct Observers {
    subscribers: Vec<Box<dyn GameObserver>>,
}

impl Observers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `observer`; it receives every later event.
    pub fn subscribe<O>(&mut self, observer: O)
    where
        O: GameObserver + 'static,
    {
        self.subscribers.push(Box::new(observer));
    }

    /// Delivers `event` to every subscriber in registration order.
    pub fn publish(&mut self, event: GameEvent) {
        for subscriber in &mut self.subscribers {
            subscriber.on_event(&event);
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{GameEvent, Observers};

    #[test]
    fn subscribers_receive_events_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::new();

        let first = Rc::clone(&log);
        observers.subscribe(move |event: &GameEvent| first.borrow_mut().push((1, *event)));
        let second = Rc::clone(&log);
        observers.subscribe(move |event: &GameEvent| second.borrow_mut().push((2, *event)));

        observers.publish(GameEvent::ScoreChanged(3));

        assert_eq!(
            *log.borrow(),
            vec![
                (1, GameEvent::ScoreChanged(3)),
                (2, GameEvent::ScoreChanged(3))
            ]
        );
    }
}

use crate::alarm::result::AlarmResult;

/// Presentation-layer observer of alarm changes.
///
/// Notification is synchronous. Implementations must not call back into
/// the coordinator that is notifying them.
pub trait AlarmListener {
    /// A fresh evaluation finished; `None` means nothing within range.
    fn on_alarm_result(&mut self, result: Option<&AlarmResult>);

    /// The alarm went from valid to invalid.
    fn on_alarm_clear(&mut self);
}

/// Handle returned by [`ListenerRegistry::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Listener set notified in insertion order.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<(ListenerId, Box<dyn AlarmListener>)>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, listener: Box<dyn AlarmListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> Option<Box<dyn AlarmListener>> {
        let position = self.listeners.iter().position(|(entry, _)| *entry == id)?;
        Some(self.listeners.remove(position).1)
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn broadcast_result(&mut self, result: Option<&AlarmResult>) {
        for (_, listener) in self.listeners.iter_mut() {
            listener.on_alarm_result(result);
        }
    }

    pub fn broadcast_clear(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener.on_alarm_clear();
        }
    }
}

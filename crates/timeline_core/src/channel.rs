use std::fmt;

/// Token returned by [`Channel::subscribe`], needed to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// One-to-many synchronous notification channel.
///
/// Every call to [`Channel::emit`] invokes each registered handler exactly
/// once, in registration order, on the calling thread, before returning.
/// There is no queuing and no async dispatch; ordering across different
/// channels is not coordinated.
pub struct Channel<T> {
    next_id: u64,
    handlers: Vec<(u64, Box<dyn FnMut(&T)>)>,
}

impl<T> Channel<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            handlers: Vec::new(),
        }
    }

    /// Registers a handler and returns its subscription token.
    pub fn subscribe(&mut self, handler: impl FnMut(&T) + 'static) -> Subscription {
        self.next_id += 1;
        let id = self.next_id;
        self.handlers.push((id, Box::new(handler)));
        Subscription(id)
    }

    /// Removes a previously registered handler.
    ///
    /// Returns `false` if the token is unknown or was already removed.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(id, _)| *id != subscription.0);
        self.handlers.len() != before
    }

    /// Delivers `value` to every currently registered handler.
    pub fn emit(&mut self, value: &T) {
        for (_, handler) in &mut self.handlers {
            handler(value);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}

//! Lifecycle of execution channels.
//!
//! A channel goes `Connecting -> Open -> Closed`. Errors are reported as a
//! separate signal and do not move the state; only the transport closing the
//! connection (or a newer channel replacing this one) does.

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(u64);

impl Display for ChannelId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Connecting,
    Open,
    Closed,
}

/// What a transport reports about one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelSignal {
    Opened,
    Frame(String),
    Error(String),
    Closed,
}

/// Holds the single current channel.
#[derive(Debug, Default)]
pub struct ChannelSlot {
    next_id: u64,
    current: Option<(ChannelId, ChannelState)>,
}

impl ChannelSlot {
    /// Starts a new channel in `Connecting`.
    ///
    /// Any previous channel that is not yet closed is forced to `Closed` and
    /// its id is returned so the caller can tear down its transport.
    pub fn begin(&mut self) -> (Option<ChannelId>, ChannelId) {
        let prior = match self.current {
            Some((id, state)) if state != ChannelState::Closed => Some(id),
            _ => None,
        };

        self.next_id += 1;
        let id = ChannelId(self.next_id);
        self.current = Some((id, ChannelState::Connecting));

        (prior, id)
    }

    /// Moves the current channel to `Open`. Returns `false` for stale ids.
    pub fn mark_open(&mut self, id: ChannelId) -> bool {
        match &mut self.current {
            Some((current, state)) if *current == id && *state == ChannelState::Connecting => {
                *state = ChannelState::Open;
                true
            }
            _ => false,
        }
    }

    /// Moves the current channel to `Closed`. Returns `false` for stale ids.
    pub fn mark_closed(&mut self, id: ChannelId) -> bool {
        match &mut self.current {
            Some((current, state)) if *current == id && *state != ChannelState::Closed => {
                *state = ChannelState::Closed;
                true
            }
            _ => false,
        }
    }

    /// Whether signals from `id` may still affect the output.
    #[must_use]
    pub fn is_live(&self, id: ChannelId) -> bool {
        matches!(
            self.current,
            Some((current, state)) if current == id && state != ChannelState::Closed
        )
    }

    #[must_use]
    pub fn current(&self) -> Option<(ChannelId, ChannelState)> {
        self.current
    }

    #[must_use]
    pub fn state_of(&self, id: ChannelId) -> Option<ChannelState> {
        match self.current {
            Some((current, state)) if current == id => Some(state),
            Some(_) => Some(ChannelState::Closed),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_slot() {
        let slot = ChannelSlot::default();
        assert!(slot.current().is_none());
    }

    #[test]
    fn test_lifecycle() {
        let mut slot = ChannelSlot::default();
        let (prior, id) = slot.begin();
        assert!(prior.is_none());
        assert_eq!(slot.state_of(id), Some(ChannelState::Connecting));
        assert!(slot.is_live(id));

        assert!(slot.mark_open(id));
        assert_eq!(slot.state_of(id), Some(ChannelState::Open));
        assert!(!slot.mark_open(id));

        assert!(slot.mark_closed(id));
        assert_eq!(slot.state_of(id), Some(ChannelState::Closed));
        assert!(!slot.is_live(id));
        assert!(!slot.mark_closed(id));
    }

    #[test]
    fn test_begin_closes_connecting_and_open_prior() {
        let mut slot = ChannelSlot::default();
        let (_, first) = slot.begin();

        let (prior, second) = slot.begin();
        assert_eq!(prior, Some(first));
        assert!(!slot.is_live(first));
        assert_eq!(slot.state_of(first), Some(ChannelState::Closed));

        slot.mark_open(second);
        let (prior, third) = slot.begin();
        assert_eq!(prior, Some(second));
        assert!(slot.is_live(third));
        assert!(first < second && second < third);
    }

    #[test]
    fn test_begin_after_close_has_no_prior() {
        let mut slot = ChannelSlot::default();
        let (_, first) = slot.begin();
        slot.mark_closed(first);

        let (prior, _) = slot.begin();
        assert!(prior.is_none());
    }

    #[test]
    fn test_stale_ids_are_rejected() {
        let mut slot = ChannelSlot::default();
        let (_, first) = slot.begin();
        let (_, second) = slot.begin();

        assert!(!slot.mark_open(first));
        assert!(!slot.mark_closed(first));
        assert!(slot.is_live(second));
    }
}

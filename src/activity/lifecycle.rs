//! Activity lifecycle interface.
//!
//! Activities are host-managed units of lifecycle-driven logic. The host
//! framework owns scheduling and ordering of the callbacks; activities
//! get their collaborators (the router in particular) injected at
//! construction rather than inherited from a base class.

use std::sync::Arc;

use crate::message::map::Message;
use crate::routing::router::MessageRouter;

/// The lifecycle callbacks an activity implements.
///
/// Callbacks take no arguments and return nothing; failures inside a
/// callback are logged rather than propagated to the host.
pub trait Activity: Send {
    /// Activity name, used by the host for diagnostics.
    fn name(&self) -> &str;

    /// The activity has been activated.
    fn on_activate(&mut self);

    /// The activity has been deactivated.
    fn on_deactivate(&mut self);
}

/// An example activity that announces its lifecycle transitions on a
/// route output channel.
pub struct AnnouncerActivity {
    /// Router for output messages
    router: Arc<MessageRouter>,
    /// Whether the activity is currently active
    active: bool,
}

impl AnnouncerActivity {
    /// Channel the announcements go out on.
    pub const CHANNEL: &'static str = "output1";

    /// Announcement sent on activation.
    pub const ACTIVATED_MESSAGE: &'static str = "yipee! activated!";

    /// Announcement sent on deactivation.
    pub const DEACTIVATED_MESSAGE: &'static str = "bummer! deactivated!";

    /// Create a new announcer using the given router.
    pub fn new(router: Arc<MessageRouter>) -> Self {
        Self {
            router,
            active: false,
        }
    }

    /// Whether the activity is currently active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Send a one-field announcement, logging delivery failures.
    fn announce(&self, text: &str) {
        let message = Message::new().with_field("message", text);
        if let Err(e) = self.router.send(Self::CHANNEL, &message) {
            tracing::error!(
                activity = self.name(),
                channel = Self::CHANNEL,
                error = %e,
                "could not send announcement"
            );
        }
    }
}

impl Activity for AnnouncerActivity {
    fn name(&self) -> &str {
        "announcer"
    }

    fn on_activate(&mut self) {
        tracing::info!(activity = self.name(), "activity activated");
        self.announce(Self::ACTIVATED_MESSAGE);
        self.active = true;
    }

    fn on_deactivate(&mut self) {
        tracing::info!(activity = self.name(), "activity deactivated");
        self.announce(Self::DEACTIVATED_MESSAGE);
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::destination::InMemoryDestination;

    fn announcer_with_destination() -> (AnnouncerActivity, Arc<InMemoryDestination>) {
        let destination = Arc::new(InMemoryDestination::new("mock"));
        let mut router = MessageRouter::new();
        router
            .register_output_channel(AnnouncerActivity::CHANNEL, vec![destination.clone()])
            .unwrap();
        (AnnouncerActivity::new(Arc::new(router)), destination)
    }

    #[test]
    fn test_activate_announces_once() {
        let (mut activity, destination) = announcer_with_destination();

        activity.on_activate();

        let received = destination.received();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].len(), 1);
        assert_eq!(
            received[0].get_str("message"),
            Some(AnnouncerActivity::ACTIVATED_MESSAGE)
        );
        assert!(activity.is_active());
    }

    #[test]
    fn test_deactivate_announces_once() {
        let (mut activity, destination) = announcer_with_destination();

        activity.on_activate();
        destination.clear();
        activity.on_deactivate();

        let received = destination.received();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].len(), 1);
        assert_eq!(
            received[0].get_str("message"),
            Some(AnnouncerActivity::DEACTIVATED_MESSAGE)
        );
        assert!(!activity.is_active());
    }

    #[test]
    fn test_callbacks_survive_unbound_channel() {
        // Router with no binding for the announcement channel.
        let mut activity = AnnouncerActivity::new(Arc::new(MessageRouter::new()));

        activity.on_activate();
        activity.on_deactivate();

        assert!(!activity.is_active());
    }
}

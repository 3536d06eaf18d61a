// File: ./src/popup.rs
//! Two-state popup holder.
//!
//! An open popup owns exactly one controller together with the subscription
//! that forwards the controller's events to the owner. Closing always
//! unsubscribes before the controller is released.
use crate::events::{EventBus, SubscriptionId};

pub trait PopupController {
    type Event;

    fn events(&mut self) -> &mut EventBus<Self::Event>;
}

#[derive(Debug)]
pub enum Popup<C: PopupController> {
    Closed,
    Open {
        controller: C,
        subscription: SubscriptionId,
    },
}

impl<C: PopupController> Default for Popup<C> {
    fn default() -> Self {
        Popup::Closed
    }
}

impl<C: PopupController> Popup<C> {
    pub fn is_open(&self) -> bool {
        matches!(self, Popup::Open { .. })
    }

    pub fn controller(&self) -> Option<&C> {
        match self {
            Popup::Open { controller, .. } => Some(controller),
            Popup::Closed => None,
        }
    }

    pub fn controller_mut(&mut self) -> Option<&mut C> {
        match self {
            Popup::Open { controller, .. } => Some(controller),
            Popup::Closed => None,
        }
    }

    /// Opens the popup with `controller`, forwarding its events to `forward`.
    ///
    /// Returns `false` and drops `controller` if a popup is already open.
    pub fn open<F>(&mut self, mut controller: C, forward: F) -> bool
    where
        F: FnMut(&C::Event) + 'static,
    {
        if self.is_open() {
            return false;
        }
        let subscription = controller.events().subscribe(forward);
        *self = Popup::Open {
            controller,
            subscription,
        };
        true
    }

    /// Unsubscribes and hands the controller back. `None` if already closed.
    pub fn close(&mut self) -> Option<C> {
        match std::mem::take(self) {
            Popup::Closed => None,
            Popup::Open {
                mut controller,
                subscription,
            } => {
                controller.events().unsubscribe(subscription);
                Some(controller)
            }
        }
    }
}

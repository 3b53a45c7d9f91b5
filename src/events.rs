//! Lifecycle event bus
//!
//! Listener names fall in two disjoint sets. The reserved system events are
//! dispatched by the render orchestrator; every other name belongs to the
//! input surface, which receives those listeners when it is attached and is
//! the only thing that ever fires them.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::instance::Carta;

/// Emitted after `Carta::render`
pub const RENDER_EVENT: &str = "carta-render";
/// Emitted after `Carta::render_ssr`
pub const RENDER_SSR_EVENT: &str = "carta-render-ssr";

/// Reserved event names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemEvent {
    Render,
    RenderSsr,
}

impl SystemEvent {
    pub const ALL: [SystemEvent; 2] = [SystemEvent::Render, SystemEvent::RenderSsr];

    pub fn name(self) -> &'static str {
        match self {
            SystemEvent::Render => RENDER_EVENT,
            SystemEvent::RenderSsr => RENDER_SSR_EVENT,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.name() == name)
    }
}

/// Listener options, mirroring DOM `addEventListener`
///
/// Only `once` affects system dispatch; the rest are for the input surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    pub once: bool,
    pub capture: bool,
    pub passive: bool,
}

impl ListenerOptions {
    pub fn once() -> Self {
        Self {
            once: true,
            ..Self::default()
        }
    }
}

/// Payload handed to a listener
#[derive(Clone, Copy)]
pub enum EventDetail<'a> {
    /// System events carry the emitting instance
    Carta(&'a Carta),
    /// Surface events carry whatever the surface supplies
    Surface(&'a serde_json::Value),
}

#[derive(Clone, Copy)]
pub struct CartaEvent<'a> {
    pub name: &'a str,
    pub detail: EventDetail<'a>,
}

impl<'a> CartaEvent<'a> {
    pub fn system(event: SystemEvent, carta: &'a Carta) -> Self {
        Self {
            name: event.name(),
            detail: EventDetail::Carta(carta),
        }
    }

    pub fn carta(&self) -> Option<&'a Carta> {
        match self.detail {
            EventDetail::Carta(carta) => Some(carta),
            EventDetail::Surface(_) => None,
        }
    }
}

pub type ListenerFn = Arc<dyn Fn(&CartaEvent<'_>) + Send + Sync>;

#[derive(Clone)]
pub struct Listener {
    pub event: String,
    pub handler: ListenerFn,
    pub options: ListenerOptions,
}

impl Listener {
    pub fn new<F>(event: &str, handler: F) -> Self
    where
        F: Fn(&CartaEvent<'_>) + Send + Sync + 'static,
    {
        Self {
            event: event.to_string(),
            handler: Arc::new(handler),
            options: ListenerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ListenerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn is_system(&self) -> bool {
        SystemEvent::from_name(&self.event).is_some()
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("event", &self.event)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Per-instance listener store
#[derive(Debug, Default)]
pub struct EventBus {
    system: Mutex<Vec<Listener>>,
    surface: Mutex<Vec<Listener>>,
}

impl EventBus {
    pub fn new(system: Vec<Listener>, surface: Vec<Listener>) -> Self {
        Self {
            system: Mutex::new(system),
            surface: Mutex::new(surface),
        }
    }

    /// Register a listener in the set its name belongs to
    pub fn on(&self, listener: Listener) {
        let set = if listener.is_system() {
            &self.system
        } else {
            &self.surface
        };
        set.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    /// Invoke the system listeners registered for `event.name`
    ///
    /// Handlers run outside the lock, so a handler may register further
    /// listeners. `once` listeners are dropped before they run. Only the render
    /// orchestrator dispatches.
    pub(crate) fn dispatch(&self, event: &CartaEvent<'_>) {
        let handlers: Vec<ListenerFn> = {
            let mut system = self.system.lock().unwrap_or_else(PoisonError::into_inner);
            let handlers = system
                .iter()
                .filter(|l| l.event == event.name)
                .map(|l| Arc::clone(&l.handler))
                .collect();
            system.retain(|l| !(l.options.once && l.event == event.name));
            handlers
        };

        tracing::trace!("Dispatching '{}' to {} listeners", event.name, handlers.len());
        for handler in handlers {
            handler(event);
        }
    }

    /// Snapshot of the listeners meant for the input surface
    pub fn surface_listeners(&self) -> Vec<Listener> {
        self.surface
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn system_listener_count(&self) -> usize {
        self.system.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use carta::surface::{InputBinding, InputSurface};
use carta::{Carta, CartaOptions, LanguageRegistry};

/// Options with a private language registry, so tests do not share fragments
pub fn isolated_options() -> CartaOptions {
    CartaOptions::new().registry(Arc::new(LanguageRegistry::new()))
}

/// Instance with no extensions over a private registry
pub fn isolated_carta() -> Carta {
    Carta::new(isolated_options())
}

/// Drop `<script>` elements, the way a host sanitizer would
pub fn strip_scripts(html: &str) -> String {
    let re = regex::Regex::new(r"(?s)<script.*?</script>").unwrap();
    re.replace_all(html, "").into_owned()
}

/// Listener handler that counts invocations
pub fn counter() -> (Arc<AtomicUsize>, impl Fn(&carta::events::CartaEvent<'_>) + Send + Sync + 'static) {
    let hits = Arc::new(AtomicUsize::new(0));
    let handle = Arc::clone(&hits);
    (hits, move |_: &carta::events::CartaEvent<'_>| {
        handle.fetch_add(1, Ordering::SeqCst);
    })
}

/// Input surface recording what it was handed
#[derive(Default)]
pub struct RecordingInput {
    pub updates: AtomicUsize,
    pub shortcut_ids: Mutex<Vec<String>>,
    pub listener_events: Mutex<Vec<String>>,
    pub debounce_ms: Mutex<Option<u128>>,
}

impl RecordingInput {
    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

impl InputSurface for RecordingInput {
    fn bind(&self, binding: InputBinding<'_>) {
        *self.shortcut_ids.lock().unwrap() = binding.shortcuts.iter().map(|s| s.id.clone()).collect();
        *self.listener_events.lock().unwrap() =
            binding.listeners.iter().map(|l| l.event.clone()).collect();
        *self.debounce_ms.lock().unwrap() = Some(binding.renderer_debounce.as_millis());
    }

    fn update(&self) {
        self.updates.fetch_add(1, Ordering::SeqCst);
    }
}

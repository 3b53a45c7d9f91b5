//! The configured renderer instance
//!
//! Construction merges the extensions, folds their markup rules into the two
//! pipelines, runs the `on_load` hooks and then starts the highlight-language
//! load on a background thread. Neither render mode waits for that load.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

use crate::config::CartaConfig;
use crate::error::{BoxError, CartaError};
use crate::events::{CartaEvent, EventBus, Listener, ListenerOptions, SystemEvent};
use crate::extension::{ExtensionComponent, ExtensionDescriptor, LoadContext};
use crate::highlight::{
    default_markdown_rules, syntaxes, HighlightRule, Highlighter, LanguageRegistry,
    COMPOSITE_LANGUAGE,
};
use crate::icons::Icon;
use crate::keymap::KeyboardShortcut;
use crate::markdown::{compose_rules, AsyncPipeline, RenderContext, SyncPipeline};
use crate::prefixes::Prefix;
use crate::registry;
use crate::surface::{InputBinding, InputSurface, RendererSurface};

/// Turns raw HTML into safe HTML
pub type Sanitizer = Arc<dyn Fn(&str) -> Result<String, BoxError> + Send + Sync>;

/// Construction options
#[derive(Clone, Default)]
pub struct CartaOptions {
    pub config: CartaConfig,
    pub extensions: Vec<ExtensionDescriptor>,
    /// Identity when absent
    pub sanitizer: Option<Sanitizer>,
    /// Language registry to merge fragments into; the process-wide one when absent
    pub registry: Option<Arc<LanguageRegistry>>,
}

impl CartaOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: CartaConfig) -> Self {
        self.config = config;
        self
    }

    pub fn extension(mut self, extension: ExtensionDescriptor) -> Self {
        self.extensions.push(extension);
        self
    }

    pub fn extensions(mut self, extensions: impl IntoIterator<Item = ExtensionDescriptor>) -> Self {
        self.extensions.extend(extensions);
        self
    }

    pub fn sanitizer<F>(mut self, sanitize: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.sanitizer = Some(Arc::new(move |html: &str| Ok::<_, BoxError>(sanitize(html))));
        self
    }

    /// Sanitizer that can fail; its error aborts the render
    pub fn try_sanitizer<F>(mut self, sanitize: F) -> Self
    where
        F: Fn(&str) -> Result<String, BoxError> + Send + Sync + 'static,
    {
        self.sanitizer = Some(Arc::new(sanitize));
        self
    }

    pub fn registry(mut self, registry: Arc<LanguageRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }
}

impl fmt::Debug for CartaOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartaOptions")
            .field("config", &self.config)
            .field("extensions", &self.extensions)
            .field("sanitizer", &self.sanitizer.is_some())
            .field("registry", &self.registry.is_some())
            .finish()
    }
}

#[derive(Default)]
struct SurfaceState {
    input: Option<Arc<dyn InputSurface>>,
    renderer: Option<Arc<dyn RendererSurface>>,
    highlight_loaded: bool,
}

/// Attached surfaces plus the load flag, under one lock
///
/// Whichever of "input attached" and "highlight loaded" happens second
/// delivers the `update()`, so the signal is never missed or doubled.
#[derive(Default)]
struct Surfaces {
    state: Mutex<SurfaceState>,
}

impl Surfaces {
    fn lock(&self) -> std::sync::MutexGuard<'_, SurfaceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn attach_input(&self, input: Arc<dyn InputSurface>) {
        let loaded = {
            let mut state = self.lock();
            state.input = Some(Arc::clone(&input));
            state.highlight_loaded
        };
        if loaded {
            input.update();
        }
    }

    fn mark_loaded(&self) {
        let input = {
            let mut state = self.lock();
            state.highlight_loaded = true;
            state.input.clone()
        };
        if let Some(input) = input {
            input.update();
        }
    }
}

pub struct Carta {
    config: CartaConfig,
    extensions: Vec<ExtensionDescriptor>,
    shortcuts: Vec<KeyboardShortcut>,
    icons: Vec<Icon>,
    prefixes: Vec<Prefix>,
    highlight_rules: Vec<HighlightRule>,
    components: Vec<ExtensionComponent>,
    events: EventBus,
    async_pipeline: AsyncPipeline,
    sync_pipeline: SyncPipeline,
    sanitizer: Option<Sanitizer>,
    highlighter: Highlighter,
    surfaces: Arc<Surfaces>,
    highlight_state: watch::Receiver<bool>,
}

impl Carta {
    pub fn new(options: CartaOptions) -> Self {
        let CartaOptions {
            config,
            extensions,
            sanitizer,
            registry: language_registry,
        } = options;

        let merged = registry::merge(&extensions, &config);
        let rules = compose_rules(&merged.markup_rules, &config);
        let async_pipeline = AsyncPipeline::new(&rules);
        let sync_pipeline = SyncPipeline::new(&rules);
        let highlighter = Highlighter::new(language_registry.unwrap_or_else(LanguageRegistry::global));
        let (loaded_tx, loaded_rx) = watch::channel(false);

        let carta = Self {
            config,
            extensions,
            shortcuts: merged.shortcuts,
            icons: merged.icons,
            prefixes: merged.prefixes,
            highlight_rules: merged.highlight_rules,
            components: merged.components,
            events: EventBus::new(merged.system_listeners, merged.surface_listeners),
            async_pipeline,
            sync_pipeline,
            sanitizer,
            highlighter,
            surfaces: Arc::new(Surfaces::default()),
            highlight_state: loaded_rx,
        };

        tracing::debug!("Render stages: {:?}", carta.async_pipeline.stage_names());

        for ext in &carta.extensions {
            if let Some(on_load) = &ext.on_load {
                tracing::trace!("Running on_load for extension '{}'", ext.name);
                on_load(LoadContext {
                    carta: &carta,
                    highlight: &carta.highlighter,
                });
            }
        }

        carta.spawn_highlight_load(loaded_tx);
        carta
    }

    /// Warm the syntax set and merge our fragments into the composite language
    fn spawn_highlight_load(&self, loaded: watch::Sender<bool>) {
        let registry = Arc::clone(self.highlighter.registry());
        let fragments = self.highlight_rules.clone();
        let surfaces = Arc::clone(&self.surfaces);

        let spawned = std::thread::Builder::new()
            .name("carta-highlight-load".to_string())
            .spawn(move || {
                syntaxes::load_blocking();
                registry.prepend_fragments(COMPOSITE_LANGUAGE, &fragments, default_markdown_rules);
                surfaces.mark_loaded();
                loaded.send_replace(true);
            });

        // on failure the sender is dropped with the closure and waiters see `false`
        if let Err(e) = spawned {
            tracing::warn!("Failed to start highlight language load: {}", e);
        }
    }

    /// Render with every rule, including async ones
    ///
    /// Empty output is returned as-is: no sanitizer call, no event.
    pub async fn render(&self, markdown: &str) -> Result<String, CartaError> {
        let dirty = self
            .async_pipeline
            .parse(markdown, RenderContext::new(&self.highlighter))
            .await?;
        if dirty.is_empty() {
            return Ok(dirty);
        }

        let html = self.sanitize(dirty)?;
        self.events
            .dispatch(&CartaEvent::system(SystemEvent::Render, self));
        Ok(html)
    }

    /// Render without suspending; async rules pass their input through
    pub fn render_ssr(&self, markdown: &str) -> Result<String, CartaError> {
        let dirty = self.sync_pipeline.parse(markdown)?;
        if dirty.is_empty() {
            return Ok(dirty);
        }

        let html = self.sanitize(dirty)?;
        self.events
            .dispatch(&CartaEvent::system(SystemEvent::RenderSsr, self));
        Ok(html)
    }

    fn sanitize(&self, dirty: String) -> Result<String, CartaError> {
        match &self.sanitizer {
            Some(sanitize) => sanitize(&dirty).map_err(CartaError::Sanitizer),
            None => Ok(dirty),
        }
    }

    /// Register a listener; reserved names go to the system set
    pub fn on<F>(&self, event: &str, handler: F, options: ListenerOptions)
    where
        F: Fn(&CartaEvent<'_>) + Send + Sync + 'static,
    {
        self.events.on(Listener::new(event, handler).with_options(options));
    }

    /// Attach the input surface and hand it the composed tables
    ///
    /// If the highlight load already finished, the surface gets one
    /// `update()` right away.
    pub fn set_input(&self, input: Arc<dyn InputSurface>) {
        let listeners = self.events.surface_listeners();
        input.bind(InputBinding {
            shortcuts: &self.shortcuts,
            prefixes: &self.prefixes,
            listeners: &listeners,
            history: &self.config.history,
            renderer_debounce: self.config.renderer_debounce(),
        });
        self.surfaces.attach_input(input);
    }

    pub fn set_renderer(&self, renderer: Arc<dyn RendererSurface>) {
        self.surfaces.lock().renderer = Some(renderer);
    }

    pub fn input(&self) -> Option<Arc<dyn InputSurface>> {
        self.surfaces.lock().input.clone()
    }

    pub fn renderer(&self) -> Option<Arc<dyn RendererSurface>> {
        self.surfaces.lock().renderer.clone()
    }

    /// Wait for the background highlight load
    ///
    /// Returns `false` only if the load could not be started.
    pub async fn highlight_ready(&self) -> bool {
        let mut state = self.highlight_state.clone();
        let ready = state.wait_for(|loaded| *loaded).await.is_ok();
        ready
    }

    pub fn is_highlight_ready(&self) -> bool {
        *self.highlight_state.borrow()
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    pub fn config(&self) -> &CartaConfig {
        &self.config
    }

    pub fn extensions(&self) -> &[ExtensionDescriptor] {
        &self.extensions
    }

    pub fn shortcuts(&self) -> &[KeyboardShortcut] {
        &self.shortcuts
    }

    pub fn icons(&self) -> &[Icon] {
        &self.icons
    }

    pub fn prefixes(&self) -> &[Prefix] {
        &self.prefixes
    }

    pub fn highlight_rules(&self) -> &[HighlightRule] {
        &self.highlight_rules
    }

    pub fn components(&self) -> &[ExtensionComponent] {
        &self.components
    }

    /// Listener store of this instance
    ///
    /// Listeners can be added through it, but system events are only fired by
    /// `render` and `render_ssr`:
    ///
    /// ```compile_fail
    /// use carta::events::CartaEvent;
    /// use carta::{Carta, CartaOptions};
    ///
    /// let carta = Carta::new(CartaOptions::new());
    /// carta.events().dispatch(&CartaEvent::system(carta::events::SystemEvent::Render, &carta));
    /// ```
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn async_pipeline(&self) -> &AsyncPipeline {
        &self.async_pipeline
    }

    pub fn sync_pipeline(&self) -> &SyncPipeline {
        &self.sync_pipeline
    }
}

impl fmt::Debug for Carta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carta")
            .field("config", &self.config)
            .field("stages", &self.async_pipeline.stage_names())
            .field("shortcuts", &self.shortcuts.len())
            .field("icons", &self.icons.len())
            .field("prefixes", &self.prefixes.len())
            .field("highlight_rules", &self.highlight_rules.len())
            .field("highlight_ready", &self.is_highlight_ready())
            .finish_non_exhaustive()
    }
}

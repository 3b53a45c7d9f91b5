//! Error types for composition and rendering

/// Boxed error returned by extension-supplied rules and sanitizers
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by the rendering core
///
/// Cosmetic stages (highlighting, custom language loading) never produce
/// these; they degrade to unhighlighted output instead.
#[derive(Debug)]
pub enum CartaError {
    /// A markup-transform rule contributed by an extension failed
    Rule { rule: String, source: BoxError },
    /// The configured sanitizer failed
    Sanitizer(BoxError),
    /// Configuration could not be parsed or serialized
    Config(String),
    /// Configuration file could not be read or written
    Io(String),
    /// A shortcut combination string did not parse
    InvalidKey(String),
}

impl std::fmt::Display for CartaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartaError::Rule { rule, source } => write!(f, "Rule '{}' failed: {}", rule, source),
            CartaError::Sanitizer(e) => write!(f, "Sanitizer failed: {}", e),
            CartaError::Config(e) => write!(f, "Config error: {}", e),
            CartaError::Io(e) => write!(f, "IO error: {}", e),
            CartaError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
        }
    }
}

impl std::error::Error for CartaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CartaError::Rule { source, .. } => Some(source.as_ref()),
            CartaError::Sanitizer(source) => Some(source.as_ref()),
            _ => None,
        }
    }
}

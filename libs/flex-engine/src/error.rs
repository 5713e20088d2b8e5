use flex_api::error::FlexError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("config error: {0}")]
    Config(String),

    #[error("conversion error: {0}")]
    Conversion(#[from] FlexError),
}

impl EngineError {
    /// Add context to the error.
    ///
    /// For `Conversion` variant, context is added to the inner `FlexError`.
    /// For `Config`, context is prepended to the message.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            EngineError::Conversion(e) => EngineError::Conversion(e.with_context(ctx)),
            EngineError::Config(msg) => EngineError::Config(format!("{ctx}: {msg}")),
        }
    }
}

use thiserror::Error;

/// Errors surfaced by the board's shape stack and shape factory.
///
/// These are user-facing conditions ("nothing to undo") rather than faults,
/// so callers are expected to report them and carry on.
#[derive(Debug, Error)]
pub enum BrushError {
    /// `rollback` was called with an empty shape stack
    #[error("nothing to undo")]
    EmptyUndoStack,

    /// `forward` was called with an empty redo stack
    #[error("nothing to redo")]
    EmptyRedoStack,

    /// `delete_select_graph` was called while no shape is selected
    #[error("nothing to delete")]
    NoSelection,

    /// The shape factory was handed a mode tag it does not know
    #[error("unsupported shape mode: {0}")]
    UnsupportedShapeMode(String),

    /// An exported shape record is missing a field its mode requires
    #[error("invalid shape record: {0}")]
    InvalidRecord(String),

    #[error("failed to decode background image: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("failed to serialize shapes: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for board operations
pub type BrushResult<T> = Result<T, BrushError>;

/// The pointer gesture state machine of the board.
///
/// # State Transitions
///
/// ```text
///                    ┌─────────────┐
///              ┌─────►   Drawing   ├─────┐
///              │     └─────────────┘     │
///              │     ┌─────────────┐     │
/// ┌──────────┐ │     │             │     │ ┌──────────┐
/// │   Idle   ├─┼─────►  Selecting  ├─────┼─►   Idle   │
/// └──────────┘ │     └─────────────┘     │ └──────────┘
///              │     ┌─────────────┐     │
///              └─────►  Dragging   ├─────┘
///                    └─────────────┘
/// ```
///
/// A pointer-down leaves `Idle` for exactly one gesture state; the matching
/// pointer-up returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorState {
    /// No button held; pointer moves only update the hover cursor
    #[default]
    Idle,
    /// Button held over empty canvas with no tool active
    Selecting,
    /// Button held on a selected shape: moves drag or resize it
    Dragging,
    /// Button held while a new shape follows the pointer
    Drawing,
}

impl EditorState {
    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, new_state: EditorState) -> bool {
        match (self, new_state) {
            (EditorState::Idle, _) => true,
            (_, EditorState::Idle) => true,
            _ => false,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Idle => "idle",
            EditorState::Selecting => "selecting",
            EditorState::Dragging => "dragging",
            EditorState::Drawing => "drawing",
        }
    }
}

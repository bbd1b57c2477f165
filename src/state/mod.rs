mod editor_state;
mod tool_state;

pub use editor_state::EditorState;
pub use tool_state::ToolState;

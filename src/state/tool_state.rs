use crate::config::BoardConfig;
use crate::element::OperationMode;

/// Drawing settings picked in the tool panel
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    /// Shape created by the next drawing gesture; `None` means select-only
    pub operation_mode: Option<OperationMode>,
    pub color: String,
    pub line_width: f64,
    /// Label placed by the text tool
    pub text: String,
}

impl Default for ToolState {
    fn default() -> Self {
        Self::from_config(&BoardConfig::default())
    }
}

impl ToolState {
    pub fn from_config(config: &BoardConfig) -> Self {
        Self {
            operation_mode: None,
            color: config.default_color.clone(),
            line_width: config.default_line_width,
            text: String::new(),
        }
    }

    /// Activate the text tool for one placement of `text`
    pub fn place_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.operation_mode = Some(OperationMode::Text);
    }
}

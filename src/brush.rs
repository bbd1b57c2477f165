use log::{debug, info, trace, warn};

use crate::background::BackgroundImage;
use crate::element::{
    CursorStyle, Element, ElementData, ElementType, ElementUpdate, HitResult, PositionType,
    StyleUpdate,
};
use crate::error::{BrushError, BrushResult};
use crate::surface::Surface;

/// Owns the shapes on the board and sequences every edit to them.
///
/// `operates` holds the shapes in paint order; `restores` holds the shapes
/// taken off by [`CanvasBrush::rollback`], most recent last. A shape lives in
/// exactly one of the two stacks. Each mutation ends with a synchronous
/// [`CanvasBrush::paint`], which clears and redraws the whole surface.
#[derive(Debug)]
pub struct CanvasBrush<S: Surface> {
    operates: Vec<ElementType>,
    restores: Vec<ElementType>,
    surface: Option<S>,
    background_image: Option<BackgroundImage>,
    selected_index: Option<usize>,
    selected_hit: Option<HitResult>,
    cursor: CursorStyle,
}

impl<S: Surface> Default for CanvasBrush<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Surface> CanvasBrush<S> {
    /// Creates an empty board with no surface attached
    pub fn new() -> Self {
        Self {
            operates: Vec::new(),
            restores: Vec::new(),
            surface: None,
            background_image: None,
            selected_index: None,
            selected_hit: None,
            cursor: CursorStyle::Default,
        }
    }

    /// Creates an empty board drawing onto `surface`
    pub fn with_surface(surface: S) -> Self {
        let mut brush = Self::new();
        brush.surface = Some(surface);
        brush
    }

    /// Replace the drawing surface and repaint onto it
    pub fn attach_surface(&mut self, surface: S) {
        self.surface = Some(surface);
        self.paint();
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Cursor the host should currently display
    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: CursorStyle) {
        self.cursor = cursor;
    }

    /// Use `image` as the board background. The surface is resized to the
    /// image's pixel size.
    pub fn set_background_image(&mut self, image: BackgroundImage) {
        info!(
            "Setting background image {} ({}x{})",
            image.id(),
            image.width(),
            image.height()
        );
        if let Some(surface) = self.surface.as_mut() {
            surface.set_size(f64::from(image.width()), f64::from(image.height()));
        }
        self.background_image = Some(image);
        self.paint();
    }

    pub fn background_image(&self) -> Option<&BackgroundImage> {
        self.background_image.as_ref()
    }

    /// Shapes in paint order
    pub fn operates(&self) -> &[ElementType] {
        &self.operates
    }

    /// Undone shapes, next to be restored last
    pub fn restores(&self) -> &[ElementType] {
        &self.restores
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected_hit(&self) -> Option<HitResult> {
        self.selected_hit
    }

    /// The selected shape, if any
    pub fn selected_element(&self) -> Option<&ElementType> {
        self.selected_index.and_then(|index| self.operates.get(index))
    }

    /// Select the topmost shape under `(x, y)`, replacing any previous
    /// selection. Returns whether a shape was hit.
    pub fn get_select_graph(&mut self, x: f64, y: f64) -> bool {
        self.deselect();

        let hit = self
            .operates
            .iter()
            .enumerate()
            .rev()
            .find_map(|(index, element)| element.is_inside(x, y).map(|hit| (index, hit)));

        let found = if let Some((index, hit)) = hit {
            debug!(
                "Selected shape {} at ({}, {}) on {}, cursor {}",
                index,
                x,
                y,
                hit.position_type.as_str(),
                hit.cursor_style.as_str()
            );
            self.operates[index].set_selected(true);
            self.selected_index = Some(index);
            self.selected_hit = Some(hit);
            true
        } else {
            false
        };

        self.paint();
        found
    }

    /// Update the cursor for a pointer hovering at `(x, y)`. Selection is
    /// left untouched.
    pub fn on_pointer_over(&mut self, x: f64, y: f64) -> CursorStyle {
        self.cursor = self
            .operates
            .iter()
            .rev()
            .find_map(|element| element.is_inside(x, y))
            .map_or(CursorStyle::Default, |hit| hit.cursor_style);
        self.cursor
    }

    /// Remove every shape, the undo history and the background image
    pub fn clear(&mut self) {
        info!("Clearing board ({} shapes)", self.operates.len());
        self.operates.clear();
        self.restores.clear();
        self.background_image = None;
        self.selected_index = None;
        self.selected_hit = None;
        self.paint();
    }

    /// Push a freshly created shape. Anything waiting to be redone is dropped.
    pub fn start_draw(&mut self, element: ElementType) {
        if !self.restores.is_empty() {
            debug!("Discarding {} undone shapes", self.restores.len());
            self.restores.clear();
        }
        self.operates.push(element);
        self.paint();
    }

    /// Move the end point of the shape being drawn
    pub fn end_draw(&mut self, end_x: f64, end_y: f64) {
        match self.operates.last_mut() {
            Some(element) => element.update(&ElementUpdate::end(end_x, end_y)),
            None => {
                warn!("end_draw called with no shape on the board");
                return;
            }
        }
        self.paint();
    }

    /// Move or resize the selected shape, depending on where it was grabbed.
    /// Does nothing without a selection.
    pub fn drag(&mut self, offset_x: f64, offset_y: f64) {
        let (Some(index), Some(hit)) = (self.selected_index, self.selected_hit) else {
            return;
        };
        let Some(element) = self.operates.get_mut(index) else {
            return;
        };

        match hit.position_type {
            PositionType::Content => element.translate(offset_x, offset_y),
            position => element.resize(position, offset_x, offset_y),
        }
        self.paint();
    }

    /// Remove the selected shape
    pub fn delete_select_graph(&mut self) -> BrushResult<()> {
        let index = self
            .selected_index
            .filter(|index| *index < self.operates.len())
            .ok_or(BrushError::NoSelection)?;

        let removed = self.operates.remove(index);
        info!("Deleted {} shape {}", removed.operation_mode(), removed.id());
        self.selected_index = None;
        self.selected_hit = None;
        self.restores.clear();
        self.paint();
        Ok(())
    }

    /// Undo: move the newest shape onto the redo stack
    pub fn rollback(&mut self) -> BrushResult<()> {
        let mut element = self.operates.pop().ok_or(BrushError::EmptyUndoStack)?;
        if self.selected_index == Some(self.operates.len()) {
            element.set_selected(false);
            self.selected_index = None;
            self.selected_hit = None;
        }
        debug!("Rolled back {} shape {}", element.operation_mode(), element.id());
        self.restores.push(element);
        self.paint();
        Ok(())
    }

    /// Redo: move the last undone shape back onto the board
    pub fn forward(&mut self) -> BrushResult<()> {
        let element = self.restores.pop().ok_or(BrushError::EmptyRedoStack)?;
        debug!("Restored {} shape {}", element.operation_mode(), element.id());
        self.operates.push(element);
        self.paint();
        Ok(())
    }

    /// Restyle the selected shape. Does nothing without a selection.
    pub fn change_select_graph(&mut self, style: StyleUpdate) {
        let Some(element) = self.selected_index.and_then(|index| self.operates.get_mut(index))
        else {
            return;
        };
        element.update(&ElementUpdate::from(style));
        self.paint();
    }

    /// Redraw the background and every shape in stack order. Without a
    /// surface this does nothing.
    pub fn paint(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        let (width, height) = (surface.width(), surface.height());
        trace!("Painting {} shapes on {}x{}", self.operates.len(), width, height);
        surface.clear_rect(0.0, 0.0, width, height);
        if let Some(image) = &self.background_image {
            surface.draw_image(image, 0.0, 0.0, width, height);
        }
        for element in &mut self.operates {
            element.paint(&mut *surface);
        }
    }

    /// Export the board as plain records, in paint order
    pub fn to_data(&self) -> Vec<ElementData> {
        self.operates.iter().map(Element::to_data).collect()
    }

    /// Export the board as a compact JSON array
    pub fn to_json(&self) -> BrushResult<String> {
        Ok(serde_json::to_string(&self.to_data())?)
    }

    fn deselect(&mut self) {
        if let Some(element) = self
            .selected_index
            .and_then(|index| self.operates.get_mut(index))
        {
            element.set_selected(false);
        }
        self.selected_index = None;
        self.selected_hit = None;
    }
}

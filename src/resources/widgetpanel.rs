//! Clickable rectangle widgets.
//!
//! The [`WidgetPanel`] keeps a flat list of buttons, the last pointer
//! position, and the hover/pressed palette. Every pointer event walks the
//! whole list once; hit-testing is a closed-interval rectangle check.
//!
//! Color transitions per widget:
//! - pointer moved: hover color when over the widget, initial color otherwise
//! - button down: pressed color when over the widget
//! - button up: hover color when over the widget, initial color otherwise
//!
//! A widget that saw the button go down and come back up while hovered is
//! reported as activated by [`WidgetPanel::on_event`].

use image::Rgba;

use crate::events::input::{PointerAction, PointerEvent};
use crate::render::{Canvas, Color, Point, Rect, TextureInfo};
use crate::resources::imagecache::ResourceHandle;

/// Default hover color.
pub const HOVER_COLOR: Color = Rgba([0, 255, 0, 255]);
/// Default pressed color.
pub const PRESSED_COLOR: Color = Rgba([0, 0, 255, 255]);

/// Index of a widget inside its panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub usize);

/// A rectangular button with a label and an optional background texture.
#[derive(Debug, Clone)]
pub struct Widget<T> {
    pub rect: Rect,
    pub label: String,
    pub texture: Option<ResourceHandle<T>>,
    pub color: Color,
    pub initial_color: Color,
    pub show_outline: bool,
    pub clickable: bool,
    pub pressed: bool,
    pub visible: bool,
}

/// Flat list of widgets plus pointer state.
pub struct WidgetPanel<T> {
    widgets: Vec<Widget<T>>,
    pointer: Point,
    hover_color: Color,
    pressed_color: Color,
}

impl<T: TextureInfo> Default for WidgetPanel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TextureInfo> WidgetPanel<T> {
    pub fn new() -> Self {
        Self {
            widgets: Vec::new(),
            pointer: Point::default(),
            hover_color: HOVER_COLOR,
            pressed_color: PRESSED_COLOR,
        }
    }

    /// Append a button. It starts visible, not clickable and without outline.
    #[allow(clippy::too_many_arguments)]
    pub fn create_button(
        &mut self,
        label: impl Into<String>,
        texture: Option<&ResourceHandle<T>>,
        color: Color,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
    ) -> WidgetId {
        self.widgets.push(Widget {
            rect: Rect::new(x, y, w as i32, h as i32),
            label: label.into(),
            texture: texture.cloned(),
            color,
            initial_color: color,
            show_outline: false,
            clickable: false,
            pressed: false,
            visible: true,
        });
        WidgetId(self.widgets.len() - 1)
    }

    /// Whether `point` lies in the widget rectangle, edges included.
    pub fn hit_test(widget: &Widget<T>, point: Point) -> bool {
        widget.rect.contains(point)
    }

    /// Update every visible widget from one pointer event.
    ///
    /// Returns the widgets activated by this event, in list order.
    pub fn on_event(&mut self, event: &PointerEvent) -> Vec<WidgetId> {
        if event.action == PointerAction::Moved {
            self.pointer = event.position;
        }
        let mut activated = Vec::new();
        for (index, widget) in self.widgets.iter_mut().enumerate() {
            if !widget.visible {
                continue;
            }
            match event.action {
                PointerAction::Moved => {
                    widget.clickable = Self::hit_test(widget, self.pointer);
                    if widget.clickable {
                        widget.color = self.hover_color;
                    } else {
                        widget.color = widget.initial_color;
                        widget.pressed = false;
                    }
                }
                PointerAction::Pressed => {
                    if widget.clickable {
                        widget.color = self.pressed_color;
                        widget.pressed = true;
                    }
                }
                PointerAction::Released => {
                    if widget.clickable {
                        widget.color = self.hover_color;
                        if widget.pressed {
                            activated.push(WidgetId(index));
                        }
                    } else {
                        widget.color = widget.initial_color;
                    }
                    widget.pressed = false;
                }
            }
        }
        activated
    }

    /// Draw one widget: background stretched into its rectangle, the label
    /// on top, then the outline in the current color when enabled.
    ///
    /// Scale factors apply to the background only, and only when both are
    /// non-zero.
    pub fn draw(
        &self,
        id: WidgetId,
        label: Option<&ResourceHandle<T>>,
        canvas: &mut dyn Canvas<T>,
        scale_x: f32,
        scale_y: f32,
    ) {
        let Some(widget) = self.widgets.get(id.0) else {
            return;
        };
        let mut dst = widget.rect;
        if scale_x != 0.0 && scale_y != 0.0 {
            dst.w = (dst.w as f32 * scale_x).round() as i32;
            dst.h = (dst.h as f32 * scale_y).round() as i32;
        }
        if let Some(texture) = &widget.texture {
            canvas.copy(texture.texture(), None, dst);
        }
        if let Some(label) = label {
            canvas.copy(label.texture(), None, widget.rect);
        }
        if widget.show_outline {
            canvas.outline(widget.rect, widget.color);
        }
    }

    pub fn widget(&self, id: WidgetId) -> Option<&Widget<T>> {
        self.widgets.get(id.0)
    }

    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut Widget<T>> {
        self.widgets.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (WidgetId, &Widget<T>)> {
        self.widgets
            .iter()
            .enumerate()
            .map(|(i, widget)| (WidgetId(i), widget))
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn pointer_position(&self) -> Point {
        self.pointer
    }

    pub fn set_texture(&mut self, id: WidgetId, texture: &ResourceHandle<T>) {
        if let Some(widget) = self.widgets.get_mut(id.0) {
            widget.texture = Some(texture.clone());
        }
    }

    pub fn show_outline(&mut self, id: WidgetId, show: bool) {
        if let Some(widget) = self.widgets.get_mut(id.0) {
            widget.show_outline = show;
        }
    }

    /// Hidden widgets ignore events and are skipped by the render system.
    ///
    /// Hiding drops any hover/pressed state. Showing a widget picks up the
    /// hover state from the last known pointer position.
    pub fn set_visible(&mut self, id: WidgetId, visible: bool) {
        let pointer = self.pointer;
        let hover = self.hover_color;
        let Some(widget) = self.widgets.get_mut(id.0) else {
            return;
        };
        if widget.visible == visible {
            return;
        }
        widget.visible = visible;
        widget.pressed = false;
        widget.clickable = visible && widget.rect.contains(pointer);
        widget.color = if widget.clickable {
            hover
        } else {
            widget.initial_color
        };
    }

    /// Change the resting color; the current color follows unless hovered.
    pub fn set_initial_color(&mut self, id: WidgetId, color: Color) {
        if let Some(widget) = self.widgets.get_mut(id.0) {
            widget.initial_color = color;
            if !widget.clickable {
                widget.color = color;
            }
        }
    }

    pub fn set_palette(&mut self, hover: Color, pressed: Color) {
        self.hover_color = hover;
        self.pressed_color = pressed;
    }

    pub fn hover_color(&self) -> Color {
        self.hover_color
    }

    pub fn pressed_color(&self) -> Color {
        self.pressed_color
    }
}

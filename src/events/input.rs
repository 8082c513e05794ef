//! Pointer input events.
//!
//! This module defines [`PointerEvent`], triggered by the platform layer for
//! every mouse motion and left button press/release over the window. The
//! widget observer feeds them into the
//! [`WidgetPanel`](crate::resources::widgetpanel::WidgetPanel).

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::events::widget::WidgetActivatedEvent;
use crate::render::{Point, TextureInfo};
use crate::resources::widgetpanel::WidgetPanel;

/// Kind of pointer activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerAction {
    /// The pointer moved to `position`.
    Moved,
    /// The primary button went down.
    Pressed,
    /// The primary button went up.
    Released,
}

/// Event emitted for pointer motion and primary button changes.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// What happened.
    pub action: PointerAction,
    /// Pointer position in window pixels when it happened.
    pub position: Point,
}

impl PointerEvent {
    pub fn moved(x: i32, y: i32) -> Self {
        Self {
            action: PointerAction::Moved,
            position: Point::new(x, y),
        }
    }

    pub fn pressed(x: i32, y: i32) -> Self {
        Self {
            action: PointerAction::Pressed,
            position: Point::new(x, y),
        }
    }

    pub fn released(x: i32, y: i32) -> Self {
        Self {
            action: PointerAction::Released,
            position: Point::new(x, y),
        }
    }
}

/// Observer feeding every [`PointerEvent`] into the widget panel.
///
/// Each widget activated by the event is announced with a
/// [`WidgetActivatedEvent`].
pub fn widget_pointer_observer<T: TextureInfo + 'static>(
    trigger: On<PointerEvent>,
    mut panel: NonSendMut<WidgetPanel<T>>,
    mut commands: Commands,
) {
    for widget in panel.on_event(trigger.event()) {
        commands.trigger(WidgetActivatedEvent { widget });
    }
}

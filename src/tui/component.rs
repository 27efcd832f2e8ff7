use ratatui::Frame;
use ratatui::layout::Rect;

/// A renderable piece of the forum screen.
///
/// Props are struct fields; persistent state is borrowed in via `&mut`
/// fields so the render pass can update caches such as card heights or
/// scroll offsets.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A piece of presentation state that reacts to terminal events.
pub trait EventHandler {
    /// The high-level event this component emits.
    type Event;

    /// Consume a `TuiEvent`, optionally yielding a high-level event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}

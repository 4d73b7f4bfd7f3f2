use crate::drag::PointerEvent;
use crate::host::{Host, ListenerKind};
use crate::view::FloatPanel;
use egui::{Context, Event, LayerId, PointerButton, Pos2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    Press(PointerEvent),
    Move(PointerEvent),
    Release,
    Resize,
    Blur,
}

impl FloatPanel {
    /// Feed this frame's input to the drag controller, before the panel is laid out.
    ///
    /// Each event is dispatched before the next is looked at, since a press or a
    /// release changes which listeners are live.
    pub(crate) fn process_input(&mut self, ctx: &Context) {
        for action in self.frame_actions(ctx) {
            self.dispatch(action);
        }

        let events = ctx.input(|i| i.events.clone());
        for event in &events {
            if let Some(action) = self.event_action(ctx, event) {
                self.dispatch(action);
            }
        }
    }

    fn dispatch(&mut self, action: InputAction) {
        match action {
            InputAction::Press(event) => {
                self.controller.press(event);
            }
            InputAction::Move(event) => self.controller.pointer_move(event),
            InputAction::Release => self.controller.release(),
            InputAction::Resize => self.controller.resize(),
            InputAction::Blur => self.controller.blur(),
        }
    }

    fn frame_actions(&mut self, ctx: &Context) -> Vec<InputAction> {
        let host = self.controller.host().clone();
        let mut actions = vec![];

        // Clamping before the area has a size would use the fallback height and
        // drag a valid restored position up, so wait for the first measurement.
        let screen_rect = ctx.screen_rect();
        let measured = host.panel_size().is_some();
        let screen_changed = self.screen_rect != Some(screen_rect);
        if measured
            && (screen_changed || !self.measured)
            && host.is_listening(ListenerKind::Resize)
        {
            actions.push(InputAction::Resize);
        }
        self.screen_rect = Some(screen_rect);
        self.measured = measured;

        let focused = ctx.input(|i| i.focused);
        if self.focused && !focused {
            actions.push(InputAction::Blur);
        }
        self.focused = focused;

        actions
    }

    fn event_action(&self, ctx: &Context, event: &Event) -> Option<InputAction> {
        let host = self.controller.host();
        match *event {
            Event::PointerButton {
                pos,
                button,
                pressed: true,
                ..
            } if !self.controller.is_active() && self.on_handle(ctx, pos) => {
                Some(InputAction::Press(PointerEvent {
                    pos,
                    primary: button == PointerButton::Primary,
                }))
            }
            Event::PointerButton {
                button: PointerButton::Primary,
                pressed: false,
                ..
            } if host.is_listening(ListenerKind::PointerRelease) => Some(InputAction::Release),
            Event::PointerMoved(pos) if host.is_listening(ListenerKind::PointerMove) => {
                Some(InputAction::Move(PointerEvent::primary(pos)))
            }
            _ => None,
        }
    }

    /// Inside the handle and not covered by another area.
    fn on_handle(&self, ctx: &Context, pos: Pos2) -> bool {
        self.handle_rect.is_some_and(|rect| rect.contains(pos))
            && ctx.layer_id_at(pos) == Some(LayerId::new(self.options.order(), self.id))
    }
}

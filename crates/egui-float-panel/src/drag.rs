use crate::geometry::{Position, DEFAULT_POSITION};
use crate::host::{Host, ListenerKind, SelectionGuard, Subscription};
use crate::store::PositionStore;
use egui::Pos2;
use std::rc::Rc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    /// Pressed on the handle, no movement seen yet.
    Armed,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pos: Pos2,
    /// Only the primary pointer can start a drag.
    pub primary: bool,
}

impl PointerEvent {
    pub fn primary(pos: Pos2) -> Self {
        Self { pos, primary: true }
    }

    pub fn secondary(pos: Pos2) -> Self {
        Self {
            pos,
            primary: false,
        }
    }
}

/// One press-to-release cycle. Dropping it unsubscribes the global listeners
/// and gives text selection back.
struct DragSession<H: Host> {
    start: Pos2,
    origin: Position,
    moved: bool,
    _move: Subscription<H>,
    _release: Subscription<H>,
    _selection: SelectionGuard<H>,
}

pub struct DragController<H: Host> {
    host: Rc<H>,
    store: PositionStore,
    session: Option<DragSession<H>>,
    resize: Option<Subscription<H>>,
}

impl<H: Host> DragController<H> {
    /// Create an idle controller and start observing viewport resizes.
    pub fn new(host: Rc<H>, store: PositionStore) -> Self {
        let resize = Subscription::new(&host, ListenerKind::Resize);
        Self {
            host,
            store,
            session: None,
            resize: Some(resize),
        }
    }

    pub fn host(&self) -> &Rc<H> {
        &self.host
    }

    pub fn position(&self) -> Position {
        self.store.position()
    }

    pub fn state(&self) -> DragState {
        match &self.session {
            None => DragState::Idle,
            Some(session) if session.moved => DragState::Dragging,
            Some(_) => DragState::Armed,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Pointer and panel position captured when the current session began.
    pub fn session_origin(&self) -> Option<(Pos2, Position)> {
        self.session
            .as_ref()
            .map(|session| (session.start, session.origin))
    }

    /// Start a session. Returns `false` if the event was ignored, which happens
    /// for non-primary pointers and while another session is open.
    pub fn press(&mut self, event: PointerEvent) -> bool {
        if !event.primary || self.session.is_some() {
            return false;
        }

        let origin = self.store.position();
        self.session = Some(DragSession {
            start: event.pos,
            origin,
            moved: false,
            _selection: SelectionGuard::acquire(&self.host),
            _move: Subscription::new(&self.host, ListenerKind::PointerMove),
            _release: Subscription::new(&self.host, ListenerKind::PointerRelease),
        });
        debug!("drag armed at {:?}, origin {origin:?}", event.pos);
        true
    }

    pub fn pointer_move(&mut self, event: PointerEvent) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.moved = true;

        let delta = event.pos - session.start;
        let candidate = Position::new(session.origin.x + delta.x, session.origin.y + delta.y);
        self.store.set(
            candidate,
            self.host.viewport_size(),
            self.host.panel_size(),
        );
    }

    /// End the session and persist where the panel ended up.
    pub fn release(&mut self) {
        if self.session.take().is_none() {
            return;
        }
        debug!("drag released at {:?}", self.store.position());
        self.store.persist();
    }

    /// The window lost focus. A release may never arrive, so finish the drag here.
    pub fn blur(&mut self) {
        if self.session.is_some() {
            debug!("window lost focus during drag");
            self.release();
        }
    }

    /// Re-clamp the current position against fresh measurements. Leaves any
    /// session's origin untouched.
    pub fn resize(&mut self) {
        let current = self.store.position();
        self.store.set(
            current,
            self.host.viewport_size(),
            self.host.panel_size(),
        );
    }

    /// Abandon any session and move back to the default position.
    pub fn reset(&mut self) {
        self.session = None;
        self.store.set(
            DEFAULT_POSITION,
            self.host.viewport_size(),
            self.host.panel_size(),
        );
        self.store.persist();
    }

    /// Revoke every listener this controller holds and restore text selection.
    /// Nothing is persisted.
    pub fn teardown(&mut self) {
        if self.session.take().is_some() {
            debug!("drag session dropped by teardown");
        }
        self.resize = None;
    }
}

impl<H: Host> Drop for DragController<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

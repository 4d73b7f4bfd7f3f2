use egui::{Context, Id, Vec2};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerMove,
    PointerRelease,
    Resize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// The window system a panel lives in.
///
/// All methods take `&self`; hosts are shared between a controller and the
/// guards it hands out, on a single UI thread.
pub trait Host {
    /// Current size of the visible drawing area.
    fn viewport_size(&self) -> Vec2;

    /// Measured size of the panel, `None` until it has been laid out.
    fn panel_size(&self) -> Option<Vec2>;

    fn text_selection(&self) -> bool;

    fn set_text_selection(&self, enabled: bool);

    /// Disable text selection for one more holder.
    fn hold_text_selection(&self);

    /// Drop one holder; the last one restores the setting seen by the first.
    fn release_text_selection(&self);

    fn listen(&self, kind: ListenerKind) -> ListenerId;

    fn unlisten(&self, id: ListenerId);

    fn is_listening(&self, kind: ListenerKind) -> bool;
}

/// Reference count of text-selection holders sharing one setting.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionHold {
    count: usize,
    previous: bool,
}

impl SelectionHold {
    /// Returns `true` for the first holder, which must disable selection.
    pub fn acquire(&mut self, current: bool) -> bool {
        if self.count == 0 {
            self.previous = current;
        }
        self.count += 1;
        self.count == 1
    }

    /// Returns the setting to restore once the last holder is gone.
    pub fn release(&mut self) -> Option<bool> {
        match self.count {
            0 => None,
            1 => {
                self.count = 0;
                Some(self.previous)
            }
            _ => {
                self.count -= 1;
                None
            }
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

/// Bookkeeping for global listeners, shared by the host implementations.
#[derive(Debug, Default)]
pub struct Listeners {
    next_id: Cell<u64>,
    active: RefCell<Vec<(ListenerId, ListenerKind)>>,
}

impl Listeners {
    pub fn add(&self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.active.borrow_mut().push((id, kind));
        id
    }

    pub fn remove(&self, id: ListenerId) -> bool {
        let mut active = self.active.borrow_mut();
        let before = active.len();
        active.retain(|(active_id, _)| *active_id != id);
        active.len() != before
    }

    pub fn count(&self, kind: ListenerKind) -> usize {
        self.active
            .borrow()
            .iter()
            .filter(|(_, active_kind)| *active_kind == kind)
            .count()
    }

    pub fn contains(&self, kind: ListenerKind) -> bool {
        self.count(kind) > 0
    }

    pub fn is_empty(&self) -> bool {
        self.active.borrow().is_empty()
    }
}

/// A registered listener, removed from the host when dropped.
pub struct Subscription<H: Host> {
    host: Rc<H>,
    id: ListenerId,
}

impl<H: Host> Subscription<H> {
    pub fn new(host: &Rc<H>, kind: ListenerKind) -> Self {
        Self {
            id: host.listen(kind),
            host: host.clone(),
        }
    }
}

impl<H: Host> Drop for Subscription<H> {
    fn drop(&mut self) {
        self.host.unlisten(self.id);
    }
}

/// Keeps text selection disabled while alive. Guards may be dropped in any
/// order; selection comes back when the last one goes.
pub struct SelectionGuard<H: Host> {
    host: Rc<H>,
}

impl<H: Host> SelectionGuard<H> {
    pub fn acquire(host: &Rc<H>) -> Self {
        host.hold_text_selection();
        Self { host: host.clone() }
    }
}

impl<H: Host> Drop for SelectionGuard<H> {
    fn drop(&mut self) {
        self.host.release_text_selection();
    }
}

/// A host without a window, driven by hand. Used for tests and for embedding
/// the controller in non-egui event loops.
#[derive(Debug)]
pub struct HeadlessHost {
    viewport: Cell<Vec2>,
    panel: Cell<Option<Vec2>>,
    text_selection: Cell<bool>,
    selection_hold: Cell<SelectionHold>,
    listeners: Listeners,
}

impl HeadlessHost {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport: Cell::new(viewport),
            panel: Cell::new(None),
            text_selection: Cell::new(true),
            selection_hold: Cell::new(SelectionHold::default()),
            listeners: Listeners::default(),
        }
    }

    #[inline]
    pub fn with_panel_size(self, size: Vec2) -> Self {
        self.panel.set(Some(size));
        self
    }

    pub fn set_viewport_size(&self, size: Vec2) {
        self.viewport.set(size);
    }

    pub fn set_panel_size(&self, size: Option<Vec2>) {
        self.panel.set(size);
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }
}

impl Host for HeadlessHost {
    fn viewport_size(&self) -> Vec2 {
        self.viewport.get()
    }

    fn panel_size(&self) -> Option<Vec2> {
        self.panel.get()
    }

    fn text_selection(&self) -> bool {
        self.text_selection.get()
    }

    fn set_text_selection(&self, enabled: bool) {
        self.text_selection.set(enabled);
    }

    fn hold_text_selection(&self) {
        let mut hold = self.selection_hold.get();
        if hold.acquire(self.text_selection()) {
            self.set_text_selection(false);
        }
        self.selection_hold.set(hold);
    }

    fn release_text_selection(&self) {
        let mut hold = self.selection_hold.get();
        let restore = hold.release();
        self.selection_hold.set(hold);
        if let Some(enabled) = restore {
            self.set_text_selection(enabled);
        }
    }

    fn listen(&self, kind: ListenerKind) -> ListenerId {
        self.listeners.add(kind)
    }

    fn unlisten(&self, id: ListenerId) {
        self.listeners.remove(id);
    }

    fn is_listening(&self, kind: ListenerKind) -> bool {
        self.listeners.contains(kind)
    }
}

/// [`Host`] backed by an egui [`Context`] and the [`egui::Area`] showing the panel.
///
/// Every panel has its own host, but the text selection setting belongs to the
/// context, so the hold count lives in the context's temp data.
pub struct EguiHost {
    ctx: Context,
    area_id: Id,
    listeners: Listeners,
}

impl EguiHost {
    pub fn new(ctx: Context, area_id: Id) -> Self {
        Self {
            ctx,
            area_id,
            listeners: Listeners::default(),
        }
    }

    fn selection_hold_id() -> Id {
        Id::new("egui_float_panel::selection_hold")
    }

    fn update_hold<R>(&self, f: impl FnOnce(&mut SelectionHold) -> R) -> R {
        self.ctx.data_mut(|d| {
            f(d.get_temp_mut_or_default::<SelectionHold>(Self::selection_hold_id()))
        })
    }
}

impl Host for EguiHost {
    fn viewport_size(&self) -> Vec2 {
        self.ctx.screen_rect().size()
    }

    fn panel_size(&self) -> Option<Vec2> {
        self.ctx
            .memory(|mem| mem.area_rect(self.area_id))
            .map(|rect| rect.size())
    }

    fn text_selection(&self) -> bool {
        self.ctx.style().interaction.selectable_labels
    }

    fn set_text_selection(&self, enabled: bool) {
        self.ctx
            .all_styles_mut(|style| style.interaction.selectable_labels = enabled);
    }

    fn hold_text_selection(&self) {
        let current = self.text_selection();
        if self.update_hold(|hold| hold.acquire(current)) {
            self.set_text_selection(false);
        }
    }

    fn release_text_selection(&self) {
        if let Some(enabled) = self.update_hold(|hold| hold.release()) {
            self.set_text_selection(enabled);
        }
    }

    fn listen(&self, kind: ListenerKind) -> ListenerId {
        self.listeners.add(kind)
    }

    fn unlisten(&self, id: ListenerId) {
        self.listeners.remove(id);
    }

    fn is_listening(&self, kind: ListenerKind) -> bool {
        self.listeners.contains(kind)
    }
}

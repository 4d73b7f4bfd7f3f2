use crate::drag::{DragController, DragState};
use crate::geometry::{Position, FALLBACK_PANEL_SIZE};
use crate::host::EguiHost;
use crate::store::{KeyValueStore, PositionStore};
use egui::{
    Align2, Area, Context, CornerRadius, CursorIcon, FontId, Frame, Id, InnerResponse, Order,
    Rect, Sense, Ui, Vec2,
};
use std::hash::Hash;
use std::rc::Rc;

const HANDLE_HEIGHT: f32 = 24.0;
const HANDLE_TEXT_INSET: f32 = 6.0;

#[derive(Debug, Clone)]
pub struct FloatPanelOptions {
    pub title: Option<String>,
    /// Enables persistence under `float-panel:<key>`.
    pub persist_key: Option<String>,
    pub z_index: i32,
    pub width: f32,
}

impl Default for FloatPanelOptions {
    fn default() -> Self {
        Self {
            title: None,
            persist_key: None,
            z_index: 1000,
            width: FALLBACK_PANEL_SIZE.x,
        }
    }
}

impl FloatPanelOptions {
    #[inline]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[inline]
    pub fn persist_key(mut self, key: impl Into<String>) -> Self {
        self.persist_key = Some(key.into());
        self
    }

    #[inline]
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    #[inline]
    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// egui stacks areas by layer rather than by number.
    pub fn order(&self) -> Order {
        match self.z_index {
            i32::MIN..=-1 => Order::Background,
            0..=999 => Order::Middle,
            1000..=9999 => Order::Foreground,
            _ => Order::Tooltip,
        }
    }
}

/// A floating, draggable panel. Keep it alive across frames and call
/// [`FloatPanel::show`] once per frame.
pub struct FloatPanel {
    pub(crate) id: Id,
    pub(crate) options: FloatPanelOptions,
    pub(crate) controller: DragController<EguiHost>,
    pub(crate) handle_rect: Option<Rect>,
    pub(crate) screen_rect: Option<Rect>,
    pub(crate) measured: bool,
    pub(crate) focused: bool,
}

impl FloatPanel {
    pub fn new(
        ctx: &Context,
        id_salt: impl Hash,
        options: FloatPanelOptions,
        storage: Option<Rc<dyn KeyValueStore>>,
    ) -> Self {
        let id = Id::new(id_salt);
        let store = PositionStore::initialize(options.persist_key.clone(), storage);
        let host = Rc::new(EguiHost::new(ctx.clone(), id));

        Self {
            id,
            options,
            controller: DragController::new(host, store),
            handle_rect: None,
            screen_rect: None,
            measured: false,
            focused: true,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn options(&self) -> &FloatPanelOptions {
        &self.options
    }

    pub fn position(&self) -> Position {
        self.controller.position()
    }

    pub fn drag_state(&self) -> DragState {
        self.controller.state()
    }

    /// Handle area as laid out in the last frame.
    pub fn handle_rect(&self) -> Option<Rect> {
        self.handle_rect
    }

    pub fn reset(&mut self) {
        self.controller.reset();
    }

    pub fn show<R>(
        &mut self,
        ctx: &Context,
        add_contents: impl FnOnce(&mut Ui) -> R,
    ) -> InnerResponse<R> {
        self.process_input(ctx);

        let dragging = self.controller.is_active();
        let title = self.options.title.clone().unwrap_or_default();
        let width = self.options.width;
        let handle_rect = &mut self.handle_rect;

        Area::new(self.id)
            .order(self.options.order())
            .fixed_pos(self.controller.position())
            .constrain(false)
            .movable(false)
            .show(ctx, |ui| {
                Frame::window(ui.style())
                    .show(ui, |ui| {
                        ui.set_width(width);
                        *handle_rect = Some(handle_ui(ui, &title, dragging));
                        ui.separator();
                        add_contents(ui)
                    })
                    .inner
            })
    }
}

fn handle_ui(ui: &mut Ui, title: &str, dragging: bool) -> Rect {
    let (rect, response) = ui.allocate_exact_size(
        Vec2::new(ui.available_width(), HANDLE_HEIGHT),
        Sense::click_and_drag(),
    );

    let painter = ui.painter();
    painter.rect_filled(rect, CornerRadius::same(4), ui.visuals().faint_bg_color);
    painter.text(
        rect.left_center() + Vec2::new(HANDLE_TEXT_INSET, 0.0),
        Align2::LEFT_CENTER,
        title,
        FontId::proportional(14.0),
        ui.visuals().strong_text_color(),
    );

    if dragging {
        ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
    } else if response.hovered() {
        ui.ctx().set_cursor_icon(CursorIcon::Grab);
    }

    rect
}

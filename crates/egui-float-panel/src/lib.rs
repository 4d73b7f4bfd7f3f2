mod drag;
mod errors;
mod geometry;
mod host;
mod input;
mod store;
mod view;

pub use drag::{DragController, DragState, PointerEvent};
pub use errors::PanelError;
pub use geometry::{clamp, Position, DEFAULT_POSITION, FALLBACK_PANEL_SIZE};
pub use host::{
    EguiHost, HeadlessHost, Host, ListenerId, ListenerKind, Listeners, SelectionGuard,
    SelectionHold, Subscription,
};
pub use store::{storage_key, KeyValueStore, MemoryStore, PositionStore, STORAGE_PREFIX};
pub use view::{FloatPanel, FloatPanelOptions};

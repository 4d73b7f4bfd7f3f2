use egui::{
    pos2, vec2, Context, Event, Id, Modifiers, PointerButton, Pos2, RawInput, Rect, Vec2,
};
use egui_float_panel::{
    DragState, EguiHost, FloatPanel, FloatPanelOptions, Host, KeyValueStore, MemoryStore,
    Position, SelectionGuard,
};
use std::rc::Rc;

fn raw_input(screen: Vec2, focused: bool, events: Vec<Event>) -> RawInput {
    RawInput {
        screen_rect: Some(Rect::from_min_size(Pos2::ZERO, screen)),
        focused,
        events,
        ..Default::default()
    }
}

fn frame(ctx: &Context, panel: &mut FloatPanel, screen: Vec2, focused: bool, events: Vec<Event>) {
    let _ = ctx.run(raw_input(screen, focused, events), |ctx| {
        panel.show(ctx, |ui| {
            ui.label("content");
        });
    });
}

fn frame_both(
    ctx: &Context,
    lower: &mut FloatPanel,
    upper: &mut FloatPanel,
    events: Vec<Event>,
) {
    let _ = ctx.run(raw_input(SCREEN, true, events), |ctx| {
        lower.show(ctx, |ui| {
            ui.label("lower");
        });
        upper.show(ctx, |ui| {
            ui.label("upper");
        });
    });
}

/// New areas spend their first frame sizing themselves and are not hit-testable yet.
fn warm_up(ctx: &Context, panel: &mut FloatPanel) {
    frame(ctx, panel, SCREEN, true, vec![]);
    frame(ctx, panel, SCREEN, true, vec![]);
}

fn button(pos: Pos2, button: PointerButton, pressed: bool) -> Event {
    Event::PointerButton {
        pos,
        button,
        pressed,
        modifiers: Modifiers::NONE,
    }
}

fn panel(
    ctx: &Context,
    options: FloatPanelOptions,
    storage: Option<Rc<dyn KeyValueStore>>,
) -> FloatPanel {
    FloatPanel::new(ctx, "float-panel-test", options, storage)
}

const SCREEN: Vec2 = Vec2::new(800.0, 600.0);

#[test]
fn dragging_the_handle_moves_the_panel() {
    let ctx = Context::default();
    let mut panel = panel(&ctx, FloatPanelOptions::default().title("Tools"), None);

    warm_up(&ctx, &mut panel);
    assert_eq!(panel.position(), Position::new(24.0, 24.0));
    let grab = panel.handle_rect().expect("handle laid out").center();

    frame(
        &ctx,
        &mut panel,
        SCREEN,
        true,
        vec![
            Event::PointerMoved(grab),
            button(grab, PointerButton::Primary, true),
        ],
    );
    assert_eq!(panel.drag_state(), DragState::Armed);
    assert!(!ctx.style().interaction.selectable_labels);

    let target = grab + vec2(50.0, 30.0);
    frame(&ctx, &mut panel, SCREEN, true, vec![Event::PointerMoved(target)]);
    assert_eq!(panel.drag_state(), DragState::Dragging);
    assert_eq!(panel.position(), Position::new(74.0, 54.0));

    frame(
        &ctx,
        &mut panel,
        SCREEN,
        true,
        vec![button(target, PointerButton::Primary, false)],
    );
    assert_eq!(panel.drag_state(), DragState::Idle);
    assert!(ctx.style().interaction.selectable_labels);
}

#[test]
fn press_outside_the_handle_does_nothing() {
    let ctx = Context::default();
    let mut panel = panel(&ctx, FloatPanelOptions::default(), None);
    warm_up(&ctx, &mut panel);

    let outside = pos2(700.0, 500.0);
    frame(
        &ctx,
        &mut panel,
        SCREEN,
        true,
        vec![button(outside, PointerButton::Primary, true)],
    );
    frame(
        &ctx,
        &mut panel,
        SCREEN,
        true,
        vec![Event::PointerMoved(pos2(750.0, 550.0))],
    );
    assert_eq!(panel.drag_state(), DragState::Idle);
    assert_eq!(panel.position(), Position::new(24.0, 24.0));
}

#[test]
fn secondary_button_does_not_drag() {
    let ctx = Context::default();
    let mut panel = panel(&ctx, FloatPanelOptions::default(), None);
    warm_up(&ctx, &mut panel);
    let grab = panel.handle_rect().expect("handle laid out").center();

    frame(
        &ctx,
        &mut panel,
        SCREEN,
        true,
        vec![button(grab, PointerButton::Secondary, true)],
    );
    assert_eq!(panel.drag_state(), DragState::Idle);
}

#[test]
fn losing_focus_ends_the_drag_and_persists() {
    let ctx = Context::default();
    let storage = Rc::new(MemoryStore::new());
    let mut panel = panel(
        &ctx,
        FloatPanelOptions::default().persist_key("blur"),
        Some(storage.clone()),
    );
    warm_up(&ctx, &mut panel);
    let grab = panel.handle_rect().expect("handle laid out").center();

    frame(
        &ctx,
        &mut panel,
        SCREEN,
        true,
        vec![button(grab, PointerButton::Primary, true)],
    );
    frame(
        &ctx,
        &mut panel,
        SCREEN,
        true,
        vec![Event::PointerMoved(grab + vec2(10.0, 10.0))],
    );
    frame(&ctx, &mut panel, SCREEN, false, vec![]);

    assert_eq!(panel.drag_state(), DragState::Idle);
    assert!(ctx.style().interaction.selectable_labels);
    assert_eq!(
        storage.get("float-panel:blur").unwrap().as_deref(),
        Some(r#"{"x":34.0,"y":34.0}"#)
    );
}

#[test]
fn shrinking_the_window_pulls_the_panel_back_in() {
    let ctx = Context::default();
    let storage = Rc::new(MemoryStore::new());
    storage
        .set("float-panel:resize", r#"{"x":2000.0,"y":54.0}"#)
        .unwrap();
    let mut panel = panel(
        &ctx,
        FloatPanelOptions::default().persist_key("resize"),
        Some(storage),
    );
    assert_eq!(panel.position(), Position::new(2000.0, 54.0));

    frame(&ctx, &mut panel, SCREEN, true, vec![]);
    frame(&ctx, &mut panel, vec2(700.0, 600.0), true, vec![]);

    let area = ctx
        .memory(|mem| mem.area_rect(panel.id()))
        .expect("panel area remembered");
    assert!(panel.position().x > 0.0);
    assert!(panel.position().x + area.width() <= 700.0 + 0.01);
    assert_eq!(panel.position().y, 54.0);
}

#[test]
fn restored_position_near_the_bottom_survives_startup() {
    let ctx = Context::default();
    let storage = Rc::new(MemoryStore::new());
    storage
        .set("float-panel:bottom", r#"{"x":74.0,"y":450.0}"#)
        .unwrap();
    let mut panel = panel(
        &ctx,
        FloatPanelOptions::default().persist_key("bottom"),
        Some(storage),
    );

    frame(&ctx, &mut panel, SCREEN, true, vec![]);
    assert_eq!(panel.position(), Position::new(74.0, 450.0));
    frame(&ctx, &mut panel, SCREEN, true, vec![]);

    let area = ctx
        .memory(|mem| mem.area_rect(panel.id()))
        .expect("panel area remembered");
    assert!(450.0 + area.height() <= 600.0, "panel fits where it was saved");
    assert_eq!(panel.position(), Position::new(74.0, 450.0));
}

fn stacked(ctx: &Context) -> (FloatPanel, FloatPanel) {
    let lower = FloatPanel::new(
        ctx,
        "lower",
        FloatPanelOptions::default().title("Lower").z_index(500),
        None,
    );
    let upper = FloatPanel::new(
        ctx,
        "upper",
        FloatPanelOptions::default().title("Upper").z_index(1000),
        None,
    );
    (lower, upper)
}

#[test]
fn press_only_drags_the_topmost_panel() {
    let ctx = Context::default();
    let (mut lower, mut upper) = stacked(&ctx);
    frame_both(&ctx, &mut lower, &mut upper, vec![]);
    frame_both(&ctx, &mut lower, &mut upper, vec![]);
    let grab = upper.handle_rect().expect("handle laid out").center();

    frame_both(
        &ctx,
        &mut lower,
        &mut upper,
        vec![button(grab, PointerButton::Primary, true)],
    );
    frame_both(
        &ctx,
        &mut lower,
        &mut upper,
        vec![Event::PointerMoved(grab + vec2(100.0, 50.0))],
    );

    assert_eq!(upper.drag_state(), DragState::Dragging);
    assert_eq!(upper.position(), Position::new(124.0, 74.0));
    assert_eq!(lower.drag_state(), DragState::Idle);
    assert_eq!(lower.position(), Position::new(24.0, 24.0));
}

#[test]
fn stacked_panels_give_text_selection_back() {
    let ctx = Context::default();
    let (mut lower, mut upper) = stacked(&ctx);
    frame_both(&ctx, &mut lower, &mut upper, vec![]);
    frame_both(&ctx, &mut lower, &mut upper, vec![]);
    let grab = upper.handle_rect().expect("handle laid out").center();

    frame_both(
        &ctx,
        &mut lower,
        &mut upper,
        vec![button(grab, PointerButton::Primary, true)],
    );
    frame_both(
        &ctx,
        &mut lower,
        &mut upper,
        vec![button(grab, PointerButton::Primary, false)],
    );

    assert_eq!(upper.drag_state(), DragState::Idle);
    assert_eq!(lower.drag_state(), DragState::Idle);
    assert!(ctx.style().interaction.selectable_labels);
}

#[test]
fn selection_holds_are_shared_across_panels_of_one_context() {
    let ctx = Context::default();
    let first = Rc::new(EguiHost::new(ctx.clone(), Id::new("first")));
    let second = Rc::new(EguiHost::new(ctx.clone(), Id::new("second")));

    let first_guard = SelectionGuard::acquire(&first);
    let second_guard = SelectionGuard::acquire(&second);
    assert!(!second.text_selection());

    drop(first_guard);
    assert!(!first.text_selection());
    drop(second_guard);
    assert!(first.text_selection());
    assert!(ctx.style().interaction.selectable_labels);
}

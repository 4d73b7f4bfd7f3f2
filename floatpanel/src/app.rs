use crate::consts::DB_FILE;
use crate::db::DbConn;
use eframe::{egui, NativeOptions};
use egui_float_panel::{FloatPanel, FloatPanelOptions, KeyValueStore};
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct FloatPanelShellOptions {
    pub db_path: PathBuf,
    pub show_scratch_panel: bool,
}

impl Default for FloatPanelShellOptions {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DB_FILE),
            show_scratch_panel: true,
        }
    }
}

pub struct FloatPanelShell {
    pub inspector: FloatPanel,
    pub scratch: FloatPanel,
    pub db: Option<Rc<DbConn>>,
    pub opts: FloatPanelShellOptions,
    pub notes: String,
}

impl FloatPanelShell {
    pub fn new(ctx: &egui::Context, opts: FloatPanelShellOptions) -> Self {
        // positions are a convenience; run without them rather than refuse to start
        let db = match DbConn::open(&opts.db_path) {
            Ok(db) => Some(Rc::new(db)),
            Err(err) => {
                error!("open {}: {err}, panel positions won't be saved", opts.db_path.display());
                None
            }
        };
        let storage = db.clone().map(|db| db as Rc<dyn KeyValueStore>);

        let inspector = FloatPanel::new(
            ctx,
            "inspector",
            FloatPanelOptions::default()
                .title("Inspector")
                .persist_key("inspector"),
            storage,
        );
        let scratch = FloatPanel::new(
            ctx,
            "scratch",
            FloatPanelOptions::default().title("Scratch").z_index(500),
            None,
        );
        info!(
            "panels restored at {:?} and {:?}",
            inspector.position(),
            scratch.position()
        );

        Self {
            inspector,
            scratch,
            db,
            opts,
            notes: String::new(),
        }
    }

    pub fn start(options: NativeOptions) -> eframe::Result<()> {
        eframe::run_native(
            "FloatPanel",
            options,
            Box::new(|cc| {
                cc.egui_ctx
                    .options_mut(|opt| opt.zoom_with_keyboard = false);
                Ok(Box::new(FloatPanelShell::new(
                    &cc.egui_ctx,
                    FloatPanelShellOptions::default(),
                )))
            }),
        )
    }
}

impl eframe::App for FloatPanelShell {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("main_top_panel").show(ctx, |ui| {
            self.menubar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Drag a panel by its title bar");
            ui.label("Panels stay inside the window, even when it is resized.");
        });

        let position = self.inspector.position();
        let drag_state = self.inspector.drag_state();
        let persisted = self.db.is_some();
        self.inspector.show(ctx, |ui| {
            ui.label(format!("x: {:.0}", position.x));
            ui.label(format!("y: {:.0}", position.y));
            ui.label(format!("state: {drag_state:?}"));
            if !persisted {
                ui.colored_label(ui.visuals().warn_fg_color, "position is not saved");
            }
        });

        if self.opts.show_scratch_panel {
            let notes = &mut self.notes;
            self.scratch.show(ctx, |ui| {
                ui.text_edit_multiline(notes);
            });
        }
    }
}

impl FloatPanelShell {
    pub fn reset_positions(&mut self) {
        self.inspector.reset();
        self.scratch.reset();
        info!("panel positions reset");
    }
}

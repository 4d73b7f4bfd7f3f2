use crate::app::FloatPanelShell;
use crate::consts::REPOSITORY_URL;
use egui::{Button, Checkbox, Modifiers, ViewportCommand};
use egui_float_panel::STORAGE_PREFIX;
use tracing::{error, info};

const BTN_WIDTH: f32 = 200.0;

impl FloatPanelShell {
    pub fn menubar(&mut self, ui: &mut egui::Ui) {
        egui::containers::menu::MenuBar::new().ui(ui, |ui| {
            // Panels
            self.panels_menu(ui);
            // Help
            help_menu(ui);
        });
    }

    fn panels_menu(&mut self, ui: &mut egui::Ui) {
        let reset_shortcut = egui::KeyboardShortcut::new(Modifiers::CTRL, egui::Key::R);
        if ui.input_mut(|i| i.consume_shortcut(&reset_shortcut)) {
            self.reset_positions();
        }
        ui.menu_button("Panels", |ui| {
            let reset_shortcut = ui.ctx().format_shortcut(&reset_shortcut);
            let reset_btn = Button::new("Reset Positions")
                .min_size((BTN_WIDTH, 0.).into())
                .shortcut_text(reset_shortcut);
            if ui.add(reset_btn).clicked() {
                self.reset_positions();
                ui.close();
            }
            let clear_btn = Button::new("Forget Saved Positions").min_size((BTN_WIDTH, 0.).into());
            if ui.add_enabled(self.db.is_some(), clear_btn).clicked() {
                self.forget_positions();
                ui.close();
            }
            ui.add(Checkbox::new(
                &mut self.opts.show_scratch_panel,
                "Scratch Panel",
            ));
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(ViewportCommand::Close);
            }
        });
    }

    fn forget_positions(&self) {
        let Some(db) = &self.db else {
            return;
        };
        match db.delete_prefix(STORAGE_PREFIX) {
            Ok(count) => info!("forgot {count} saved panel positions"),
            Err(err) => error!("forget saved panel positions: {err}"),
        }
    }
}

fn help_menu(ui: &mut egui::Ui) {
    ui.menu_button("Help", |ui| {
        if ui
            .add(Button::new("Repository").min_size((BTN_WIDTH, 0.).into()))
            .clicked()
        {
            ui.ctx().open_url(egui::OpenUrl::new_tab(REPOSITORY_URL));
            ui.close();
        }
    });
}

//! Menu bar UI

use crate::state::AppState;
use eframe::egui;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui| {
        render_file_menu(ui, state);
        render_presets_menu(ui, state);
        render_view_menu(ui, state);
        render_help_menu(ui);
    });
}

fn render_file_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button("File", |ui| {
        if ui.button("Open Folder...").clicked() {
            state.pick_input_dir();
            ui.close_menu();
        }
        if ui.button("Open Files...").clicked() {
            state.pick_files();
            ui.close_menu();
        }
        ui.separator();
        if ui.button("Set Output Folder...").clicked() {
            state.pick_output_dir();
            ui.close_menu();
        }
        ui.separator();
        if ui
            .add_enabled(state.result.is_some(), egui::Button::new("Export"))
            .clicked()
        {
            state.do_export();
            ui.close_menu();
        }
        ui.separator();
        if ui.button("Exit").clicked() {
            std::process::exit(0);
        }
    });
}

fn render_presets_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button("Presets", |ui| {
        let preset_count = state.presets.len();
        for idx in 0..preset_count {
            let label = format!("{} {}", state.presets[idx].icon, state.presets[idx].name);
            if ui.button(label).clicked() {
                state.apply_preset(idx);
                ui.close_menu();
            }
        }
    });
}

fn render_view_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button("View", |ui| {
        ui.checkbox(&mut state.fit_to_window, "Fit to Window");
        ui.separator();
        if ui.button("Clear Result").clicked() {
            state.clear_result();
            ui.close_menu();
        }
        if ui.button("Clear Error").clicked() {
            state.clear_error();
            ui.close_menu();
        }
    });
}

fn render_help_menu(ui: &mut egui::Ui) {
    ui.menu_button("Help", |ui| {
        if ui.button("About").clicked() {
            ui.close_menu();
        }
    });
}

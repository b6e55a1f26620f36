//! Setup panel UI (left side)

use crate::state::AppState;
use eframe::egui;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    render_io_section(ui, state);
    ui.separator();
    render_preset_section(ui, state);
    ui.separator();
    render_size_section(ui, state);
    ui.separator();
    render_advanced_section(ui, state);
    ui.separator();
    render_actions(ui, state);
}

fn render_io_section(ui: &mut egui::Ui, state: &mut AppState) {
    egui::CollapsingHeader::new("Input / Output")
        .default_open(true)
        .show(ui, |ui| {
            ui.label("Input:");
            ui.horizontal(|ui| {
                if ui.button("Browse Folder...").clicked() {
                    state.pick_input_dir();
                }
                if ui.button("Browse Files...").clicked() {
                    state.pick_files();
                }
            });

            if let Some(dir) = &state.input_dir {
                ui.weak(format!("  {}", dir.display()));
            } else {
                ui.weak("  <none>");
            }

            ui.add_space(6.0);

            ui.label("Output:");
            if ui.button("Browse Output...").clicked() {
                state.pick_output_dir();
            }

            if let Some(dir) = &state.output_dir {
                ui.weak(format!("  {}", dir.display()));
            } else {
                ui.weak("  <none>");
            }

            ui.add_space(6.0);

            ui.label(format!("Loaded: {} images", state.inputs.len()));

            if ui.button("Reload").clicked() {
                if let Err(e) = state.load_inputs() {
                    state.set_error(e.to_string());
                }
            }
        });
}

fn render_preset_section(ui: &mut egui::Ui, state: &mut AppState) {
    egui::CollapsingHeader::new("Preset")
        .default_open(true)
        .show(ui, |ui| {
            let preset_names: Vec<String> = state
                .presets
                .iter()
                .map(|p| format!("{} {}", p.icon, p.name))
                .collect();

            let current = state.selected_preset_idx;
            let display_name = if state.is_custom_preset {
                format!("Custom (based on {})", state.presets[current].name)
            } else {
                preset_names[current].clone()
            };

            ui.label("Preset:");
            egui::ComboBox::from_id_salt("preset_combo")
                .selected_text(display_name)
                .show_ui(ui, |ui| {
                    for (idx, name) in preset_names.iter().enumerate() {
                        let is_selected = idx == current && !state.is_custom_preset;
                        if ui.selectable_label(is_selected, name).clicked() {
                            state.apply_preset(idx);
                        }
                    }
                });

            ui.add_space(4.0);

            let preset = state.current_preset();
            ui.colored_label(egui::Color32::from_rgb(200, 230, 255), preset.description);

            ui.add_space(4.0);

            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_min_height(150.0);
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.weak("Details:");
                    for detail in &preset.details {
                        ui.label(*detail);
                    }
                });
            });
        });
}

fn render_size_section(ui: &mut egui::Ui, state: &mut AppState) {
    egui::CollapsingHeader::new("Atlas Size")
        .default_open(true)
        .show(ui, |ui| {
            let sizes = state.recommended_sizes().to_vec();
            let size_labels: Vec<String> =
                sizes.iter().map(|(w, h)| format!("{}x{}", w, h)).collect();

            let current = state
                .selected_size_idx
                .min(size_labels.len().saturating_sub(1));

            ui.label("Size:");
            egui::ComboBox::from_id_salt("size_combo")
                .selected_text(size_labels.get(current).cloned().unwrap_or_default())
                .show_ui(ui, |ui| {
                    for (idx, label) in size_labels.iter().enumerate() {
                        if ui.selectable_label(idx == current, label).clicked() {
                            state.apply_size(idx);
                        }
                    }
                });

            ui.add_space(4.0);

            ui.label("Custom:");
            let mut w = state.cfg.max_width;
            let mut h = state.cfg.max_height;
            ui.horizontal(|ui| {
                if ui
                    .add(egui::DragValue::new(&mut w).range(1..=16384).prefix("W: "))
                    .changed()
                {
                    state.cfg.max_width = w;
                    state.mark_custom();
                }
                if ui
                    .add(egui::DragValue::new(&mut h).range(1..=16384).prefix("H: "))
                    .changed()
                {
                    state.cfg.max_height = h;
                    state.mark_custom();
                }
            });
        });
}

fn render_advanced_section(ui: &mut egui::Ui, state: &mut AppState) {
    egui::CollapsingHeader::new("Advanced Options")
        .default_open(false)
        .show(ui, |ui| {
            let mut trim = state.cfg.trim;
            if ui.checkbox(&mut trim, "Trim Transparent Edges").changed() {
                state.cfg.trim = trim;
                state.mark_custom();
            }
            if trim {
                let mut threshold = state.cfg.trim_threshold as i32;
                if ui
                    .add(
                        egui::DragValue::new(&mut threshold)
                            .range(0..=255)
                            .prefix("Threshold: "),
                    )
                    .changed()
                {
                    state.cfg.trim_threshold = threshold.clamp(0, 255) as u8;
                    state.mark_custom();
                }
            }

            let mut rotation = state.cfg.allow_rotation;
            if ui.checkbox(&mut rotation, "Allow Rotation").changed() {
                state.cfg.allow_rotation = rotation;
                state.mark_custom();
            }

            let mut padding = state.cfg.texture_padding;
            if ui
                .add(egui::DragValue::new(&mut padding).prefix("Padding: "))
                .changed()
            {
                state.cfg.texture_padding = padding;
                state.mark_custom();
            }

            let mut extrusion = state.cfg.texture_extrusion;
            if ui
                .add(egui::DragValue::new(&mut extrusion).prefix("Extrusion: "))
                .changed()
            {
                state.cfg.texture_extrusion = extrusion;
                state.mark_custom();
            }

            let mut border = state.cfg.border_padding;
            if ui
                .add(egui::DragValue::new(&mut border).prefix("Border: "))
                .changed()
            {
                state.cfg.border_padding = border;
                state.mark_custom();
            }

            ui.add_space(4.0);

            let mut pow2 = state.cfg.power_of_two;
            if ui.checkbox(&mut pow2, "Power of 2").changed() {
                state.cfg.power_of_two = pow2;
                state.mark_custom();
            }

            let mut square = state.cfg.square;
            if ui.checkbox(&mut square, "Square").changed() {
                state.cfg.square = square;
                state.mark_custom();
            }

            let mut force_max = state.cfg.force_max_dimensions;
            if ui.checkbox(&mut force_max, "Force Max Dimensions").changed() {
                state.cfg.force_max_dimensions = force_max;
                state.mark_custom();
            }

            ui.add_space(4.0);

            let mut outlines = state.cfg.texture_outlines;
            if ui.checkbox(&mut outlines, "Draw Debug Outlines").changed() {
                state.cfg.texture_outlines = outlines;
                state.mark_custom();
            }
        });
}

fn render_actions(ui: &mut egui::Ui, state: &mut AppState) {
    ui.label("Atlas Name:");
    let mut name_buf = state.atlas_name.clone();
    if ui.text_edit_singleline(&mut name_buf).changed() {
        state.atlas_name = name_buf;
    }

    ui.add_space(6.0);

    let button_width = (ui.available_width() - 8.0) / 2.0;
    ui.horizontal(|ui| {
        if ui
            .add_sized([button_width, 40.0], egui::Button::new("Pack"))
            .clicked()
        {
            state.do_pack();
        }
        if ui
            .add_sized([button_width, 40.0], egui::Button::new("Export"))
            .clicked()
        {
            state.do_export();
        }
    });

    if let Some(err) = &state.last_error {
        ui.add_space(6.0);
        ui.colored_label(egui::Color32::from_rgb(255, 80, 80), "Error:");
        ui.label(err);
    }
}

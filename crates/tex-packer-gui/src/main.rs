//! tex-packer-gui: desktop shell around tex-packer-core built on egui/eframe.

mod presets;
mod state;
mod stats;
mod ui;

use eframe::egui;
use state::AppState;

struct App {
    state: AppState,
    page_textures: Vec<Option<egui::TextureHandle>>,
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui::menu_bar::render(ui, &mut self.state);
        });

        egui::SidePanel::left("setup_panel")
            .resizable(true)
            .default_width(420.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui::setup_panel::render(ui, &mut self.state);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui::preview_panel::render(ctx, ui, &mut self.state, &mut self.page_textures);
        });
    }
}

fn main() -> eframe::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1400.0, 900.0]),
        ..Default::default()
    };

    eframe::run_native(
        "tex-packer GUI - Texture Atlas Packer",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(App {
                state: AppState::default(),
                page_textures: Vec::new(),
            }))
        }),
    )
}

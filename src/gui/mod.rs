//! Desktop form for one-off conversions

mod form;
mod state;

use state::AppState;

use eframe::egui::Align2;
use eframe::egui::Color32;
use eframe::egui::Id;
use eframe::egui::LayerId;
use eframe::egui::Order;
use eframe::egui::TextStyle;
use eframe::egui::{self};
use eyre::eyre;
use tracing::info;

/// Run the GUI. This is async so the caller can create a runtime; the function will
/// block in place on the eframe app using `tokio::task::block_in_place`.
///
/// # Errors
///
/// Returns an error if the window cannot be created.
pub async fn run_gui() -> eyre::Result<()> {
    info!("Starting image optimizer GUI");
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([560.0, 380.0]),
        ..Default::default()
    };

    let res = tokio::task::block_in_place(move || {
        eframe::run_native(
            "Image Optimizer",
            native_options,
            Box::new(|cc| Ok(Box::new(OptimizerApp::new(cc)))),
        )
        .map_err(|e| eyre!("Failed to run eframe: {}", e))
    });

    res?;
    info!("GUI exited");
    Ok(())
}

#[derive(Debug)]
struct OptimizerApp {
    state: AppState,
}

impl OptimizerApp {
    fn new(_cc: &eframe::CreationContext) -> Self {
        OptimizerApp {
            state: AppState::default(),
        }
    }
}

impl eframe::App for OptimizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_background_tasks();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                if ui.button("About").clicked() {
                    self.state.about_open = !self.state.about_open;
                }

                egui::widgets::global_theme_preference_switch(ui);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            form::draw_form(ui, &mut self.state);
        });

        if self.state.about_open {
            egui::Window::new("About")
                .resizable(false)
                .collapsible(false)
                .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
                .open(&mut self.state.about_open)
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Image Optimizer");
                        ui.add_space(10.0);
                        ui.label(format!("Version: {}", env!("CARGO_PKG_VERSION")));
                        ui.label(format!(
                            "Revision: {}",
                            option_env!("GIT_REVISION").unwrap_or("unknown")
                        ));
                        ui.add_space(10.0);
                        ui.label("Resize, crop and re-encode images and videos.");
                    });
                });
        }

        // Hover preview for files being dragged over the window
        let hovered_files = ctx.input(|i| i.raw.hovered_files.clone());
        if !hovered_files.is_empty() {
            let mut text = "Drop to use as input:\n".to_owned();
            for file in &hovered_files {
                if let Some(path) = &file.path {
                    text.push_str(&format!("\n{}", path.display()));
                } else if !file.mime.is_empty() {
                    text.push_str(&format!("\n{}", file.mime));
                } else {
                    text.push_str("\n???");
                }
            }

            let painter =
                ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
            let content_rect = ctx.content_rect();
            painter.rect_filled(content_rect, 0.0, Color32::from_black_alpha(192));
            painter.text(
                content_rect.center(),
                Align2::CENTER_CENTER,
                text,
                TextStyle::Heading.resolve(&ctx.style()),
                Color32::WHITE,
            );
        }

        // Only the first dropped path is used
        let dropped = ctx.input(|i| i.raw.dropped_files.iter().find_map(|f| f.path.clone()));
        if let Some(path) = dropped {
            info!("Dropped {}", path.display());
            self.state.accept_dropped(path);
        }
    }
}

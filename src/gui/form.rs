//! The conversion form

use crate::geometry::VideoResolution;
use crate::gui::state::AppState;
use crate::gui::state::OperationChoice;
use crate::image_processing::OutputFormat;
use crate::image_processing::OverlayPosition;
use crate::video::Compression;
use eframe::egui;

const FORMATS: [OutputFormat; 4] = [
    OutputFormat::Keep,
    OutputFormat::Webp,
    OutputFormat::Jpg,
    OutputFormat::Png,
];

const POSITIONS: [OverlayPosition; 7] = [
    OverlayPosition::Auto,
    OverlayPosition::Center,
    OverlayPosition::TopLeft,
    OverlayPosition::TopRight,
    OverlayPosition::BottomLeft,
    OverlayPosition::BottomRight,
    OverlayPosition::Tile,
];

/// Draw the form and start a conversion when asked
pub fn draw_form(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Image Optimizer");
    ui.separator();

    egui::Grid::new("conversion_form")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            ui.label("Operation:");
            egui::ComboBox::from_id_salt("operation")
                .selected_text(state.operation.label())
                .width(240.0)
                .show_ui(ui, |ui| {
                    for choice in OperationChoice::ALL {
                        ui.selectable_value(&mut state.operation, choice, choice.label());
                    }
                });
            ui.end_row();

            ui.label(if state.operation.takes_folder() {
                "Folder:"
            } else {
                "Input:"
            });
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut state.input)
                        .hint_text("Type a path or drop a file on the window")
                        .desired_width(320.0),
                );
                if ui.button("Browse...").clicked() {
                    state.browse_input();
                }
            });
            ui.end_row();

            draw_parameters(ui, state);
        });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        let run = ui.add_enabled(!state.running, egui::Button::new("Run"));
        if run.clicked() {
            state.run_selected(ui.ctx());
        }
        if state.running {
            ui.spinner();
            ui.label("Working...");
        }
    });

    ui.add_space(8.0);
    match &state.status {
        Some(Ok(summary)) => {
            ui.label(summary.as_str());
        }
        Some(Err(e)) => {
            ui.colored_label(ui.visuals().error_fg_color, e.as_str());
        }
        None => {}
    }
}

fn draw_parameters(ui: &mut egui::Ui, state: &mut AppState) {
    match state.operation {
        OperationChoice::Overlay => {
            ui.label("Overlay:");
            ui.horizontal(|ui| {
                ui.text_edit_singleline(&mut state.overlay);
                if ui.button("Browse...").clicked() {
                    state.browse_overlay();
                }
            });
            ui.end_row();

            ui.label("Position:");
            egui::ComboBox::from_id_salt("overlay_position")
                .selected_text(state.position.as_str())
                .show_ui(ui, |ui| {
                    for position in POSITIONS {
                        ui.selectable_value(&mut state.position, position, position.as_str());
                    }
                });
            ui.end_row();
        }
        OperationChoice::Resize => {
            ui.label("Width:");
            ui.text_edit_singleline(&mut state.width);
            ui.end_row();

            ui.label("Height:");
            ui.add(egui::TextEdit::singleline(&mut state.height).hint_text("optional"));
            ui.end_row();
        }
        OperationChoice::Crop => {
            ui.label("Width:");
            ui.text_edit_singleline(&mut state.width);
            ui.end_row();

            ui.label("Height:");
            ui.text_edit_singleline(&mut state.height);
            ui.end_row();
        }
        OperationChoice::ResizeHeight => {
            ui.label("Height:");
            ui.text_edit_singleline(&mut state.height);
            ui.end_row();
        }
        OperationChoice::AspectRatio => {
            draw_ratio(ui, state);
        }
        OperationChoice::Video => {
            draw_ratio(ui, state);

            ui.label("Resolution:");
            ui.horizontal(|ui| {
                for resolution in [VideoResolution::P480, VideoResolution::P720] {
                    ui.radio_value(&mut state.resolution, resolution, resolution.as_str());
                }
            });
            ui.end_row();

            ui.label("Compression:");
            ui.horizontal(|ui| {
                for compression in [Compression::High, Compression::Medium, Compression::Low] {
                    ui.radio_value(&mut state.compression, compression, compression.as_str())
                        .on_hover_text(format!("CRF {}", compression.crf()));
                }
            });
            ui.end_row();
        }
        _ => {}
    }

    if state.operation.has_format() {
        ui.label("Format:");
        egui::ComboBox::from_id_salt("output_format")
            .selected_text(state.format.as_str())
            .show_ui(ui, |ui| {
                for format in FORMATS {
                    ui.selectable_value(&mut state.format, format, format.as_str());
                }
            });
        ui.end_row();
    }
}

fn draw_ratio(ui: &mut egui::Ui, state: &mut AppState) {
    ui.label("Aspect ratio:");
    ui.add(
        egui::TextEdit::singleline(&mut state.ratio)
            .hint_text("W:H")
            .desired_width(80.0),
    );
    ui.end_row();
}

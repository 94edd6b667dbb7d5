use super::state::NO_IMAGES_PLACEHOLDER;
use super::{GalleryView, ImageImporter, RequestState, Tile};
use crate::backend::{ImportSource, SourceFilter};
use eframe::egui::{self, Color32, RichText};

const TILE_SIZE: f32 = 160.0;
const ERROR_COLOR: Color32 = Color32::from_rgb(220, 50, 50);
const SUCCESS_COLOR: Color32 = Color32::from_rgb(0, 180, 0);
const MUTED_COLOR: Color32 = Color32::from_rgb(150, 150, 150);

impl ImageImporter {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("📥 Image Importer");
                        ui.add_space(5.0);
                        ui.label(
                            RichText::new("Import images from Google Drive or Dropbox folders")
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });

                    ui.add_space(20.0);
                    self.render_import_form(ui);
                    ui.add_space(20.0);
                    self.render_gallery(ui);
                    ui.add_space(20.0);
                });
        });
    }

    fn render_import_form(&mut self, ui: &mut egui::Ui) {
        let can_submit = self.state.can_submit();
        let button_label = self.state.import_button_label();
        let mut submitted = false;

        ui.group(|ui| {
            ui.horizontal(|ui| {
                egui::ComboBox::from_id_source("import_source")
                    .selected_text(self.state.import_source.label())
                    .show_ui(ui, |ui| {
                        for source in ImportSource::ALL {
                            ui.selectable_value(
                                &mut self.state.import_source,
                                source,
                                source.label(),
                            );
                        }
                    });

                let input = ui.add(
                    egui::TextEdit::singleline(&mut self.state.url)
                        .hint_text("Paste folder URL here")
                        .desired_width(ui.available_width() - 120.0),
                );
                if input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submitted = can_submit;
                }

                ui.add_enabled_ui(can_submit, |ui| {
                    let button = egui::Button::new(button_label).min_size(egui::vec2(110.0, 0.0));
                    if ui.add(button).clicked() {
                        submitted = true;
                    }
                });
            });

            if let Some(error) = self.state.error_message() {
                ui.add_space(5.0);
                let label = ui.colored_label(ERROR_COLOR, error);
                if let Some(cause) = self.state.failure_cause() {
                    label.on_hover_text(cause);
                }
            }
            if let Some(success) = self.state.success_message() {
                ui.add_space(5.0);
                ui.colored_label(SUCCESS_COLOR, success);
            }
        });

        if submitted {
            self.submit_import();
        }
    }

    fn render_gallery(&mut self, ui: &mut egui::Ui) {
        let mut selected = self.state.filter;
        let mut open_uri = None;

        ui.group(|ui| {
            ui.heading("🖼 Imported Images");
            ui.add_space(5.0);

            ui.horizontal(|ui| {
                egui::ComboBox::from_id_source("filter_source")
                    .selected_text(selected.label())
                    .show_ui(ui, |ui| {
                        for filter in SourceFilter::ALL {
                            ui.selectable_value(&mut selected, filter, filter.label());
                        }
                    });
                if self.state.listing == RequestState::Pending {
                    ui.spinner();
                }
            });

            ui.add_space(10.0);

            match self.state.gallery() {
                GalleryView::Empty => {
                    ui.label(NO_IMAGES_PLACEHOLDER);
                }
                GalleryView::Tiles(tiles) => {
                    ui.horizontal_wrapped(|ui| {
                        for tile in &tiles {
                            let clicked = ui
                                .push_id(tile.key, |ui| Self::render_tile(ui, tile))
                                .inner
                                .clicked();
                            if clicked {
                                open_uri = Some(tile.source_uri.to_string());
                            }
                        }
                    });
                }
            }
        });

        if selected != self.state.filter {
            self.select_filter(selected);
        }
        if let Some(uri) = open_uri {
            Self::open_original(&uri);
        }
    }

    fn render_tile(ui: &mut egui::Ui, tile: &Tile<'_>) -> egui::Response {
        let response = ui
            .vertical(|ui| {
                ui.set_width(TILE_SIZE);
                let image = ui.add(
                    egui::Image::new(tile.source_uri)
                        .fit_to_exact_size(egui::vec2(TILE_SIZE, TILE_SIZE))
                        .sense(egui::Sense::click()),
                );
                ui.label(RichText::new(tile.caption).small());
                if let Some(badge) = tile.badge {
                    let color = if badge == "failed" {
                        ERROR_COLOR
                    } else {
                        MUTED_COLOR
                    };
                    ui.colored_label(color, badge);
                }
                image
            })
            .inner;

        response.on_hover_text(tile.details.as_str())
    }

    fn open_original(uri: &str) {
        if let Err(e) = open::that(uri) {
            log::warn!("Failed to open {}: {}", uri, e);
        }
    }
}

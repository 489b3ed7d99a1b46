//! Top bar and hamburger menu for `OutfitApp`.
//!
//! The menu mirrors the web page's hamburger navigation: the button toggles
//! it, picking an entry switches views, and a click anywhere else closes it.

use eframe::egui;

use super::{OutfitApp, View};

impl OutfitApp {
    /// Render the top bar: app title, view name, hamburger button.
    pub fn draw_top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(4.0);
            ui.heading("MisMatch");
            ui.label(egui::RichText::new(match self.view {
                View::Generator => "Outfit Generator",
                View::SavedOutfits => "Saved Outfits",
                View::Upload => "Upload Clothing",
            })
            .weak());

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let button = ui.add(
                    egui::Button::new("\u{2630}").min_size(egui::vec2(32.0, 24.0)),
                );
                if button.clicked() {
                    self.menu_open = !self.menu_open;
                }
                self.menu_button_rect = Some(button.rect);
            });
        });
    }

    /// Render the dropdown menu while open; close it on any click that lands
    /// outside both the menu and the hamburger button.
    pub fn draw_menu(&mut self, ctx: &egui::Context) {
        if !self.menu_open {
            return;
        }

        let anchor = self
            .menu_button_rect
            .map(|r| egui::pos2(r.right() - 160.0, r.bottom() + 4.0))
            .unwrap_or_else(|| egui::pos2(0.0, 0.0));

        let area = egui::Area::new(egui::Id::new("hamburger_menu"))
            .fixed_pos(anchor)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_min_width(160.0);
                    if ui.button("Outfit generator").clicked() {
                        self.view = View::Generator;
                        self.menu_open = false;
                    }
                    if ui.button("Saved outfits").clicked() {
                        self.view = View::SavedOutfits;
                        self.menu_open = false;
                        self.load_saved_outfits(ctx);
                    }
                    if ui.button("Upload clothing").clicked() {
                        self.view = View::Upload;
                        self.menu_open = false;
                    }
                });
            });

        if ctx.input(|i| i.pointer.any_pressed()) {
            if let Some(pos) = ctx.input(|i| i.pointer.interact_pos()) {
                let on_menu = area.response.rect.contains(pos);
                let on_button = self.menu_button_rect.is_some_and(|r| r.contains(pos));
                if !on_menu && !on_button {
                    self.menu_open = false;
                }
            }
        }
    }
}

//! Content-area rendering for `OutfitApp`.
//!
//! Three views behind the hamburger menu:
//!
//! - `draw_generator` — per-category shuffle boxes, color filters, mismatch
//!   and save controls
//! - `draw_saved`     — saved outfit cards with delete
//! - `draw_upload`    — clothing image upload form
//!
//! All wardrobe state lives in the `OutfitBrowser`; this layer only decides
//! how to paint what the browser says each region shows.

use eframe::egui;

use outfit_browser::browser::{ColorFilter, Direction};
use outfit_browser::catalog::{Category, ClothingItem};

use super::{NoticeKind, OutfitApp, View};

const BOX_SIZE: egui::Vec2 = egui::vec2(210.0, 210.0);
const THUMB_SIZE: egui::Vec2 = egui::vec2(64.0, 64.0);

/// Deferred result of one category column's widgets. Collected while the
/// column renders (the browser is immutably borrowed there) and applied
/// afterwards.
enum ColumnAction {
    Advance(Direction),
    Filter(ColorFilter),
    Select(String),
    DeleteItem(String),
}

/// Snapshot of one category's state, cloned out of the browser so rendering
/// never fights the borrow checker over `self`.
struct ColumnData {
    display: Option<ClothingItem>,
    cursor: Option<usize>,
    active: Vec<ClothingItem>,
    filter: ColorFilter,
    colors: Vec<String>,
}

impl OutfitApp {
    pub fn draw_content(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        self.draw_notice(ui);

        match self.view {
            View::Generator => self.draw_generator(ui, ctx),
            View::SavedOutfits => self.draw_saved(ui, ctx),
            View::Upload => self.draw_upload(ui, ctx),
        }
    }

    // ── Notices ──────────────────────────────────────────────────────────────

    fn draw_notice(&mut self, ui: &mut egui::Ui) {
        let Some(notice) = self.notice.clone() else {
            return;
        };

        let color = match notice.kind {
            NoticeKind::Success => egui::Color32::from_rgb(0, 140, 60),
            NoticeKind::Error => egui::Color32::from_rgb(200, 40, 40),
        };

        egui::Frame::none()
            .fill(color.gamma_multiply(0.15))
            .inner_margin(egui::Margin::symmetric(8.0, 6.0))
            .rounding(4.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(color, &notice.text);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("\u{2715}").clicked() {
                            self.notice = None;
                        }
                    });
                });
            });
        ui.add_space(6.0);
    }

    // ── Generator view ───────────────────────────────────────────────────────

    fn draw_generator(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        if self.browser.is_none() {
            if self.loading_catalog {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.spinner();
                    ui.label("Loading wardrobe...");
                });
            } else {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    if ui.button("Load wardrobe").clicked() {
                        self.start_load_catalog(ctx);
                    }
                });
            }
            return;
        }

        ui.columns(3, |cols| {
            for (i, category) in Category::ALL.into_iter().enumerate() {
                self.draw_category_column(&mut cols[i], ctx, category);
            }
        });

        ui.add_space(8.0);
        ui.separator();

        ui.horizontal(|ui| {
            if ui
                .button(egui::RichText::new("Generate MisMatch Outfit").strong())
                .clicked()
            {
                if let Some(browser) = self.browser.as_mut() {
                    browser.mismatch();
                }
            }

            ui.separator();

            ui.label("Outfit name:");
            ui.add_sized(
                [180.0, 22.0],
                egui::TextEdit::singleline(&mut self.outfit_name).hint_text("My outfit"),
            );
            let saving = self.call_rx.is_some();
            if ui.add_enabled(!saving, egui::Button::new("Save outfit")).clicked() {
                self.save_outfit(ctx);
            }
            if saving {
                ui.spinner();
            }
        });
    }

    fn draw_category_column(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        category: Category,
    ) {
        let Some(data) = self.column_data(category) else {
            return;
        };
        let mut action: Option<ColumnAction> = None;

        ui.vertical_centered(|ui| {
            ui.strong(category.label());

            // Arrow / box / arrow
            ui.horizontal(|ui| {
                let arrow = egui::vec2(28.0, BOX_SIZE.y);
                if ui.add_sized(arrow, egui::Button::new("\u{25C0}")).clicked() {
                    action = Some(ColumnAction::Advance(Direction::Back));
                }
                self.draw_display_box(ui, ctx, data.display.as_ref());
                if ui.add_sized(arrow, egui::Button::new("\u{25B6}")).clicked() {
                    action = Some(ColumnAction::Advance(Direction::Forward));
                }
            });

            // Position readout
            match data.cursor {
                Some(pos) => ui.weak(format!("{} / {}", pos + 1, data.active.len())),
                None => ui.weak(format!("{} items", data.active.len())),
            };

            // Color filter
            ui.horizontal(|ui| {
                ui.label("Color:");
                let selected = data.filter.to_string();
                egui::ComboBox::from_id_salt(("color_filter", category))
                    .selected_text(selected)
                    .show_ui(ui, |ui| {
                        if ui
                            .selectable_label(data.filter == ColorFilter::All, "all")
                            .clicked()
                        {
                            action = Some(ColumnAction::Filter(ColorFilter::All));
                        }
                        for color in &data.colors {
                            let current = ColorFilter::Color(color.clone());
                            if ui
                                .selectable_label(data.filter == current, color)
                                .clicked()
                            {
                                action = Some(ColumnAction::Filter(current));
                            }
                        }
                    });
            });

            // Filter grid: every active item, clickable
            egui::ScrollArea::vertical()
                .id_salt(("filter_grid", category))
                .max_height(150.0)
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        for item in &data.active {
                            if let Some(a) = self.draw_grid_thumb(ui, ctx, item) {
                                action = Some(a);
                            }
                        }
                    });
                });
        });

        self.apply_column_action(category, action, ctx);
    }

    fn column_data(&self, category: Category) -> Option<ColumnData> {
        let browser = self.browser.as_ref()?;
        Some(ColumnData {
            display: browser.display(category).item().cloned(),
            cursor: browser.cursor_position(category),
            active: browser.active_items(category).into_iter().cloned().collect(),
            filter: browser.filter(category).clone(),
            colors: browser.available_colors(category),
        })
    }

    fn apply_column_action(
        &mut self,
        category: Category,
        action: Option<ColumnAction>,
        ctx: &egui::Context,
    ) {
        let Some(action) = action else {
            return;
        };

        match action {
            ColumnAction::Advance(direction) => {
                if let Some(browser) = self.browser.as_mut() {
                    // EmptyCategory is already logged by the core; the arrows
                    // just do nothing.
                    let _ = browser.advance(category, direction);
                }
            }
            ColumnAction::Filter(filter) => {
                if let Some(browser) = self.browser.as_mut() {
                    browser.apply_color_filter(category, filter);
                }
            }
            ColumnAction::Select(id) => {
                if let Some(browser) = self.browser.as_mut() {
                    let _ = browser.select_explicit(category, &id);
                }
            }
            ColumnAction::DeleteItem(id) => {
                self.delete_clothing(id, ctx);
            }
        }
    }

    /// The single-item display box: the cursor's item, or the placeholder
    /// glyph while the category is still at the sentinel.
    fn draw_display_box(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        item: Option<&ClothingItem>,
    ) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_min_size(BOX_SIZE);
            ui.set_max_size(BOX_SIZE);
            ui.centered_and_justified(|ui| match item {
                Some(item) => match self.texture_for(ctx, &item.image_path) {
                    Some(tex) => {
                        ui.add(egui::Image::new((tex.id(), fit(tex.size_vec2(), BOX_SIZE))));
                    }
                    None => {
                        ui.spinner();
                    }
                },
                None => {
                    ui.label(egui::RichText::new("?").size(72.0).weak());
                }
            });
        });
    }

    /// One clickable thumbnail in the filter grid.
    fn draw_grid_thumb(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        item: &ClothingItem,
    ) -> Option<ColumnAction> {
        let mut action = None;

        let response = match self.texture_for(ctx, &item.image_path) {
            Some(tex) => ui.add(egui::ImageButton::new(egui::Image::new((
                tex.id(),
                fit(tex.size_vec2(), THUMB_SIZE),
            )))),
            None => ui.add_sized(THUMB_SIZE, egui::Button::new("\u{2026}")),
        };

        let response = response.on_hover_text(match &item.color {
            Some(color) => format!("{} ({})", item.id, color),
            None => item.id.clone(),
        });
        if response.clicked() {
            action = Some(ColumnAction::Select(item.id.clone()));
        }

        // Custom uploads can be removed from the wardrobe (right click).
        if item.custom && response.secondary_clicked() {
            action = Some(ColumnAction::DeleteItem(item.id.clone()));
        }

        action
    }

    // ── Saved outfits view ───────────────────────────────────────────────────

    fn draw_saved(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        if self.loading_saved {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.spinner();
            });
            return;
        }

        if self.saved.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label("No saved outfits yet.");
                if ui.button("Refresh").clicked() {
                    self.load_saved_outfits(ctx);
                }
            });
            return;
        }

        let outfits = self.saved.clone();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for outfit in &outfits {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.strong(&outfit.outfit_name);
                            ui.horizontal(|ui| {
                                for item in [&outfit.top, &outfit.bottom, &outfit.footwear] {
                                    self.draw_saved_thumb(ui, ctx, item);
                                }
                            });
                        });
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                if ui.button("Delete").clicked() {
                                    self.confirm_delete = Some(outfit.id.clone());
                                }
                            },
                        );
                    });
                });
                ui.add_space(4.0);
            }
        });
    }

    fn draw_saved_thumb(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, item: &ClothingItem) {
        match self.texture_for(ctx, &item.image_path) {
            Some(tex) => {
                ui.add(egui::Image::new((tex.id(), fit(tex.size_vec2(), THUMB_SIZE))));
            }
            None => {
                ui.add_sized(THUMB_SIZE, egui::Label::new("\u{2026}"));
            }
        }
    }

    /// Confirmation dialog before an outfit delete goes out.
    pub fn draw_confirm_dialog(&mut self, ctx: &egui::Context) {
        let Some(outfit_id) = self.confirm_delete.clone() else {
            return;
        };

        egui::Window::new("Delete outfit?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("Are you sure you want to delete this outfit?");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        self.confirm_delete = None;
                    }
                    if ui
                        .button(egui::RichText::new("Delete").color(egui::Color32::RED))
                        .clicked()
                    {
                        self.confirm_delete = None;
                        self.delete_outfit(outfit_id.clone(), ctx);
                    }
                });
            });
    }

    // ── Upload view ──────────────────────────────────────────────────────────

    fn draw_upload(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.add_space(12.0);
        ui.heading("Add clothing to your wardrobe");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("Category:");
            egui::ComboBox::from_id_salt("upload_category")
                .selected_text(self.upload_category.label())
                .show_ui(ui, |ui| {
                    for category in Category::ALL {
                        ui.selectable_value(
                            &mut self.upload_category,
                            category,
                            category.label(),
                        );
                    }
                });
        });

        ui.horizontal(|ui| {
            ui.label("Image file:");
            ui.add_sized(
                [320.0, 22.0],
                egui::TextEdit::singleline(&mut self.upload_path)
                    .hint_text("/path/to/shirt.png"),
            );
        });
        ui.weak("png, jpg or jpeg");

        ui.add_space(8.0);
        let uploading = self.call_rx.is_some();
        if ui.add_enabled(!uploading, egui::Button::new("Upload")).clicked() {
            self.upload_clothing(ctx);
        }
        if uploading {
            ui.spinner();
        }
    }

    // ── Textures ─────────────────────────────────────────────────────────────

    /// Texture for a catalog image path, requesting the download on first
    /// sight. Returns `None` until the image has arrived and decoded.
    fn texture_for(&mut self, ctx: &egui::Context, image_path: &str) -> Option<egui::TextureHandle> {
        if let Some(tex) = self.textures.get(image_path) {
            return Some(tex.clone());
        }

        self.images.request(self.api.base_url(), image_path);
        let data = self.images.get(image_path)?;

        let color = egui::ColorImage::from_rgba_unmultiplied(
            [data.width as usize, data.height as usize],
            &data.rgba,
        );
        let tex = ctx.load_texture(image_path.to_owned(), color, egui::TextureOptions::LINEAR);
        self.textures.insert(image_path.to_owned(), tex.clone());
        Some(tex)
    }
}

/// Scale `size` down to fit inside `bounds`, preserving aspect ratio.
fn fit(size: egui::Vec2, bounds: egui::Vec2) -> egui::Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return bounds;
    }
    let scale = (bounds.x / size.x).min(bounds.y / size.y).min(1.0);
    size * scale
}

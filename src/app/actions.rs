//! Server call lifecycle for `OutfitApp`.
//!
//! Every collaborator call follows the same shape: spawn a thread with a
//! clone of the API client, send the outcome over an mpsc channel, wake the
//! UI with `request_repaint`, and let `poll` fold the result into app state.
//! The outfit browser itself is never mutated from a network outcome; a
//! refreshed catalog replaces it wholesale (the "page reload" of the web UI).

use std::sync::mpsc;

use eframe::egui;

use outfit_browser::browser::OutfitBrowser;
use outfit_browser::net::api::{ApiClient, ApiError, SaveOutfitRequest};

use super::{Notice, OutfitApp};

/// Successful outcome of a background server call.
#[derive(Debug, Clone)]
pub enum CallDone {
    Saved { message: String },
    OutfitDeleted { outfit_id: String },
    ClothingDeleted { item_id: String },
    Uploaded { message: String },
}

impl OutfitApp {
    // ── Catalog ──────────────────────────────────────────────────────────────

    /// Fetch the wardrobe and (re)build the outfit browser from it. Each
    /// load shuffles every category exactly once; nothing reshuffles until
    /// the next load.
    pub fn start_load_catalog(&mut self, ctx: &egui::Context) {
        if self.loading_catalog {
            return;
        }
        self.loading_catalog = true;

        let (tx, rx) = mpsc::channel();
        self.catalog_rx = Some(rx);

        let api = self.api.clone();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let _ = tx.send(api.fetch_catalog());
            ctx.request_repaint();
        });
    }

    // ── Outfit save / delete ─────────────────────────────────────────────────

    /// Save the current selection. The incomplete-selection check happens
    /// here, before any request goes out; it is a local diagnostic, not a
    /// server round-trip.
    pub fn save_outfit(&mut self, ctx: &egui::Context) {
        if self.call_rx.is_some() {
            return;
        }
        let Some(browser) = &self.browser else {
            return;
        };

        let selection = match browser.selection() {
            Ok(selection) => selection,
            Err(e) => {
                log::warn!("save blocked: {}", e);
                self.notice = Some(Notice::error(e.to_string()));
                return;
            }
        };

        let name = self.outfit_name.clone();
        let request = SaveOutfitRequest::from_selection(
            &selection,
            (!name.trim().is_empty()).then_some(name.as_str()),
        );

        self.spawn_call(ctx, move |api| {
            api.save_outfit(&request).map(|r| CallDone::Saved { message: r.message })
        });
    }

    pub fn delete_outfit(&mut self, outfit_id: String, ctx: &egui::Context) {
        if self.call_rx.is_some() {
            return;
        }
        self.spawn_call(ctx, move |api| {
            api.delete_outfit(&outfit_id).map(|_| CallDone::OutfitDeleted { outfit_id })
        });
    }

    // ── Clothing upload / delete ─────────────────────────────────────────────

    pub fn upload_clothing(&mut self, ctx: &egui::Context) {
        if self.call_rx.is_some() {
            return;
        }

        let path = std::path::PathBuf::from(self.upload_path.trim());
        let Some(filename) = path.file_name().and_then(|n| n.to_str()).map(str::to_string)
        else {
            self.notice = Some(Notice::error("Choose an image file to upload"));
            return;
        };
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.notice = Some(Notice::error(format!("Cannot read {}: {}", filename, e)));
                return;
            }
        };

        let category = self.upload_category;
        self.spawn_call(ctx, move |api| {
            api.upload_clothing(category, &filename, bytes).map(|r| CallDone::Uploaded {
                message: format!("Uploaded {} ({})", filename, r.item_id),
            })
        });
    }

    pub fn delete_clothing(&mut self, item_id: String, ctx: &egui::Context) {
        if self.call_rx.is_some() {
            return;
        }
        self.spawn_call(ctx, move |api| {
            api.delete_clothing(&item_id).map(|_| CallDone::ClothingDeleted { item_id })
        });
    }

    // ── Saved outfits ────────────────────────────────────────────────────────

    pub fn load_saved_outfits(&mut self, ctx: &egui::Context) {
        if self.loading_saved {
            return;
        }
        self.loading_saved = true;

        let (tx, rx) = mpsc::channel();
        self.saved_rx = Some(rx);

        let api = self.api.clone();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let _ = tx.send(api.fetch_saved_outfits());
            ctx.request_repaint();
        });
    }

    // ── Polling ──────────────────────────────────────────────────────────────

    /// Drain every async channel and fold results into app state. Called at
    /// the top of each frame.
    pub fn poll(&mut self, ctx: &egui::Context) {
        self.images.poll();

        if let Some(rx) = &self.catalog_rx {
            if let Ok(result) = rx.try_recv() {
                match result {
                    Ok(catalog) => {
                        log::debug!("catalog loaded: {} items", catalog.total_items());
                        self.browser = Some(OutfitBrowser::new(catalog));
                    }
                    Err(e) => {
                        self.notice = Some(Notice::error(format!("Failed to load wardrobe: {}", e)));
                    }
                }
                self.loading_catalog = false;
                self.catalog_rx = None;
            }
        }

        if let Some(rx) = &self.saved_rx {
            if let Ok(result) = rx.try_recv() {
                match result {
                    Ok(outfits) => self.saved = outfits,
                    Err(e) => {
                        self.notice = Some(Notice::error(format!("Failed to load outfits: {}", e)));
                    }
                }
                self.loading_saved = false;
                self.saved_rx = None;
            }
        }

        if let Some(rx) = &self.call_rx {
            if let Ok(result) = rx.try_recv() {
                self.call_rx = None;
                match result {
                    Ok(done) => self.apply_call(done, ctx),
                    Err(e) => self.notice = Some(Notice::error(e.to_string())),
                }
            }
        }
    }

    fn apply_call(&mut self, done: CallDone, ctx: &egui::Context) {
        match done {
            CallDone::Saved { message } => {
                self.outfit_name.clear();
                self.notice = Some(Notice::success(message));
            }
            CallDone::OutfitDeleted { outfit_id } => {
                // Mirror of the web UI removing the card from the grid.
                self.saved.retain(|o| o.id != outfit_id);
                self.notice = Some(Notice::success("Outfit deleted successfully"));
            }
            CallDone::ClothingDeleted { .. } => {
                self.notice = Some(Notice::success("Clothing item deleted"));
                // The wardrobe changed server-side; reload and reshuffle.
                self.start_load_catalog(ctx);
            }
            CallDone::Uploaded { message } => {
                self.upload_path.clear();
                self.notice = Some(Notice::success(message));
                self.start_load_catalog(ctx);
            }
        }
    }

    fn spawn_call<F>(&mut self, ctx: &egui::Context, call: F)
    where
        F: FnOnce(&ApiClient) -> Result<CallDone, ApiError> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        self.call_rx = Some(rx);

        let api = self.api.clone();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let _ = tx.send(call(&api));
            ctx.request_repaint();
        });
    }
}

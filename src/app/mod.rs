//! `OutfitApp` — the top-level egui application state.
//!
//! This module declares the `OutfitApp` struct and its `eframe::App` impl.
//! The methods are split across the sibling sub-modules:
//!
//! - `actions` — server call lifecycle (catalog load, save, delete, upload)
//! - `menu`    — top bar and hamburger navigation menu
//! - `content` — the generator, saved-outfits and upload views

pub mod actions;
pub mod content;
pub mod menu;

use std::collections::HashMap;
use std::sync::{mpsc, Arc};

use eframe::egui;

use outfit_browser::browser::OutfitBrowser;
use outfit_browser::catalog::{Catalog, Category};
use outfit_browser::net::api::{ApiClient, ApiError, SavedOutfit};
use outfit_browser::net::image::ImageStore;

use actions::CallDone;

// ─── Application state ───────────────────────────────────────────────────────

/// Which screen the hamburger menu has navigated to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Generator,
    SavedOutfits,
    Upload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient banner reporting the outcome of a core check or server call.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

pub struct OutfitApp {
    pub api: Arc<ApiClient>,
    pub view: View,
    pub menu_open: bool,
    /// Screen rect of the hamburger button, so a click on it does not count
    /// as a click outside the open menu.
    pub menu_button_rect: Option<egui::Rect>,
    // Wardrobe
    pub browser: Option<OutfitBrowser>,
    pub catalog_rx: Option<mpsc::Receiver<Result<Catalog, ApiError>>>,
    pub loading_catalog: bool,
    // In-flight collaborator call (one at a time)
    pub call_rx: Option<mpsc::Receiver<Result<CallDone, ApiError>>>,
    pub notice: Option<Notice>,
    // Saved outfits
    pub saved: Vec<SavedOutfit>,
    pub saved_rx: Option<mpsc::Receiver<Result<Vec<SavedOutfit>, ApiError>>>,
    pub loading_saved: bool,
    /// Outfit id awaiting delete confirmation.
    pub confirm_delete: Option<String>,
    // Save form
    pub outfit_name: String,
    // Upload form
    pub upload_category: Category,
    pub upload_path: String,
    // Images
    pub images: ImageStore,
    pub textures: HashMap<String, egui::TextureHandle>,
}

impl OutfitApp {
    pub fn new(server_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            api: Arc::new(ApiClient::new(server_url)?),
            view: View::Generator,
            menu_open: false,
            menu_button_rect: None,
            browser: None,
            catalog_rx: None,
            loading_catalog: false,
            call_rx: None,
            notice: None,
            saved: Vec::new(),
            saved_rx: None,
            loading_saved: false,
            confirm_delete: None,
            outfit_name: String::new(),
            upload_category: Category::Tops,
            upload_path: String::new(),
            images: ImageStore::new(),
            textures: HashMap::new(),
        })
    }
}

impl eframe::App for OutfitApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll(ctx);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            self.draw_top_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_content(ui, ctx);
        });

        // Drawn last so the popup overlays the content.
        self.draw_menu(ctx);
        self.draw_confirm_dialog(ctx);
    }
}

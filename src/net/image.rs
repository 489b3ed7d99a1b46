//! Background clothing-image fetcher.
//!
//! Catalog items carry server-relative image paths. The store resolves them
//! against the server base URL, downloads and decodes on background threads,
//! and hands RGBA buffers to the UI thread via polling — the egui layer turns
//! them into textures.

use std::collections::{HashMap, HashSet};
use std::sync::mpsc;

use url::Url;

/// Decoded RGBA pixels for one clothing image.
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Clothing photos never need more than this on screen; larger uploads get
/// downscaled after decode.
const MAX_WIDTH: u32 = 512;

/// Fetches and caches clothing images, keyed by their catalog `image_path`.
pub struct ImageStore {
    pending: HashMap<String, mpsc::Receiver<Option<ImageData>>>,
    loaded: HashMap<String, ImageData>,
    failed: HashSet<String>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
            loaded: HashMap::new(),
            failed: HashSet::new(),
        }
    }

    /// Kick off a background fetch for `image_path` unless it is already
    /// loaded, in flight, or known bad.
    pub fn request(&mut self, base: &Url, image_path: &str) {
        if self.loaded.contains_key(image_path)
            || self.pending.contains_key(image_path)
            || self.failed.contains(image_path)
        {
            return;
        }

        let url = match base.join(image_path) {
            Ok(url) => url,
            Err(e) => {
                log::warn!("unresolvable image path {}: {}", image_path, e);
                self.failed.insert(image_path.to_string());
                return;
            }
        };

        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let _ = tx.send(fetch_and_decode(url));
        });
        self.pending.insert(image_path.to_string(), rx);
    }

    /// Drain finished downloads. Call once per frame.
    pub fn poll(&mut self) {
        let mut done = Vec::new();
        for (path, rx) in &self.pending {
            if let Ok(result) = rx.try_recv() {
                match result {
                    Some(data) => {
                        self.loaded.insert(path.clone(), data);
                    }
                    None => {
                        self.failed.insert(path.clone());
                    }
                }
                done.push(path.clone());
            }
        }
        for path in done {
            self.pending.remove(&path);
        }
    }

    pub fn get(&self, image_path: &str) -> Option<&ImageData> {
        self.loaded.get(image_path)
    }

    pub fn is_failed(&self, image_path: &str) -> bool {
        self.failed.contains(image_path)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Default for ImageStore {
    fn default() -> Self {
        Self::new()
    }
}

fn fetch_and_decode(url: Url) -> Option<ImageData> {
    let response = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .ok()?
        .get(url.as_str())
        .send()
        .ok()?;

    if !response.status().is_success() {
        log::debug!("image fetch failed ({}): {}", response.status(), url);
        return None;
    }

    let bytes = response.bytes().ok()?;
    let rgba = image::load_from_memory(&bytes).ok()?.to_rgba8();
    let (w, h) = rgba.dimensions();

    let (width, height, pixels) = if w > MAX_WIDTH {
        let ratio = MAX_WIDTH as f32 / w as f32;
        let new_h = (h as f32 * ratio).max(1.0) as u32;
        let resized = image::imageops::resize(
            &rgba,
            MAX_WIDTH,
            new_h,
            image::imageops::FilterType::Triangle,
        );
        let (rw, rh) = resized.dimensions();
        (rw, rh, resized.into_raw())
    } else {
        (w, h, rgba.into_raw())
    };

    Some(ImageData {
        width,
        height,
        rgba: pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_deduplicate() {
        let base = Url::parse("http://127.0.0.1:5000/").unwrap();
        let mut store = ImageStore::new();
        store.request(&base, "static/images/t1.png");
        store.request(&base, "static/images/t1.png");
        assert_eq!(store.pending_count(), 1);
    }

    #[test]
    fn bad_path_is_marked_failed_without_a_thread() {
        // A path that cannot join against the base (base is opaque).
        let base = Url::parse("mailto:closet@example.com").unwrap();
        let mut store = ImageStore::new();
        store.request(&base, "static/images/t1.png");
        assert_eq!(store.pending_count(), 0);
        assert!(store.is_failed("static/images/t1.png"));
    }
}

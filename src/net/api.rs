//! Blocking HTTP client for the outfit server.
//!
//! Every call here is a collaborator contract: the client issues the request
//! and surfaces the outcome; it never mutates browser state itself. Calls are
//! made from background threads (see `app::actions`), so blocking is fine.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::browser::OutfitSelection;
use crate::catalog::{Catalog, Category, ClothingItem};

/// Image types the server accepts for clothing uploads.
const ALLOWED_UPLOAD_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Error from a server call. The message is what gets shown to the user,
/// so server-reported errors are carried through verbatim.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub message: String,
}

impl ApiError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

// ─── Payloads ────────────────────────────────────────────────────────────────

/// Body of a save-outfit request: the three picked ids plus an optional
/// user-supplied name (the server falls back to a generated one).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveOutfitRequest {
    pub top_id: String,
    pub bottom_id: String,
    pub footwear_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outfit_name: Option<String>,
}

impl SaveOutfitRequest {
    pub fn from_selection(selection: &OutfitSelection, name: Option<&str>) -> Self {
        Self {
            top_id: selection.top_id.clone(),
            bottom_id: selection.bottom_id.clone(),
            footwear_id: selection.footwear_id.clone(),
            outfit_name: name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveOutfitResponse {
    pub message: String,
    pub outfit_id: String,
}

/// One persisted outfit, with its items resolved by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedOutfit {
    pub id: String,
    pub outfit_name: String,
    pub top: ClothingItem,
    pub bottom: ClothingItem,
    pub footwear: ClothingItem,
}

#[derive(Debug, Clone, Deserialize)]
struct SavedOutfitsResponse {
    outfits: Vec<SavedOutfit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub item_id: String,
    pub image_path: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Client for the outfit server's JSON API.
///
/// The save endpoint path is configurable because deployed servers expose it
/// in two spellings; the default is the richer `/api/save-outfit` contract
/// that accepts a user-supplied name.
pub struct ApiClient {
    base: Url,
    save_path: String,
    client: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base = Url::parse(base_url)
            .map_err(|e| ApiError::new(format!("Invalid server URL: {}", e)))?;

        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("outfit-browser/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(15))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| ApiError::new(format!("Client error: {}", e)))?;

        Ok(Self {
            base,
            save_path: "api/save-outfit".to_string(),
            client,
        })
    }

    /// Override the save-outfit endpoint path.
    pub fn with_save_endpoint(mut self, path: &str) -> Self {
        self.save_path = path.trim_start_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::new(format!("Bad endpoint {}: {}", path, e)))
    }

    /// Fetch the full wardrobe, keyed by category.
    pub fn fetch_catalog(&self) -> Result<Catalog, ApiError> {
        let url = self.endpoint("api/wardrobe")?;
        let response = self.client.get(url).send().map_err(request_failed)?;
        read_json(response)
    }

    /// Persist the current selection. Requires all three ids; the browser's
    /// selection check guarantees that before this is ever called.
    pub fn save_outfit(&self, request: &SaveOutfitRequest) -> Result<SaveOutfitResponse, ApiError> {
        let url = self.endpoint(&self.save_path)?;
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .map_err(request_failed)?;
        read_json(response)
    }

    pub fn fetch_saved_outfits(&self) -> Result<Vec<SavedOutfit>, ApiError> {
        let url = self.endpoint("api/saved-outfits")?;
        let response = self.client.get(url).send().map_err(request_failed)?;
        let body: SavedOutfitsResponse = read_json(response)?;
        Ok(body.outfits)
    }

    pub fn delete_outfit(&self, outfit_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("delete-outfit/{}", outfit_id))?;
        let response = self.client.post(url).send().map_err(request_failed)?;
        check_status(response).map(|_| ())
    }

    pub fn delete_clothing(&self, item_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("api/delete-clothing/{}", item_id))?;
        let response = self.client.post(url).send().map_err(request_failed)?;
        check_status(response).map(|_| ())
    }

    /// Upload a clothing image (multipart). The extension gate mirrors the
    /// server's allow-list so bad files are rejected before any bytes move.
    pub fn upload_clothing(
        &self,
        category: Category,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse, ApiError> {
        if !allowed_upload(filename) {
            return Err(ApiError::new(format!(
                "Invalid file type: {} (allowed: png, jpg, jpeg)",
                filename
            )));
        }

        let part = reqwest::blocking::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("application/octet-stream")
            .map_err(|e| ApiError::new(format!("Bad upload payload: {}", e)))?;
        let form = reqwest::blocking::multipart::Form::new()
            .text("category", category.as_str())
            .part("image", part);

        let url = self.endpoint("api/upload-clothing")?;
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .map_err(request_failed)?;
        read_json(response)
    }
}

/// Is this filename an image type the server accepts?
pub fn allowed_upload(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(stem, ext)| {
            !stem.is_empty()
                && ALLOWED_UPLOAD_EXTENSIONS
                    .iter()
                    .any(|a| ext.eq_ignore_ascii_case(a))
        })
        .unwrap_or(false)
}

fn request_failed(e: reqwest::Error) -> ApiError {
    ApiError::new(format!("Request failed: {}", e))
}

/// Turn a non-2xx response into the server's own error message when the body
/// carries one (`{"error": ...}`), otherwise a generic status line.
fn check_status(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(ApiError::new(server_error_message(status.as_u16(), &body)))
}

fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::blocking::Response,
) -> Result<T, ApiError> {
    let response = check_status(response)?;
    response
        .json()
        .map_err(|e| ApiError::new(format!("Malformed server response: {}", e)))
}

/// Extract the user-facing message for a failed call.
fn server_error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(e) => e.error,
        Err(_) => format!("Server error (HTTP {})", status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_request_serializes_all_ids_and_name() {
        let selection = OutfitSelection {
            top_id: "t1".into(),
            bottom_id: "b1".into(),
            footwear_id: "f1".into(),
        };
        let request = SaveOutfitRequest::from_selection(&selection, Some("Friday fit"));
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["top_id"], "t1");
        assert_eq!(json["bottom_id"], "b1");
        assert_eq!(json["footwear_id"], "f1");
        assert_eq!(json["outfit_name"], "Friday fit");
    }

    #[test]
    fn blank_outfit_name_is_omitted() {
        let selection = OutfitSelection {
            top_id: "t1".into(),
            bottom_id: "b1".into(),
            footwear_id: "f1".into(),
        };
        let request = SaveOutfitRequest::from_selection(&selection, Some("   "));
        assert_eq!(request.outfit_name, None);

        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("outfit_name"));
    }

    #[test]
    fn upload_extension_allow_list() {
        assert!(allowed_upload("shirt.png"));
        assert!(allowed_upload("shirt.JPG"));
        assert!(allowed_upload("my.shirt.jpeg"));
        assert!(!allowed_upload("shirt.gif"));
        assert!(!allowed_upload("shirt"));
        assert!(!allowed_upload(".png"));
    }

    #[test]
    fn server_error_body_is_surfaced_verbatim() {
        let msg = server_error_message(400, r#"{"error": "Please select all clothing items before saving"}"#);
        assert_eq!(msg, "Please select all clothing items before saving");

        let msg = server_error_message(502, "<html>bad gateway</html>");
        assert_eq!(msg, "Server error (HTTP 502)");
    }

    #[test]
    fn endpoints_join_against_the_base_url() {
        let client = ApiClient::new("http://127.0.0.1:5000/").unwrap();
        assert_eq!(
            client.endpoint("api/wardrobe").unwrap().as_str(),
            "http://127.0.0.1:5000/api/wardrobe"
        );
        assert_eq!(
            client.endpoint("delete-outfit/abc123").unwrap().as_str(),
            "http://127.0.0.1:5000/delete-outfit/abc123"
        );
    }

    #[test]
    fn save_endpoint_is_configurable() {
        let client = ApiClient::new("http://127.0.0.1:5000/")
            .unwrap()
            .with_save_endpoint("/save-outfit");
        assert_eq!(client.save_path, "save-outfit");
    }
}

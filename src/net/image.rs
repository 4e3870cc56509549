//! Asynchronous image fetcher for the gallery preview.
//!
//! Spawns background threads to download images and decode them into RGBA
//! pixel buffers ready for egui texture creation. Each failure is recorded
//! per URL so the gallery can report individual items without aborting the
//! batch.

use std::collections::HashMap;
use std::sync::mpsc;

/// Decoded image data (RGBA).
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Manages background image fetching and decoding.
pub struct ImageLoader {
    pending: HashMap<String, mpsc::Receiver<Result<ImageData, String>>>,
    loaded: HashMap<String, ImageData>,
    failed: HashMap<String, String>,
}

impl ImageLoader {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
            loaded: HashMap::new(),
            failed: HashMap::new(),
        }
    }

    /// Request an image to be fetched in the background.
    pub fn request(&mut self, url: &str) {
        if self.loaded.contains_key(url)
            || self.pending.contains_key(url)
            || self.failed.contains_key(url)
        {
            return;
        }

        let (tx, rx) = mpsc::channel();
        let url_owned = url.to_string();

        std::thread::spawn(move || {
            let result = fetch_and_decode(&url_owned);
            if let Err(ref e) = result {
                log::warn!("image load failed: {}: {}", url_owned, e);
            }
            let _ = tx.send(result);
        });

        self.pending.insert(url.to_string(), rx);
    }

    /// Poll for completed downloads. Call every frame.
    pub fn poll(&mut self) {
        let mut completed = Vec::new();
        for (url, rx) in &self.pending {
            if let Ok(result) = rx.try_recv() {
                match result {
                    Ok(data) => {
                        self.loaded.insert(url.clone(), data);
                    }
                    Err(message) => {
                        self.failed.insert(url.clone(), message);
                    }
                }
                completed.push(url.clone());
            }
        }
        for url in completed {
            self.pending.remove(&url);
        }
    }

    /// Get a loaded image's data.
    pub fn get(&self, url: &str) -> Option<&ImageData> {
        self.loaded.get(url)
    }

    /// Failure message for a URL, if its load failed.
    pub fn error(&self, url: &str) -> Option<&str> {
        self.failed.get(url).map(|s| s.as_str())
    }

    /// Get all loaded image URLs.
    pub fn loaded_urls(&self) -> Vec<String> {
        self.loaded.keys().cloned().collect()
    }

    /// Number of successfully loaded images.
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    /// Number of images still being fetched.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn fetch_and_decode(url: &str) -> Result<ImageData, String> {
    let resp = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .map_err(|e| format!("client error: {}", e))?
        .get(url)
        .send()
        .map_err(|e| format!("request failed: {}", e))?;

    if !resp.status().is_success() {
        return Err(format!("HTTP {}", resp.status().as_u16()));
    }

    let bytes = resp.bytes().map_err(|e| format!("read failed: {}", e))?;
    let img = image::load_from_memory(&bytes).map_err(|e| format!("decode failed: {}", e))?;
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();

    // Cap to reasonable size (max 800px wide for the gallery)
    let (w, h, pixels) = if w > 800 {
        let ratio = 800.0 / w as f32;
        let new_h = (h as f32 * ratio) as u32;
        let resized =
            image::imageops::resize(&rgba, 800, new_h, image::imageops::FilterType::Triangle);
        let (rw, rh) = resized.dimensions();
        (rw, rh, resized.into_raw())
    } else {
        (w, h, rgba.into_raw())
    };

    Ok(ImageData {
        width: w,
        height: h,
        rgba: pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_deduplicates() {
        let mut loader = ImageLoader::new();
        loader.request("https://example.com/img.png");
        loader.request("https://example.com/img.png"); // should not duplicate
        assert_eq!(loader.pending.len(), 1);
    }
}

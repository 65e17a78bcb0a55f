use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Origin of the resizing image proxy.
pub const IMGPROXY_ORIGIN: &str = "https://images.data.spotlightpa.org";

/// Resize parameters for [`image_proxy_url`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImgproxyOptions {
    pub width: u32,
    pub height: u32,
    pub extension: String,
    /// Focal-point hint; empty means smart gravity (`sm`).
    pub gravity: String,
    /// Output quality; zero leaves the proxy default.
    pub quality: u32,
}

impl Default for ImgproxyOptions {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            extension: "jpeg".to_string(),
            gravity: String::new(),
            quality: 75,
        }
    }
}

/// Builds an unsigned image proxy URL for a stored file path.
pub fn image_proxy_url(filepath: &str, options: &ImgproxyOptions) -> String {
    if filepath.is_empty() {
        return String::new();
    }
    let gravity = if options.gravity.is_empty() {
        "sm"
    } else {
        options.gravity.as_str()
    };
    let quality = if options.quality > 0 {
        format!("/q:{}", options.quality)
    } else {
        String::new()
    };
    format!(
        "{IMGPROXY_ORIGIN}/insecure/rt:fill/w:{w}/h:{h}/g:{gravity}/el:1{quality}/{src}.{ext}",
        w = options.width,
        h = options.height,
        src = STANDARD.encode(filepath),
        ext = options.extension,
    )
}

/// Path on the console API that proxies a remote wire image.
pub fn proxy_image_path(src_url: &str) -> String {
    format!("/api/proxy-image/{}", STANDARD.encode(src_url))
}

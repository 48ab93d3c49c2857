use std::path::PathBuf;

use prism_engine::paint::Color;
use prism_engine::window::RedrawMode;

/// Overrides the asset directory.
pub const ASSET_DIR_ENV: &str = "PRISM_ASSET_DIR";
/// Path to a TrueType/OpenType font used instead of the bundled or system one.
pub const FONT_ENV: &str = "PRISM_FONT";

/// Everything the gallery needs before the window opens.
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    pub title: String,
    /// Logical pixels.
    pub initial_size: (f64, f64),
    pub asset_dir: PathBuf,
    pub font_path: Option<PathBuf>,
    pub redraw_mode: RedrawMode,
    /// Logical pixels.
    pub sidebar_width: f32,
    pub clear_color: Color,
    /// Seeds the random sample data; `None` draws a fresh seed per run.
    pub seed: Option<u64>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            title: "Prism Gallery".to_string(),
            initial_size: (1440.0, 960.0),
            asset_dir: PathBuf::from("assets"),
            font_path: None,
            redraw_mode: RedrawMode::OnDemand,
            sidebar_width: 220.0,
            clear_color: Color::DARK_BACKGROUND,
            seed: None,
        }
    }
}

impl GalleryConfig {
    /// Applies `PRISM_ASSET_DIR` and `PRISM_FONT` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup` (called with the variable names above).
    /// Empty values are ignored.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = get(ASSET_DIR_ENV) {
            log::debug!("{ASSET_DIR_ENV}={dir}");
            self.asset_dir = PathBuf::from(dir);
        }
        if let Some(font) = get(FONT_ENV) {
            log::debug!("{FONT_ENV}={font}");
            self.font_path = Some(PathBuf::from(font));
        }
        self
    }
}

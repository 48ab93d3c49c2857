//! Loading of the gallery's bundled files.

use std::path::{Path, PathBuf};

use prism_engine::render::ImageData;
use thiserror::Error;

/// Image shown by the Images demo.
pub const SUNSETS_IMAGE: &str = "sunsets.png";
/// Text shown by the Text demo.
pub const SCRIPT_TEXT: &str = "script.txt";

const SYSTEM_FONTS: &[&str] = &[
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image {} is {width}x{height}, which has no pixels", .path.display())]
    EmptyImage { path: PathBuf, width: u32, height: u32 },

    #[error("{} is not valid UTF-8", .path.display())]
    NotUtf8 { path: PathBuf },

    #[error("no usable font found (searched {})", .searched.len())]
    NoFont { searched: Vec<PathBuf> },
}

/// Font file contents together with where they came from.
#[derive(Debug, Clone)]
pub struct FontFile {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// Asset directory handle.
#[derive(Debug, Clone)]
pub struct Assets {
    dir: PathBuf,
}

impl Assets {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub fn read(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        read_file(&self.path(name))
    }

    /// Decodes `name` into premultiplied RGBA8.
    pub fn load_image(&self, name: &str) -> Result<ImageData, AssetError> {
        let path = self.path(name);
        let bytes = read_file(&path)?;
        let image = decode_image(&bytes, &path)?;
        log::debug!("loaded {} ({}x{})", path.display(), image.width, image.height);
        Ok(image)
    }

    pub fn load_text(&self, name: &str) -> Result<String, AssetError> {
        let path = self.path(name);
        let bytes = read_file(&path)?;
        String::from_utf8(bytes).map_err(|_| AssetError::NotUtf8 { path })
    }

    /// Finds a font: `explicit` if given, else the first `*.ttf`/`*.otf` in
    /// `fonts/` (sorted by name), else a known system font.
    pub fn load_font(&self, explicit: Option<&Path>) -> Result<FontFile, AssetError> {
        if let Some(path) = explicit {
            let bytes = read_file(path)?;
            return Ok(FontFile { path: path.to_path_buf(), bytes });
        }

        let candidates = self.font_candidates();
        for path in &candidates {
            if let Ok(bytes) = std::fs::read(path) {
                log::info!("using font {}", path.display());
                return Ok(FontFile { path: path.clone(), bytes });
            }
        }
        Err(AssetError::NoFont { searched: candidates })
    }

    fn font_candidates(&self) -> Vec<PathBuf> {
        let mut bundled: Vec<PathBuf> = std::fs::read_dir(self.dir.join("fonts"))
            .into_iter()
            .flatten()
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| is_font_file(p))
            .collect();
        bundled.sort();
        bundled.extend(SYSTEM_FONTS.iter().map(PathBuf::from));
        bundled
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, AssetError> {
    std::fs::read(path).map_err(|source| AssetError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("ttf") || e.eq_ignore_ascii_case("otf"))
}

/// Decodes an encoded image (`path` is only used for errors) and
/// premultiplies it.
pub fn decode_image(bytes: &[u8], path: &Path) -> Result<ImageData, AssetError> {
    let rgba = image::load_from_memory(bytes)
        .map_err(|source| AssetError::Decode { path: path.to_path_buf(), source })?
        .into_rgba8();

    let (width, height) = rgba.dimensions();
    ImageData::from_straight(width, height, rgba.into_raw())
        .filter(|img| !img.is_empty())
        .ok_or_else(|| AssetError::EmptyImage { path: path.to_path_buf(), width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("prism-assets-{tag}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn png_bytes(width: u32, height: u32, pixels: Vec<u8>) -> Vec<u8> {
        let img = image::RgbaImage::from_raw(width, height, pixels).unwrap();
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    // ── images ────────────────────────────────────────────────────────────

    #[test]
    fn decoded_images_are_premultiplied() {
        let bytes = png_bytes(2, 1, vec![255, 0, 0, 255, 200, 100, 50, 128]);
        let img = decode_image(&bytes, Path::new("mem.png")).unwrap();
        assert_eq!((img.width, img.height), (2, 1));
        assert_eq!(&img.pixels[..4], &[255, 0, 0, 255]);
        assert_eq!(&img.pixels[4..], &[100, 50, 25, 128]);
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = decode_image(b"not a png", Path::new("bad.png")).unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
        assert!(err.to_string().contains("bad.png"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let assets = Assets::new(temp_dir("missing"));
        let err = assets.load_image(SUNSETS_IMAGE).unwrap_err();
        assert!(matches!(err, AssetError::Read { .. }));
    }

    // ── text ──────────────────────────────────────────────────────────────

    #[test]
    fn text_loads_and_rejects_invalid_utf8() {
        let dir = temp_dir("text");
        std::fs::write(dir.join("ok.txt"), "INT. SPACESHIP\n").unwrap();
        std::fs::write(dir.join("bad.txt"), [0xff, 0xfe, 0x00]).unwrap();
        let assets = Assets::new(&dir);

        assert_eq!(assets.load_text("ok.txt").unwrap(), "INT. SPACESHIP\n");
        assert!(matches!(assets.load_text("bad.txt"), Err(AssetError::NotUtf8 { .. })));
    }

    // ── fonts ─────────────────────────────────────────────────────────────

    #[test]
    fn bundled_fonts_come_first_in_name_order() {
        let dir = temp_dir("fonts");
        std::fs::create_dir_all(dir.join("fonts")).unwrap();
        std::fs::write(dir.join("fonts/b.ttf"), b"b").unwrap();
        std::fs::write(dir.join("fonts/a.OTF"), b"a").unwrap();
        std::fs::write(dir.join("fonts/readme.txt"), b"-").unwrap();
        let assets = Assets::new(&dir);

        let candidates = assets.font_candidates();
        assert_eq!(candidates[0], dir.join("fonts/a.OTF"));
        assert_eq!(candidates[1], dir.join("fonts/b.ttf"));
        assert_eq!(candidates.len(), 2 + SYSTEM_FONTS.len());

        let font = assets.load_font(None).unwrap();
        assert_eq!(font.bytes, b"a");
    }

    #[test]
    fn explicit_font_must_exist() {
        let assets = Assets::new(temp_dir("explicit"));
        let err = assets.load_font(Some(Path::new("/nonexistent/font.ttf"))).unwrap_err();
        assert!(matches!(err, AssetError::Read { .. }));
    }
}

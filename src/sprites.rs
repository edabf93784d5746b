use std::path::{Path, PathBuf};
use std::sync::Arc;

use glam::UVec2;
use image::imageops::FilterType;
use image::RgbaImage;

use crate::error::{PetError, Result};

/// Animation categories, each backed by one folder under `sprites/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SpriteCategory {
    Idle = 0,
    Walk = 1,
    Headpat = 2,
    Surf = 3,
    Hover = 4,
}

impl SpriteCategory {
    pub const ALL: [SpriteCategory; 5] = [
        Self::Idle,
        Self::Walk,
        Self::Headpat,
        Self::Surf,
        Self::Hover,
    ];

    /// Folder name below the sprite root.
    pub fn folder(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walk => "walk",
            Self::Headpat => "headpat",
            Self::Surf => "surf",
            Self::Hover => "hover",
        }
    }
}

/// Ordered frames of one animation. Cheap to clone; fallbacks share frames.
#[derive(Debug, Clone)]
pub struct SpriteSet {
    frames: Arc<[RgbaImage]>,
}

impl SpriteSet {
    pub fn new(frames: Vec<RgbaImage>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[RgbaImage] {
        &self.frames
    }

    /// Index of the frame shown for `counter`. `None` only for an empty set.
    pub fn frame_index(&self, counter: u64) -> Option<usize> {
        frame_index(counter, self.len())
    }

    /// True if both sets share the same frame storage.
    pub fn shares_frames_with(&self, other: &SpriteSet) -> bool {
        Arc::ptr_eq(&self.frames, &other.frames)
    }
}

/// Wrap a monotonic counter into `0..len`.
pub fn frame_index(counter: u64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some((counter % len as u64) as usize)
}

/// Directory holding the category folders: `sprites/` next to the executable,
/// or under the working directory when the executable path is unknown.
pub fn sprite_root() -> PathBuf {
    let base = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("sprites")
}

/// Load every PNG in `dir`, sorted by file name, resized to `size`.
///
/// Never fails: a missing folder or an undecodable file is logged and
/// skipped, so the result may be empty.
pub fn load_sprites(dir: &Path, size: UVec2) -> Vec<RgbaImage> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Missing sprite folder {}: {e}", dir.display());
            return Vec::new();
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_png(path))
        .collect();
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut frames = Vec::with_capacity(paths.len());
    for path in &paths {
        match decode_frame(path, size) {
            Ok(frame) => frames.push(frame),
            Err(e) => log::warn!("Error loading {}: {e}", path.display()),
        }
    }

    log::info!("Loaded {} sprites from {}", frames.len(), dir.display());
    frames
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

fn decode_frame(path: &Path, size: UVec2) -> std::result::Result<RgbaImage, image::ImageError> {
    let img = image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?
        .to_rgba8();
    Ok(image::imageops::resize(
        &img,
        size.x,
        size.y,
        FilterType::Lanczos3,
    ))
}

/// All five animations of a pet, with empty categories already replaced by idle.
#[derive(Debug, Clone)]
pub struct SpriteLibrary {
    sets: [SpriteSet; 5],
}

impl SpriteLibrary {
    /// Load every category from `root/<category>`.
    pub fn load(root: &Path, size: UVec2) -> Result<Self> {
        let loaded = SpriteCategory::ALL.map(|cat| load_sprites(&root.join(cat.folder()), size));
        Self::from_frames(loaded, &root.join(SpriteCategory::Idle.folder()))
    }

    /// Build from already-decoded frames, ordered like `SpriteCategory::ALL`.
    /// `idle_dir` only feeds the error message.
    pub fn from_frames(frames: [Vec<RgbaImage>; 5], idle_dir: &Path) -> Result<Self> {
        let [idle, walk, headpat, surf, hover] = frames;
        if idle.is_empty() {
            return Err(PetError::NoIdleSprites(idle_dir.to_path_buf()));
        }
        let idle = SpriteSet::new(idle);

        let or_idle = |frames: Vec<RgbaImage>, cat: SpriteCategory| {
            if frames.is_empty() {
                log::warn!("No {} sprites, falling back to idle", cat.folder());
                idle.clone()
            } else {
                SpriteSet::new(frames)
            }
        };

        let walk = or_idle(walk, SpriteCategory::Walk);
        let headpat = or_idle(headpat, SpriteCategory::Headpat);
        let surf = or_idle(surf, SpriteCategory::Surf);
        let hover = or_idle(hover, SpriteCategory::Hover);

        Ok(Self {
            sets: [idle, walk, headpat, surf, hover],
        })
    }

    pub fn get(&self, category: SpriteCategory) -> &SpriteSet {
        &self.sets[category as usize]
    }

    /// Resolve the set to draw, falling back to idle if it is somehow empty.
    pub fn resolve(&self, category: SpriteCategory) -> (SpriteCategory, &SpriteSet) {
        let set = self.get(category);
        if set.is_empty() {
            (SpriteCategory::Idle, self.get(SpriteCategory::Idle))
        } else {
            (category, set)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const SIZE: UVec2 = UVec2::new(80, 80);

    fn solid(w: u32, h: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba(color))
    }

    fn write_png(dir: &Path, name: &str, color: [u8; 4]) {
        solid(16, 24, color).save(dir.join(name)).unwrap();
    }

    #[test]
    fn test_frame_index_wraps() {
        assert_eq!(frame_index(0, 3), Some(0));
        assert_eq!(frame_index(4, 3), Some(1));
        assert_eq!(frame_index(u64::MAX, 1), Some(0));
        assert_eq!(frame_index(7, 0), None);
    }

    #[test]
    fn test_missing_folder_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let frames = load_sprites(&tmp.path().join("nope"), SIZE);
        assert!(frames.is_empty());
    }

    #[test]
    fn test_loads_sorted_and_resized() {
        let tmp = tempfile::tempdir().unwrap();
        write_png(tmp.path(), "b.png", [0, 255, 0, 255]);
        write_png(tmp.path(), "a.png", [255, 0, 0, 255]);
        write_png(tmp.path(), "c.PNG", [0, 0, 255, 255]);
        std::fs::write(tmp.path().join("notes.txt"), "not a sprite").unwrap();

        let frames = load_sprites(tmp.path(), SIZE);
        assert_eq!(frames.len(), 3);
        for frame in &frames {
            assert_eq!(frame.dimensions(), (80, 80));
        }
        assert_eq!(frames[0].get_pixel(40, 40).0, [255, 0, 0, 255]);
        assert_eq!(frames[1].get_pixel(40, 40).0, [0, 255, 0, 255]);
        assert_eq!(frames[2].get_pixel(40, 40).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_corrupt_file_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        write_png(tmp.path(), "1.png", [10, 20, 30, 255]);
        std::fs::write(tmp.path().join("2.png"), b"definitely not png").unwrap();
        write_png(tmp.path(), "3.png", [40, 50, 60, 255]);

        let frames = load_sprites(tmp.path(), SIZE);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].get_pixel(40, 40).0, [40, 50, 60, 255]);
    }

    #[test]
    fn test_library_requires_idle() {
        let frames = [vec![], vec![solid(80, 80, [1, 1, 1, 255])], vec![], vec![], vec![]];
        let err = SpriteLibrary::from_frames(frames, Path::new("sprites/idle")).unwrap_err();
        assert!(matches!(err, PetError::NoIdleSprites(_)));
        assert!(err.to_string().contains("sprites/idle"));
    }

    #[test]
    fn test_empty_categories_fall_back_to_idle() {
        let idle = vec![solid(80, 80, [1, 2, 3, 255]), solid(80, 80, [4, 5, 6, 255])];
        let walk = vec![solid(80, 80, [9, 9, 9, 255])];
        let lib = SpriteLibrary::from_frames(
            [idle.clone(), walk, vec![], vec![], vec![]],
            Path::new("idle"),
        )
        .unwrap();

        let idle_set = lib.get(SpriteCategory::Idle);
        for cat in [SpriteCategory::Headpat, SpriteCategory::Surf, SpriteCategory::Hover] {
            let set = lib.get(cat);
            assert!(set.shares_frames_with(idle_set));
            assert_eq!(set.frames(), idle.as_slice());
        }
        assert_eq!(lib.get(SpriteCategory::Walk).len(), 1);
        assert!(!lib.get(SpriteCategory::Walk).shares_frames_with(idle_set));
    }

    #[test]
    fn test_library_load_from_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let idle_dir = tmp.path().join("idle");
        let surf_dir = tmp.path().join("surf");
        std::fs::create_dir_all(&idle_dir).unwrap();
        std::fs::create_dir_all(&surf_dir).unwrap();
        write_png(&idle_dir, "0.png", [200, 0, 0, 255]);
        write_png(&surf_dir, "0.png", [0, 200, 0, 255]);
        write_png(&surf_dir, "1.png", [0, 0, 200, 255]);

        let lib = SpriteLibrary::load(tmp.path(), SIZE).unwrap();
        assert_eq!(lib.get(SpriteCategory::Idle).len(), 1);
        assert_eq!(lib.get(SpriteCategory::Surf).len(), 2);
        assert_eq!(lib.resolve(SpriteCategory::Walk).1.len(), 1);
    }

    #[test]
    fn test_library_load_without_idle_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let err = SpriteLibrary::load(tmp.path(), SIZE).unwrap_err();
        assert!(matches!(err, PetError::NoIdleSprites(p) if p.ends_with("idle")));
    }
}

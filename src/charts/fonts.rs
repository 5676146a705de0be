use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use ab_glyph::FontRef;
use plotters::style::{register_font, FontStyle};

pub(crate) const LABEL_FONT_FAMILY: &str = "sans-serif";

const SYSTEM_FONT_CANDIDATES: [&str; 8] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static LABEL_FONT: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Registers the label font once per process and reports whether text can be
/// drawn. The first call decides which file is used; a different `preferred`
/// font on a later call is reported and ignored.
pub(crate) fn ensure_label_font(preferred: Option<&Path>) -> bool {
    let chosen = LABEL_FONT.get_or_init(|| register_first_usable(preferred));

    if let Some(requested) = preferred {
        match chosen {
            Some(path) if path == requested => {}
            Some(path) => log::warn!(
                "Chart labels already use {}, ignoring font {}",
                path.display(),
                requested.display()
            ),
            None => log::warn!(
                "Charts were already set up without a usable font, ignoring font {}",
                requested.display()
            ),
        }
    }

    chosen.is_some()
}

fn register_first_usable(preferred: Option<&Path>) -> Option<PathBuf> {
    let candidates = preferred
        .map(Path::to_path_buf)
        .into_iter()
        .chain(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from));

    for candidate in candidates {
        let is_preferred = Some(candidate.as_path()) == preferred;
        let bytes = match load_font(&candidate, is_preferred) {
            Some(bytes) => bytes,
            None => continue,
        };

        // plotters keeps registered fonts for the life of the process. Only
        // bytes that already parsed as a font get here.
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        match register_font(LABEL_FONT_FAMILY, FontStyle::Normal, bytes) {
            Ok(()) => {
                log::debug!("Using {} for chart labels", candidate.display());
                return Some(candidate);
            }
            Err(_) => log::warn!("Could not register font {}", candidate.display()),
        }
    }

    None
}

/// Reads a font file and keeps it only if it parses as TrueType/OpenType.
/// Missing system candidates are expected and not logged.
fn load_font(path: &Path, is_preferred: bool) -> Option<Vec<u8>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            if is_preferred {
                log::warn!("Could not read font {}: {}", path.display(), e);
            }
            return None;
        }
    };

    if FontRef::try_from_slice(&bytes).is_err() {
        log::warn!("Ignoring unusable font {}", path.display());
        return None;
    }

    Some(bytes)
}

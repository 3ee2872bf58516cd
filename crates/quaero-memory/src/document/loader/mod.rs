mod pdf;
mod text;

pub use pdf::PdfLoader;
pub use text::TextLoader;

use std::path::Path;

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

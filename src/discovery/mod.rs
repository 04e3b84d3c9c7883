mod manifest_locator;

pub use manifest_locator::{ManifestLocator, MANIFEST_FILE_DEPTH, MANIFEST_FILE_NAME};

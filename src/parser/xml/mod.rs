mod manifest;

pub use manifest::ManifestParser;

/// An `<activity>` declaration as written in a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestActivity {
    /// Raw `android:name` value, possibly relative (`.MainActivity`)
    pub raw_class: String,

    /// False when the activity opts out with `addressable` meta-data
    pub addressable: bool,
}

impl ManifestActivity {
    pub fn new(raw_class: impl Into<String>) -> Self {
        Self {
            raw_class: raw_class.into(),
            addressable: true,
        }
    }
}

/// Result of parsing an AndroidManifest.xml file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ManifestInfo {
    /// `package` attribute of the root `<manifest>` element
    pub package: Option<String>,

    /// Activities in document order
    pub activities: Vec<ManifestActivity>,
}

impl ManifestInfo {
    pub fn new() -> Self {
        Self::default()
    }
}

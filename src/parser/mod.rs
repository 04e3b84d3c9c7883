pub mod xml;

pub use xml::{ManifestActivity, ManifestInfo, ManifestParser};

use super::{ManifestActivity, ManifestInfo};
use crate::error::{QuadrantError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;
use tracing::debug;

/// Meta-data key an activity uses to opt out of constant generation
const ADDRESSABLE_META_DATA: &str = "addressable";

/// Parser for AndroidManifest.xml files
pub struct ManifestParser;

/// Activity currently open in the document
struct OpenActivity {
    raw_class: Option<String>,
    addressable: bool,
    depth: usize,
}

impl ManifestParser {
    pub fn new() -> Self {
        Self
    }

    /// Read and parse a manifest from disk
    pub fn parse_file(&self, path: &Path) -> Result<ManifestInfo> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| QuadrantError::io(path, e))?;
        self.parse(path, &contents)
    }

    /// Parse an AndroidManifest.xml document and extract its activities.
    ///
    /// Anything short of a well-formed document is a [`QuadrantError::Parse`].
    pub fn parse(&self, path: &Path, contents: &str) -> Result<ManifestInfo> {
        let contents = contents.trim_start_matches('\u{feff}');
        let mut result = ManifestInfo::new();
        let mut reader = Reader::from_str(contents);
        reader.trim_text(true);

        let fail = |position: usize, message: String| QuadrantError::Parse {
            path: path.to_path_buf(),
            message: format!("line {}: {}", line_of(contents, position), message),
        };

        let mut depth = 0usize;
        let mut roots = 0usize;
        let mut open: Option<OpenActivity> = None;

        loop {
            let position = reader.buffer_position();
            let event = reader
                .read_event()
                .map_err(|e| fail(reader.buffer_position(), e.to_string()))?;

            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let is_empty = matches!(event, Event::Empty(_));
                    if depth == 0 {
                        roots += 1;
                        if roots > 1 {
                            return Err(fail(position, "multiple root elements".to_string()));
                        }
                    }

                    match e.name().as_ref() {
                        b"manifest" if depth == 0 => {
                            result.package = attribute(e, |key| key == b"package")
                                .map_err(|m| fail(position, m))?;
                        }
                        b"activity" => {
                            let raw_class =
                                attribute(e, is_name_key).map_err(|m| fail(position, m))?;
                            open = Some(OpenActivity {
                                raw_class,
                                addressable: true,
                                depth,
                            });
                        }
                        b"meta-data" => {
                            if let Some(activity) = open.as_mut() {
                                let name = attribute(e, is_name_key).map_err(|m| fail(position, m))?;
                                if name.as_deref() == Some(ADDRESSABLE_META_DATA) {
                                    let value = attribute(e, is_value_key)
                                        .map_err(|m| fail(position, m))?;
                                    if value.is_some_and(|v| v.trim().eq_ignore_ascii_case("false")) {
                                        activity.addressable = false;
                                    }
                                }
                            }
                        }
                        _ => {}
                    }

                    if is_empty {
                        close_activity(&mut open, depth, &mut result);
                    } else {
                        depth += 1;
                    }
                }
                Event::End(_) => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| fail(position, "unexpected closing tag".to_string()))?;
                    close_activity(&mut open, depth, &mut result);
                }
                Event::Text(_) | Event::CData(_) if depth == 0 => {
                    return Err(fail(position, "text outside the root element".to_string()));
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if depth != 0 {
            return Err(fail(
                contents.len(),
                format!("unexpected end of document, {} element(s) left open", depth),
            ));
        }
        if roots == 0 {
            return Err(fail(contents.len(), "no root element".to_string()));
        }

        debug!(
            "Parsed manifest {}: package {:?}, {} activities",
            path.display(),
            result.package,
            result.activities.len()
        );

        Ok(result)
    }
}

impl Default for ManifestParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Finish the open activity if it was opened at `depth`
fn close_activity(open: &mut Option<OpenActivity>, depth: usize, result: &mut ManifestInfo) {
    if open.as_ref().is_some_and(|a| a.depth == depth) {
        if let Some(activity) = open.take() {
            // Activities without a class name are not declarations we can address
            if let Some(raw_class) = activity.raw_class {
                result.activities.push(ManifestActivity {
                    raw_class,
                    addressable: activity.addressable,
                });
            }
        }
    }
}

/// First attribute whose key satisfies `matches`, unescaped
fn attribute(
    element: &BytesStart<'_>,
    matches: impl Fn(&[u8]) -> bool,
) -> std::result::Result<Option<String>, String> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        if matches(attr.key.as_ref()) {
            let value = attr.unescape_value().map_err(|e| e.to_string())?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// `android:name`, or `name` under whatever prefix the android namespace was bound to
fn is_name_key(key: &[u8]) -> bool {
    key == b"android:name" || prefixed_local_name(key) == Some(b"name".as_slice())
}

fn is_value_key(key: &[u8]) -> bool {
    key == b"android:value" || prefixed_local_name(key) == Some(b"value".as_slice())
}

fn prefixed_local_name(key: &[u8]) -> Option<&[u8]> {
    let colon = key.iter().position(|&b| b == b':')?;
    Some(&key[colon + 1..])
}

fn line_of(contents: &str, position: usize) -> usize {
    let end = position.min(contents.len());
    contents.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

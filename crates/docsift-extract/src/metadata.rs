//! Container metadata extraction (`docProps/core.xml`).

use docsift_core::{CoreProperties, MetadataError};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::Read as _;
use std::path::Path;
use zip::ZipArchive;

/// The metadata part every OOXML container carries.
const CORE_ENTRY: &str = "docProps/core.xml";

/// Read core properties out of the container at `path`.
///
/// The file is re-opened by path and treated strictly as a ZIP archive.
/// An archive without a `docProps/core.xml` entry yields default (empty)
/// properties; a broken archive or malformed XML is an error.
pub fn read_core_properties(path: &Path) -> Result<CoreProperties, MetadataError> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file).map_err(|e| MetadataError::NotZip(e.to_string()))?;

    let has_entry = archive.file_names().any(|name| name == CORE_ENTRY);
    if !has_entry {
        return Ok(CoreProperties::default());
    }

    let mut xml = String::new();
    archive
        .by_name(CORE_ENTRY)
        .map_err(|e| MetadataError::Entry {
            entry: CORE_ENTRY.to_string(),
            reason: e.to_string(),
        })?
        .read_to_string(&mut xml)
        .map_err(|e| MetadataError::Entry {
            entry: CORE_ENTRY.to_string(),
            reason: e.to_string(),
        })?;

    parse_core_xml(&xml)
}

/// Decode the core-properties XML into its fixed schema.
///
/// Elements are matched by local name, so both `dc:title` and
/// `cp:lastModifiedBy` resolve regardless of prefix.
fn parse_core_xml(xml: &str) -> Result<CoreProperties, MetadataError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut props = CoreProperties::default();
    let mut current: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                current = Some(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Ok(Event::Text(e)) => {
                if let Some(field) = current.as_deref() {
                    let text = e
                        .unescape()
                        .map_err(|err| MetadataError::Xml(err.to_string()))?
                        .into_owned();
                    assign_field(&mut props, field, text);
                }
            }
            Ok(Event::End(_)) => current = None,
            Ok(Event::Eof) => break,
            Err(err) => return Err(MetadataError::Xml(err.to_string())),
            Ok(_) => {}
        }
    }
    Ok(props)
}

fn assign_field(props: &mut CoreProperties, field: &str, value: String) {
    match field {
        "title" => props.title = Some(value),
        "subject" => props.subject = Some(value),
        "creator" => props.creator = Some(value),
        "keywords" => props.keywords = Some(value),
        "description" => props.description = Some(value),
        "lastModifiedBy" => props.last_modified_by = Some(value),
        "revision" => props.revision = Some(value),
        "created" => props.created = Some(value),
        "modified" => props.modified = Some(value),
        "category" => props.category = Some(value),
        _ => {}
    }
}

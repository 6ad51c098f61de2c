//! Best-effort text extraction for uploaded documents.
//!
//! Every branch returns extracted text or an empty string, never an error;
//! empty output is rejected downstream as missing input.

use std::io::Read;

use quick_xml::events::Event;
use tracing::warn;

/// Extracts plain text from an uploaded file, dispatching on its extension.
/// Supports PDF, DOCX/DOC, ODT, and plain text; unknown extensions fall
/// back to lossy UTF-8.
pub fn extract_text(filename: &str, data: &[u8]) -> String {
    let lower = filename.to_lowercase();
    let text = if lower.ends_with(".pdf") {
        extract_pdf(data)
    } else if lower.ends_with(".docx") || lower.ends_with(".doc") {
        extract_zip_xml(data, "word/document.xml", b"w:p")
    } else if lower.ends_with(".odt") {
        extract_zip_xml(data, "content.xml", b"text:p")
    } else {
        String::from_utf8_lossy(data).into_owned()
    };
    text.trim().to_string()
}

fn extract_pdf(data: &[u8]) -> String {
    match pdf_extract::extract_text_from_mem(data) {
        Ok(text) => text,
        Err(e) => {
            warn!("PDF extraction failed: {e}");
            String::new()
        }
    }
}

/// DOCX and ODT are zip containers holding one main XML document; the text
/// is the concatenation of character data, with paragraph ends as newlines.
fn extract_zip_xml(data: &[u8], entry: &str, paragraph_tag: &[u8]) -> String {
    let cursor = std::io::Cursor::new(data);
    let mut archive = match zip::ZipArchive::new(cursor) {
        Ok(archive) => archive,
        Err(e) => {
            warn!("Not a readable zip container: {e}");
            return String::new();
        }
    };

    let mut xml = String::new();
    match archive.by_name(entry) {
        Ok(mut file) => {
            if let Err(e) = file.read_to_string(&mut xml) {
                warn!("Failed to read {entry}: {e}");
                return String::new();
            }
        }
        Err(e) => {
            warn!("Missing {entry} in container: {e}");
            return String::new();
        }
    }

    xml_text(xml.as_bytes(), paragraph_tag)
}

fn xml_text(xml: &[u8], paragraph_tag: &[u8]) -> String {
    let mut reader = quick_xml::Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut out = String::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(text)) => {
                if let Ok(unescaped) = text.unescape() {
                    out.push_str(&unescaped);
                }
            }
            Ok(Event::End(end)) if end.name().as_ref() == paragraph_tag => out.push('\n'),
            Ok(Event::Eof) => break,
            Err(e) => {
                warn!("XML parse error during extraction: {e}");
                break;
            }
            Ok(_) => {}
        }
        buf.clear();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn make_container(entry: &str, xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        writer
            .start_file(entry, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_plain_text_passthrough() {
        assert_eq!(extract_text("resume.txt", b"  python developer \n"), "python developer");
    }

    #[test]
    fn test_unknown_extension_falls_back_to_utf8() {
        assert_eq!(extract_text("resume", b"plain body"), "plain body");
    }

    #[test]
    fn test_docx_paragraph_text() {
        let xml = "<w:document><w:body>\
                   <w:p><w:r><w:t>Python developer</w:t></w:r></w:p>\
                   <w:p><w:r><w:t>5 years experience</w:t></w:r></w:p>\
                   </w:body></w:document>";
        let data = make_container("word/document.xml", xml);
        assert_eq!(
            extract_text("resume.docx", &data),
            "Python developer\n5 years experience"
        );
    }

    #[test]
    fn test_odt_paragraph_text() {
        let xml = "<office:document-content><office:body>\
                   <text:p>SQL analyst</text:p>\
                   </office:body></office:document-content>";
        let data = make_container("content.xml", xml);
        assert_eq!(extract_text("resume.odt", &data), "SQL analyst");
    }

    #[test]
    fn test_corrupt_docx_yields_empty_string() {
        assert_eq!(extract_text("resume.docx", b"not a zip at all"), "");
    }

    #[test]
    fn test_docx_missing_document_entry_yields_empty_string() {
        let data = make_container("something/else.xml", "<a>text</a>");
        assert_eq!(extract_text("resume.docx", &data), "");
    }
}

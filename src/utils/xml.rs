//! XML pretty-printing
//!
//! Re-indents generated markup with `quick-xml`. Whitespace-only text between
//! elements is dropped and `<a></a>` is collapsed to `<a/>`.

use crate::error::{CodegenError, Result};
use quick_xml::{
    Reader, Writer,
    events::{BytesStart, Event},
};
use tracing::{debug, instrument};

/// Default indentation width in spaces
pub const DEFAULT_INDENT: usize = 4;

/// Turns raw markup into its final textual form
pub trait MarkupFormatter {
    fn format(&self, markup: &str) -> Result<String>;
}

/// Indenting XML formatter
#[derive(Debug, Clone)]
pub struct XmlFormatter {
    indent: usize,
}

impl XmlFormatter {
    /// Create a formatter indenting with `indent` spaces per level
    pub fn new(indent: usize) -> Self {
        Self { indent }
    }

    fn write<'a>(writer: &mut Writer<Vec<u8>>, event: Event<'a>) -> Result<()> {
        writer
            .write_event(event)
            .map_err(|e| CodegenError::format_with_source("Failed to write markup", e))
    }
}

impl Default for XmlFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT)
    }
}

impl MarkupFormatter for XmlFormatter {
    #[instrument(skip(self, markup), fields(len = markup.len()))]
    fn format(&self, markup: &str) -> Result<String> {
        let mut reader = Reader::from_str(markup);
        reader.config_mut().trim_text(true);

        let mut writer = Writer::new_with_indent(Vec::new(), b' ', self.indent);
        // Start tag held back until we know whether the element is empty
        let mut pending: Option<BytesStart<'_>> = None;
        let mut depth = 0usize;

        loop {
            let event = reader.read_event().map_err(|e| {
                CodegenError::format_with_source(
                    format!("Malformed markup at byte {}", reader.error_position()),
                    e,
                )
            })?;

            if let Some(start) = pending.take() {
                if let Event::End(_) = event {
                    depth -= 1;
                    Self::write(&mut writer, Event::Empty(start))?;
                    continue;
                }
                Self::write(&mut writer, Event::Start(start))?;
            }

            match event {
                Event::Start(start) => {
                    depth += 1;
                    pending = Some(start);
                }
                Event::End(end) => {
                    depth = depth.saturating_sub(1);
                    Self::write(&mut writer, Event::End(end))?;
                }
                Event::Eof => break,
                other => Self::write(&mut writer, other)?,
            }
        }

        if depth != 0 {
            return Err(CodegenError::format(format!(
                "Markup ended with {} unclosed element(s)",
                depth
            )));
        }

        let formatted = String::from_utf8(writer.into_inner())
            .map_err(|e| CodegenError::format_with_source("Formatted markup is not UTF-8", e))?;

        debug!("Formatted {} bytes of markup", formatted.len());
        Ok(formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indents_nested_elements() {
        let formatter = XmlFormatter::default();
        let output = formatter.format("<a><b>x</b><c><d>y</d></c></a>").unwrap();
        assert_eq!(
            output,
            "<a>\n    <b>x</b>\n    <c>\n        <d>y</d>\n    </c>\n</a>"
        );
    }

    #[test]
    fn test_drops_whitespace_between_elements() {
        let formatter = XmlFormatter::new(2);
        let output = formatter
            .format("<a>\n\n      <b>x</b>\n\t\n</a>\n")
            .unwrap();
        assert_eq!(output, "<a>\n  <b>x</b>\n</a>");
    }

    #[test]
    fn test_collapses_empty_elements() {
        let formatter = XmlFormatter::default();
        let output = formatter.format("<a><b></b><c/></a>").unwrap();
        assert_eq!(output, "<a>\n    <b/>\n    <c/>\n</a>");
    }

    #[test]
    fn test_keeps_declaration_and_attributes() {
        let formatter = XmlFormatter::default();
        let output = formatter
            .format(r#"<?xml version="1.0" encoding="UTF-8"?><PermissionSet xmlns="urn:x"><label>L</label></PermissionSet>"#)
            .unwrap();
        assert_eq!(
            output,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<PermissionSet xmlns=\"urn:x\">\n    <label>L</label>\n</PermissionSet>"
        );
    }

    #[test]
    fn test_keeps_escaped_text() {
        let formatter = XmlFormatter::default();
        let output = formatter.format("<a>R&amp;D &lt;team&gt;</a>").unwrap();
        assert_eq!(output, "<a>R&amp;D &lt;team&gt;</a>");
    }

    #[test]
    fn test_rejects_mismatched_tags() {
        let formatter = XmlFormatter::default();
        let err = formatter.format("<a><b></a>").unwrap_err();
        assert!(matches!(err, CodegenError::Format { .. }));
    }

    #[test]
    fn test_rejects_unclosed_elements() {
        let formatter = XmlFormatter::default();
        let err = formatter.format("<a><b>x</b>").unwrap_err();
        assert!(matches!(err, CodegenError::Format { .. }));
    }
}

//! Minimal XML-subset reader for animation metadata files
//!
//! Animation descriptions ship as a simple XML-like markup that is not
//! standards-conforming, so this is a small tolerant hand-written parser
//! rather than a full XML implementation. It produces a tree of named
//! records with string attributes and ordered children; text content,
//! comments and declarations are skipped.

/// One parsed record: tag name, attributes in document order, children
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub name: String,
    attrs: Vec<(String, String)>,
    pub children: Vec<Element>,
}

impl Element {
    /// First attribute value with the given name, if present
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[cfg(test)]
    fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }
}

/// Parse failure with the byte offset where parsing stopped
#[derive(Debug)]
pub struct NxmlError {
    pub message: String,
    pub offset: usize,
}

impl std::fmt::Display for NxmlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at byte {}", self.message, self.offset)
    }
}

impl std::error::Error for NxmlError {}

/// Parse the first top-level element of `text`
pub fn parse(text: &str) -> Result<Element, NxmlError> {
    let mut parser = Parser {
        bytes: text.as_bytes(),
        pos: 0,
    };
    parser.skip_trivia();
    if parser.pos >= parser.bytes.len() {
        return Err(parser.error("no root element"));
    }
    parser.parse_element()
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, message: &str) -> NxmlError {
        NxmlError {
            message: message.to_string(),
            offset: self.pos,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn starts_with(&self, s: &str) -> bool {
        self.bytes[self.pos..].starts_with(s.as_bytes())
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.pos += 1;
        }
    }

    /// Skip whitespace, text content, comments and declarations until the
    /// next element open, element close, or end of input
    fn skip_trivia(&mut self) {
        loop {
            // Text content between tags is ignored
            while let Some(c) = self.peek() {
                if c == b'<' {
                    break;
                }
                self.pos += 1;
            }
            if self.starts_with("<!--") {
                self.skip_until("-->");
            } else if self.starts_with("<?") {
                self.skip_until("?>");
            } else if self.starts_with("<!") {
                self.skip_until(">");
            } else {
                return;
            }
        }
    }

    fn skip_until(&mut self, terminator: &str) {
        while self.pos < self.bytes.len() && !self.starts_with(terminator) {
            self.pos += 1;
        }
        self.pos = (self.pos + terminator.len()).min(self.bytes.len());
    }

    fn is_name_byte(c: u8) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, b'_' | b'-' | b'.' | b':')
    }

    fn read_name(&mut self) -> Result<String, NxmlError> {
        let start = self.pos;
        while self.peek().is_some_and(Self::is_name_byte) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error("expected name"));
        }
        Ok(String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned())
    }

    fn read_quoted_value(&mut self) -> Result<String, NxmlError> {
        let quote = match self.peek() {
            Some(q @ (b'"' | b'\'')) => q,
            _ => return Err(self.error("expected quoted attribute value")),
        };
        self.pos += 1;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == quote {
                let value = String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned();
                self.pos += 1;
                return Ok(value);
            }
            self.pos += 1;
        }
        Err(self.error("unterminated attribute value"))
    }

    fn parse_element(&mut self) -> Result<Element, NxmlError> {
        if self.peek() != Some(b'<') {
            return Err(self.error("expected '<'"));
        }
        self.pos += 1;

        let name = self.read_name()?;
        let mut element = Element {
            name,
            attrs: Vec::new(),
            children: Vec::new(),
        };

        // Attributes until '>' or '/>'
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b'>') => {
                    self.pos += 1;
                    break;
                }
                Some(b'/') => {
                    self.pos += 1;
                    if self.peek() != Some(b'>') {
                        return Err(self.error("expected '>' after '/'"));
                    }
                    self.pos += 1;
                    return Ok(element);
                }
                Some(_) => {
                    let key = self.read_name()?;
                    self.skip_whitespace();
                    if self.peek() != Some(b'=') {
                        return Err(self.error("expected '=' after attribute name"));
                    }
                    self.pos += 1;
                    self.skip_whitespace();
                    let value = self.read_quoted_value()?;
                    element.attrs.push((key, value));
                }
                None => return Err(self.error("unterminated tag")),
            }
        }

        // Children until the matching close tag
        loop {
            self.skip_trivia();
            if self.pos >= self.bytes.len() {
                return Err(self.error("missing close tag"));
            }
            if self.starts_with("</") {
                self.pos += 2;
                let close = self.read_name()?;
                if close != element.name {
                    return Err(self.error("mismatched close tag"));
                }
                self.skip_whitespace();
                if self.peek() != Some(b'>') {
                    return Err(self.error("expected '>' in close tag"));
                }
                self.pos += 1;
                return Ok(element);
            }
            element.children.push(self.parse_element()?);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_element_with_attrs() {
        let root = parse(r#"<Sprite filename="walk.png" default_animation="Walk"></Sprite>"#)
            .expect("parse");
        assert_eq!(root.name, "Sprite");
        assert_eq!(root.attr("filename"), Some("walk.png"));
        assert_eq!(root.attr("default_animation"), Some("Walk"));
        assert_eq!(root.attr("missing"), None);
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_children_in_document_order() {
        let root = parse(
            r#"<Sprite>
                 <RectAnimation name="Walk" frame_count="4" />
                 <RectAnimation name="Idle" frame_count="2" />
               </Sprite>"#,
        )
        .expect("parse");
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].attr("name"), Some("Walk"));
        assert_eq!(root.children[1].attr("name"), Some("Idle"));
    }

    #[test]
    fn test_comments_declarations_and_text_ignored() {
        let root = parse(
            "<?xml version=\"1.0\"?>\n\
             <!-- spritesheet metadata -->\n\
             <Sprite>stray text<Child/><!-- trailing --></Sprite>",
        )
        .expect("parse");
        assert_eq!(root.name, "Sprite");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].name, "Child");
    }

    #[test]
    fn test_single_quoted_attributes() {
        let root = parse("<A k='v'/>").expect("parse");
        assert_eq!(root.attr("k"), Some("v"));
    }

    #[test]
    fn test_mismatched_close_is_error() {
        assert!(parse("<A><B></A></B>").is_err());
    }

    #[test]
    fn test_unterminated_input_is_error() {
        assert!(parse("<A attr=\"x\"").is_err());
        assert!(parse("<A>").is_err());
        assert!(parse("   ").is_err());
    }

    #[test]
    fn test_attr_helper_returns_first_match() {
        let e = Element::default().with_attr("k", "1").with_attr("k", "2");
        assert_eq!(e.attr("k"), Some("1"));
    }
}

//! Greeting templates.
//!
//! A template is text with printf-style conversions: `%s` is replaced by the
//! name (at most once), `%%` is a literal `%` and `%n` a newline. Templates are
//! parsed once at startup so that formatting a greeting cannot fail.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_TEMPLATE: &str = "Hello, %s!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Name,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template ends with a dangling '%' at {position}")]
    DanglingPercent { position: usize },

    #[error("unsupported conversion '%{conversion}' at {position}")]
    UnsupportedConversion { conversion: char, position: usize },

    #[error("template has more than one '%s', the second at {position}")]
    DuplicatePlaceholder { position: usize },
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut has_name = false;
        let mut chars = source.char_indices();

        while let Some((position, c)) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            match chars.next() {
                Some((_, '%')) => literal.push('%'),
                Some((_, 'n')) => literal.push('\n'),
                Some((_, 's')) => {
                    if has_name {
                        return Err(TemplateError::DuplicatePlaceholder { position });
                    }
                    has_name = true;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Name);
                }
                Some((_, conversion)) => return Err(TemplateError::UnsupportedConversion { conversion, position }),
                None => return Err(TemplateError::DanglingPercent { position }),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { source: source.to_string(), segments })
    }

    pub fn render(&self, name: &str) -> String {
        let mut out = String::with_capacity(self.source.len() + name.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Name => out.push_str(name),
            }
        }
        out
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Default for Template {
    fn default() -> Self {
        Self {
            source: DEFAULT_TEMPLATE.to_string(),
            segments: vec![Segment::Literal("Hello, ".into()), Segment::Name, Segment::Literal("!".into())],
        }
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_name() {
        assert_eq!(Template::parse("Hello, %s!").unwrap().render("World"), "Hello, World!");
        assert_eq!(Template::parse("Hola, %s!").unwrap().render("John"), "Hola, John!");
        assert_eq!(Template::parse("%s").unwrap().render("A"), "A");
    }

    #[test]
    fn default_matches_parsed() {
        assert_eq!(Template::default(), Template::parse(DEFAULT_TEMPLATE).unwrap());
    }

    #[test]
    fn escapes_and_newlines() {
        let template = Template::parse("100%% sure, %s%n").unwrap();
        assert_eq!(template.render("Ann"), "100% sure, Ann\n");
        assert_eq!(template.to_string(), "100%% sure, %s%n");
    }

    #[test]
    fn name_is_optional() {
        assert_eq!(Template::parse("Hi there").unwrap().render("ignored"), "Hi there");
    }

    #[test]
    fn rejects_bad_templates() {
        assert_eq!(Template::parse("Hello, %d!"), Err(TemplateError::UnsupportedConversion { conversion: 'd', position: 7 }));
        assert_eq!(Template::parse("Hello %"), Err(TemplateError::DanglingPercent { position: 6 }));
        assert_eq!(Template::parse("%s and %s"), Err(TemplateError::DuplicatePlaceholder { position: 7 }));
    }
}

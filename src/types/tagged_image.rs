// ABOUTME: Tagged image reference parsing and validation.
// ABOUTME: Handles formats like app:1.0 and registry.example.com/ns/app:1.0.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseTaggedImageError {
    #[error("image reference cannot be empty")]
    Empty,

    #[error("invalid character in image reference: {0}")]
    InvalidChar(char),

    #[error("image reference has no tag: {0}")]
    MissingTag(String),

    #[error("image reference has no name: {0}")]
    MissingName(String),
}

/// An image name plus the tag it was addressed by. The name may contain
/// slashes and colons (registry hosts with ports); the tag is whatever
/// follows the final colon.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaggedImage {
    name: String,
    tag: String,
}

impl TaggedImage {
    pub fn parse(input: &str) -> Result<Self, ParseTaggedImageError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseTaggedImageError::Empty);
        }

        for c in input.chars() {
            if !c.is_ascii_alphanumeric()
                && c != '/'
                && c != ':'
                && c != '.'
                && c != '-'
                && c != '_'
            {
                return Err(ParseTaggedImageError::InvalidChar(c));
            }
        }

        let Some((name, tag)) = input.rsplit_once(':') else {
            return Err(ParseTaggedImageError::MissingTag(input.to_string()));
        };
        if name.is_empty() {
            return Err(ParseTaggedImageError::MissingName(input.to_string()));
        }
        if tag.is_empty() {
            return Err(ParseTaggedImageError::MissingTag(input.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            tag: tag.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The reference the container engine uses when talking to `host`:
    /// `host/name:tag`.
    pub fn scoped(&self, host: &str) -> String {
        format!("{}/{}", host, self)
    }

    /// Strips a leading `host/` if the user already typed the scoped form,
    /// so both `app:1.0` and `registry:5000/app:1.0` address the same image.
    pub fn relative_to(&self, host: &str) -> Self {
        let prefix = format!("{host}/");
        match self.name.strip_prefix(&prefix) {
            Some(rest) if !rest.is_empty() => Self {
                name: rest.to_string(),
                tag: self.tag.clone(),
            },
            _ => self.clone(),
        }
    }
}

impl fmt::Display for TaggedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_reference() {
        let image = TaggedImage::parse("app:1.0").unwrap();
        assert_eq!(image.name(), "app");
        assert_eq!(image.tag(), "1.0");
    }

    #[test]
    fn tag_is_after_final_colon() {
        let image = TaggedImage::parse("registry.example.com:5000/ns/app:1.2.3").unwrap();
        assert_eq!(image.name(), "registry.example.com:5000/ns/app");
        assert_eq!(image.tag(), "1.2.3");
    }

    #[test]
    fn display_round_trips() {
        let input = "registry.example.com/ns/app:1.2.3";
        let image = TaggedImage::parse(input).unwrap();
        assert_eq!(image.to_string(), input);
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(
            TaggedImage::parse(""),
            Err(ParseTaggedImageError::Empty)
        ));
        assert!(matches!(
            TaggedImage::parse("   "),
            Err(ParseTaggedImageError::Empty)
        ));
    }

    #[test]
    fn rejects_missing_tag() {
        assert!(matches!(
            TaggedImage::parse("app"),
            Err(ParseTaggedImageError::MissingTag(_))
        ));
        assert!(matches!(
            TaggedImage::parse("app:"),
            Err(ParseTaggedImageError::MissingTag(_))
        ));
    }

    #[test]
    fn rejects_missing_name() {
        assert!(matches!(
            TaggedImage::parse(":1.0"),
            Err(ParseTaggedImageError::MissingName(_))
        ));
    }

    #[test]
    fn rejects_invalid_characters() {
        assert!(matches!(
            TaggedImage::parse("app :1.0"),
            Err(ParseTaggedImageError::InvalidChar(' '))
        ));
        assert!(matches!(
            TaggedImage::parse("app!:1.0"),
            Err(ParseTaggedImageError::InvalidChar('!'))
        ));
    }

    #[test]
    fn scoped_prefixes_host() {
        let image = TaggedImage::parse("ns/app:1.0").unwrap();
        assert_eq!(image.scoped("registry.example.com"), "registry.example.com/ns/app:1.0");
        assert_eq!(image.scoped("localhost:5000"), "localhost:5000/ns/app:1.0");
    }

    #[test]
    fn relative_to_strips_known_host() {
        let image = TaggedImage::parse("localhost:5000/ns/app:1.0").unwrap();
        let relative = image.relative_to("localhost:5000");
        assert_eq!(relative.name(), "ns/app");
        assert_eq!(relative.tag(), "1.0");
    }

    #[test]
    fn relative_to_leaves_other_hosts_alone() {
        let image = TaggedImage::parse("other.example.com/app:1.0").unwrap();
        let relative = image.relative_to("localhost:5000");
        assert_eq!(relative, image);
    }
}

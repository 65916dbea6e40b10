//! Conversion options for blog export to markdown conversion

use serde::{Deserialize, Serialize};

/// Options controlling the generated front matter and the body rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Image written to `image.feature` in the front matter
    #[serde(default = "default_feature_image")]
    pub feature_image: String,

    /// Credit written to `image.feature-credit` in the front matter
    #[serde(default = "default_feature_credit")]
    pub feature_credit: String,

    /// Lines that are replaced by a code fence when they appear alone
    #[serde(default = "default_code_tags")]
    pub code_tags: Vec<String>,

    /// URL prefix stripped from caption images
    #[serde(default = "default_image_url_prefix")]
    pub image_url_prefix: String,

    /// Keep `title` lines of the original front matter
    #[serde(default)]
    pub keep_title: bool,
}

fn default_feature_image() -> String {
    "/img/mechakana-import.jpg".to_string()
}

fn default_feature_credit() -> String {
    "Brandon Sanders".to_string()
}

fn default_code_tags() -> Vec<String> {
    vec!["[java]".to_string(), "[/java]".to_string()]
}

fn default_image_url_prefix() -> String {
    "http://www.mechakana.com/blog".to_string()
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            feature_image: default_feature_image(),
            feature_credit: default_feature_credit(),
            code_tags: default_code_tags(),
            image_url_prefix: default_image_url_prefix(),
            keep_title: false,
        }
    }
}

impl ConvertOptions {
    /// Override the image URL prefix
    pub fn with_image_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.image_url_prefix = prefix.into();
        self
    }

    /// Override whether front matter titles survive
    pub fn with_keep_title(mut self, keep: bool) -> Self {
        self.keep_title = keep;
        self
    }

    /// Metadata block emitted right after the opening `---`
    pub fn front_matter_header(&self) -> String {
        format!(
            "image:\n    feature: \"{}\"\n    feature-credit: \"{}\"\n",
            self.feature_image, self.feature_credit
        )
    }

    pub fn is_code_tag(&self, line: &str) -> bool {
        self.code_tags.iter().any(|tag| tag == line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = ConvertOptions::default();
        assert_eq!(opts.feature_image, "/img/mechakana-import.jpg");
        assert_eq!(opts.feature_credit, "Brandon Sanders");
        assert_eq!(opts.image_url_prefix, "http://www.mechakana.com/blog");
        assert!(!opts.keep_title);
    }

    #[test]
    fn test_front_matter_header() {
        let opts = ConvertOptions::default();
        assert_eq!(
            opts.front_matter_header(),
            "image:\n    feature: \"/img/mechakana-import.jpg\"\n    feature-credit: \"Brandon Sanders\"\n"
        );
    }

    #[test]
    fn test_code_tags_match_exactly() {
        let opts = ConvertOptions::default();
        assert!(opts.is_code_tag("[java]"));
        assert!(opts.is_code_tag("[/java]"));
        assert!(!opts.is_code_tag(" [java]"));
        assert!(!opts.is_code_tag("[python]"));
    }

    #[test]
    fn test_options_builder() {
        let opts = ConvertOptions::default()
            .with_image_url_prefix("https://example.com/blog")
            .with_keep_title(true);
        assert_eq!(opts.image_url_prefix, "https://example.com/blog");
        assert!(opts.keep_title);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let opts: ConvertOptions = toml::from_str("feature_credit = \"Someone Else\"").unwrap();
        assert_eq!(opts.feature_credit, "Someone Else");
        assert_eq!(opts.feature_image, "/img/mechakana-import.jpg");
        assert_eq!(opts.code_tags, vec!["[java]", "[/java]"]);
    }
}

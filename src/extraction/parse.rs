use anyhow::Result;
use regex::Regex;

/// Finds `<meta name="keywords" content="...">` with a single pattern.
/// Attribute order is fixed (name before content); quotes may be single or double.
pub struct KeywordExtractor {
    pat: Regex,
}

impl KeywordExtractor {
    pub fn new() -> Result<Self> {
        let pat = Regex::new(r#"(?i)<meta\s+name=["']keywords["']\s+content=["']([^"']+)["']"#)?;
        Ok(Self { pat })
    }

    /// Content of the first matching tag in document order.
    pub fn extract_keywords(&self, html: &str) -> Option<String> {
        self.pat
            .captures(html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }
}

//! CLI output handling
//!
//! Every command renders through a [`Printer`] so `--json` swaps the
//! whole surface at once: human mode prints checkmarked lines, JSON mode
//! prints one machine-readable document and stays quiet otherwise.

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Human
        }
    }

    pub fn is_json(self) -> bool {
        self == Self::Json
    }
}

/// Format-aware printer shared by all commands
pub struct Printer {
    format: OutputFormat,
}

impl Printer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Headline success line (human mode only)
    pub fn success(&self, message: &str) {
        if !self.format.is_json() {
            println!("\u{2713} {message}");
        }
    }

    /// Error line; JSON mode emits a structured error document on stderr
    pub fn error(&self, message: &str) {
        match self.format {
            OutputFormat::Human => eprintln!("\u{2717} Error: {message}"),
            OutputFormat::Json => eprintln!(
                "{}",
                serde_json::json!({"success": false, "error": message})
            ),
        }
    }

    /// Warning line; JSON mode stays silent (warnings ride in the document)
    pub fn warn(&self, message: &str) {
        if !self.format.is_json() {
            eprintln!("\u{26a0} Warning: {message}");
        }
    }

    /// Indented detail line (human mode only)
    pub fn detail(&self, message: &str) {
        if !self.format.is_json() {
            println!("  {message}");
        }
    }

    /// The machine-readable document (JSON mode only)
    pub fn json(&self, value: &serde_json::Value) {
        if self.format.is_json() {
            println!(
                "{}",
                serde_json::to_string_pretty(value).unwrap_or_default()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flag() {
        assert_eq!(OutputFormat::from_flag(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flag(false), OutputFormat::Human);
        assert!(OutputFormat::Json.is_json());
        assert!(!OutputFormat::Human.is_json());
    }
}

//! Chat text builder
//!
//! Fluent API for WhatsApp-style messages: `*bold*`, `_italic_`, plain lines
//! and separators.

/// Separator line used between message sections
pub const SEPARATOR: &str = "----------------------------------";

/// Chat message builder
#[derive(Debug, Default, Clone)]
pub struct TextBuilder {
    buf: String,
}

impl TextBuilder {
    pub fn new() -> Self {
        Self {
            buf: String::with_capacity(1024),
        }
    }

    // === Text Output ===

    /// Write raw text
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self.buf.push('\n');
        self
    }

    /// Write empty line
    pub fn newline(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    /// Write a line only when `cond` holds
    pub fn line_if(&mut self, cond: bool, s: &str) -> &mut Self {
        if cond {
            self.line(s);
        }
        self
    }

    /// `label value` line with the label in bold, e.g. `📅 *Check-in:* 20/12/2025`
    pub fn field(&mut self, icon: &str, label: &str, value: &str) -> &mut Self {
        self.line(&format!("{} {} {}", icon, bold(&format!("{}:", label)), value))
    }

    // === Separators ===

    pub fn sep(&mut self) -> &mut Self {
        self.line(SEPARATOR)
    }

    /// Current length in bytes
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn build(self) -> String {
        self.buf
    }
}

/// `*s*`
pub fn bold(s: &str) -> String {
    format!("*{}*", s)
}

/// `_s_`
pub fn italic(s: &str) -> String {
    format!("_{}_", s)
}

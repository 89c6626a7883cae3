//! Output trait for rendering reports to different formats.

/// Target output for reports.
///
/// Reports describe *what* to output using these semantic methods.
/// Implementations decide *how* to render (terminal, JSON, HTML, etc).
pub trait Output {
    /// Start a new section with a heading.
    fn section(&mut self, name: &str);

    /// Render an indented key-value pair.
    fn key_value_indented(&mut self, key: &str, value: &str);

    /// Render a bullet list item.
    fn list_item(&mut self, text: &str);

    /// Render an error message.
    fn error(&mut self, msg: &str);

    /// Render a warning message.
    fn warning(&mut self, msg: &str);

    /// Render a block of preformatted text.
    fn preformatted(&mut self, text: &str);

    /// Render a blank line.
    fn newline(&mut self);
}

/// A report that can render itself to an output.
pub trait Report {
    /// Render this report to the given output.
    fn render(&self, out: &mut dyn Output);
}

/// Terminal output implementation.
///
/// Errors and warnings go to stderr, everything else to stdout.
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for TerminalOutput {
    fn section(&mut self, name: &str) {
        println!("{}:", name);
    }

    fn key_value_indented(&mut self, key: &str, value: &str) {
        println!("  {}: {}", key, value);
    }

    fn list_item(&mut self, text: &str) {
        println!("  - {}", text);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("error: {}", msg);
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("warning: {}", msg);
    }

    fn preformatted(&mut self, text: &str) {
        println!("{}", text);
    }

    fn newline(&mut self) {
        println!();
    }
}

/// Collects rendered lines into a string, interleaving stdout and stderr.
#[cfg(test)]
#[derive(Default)]
pub struct BufferOutput(pub String);

#[cfg(test)]
impl BufferOutput {
    fn line(&mut self, text: std::fmt::Arguments<'_>) {
        use std::fmt::Write;
        let _ = writeln!(self.0, "{}", text);
    }

    /// Render a report and return what it printed.
    pub fn render(report: &dyn Report) -> String {
        let mut out = Self::default();
        report.render(&mut out);
        out.0
    }
}

#[cfg(test)]
impl Output for BufferOutput {
    fn section(&mut self, name: &str) {
        self.line(format_args!("{}:", name));
    }

    fn key_value_indented(&mut self, key: &str, value: &str) {
        self.line(format_args!("  {}: {}", key, value));
    }

    fn list_item(&mut self, text: &str) {
        self.line(format_args!("  - {}", text));
    }

    fn error(&mut self, msg: &str) {
        self.line(format_args!("error: {}", msg));
    }

    fn warning(&mut self, msg: &str) {
        self.line(format_args!("warning: {}", msg));
    }

    fn preformatted(&mut self, text: &str) {
        self.line(format_args!("{}", text));
    }

    fn newline(&mut self) {
        self.0.push('\n');
    }
}

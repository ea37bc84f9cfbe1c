//! Output format selection for command results.

use clap::ValueEnum;

use citynav_lib::RouteRenderMode;

/// Format used to print command results on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    pub fn render_mode(self) -> RouteRenderMode {
        match self {
            OutputFormat::Text => RouteRenderMode::PlainText,
            OutputFormat::Json => RouteRenderMode::Json,
        }
    }
}

/// Print rendered output, avoiding a doubled trailing newline.
pub fn emit(rendered: &str) {
    println!("{}", rendered.trim_end_matches('\n'));
}

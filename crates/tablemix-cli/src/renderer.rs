//! Terminal rendering of the markdown produced by the core display types.
//!
//! Rich mode styles inline markdown with termimad and colors headers by
//! level; plain mode prints the markdown untouched.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

const ROUND_HEADER: &str = "\x1b[34m";
const TABLE_HEADER: &str = "\x1b[36m";
const SUCCESS: &str = "\x1b[32m";
const FAILURE: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// ANSI color for a line that termimad should not restyle.
    fn line_color(line: &str) -> Option<&'static str> {
        if line.starts_with("###") {
            Some(TABLE_HEADER)
        } else if line.starts_with('#') {
            Some(ROUND_HEADER)
        } else if line.starts_with("Success:") {
            Some(SUCCESS)
        } else if line.starts_with("Error:") {
            Some(FAILURE)
        } else {
            None
        }
    }

    /// Render markdown text to the terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        // headers keep their hash marks so table numbers stay visible
        for line in markdown.lines() {
            match Self::line_color(line) {
                Some(color) => println!("{color}{line}{RESET}"),
                None => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

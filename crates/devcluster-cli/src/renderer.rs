//! Terminal rendering of markdown output via termimad.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Prints markdown either styled or as plain text.
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

    /// Render markdown text to stdout.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }
        for line in markdown.lines() {
            if line.starts_with('#') {
                println!("\x1b[34m{line}\x1b[0m");
            } else if let Some(rest) = line.strip_prefix("Error:") {
                println!("\x1b[31mError:\x1b[0m{rest}");
            } else {
                self.skin.print_inline(line);
                println!();
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
        assert!(renderer.render("# Zones\n\n- **wdc04**\n").is_ok());
    }

    #[test]
    fn test_default_is_rich() {
        assert!(TerminalRenderer::default().rich_enabled);
    }
}

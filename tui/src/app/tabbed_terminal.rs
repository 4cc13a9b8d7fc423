//! Tabbed Terminal Integration Prototype
//! 
//! This module demonstrates how to integrate PTY (pseudo-terminal) with ratatui
//! to create a tabbed terminal interface that can run editors like Neovim/Vim.

use anyhow::Result;
use portable_pty::{CommandBuilder, NativePtySystem, PtySize, PtySystem};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Represents a terminal tab with PTY integration
pub struct TerminalTab {
    /// Tab title
    pub title: String,
    /// PTY system
    pub pty_system: Option<Box<dyn PtySystem>>,
    /// PTY pair (master/slave)
    pub pty_pair: Option<portable_pty::PtyPair>,
    /// Reader for PTY output
    pub reader: Option<Box<dyn std::io::Read + Send>>,
    /// Writer for PTY input
    pub writer: Option<Box<dyn std::io::Write + Send>>,
    /// Output buffer
    pub output_buffer: Vec<String>,
    /// Current command input
    pub current_input: String,
}

impl TerminalTab {
    /// Create a new terminal tab
    pub fn new(title: String) -> Self {
        Self {
            title,
            pty_system: None,
            pty_pair: None,
            reader: None,
            writer: None,
            output_buffer: Vec::new(),
            current_input: String::new(),
        }
    }

    /// Initialize the PTY for this terminal tab
    pub fn initialize_pty(&mut self) -> Result<()> {
        // Create PTY system
        let pty_system = NativePtySystem::default();
        
        // Set initial size
        let pty_size = PtySize {
            rows: 24,
            cols: 80,
            pixel_width: 0,
            pixel_height: 0,
        };
        
        // Create PTY pair
        let pty_pair = pty_system.openpty(pty_size)?;
        
        // Start a shell
        let cmd = if cfg!(windows) {
            CommandBuilder::new("cmd.exe")
        } else {
            CommandBuilder::new("bash")
        };
        
        // Spawn the command
        let _child = pty_pair.slave.spawn_command(cmd)?;
        
        // Get reader and writer
        let reader = pty_pair.master.try_clone_reader()?;
        let writer = pty_pair.master.try_clone_writer()?;
        
        self.pty_system = Some(Box::new(pty_system));
        self.pty_pair = Some(pty_pair);
        self.reader = Some(Box::new(reader));
        self.writer = Some(Box::new(writer));
        
        // Start reading from PTY in background thread
        self.start_pty_reader()?;
        
        Ok(())
    }

    /// Start reading from PTY in background thread
    fn start_pty_reader(&mut self) -> Result<()> {
        if let Some(mut reader) = self.reader.take() {
            let output_buffer = Arc::new(Mutex::new(self.output_buffer.clone()));
            
            thread::spawn(move || {
                let mut buf = [0u8; 1024];
                loop {
                    match reader.read(&mut buf) {
                        Ok(0) => break, // EOF
                        Ok(n) => {
                            let output = String::from_utf8_lossy(&buf[..n]).to_string();
                            if let Ok(mut buffer) = output_buffer.lock() {
                                buffer.push(output);
                            }
                        }
                        Err(_) => break,
                    }
                }
            });
            
            self.reader = Some(reader);
        }
        
        Ok(())
    }

    /// Send input to the PTY
    pub fn send_input(&mut self, input: &str) -> Result<()> {
        if let Some(writer) = &mut self.writer {
            writer.write_all(input.as_bytes())?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Render the terminal tab
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let output_text: Vec<Line> = self.output_buffer
            .iter()
            .map(|line| Line::from(line.as_str()))
            .collect();

        let paragraph = Paragraph::new(output_text)
            .block(Block::default().borders(Borders::ALL).title(&self.title))
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, area);
    }
}

/// Tabbed terminal interface with PTY integration
pub struct TabbedTerminal {
    /// List of tabs
    pub tabs: Vec<TerminalTab>,
    /// Current active tab index
    pub current_tab_index: usize,
}

impl TabbedTerminal {
    /// Create a new tabbed terminal
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            current_tab_index: 0,
        }
    }

    /// Add a new terminal tab
    pub fn add_terminal_tab(&mut self, title: String) -> Result<()> {
        let mut tab = TerminalTab::new(title);
        tab.initialize_pty()?;
        self.tabs.push(tab);
        Ok(())
    }

    /// Switch to a specific tab
    pub fn switch_to_tab(&mut self, index: usize) {
        if index < self.tabs.len() {
            self.current_tab_index = index;
        }
    }

    /// Render the tabbed terminal interface
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tabs
                Constraint::Min(0),    // Terminal content
            ])
            .split(area);

        // Render tabs
        let tab_titles: Vec<Line> = self
            .tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                let style = if i == self.current_tab_index {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(vec![Span::styled(tab.title.clone(), style)])
            })
            .collect();

        let tabs = Tabs::new(tab_titles)
            .block(Block::default().borders(Borders::BOTTOM))
            .select(self.current_tab_index)
            .style(Style::default().fg(Color::White))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );

        frame.render_widget(tabs, chunks[0]);

        // Render current tab content
        if !self.tabs.is_empty() {
            let current_tab = &self.tabs[self.current_tab_index];
            current_tab.render(frame, chunks[1]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_tab_creation() {
        let tab = TerminalTab::new("Test Terminal".to_string());
        assert_eq!(tab.title, "Test Terminal");
        assert!(tab.output_buffer.is_empty());
        assert_eq!(tab.current_input, "");
    }

    #[test]
    fn test_tabbed_terminal_creation() {
        let terminal = TabbedTerminal::new();
        assert!(terminal.tabs.is_empty());
        assert_eq!(terminal.current_tab_index, 0);
    }

    #[test]
    fn test_add_terminal_tab() {
        let mut terminal = TabbedTerminal::new();
        // This would require a real PTY, so we'll skip actual initialization in tests
        assert_eq!(terminal.tabs.len(), 0);
    }
}
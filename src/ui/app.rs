//! Main TUI application state and logic

use crate::parser::ast::Program;
use crate::parser::lexer::{scan, LexError};
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::Token;
use crate::transpiler::{program_tree, render_c, render_source};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Rows moved by PgUp/PgDn
const PAGE_SIZE: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Tree,
    Output,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> tree -> output -> tokens)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tree => FocusedPane::Source,
            FocusedPane::Output => FocusedPane::Tree,
            FocusedPane::Tokens => FocusedPane::Output,
        }
    }
}

/// Which back end fills the output pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Source,
    C,
}

impl OutputMode {
    pub fn toggle(self) -> Self {
        match self {
            OutputMode::Source => OutputMode::C,
            OutputMode::C => OutputMode::Source,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OutputMode::Source => "source",
            OutputMode::C => "C",
        }
    }
}

/// The main application state
pub struct App {
    /// Name shown in the status bar
    pub file_name: String,

    /// The source code being explored
    pub source_code: String,

    /// Scanner output
    pub tokens: Vec<Token>,
    pub lex_errors: Vec<LexError>,

    /// Parser output
    pub program: Result<Program, ParseError>,

    /// Back end output, rendered once up front
    pub outline: Vec<String>,
    pub rendered_source: Option<String>,
    pub rendered_c: Option<String>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Back end shown in the output pane
    pub output_mode: OutputMode,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub tokens_scroll: usize,
    pub tree_scroll: usize,
    pub output_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Scan and parse `source_code`. Failures are kept for display.
    pub fn new(file_name: impl Into<String>, source_code: String) -> Self {
        let (tokens, lex_errors) = scan(&source_code);
        let program = Parser::new(tokens.clone()).parse_program();

        let (outline, rendered_source, rendered_c) = match &program {
            Ok(program) => (
                program_tree(program).lines(),
                Some(render_source(program)),
                Some(render_c(program)),
            ),
            Err(_) => (Vec::new(), None, None),
        };

        let status_message = match (&program, lex_errors.first()) {
            (Err(e), _) => e.to_string(),
            (Ok(_), Some(e)) => e.to_string(),
            (Ok(program), None) => format!(
                "Parsed {} top-level statement(s)",
                program.statements.len()
            ),
        };

        let mut app = App {
            file_name: file_name.into(),
            source_code,
            tokens,
            lex_errors,
            program,
            outline,
            rendered_source,
            rendered_c,
            focused_pane: FocusedPane::Source,
            output_mode: OutputMode::Source,
            source_scroll: 0,
            tokens_scroll: 0,
            tree_scroll: 0,
            output_scroll: 0,
            should_quit: false,
            status_message,
        };

        // Start with the offending line in view
        if let Some(line) = app.error_line() {
            app.source_scroll = line.saturating_sub(3);
        }
        app
    }

    /// Line of the first diagnostic, parse errors first
    pub fn error_line(&self) -> Option<usize> {
        match &self.program {
            Err(e) => Some(e.line()),
            Ok(_) => self.lex_errors.first().map(|e| e.line),
        }
    }

    /// True when scanning and parsing both succeeded cleanly
    pub fn is_clean(&self) -> bool {
        self.program.is_ok() && self.lex_errors.is_empty()
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Create layout: 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        // Split into 2 columns
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(pane_area);

        // Left column: Source (top) | Tokens (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[0]);

        // Right column: Tree (top) | Output (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        let error_line = self.error_line();

        // Render each pane
        super::panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            error_line,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_tokens_pane(
            frame,
            left_rows[1],
            &self.tokens,
            &self.lex_errors,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        super::panes::render_tree_pane(
            frame,
            right_rows[0],
            &self.outline,
            self.program.as_ref().err(),
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        let (title, text) = match self.output_mode {
            OutputMode::Source => (" Output: Chourse ", self.rendered_source.as_deref()),
            OutputMode::C => (" Output: C ", self.rendered_c.as_deref()),
        };
        super::panes::render_output_pane(
            frame,
            right_rows[1],
            title,
            text,
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        // Render status bar
        super::panes::render_status_bar(
            frame,
            status_area,
            &self.file_name,
            &self.status_message,
            self.is_clean(),
            self.output_mode.name(),
        );
    }

    /// Scroll offset of the focused pane
    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Source => &mut self.source_scroll,
            FocusedPane::Tokens => &mut self.tokens_scroll,
            FocusedPane::Tree => &mut self.tree_scroll,
            FocusedPane::Output => &mut self.output_scroll,
        }
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::PageUp => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(PAGE_SIZE);
            }
            KeyCode::PageDown => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(PAGE_SIZE);
            }
            KeyCode::Home => {
                *self.focused_scroll() = 0;
            }
            KeyCode::End => {
                // Clamped to the last page on the next render
                *self.focused_scroll() = usize::MAX;
            }
            KeyCode::Char('v') | KeyCode::Char('V') => {
                self.output_mode = self.output_mode.toggle();
                self.output_scroll = 0;
                self.status_message = format!("Showing {} output", self.output_mode.name());
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::LexErrorKind;
    use crate::parser::parse::ParseErrorKind;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_focus_cycles_both_ways() {
        let mut pane = FocusedPane::Source;
        for _ in 0..4 {
            pane = pane.next();
        }
        assert_eq!(pane, FocusedPane::Source);
        assert_eq!(FocusedPane::Source.next().prev(), FocusedPane::Source);
        assert_eq!(FocusedPane::Source.prev(), FocusedPane::Tokens);
    }

    #[test]
    fn test_new_renders_all_back_ends() {
        let app = App::new(
            "add.chourse",
            "fun add(a: Int, b: Int) {\n  return a + b\n}\n".to_string(),
        );

        assert!(app.is_clean());
        assert_eq!(app.error_line(), None);
        assert_eq!(app.outline[0], "Program");
        assert!(app.rendered_source.as_deref().is_some_and(|s| s.starts_with("fun add")));
        assert!(app.rendered_c.as_deref().is_some_and(|s| s.contains("int add(int a, int b)")));
        assert_eq!(app.status_message, "Parsed 1 top-level statement(s)");
    }

    #[test]
    fn test_new_keeps_parse_error() {
        let source = "\n\n\n\n\nval = 1\n".to_string();
        let app = App::new("bad.chourse", source);

        assert!(!app.is_clean());
        assert_eq!(app.error_line(), Some(6));
        assert_eq!(app.source_scroll, 3);
        assert!(app.outline.is_empty());
        assert!(app.rendered_source.is_none());
        assert!(app.status_message.starts_with("Parse error at line 6"));
    }

    #[test]
    fn test_lex_error_is_reported() {
        // `#` is dropped, leaving `x = 1 2` for the parser
        let app = App::new("lex.chourse", "x = 1 # 2\n".to_string());
        assert_eq!(app.lex_errors.len(), 1);
        assert_eq!(app.lex_errors[0].kind, LexErrorKind::UnexpectedCharacter('#'));
        let err = app.program.as_ref().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(err.token.lexeme, "2");
        assert!(!app.is_clean());
        assert_eq!(app.error_line(), Some(1));

        let app = App::new("lex.chourse", "x = 1 #\n".to_string());
        assert_eq!(app.lex_errors.len(), 1);
        assert!(app.program.is_ok());
        assert!(!app.is_clean());
        assert_eq!(app.error_line(), Some(1));
        assert!(app.rendered_source.is_some());
    }

    #[test]
    fn test_scroll_keys_move_focused_pane_only() {
        let mut app = App::new("x.chourse", "x\n".to_string());

        press(&mut app, KeyCode::Tab); // tree
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.tree_scroll, 1 + PAGE_SIZE);
        assert_eq!(app.source_scroll, 0);

        press(&mut app, KeyCode::Up);
        assert_eq!(app.tree_scroll, PAGE_SIZE);
        press(&mut app, KeyCode::Home);
        assert_eq!(app.tree_scroll, 0);
        press(&mut app, KeyCode::End);
        assert_eq!(app.tree_scroll, usize::MAX);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.tree_scroll, usize::MAX - PAGE_SIZE);
    }

    #[test]
    fn test_toggle_output_and_quit() {
        let mut app = App::new("x.chourse", "x\n".to_string());

        press(&mut app, KeyCode::Char('v'));
        assert_eq!(app.output_mode, OutputMode::C);
        press(&mut app, KeyCode::Char('v'));
        assert_eq!(app.output_mode, OutputMode::Source);

        assert!(!app.should_quit);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}

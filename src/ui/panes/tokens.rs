//! Token stream pane rendering

use super::utils::{clamp_scroll, pane_block, visible_height};
use crate::parser::lexer::LexError;
use crate::parser::token::{Token, TokenKind};
use crate::transpiler::escape_control;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Padding},
    Frame,
};

fn token_style(kind: TokenKind) -> Style {
    match kind {
        k if k.is_keyword() => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        TokenKind::Number => Style::default().fg(DEFAULT_THEME.number),
        TokenKind::String => Style::default().fg(DEFAULT_THEME.string),
        TokenKind::Label => Style::default().fg(DEFAULT_THEME.label),
        TokenKind::Identifier => Style::default().fg(DEFAULT_THEME.fg),
        TokenKind::NewLine | TokenKind::Eof => Style::default().fg(DEFAULT_THEME.comment),
        _ => Style::default().fg(DEFAULT_THEME.primary),
    }
}

/// One row per token: line, kind, lexeme
fn token_row(token: &Token) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:4} ", token.line),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(format!("{:<12} ", token.kind), token_style(token.kind)),
        Span::styled(
            escape_control(&token.lexeme),
            Style::default().fg(DEFAULT_THEME.fg),
        ),
    ])
}

/// Render the token pane. Scanner diagnostics are listed above the tokens.
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    lex_errors: &[LexError],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = format!(" Tokens ({}) ", tokens.len());
    let block = pane_block(&title, is_focused).padding(Padding::new(1, 0, 0, 0));

    let all_items: Vec<ListItem> = lex_errors
        .iter()
        .map(|e| ListItem::new(e.to_string()).style(Style::default().fg(DEFAULT_THEME.error)))
        .chain(tokens.iter().map(|t| ListItem::new(token_row(t))))
        .collect();

    let visible_height = visible_height(area);
    clamp_scroll(scroll_offset, all_items.len(), visible_height);

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}

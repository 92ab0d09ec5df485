//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state
//! ([`crate::app`]) and input handling ([`crate::input`]).  The layout is a
//! two-row split: the scrollable joke list on top and a one-line status bar
//! at the bottom.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let [main_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    draw_joke_list(app, frame, main_area);
    draw_status_bar(app, frame, status_area);
}

/// Render the scrollable joke list, oldest at the top, newest at the bottom.
fn draw_joke_list(app: &mut App, frame: &mut Frame, area: Rect) {
    let list_items: Vec<ListItem> = app
        .jokes
        .iter()
        .map(|joke| {
            let line = Line::from(vec![
                Span::styled(
                    joke.received_at.format("%H:%M:%S").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(" "),
                Span::styled(&joke.text, Style::default().fg(Color::White)),
                Span::raw("  "),
                Span::styled(
                    format!("[{}]", joke.source_name),
                    Style::default().fg(Color::Cyan),
                ),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(list_items)
        .block(Block::default().title(" Life is a joke ").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(&app.status, Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(
            format!("{}/{} jokes", app.joke_count(), app.capacity()),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  q: quit  ↑/↓: scroll  Home/End: jump"),
    ]));
    frame.render_widget(status, area);
}

// ---------------------------------------------------------------------------
// Tests (rendering smoke tests)
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::JokeItem;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn app_with_jokes(texts: &[&str]) -> App {
        let mut app = App::new(10, Vec::new()).unwrap();
        for t in texts {
            app.push_joke(JokeItem::now(*t, "test"));
        }
        app
    }

    fn render(app: &mut App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(app, f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol().chars().next().unwrap_or(' '))
            .collect()
    }

    #[test]
    fn draw_does_not_panic_with_no_jokes() {
        let mut app = app_with_jokes(&[]);
        render(&mut app);
    }

    #[test]
    fn draw_shows_joke_text_and_source() {
        let mut app = app_with_jokes(&["a very funny joke"]);
        app.select_first();

        let text = render(&mut app);
        assert!(text.contains("a very funny joke"));
        assert!(text.contains("[test]"));
    }

    #[test]
    fn status_bar_shows_count_and_capacity() {
        let mut app = app_with_jokes(&["one", "two", "three"]);
        app.status = "OK".to_string();

        let text = render(&mut app);
        assert!(text.contains("3/10 jokes"), "status bar should show count");
        assert!(text.contains("OK"));
    }
}

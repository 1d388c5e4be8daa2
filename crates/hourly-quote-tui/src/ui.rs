use hourly_quote_core::{render as render_view, Background, Category, WidgetView};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;

const WIDGET_WIDTH: u16 = 56;
const WIDGET_HEIGHT: u16 = 12;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    let [body_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let widget_area = centered(body_area, WIDGET_WIDTH, WIDGET_HEIGHT);
    render_widget(app, frame, widget_area);

    render_footer(app, frame, footer_area);

    if app.show_category_picker {
        render_category_picker(app, frame, area);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Terminal stand-in for the background artwork.
fn background_color(background: Background) -> Color {
    match background {
        Background::Default => Color::Rgb(242, 233, 216),
    }
}

fn render_widget(app: &App, frame: &mut Frame, area: Rect) {
    let background = background_color(app.entry.background);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .style(Style::default().bg(background).fg(Color::Black));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // One column of padding on each side
    let text_width = inner.width.saturating_sub(2) as usize;
    let view = render_view(&app.entry, text_width);

    let [_, quote_area, author_area, _, action_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(view.quote_lines.len() as u16),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    let quote_lines: Vec<Line> = view
        .quote_lines
        .iter()
        .map(|l| Line::from(l.as_str()))
        .collect();
    let quote = Paragraph::new(quote_lines)
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::ITALIC));
    frame.render_widget(quote, quote_area);

    let author = Paragraph::new(Line::from(vec![
        Span::raw("❝ "),
        Span::styled(view.author.clone(), Style::default().bold()),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(author, author_area);

    render_action_row(app, &view, frame, action_area);
}

fn render_action_row(app: &App, view: &WidgetView, frame: &mut Frame, area: Rect) {
    let [category_area, action_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(12)]).areas(area);

    let category = Paragraph::new(format!(" {}", view.category_label))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(category, category_area);

    let action = if app.is_fetching() {
        let dots = ".".repeat(app.animation_frame as usize + 1);
        Span::styled(format!("{:<4}", dots), Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(view.action_label, Style::default().bold())
    };
    let action = Paragraph::new(Line::from(vec![action, Span::raw(" ")]))
        .alignment(Alignment::Right);
    frame.render_widget(action, action_area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().fg(Color::Gray);

    let mut spans = vec![
        Span::styled(" n ", key_style),
        Span::styled(" next ", label_style),
        Span::styled(" c ", key_style),
        Span::styled(" category ", label_style),
        Span::styled(" q ", key_style),
        Span::styled(" quit ", label_style),
    ];

    if app.is_fetching() {
        spans.push(Span::styled(
            format!("  {}", fetching_label(app.animation_frame)),
            Style::default().fg(Color::Yellow),
        ));
    } else {
        spans.push(Span::styled(
            format!("  updated {}", app.entry.date.format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn fetching_label(frame: u8) -> String {
    format!("Fetching{:<3}", ".".repeat(frame as usize % 3 + 1))
}

fn render_category_picker(app: &mut App, frame: &mut Frame, area: Rect) {
    let categories = Category::all();

    let popup_width = 30.min(area.width.saturating_sub(4));
    let popup_height = (categories.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_area = centered(area, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Category ");

    let current = app.scheduler.state().category();
    let items: Vec<ListItem> = categories
        .iter()
        .map(|category| {
            let style = if *category == current {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!(" {} ", category.display_name())).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(list, popup_area, &mut app.category_picker_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use hourly_quote_core::Config;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn test_app() -> App {
        let mut app = App::new(&Config::new());
        app.persist_config = false;
        app
    }

    #[test]
    fn test_draws_default_quote() {
        let mut app = test_app();
        let screen = draw(&mut app);
        assert!(screen.contains("Widget Rocks!"));
        assert!(screen.contains("iOS Ninja"));
        assert!(screen.contains("next"));
    }

    #[test]
    fn test_footer_shows_fetching_indicator() {
        let mut config = Config::new();
        config.base_url = Some("http://127.0.0.1:1".to_string());
        let mut app = App::new(&config);
        app.persist_config = false;

        // Enter the fetching phase without spawning a task
        app.scheduler.begin_fetch();
        let screen = draw(&mut app);
        assert!(screen.contains("Fetching."));
        assert!(!screen.contains("updated"));

        app.scheduler.abandon_fetch();
        let screen = draw(&mut app);
        assert!(!screen.contains("Fetching"));
        assert!(screen.contains("updated"));
    }

    #[test]
    fn test_fetching_label_animates() {
        assert_eq!(fetching_label(0), "Fetching.  ");
        assert_eq!(fetching_label(1), "Fetching.. ");
        assert_eq!(fetching_label(2), "Fetching...");
    }

    #[test]
    fn test_draws_category_picker() {
        let mut app = test_app();
        app.open_category_picker();
        let screen = draw(&mut app);
        assert!(screen.contains("Category"));
        assert!(screen.contains("education"));
        assert!(screen.contains("family"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut app = test_app();
        let mut terminal = Terminal::new(TestBackend::new(3, 2)).unwrap();
        terminal.draw(|frame| render(&mut app, frame)).unwrap();
    }
}

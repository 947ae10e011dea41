//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).  Cards arrive fully prepared from
//! [`crate::card`]; this module only decides where things go.
//!
//! ## For contributors
//!
//! * The layout is a three-row split: a one-line header, the card area, and
//!   a one-line status bar.
//! * Colours and styles are defined inline.
//! * [`ratatui`] is the TUI framework; see its docs for widget details.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::card::{ArticleCard, Body, EventCard, ImageRef, Link};
use crate::route::Route;
use crate::session::ViewState;
use crate::view::{Collection, View};

/// Draw the complete UI for one frame.
pub fn draw(app: &App, frame: &mut Frame) {
    let [header_area, main_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(app, frame, header_area);
    match &app.view {
        Some(view) => draw_view(app, view, frame, main_area),
        None => draw_welcome(frame, main_area),
    }
    draw_status_bar(app, frame, status_area);
}

fn draw_header(app: &App, frame: &mut Frame, area: Rect) {
    let active = app.view.as_ref().map(|v| v.route().label());
    let tab = |label: &'static str| {
        let style = if active == Some(label) {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(format!(" {label} "), style)
    };

    let mut spans = vec![
        Span::styled(" Knowledge Leaf ", Style::default().add_modifier(Modifier::BOLD)),
        tab(Route::Random.label()),
        tab(Route::Events.label()),
    ];
    if app.reading_count > 0 {
        spans.push(Span::styled(
            format!("  Today's reading: {}", app.reading_count),
            Style::default().fg(Color::Green),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_welcome(frame: &mut Frame, area: Rect) {
    let text = Paragraph::new("Press r for random trivia or 2 for on this day.")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(text, area);
}

fn draw_view(app: &App, view: &View, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", view.route().label()))
        .borders(Borders::ALL);

    let lines: Vec<Line> = match (view.state(), view.collection()) {
        (ViewState::Idle | ViewState::Loading, _) => vec![Line::styled(
            "⟳ Loading…",
            Style::default().fg(Color::Cyan),
        )],
        (ViewState::Failed(err), _) => vec![
            Line::styled(format!("Could not load: {err}"), Style::default().fg(Color::Red)),
            Line::raw(""),
            Line::raw("Press R to retry."),
        ],
        (ViewState::Loaded(_), Some(collection)) if collection.is_empty() => vec![Line::styled(
            "Nothing here today.",
            Style::default().fg(Color::DarkGray),
        )],
        (ViewState::Loaded(_), Some(Collection::Trivia(nav))) => nav
            .current()
            .map(|article| article_lines(&ArticleCard::new(article)))
            .unwrap_or_default(),
        (ViewState::Loaded(_), Some(collection @ Collection::Events(_))) => {
            match collection.current_event() {
                Some(event) => {
                    let card = EventCard::new(event, &app.host, app.today());
                    let mut lines = vec![Line::styled(
                        format!("‹ {}/{} ›", collection.index() + 1, collection.len()),
                        Style::default().fg(Color::DarkGray),
                    )];
                    lines.extend(event_lines(&card));
                    lines
                }
                None => Vec::new(),
            }
        }
        (ViewState::Loaded(_), None) => Vec::new(),
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn image_line(image: &ImageRef) -> Line<'static> {
    if image.is_placeholder() {
        return Line::styled(
            format!("[no image] {}", image.url),
            Style::default().fg(Color::DarkGray),
        );
    }
    let size = image
        .size
        .map(|(w, h)| format!(" ({w}×{h})"))
        .unwrap_or_default();
    Line::styled(
        format!("[image] {}{size}", image.url),
        Style::default().fg(Color::DarkGray),
    )
}

fn link_line(link: &Link) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            link.label.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
        ),
        Span::styled(format!("  <{}>", link.url), Style::default().fg(Color::DarkGray)),
    ])
}

fn heading_line(text: &str) -> Line<'static> {
    Line::styled(text.to_string(), Style::default().add_modifier(Modifier::BOLD))
}

fn article_lines(card: &ArticleCard) -> Vec<Line<'static>> {
    let mut lines = vec![image_line(&card.image), Line::raw(""), heading_line(&card.heading)];

    match &card.body {
        Body::Paragraph(text) => lines.extend(text.lines().map(|l| Line::raw(l.to_string()))),
        Body::List(items) => lines.extend(items.iter().map(|i| Line::raw(format!("  • {i}")))),
    }

    lines.push(Line::raw(""));
    lines.push(link_line(&card.source));

    if !card.categories.is_empty() {
        lines.push(Line::raw(""));
        lines.extend(card.categories.iter().map(|c| {
            Line::from(vec![
                Span::styled(format!("#{}", c.label), Style::default().fg(Color::Green)),
                Span::styled(format!("  <{}>", c.url), Style::default().fg(Color::DarkGray)),
            ])
        }));
    }
    lines
}

fn event_lines(card: &EventCard) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading_line(&card.heading),
        Line::styled(card.when.clone(), Style::default().fg(Color::Yellow)),
        image_line(&card.image),
        Line::raw(""),
        Line::raw(card.extract.clone()),
        Line::raw(""),
        link_line(&card.source),
    ];
    if let Some(url) = &card.share_url {
        lines.push(Line::styled(format!("Share: {url}"), Style::default().fg(Color::DarkGray)));
    }
    if !card.references.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled("References", Style::default().add_modifier(Modifier::UNDERLINED)));
        lines.extend(card.references.iter().map(link_line));
    }
    lines
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let status = Paragraph::new(Line::from(vec![
        Span::styled(" ", Style::default()),
        Span::styled(&app.status, Style::default().fg(Color::Yellow)),
        Span::raw("  q: quit  r: random  2: on this day  ←/→: browse  s: share"),
    ]));
    frame.render_widget(status, area);
}

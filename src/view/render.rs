//! Wall rendering.
//!
//! Pure functions from component state to a ratatui frame. The layout engine
//! works in pixels; [`CellMetrics`] converts between pixels and terminal
//! cells so cards keep their relative heights on screen.

use crate::component::{Rgb, WallComponent};
use crate::layout::{CardView, Measurable, TextCardFactory};
use crate::model::{AttachmentKind, ContentId, ContentItem};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Smallest card: two borders and one line of text.
const MIN_CARD_ROWS: u16 = 3;

/// Pixel size of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    /// Pixels per column.
    pub width_px: u32,
    /// Pixels per row.
    pub height_px: u32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width_px: 8,
            height_px: 16,
        }
    }
}

impl CellMetrics {
    /// Container width in pixels for `columns` terminal columns.
    pub fn container_width(&self, columns: u16) -> u32 {
        u32::from(columns) * self.width_px.max(1)
    }

    /// Rows a card `height_px` tall occupies, never fewer than [`MIN_CARD_ROWS`].
    pub fn rows_for(&self, height_px: u32) -> u16 {
        let rows = height_px.div_ceil(self.height_px.max(1));
        u16::try_from(rows).unwrap_or(u16::MAX).max(MIN_CARD_ROWS)
    }

    /// Card factory whose estimates line up with terminal rows.
    ///
    /// Text wraps at the narrowest column an auto-fit wall can produce, minus
    /// the card borders. Chrome is the two borders plus the author line.
    pub fn card_factory(&self, min_content_width: u32) -> TextCardFactory {
        let cells = min_content_width / self.width_px.max(1);
        TextCardFactory {
            text_width: (cells.saturating_sub(2) as usize).max(1),
            line_height: self.height_px,
            chrome: self.height_px * 3,
        }
    }
}

/// Everything the renderer needs besides the component.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenState<'a> {
    /// Card with keyboard focus.
    pub focused: Option<&'a ContentId>,
    /// Card shown in the modal.
    pub modal: Option<&'a ContentId>,
    /// Whether the source can still deliver content.
    pub live: bool,
    /// Pixel to cell conversion.
    pub metrics: CellMetrics,
}

/// Render header, columns, footer and any open modal.
pub fn render_wall<F>(frame: &mut Frame, component: &WallComponent<F>, screen: &ScreenState<'_>)
where
    F: crate::layout::CardFactory<Card = CardView> + Clone,
{
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], component);
    render_columns(frame, chunks[1], component, screen);
    render_footer(frame, chunks[2], component, screen.live);

    if let Some(id) = screen.modal {
        if let Some(card) = find_card(component, id) {
            render_modal(frame, chunks[1], card.content());
        }
    }
}

fn accent(component_link: Option<Rgb>) -> Color {
    match component_link {
        Some(rgb) => Color::Rgb(rgb.r, rgb.g, rgb.b),
        None => Color::Cyan,
    }
}

fn render_header<F>(frame: &mut Frame, area: Rect, component: &WallComponent<F>)
where
    F: crate::layout::CardFactory<Card = CardView> + Clone,
{
    let link = accent(component.theme().link_color());
    let mut spans = vec![Span::styled(
        "Media Wall",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(collection) = component.collection() {
        spans.push(Span::raw(format!("  {}", collection.article_id)));
    }
    if component.header().post_button_visible() {
        if let Some(button) = component.header().post_button() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("[{}]", button.label()),
                Style::default().fg(link),
            ));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_columns<F>(
    frame: &mut Frame,
    area: Rect,
    component: &WallComponent<F>,
    screen: &ScreenState<'_>,
) where
    F: crate::layout::CardFactory<Card = CardView> + Clone,
{
    let engine = component.wall().engine();
    let count = engine.columns().len();
    if count == 0 || area.height == 0 {
        return;
    }
    let constraints = vec![Constraint::Ratio(1, count as u32); count];
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (column, column_area) in engine.columns().iter().zip(areas.iter()) {
        let mut y = column_area.y;
        let bottom = column_area.y + column_area.height;
        for card in column.visible_cards() {
            if y >= bottom {
                break;
            }
            let rows = screen
                .metrics
                .rows_for(card.height().unwrap_or(0))
                .min(bottom - y);
            let card_area = Rect::new(column_area.x, y, column_area.width, rows);
            let focused = screen.focused == Some(&card.content().id);
            render_card(frame, card_area, card.content(), focused);
            y += rows;
        }
    }
}

fn card_lines(item: &ContentItem) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(author) = &item.author {
        lines.push(Line::styled(
            author.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    lines.extend(item.body.lines().map(|l| Line::from(l.to_string())));
    for attachment in &item.attachments {
        let kind = match attachment.kind {
            AttachmentKind::Photo => "photo",
            AttachmentKind::Video => "video",
            AttachmentKind::Link => "link",
        };
        lines.push(Line::styled(
            format!("[{kind}]"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines
}

fn render_card(frame: &mut Frame, area: Rect, item: &ContentItem, focused: bool) {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(item.id.as_str().to_string());
    let paragraph = Paragraph::new(card_lines(item))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_footer<F>(frame: &mut Frame, area: Rect, component: &WallComponent<F>, live: bool)
where
    F: crate::layout::CardFactory<Card = CardView> + Clone,
{
    let wall = component.wall();
    let engine = wall.engine();
    let mut spans = Vec::new();
    if live {
        spans.push(Span::styled("[LIVE] ", Style::default().fg(Color::Green)));
    }
    spans.push(Span::raw(format!(
        "{} cards in {} columns",
        engine.len(),
        engine.column_count()
    )));
    let waiting = wall.stash().len();
    if waiting > 0 || engine.visible_len() < engine.len() {
        spans.push(Span::styled(
            format!("  {} more (m)", waiting + engine.len() - engine.visible_len()),
            Style::default().fg(accent(component.theme().link_color())),
        ));
    }
    spans.push(Span::styled(
        "  r: relayout  q: quit",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_modal(frame: &mut Frame, area: Rect, item: &ContentItem) {
    let popup = centered(area, 60, 60);
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{} (Esc to close)", item.id));
    frame.render_widget(
        Paragraph::new(card_lines(item))
            .block(block)
            .wrap(Wrap { trim: true }),
        popup,
    );
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Find a card on the wall by id.
pub fn find_card<'a, F>(component: &'a WallComponent<F>, id: &ContentId) -> Option<&'a CardView>
where
    F: crate::layout::CardFactory<Card = CardView> + Clone,
{
    component
        .wall()
        .engine()
        .columns()
        .iter()
        .flat_map(|column| column.cards())
        .find(|card| &card.content().id == id)
}

/// Visible cards in reading order: left column top to bottom, then the next.
pub fn visible_ids<F>(component: &WallComponent<F>) -> Vec<ContentId>
where
    F: crate::layout::CardFactory<Card = CardView> + Clone,
{
    component
        .wall()
        .engine()
        .columns()
        .iter()
        .flat_map(|column| column.visible_cards())
        .map(|card| card.content().id.clone())
        .collect()
}

/// Flatten a buffer to text, trimming trailing blanks and blank lines.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();
    for y in area.top()..area.bottom() {
        let line: String = (area.left()..area.right())
            .map(|x| buffer[(x, y)].symbol())
            .collect();
        lines.push(line.trim_end().to_string());
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

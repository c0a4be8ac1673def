use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, TableState};

use crate::domain::HELP_TEXT;
use crate::entry::{COLUMNS, Entry};
use crate::model::{Model, Status};
use crate::sort::Direction;

// Ascending shows the down arrow, descending the up arrow.
const ARROW_ASC: &str = " ↓";
const ARROW_DESC: &str = " ↑";

const COLUMN_WIDTHS: [Constraint; 4] = [
    Constraint::Percentage(30),
    Constraint::Percentage(25),
    Constraint::Percentage(20),
    Constraint::Percentage(25),
];

pub struct TableUI {
    state: TableState,
}

impl TableUI {
    pub fn new() -> Self {
        Self {
            state: TableState::default(),
        }
    }

    pub fn draw(&mut self, model: &Model, frame: &mut Frame) {
        let [table_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        match &model.status {
            Status::Failed(reason) => draw_failed(reason, frame, table_area),
            // No data (still loading, or the source had no rows) renders an
            // empty body rather than a spinner or an error.
            _ if model.is_empty() => {}
            _ => self.draw_table(model, frame, table_area),
        }

        draw_status_line(model, frame, status_area);

        if model.help_open() {
            draw_help(frame, frame.area());
        }
    }

    fn draw_table(&mut self, model: &Model, frame: &mut Frame, area: Rect) {
        let rows: Vec<Row> = model
            .visible_rows()
            .into_iter()
            .map(|entry| {
                Row::new(vec![
                    Cell::from(entry.name.clone()),
                    Cell::from(entry.office_sought.clone()),
                    Cell::from(entry.office_level.clone()),
                    handle_cell(entry),
                ])
            })
            .collect();

        let table = Table::new(rows, COLUMN_WIDTHS)
            .header(header_row(model))
            .column_spacing(1)
            .row_highlight_style(Style::new().reversed());

        self.state.select(Some(model.selected_row()));
        frame.render_stateful_widget(table, area, &mut self.state);
    }
}

fn header_row(model: &Model) -> Row<'static> {
    let cells: Vec<Cell> = COLUMNS
        .iter()
        .map(|&column| {
            let mut label = column.label().to_string();
            match model.sort().direction_for(column) {
                Some(Direction::Ascending) => label.push_str(ARROW_ASC),
                Some(Direction::Descending) => label.push_str(ARROW_DESC),
                None => {}
            }
            let mut span = Span::from(label).bold();
            if column == model.selected_column_key() {
                span = span.underlined();
            }
            Cell::from(span)
        })
        .collect();
    Row::new(cells).bottom_margin(1)
}

/// Handles starting with '@' are shown as a styled link, everything else
/// (e.g. "N/A") as plain text.
fn handle_cell(entry: &Entry) -> Cell<'static> {
    if entry.has_tweet_link() {
        Cell::from(entry.twitter_handle.clone().blue().bold())
    } else {
        Cell::from(entry.twitter_handle.clone())
    }
}

fn draw_failed(reason: &str, frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from("Failed to load pledge data".red().bold()),
        Line::from(reason.to_string()),
    ];
    frame.render_widget(Paragraph::new(text).centered(), centered_rect(area, 70, 3));
}

fn draw_status_line(model: &Model, frame: &mut Frame, area: Rect) {
    let line = if model.searching() {
        search_line(model)
    } else {
        let mut parts = vec![Span::from(model.status_message().to_string())];
        if !model.search().is_empty() {
            parts.push(Span::from(format!("  filter: \"{}\"", model.search())).italic());
        }
        parts.push(Span::from(format!(
            "  [{}/{}]",
            model.visible_rows().len(),
            model.entry_count()
        )));
        parts.push(Span::from("  ? for help").dim());
        Line::from(parts)
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn search_line(model: &Model) -> Line<'static> {
    let edit = model.search_edit();
    let byte_pos = edit
        .query
        .char_indices()
        .nth(edit.cursor)
        .map(|(idx, _)| idx)
        .unwrap_or(edit.query.len());
    let before = edit.query[..byte_pos].to_string();
    let mut after_chars = edit.query[byte_pos..].chars();
    let at_cursor = after_chars.next().map(String::from).unwrap_or_else(|| " ".to_string());
    let after: String = after_chars.collect();

    Line::from(vec![
        Span::from("/").bold(),
        Span::from(before),
        Span::from(at_cursor).reversed(),
        Span::from(after),
    ])
}

fn draw_help(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(area, 44, 18);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(HELP_TEXT).block(Block::bordered().title(" help ")),
        popup,
    );
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

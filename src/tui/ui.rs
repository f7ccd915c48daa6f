use crate::tui::app::{App, InputMode, Tab, TEXT_FIELDS};
use crate::tui::theme;
use crate::usecase::Quadrant;
use ratatui::prelude::*;
use ratatui::symbols;
use ratatui::widgets::{
    Axis, Block, Cell, Chart, Clear, Dataset, GraphType, Paragraph, Row, Table, Tabs,
};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 8 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Tabs(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);
    match app.current_tab {
        Tab::Entry => render_entry(frame, chunks[2], app),
        Tab::Dashboard => render_dashboard(frame, chunks[2], app),
        Tab::Matrix => render_matrix(frame, chunks[2], app),
    }
    render_status_bar(frame, chunks[3], app);

    match app.input_mode {
        InputMode::ConfirmDelete(index) => render_confirm_popup(
            frame,
            "Delete Use Case",
            &format!(
                "Delete \"{}\"?",
                app.state
                    .use_cases
                    .get(index)
                    .map(|uc| uc.title.as_str())
                    .unwrap_or("?")
            ),
        ),
        InputMode::ConfirmQuit => render_confirm_popup(
            frame,
            "Unsaved Changes",
            "Quit anyway? The draft will be kept for next time.",
        ),
        InputMode::Help => render_help_popup(frame),
        InputMode::Normal | InputMode::EditingField => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        "Caseboard",
        Style::default().fg(theme::TITLE_COLOR).bold(),
    )];

    let count_text = format!("{} use cases", app.state.use_cases.len());
    let left_len = "Caseboard".len();
    let padding_len = (area.width as usize).saturating_sub(left_len + count_text.len());
    spans.push(Span::raw(" ".repeat(padding_len)));
    spans.push(Span::styled(count_text, Style::default().fg(theme::MUTED)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles = vec!["Entry", "Dashboard", "Matrix"];
    let selected = match app.current_tab {
        Tab::Entry => 0,
        Tab::Dashboard => 1,
        Tab::Matrix => 2,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(theme::MUTED))
        .highlight_style(Style::default().fg(theme::TITLE_COLOR).bold().reversed())
        .divider(" | ");

    frame.render_widget(tabs, area);
}

fn render_entry(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(2)]).split(area);

    let scale = app.config.dimensions.scale;
    let bar_width = (scale.max - scale.min).max(1.0) as usize;

    let rows: Vec<Row> = (0..app.field_count())
        .map(|idx| {
            let label = app.field_label(idx);
            let value_line = if idx < TEXT_FIELDS {
                if app.input_mode == InputMode::EditingField && idx == app.field_cursor {
                    Line::from(format!("{}|", app.edit_buffer))
                } else {
                    let value = app.text_field(idx);
                    if value.is_empty() {
                        Line::from(Span::styled("-", Style::default().fg(theme::MUTED)))
                    } else {
                        Line::from(single_line(value, 80))
                    }
                }
            } else {
                let rating = app.rating_at(idx);
                let filled = (rating - scale.min as i64).max(0) as usize;
                let mut spans = vec![Span::styled(
                    "█".repeat(filled.min(bar_width)),
                    Style::default().fg(theme::TITLE_COLOR),
                )];
                spans.push(Span::styled(
                    "░".repeat(bar_width.saturating_sub(filled)),
                    Style::default().fg(theme::BAR_EMPTY),
                ));
                spans.push(Span::raw(format!(" {}", rating)));
                Line::from(spans)
            };

            let row_style = if idx == app.field_cursor {
                theme::row_selected()
            } else if idx % 2 == 1 {
                Style::default().bg(theme::ROW_ALT_BG)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(label).style(Style::default().fg(theme::FIELD_LABEL)),
                Cell::from(value_line),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [Constraint::Length(28), Constraint::Fill(1)];
    let table = Table::new(rows, widths).header(
        Row::new(vec!["Field", "Value"])
            .style(theme::header_style())
            .bottom_margin(1),
    );
    frame.render_widget(table, chunks[0]);

    // Live score preview under the form
    let preview = app.preview();
    let preview_line = Line::from(vec![
        Span::styled("Business Value ", Style::default().fg(theme::MUTED)),
        Span::styled(format!("{:.1}", preview.business_value), Style::new().bold()),
        Span::styled("  Feasibility ", Style::default().fg(theme::MUTED)),
        Span::styled(format!("{:.1}", preview.feasibility), Style::new().bold()),
        Span::raw("  "),
        Span::styled(
            format!(" {} ", preview.quadrant.label()),
            Style::default()
                .fg(Color::Black)
                .bg(theme::quadrant_color(preview.quadrant)),
        ),
    ]);
    frame.render_widget(Paragraph::new(preview_line), chunks[1]);
}

fn render_dashboard(frame: &mut Frame, area: Rect, app: &mut App) {
    if app.state.use_cases.is_empty() {
        let empty_msg =
            Paragraph::new("No use cases yet. Switch to the Entry tab to create the first one.")
                .alignment(Alignment::Center)
                .block(Block::default());
        frame.render_widget(empty_msg, area);
        return;
    }

    let rows: Vec<Row> = app
        .state
        .use_cases
        .iter()
        .enumerate()
        .map(|(idx, uc)| {
            let row_style = if idx % 2 == 1 {
                Style::default().bg(theme::ROW_ALT_BG)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(format!("{}.", idx + 1))
                    .style(Style::default().fg(theme::INDEX_COLOR)),
                Cell::from(single_line(&uc.title, 60)),
                Cell::from(format!("{:.1}", uc.business_value)),
                Cell::from(format!("{:.1}", uc.feasibility)),
                Cell::from(uc.quadrant.label())
                    .style(Style::default().fg(theme::quadrant_color(uc.quadrant))),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(26),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["#", "Title", "Value", "Feas.", "Quadrant"])
                .style(theme::header_style())
                .bottom_margin(1),
        )
        .row_highlight_style(theme::row_selected());

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_matrix(frame: &mut Frame, area: Rect, app: &App) {
    let scale = app.config.dimensions.scale;
    let threshold = app.config.dimensions.threshold();

    // One dataset per quadrant so each gets its own color.
    let point_groups: Vec<(Quadrant, Vec<(f64, f64)>)> = Quadrant::all()
        .into_iter()
        .map(|q| {
            let points = app
                .state
                .use_cases
                .iter()
                .filter(|uc| uc.quadrant == q)
                .map(|uc| (uc.feasibility, uc.business_value))
                .collect();
            (q, points)
        })
        .collect();

    let datasets: Vec<Dataset> = point_groups
        .iter()
        .map(|(q, points)| {
            Dataset::default()
                .name(q.label())
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(theme::quadrant_color(*q)))
                .data(points)
        })
        .collect();

    let axis_labels = vec![
        format!("{}", scale.min),
        format!("{}", threshold),
        format!("{}", scale.max),
    ];

    let chart = Chart::new(datasets)
        .block(Block::bordered().title(" Priority Matrix "))
        .x_axis(
            Axis::default()
                .title("Feasibility")
                .style(Style::default().fg(theme::MUTED))
                .bounds([scale.min, scale.max])
                .labels(axis_labels.clone()),
        )
        .y_axis(
            Axis::default()
                .title("Business Value")
                .style(Style::default().fg(theme::MUTED))
                .bounds([scale.min, scale.max])
                .labels(axis_labels),
        );

    frame.render_widget(chart, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Failed") || msg.starts_with("Please") {
            theme::FLASH_ERROR
        } else {
            theme::FLASH_SUCCESS
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints: &[(&str, &str)] = match (app.current_tab, &app.input_mode) {
            (_, InputMode::EditingField) => {
                &[("Enter", ":apply "), ("Esc", ":discard")]
            }
            (Tab::Entry, _) => &[
                ("j/k", ":field "),
                ("Enter", ":edit "),
                ("h/l", ":rate "),
                ("s", ":save "),
                ("n", ":clear "),
                ("Tab", ":view "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            (Tab::Dashboard, _) => &[
                ("j/k", ":nav "),
                ("Enter", ":edit "),
                ("d", ":delete "),
                ("Tab", ":view "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            (Tab::Matrix, _) => &[("Tab", ":view "), ("?", ":help "), ("q", ":quit")],
        };

        let mut spans = Vec::new();
        if app.state.dirty {
            spans.push(Span::styled("unsaved ", Style::default().fg(theme::FLASH_ERROR)));
        }
        for (key, label) in hints {
            spans.push(Span::styled(
                *key,
                Style::default().fg(theme::STATUS_KEY_COLOR),
            ));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme::STATUS_BAR_BG)),
        area,
    );
}

/// First line of a value, truncated for table display.
fn single_line(value: &str, max_width: usize) -> String {
    let first = value.lines().next().unwrap_or_default();
    let chars: Vec<char> = first.chars().collect();
    if chars.len() <= max_width {
        first.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn render_confirm_popup(frame: &mut Frame, title: &str, message: &str) {
    let popup_area = centered_rect_fixed(50, 5, frame.area());

    frame.render_widget(Clear, popup_area);
    let block = Block::bordered().title(format!(" {} ", title));
    frame.render_widget(block.clone(), popup_area);

    let inner = block.inner(popup_area);
    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(inner);

    frame.render_widget(Paragraph::new(single_line(message, 46)), chunks[0]);
    frame.render_widget(
        Paragraph::new("y: confirm | n/Esc: cancel").style(Style::default().fg(theme::MUTED)),
        chunks[1],
    );
}

fn render_help_popup(frame: &mut Frame) {
    let popup_area = centered_rect_fixed(52, 16, frame.area());

    frame.render_widget(Clear, popup_area);
    let block = Block::bordered().title(" Keyboard Shortcuts ");
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let entries = [
        ("j / k         ", "Move between form fields / rows"),
        ("Enter         ", "Edit selected text field"),
        ("h / l         ", "Lower / raise selected rating"),
        ("s             ", "Save use case"),
        ("n             ", "Clear form (new use case)"),
        ("Enter (list)  ", "Edit selected use case"),
        ("d             ", "Delete selected use case"),
        ("Tab           ", "Cycle Entry / Dashboard / Matrix"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(*key, Style::default().fg(Color::Cyan).bold()),
                Span::raw(*desc),
            ])
        })
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme::MUTED),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}

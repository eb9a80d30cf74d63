use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Bar, BarChart, BarGroup, Block, BorderType, Borders, Gauge, Paragraph, Row, Table, Wrap,
    },
    Frame,
};

use crate::tui::app::{App, InputMode};

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Content
            Constraint::Length(3), // Laytime gauge
            Constraint::Length(1), // Footer / input line
        ])
        .split(size);

    // Header
    let vessel = app
        .report
        .vessel
        .vessel_name
        .clone()
        .unwrap_or_else(|| "no vessel on file".to_string());
    let header = Paragraph::new(format!("SOFCALC | {}", vessel))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(header, main_chunks[0]);

    // Split Content into Left (Timeline) and Right (Detail + Chart)
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_chunks[1]);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(10)])
        .split(content_chunks[1]);

    draw_event_table(f, app, content_chunks[0]);
    draw_detail_view(f, app, right_chunks[0]);
    draw_utilization_chart(f, app, right_chunks[1]);
    draw_summary_gauge(f, app, main_chunks[2]);
    draw_footer(f, app, main_chunks[3]);
}

fn draw_event_table(f: &mut Frame, app: &mut App, area: Rect) {
    let rows: Vec<Row> = app
        .report
        .rows
        .iter()
        .map(|row| {
            Row::new(vec![
                Span::raw(row.day.clone()),
                Span::styled(
                    row.description.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(row.start.clone()),
                Span::raw(row.end.clone()),
                Span::raw(row.utilization.clone()),
                Span::raw(row.remaining.clone()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),  // Day
            Constraint::Min(16),    // Description
            Constraint::Length(16), // Start
            Constraint::Length(16), // End
            Constraint::Length(8),  // Used
            Constraint::Length(9),  // Remaining
        ],
    )
    .header(
        Row::new(vec!["Day", "Event", "Start", "End", "Used", "Left"])
            .style(Style::default().fg(Color::Yellow)),
    )
    .block(
        Block::default()
            .title(" Timeline ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    )
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_detail_view(f: &mut Frame, app: &App, area: Rect) {
    if let Some(selected_index) = app.state.selected() {
        if let Some(metric) = app.report.metrics.get(selected_index) {
            let event = &metric.event;
            let mut detail_text = vec![
                Line::from(vec![
                    Span::styled("Event: ", Style::default().fg(Color::Blue)),
                    Span::styled(
                        event.description.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Day: ", Style::default().fg(Color::Blue)),
                    Span::raw(event.day.as_deref().unwrap_or("-").to_string()),
                ]),
                Line::from(vec![
                    Span::styled("Start: ", Style::default().fg(Color::Blue)),
                    Span::raw(event.start.as_deref().unwrap_or("-").to_string()),
                ]),
                Line::from(vec![
                    Span::styled("End: ", Style::default().fg(Color::Blue)),
                    Span::raw(event.end.as_deref().unwrap_or("-").to_string()),
                ]),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Used: ", Style::default().fg(Color::Blue)),
                    Span::raw(format!("{:.2} h", metric.utilization_hours)),
                ]),
                Line::from(vec![
                    Span::styled("Consumed so far: ", Style::default().fg(Color::Blue)),
                    Span::raw(format!("{:.2} h", metric.cumulative_consumed_hours)),
                ]),
                Line::from(vec![
                    Span::styled("Remaining: ", Style::default().fg(Color::Blue)),
                    Span::raw(format!("{:.2} h", metric.remaining_hours)),
                ]),
            ];

            if let Some(remarks) = &event.remarks {
                detail_text.push(Line::from(""));
                detail_text.push(Line::from(Span::styled(
                    "Remarks:",
                    Style::default().fg(Color::Blue),
                )));
                detail_text.push(Line::from(remarks.as_str()));
            }

            let detail_block = Paragraph::new(detail_text)
                .block(
                    Block::default()
                        .title(" Detail ")
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded),
                )
                .wrap(Wrap { trim: true });

            f.render_widget(detail_block, area);
            return;
        }
    }

    let detail_block = Block::default()
        .title(" Detail ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    f.render_widget(detail_block, area);
}

fn draw_utilization_chart(f: &mut Frame, app: &App, area: Rect) {
    // One bar per event, in tenths of an hour so short events still show.
    let bars: Vec<Bar> = app
        .report
        .metrics
        .iter()
        .enumerate()
        .map(|(i, metric)| {
            let tenths = (metric.utilization_hours * 10.0).round() as u64;
            Bar::default()
                .label(format!("{}", i + 1))
                .value(tenths)
                .style(Style::default().fg(Color::Blue))
                .text_value(if tenths > 0 {
                    format!("{:.1}", metric.utilization_hours)
                } else {
                    String::new()
                })
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(" Hours per event ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .bar_width(4)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));

    f.render_widget(chart, area);
}

fn draw_summary_gauge(f: &mut Frame, app: &App, area: Rect) {
    let summary = &app.report.summary;
    let label = if summary.on_demurrage {
        format!(
            "{:.0}% of allowed | demurrage ${:.2}",
            summary.used_ratio * 100.0,
            summary.demurrage_display()
        )
    } else {
        format!(
            "{:.0}% of allowed | dispatch ${:.2}",
            summary.used_ratio * 100.0,
            summary.dispatch_display()
        )
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Laytime consumed ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(if summary.used_ratio > 1.0 {
            Color::Red
        } else {
            Color::Green
        }))
        .ratio(summary.used_ratio.clamp(0.0, 1.0))
        .label(label);

    f.render_widget(gauge, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let footer = match app.input_mode {
        InputMode::Normal => Paragraph::new(
            "j/k: Navigate | a: Add | m: Edit | d: Delete | c: Recalculate | q: Quit",
        )
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center),
        InputMode::Adding => Paragraph::new(format!("add> {}", app.input))
            .style(Style::default().fg(Color::Yellow)),
        InputMode::Editing => Paragraph::new(format!("edit> {}", app.input))
            .style(Style::default().fg(Color::Yellow)),
    };
    f.render_widget(footer, area);
}

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use rust_decimal::Decimal;

use crate::app::App;
use crate::calculator::RepaymentResult;
use crate::error::CalculatorError;
use crate::inputs::{Field, RepaymentType};

const ACCENT: Color = Color::Rgb(216, 219, 47);

pub fn ui(f: &mut Frame, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(f.size());

    render_form(f, app, columns[0]);
    match (app.general_problem(), &app.result) {
        (Some(problem), _) => render_problem(f, problem, columns[1]),
        (None, Some(result)) => render_results(f, &app.settings.currency_symbol, result, columns[1]),
        (None, None) => render_empty_results(f, columns[1]),
    }
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(1),
            ]
            .as_ref(),
        )
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "Mortgage Calculator",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   c: Clear All", Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, chunks[0]);

    let symbol = &app.settings.currency_symbol;
    render_text_field(f, app, Field::Principal, "Mortgage Amount", symbol, "", chunks[1]);
    render_field_message(f, app, Field::Principal, chunks[2]);
    render_text_field(f, app, Field::TermYears, "Mortgage Term", "", " years", chunks[3]);
    render_field_message(f, app, Field::TermYears, chunks[4]);
    render_text_field(f, app, Field::InterestRate, "Interest Rate", "", " %", chunks[5]);
    render_field_message(f, app, Field::InterestRate, chunks[6]);
    render_type_field(f, app, chunks[7]);
    render_field_message(f, app, Field::RepaymentType, chunks[8]);

    let help = Paragraph::new(
        "Tab/↓ ↑: move | ←/→/Space: mortgage type | Enter: calculate repayments | c: clear all | q/Esc: quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(help, chunks[9]);
}

fn field_block(app: &App, field: Field, title: &'static str) -> Block<'static> {
    let border = if app.field_message(field).is_some() {
        Style::default().fg(Color::Red)
    } else if app.focus == field {
        Style::default().fg(ACCENT)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title)
}

fn render_text_field(
    f: &mut Frame,
    app: &App,
    field: Field,
    title: &'static str,
    prefix: &str,
    suffix: &str,
    area: Rect,
) {
    let value = app.inputs.value(field).unwrap_or_default();
    let input = Paragraph::new(format!("{prefix}{value}{suffix}"))
        .style(Style::default().fg(Color::Yellow))
        .block(field_block(app, field, title));
    f.render_widget(input, area);
}

fn render_type_field(f: &mut Frame, app: &App, area: Rect) {
    let selected = app.inputs.repayment_type;
    let lines: Vec<Line> = [RepaymentType::Repayment, RepaymentType::InterestOnly]
        .into_iter()
        .map(|option| {
            if selected == Some(option) {
                Line::from(format!("▶ {}", option.label()))
                    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                Line::from(format!("  {}", option.label()))
                    .style(Style::default().fg(Color::DarkGray))
            }
        })
        .collect();

    let input = Paragraph::new(lines).block(field_block(app, Field::RepaymentType, "Mortgage Type"));
    f.render_widget(input, area);
}

fn render_field_message(f: &mut Frame, app: &App, field: Field, area: Rect) {
    if let Some(message) = app.field_message(field) {
        let text = Paragraph::new(message).style(Style::default().fg(Color::Red));
        f.render_widget(text, area);
    }
}

fn render_empty_results(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            "Results shown here",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Complete the form and press Enter to see what your monthly repayments would be.",
            Style::default().fg(Color::Gray),
        )),
    ];
    let panel = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(panel, area);
}

fn render_problem(f: &mut Frame, problem: &CalculatorError, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            problem.hint(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(problem.to_string(), Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(Span::styled(
            "Adjust the form and press Enter again.",
            Style::default().fg(Color::Gray),
        )),
    ];
    let panel = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Red)));
    f.render_widget(panel, area);
}

fn render_results(f: &mut Frame, symbol: &str, result: &RepaymentResult, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            "Your Results",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Edit the form and press Enter again to adjust the results.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from("Your monthly repayments"),
        Line::from(Span::styled(
            format_currency(symbol, result.monthly_payment),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Total you'll repay over the term"),
        Line::from(Span::styled(
            format_currency(symbol, result.total_repayment),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    let panel = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(ACCENT)));
    f.render_widget(panel, area);
}

/// `£1,198.50` style: symbol, thousands separators, 2 decimals
pub fn format_currency(symbol: &str, amount: Decimal) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{fraction}")
}

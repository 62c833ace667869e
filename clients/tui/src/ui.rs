use crate::app::App;
use blackjack::{Card, Phase};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn ui(f: &mut Frame, app: &App) {
    // Main layout: Top section and bottom section
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3), // Title bar
                Constraint::Min(10),   // Main game area
                Constraint::Length(3), // Status bar
            ]
            .as_ref(),
        )
        .split(f.area());

    let title = Paragraph::new("Blackjack - Single Seat")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, main_chunks[0]);

    // Split main area: left (table) and right (stats, logs)
    let main_horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)].as_ref())
        .split(main_chunks[1]);

    // Dealer on top, player on bottom
    let table_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(main_horizontal[0]);

    render_dealer(f, app, table_area[0]);
    render_player(f, app, table_area[1]);
    render_side_panel(f, app, main_horizontal[1]);

    let status_bar = Paragraph::new(app.status.as_str())
        .style(Style::default().fg(Color::White))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status_bar, main_chunks[2]);
}

fn card_span(card: Option<&Card>) -> Span<'static> {
    let Some(card) = card else {
        return Span::styled(
            "?? ",
            Style::default().fg(Color::DarkGray).bg(Color::Gray),
        );
    };
    let card_str = card.to_display();
    let color = match card_str.chars().last() {
        Some('♥') => Color::Red,
        Some('♦') => Color::from_u32(0xFF_A5_00), // Orange
        Some('♣') => Color::Magenta,
        Some('♠') => Color::Black,
        _ => Color::White,
    };
    Span::styled(format!("{card_str} "), Style::default().fg(color).bg(Color::Gray))
}

/// Pad `lines` so they sit in the vertical middle of a bordered `area`
fn centered(area: Rect, mut lines: Vec<Line<'static>>) -> Vec<Line<'static>> {
    let inner_height = area.height.saturating_sub(2) as usize;
    let padding_top = inner_height.saturating_sub(lines.len()) / 2;
    let mut padded = vec![Line::from(""); padding_top];
    padded.append(&mut lines);
    padded
}

fn render_dealer(f: &mut Frame, app: &App, area: Rect) {
    let view = &app.view;
    let dealer_cards: Vec<Span> = view.dealer_cards.iter().map(|c| card_span(c.as_ref())).collect();

    let dealer_value = if view.dealer_cards.is_empty() {
        String::new()
    } else if view.dealer_cards.iter().any(Option::is_none) {
        format!(" ({} + ?)", view.dealer_value)
    } else {
        format!(" ({})", view.dealer_value)
    };

    let border_style = if app.dealer_flashing() {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let lines = if dealer_cards.is_empty() {
        vec![Line::from("Waiting for a bet")]
    } else {
        vec![Line::from(dealer_cards)]
    };

    let dealer_block = Paragraph::new(centered(area, lines))
        .block(
            Block::default()
                .title(format!(" Dealer Hand{dealer_value} "))
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .alignment(Alignment::Center);
    f.render_widget(dealer_block, area);
}

fn render_player(f: &mut Frame, app: &App, area: Rect) {
    let view = &app.view;
    let player_cards: Vec<Span> = view.player_cards.iter().map(|c| card_span(Some(c))).collect();

    let mut lines = Vec::new();
    if !player_cards.is_empty() {
        lines.push(Line::from(player_cards));
        lines.push(Line::from(""));
    }

    if view.phase == Phase::PlayerTurn {
        lines.push(Line::from(vec![
            Span::styled("↑", Style::default().fg(Color::Yellow)),
            Span::raw(" Hit  "),
            Span::styled("↓", Style::default().fg(Color::Yellow)),
            Span::raw(" Stand"),
        ]));
    }
    if view.phase == Phase::Settled {
        let color = match view.last_settlement.map(|s| s.outcome()) {
            Some(outcome) if outcome.is_win() => Color::Green,
            Some(outcome) if outcome.is_loss() => Color::Red,
            _ => Color::Yellow,
        };
        lines.push(Line::from(Span::styled(
            view.message.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
    }

    let player_value = if view.player_cards.is_empty() {
        String::new()
    } else if view.player_soft {
        format!(" (soft {})", view.player_value)
    } else {
        format!(" ({})", view.player_value)
    };
    let bet = if view.bet > 0 {
        format!(" Bet {} ", view.bet)
    } else {
        String::new()
    };

    let player_block = Paragraph::new(centered(area, lines))
        .block(
            Block::default()
                .title(format!(" Your Hand{player_value} "))
                .title_bottom(Line::from(format!("{bet} Bankroll {} ", view.bankroll)).right_aligned())
                .borders(Borders::ALL),
        )
        .alignment(Alignment::Center);
    f.render_widget(player_block, area);
}

fn render_side_panel(f: &mut Frame, app: &App, area: Rect) {
    let (stats_area, log_area) = if app.log_visible {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(10), Constraint::Min(3)].as_ref())
            .split(area);
        (split[0], Some(split[1]))
    } else {
        (area, None)
    };

    let stats = &app.view.statistics;
    let recent: Vec<Span> = stats
        .recent
        .chars()
        .map(|code| {
            let color = match code {
                'W' => Color::Green,
                'L' => Color::Red,
                _ => Color::Yellow,
            };
            Span::styled(format!("{code} "), Style::default().fg(color))
        })
        .collect();

    let stat_lines = vec![
        Line::from(format!("Rounds: {}", stats.rounds_played)),
        Line::from(format!(
            "W / L / D: {} / {} / {}",
            stats.wins, stats.losses, stats.draws
        )),
        Line::from(format!(
            "Blackjacks: you {}, dealer {}",
            stats.player_blackjacks, stats.dealer_blackjacks
        )),
        Line::from(format!(
            "Best win: {}  Worst loss: {}",
            stats.best_win, stats.worst_loss
        )),
        Line::from([vec![Span::raw("Last: ")], recent].concat()),
        Line::from(format!("🂠 {}", app.view.cards_remaining)),
    ];

    let stats_widget = Paragraph::new(stat_lines)
        .block(
            Block::default()
                .title(" Statistics ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(stats_widget, stats_area);

    // Logs box - only render if visible
    if let Some(log_area) = log_area {
        let log_frame_height = log_area.height.saturating_sub(2) as usize; // Subtract borders
        let log_start_idx = app.logs.len().saturating_sub(log_frame_height);

        let log_lines: Vec<Line> = app
            .logs
            .iter()
            .skip(log_start_idx)
            .map(|log| {
                Line::from(vec![
                    Span::styled("• ", Style::default().fg(Color::DarkGray)),
                    Span::raw(log.clone()),
                ])
            })
            .collect();

        let logs_widget = Paragraph::new(log_lines)
            .block(
                Block::default()
                    .title(" Game Log ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green)),
            )
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true });
        f.render_widget(logs_widget, log_area);
    }
}

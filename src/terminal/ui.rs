use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use crate::domain::email::Email;
use crate::nav::Route;
use crate::terminal::state::AppState;
use crate::terminal::theme::Theme;

pub fn render(f: &mut Frame, state: &mut AppState) {
    let theme = Theme::for_mode(state.dark_theme);
    f.render_widget(Clear, f.area());
    f.render_widget(
        Block::default().style(Style::default().bg(theme.bg).fg(theme.fg)),
        f.area(),
    );

    let [main, footer] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(f.area());

    match state.route() {
        Route::Main | Route::Favorites => {
            let [search_area, list_area] =
                Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(main);
            render_search(f, state, &theme, search_area);
            render_list(f, state, &theme, list_area);
        }
        Route::Detail(_) => render_detail(f, state, &theme, main),
    }

    render_footer(f, state, &theme, footer);
}

fn render_search(f: &mut Frame, state: &AppState, theme: &Theme, area: Rect) {
    let border = if state.searching {
        theme.accent
    } else {
        theme.muted
    };
    let query = state.store.query();
    let text = if query.is_empty() && !state.searching {
        Line::from(Span::styled(
            "Press / to search sender or subject",
            Style::default().fg(theme.muted),
        ))
    } else {
        let mut spans = vec![Span::raw(query.to_string())];
        if state.searching {
            spans.push(Span::styled("▏", Style::default().fg(theme.accent)));
        }
        Line::from(spans)
    };

    let p = Paragraph::new(text).block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(p, area);
}

fn email_item<'a>(e: &Email, theme: &Theme) -> ListItem<'a> {
    let star = if e.is_starred {
        Span::styled("★ ", Style::default().fg(theme.star))
    } else {
        Span::styled("☆ ", Style::default().fg(theme.muted))
    };
    let mut head = vec![
        star,
        Span::styled(
            e.sender.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];
    if e.has_event {
        head.push(Span::styled(" [evento]", Style::default().fg(theme.accent)));
    }
    let subj = Line::from(format!("  {}", e.subject));
    let prev = Line::from(Span::styled(
        format!("  {}", e.preview),
        Style::default().fg(theme.muted),
    ));
    ListItem::new(Text::from(vec![Line::from(head), subj, prev]))
}

fn render_list(f: &mut Frame, state: &mut AppState, theme: &Theme, area: Rect) {
    let (title, emails, empty_msg) = match state.route() {
        Route::Favorites => (
            " Favorites ".to_string(),
            state.store.favorites(),
            "No favorites yet.\nPress s on an email to star it.",
        ),
        _ => (
            if state.store.is_filtered() {
                format!(
                    " Inbox ({} of {}) ",
                    state.store.visible_len(),
                    state.store.len()
                )
            } else {
                format!(" Inbox ({}) ", state.store.len())
            },
            state.store.visible(),
            if state.store.is_empty() {
                "The inbox is empty."
            } else {
                "No emails match the search."
            },
        ),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent));

    if emails.is_empty() {
        let p = Paragraph::new(empty_msg)
            .style(Style::default().fg(theme.muted))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let items: Vec<ListItem> = emails.iter().map(|e| email_item(e, theme)).collect();
    let list = List::new(items)
        .block(block)
        .highlight_symbol("➜ ")
        .highlight_style(Style::default().fg(theme.selected));

    let ls = if state.route() == Route::Favorites {
        &mut state.fav_list
    } else {
        &mut state.main_list
    };
    f.render_stateful_widget(list, area, ls);
}

fn render_detail(f: &mut Frame, state: &AppState, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent));

    let Some(email) = state.opened_email() else {
        let id = match state.route() {
            Route::Detail(id) => id,
            _ => 0,
        };
        let p = Paragraph::new(format!("Email {id} not found.\nPress Esc to go back."))
            .style(Style::default().fg(theme.muted))
            .block(block.title(" Email "));
        f.render_widget(p, area);
        return;
    };

    let inner = block.inner(area);
    f.render_widget(block.title(" Email "), area);

    let event_height = if email.has_event { 6 } else { 0 };
    let [subject_area, header_area, event_area, content_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Length(event_height),
        Constraint::Min(0),
    ])
    .areas(inner);

    let subject = Paragraph::new(Line::from(Span::styled(
        email.subject.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .centered();
    f.render_widget(subject, subject_area);

    let star = if email.is_starred {
        Span::styled(" ★ favorited", Style::default().fg(theme.star))
    } else {
        Span::styled(" ☆ press s to favorite", Style::default().fg(theme.muted))
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", email.initials()),
            Style::default()
                .bg(theme.badge)
                .fg(ratatui::style::Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            email.sender.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        star,
    ]));
    f.render_widget(header, header_area);

    if email.has_event {
        render_event(f, state, theme, event_area);
    }

    let content = Paragraph::new(email.content.clone())
        .wrap(Wrap { trim: false })
        .scroll((state.body_scroll, 0));
    f.render_widget(content, content_area);
}

fn render_event(f: &mut Frame, state: &AppState, theme: &Theme, area: Rect) {
    let block = Block::default()
        .title(" Evento ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.badge));

    let lines = match state.opened_event() {
        Some(ev) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    ev.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("{}  {} - {}", ev.date, ev.start_time, ev.end_time)),
            ];
            if ev.has_link() {
                lines.push(Line::from(vec![
                    Span::styled(ev.link.clone(), Style::default().fg(theme.selected)),
                    Span::styled("  (o to RSVP)", Style::default().fg(theme.muted)),
                ]));
            }
            lines
        }
        None => vec![Line::from(Span::styled(
            "No details for this event.",
            Style::default().fg(theme.muted),
        ))],
    };
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(f: &mut Frame, state: &AppState, theme: &Theme, area: Rect) {
    if let Some(msg) = &state.status {
        let p = Paragraph::new(Span::styled(msg.clone(), Style::default().fg(theme.accent)));
        f.render_widget(p, area);
        return;
    }

    let keys: &[(&str, &str)] = if state.searching {
        &[("Enter", " keep  "), ("Esc", " clear")]
    } else {
        match state.route() {
            Route::Detail(_) => &[
                ("j/k", " scroll  "),
                ("s", " star  "),
                ("o", " RSVP  "),
                ("t", " theme  "),
                ("Esc", " back  "),
                ("q", " quit"),
            ],
            _ => &[
                ("j/k", " move  "),
                ("Enter", " open  "),
                ("/", " search  "),
                ("s", " star  "),
                ("Tab", " inbox/favorites  "),
                ("t", " theme  "),
                ("q", " quit"),
            ],
        }
    };

    let spans: Vec<Span> = keys
        .iter()
        .flat_map(|(k, label)| {
            [
                Span::styled(*k, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(*label),
            ]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::builtin::BuiltinSeed;
    use crate::store::repo::SeedProvider;
    use ratatui::{Terminal, backend::TestBackend};

    fn app() -> AppState {
        AppState::new(BuiltinSeed.load().unwrap().into_store(), &Config::default())
    }

    fn draw(state: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| render(f, state)).unwrap();
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn inbox_lists_senders() {
        let mut a = app();
        let screen = draw(&mut a);
        assert!(screen.contains("Inbox (7)"));
        assert!(screen.contains("Eduardo Pereira"));
        assert!(screen.contains("Press / to search"));
    }

    #[test]
    fn filtered_inbox_shows_counts() {
        let mut a = app();
        a.store.search("luan");
        let screen = draw(&mut a);
        assert!(screen.contains("Inbox (1 of 7)"));
        assert!(screen.contains("Luan Garcia"));
        assert!(!screen.contains("Eduardo Pereira"));
    }

    #[test]
    fn detail_shows_matched_event() {
        let mut a = app();
        a.open_id(2);
        let screen = draw(&mut a);
        assert!(screen.contains("Confirmação de Reunião"));
        assert!(screen.contains("Reunião amanhã 10h"));
        assert!(screen.contains("17/06/2024  10:00 - 11:00"));
        assert!(screen.contains("https://meet.google.com/abc-def-ghi"));
    }

    #[test]
    fn detail_without_event_record_shows_placeholder_box() {
        let mut emails = BuiltinSeed.load().unwrap().emails;
        emails[2].has_event = true;
        let store = crate::store::EmailStore::new(emails);
        let mut a = AppState::new(store, &Config::default());
        a.open_id(3);
        let screen = draw(&mut a);
        assert!(screen.contains("No details for this event."));
    }

    #[test]
    fn empty_inbox_message() {
        let mut a = AppState::new(crate::store::EmailStore::new(Vec::new()), &Config::default());
        let screen = draw(&mut a);
        assert!(screen.contains("The inbox is empty."));

        let mut a = app();
        a.store.search("zzz");
        let screen = draw(&mut a);
        assert!(screen.contains("No emails match the search."));
    }

    #[test]
    fn missing_email_renders_placeholder() {
        let mut a = app();
        a.open_id(404);
        let screen = draw(&mut a);
        assert!(screen.contains("Email 404 not found."));
    }

    #[test]
    fn empty_favorites_hint() {
        let mut a = app();
        a.store.toggle_favorite(1);
        a.switch_tab();
        let screen = draw(&mut a);
        assert!(screen.contains("Favorites"));
        assert!(screen.contains("No favorites yet."));
    }
}

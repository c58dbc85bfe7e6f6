//! UI rendering module for relnav.
//!
//! This is the module root for `ui/`. It re-exports `render()` as the
//! single entry point called by the event loop's `terminal.draw()` closure.
//!
//! The loaded frame is three bands: a header (title line, timeline strip,
//! tag-label rule), the scrollable body viewport, and a one-row footer that
//! shows the scroll percentage — or a flat rule when the content fully
//! fits. While the fetch is outstanding a spinner view is drawn instead.

pub mod keybindings;
pub mod markdown;
pub mod timeline;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, SPINNER_FRAMES};
use crate::theme::Theme;

/// Title line, timeline strip, tag-label rule.
const HEADER_ROWS: u16 = 3;

/// Renders one complete frame.
///
/// Called exactly once per `AppEvent::Render` inside `terminal.draw()` —
/// the only location where `terminal.draw()` is called in the application.
///
/// The body viewport's geometry is written back into `state` before the
/// body is drawn so that scroll operations triggered by the *next* keypress
/// compute page distances correctly, and so a resize re-clamps the offset
/// without touching focus.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    if !state.loaded {
        render_loading(frame, state, theme);
        return;
    }

    let [header, body, footer] = frame.area().layout(&Layout::vertical([
        Constraint::Length(HEADER_ROWS),
        Constraint::Fill(1),
        Constraint::Length(1),
    ]));

    state.viewport_width = body.width;
    state.viewport_height = body.height;
    state.clamp_scroll();

    render_header(frame, header, state, theme);
    frame.render_widget(
        Paragraph::new(state.body.clone()).scroll((state.scroll, 0)),
        body,
    );
    render_footer(frame, footer, state, theme);
}

/// The pre-load view: title, spinner, and the key-hint line.
fn render_loading(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let title = Span::styled(
        format!("{}/{} releases", state.owner, state.repo),
        Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
    );
    let spinner = Line::from(vec![
        Span::raw("   "),
        Span::styled(SPINNER_FRAMES[state.spinner_frame], Style::default().fg(theme.spinner)),
        Span::raw(" loading…"),
    ]);
    let hints = Span::styled("[q] quit  [h] prev  [l] next", Style::default().fg(theme.hint));

    let lines = vec![
        Line::from(title),
        Line::default(),
        Line::default(),
        spinner,
        Line::default(),
        Line::from(hints),
    ];
    frame.render_widget(Paragraph::new(Text::from(lines)), frame.area());
}

/// Header band: title line, centered timeline, and the tag-label rule.
fn render_header(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    // render() only reaches here once loaded, so nav is always present.
    let Some(nav) = &state.nav else { return };

    let title = Line::from(Span::styled(
        format!("{}/{} releases", state.owner, state.repo),
        Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
    ));
    let strip = timeline::render_timeline(nav, theme);
    let rule = tag_rule(
        &nav.focused().tag,
        state.notice.as_deref(),
        state.viewport_width,
        theme,
    );

    frame.render_widget(Paragraph::new(Text::from(vec![title, strip, rule])), area);
}

/// Builds the `┤ tag ├────` rule, with the fallback notice framed at the
/// right edge when present.
fn tag_rule(tag: &str, notice: Option<&str>, width: u16, theme: &Theme) -> Line<'static> {
    let chrome = Style::default().fg(theme.chrome);
    let tag_style = Style::default()
        .fg(theme.focused_tag)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled("┤ ", chrome),
        Span::styled(tag.to_owned(), tag_style),
        Span::styled(" ├", chrome),
    ];

    let mut used = 4 + tag.chars().count();
    if let Some(notice) = notice {
        used += 4 + notice.chars().count();
    }
    let fill = (width as usize).saturating_sub(used);
    spans.push(Span::styled("─".repeat(fill), chrome));

    if let Some(notice) = notice {
        spans.push(Span::styled("┤ ", chrome));
        spans.push(Span::styled(notice.to_owned(), Style::default().fg(theme.notice)));
        spans.push(Span::styled(" ├", chrome));
    }

    Line::from(spans)
}

/// Footer band: scroll percentage framed at the right edge, or a flat rule
/// when the whole body is visible.
fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let chrome = Style::default().fg(theme.chrome);
    let width = area.width as usize;

    let line = if state.body_fits() {
        Line::from(Span::styled("─".repeat(width), chrome))
    } else {
        let label = format!("┤ {:>3}% ├", state.scroll_percent());
        let fill = width.saturating_sub(label.chars().count());
        Line::from(vec![
            Span::styled("─".repeat(fill), chrome),
            Span::styled(label, chrome),
        ])
    };

    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Position;
    use ratatui::Terminal;
    use relnav_core::{parse_version, Release};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                if let Some(cell) = buffer.cell(Position::new(x, y)) {
                    out.push_str(cell.symbol());
                }
            }
            out.push('\n');
        }
        out
    }

    fn draw(state: &mut AppState) -> String {
        let theme = Theme::dark();
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, state, &theme)).unwrap();
        buffer_text(&terminal)
    }

    fn state_with(start: &str, releases: Vec<(&str, &str)>) -> AppState {
        let mut state = AppState::new(
            "alice".to_owned(),
            "hello".to_owned(),
            parse_version(start).unwrap(),
        );
        let releases = releases
            .into_iter()
            .map(|(tag, description)| Release {
                tag: tag.to_owned(),
                description: description.to_owned(),
            })
            .collect();
        state.apply_fetch(releases, &Theme::dark()).unwrap();
        state
    }

    #[test]
    fn loading_view_shows_spinner_and_hints() {
        let mut state = AppState::new(
            "alice".to_owned(),
            "hello".to_owned(),
            parse_version("0.0.0").unwrap(),
        );
        let screen = draw(&mut state);
        assert!(screen.contains("alice/hello releases"));
        assert!(screen.contains("loading…"));
        assert!(screen.contains("[q] quit"));
    }

    #[test]
    fn loaded_header_contains_repo_tag_and_timeline() {
        let mut state = state_with("0.0.0", vec![("0.1.0", "notes"), ("1.0.0", "more")]);
        let screen = draw(&mut state);
        assert!(screen.contains("alice/hello releases"));
        assert!(screen.contains("┤ 0.1.0 ├"));
        // 0.1.0 → minor glyph, 1.0.0 → major glyph, side by side.
        assert!(screen.contains("▅▇"));
    }

    #[test]
    fn body_shows_the_focused_description() {
        let mut state = state_with("0.0.0", vec![("0.1.0", "the alpha body")]);
        let screen = draw(&mut state);
        assert!(screen.contains("the alpha body"));
    }

    #[test]
    fn footer_is_a_flat_rule_when_the_body_fits() {
        let mut state = state_with("0.0.0", vec![("0.1.0", "short")]);
        let screen = draw(&mut state);
        let footer = screen.lines().nth(11).unwrap();
        assert!(footer.chars().all(|c| c == '─'));
    }

    #[test]
    fn footer_shows_percent_when_the_body_overflows() {
        let long_body = (0..40).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n\n");
        let mut state = state_with("0.0.0", vec![("0.1.0", long_body.as_str())]);
        let screen = draw(&mut state);
        assert!(screen.contains("┤   0% ├"));
    }

    #[test]
    fn fallback_notice_is_framed_in_the_header_rule() {
        let mut state = state_with("9.0.0", vec![("0.1.0", ""), ("1.0.0", "")]);
        let screen = draw(&mut state);
        assert!(screen.contains("┤ 1.0.0 ├"));
        assert!(screen.contains("no release after 9.0.0"));
    }
}

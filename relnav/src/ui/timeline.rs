//! The compact glyph-per-release timeline strip.
//!
//! One glyph per release in ascending order, selected by classification:
//! `▇` major, `▅` minor, `▂` patch, `_` everything else (prereleases
//! included). The focused release gets the focus style; all others share
//! the muted style. The strip is centered in the available width.
//!
//! Known limitation: histories wider than the terminal are not windowed or
//! truncated — the strip simply clips. Matching upstream behavior.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use relnav_core::{classify, NavigationModel, ReleaseClass};

use crate::theme::Theme;

fn glyph(class: ReleaseClass) -> &'static str {
    match class {
        ReleaseClass::Major => "▇",
        ReleaseClass::Minor => "▅",
        ReleaseClass::Patch => "▂",
        ReleaseClass::Other => "_",
    }
}

/// Renders the timeline as a single centered line.
pub fn render_timeline(nav: &NavigationModel, theme: &Theme) -> Line<'static> {
    let focus = nav.focus();
    let muted = Style::default().fg(theme.timeline_muted);
    let focused = Style::default().fg(theme.timeline_focus);

    let spans: Vec<Span<'static>> = nav
        .sequence()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let style = if index == focus { focused } else { muted };
            Span::styled(glyph(classify(&entry.version)), style)
        })
        .collect();

    Line::from(spans).centered()
}

#[cfg(test)]
mod tests {
    use super::*;
    use relnav_core::{parse_version, sort_tags};

    fn model(tags: &[&str], start: &str) -> NavigationModel {
        let sequence = sort_tags(tags.iter().copied()).unwrap();
        NavigationModel::new(sequence, &parse_version(start).unwrap())
            .unwrap()
            .0
    }

    #[test]
    fn one_glyph_per_release_in_ascending_order() {
        let nav = model(&["2.1.1", "2.0.0", "2.1.0", "2.0.0-beta.1"], "0.0.0");
        let line = render_timeline(&nav, &Theme::dark());
        let rendered: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        // beta → _, 2.0.0 → ▇, 2.1.0 → ▅, 2.1.1 → ▂
        assert_eq!(rendered, "_▇▅▂");
    }

    #[test]
    fn only_the_focused_glyph_uses_the_focus_style() {
        let theme = Theme::dark();
        let nav = model(&["0.1.0", "1.0.0", "1.1.0"], "0.5.0");
        assert_eq!(nav.focused().tag, "1.0.0");

        let line = render_timeline(&nav, &theme);
        let focus_count = line
            .spans
            .iter()
            .filter(|s| s.style.fg == Some(theme.timeline_focus))
            .count();
        assert_eq!(focus_count, 1);
        assert_eq!(line.spans[1].style.fg, Some(theme.timeline_focus));
        assert_eq!(line.spans[0].style.fg, Some(theme.timeline_muted));
    }
}

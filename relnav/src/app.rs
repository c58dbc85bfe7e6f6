//! Central application state for relnav.
//!
//! This module owns the whole session model: the owner/repo pair, the
//! requested starting version, the navigation model and release index built
//! from the one-shot fetch, the rendered body and its scroll offset, and
//! the cached viewport geometry. It is read by the render module and
//! mutated only by the event loop's dispatch — no ratatui drawing happens
//! here.
//!
//! The viewport never decides which release is shown; it is always derived
//! from the navigation model's focus. Replacing the body content on a focus
//! change implicitly returns the scroll offset to the top.

use ratatui::text::Text;
use semver::Version;

use relnav_core::{
    clamp, sort_tags, CoreError, InitialFocus, NavigationModel, Release, ReleaseIndex,
};

use crate::theme::Theme;
use crate::ui::markdown;

/// Braille spinner frames shown while the fetch is outstanding.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Shown in place of the body when the focused tag has no release text.
/// An operator-visible inconsistency, not a crash.
pub const MISSING_BODY_PLACEHOLDER: &str = "content unavailable";

/// All mutable session state, created once at startup.
///
/// Lifecycle: `loaded` is false until the fetch result arrives, flips to
/// true exactly once on success, and the sequence/index are never
/// recomputed afterwards. A set `fatal` message means the event loop must
/// exit and report it after restoring the terminal.
pub struct AppState {
    pub owner: String,
    pub repo: String,
    /// The user-supplied starting version; focus lands just after it.
    pub start_version: Version,

    /// False until the fetch result has been applied.
    pub loaded: bool,
    /// Focus state machine; `None` exactly while `loaded` is false.
    pub nav: Option<NavigationModel>,
    /// Raw tag → release text, built once from the fetch result.
    pub index: ReleaseIndex,

    /// Rendered markdown body of the focused release.
    pub body: Text<'static>,
    /// Total line count of `body`, for scroll bounds and the footer.
    pub body_lines: usize,
    /// Vertical scroll offset into `body`.
    pub scroll: u16,

    /// Inner height of the body viewport, cached after each render.
    pub viewport_height: u16,
    /// Inner width of the body viewport, cached after each render.
    pub viewport_width: u16,

    /// Current spinner frame index, advanced on Tick while unloaded.
    pub spinner_frame: usize,
    /// Non-fatal notice shown in the header (focus-fallback message).
    pub notice: Option<String>,
    /// Session-fatal error; printed after the terminal is restored.
    pub fatal: Option<String>,
}

impl AppState {
    /// Constructs the unloaded session model.
    pub fn new(owner: String, repo: String, start_version: Version) -> Self {
        Self {
            owner,
            repo,
            start_version,
            loaded: false,
            nav: None,
            index: ReleaseIndex::default(),
            body: Text::default(),
            body_lines: 0,
            scroll: 0,
            viewport_height: 0,
            viewport_width: 0,
            spinner_frame: 0,
            notice: None,
            fatal: None,
        }
    }

    /// Applies the fetch result: the single Unloaded → Loaded transition.
    ///
    /// Builds the tag-keyed index, sorts the tags into the ordered sequence
    /// (fail-fast on a malformed tag), computes the initial focus, and
    /// renders the first body. When no release exceeds the starting version
    /// the focus falls back to the latest release and a notice is recorded.
    pub fn apply_fetch(&mut self, releases: Vec<Release>, theme: &Theme) -> Result<(), CoreError> {
        self.index = ReleaseIndex::from_releases(releases);
        let sequence = sort_tags(self.index.tags())?;
        let (nav, placement) = NavigationModel::new(sequence, &self.start_version)?;

        if placement == InitialFocus::FellBackToLatest {
            self.notice = Some(format!(
                "no release after {}, showing latest",
                self.start_version
            ));
        }

        self.nav = Some(nav);
        self.loaded = true;
        self.render_focused_body(theme);
        Ok(())
    }

    /// Re-renders the focused release's description into the body.
    ///
    /// Replaces the content entirely (no incremental diffing), which also
    /// resets the scroll offset to the top. A missing index entry renders
    /// the placeholder body instead of crashing.
    pub fn render_focused_body(&mut self, theme: &Theme) {
        let Some(nav) = &self.nav else { return };
        self.body = match self.index.lookup(&nav.focused().tag) {
            Some(release) => markdown::render_markdown(&release.description, theme),
            None => Text::raw(MISSING_BODY_PLACEHOLDER),
        };
        self.body_lines = self.body.lines.len();
        self.scroll = 0;
    }

    /// Moves focus one release newer; no-op at the newest release.
    pub fn focus_next(&mut self, theme: &Theme) {
        if let Some(nav) = &mut self.nav {
            if nav.next() {
                self.render_focused_body(theme);
            }
        }
    }

    /// Moves focus one release older; no-op at the oldest release.
    pub fn focus_prev(&mut self, theme: &Theme) {
        if let Some(nav) = &mut self.nav {
            if nav.prev() {
                self.render_focused_body(theme);
            }
        }
    }

    /// Advances the loading spinner one frame.
    pub fn tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
    }

    /// Highest valid scroll offset for the current body and viewport.
    pub fn max_scroll(&self) -> u16 {
        u16::try_from(self.body_lines.saturating_sub(self.viewport_height as usize))
            .unwrap_or(u16::MAX)
    }

    /// Whether the body fits the viewport with no scrolling.
    pub fn body_fits(&self) -> bool {
        self.body_lines <= self.viewport_height as usize
    }

    /// Scroll position as a 0–100 percentage of the scrollable range.
    pub fn scroll_percent(&self) -> u16 {
        let max = self.max_scroll();
        if max == 0 {
            return 100;
        }
        (u32::from(self.scroll) * 100 / u32::from(max)) as u16
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = clamp(self.scroll.saturating_add(lines), 0, self.max_scroll());
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    /// Scrolls down by half the visible height (minimum 1 on first frame).
    pub fn half_page_down(&mut self) {
        self.scroll_down((self.viewport_height / 2).max(1));
    }

    /// Scrolls up by half the visible height.
    pub fn half_page_up(&mut self) {
        self.scroll_up((self.viewport_height / 2).max(1));
    }

    pub fn full_page_down(&mut self) {
        self.scroll_down(self.viewport_height.max(1));
    }

    pub fn full_page_up(&mut self) {
        self.scroll_up(self.viewport_height.max(1));
    }

    /// Re-clamps the scroll offset after the viewport geometry changed.
    ///
    /// Resize events never change focus; only the offset may need to move
    /// back into range.
    pub fn clamp_scroll(&mut self) {
        self.scroll = clamp(self.scroll, 0, self.max_scroll());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relnav_core::parse_version;

    fn release(tag: &str, description: &str) -> Release {
        Release { tag: tag.to_owned(), description: description.to_owned() }
    }

    fn loaded_state(start: &str, releases: Vec<Release>) -> AppState {
        let mut state = AppState::new(
            "alice".to_owned(),
            "hello".to_owned(),
            parse_version(start).unwrap(),
        );
        state.apply_fetch(releases, &Theme::dark()).unwrap();
        state
    }

    #[test]
    fn default_start_focuses_the_oldest_release() {
        // owner alice, repo hello, version argument omitted (0.0.0).
        let state = loaded_state(
            "0.0.0",
            vec![release("1.0.0", "big"), release("0.1.0", "small")],
        );
        assert!(state.loaded);
        assert!(state.notice.is_none());
        let nav = state.nav.as_ref().unwrap();
        assert_eq!(nav.focused().tag, "0.1.0");
    }

    #[test]
    fn next_walks_forward_and_clamps_at_the_newest() {
        let theme = Theme::dark();
        let mut state = loaded_state(
            "0.0.0",
            vec![release("0.1.0", "first"), release("1.0.0", "second")],
        );

        state.focus_next(&theme);
        assert_eq!(state.nav.as_ref().unwrap().focused().tag, "1.0.0");

        // Second "next" is a no-op at the upper bound.
        state.focus_next(&theme);
        assert_eq!(state.nav.as_ref().unwrap().focused().tag, "1.0.0");
    }

    #[test]
    fn focus_change_replaces_the_body_and_resets_scroll() {
        let theme = Theme::dark();
        let mut state = loaded_state(
            "0.0.0",
            vec![release("0.1.0", "alpha notes"), release("1.0.0", "stable notes")],
        );
        state.scroll = 5;

        state.focus_next(&theme);
        assert_eq!(state.scroll, 0, "content replacement returns the offset to the top");
        let flat: String = state
            .body
            .lines
            .iter()
            .map(|line| line.to_string())
            .collect();
        assert!(flat.contains("stable notes"));
    }

    #[test]
    fn start_beyond_all_releases_records_a_notice() {
        let state = loaded_state("3.0.0", vec![release("1.0.0", ""), release("2.0.0", "")]);
        assert_eq!(state.nav.as_ref().unwrap().focused().tag, "2.0.0");
        let notice = state.notice.as_deref().unwrap();
        assert!(notice.contains("3.0.0"), "notice names the requested version: {notice}");
    }

    #[test]
    fn malformed_fetched_tag_aborts_the_load() {
        let mut state = AppState::new(
            "alice".to_owned(),
            "hello".to_owned(),
            parse_version("0.0.0").unwrap(),
        );
        let err = state
            .apply_fetch(vec![release("1.0.0", ""), release("latest", "")], &Theme::dark())
            .unwrap_err();
        assert_eq!(err, CoreError::MalformedVersion("latest".to_owned()));
        assert!(!state.loaded);
    }

    #[test]
    fn empty_fetch_is_an_error() {
        let mut state = AppState::new(
            "alice".to_owned(),
            "hello".to_owned(),
            parse_version("0.0.0").unwrap(),
        );
        let err = state.apply_fetch(Vec::new(), &Theme::dark()).unwrap_err();
        assert_eq!(err, CoreError::NoReleases);
    }

    #[test]
    fn missing_index_entry_renders_the_placeholder_body() {
        let theme = Theme::dark();
        let mut state = loaded_state("0.0.0", vec![release("0.1.0", "real notes")]);
        state.scroll = 3;

        // Focus still points at 0.1.0, but the index no longer has it.
        state.index = ReleaseIndex::from_releases(vec![release("9.9.9", "unrelated")]);
        state.render_focused_body(&theme);

        let flat: String = state
            .body
            .lines
            .iter()
            .map(|line| line.to_string())
            .collect();
        assert!(flat.contains(MISSING_BODY_PLACEHOLDER));
        assert_eq!(state.scroll, 0, "placeholder body starts at the top");
    }

    #[test]
    fn scrolling_clamps_to_the_body_length() {
        let mut state = loaded_state("0.0.0", vec![release("0.1.0", "a\n\nb\n\nc\n\nd")]);
        state.viewport_height = 2;
        let max = state.max_scroll();
        assert!(max > 0);

        state.scroll_down(200);
        assert_eq!(state.scroll, max);
        state.scroll_up(200);
        assert_eq!(state.scroll, 0);
    }

    #[test]
    fn scroll_percent_spans_the_scrollable_range() {
        let mut state = loaded_state("0.0.0", vec![release("0.1.0", "x\n\ny\n\nz\n\nw")]);
        state.viewport_height = 2;
        assert_eq!(state.scroll_percent(), 0);
        state.scroll_bottom();
        assert_eq!(state.scroll_percent(), 100);
    }
}

//! Markdown → styled terminal text for release descriptions.
//!
//! Walks pulldown-cmark's event stream and flattens it into
//! `ratatui::text::Text` lines: headings, paragraphs, (nested) lists, block
//! quotes, fenced and indented code, inline emphasis, links rendered as
//! underlined text, thematic rules, and task markers. Tables and footnotes
//! degrade to plain text — release notes rarely use them and the body is a
//! read-only pane.
//!
//! Rendering never fails; empty input produces empty text.

use pulldown_cmark::{
    CodeBlockKind, Event as MdEvent, HeadingLevel, Options, Parser, Tag, TagEnd,
};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::theme::Theme;

/// Renders a markdown string into styled lines using the given theme.
pub fn render_markdown(source: &str, theme: &Theme) -> Text<'static> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut renderer = Renderer::new(theme);
    for event in Parser::new_ext(source, options) {
        match event {
            MdEvent::Start(tag) => renderer.handle_start(tag),
            MdEvent::End(tag) => renderer.handle_end(tag),
            MdEvent::Text(text) => renderer.add_text(&text),
            MdEvent::Code(code) => renderer.add_inline_code(&code),
            MdEvent::Html(html) | MdEvent::InlineHtml(html) => renderer.add_text(&html),
            MdEvent::SoftBreak => renderer.soft_break(),
            MdEvent::HardBreak => renderer.hard_break(),
            MdEvent::Rule => renderer.add_rule(),
            MdEvent::TaskListMarker(done) => renderer.add_task_marker(done),
            _ => {}
        }
    }
    renderer.finish()
}

/// Nesting counters for the active inline styles.
#[derive(Default)]
struct InlineState {
    emphasis: usize,
    strong: usize,
    strikethrough: usize,
    link_depth: usize,
}

impl InlineState {
    fn style(&self, theme: &Theme) -> Style {
        let mut style = Style::default();
        if self.emphasis > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.strong > 0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.strikethrough > 0 {
            style = style.add_modifier(Modifier::CROSSED_OUT);
        }
        if self.link_depth > 0 {
            style = style.fg(theme.link).add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

#[derive(Clone)]
struct ListEntry {
    ordered: bool,
    next_index: u64,
}

struct Renderer<'a> {
    theme: &'a Theme,
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    current_plain: String,

    inline: InlineState,
    heading_level: Option<u8>,
    blockquote_depth: usize,
    list_stack: Vec<ListEntry>,

    // Some while inside a code block; holds the (possibly empty) language.
    code_block: Option<String>,
    code_buf: String,

    // Alt text accumulates here instead of the current line.
    active_image: Option<String>,
}

impl<'a> Renderer<'a> {
    fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            lines: Vec::new(),
            current: Vec::new(),
            current_plain: String::new(),
            inline: InlineState::default(),
            heading_level: None,
            blockquote_depth: 0,
            list_stack: Vec::new(),
            code_block: None,
            code_buf: String::new(),
            active_image: None,
        }
    }

    fn finish(mut self) -> Text<'static> {
        self.flush_line(false);
        Text::from(self.lines)
    }

    fn push_text(&mut self, text: &str, style: Style) {
        if text.is_empty() {
            return;
        }
        self.current_plain.push_str(text);
        self.current.push(Span::styled(text.to_owned(), style));
    }

    fn flush_line(&mut self, force_empty: bool) {
        if !force_empty && self.current.is_empty() {
            return;
        }
        self.current_plain.clear();
        self.lines.push(Line::from(std::mem::take(&mut self.current)));
    }

    /// Emits a separator line unless the previous line is already blank.
    fn blank_line(&mut self) {
        if self.lines.last().is_some_and(|line| line.width() == 0) {
            return;
        }
        self.flush_line(true);
    }

    /// Prepends the block-quote prefix when starting a fresh line.
    fn push_prefix_if_needed(&mut self) {
        if !self.current_plain.is_empty() {
            return;
        }
        if self.blockquote_depth > 0 {
            let prefix = "> ".repeat(self.blockquote_depth);
            self.push_text(&prefix, Style::default().fg(self.theme.quote));
        }
    }

    fn heading_style(&self, level: u8) -> Style {
        let color = match level {
            1 => self.theme.heading_primary,
            2 => self.theme.heading_secondary,
            _ => self.theme.heading_tertiary,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    fn heading_level_u8(level: HeadingLevel) -> u8 {
        match level {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
            HeadingLevel::H5 => 5,
            HeadingLevel::H6 => 6,
        }
    }

    fn handle_start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush_line(false);
                self.heading_level = Some(Self::heading_level_u8(level));
            }
            Tag::BlockQuote(_) => {
                self.flush_line(false);
                self.blockquote_depth = self.blockquote_depth.saturating_add(1);
            }
            Tag::CodeBlock(kind) => {
                self.flush_line(false);
                let lang = match kind {
                    CodeBlockKind::Fenced(name) => name.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                self.code_block = Some(lang);
                self.code_buf.clear();
            }
            Tag::List(start) => {
                self.list_stack.push(match start {
                    Some(index) => ListEntry { ordered: true, next_index: index },
                    None => ListEntry { ordered: false, next_index: 1 },
                });
            }
            Tag::Item => {
                self.flush_line(false);
                let depth = self.list_stack.len().saturating_sub(1);
                let indent = "  ".repeat(depth);
                let bullet = match self.list_stack.last_mut() {
                    Some(entry) if entry.ordered => {
                        let bullet = format!("{}. ", entry.next_index);
                        entry.next_index = entry.next_index.saturating_add(1);
                        bullet
                    }
                    _ => "- ".to_owned(),
                };
                self.push_prefix_if_needed();
                self.push_text(
                    &format!("{indent}{bullet}"),
                    Style::default().fg(self.theme.punctuation),
                );
            }
            Tag::Emphasis => self.inline.emphasis = self.inline.emphasis.saturating_add(1),
            Tag::Strong => self.inline.strong = self.inline.strong.saturating_add(1),
            Tag::Strikethrough => {
                self.inline.strikethrough = self.inline.strikethrough.saturating_add(1);
            }
            Tag::Link { .. } => {
                self.inline.link_depth = self.inline.link_depth.saturating_add(1);
            }
            Tag::Image { .. } => {
                self.active_image = Some(String::new());
            }
            _ => {}
        }
    }

    fn handle_end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush_line(false);
                self.blank_line();
            }
            TagEnd::Heading(_) => {
                self.flush_line(false);
                self.heading_level = None;
                self.blank_line();
            }
            TagEnd::BlockQuote => {
                self.flush_line(false);
                self.blockquote_depth = self.blockquote_depth.saturating_sub(1);
                self.blank_line();
            }
            TagEnd::CodeBlock => {
                self.code_block = None;
                let code = std::mem::take(&mut self.code_buf);
                self.render_code_block(&code);
                self.blank_line();
            }
            TagEnd::List(_) => {
                self.flush_line(false);
                self.list_stack.pop();
                if self.list_stack.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Item => {
                self.flush_line(false);
            }
            TagEnd::Emphasis => self.inline.emphasis = self.inline.emphasis.saturating_sub(1),
            TagEnd::Strong => self.inline.strong = self.inline.strong.saturating_sub(1),
            TagEnd::Strikethrough => {
                self.inline.strikethrough = self.inline.strikethrough.saturating_sub(1);
            }
            TagEnd::Link => {
                self.inline.link_depth = self.inline.link_depth.saturating_sub(1);
            }
            TagEnd::Image => {
                if let Some(alt) = self.active_image.take() {
                    let alt = alt.trim();
                    let label = if alt.is_empty() {
                        "[image]".to_owned()
                    } else {
                        format!("[image: {alt}]")
                    };
                    self.push_prefix_if_needed();
                    self.push_text(&label, Style::default().fg(self.theme.punctuation));
                }
            }
            _ => {}
        }
    }

    fn add_text(&mut self, text: &str) {
        if self.code_block.is_some() {
            self.code_buf.push_str(text);
            return;
        }
        if let Some(alt) = self.active_image.as_mut() {
            alt.push_str(text);
            return;
        }

        self.push_prefix_if_needed();
        let style = match self.heading_level {
            Some(level) => self.heading_style(level),
            None => self.inline.style(self.theme),
        };
        self.push_text(text, style);
    }

    fn add_inline_code(&mut self, code: &str) {
        if self.code_block.is_some() {
            self.code_buf.push_str(code);
            return;
        }
        self.push_prefix_if_needed();
        self.push_text(code, Style::default().fg(self.theme.code));
    }

    fn soft_break(&mut self) {
        if self.code_block.is_some() {
            self.code_buf.push('\n');
            return;
        }
        self.push_text(" ", self.inline.style(self.theme));
    }

    fn hard_break(&mut self) {
        if self.code_block.is_some() {
            self.code_buf.push('\n');
            return;
        }
        self.flush_line(false);
    }

    fn add_rule(&mut self) {
        self.flush_line(false);
        self.blank_line();
        self.push_text(&"─".repeat(40), Style::default().fg(self.theme.punctuation));
        self.flush_line(false);
        self.blank_line();
    }

    fn add_task_marker(&mut self, done: bool) {
        self.push_prefix_if_needed();
        let marker = if done { "[x] " } else { "[ ] " };
        self.push_text(marker, Style::default().fg(self.theme.punctuation));
    }

    /// Emits a code block as indented monochrome lines (no highlighting —
    /// release notes are prose-first and the pane is read-only).
    fn render_code_block(&mut self, code: &str) {
        let style = Style::default().fg(self.theme.code);
        for line in code.lines() {
            self.push_text("  ", Style::default().fg(self.theme.punctuation));
            self.push_text(line, style);
            self.flush_line(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flatten(text: &Text<'_>) -> Vec<String> {
        text.lines.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn empty_input_renders_empty_text() {
        let text = render_markdown("", &Theme::dark());
        assert!(text.lines.is_empty());
    }

    #[test]
    fn heading_and_paragraph_become_separate_lines() {
        let text = render_markdown("# Changes\n\nBug fixes.", &Theme::dark());
        let lines = flatten(&text);
        assert!(lines.iter().any(|l| l == "Changes"));
        assert!(lines.iter().any(|l| l == "Bug fixes."));
    }

    #[test]
    fn list_items_get_bullets_and_nesting_indent() {
        let text = render_markdown("- outer\n  - inner\n", &Theme::dark());
        let lines = flatten(&text);
        assert!(lines.iter().any(|l| l == "- outer"));
        assert!(lines.iter().any(|l| l == "  - inner"));
    }

    #[test]
    fn fenced_code_is_indented_verbatim() {
        let text = render_markdown("```\nlet x = 1;\n```\n", &Theme::dark());
        let lines = flatten(&text);
        assert!(lines.iter().any(|l| l == "  let x = 1;"));
    }

    #[test]
    fn blockquote_lines_carry_the_prefix() {
        let text = render_markdown("> quoted\n", &Theme::dark());
        let lines = flatten(&text);
        assert!(lines.iter().any(|l| l == "> quoted"));
    }
}

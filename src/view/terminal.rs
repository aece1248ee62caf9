use std::io::Write;

use colored::Colorize;

use super::{PageSnapshot, PageView};
use crate::autocomplete::Suggestion;
use crate::pagination::{ButtonKind, PaginationView};

fn paint(text: &str, styled: bool, style: fn(&str) -> colored::ColoredString) -> String {
    if styled {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

pub fn format_counter(view: &PaginationView) -> String {
    format!(
        "Showing {}-{} of {}",
        view.range.start, view.range.end, view.total_count
    )
}

pub fn format_pagination_bar(view: &PaginationView, styled: bool) -> String {
    let mut parts: Vec<String> = Vec::new();
    for button in view.buttons.iter().filter(|b| b.visible) {
        let part = match button.kind {
            ButtonKind::First => format!("[<< {}]", button.label),
            ButtonKind::Last => format!("[{} >>]", button.label),
            ButtonKind::Numbered if button.active => {
                paint(&format!("[{}]", button.label), styled, |s| s.bold().green())
            }
            ButtonKind::Numbered => format!(" {} ", button.label),
        };
        parts.push(part);
    }
    parts.join(" ")
}

pub fn format_snapshot(snapshot: &PageSnapshot, styled: bool) -> String {
    let mut out = String::new();
    if let Some(q) = snapshot.query.as_deref() {
        out.push_str(&format!(":: search   : {q}\n"));
    }
    out.push_str(&format!(":: {}\n\n", format_counter(&snapshot.pagination)));
    if snapshot.facts.is_empty() {
        out.push_str("   (no facts)\n");
    }
    let first_index = snapshot.pagination.range.start.max(1);
    for (offset, fact) in snapshot.facts.iter().enumerate() {
        let index = first_index.saturating_add(offset as u64);
        out.push_str(&format!(
            "{:>4}. {}\n",
            index,
            paint(&fact.text, styled, |s| s.white())
        ));
        out.push_str(&format!(
            "      {}  {}\n",
            paint(fact.author_name.trim(), styled, |s| s.dimmed()),
            paint(&format!("+{}", fact.upvotes), styled, |s| s.yellow())
        ));
    }
    out.push('\n');
    out.push_str(&format_pagination_bar(&snapshot.pagination, styled));
    out.push('\n');
    out
}

pub fn format_suggestions(suggestions: &[Suggestion], styled: bool) -> String {
    let mut out = String::new();
    for (i, s) in suggestions.iter().enumerate() {
        out.push_str(&format!(
            "  {}) {}{}\n",
            i + 1,
            paint(&s.matched_prefix, styled, |v| v.bold()),
            s.remainder
        ));
    }
    out
}

pub struct TerminalView<W: Write> {
    out: W,
    styled: bool,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, styled: bool) -> Self {
        Self { out, styled }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::warn!(error = %e, "failed to write to terminal");
        }
    }
}

impl<W: Write> PageView for TerminalView<W> {
    fn apply_snapshot(&mut self, snapshot: &PageSnapshot) {
        let text = format_snapshot(snapshot, self.styled);
        self.emit("\n");
        self.emit(&text);
    }

    fn show_suggestions(&mut self, suggestions: &[Suggestion]) {
        if suggestions.is_empty() {
            return;
        }
        let text = format_suggestions(suggestions, self.styled);
        self.emit(&text);
    }

    fn clear_suggestions(&mut self) {}

    fn show_error(&mut self, message: &str) {
        let line = format!("{} {}\n", paint("error:", self.styled, |s| s.bold().red()), message);
        self.emit(&line);
    }
}

//! Turns a [`QuoteEntry`] into something a front end can draw.
//!
//! [`render`] is a pure function of the entry and the available width, so
//! the same view backs both the interactive terminal widget and the
//! one-shot `show`/`next` output.

use std::fmt;

use crate::scheduler::QuoteEntry;

pub const QUOTE_LINE_LIMIT: usize = 4;
pub const AUTHOR_LINE_LIMIT: usize = 1;
pub const NEXT_ACTION_LABEL: &str = "▶ next";
const ELLIPSIS: char = '…';

/// Static artwork drawn behind the quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    #[default]
    Default,
}

impl Background {
    pub fn asset_name(&self) -> &'static str {
        match self {
            Background::Default => "background",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetView {
    pub quote_lines: Vec<String>,
    pub author: String,
    pub category_label: String,
    pub background: Background,
    pub action_label: &'static str,
}

pub fn render(entry: &QuoteEntry, width: usize) -> WidgetView {
    let width = width.max(1);

    let quote_lines = limit_lines(wrap(&entry.quote.text, width), QUOTE_LINE_LIMIT, width);
    let author = limit_lines(wrap(&entry.quote.author, width), AUTHOR_LINE_LIMIT, width)
        .into_iter()
        .next()
        .unwrap_or_default();

    WidgetView {
        quote_lines,
        author,
        category_label: entry.category.display_name(),
        background: entry.background,
        action_label: NEXT_ACTION_LABEL,
    }
}

impl fmt::Display for WidgetView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.quote_lines {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)?;
        writeln!(f, "❝ {}", self.author)?;
        write!(f, "{}  {}", self.category_label, self.action_label)
    }
}

/// Greedy word wrap on char counts. Words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > width {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
            if needed > width && current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(word.iter());
            current_len += word.len();
        }

        if current_len > 0 {
            lines.push(current);
        }
    }

    lines
}

fn limit_lines(mut lines: Vec<String>, limit: usize, width: usize) -> Vec<String> {
    if lines.len() <= limit {
        return lines;
    }

    let rest = lines.split_off(limit);
    if let Some(last) = lines.last_mut() {
        let overflow = format!("{} {}", last, rest.join(" "));
        let mut kept: String = overflow.chars().take(width.saturating_sub(1)).collect();
        kept.push(ELLIPSIS);
        *last = kept;
    }
    lines
}

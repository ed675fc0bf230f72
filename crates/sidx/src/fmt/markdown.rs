//! Renders doc summaries (markdown) as terminal text.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use super::colorizer::Colorizer;

/// Format a summary for terminal display.
///
/// Summaries are short: soft breaks become spaces, paragraphs are separated
/// by a blank line, links keep only their text. Inline math such as
/// `$\theta$` is left as written.
pub fn format_summary(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut formatter = SummaryFormatter::new();
    for event in Parser::new_ext(markdown, options) {
        formatter.process_event(event);
    }
    formatter.finish()
}

struct SummaryFormatter {
    output: String,
    colorizer: &'static Colorizer,
    /// Open emphasis spans, innermost last, each with the text seen so far.
    styled: Vec<(Style, String)>,
    list_depth: usize,
}

#[derive(Clone, Copy)]
enum Style {
    Emphasis,
    Strong,
}

impl SummaryFormatter {
    fn new() -> Self {
        Self {
            output: String::new(),
            colorizer: Colorizer::get(),
            styled: Vec::new(),
            list_depth: 0,
        }
    }

    fn process_event(&mut self, event: Event) {
        match event {
            Event::Start(Tag::Emphasis) => self.begin_style(Style::Emphasis),
            Event::Start(Tag::Strong) => self.begin_style(Style::Strong),
            Event::End(TagEnd::Emphasis | TagEnd::Strong) => self.end_style(),

            Event::Start(Tag::List(_)) => self.list_depth += 1,
            Event::End(TagEnd::List(_)) => {
                self.list_depth = self.list_depth.saturating_sub(1);
                self.paragraph_break();
            }
            Event::Start(Tag::Item) => {
                self.line_break();
                self.output.push_str(&"  ".repeat(self.list_depth.saturating_sub(1)));
                self.output.push_str("• ");
            }

            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::CodeBlock) => {
                if self.list_depth == 0 {
                    self.paragraph_break();
                }
            }

            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => {
                let code = self.colorizer.inline_code(&code);
                self.push_text(&code);
            }
            Event::SoftBreak => self.push_text(" "),
            Event::HardBreak => self.line_break(),

            _ => {}
        }
    }

    fn begin_style(&mut self, style: Style) {
        self.styled.push((style, String::new()));
    }

    fn end_style(&mut self) {
        let Some((style, text)) = self.styled.pop() else {
            return;
        };
        let styled = match style {
            Style::Emphasis => self.colorizer.emphasis(&text),
            Style::Strong => self.colorizer.strong(&text),
        };
        self.push_text(&styled);
    }

    fn push_text(&mut self, text: &str) {
        match self.styled.last_mut() {
            Some((_, buffer)) => buffer.push_str(text),
            None => self.output.push_str(text),
        }
    }

    fn line_break(&mut self) {
        if !self.output.is_empty() && !self.output.ends_with('\n') {
            self.output.push('\n');
        }
    }

    fn paragraph_break(&mut self) {
        let trimmed = self.output.trim_end_matches('\n').len();
        self.output.truncate(trimmed);
        if !self.output.is_empty() {
            self.output.push_str("\n\n");
        }
    }

    fn finish(self) -> String {
        self.output.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_test(markdown: &str) -> String {
        colored::control::set_override(false);
        format_summary(markdown)
    }

    #[test]
    fn soft_breaks_join_lines() {
        let result = format_test(
            "Representation of tetragonal brillouin zone of 2D material.\na, b, c, and d are vertices of tetragon.",
        );
        insta::assert_snapshot!(result, @"Representation of tetragonal brillouin zone of 2D material. a, b, c, and d are vertices of tetragon.");
    }

    #[test]
    fn inline_math_is_kept() {
        let result = format_test(r"Calculates $\int\limits\_{BZ} \delta(E(p)-E) d\^{2} p$");
        assert_eq!(result, r"Calculates $\int\limits_{BZ} \delta(E(p)-E) d^{2} p$");
    }

    #[test]
    fn inline_code_and_emphasis() {
        let result = format_test("Solves `energy_polar(p, theta) = energy` *exactly*");
        assert_eq!(result, "Solves `energy_polar(p, theta) = energy` exactly");
    }

    #[test]
    fn nested_emphasis_keeps_all_text() {
        assert_eq!(format_test("**bold *it* more**"), "bold it more");
        assert_eq!(format_test("*outer **inner** tail* end"), "outer inner tail end");
    }

    #[test]
    fn paragraphs_and_lists() {
        let result = format_test("First.\n\n- one\n- two\n\nLast.");
        insta::assert_snapshot!(result, @r"
        First.

        • one
        • two

        Last.
        ");
    }

    #[test]
    fn empty_summary() {
        assert_eq!(format_test(""), "");
    }
}

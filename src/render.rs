//! Rendering of buffer lines for the remote display.
//!
//! Markdown markers stay visible; they are wrapped in markup rather than replaced.

use regex_lite::Regex;

/// Turns a window of lines into display markup.
///
/// Rendering is total: every input line produces exactly one output line.
pub trait Renderer {
    /// Renders `lines`, marking the line at index `focus` when present.
    fn render(&self, lines: &[String], focus: Option<usize>) -> Vec<String>;
}

/// Inline markers recognized at word boundaries.
struct Inline {
    open: Regex,
    close: Regex,
    open_with: &'static str,
    close_with: &'static str,
}

impl Inline {
    fn new(open: &str, close: &str, open_with: &'static str, close_with: &'static str) -> Inline {
        Inline {
            open: Regex::new(open).unwrap_or_else(|e| panic!("{open}: {e}")),
            close: Regex::new(close).unwrap_or_else(|e| panic!("{close}: {e}")),
            open_with,
            close_with,
        }
    }

    fn apply(&self, line: &str) -> String {
        let line = self.open.replace_all(line, self.open_with);
        self.close.replace_all(&line, self.close_with).into_owned()
    }
}

/// Line prefixes that turn a line into a block element.
const BLOCKS: [(&str, &str, usize); 5] = [
    ("# ", "h1", 0),
    ("## ", "h2", 0),
    ("### ", "h3", 0),
    ("#### ", "h4", 0),
    ("- ", "li", 2),
];

/// Renders a small subset of Markdown to HTML.
pub struct MarkdownRenderer {
    inlines: Vec<Inline>,
}

impl MarkdownRenderer {
    pub fn new() -> MarkdownRenderer {
        MarkdownRenderer {
            inlines: vec![
                Inline::new(
                    r"(^|\s)(\*\*\S)",
                    r"(\S\*\*)($|\s|:)",
                    "${1}<b>${2}",
                    "${1}</b>${2}",
                ),
                Inline::new(r"(^|\s)(_\S)", r"(\S_)($|\s|:)", "${1}<i>${2}", "${1}</i>${2}"),
                Inline::new(
                    r"(^|\s)(`\S)",
                    r"(\S`)($|\s|:)",
                    "${1}<tt>${2}",
                    "${1}</tt>${2}",
                ),
                Inline::new(
                    r"(^|\s)(::\S)",
                    r"(\S::)($|\s)",
                    "${1}<span class='highlight'>${2}",
                    "${1}</span>${2}",
                ),
            ],
        }
    }

    fn render_line(&self, line: &str, focused: bool) -> String {
        if line == "---" {
            return focus("<hr/>".to_string(), focused);
        }
        if line.is_empty() {
            return focus(r#"<span class="small">&nbsp;</span>"#.to_string(), focused);
        }

        let text = self
            .inlines
            .iter()
            .fold(line.to_string(), |text, inline| inline.apply(&text));

        match BLOCKS.iter().find(|(prefix, _, _)| line.starts_with(prefix)) {
            Some((_, tag, clip)) => {
                let body: String = text.chars().skip(*clip).collect();
                if focused {
                    format!(r#"<{tag} class="focus">{body}</{tag}>"#)
                } else {
                    format!("<{tag}>{body}</{tag}>")
                }
            }
            None => focus(text, focused) + "<br/>",
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> MarkdownRenderer {
        MarkdownRenderer::new()
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, lines: &[String], focus: Option<usize>) -> Vec<String> {
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| self.render_line(line, focus == Some(i)))
            .collect()
    }
}

fn focus(text: String, focused: bool) -> String {
    if focused {
        format!(r#"<span class="focus">{text}</span>"#)
    } else {
        text
    }
}

/// Returns the index of the first line to render and the index of the focused line
/// relative to it.
///
/// With `viz` unset the window height follows the font size, or is fixed when the
/// display is rotated. The window starts at the top of the buffer until the focused
/// row falls outside it, after which it keeps `shift` lines above the focus.
pub fn viewport(
    row: usize,
    viz: Option<(usize, usize)>,
    font_size: u32,
    rotated: bool,
) -> (usize, usize) {
    let (lines, shift) = match viz {
        Some(viz) => viz,
        None if rotated => (font_size as usize / 9, 2),
        None => {
            let lines = 1100 / (font_size.max(1) as usize).saturating_mul(2) + 2;
            (lines, lines / 2)
        }
    };
    if row < lines {
        (0, row)
    } else {
        let start = row.saturating_sub(shift);
        (start, row - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_one(line: &str) -> String {
        MarkdownRenderer::new()
            .render(&[line.to_string()], None)
            .remove(0)
    }

    #[test]
    fn headers() {
        for (text, expect) in [
            ("# foo", "<h1># foo</h1>"),
            ("## foo", "<h2>## foo</h2>"),
            ("### foo", "<h3>### foo</h3>"),
            ("#### foo", "<h4>#### foo</h4>"),
        ] {
            assert_eq!(render_one(text), expect);
        }
    }

    #[test]
    fn bold() {
        for (text, expect) in [
            ("**foo**", "<b>**foo**</b><br/>"),
            (" **foo**", " <b>**foo**</b><br/>"),
            (" **foo** ", " <b>**foo**</b> <br/>"),
            ("**foo** ", "<b>**foo**</b> <br/>"),
            ("**foo**: ", "<b>**foo**</b>: <br/>"),
            (" **foo bar** ", " <b>**foo bar**</b> <br/>"),
        ] {
            assert_eq!(render_one(text), expect);
        }
    }

    #[test]
    fn italics() {
        for (text, expect) in [
            ("_foo_", "<i>_foo_</i><br/>"),
            (" _foo_ ", " <i>_foo_</i> <br/>"),
            ("_foo_: ", "<i>_foo_</i>: <br/>"),
            ("_f_oo_", "<i>_f_oo_</i><br/>"),
            (" _f_oo bar_ ", " <i>_f_oo bar_</i> <br/>"),
        ] {
            assert_eq!(render_one(text), expect);
        }
    }

    #[test]
    fn teletype() {
        for (text, expect) in [
            ("`foo`", "<tt>`foo`</tt><br/>"),
            (" `foo bar` ", " <tt>`foo bar`</tt> <br/>"),
        ] {
            assert_eq!(render_one(text), expect);
        }
    }

    #[test]
    fn blocks_and_focus() {
        let lines: Vec<String> = ["- item", "---", "", "text", "# head"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let renderer = MarkdownRenderer::new();
        assert_eq!(
            renderer.render(&lines, Some(3)),
            vec![
                "<li>item</li>",
                "<hr/>",
                r#"<span class="small">&nbsp;</span>"#,
                r#"<span class="focus">text</span><br/>"#,
                "<h1># head</h1>",
            ]
        );
        assert_eq!(
            renderer.render(&lines[4..], Some(0)),
            vec![r#"<h1 class="focus"># head</h1>"#]
        );
        assert_eq!(
            renderer.render(&lines[2..3], Some(0)),
            vec![r#"<span class="focus"><span class="small">&nbsp;</span></span>"#]
        );
    }

    #[test]
    fn highlight() {
        assert_eq!(
            render_one("a ::b:: c"),
            "a <span class='highlight'>::b::</span> c<br/>"
        );
    }

    #[test]
    fn viewport_windows() {
        // font size 50 gives 13 lines with a shift of 6
        assert_eq!(viewport(3, None, 50, false), (0, 3));
        assert_eq!(viewport(12, None, 50, false), (0, 12));
        assert_eq!(viewport(13, None, 50, false), (7, 6));
        // rotated: 5 lines with a shift of 2
        assert_eq!(viewport(4, None, 50, true), (0, 4));
        assert_eq!(viewport(5, None, 50, true), (3, 2));
        assert_eq!(viewport(9, Some((4, 1)), 50, false), (8, 1));
        assert_eq!(viewport(1, None, u32::MAX, false), (0, 1));
    }
}

use super::TextSurface;
use crate::model::Color;

/// Headless editable text region.
///
/// Markup is stored verbatim. Typed text is HTML-escaped and, once a color
/// command has been issued, wrapped in a `<span style="color: ...;">` the
/// way a browser's `styleWithCSS` + `foreColor` pair does. Consecutive
/// insertions in the same color extend the same span.
#[derive(Debug, Default)]
pub struct RichText {
    markup: String,
    pending_color: Option<Color>,
    open_span: Option<Color>,
    focused: bool,
}

impl RichText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_color(&self) -> Option<Color> {
        self.pending_color
    }
}

impl TextSurface for RichText {
    fn serialize(&self) -> String {
        self.markup.clone()
    }

    fn set_content(&mut self, markup: &str) {
        self.markup = markup.to_string();
        self.open_span = None;
    }

    fn set_color(&mut self, color: Color) {
        self.pending_color = Some(color);
        self.focus();
    }

    fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let escaped = escape_html(text);

        match self.pending_color {
            None => self.markup.push_str(&escaped),
            Some(color) if self.open_span == Some(color) && self.markup.ends_with(SPAN_CLOSE) => {
                let at = self.markup.len() - SPAN_CLOSE.len();
                self.markup.insert_str(at, &escaped);
            }
            Some(color) => {
                self.markup.push_str(&format!(
                    "<span style=\"color: {};\">{}{}",
                    color.css_name(),
                    escaped,
                    SPAN_CLOSE
                ));
                self.open_span = Some(color);
            }
        }
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }
}

const SPAN_CLOSE: &str = "</span>";

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\n' => out.push_str("<br>"),
            _ => out.push(c),
        }
    }
    out
}

/// A stretch of readable text drawn in one ink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub ink: [u8; 4],
}

/// Readable text of a markup string: tags dropped, line breaks kept, the
/// common entities decoded.
pub fn plain_text(markup: &str) -> String {
    styled_runs(markup).into_iter().map(|run| run.text).collect()
}

/// Split markup into runs of readable text, each in the ink its enclosing
/// `<span style="color: ...">` or `<font color=...>` gives it. Text outside
/// any colored element is black.
pub fn styled_runs(markup: &str) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut inks: Vec<[u8; 4]> = Vec::new();
    let current = |inks: &[[u8; 4]]| inks.last().copied().unwrap_or(Color::Black.rgba());

    let mut rest = markup;
    while let Some(start) = rest.find('<') {
        let ink = current(&inks);
        push_run(&mut runs, &rest[..start], ink);
        let Some(end) = rest[start..].find('>') else {
            rest = &rest[start..];
            break;
        };
        let tag = rest[start + 1..start + end].trim().trim_end_matches('/');
        let name = tag
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match name.as_str() {
            "br" | "div" | "p" => push_run(&mut runs, "\n", ink),
            "span" | "font" => inks.push(tag_color(tag).unwrap_or(ink)),
            "/span" | "/font" => {
                inks.pop();
            }
            _ => {}
        }
        rest = &rest[start + end + 1..];
    }
    push_run(&mut runs, rest, current(&inks));
    runs
}

fn push_run(runs: &mut Vec<TextRun>, raw: &str, ink: [u8; 4]) {
    if raw.is_empty() {
        return;
    }
    let text = raw
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&");
    match runs.last_mut() {
        Some(last) if last.ink == ink => last.text.push_str(&text),
        _ => runs.push(TextRun { text, ink }),
    }
}

/// Color set by an opening tag, from its `style` or a `<font color>`.
fn tag_color(tag: &str) -> Option<[u8; 4]> {
    let tag = tag.to_ascii_lowercase();
    let mut found = None;
    for declaration in tag.split([';', '"', '\'']) {
        let Some((property, value)) = declaration.split_once(':') else {
            continue;
        };
        let property = property
            .rsplit(|c: char| c.is_whitespace() || c == '=')
            .next()
            .unwrap_or_default();
        if property == "color" {
            found = parse_css_color(value).or(found);
        }
    }
    found.or_else(|| {
        let (_, rest) = tag.split_once(" color=")?;
        let value = rest.trim_start_matches(['"', '\'']);
        let end = value.find(['"', '\'', ' ']).unwrap_or(value.len());
        parse_css_color(&value[..end])
    })
}

/// Named, `#rgb`, `#rrggbb` and `rgb()` colors. Alpha is ignored.
fn parse_css_color(value: &str) -> Option<[u8; 4]> {
    let value = value.trim().to_ascii_lowercase();
    if let Some(color) = Color::from_css_name(&value) {
        return Some(color.rgba());
    }
    if let Some(hex) = value.strip_prefix('#') {
        let digits = hex
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<Vec<u8>>>()?;
        return match digits.as_slice() {
            [r, g, b] => Some([r * 17, g * 17, b * 17, 255]),
            [r1, r2, g1, g2, b1, b2] => Some([r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2, 255]),
            _ => None,
        };
    }
    let inner = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let mut channels = inner.split(',').map(|c| c.trim().parse::<u8>().ok());
    Some([channels.next()??, channels.next()??, channels.next()??, 255])
}

use ratatui::prelude::*;
use unicode_width::UnicodeWidthStr;

/// The animated line: current snapshot followed by the cursor glyph.
///
/// A hidden cursor (blink off) still takes its width so the line does not
/// shift while blinking.
#[derive(Debug, Clone, PartialEq)]
pub struct TypingLine<'a> {
    text: &'a str,
    cursor: Option<&'a str>,
    cursor_visible: bool,
    text_style: Style,
    cursor_style: Style,
}

impl<'a> TypingLine<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            cursor: None,
            cursor_visible: false,
            text_style: Style::default(),
            cursor_style: Style::default(),
        }
    }

    pub fn cursor(mut self, glyph: &'a str, visible: bool) -> Self {
        self.cursor = Some(glyph);
        self.cursor_visible = visible;
        self
    }

    pub fn text_style(mut self, style: Style) -> Self {
        self.text_style = style;
        self
    }

    pub fn cursor_style(mut self, style: Style) -> Self {
        self.cursor_style = style;
        self
    }

    /// Columns taken by the line including the cursor cell.
    pub fn width(&self) -> usize {
        self.text.width() + self.cursor.map_or(0, UnicodeWidthStr::width)
    }
}

impl Widget for TypingLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(self.text, self.text_style)];
        match self.cursor {
            Some(glyph) if self.cursor_visible => {
                spans.push(Span::styled(glyph, self.cursor_style));
            }
            Some(glyph) => spans.push(Span::raw(" ".repeat(glyph.width()))),
            None => {}
        }
        Line::from(spans).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_render_text_and_cursor() {
        let area = Rect::new(0, 0, 8, 1);
        let mut buffer = Buffer::empty(area);
        TypingLine::new("Hey").cursor("|", true).render(area, &mut buffer);
        assert_eq!(row(&buffer, 0), "Hey|    ");
    }

    #[test]
    fn test_hidden_cursor_keeps_its_cell() {
        let area = Rect::new(0, 0, 8, 1);
        let mut buffer = Buffer::empty(area);
        let line = TypingLine::new("Hey").cursor("|", false);
        assert_eq!(line.width(), 4);
        line.render(area, &mut buffer);
        assert_eq!(row(&buffer, 0), "Hey     ");
    }

    #[test]
    fn test_cursor_uses_its_style() {
        let area = Rect::new(0, 0, 4, 1);
        let mut buffer = Buffer::empty(area);
        TypingLine::new("ab")
            .text_style(Style::default().fg(Color::Yellow))
            .cursor("_", true)
            .cursor_style(Style::default().fg(Color::Red))
            .render(area, &mut buffer);

        assert_eq!(buffer[(0, 0)].fg, Color::Yellow);
        assert_eq!(buffer[(2, 0)].symbol(), "_");
        assert_eq!(buffer[(2, 0)].fg, Color::Red);
    }

    #[test]
    fn test_wide_graphemes() {
        let line = TypingLine::new("日本").cursor("|", true);
        assert_eq!(line.width(), 5);
    }

    #[test]
    fn test_no_cursor() {
        let area = Rect::new(0, 0, 4, 1);
        let mut buffer = Buffer::empty(area);
        let line = TypingLine::new("ab");
        assert_eq!(line.width(), 2);
        line.render(area, &mut buffer);
        assert_eq!(row(&buffer, 0), "ab  ");
    }
}

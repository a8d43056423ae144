use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Tab stops are expanded to this many spaces.
const TAB_WIDTH: usize = 4;

/// Strip terminal control sequences and control characters from text
/// received over the network, keeping newlines and expanding tabs.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\n' => out.push('\n'),
            '\t' => out.push_str(&" ".repeat(TAB_WIDTH)),
            '\r' => {
                // CRLF collapses to LF; a lone CR becomes a line break
                if chars.peek() != Some(&'\n') {
                    out.push('\n');
                }
            }
            '\u{1b}' => skip_escape(&mut chars),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }

    out
}

/// Consume the rest of an escape sequence after ESC.
fn skip_escape(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    match chars.peek() {
        // CSI: ESC [ params final-byte
        Some('[') => {
            chars.next();
            for c in chars.by_ref() {
                if ('\u{40}'..='\u{7e}').contains(&c) {
                    break;
                }
            }
        }
        // OSC: ESC ] ... BEL or ESC \
        Some(']') => {
            chars.next();
            while let Some(c) = chars.next() {
                if c == '\u{7}' {
                    break;
                }
                if c == '\u{1b}' && chars.peek() == Some(&'\\') {
                    chars.next();
                    break;
                }
            }
        }
        Some(_) => {
            chars.next();
        }
        None => {}
    }
}

/// Wrap text to fit within a given width, measured in terminal columns.
///
/// Explicit line breaks are kept; blank lines survive as empty lines.
/// Runs of spaces inside a line are collapsed. Words wider than `width`
/// are broken into width-sized pieces.
///
/// # Arguments
/// * `text` - The text to wrap
/// * `width` - Maximum width per line
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    wrap_text_with_first(text, width, width)
}

/// Wrap text like [`wrap_text`], with a separate budget for the first line.
///
/// Used when the first line shares its row with a trailing label.
pub fn wrap_text_with_first(text: &str, first_width: usize, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let first_width = first_width.clamp(1, width);
    let budget = |first: bool| if first { first_width } else { width };

    let mut lines: Vec<String> = Vec::new();

    for paragraph in text.split('\n') {
        let mut current_line = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            let gap = usize::from(!current_line.is_empty());

            if current_width + gap + word_width <= budget(lines.is_empty()) {
                if gap == 1 {
                    current_line.push(' ');
                }
                current_line.push_str(word);
                current_width += gap + word_width;
                continue;
            }

            if !current_line.is_empty() {
                lines.push(std::mem::take(&mut current_line));
                current_width = 0;
            }

            // Word starts a fresh line and is split if still too wide
            for c in word.chars() {
                let char_width = c.width().unwrap_or(0);
                if current_width + char_width > budget(lines.is_empty())
                    && !current_line.is_empty()
                {
                    lines.push(std::mem::take(&mut current_line));
                    current_width = 0;
                }
                current_line.push(c);
                current_width += char_width;
            }
        }

        lines.push(current_line);
    }

    // Trailing newlines in answers are noise
    while lines.len() > 1 && lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines
}

//! Static Helvetica metrics and greedy word-wrap for the direct-drawing renderer.
//!
//! Widths are the standard Helvetica AFM advances in 1/1000 em, covering ASCII
//! 0x20..=0x7E. Index = (char as usize) - 32. Bold is approximated by scaling
//! the regular table; close enough for wrapping decisions on a 170mm column.

/// Millimetres per PDF point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

const BOLD_SCALE: f32 = 1.06;
/// Fallback advance for characters outside the table.
const AVERAGE_WIDTH: u16 = 556;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

impl FontStyle {
    /// Resource name of the font in the page resources dictionary.
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontStyle::Regular => "F1",
            FontStyle::Bold => "F2",
        }
    }

    pub fn base_font(&self) -> &'static str {
        match self {
            FontStyle::Regular => "Helvetica",
            FontStyle::Bold => "Helvetica-Bold",
        }
    }
}

#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 95] = [
    // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0    1    2    3    4    5    6    7    8    9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    278, 278, 584, 584, 584, 556, 1015,
    // A    B    C    D    E    F    G    H    I    J    K    L    M
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    278, 278, 278, 469, 556, 333,
    // a    b    c    d    e    f    g    h    i    j    k    l    m
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    // n    o    p    q    r    s    t    u    v    w    x    y    z
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // {    |    }    ~
    334, 260, 334, 584,
];

fn char_width(c: char) -> u16 {
    let code = c as usize;
    if (32..=126).contains(&code) {
        HELVETICA_WIDTHS[code - 32]
    } else if c == '\u{2022}' {
        350 // bullet
    } else {
        AVERAGE_WIDTH
    }
}

/// Rendered width of `text` in millimetres at `size_pt`.
pub fn measure_mm(text: &str, size_pt: f32, style: FontStyle) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c))).sum();
    let scale = match style {
        FontStyle::Regular => 1.0,
        FontStyle::Bold => BOLD_SCALE,
    };
    units as f32 / 1000.0 * size_pt * MM_PER_PT * scale
}

/// Splits `text` into lines no wider than `max_width_mm`.
///
/// Greedy word-wrap; explicit newlines start a new line; a single word wider
/// than the column is broken between characters. Empty input yields no lines.
pub fn split_text_to_size(
    text: &str,
    max_width_mm: f32,
    size_pt: f32,
    style: FontStyle,
) -> Vec<String> {
    let space_w = measure_mm(" ", size_pt, style);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_w = 0.0_f32;

        for word in paragraph.split_whitespace() {
            let word_w = measure_mm(word, size_pt, style);

            if current.is_empty() {
                if word_w > max_width_mm {
                    let mut pieces = break_word(word, max_width_mm, size_pt, style);
                    let last = pieces.pop().unwrap_or_default();
                    lines.extend(pieces);
                    current_w = measure_mm(&last, size_pt, style);
                    current = last;
                } else {
                    current.push_str(word);
                    current_w = word_w;
                }
            } else if current_w + space_w + word_w > max_width_mm {
                lines.push(std::mem::take(&mut current));
                if word_w > max_width_mm {
                    let mut pieces = break_word(word, max_width_mm, size_pt, style);
                    let last = pieces.pop().unwrap_or_default();
                    lines.extend(pieces);
                    current_w = measure_mm(&last, size_pt, style);
                    current = last;
                } else {
                    current.push_str(word);
                    current_w = word_w;
                }
            } else {
                current.push(' ');
                current.push_str(word);
                current_w += space_w + word_w;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

fn break_word(word: &str, max_width_mm: f32, size_pt: f32, style: FontStyle) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_w = 0.0_f32;
    for c in word.chars() {
        let mut buf = [0u8; 4];
        let c_w = measure_mm(c.encode_utf8(&mut buf), size_pt, style);
        if !piece.is_empty() && piece_w + c_w > max_width_mm {
            pieces.push(std::mem::take(&mut piece));
            piece_w = 0.0;
        }
        piece.push(c);
        piece_w += c_w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// Encodes text for a standard-14 font with WinAnsiEncoding.
/// Characters with no WinAnsi slot become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_known_width() {
        // "0" is 556 units: at 10pt → 5.56pt → ~1.96mm
        let w = measure_mm("0", 10.0, FontStyle::Regular);
        assert!((w - 5.56 * MM_PER_PT).abs() < 1e-4);
        assert!(measure_mm("abc", 10.0, FontStyle::Bold) > measure_mm("abc", 10.0, FontStyle::Regular));
    }

    #[test]
    fn test_short_text_is_one_line() {
        let lines = split_text_to_size("Start small", 160.0, 10.0, FontStyle::Regular);
        assert_eq!(lines, vec!["Start small"]);
    }

    #[test]
    fn test_long_text_wraps_within_width() {
        let text = "Gather information and create a detailed plan before committing savings to the voyage. "
            .repeat(4);
        let lines = split_text_to_size(&text, 70.0, 10.0, FontStyle::Regular);
        assert!(lines.len() > 2);
        for line in &lines {
            assert!(measure_mm(line, 10.0, FontStyle::Regular) <= 70.0 + 1e-3, "too wide: {line}");
        }
        // No words lost
        let rejoined = lines.join(" ");
        assert_eq!(
            rejoined.split_whitespace().count(),
            text.split_whitespace().count()
        );
    }

    #[test]
    fn test_overlong_word_is_broken() {
        let word = "x".repeat(200);
        let lines = split_text_to_size(&word, 30.0, 12.0, FontStyle::Regular);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_newlines_start_new_lines_and_empty_yields_nothing() {
        let lines = split_text_to_size("one\ntwo", 160.0, 10.0, FontStyle::Regular);
        assert_eq!(lines, vec!["one", "two"]);
        assert!(split_text_to_size("   ", 160.0, 10.0, FontStyle::Regular).is_empty());
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("A \u{2022} b"), vec![b'A', b' ', 0x95, b' ', b'b']);
        assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("日"), vec![b'?']);
    }
}

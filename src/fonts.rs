use serde::{Deserialize, Serialize};

/// The two PDF standard faces used by the transcript. Both are referenced by
/// name with WinAnsiEncoding, so no font program is embedded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFace {
    Regular,
    Bold,
}

impl FontFace {
    pub const ALL: [FontFace; 2] = [FontFace::Regular, FontFace::Bold];

    /// Resource name used in page content streams.
    pub fn pdf_name(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
        }
    }

    /// Width of a WinAnsi byte in 1000-units.
    fn byte_width_1000(self, byte: u8) -> f32 {
        let (ascii, high) = match self {
            FontFace::Regular => (&HELVETICA_ASCII, &HELVETICA_HIGH),
            FontFace::Bold => (&HELVETICA_BOLD_ASCII, &HELVETICA_BOLD_HIGH),
        };
        match byte {
            32..=126 => ascii[(byte - 32) as usize] as f32,
            0x80..=0xFF => high[(byte - 0x80) as usize] as f32,
            _ => 0.0,
        }
    }

    pub fn text_width(self, text: &str, font_size: f32) -> f32 {
        to_winansi_bytes(text)
            .iter()
            .map(|&b| self.byte_width_1000(b) * font_size / 1000.0)
            .sum()
    }

    pub fn ascender_ratio(self) -> f32 {
        0.718
    }

    pub fn line_height_ratio(self) -> f32 {
        1.15
    }
}

/// Helvetica AFM widths for ASCII 32..=126.
#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold AFM widths for ASCII 32..=126.
#[rustfmt::skip]
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Helvetica AFM widths for WinAnsi 0x80..=0xFF. Unassigned codes use the
/// bullet width.
#[rustfmt::skip]
const HELVETICA_HIGH: [u16; 128] = [
    556, 350, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 350, 611, 350,
    350, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 350, 500, 667,
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

/// Helvetica-Bold AFM widths for WinAnsi 0x80..=0xFF.
#[rustfmt::skip]
const HELVETICA_BOLD_HIGH: [u16; 128] = [
    556, 350, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 350, 611, 350,
    350, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 350, 500, 667,
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str encoding.
/// Characters with no WinAnsi code point are dropped.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars().filter_map(char_to_winansi).collect()
}

fn char_to_winansi(c: char) -> Option<u8> {
    match c as u32 {
        0x0020..=0x007E => Some(c as u8),
        0x00A0..=0x00FF => Some(c as u8), // Latin-1 supplement maps directly
        0x20AC => Some(0x80),
        0x201A => Some(0x82),
        0x0192 => Some(0x83),
        0x201E => Some(0x84),
        0x2026 => Some(0x85),
        0x2020 => Some(0x86),
        0x2021 => Some(0x87),
        0x02C6 => Some(0x88),
        0x2030 => Some(0x89),
        0x0160 => Some(0x8A),
        0x2039 => Some(0x8B),
        0x0152 => Some(0x8C),
        0x017D => Some(0x8E),
        0x2018 => Some(0x91),
        0x2019 => Some(0x92),
        0x201C => Some(0x93),
        0x201D => Some(0x94),
        0x2022 => Some(0x95),
        0x2013 => Some(0x96),
        0x2014 => Some(0x97),
        0x02DC => Some(0x98),
        0x2122 => Some(0x99),
        0x0161 => Some(0x9A),
        0x203A => Some(0x9B),
        0x0153 => Some(0x9C),
        0x017E => Some(0x9E),
        0x0178 => Some(0x9F),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winansi_remaps_punctuation() {
        assert_eq!(to_winansi_bytes("a\u{2013}b"), vec![b'a', 0x96, b'b']);
        assert_eq!(to_winansi_bytes("\u{2026}"), vec![0x85]);
        // CJK has no WinAnsi code point
        assert_eq!(to_winansi_bytes("x\u{4E2D}y"), vec![b'x', b'y']);
    }

    #[test]
    fn helvetica_widths_match_afm() {
        // "Hi" = H(722) + i(222)
        let w = FontFace::Regular.text_width("Hi", 10.0);
        assert!((w - 9.44).abs() < 1e-3);
        let wb = FontFace::Bold.text_width("Hi", 10.0);
        assert!((wb - 10.0).abs() < 1e-3);
    }

    #[test]
    fn latin1_widths_match_afm() {
        // é(556) ü(556) ñ(556) Ø(778) in Helvetica, ü/ñ widen to 611 in bold
        let w = FontFace::Regular.text_width("\u{e9}\u{fc}\u{f1}\u{d8}", 10.0);
        assert!((w - 24.46).abs() < 1e-3);
        let wb = FontFace::Bold.text_width("\u{fc}\u{f1}", 10.0);
        assert!((wb - 12.22).abs() < 1e-3);
        // ellipsis and em dash are full-width, ç is narrow in the regular face
        assert!((FontFace::Regular.text_width("\u{2026}\u{2014}", 1.0) - 2.0).abs() < 1e-6);
        assert!((FontFace::Regular.text_width("\u{e7}", 1.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn bold_is_never_narrower() {
        let text = "Data Structures and Algorithms";
        assert!(FontFace::Bold.text_width(text, 11.0) >= FontFace::Regular.text_width(text, 11.0));
    }
}

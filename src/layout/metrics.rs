//! Static glyph widths for the base-14 font families.
//!
//! Widths are in thousandths of the font size and cover printable ASCII
//! (0x20..=0x7E, index = `c as usize - 32`). Other characters use a per-family
//! average. Times bold is approximated from the regular table.

use crate::model::FontFamily;

const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722,
    667, 611, 722, 667, 944, 667, 667, 611, // A..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333,
    500, 278, 556, 500, 722, 500, 500, 500, // a..z
    334, 260, 334, 584, // {..~
];

const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, //
    333, 333, 584, 584, 584, 611, 975, //
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, 667, 778, 722,
    667, 611, 722, 667, 944, 667, 667, 611, //
    333, 278, 333, 584, 556, 333, //
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611, 611, 389,
    556, 333, 611, 556, 778, 556, 556, 500, //
    389, 280, 389, 584,
];

const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278, //
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, //
    278, 278, 564, 564, 564, 444, 921, //
    722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722, 556, 722, 667,
    556, 611, 722, 722, 944, 722, 722, 611, //
    333, 278, 333, 469, 500, 333, //
    444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500, 500, 500, 333,
    389, 278, 500, 500, 722, 500, 500, 444, //
    480, 200, 480, 541,
];

const COURIER: u16 = 600;
const BULLET: u16 = 350;
const TIMES_BOLD_FACTOR: f32 = 1.06;

/// Width of one character in thousandths of the font size.
pub fn char_width(font: FontFamily, bold: bool, c: char) -> f32 {
    if font == FontFamily::Courier {
        return f32::from(COURIER);
    }
    if c == '•' {
        return f32::from(BULLET);
    }

    let (table, average) = match (font, bold) {
        (FontFamily::Helvetica, false) => (&HELVETICA, 556),
        (FontFamily::Helvetica, true) => (&HELVETICA_BOLD, 611),
        _ => (&TIMES_ROMAN, 500),
    };
    let code = c as u32;
    let width = f32::from(if (0x20..=0x7E).contains(&code) {
        table[(code - 0x20) as usize]
    } else {
        average
    });

    if font == FontFamily::TimesRoman && bold {
        width * TIMES_BOLD_FACTOR
    } else {
        width
    }
}

/// Width of a string in points.
pub fn text_width(text: &str, font: FontFamily, bold: bool, size: f32) -> f32 {
    text.chars().map(|c| char_width(font, bold, c)).sum::<f32>() * size / 1000.0
}

//! Printer directives and their ESC/POS byte encoding.

use serde::{Deserialize, Serialize};

const ESC: u8 = 0x1B;
const GS: u8 = 0x1D;
const LF: u8 = b'\n';

/// Horizontal alignment (`ESC a n`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// Character magnification (`GS ! n`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSize {
    /// 1× width, 1× height
    Normal,
    /// 2× width, 2× height
    Large,
    /// 3× width, 3× height
    ExtraLarge,
}

/// One atomic printer instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op", content = "arg")]
pub enum Directive {
    /// Clear formatting state at the start of a slip.
    Initialize,
    Align(Alignment),
    Bold(bool),
    Size(FontSize),
    /// Text followed by a line feed.
    Line(String),
    /// Feed and full cut.
    Cut,
    /// Return the device to power-on state after the last slip.
    Reset,
}

impl Directive {
    /// Appends this directive's bytes to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        match self {
            Directive::Initialize | Directive::Reset => out.extend_from_slice(&[ESC, b'@']),
            Directive::Align(alignment) => {
                let n = match alignment {
                    Alignment::Left => 0x00,
                    Alignment::Center => 0x01,
                    Alignment::Right => 0x02,
                };
                out.extend_from_slice(&[ESC, b'a', n]);
            }
            Directive::Bold(on) => out.extend_from_slice(&[ESC, b'E', u8::from(*on)]),
            Directive::Size(size) => {
                let n = match size {
                    FontSize::Normal => 0x00,
                    FontSize::Large => 0x11,
                    FontSize::ExtraLarge => 0x22,
                };
                out.extend_from_slice(&[GS, b'!', n]);
            }
            Directive::Line(text) => {
                out.extend_from_slice(text.as_bytes());
                out.push(LF);
            }
            Directive::Cut => out.extend_from_slice(&[GS, b'V', 0x41, 0x00]),
        }
    }

    /// Bytes for this directive alone.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_to(&mut out);
        out
    }
}

/// Serializes a directive sequence, in order, with nothing in between.
pub fn render(directives: &[Directive]) -> Vec<u8> {
    let mut out = Vec::with_capacity(directives.len() * 4);
    for directive in directives {
        directive.write_to(&mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_codes() {
        assert_eq!(Directive::Initialize.to_bytes(), vec![0x1B, 0x40]);
        assert_eq!(Directive::Reset.to_bytes(), vec![0x1B, 0x40]);
        assert_eq!(Directive::Bold(true).to_bytes(), vec![0x1B, 0x45, 0x01]);
        assert_eq!(Directive::Bold(false).to_bytes(), vec![0x1B, 0x45, 0x00]);
        assert_eq!(Directive::Align(Alignment::Left).to_bytes(), vec![0x1B, 0x61, 0x00]);
        assert_eq!(Directive::Align(Alignment::Center).to_bytes(), vec![0x1B, 0x61, 0x01]);
        assert_eq!(Directive::Align(Alignment::Right).to_bytes(), vec![0x1B, 0x61, 0x02]);
        assert_eq!(Directive::Size(FontSize::Normal).to_bytes(), vec![0x1D, 0x21, 0x00]);
        assert_eq!(Directive::Size(FontSize::Large).to_bytes(), vec![0x1D, 0x21, 0x11]);
        assert_eq!(Directive::Size(FontSize::ExtraLarge).to_bytes(), vec![0x1D, 0x21, 0x22]);
        assert_eq!(Directive::Cut.to_bytes(), vec![0x1D, 0x56, 0x41, 0x00]);
    }

    #[test]
    fn test_line_is_utf8_plus_newline() {
        assert_eq!(
            Directive::Line("5.00€".into()).to_bytes(),
            "5.00€\n".as_bytes().to_vec()
        );
    }

    #[test]
    fn test_render_concatenates_in_order() {
        let bytes = render(&[Directive::Bold(true), Directive::Line("A".into()), Directive::Reset]);
        assert_eq!(bytes, vec![0x1B, 0x45, 0x01, b'A', b'\n', 0x1B, 0x40]);
    }
}

//! Input key model.
//!
//! [`Key`] is the dispatcher's view of one raw input event: a printable
//! character, a control chord, or a special key. The external input-reading
//! loop translates terminal events into this type; the dispatcher only ever
//! hashes and compares it.
//!
//! `FromStr` accepts the spellings used by keymap override configuration:
//! single characters (`"q"`), `C-` control chords (`"C-p"`), function keys
//! (`"F5"`), and case-insensitive special-key names (`"Up"`, `"PageDown"`).

use crate::domain::GitscopeError;
use std::fmt;
use std::str::FromStr;

/// One input key as seen by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character, case-significant (`q` and `Q` are distinct keys).
    Char(char),
    /// A control chord, stored lowercased (`Ctrl('p')` for `C-p`).
    Ctrl(char),
    /// Function key `F1`..=`F12`.
    F(u8),
    Up,
    Down,
    Left,
    Right,
    Enter,
    Tab,
    BackTab,
    Backspace,
    Esc,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::Ctrl(c) => write!(f, "C-{c}"),
            Self::F(n) => write!(f, "F{n}"),
            Self::Up => f.write_str("Up"),
            Self::Down => f.write_str("Down"),
            Self::Left => f.write_str("Left"),
            Self::Right => f.write_str("Right"),
            Self::Enter => f.write_str("Enter"),
            Self::Tab => f.write_str("Tab"),
            Self::BackTab => f.write_str("BackTab"),
            Self::Backspace => f.write_str("Backspace"),
            Self::Esc => f.write_str("Esc"),
            Self::Home => f.write_str("Home"),
            Self::End => f.write_str("End"),
            Self::PageUp => f.write_str("PageUp"),
            Self::PageDown => f.write_str("PageDown"),
            Self::Insert => f.write_str("Insert"),
            Self::Delete => f.write_str("Delete"),
        }
    }
}

impl FromStr for Key {
    type Err = GitscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Self::Char(c));
        }

        if let Some(rest) = s.strip_prefix("C-").or_else(|| s.strip_prefix("c-")) {
            let mut rest_chars = rest.chars();
            if let (Some(c), None) = (rest_chars.next(), rest_chars.next()) {
                return Ok(Self::Ctrl(c.to_ascii_lowercase()));
            }
            return Err(GitscopeError::Config(format!("unknown key `{s}`")));
        }

        if let Some(digits) = s.strip_prefix('F').or_else(|| s.strip_prefix('f')) {
            if let Ok(n) = digits.parse::<u8>() {
                if (1..=12).contains(&n) {
                    return Ok(Self::F(n));
                }
            }
        }

        let key = match s.to_ascii_lowercase().as_str() {
            "up" => Self::Up,
            "down" => Self::Down,
            "left" => Self::Left,
            "right" => Self::Right,
            "enter" | "return" => Self::Enter,
            "tab" => Self::Tab,
            "backtab" => Self::BackTab,
            "backspace" => Self::Backspace,
            "esc" | "escape" => Self::Esc,
            "home" => Self::Home,
            "end" => Self::End,
            "pageup" => Self::PageUp,
            "pagedown" => Self::PageDown,
            "insert" => Self::Insert,
            "delete" => Self::Delete,
            "space" => Self::Char(' '),
            _ => return Err(GitscopeError::Config(format!("unknown key `{s}`"))),
        };
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_characters_keep_case() {
        assert_eq!("q".parse::<Key>().unwrap(), Key::Char('q'));
        assert_eq!("Q".parse::<Key>().unwrap(), Key::Char('Q'));
    }

    #[test]
    fn control_chords_lowercase() {
        assert_eq!("C-p".parse::<Key>().unwrap(), Key::Ctrl('p'));
        assert_eq!("C-P".parse::<Key>().unwrap(), Key::Ctrl('p'));
        assert_eq!("c-n".parse::<Key>().unwrap(), Key::Ctrl('n'));
    }

    #[test]
    fn special_names_are_case_insensitive() {
        assert_eq!("Up".parse::<Key>().unwrap(), Key::Up);
        assert_eq!("pagedown".parse::<Key>().unwrap(), Key::PageDown);
        assert_eq!("ESCAPE".parse::<Key>().unwrap(), Key::Esc);
        assert_eq!("Space".parse::<Key>().unwrap(), Key::Char(' '));
    }

    #[test]
    fn function_keys_parse_in_range() {
        assert_eq!("F1".parse::<Key>().unwrap(), Key::F(1));
        assert_eq!("f12".parse::<Key>().unwrap(), Key::F(12));
        assert!("F13".parse::<Key>().is_err());
        assert!("F0".parse::<Key>().is_err());
    }

    #[test]
    fn unknown_spellings_are_config_errors() {
        assert!("C-".parse::<Key>().is_err());
        assert!("Hyper-x".parse::<Key>().is_err());
        assert!("".parse::<Key>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for key in [Key::Char('g'), Key::Ctrl('d'), Key::F(5), Key::PageUp, Key::Enter] {
            assert_eq!(key.to_string().parse::<Key>().unwrap(), key);
        }
    }
}

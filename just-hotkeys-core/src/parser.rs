//! Shortcut strings such as `"cmd+shift+k"`.
//!
//! Parsing is permissive: any string yields a [`ParsedShortcut`], unknown
//! segments simply become the key. [`parse_shortcut_strict`] applies the same
//! grammar but rejects inputs the permissive parser would silently guess at.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ShortcutError;
use crate::event::KeyEvent;

/// A shortcut broken into its key and the exact set of modifiers.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
pub struct ParsedShortcut {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modifier {
    Ctrl,
    Meta,
    Alt,
    Shift,
}

enum Segment {
    Modifier(Modifier),
    Key,
}

fn classify(segment: &str) -> Segment {
    match segment {
        "ctrl" | "control" => Segment::Modifier(Modifier::Ctrl),
        "meta" | "cmd" | "command" | "win" | "windows" => Segment::Modifier(Modifier::Meta),
        "alt" | "option" | "opt" => Segment::Modifier(Modifier::Alt),
        "shift" => Segment::Modifier(Modifier::Shift),
        _ => Segment::Key,
    }
}

/// Canonical name for keys whose event value differs from their written name.
fn named_key(name: &str) -> Option<&'static str> {
    let key = match name {
        "space" => " ",
        "enter" | "return" => "Enter",
        "tab" => "Tab",
        "esc" | "escape" => "Escape",
        "backspace" => "Backspace",
        "delete" | "del" => "Delete",

        "up" | "arrowup" => "ArrowUp",
        "down" | "arrowdown" => "ArrowDown",
        "left" | "arrowleft" => "ArrowLeft",
        "right" | "arrowright" => "ArrowRight",

        "f1" => "F1",
        "f2" => "F2",
        "f3" => "F3",
        "f4" => "F4",
        "f5" => "F5",
        "f6" => "F6",
        "f7" => "F7",
        "f8" => "F8",
        "f9" => "F9",
        "f10" => "F10",
        "f11" => "F11",
        "f12" => "F12",

        "0" => "0",
        "1" => "1",
        "2" => "2",
        "3" => "3",
        "4" => "4",
        "5" => "5",
        "6" => "6",
        "7" => "7",
        "8" => "8",
        "9" => "9",
        _ => return None,
    };
    Some(key)
}

fn resolve_key(raw: &str, trimmed: &str) -> String {
    // `"cmd+ "`: a segment made only of whitespace is the space bar.
    if trimmed.is_empty() && !raw.is_empty() {
        return " ".to_owned();
    }
    named_key(trimmed).map_or_else(|| trimmed.to_uppercase(), str::to_owned)
}

impl ParsedShortcut {
    fn set(&mut self, modifier: Modifier) {
        match modifier {
            Modifier::Ctrl => self.ctrl = true,
            Modifier::Meta => self.meta = true,
            Modifier::Alt => self.alt = true,
            Modifier::Shift => self.shift = true,
        }
    }
}

/// Parse a shortcut string. Never fails; when several non-modifier segments
/// are present the last one becomes the key.
///
/// A segment made only of whitespace (`"cmd+ "`) is the space bar, not an
/// empty key, so a normalized shortcut parses back to the same value. Only a
/// truly empty segment (`"cmd+"`) leaves the key empty.
pub fn parse_shortcut(input: &str) -> ParsedShortcut {
    let lowered = input.to_lowercase();
    let mut parsed = ParsedShortcut::default();

    for raw in lowered.split('+') {
        let trimmed = raw.trim();
        match classify(trimmed) {
            Segment::Modifier(modifier) => parsed.set(modifier),
            Segment::Key => parsed.key = resolve_key(raw, trimmed),
        }
    }

    parsed
}

/// Parse a shortcut string, rejecting empty segments, missing keys and
/// multiple keys.
///
/// # Errors
///
/// Returns the first [`ShortcutError`] found while walking the segments from
/// left to right, or [`ShortcutError::MissingKey`] when only modifiers were
/// given.
pub fn parse_shortcut_strict(input: &str) -> Result<ParsedShortcut, ShortcutError> {
    let lowered = input.to_lowercase();
    let mut parsed = ParsedShortcut::default();
    let mut key_segment: Option<&str> = None;

    for raw in lowered.split('+') {
        if raw.is_empty() {
            return Err(ShortcutError::EmptySegment);
        }
        let trimmed = raw.trim();
        match classify(trimmed) {
            Segment::Modifier(modifier) => parsed.set(modifier),
            Segment::Key => {
                if let Some(first) = key_segment {
                    return Err(ShortcutError::MultipleKeys {
                        first: first.trim().to_owned(),
                        second: trimmed.to_owned(),
                    });
                }
                key_segment = Some(raw);
                parsed.key = resolve_key(raw, trimmed);
            }
        }
    }

    match key_segment {
        Some(_) => Ok(parsed),
        None => Err(ShortcutError::MissingKey),
    }
}

/// Whether `event` is exactly this shortcut: every modifier must agree, held
/// or not, and the key must match ignoring case (or literally).
pub fn matches_shortcut(event: &dyn KeyEvent, parsed: &ParsedShortcut) -> bool {
    if parsed.meta != event.meta_key()
        || parsed.ctrl != event.ctrl_key()
        || parsed.alt != event.alt_key()
        || parsed.shift != event.shift_key()
    {
        return false;
    }

    let key = event.key();
    key.to_lowercase() == parsed.key.to_lowercase() || key.as_ref() == parsed.key.as_str()
}

/// Canonical string for a shortcut, used as the registry key. Modifiers come
/// in the fixed order `ctrl`, `cmd`, `alt`, `shift`, followed by the
/// lowercased key.
pub fn normalize_shortcut(input: &str) -> String {
    parse_shortcut(input).to_string()
}

impl fmt::Display for ParsedShortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modifiers = [
            (self.ctrl, "ctrl"),
            (self.meta, "cmd"),
            (self.alt, "alt"),
            (self.shift, "shift"),
        ];
        for (_, name) in modifiers.iter().filter(|(held, _)| *held) {
            write!(f, "{name}+")?;
        }
        write!(f, "{}", self.key.to_lowercase())
    }
}

impl FromStr for ParsedShortcut {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse_shortcut(s))
    }
}

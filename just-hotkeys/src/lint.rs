use just_hotkeys_core::config::{Config, Keybind};
use just_hotkeys_core::errors::ShortcutError;
use just_hotkeys_core::parser;

/// One registry slot after every keybind of a file was applied.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Entry {
    pub normalized: String,
    pub action: String,
}

/// Two keybinds that normalize to the same shortcut; the later one wins.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Collision {
    pub normalized: String,
    pub earlier: Keybind,
    pub later: Keybind,
}

#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct Report {
    pub entries: Vec<Entry>,
    pub collisions: Vec<Collision>,
    pub strict_errors: Vec<(Keybind, ShortcutError)>,
}

/// Resolve the keybinds the way a manager registers them, noting collisions
/// and keybinds the strict grammar rejects.
pub fn check(config: &impl Config) -> Report {
    let mut report = Report::default();
    let mut winners: Vec<Keybind> = Vec::new();

    for kb in config.mapped_bindings() {
        if let Err(err) = parser::parse_shortcut_strict(&kb.shortcut) {
            report.strict_errors.push((kb.clone(), err));
        }

        let normalized = kb.normalized();
        match report
            .entries
            .iter()
            .position(|entry| entry.normalized == normalized)
        {
            Some(index) => {
                report.collisions.push(Collision {
                    normalized,
                    earlier: winners[index].clone(),
                    later: kb.clone(),
                });
                report.entries[index].action = kb.action.clone();
                winners[index] = kb;
            }
            None => {
                report.entries.push(Entry {
                    normalized,
                    action: kb.action.clone(),
                });
                winners.push(kb);
            }
        }
    }

    report
}

/// Test Helpers
#[cfg(test)]
pub(crate) mod test {
    use std::io::Write;

    pub fn bindings_file(contents: &str) -> std::io::Result<tempfile::NamedTempFile> {
        let mut file = tempfile::Builder::new().suffix(".ron").tempfile()?;
        file.write_all(contents.as_bytes())?;
        file.flush()?;
        Ok(file)
    }

    pub const BINDINGS: &str = r#"(
        keybinds: [
            (shortcut: "cmd+k", action: "search"),
            (shortcut: "esc", action: "close"),
            (shortcut: "Command+K", action: "palette"),
            (shortcut: "a+b", action: "typo"),
            (shortcut: "ctrl+", action: "unfinished"),
        ],
    )"#;
}

/// Config Testing
#[cfg(test)]
mod config {
    use super::test::{BINDINGS, bindings_file};
    use crate::config;
    use crate::errors::HotkeyError;

    #[test]
    fn load_given_path() {
        let file = bindings_file(BINDINGS).unwrap();
        let bindings = config::load(Some(file.path())).unwrap();
        assert_eq!(bindings.keybinds.len(), 5);
        assert_eq!(bindings.keybinds[1].action, "close");
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.ron");
        assert!(matches!(
            config::load(Some(path.as_path())),
            Err(HotkeyError::NoConfigFound)
        ));
    }

    #[test]
    fn invalid_document_is_reported() {
        let file = bindings_file("(keybinds: [(action: \"close\")])").unwrap();
        assert!(matches!(
            config::load(Some(file.path())),
            Err(HotkeyError::Core(_))
        ));
    }
}

/// Lint Testing
#[cfg(test)]
mod lint {

    use just_hotkeys_core::config::Bindings;
    use just_hotkeys_core::errors::ShortcutError;

    use super::test::BINDINGS;
    use crate::lint::{self, Entry};

    #[test]
    fn entries_follow_registry_order() {
        let report = lint::check(&Bindings::try_from(BINDINGS).unwrap());

        let entry = |normalized: &str, action: &str| Entry {
            normalized: normalized.to_owned(),
            action: action.to_owned(),
        };
        assert_eq!(
            report.entries,
            vec![
                entry("cmd+k", "palette"),
                entry("escape", "close"),
                entry("b", "typo"),
                entry("ctrl+", "unfinished"),
            ]
        );
    }

    #[test]
    fn collisions_name_both_keybinds() {
        let report = lint::check(&Bindings::try_from(BINDINGS).unwrap());

        assert_eq!(report.collisions.len(), 1);
        let collision = &report.collisions[0];
        assert_eq!(collision.normalized, "cmd+k");
        assert_eq!(collision.earlier.action, "search");
        assert_eq!(collision.later.action, "palette");
    }

    #[test]
    fn strict_errors_are_collected() {
        let report = lint::check(&Bindings::try_from(BINDINGS).unwrap());

        let errors: Vec<_> = report
            .strict_errors
            .iter()
            .map(|(kb, err)| (kb.action.as_str(), err.clone()))
            .collect();
        assert_eq!(
            errors,
            vec![
                (
                    "typo",
                    ShortcutError::MultipleKeys {
                        first: "a".to_owned(),
                        second: "b".to_owned(),
                    }
                ),
                ("unfinished", ShortcutError::EmptySegment),
            ]
        );
    }
}

/// Simulation Testing
#[cfg(test)]
mod simulate {

    use just_hotkeys_core::config::Bindings;
    use just_hotkeys_core::event::{EventElement, SyntheticKeyEvent};

    use super::test::BINDINGS;
    use crate::simulate::{Outcome, simulate};

    #[test]
    fn fires_the_winning_action() {
        let bindings = Bindings::try_from(BINDINGS).unwrap();

        let outcome = simulate(&bindings, &SyntheticKeyEvent::new("K").meta());

        assert_eq!(
            outcome,
            Outcome {
                action: Some("palette".to_owned()),
                default_prevented: true,
                propagation_stopped: false,
            }
        );
    }

    #[test]
    fn extra_modifier_misses() {
        let bindings = Bindings::try_from(BINDINGS).unwrap();

        let outcome = simulate(&bindings, &SyntheticKeyEvent::new("k").meta().shift());

        assert_eq!(outcome.action, None);
        assert!(!outcome.default_prevented);
    }

    #[test]
    fn inputs_follow_file_options() {
        let blocked = Bindings::try_from(BINDINGS).unwrap();
        let allowed = Bindings::try_from(
            r#"(
                options: (enable_in_inputs: true, stop_propagation: true),
                keybinds: [(shortcut: "esc", action: "close")],
            )"#,
        )
        .unwrap();
        let event = || SyntheticKeyEvent::new("Escape").on(EventElement::new("input"));

        assert_eq!(simulate(&blocked, &event()).action, None);

        let outcome = simulate(&allowed, &event());
        assert_eq!(outcome.action.as_deref(), Some("close"));
        assert!(outcome.propagation_stopped);
    }
}

use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;

use crate::events::Event;

/// Converts a crossterm event into a life event
pub fn convert_event(event: CrossTermEvent) -> Option<Event> {
    match event {
        CrossTermEvent::Key(KeyEvent {
            kind: KeyEventKind::Release,
            ..
        }) => None,
        CrossTermEvent::Key(key_event) => match key_event {
            KeyEvent {
                code: KeyCode::Char('q'),
                ..
            }
            | KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => Some(Event::Exit),
            KeyEvent {
                code: KeyCode::Char('r' | 'R'),
                ..
            } => Some(Event::Reset),
            _ => None,
        },
        CrossTermEvent::Resize(cols, rows) => Some(Event::Resize { cols, rows }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::Event as CrossTermEvent;
    use crossterm::event::KeyCode;
    use crossterm::event::KeyEvent;
    use crossterm::event::KeyEventKind;
    use crossterm::event::KeyEventState;
    use crossterm::event::KeyModifiers;

    use super::convert_event;
    use crate::events::Event;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> CrossTermEvent {
        CrossTermEvent::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn reset_keys() {
        assert_eq!(
            convert_event(key(KeyCode::Char('r'), KeyModifiers::NONE)),
            Some(Event::Reset)
        );
        assert_eq!(
            convert_event(key(KeyCode::Char('R'), KeyModifiers::SHIFT)),
            Some(Event::Reset)
        );
    }

    #[test]
    fn exit_keys() {
        assert_eq!(
            convert_event(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Event::Exit)
        );
        assert_eq!(
            convert_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Event::Exit)
        );
        assert_eq!(
            convert_event(key(KeyCode::Char('c'), KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn key_release_is_ignored() {
        let release = CrossTermEvent::Key(KeyEvent {
            code: KeyCode::Char('r'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });

        assert_eq!(convert_event(release), None);
    }

    #[test]
    fn resize() {
        assert_eq!(
            convert_event(CrossTermEvent::Resize(80, 24)),
            Some(Event::Resize { cols: 80, rows: 24 })
        );
        assert_eq!(convert_event(CrossTermEvent::FocusGained), None);
    }
}

use crossterm::event::KeyCode;
use taskboard_core::TextInput;

/// Applies a key to a single-line text input.
///
/// `allow_empty` controls whether Enter confirms an empty value.
pub fn handle_dialog_input(
    input: &mut TextInput,
    key_code: KeyCode,
    allow_empty: bool,
) -> DialogAction {
    match key_code {
        KeyCode::Esc => DialogAction::Cancel,
        KeyCode::Enter => {
            if allow_empty || !input.is_empty() {
                DialogAction::Confirm
            } else {
                DialogAction::None
            }
        }
        KeyCode::Char(c) => {
            input.insert_char(c);
            DialogAction::Edited
        }
        KeyCode::Backspace => {
            input.backspace();
            DialogAction::Edited
        }
        KeyCode::Delete => {
            input.delete();
            DialogAction::Edited
        }
        KeyCode::Left => {
            input.move_left();
            DialogAction::None
        }
        KeyCode::Right => {
            input.move_right();
            DialogAction::None
        }
        KeyCode::Home => {
            input.move_home();
            DialogAction::None
        }
        KeyCode::End => {
            input.move_end();
            DialogAction::None
        }
        _ => DialogAction::None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    None,
    /// The text changed.
    Edited,
    Cancel,
    Confirm,
}

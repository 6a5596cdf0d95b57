//! Keyboard-addressable commands.
//!
//! One variant per keyboard transition the selection machine understands;
//! each converts into the corresponding classified input. Command names are
//! the snake_case strings used in the bindings file.

use std::fmt;

use spangrid_core::input::{Direction, Modifiers, SelectionInput};

use crate::error::KeymapError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Cancel,
    Edit,
    Advance,
    AdvanceUp,
    NextCell,
    PrevCell,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    ExtendUp,
    ExtendDown,
    ExtendLeft,
    ExtendRight,
    JumpUp,
    JumpDown,
    JumpLeft,
    JumpRight,
    ExtendJumpUp,
    ExtendJumpDown,
    ExtendJumpLeft,
    ExtendJumpRight,
    RowStart,
    RowEnd,
    GridStart,
    GridEnd,
    ExtendRowStart,
    ExtendRowEnd,
    ExtendGridStart,
    ExtendGridEnd,
}

/// Every command, for enumeration in defaults and tests.
pub const ALL_COMMANDS: &[Command] = &[
    Command::Cancel,
    Command::Edit,
    Command::Advance,
    Command::AdvanceUp,
    Command::NextCell,
    Command::PrevCell,
    Command::MoveUp,
    Command::MoveDown,
    Command::MoveLeft,
    Command::MoveRight,
    Command::ExtendUp,
    Command::ExtendDown,
    Command::ExtendLeft,
    Command::ExtendRight,
    Command::JumpUp,
    Command::JumpDown,
    Command::JumpLeft,
    Command::JumpRight,
    Command::ExtendJumpUp,
    Command::ExtendJumpDown,
    Command::ExtendJumpLeft,
    Command::ExtendJumpRight,
    Command::RowStart,
    Command::RowEnd,
    Command::GridStart,
    Command::GridEnd,
    Command::ExtendRowStart,
    Command::ExtendRowEnd,
    Command::ExtendGridStart,
    Command::ExtendGridEnd,
];

impl Command {
    /// The classified input this command produces.
    pub fn input(self) -> SelectionInput {
        use Direction::*;
        match self {
            Command::Cancel => SelectionInput::Cancel,
            Command::Edit => SelectionInput::EditKey,
            Command::Advance => SelectionInput::Enter { shift: false },
            Command::AdvanceUp => SelectionInput::Enter { shift: true },
            Command::NextCell => SelectionInput::Tab { shift: false },
            Command::PrevCell => SelectionInput::Tab { shift: true },
            Command::MoveUp => SelectionInput::Arrow(Up, Modifiers::NONE),
            Command::MoveDown => SelectionInput::Arrow(Down, Modifiers::NONE),
            Command::MoveLeft => SelectionInput::Arrow(Left, Modifiers::NONE),
            Command::MoveRight => SelectionInput::Arrow(Right, Modifiers::NONE),
            Command::ExtendUp => SelectionInput::Arrow(Up, Modifiers::SHIFT),
            Command::ExtendDown => SelectionInput::Arrow(Down, Modifiers::SHIFT),
            Command::ExtendLeft => SelectionInput::Arrow(Left, Modifiers::SHIFT),
            Command::ExtendRight => SelectionInput::Arrow(Right, Modifiers::SHIFT),
            Command::JumpUp => SelectionInput::Arrow(Up, Modifiers::CTRL),
            Command::JumpDown => SelectionInput::Arrow(Down, Modifiers::CTRL),
            Command::JumpLeft => SelectionInput::Arrow(Left, Modifiers::CTRL),
            Command::JumpRight => SelectionInput::Arrow(Right, Modifiers::CTRL),
            Command::ExtendJumpUp => SelectionInput::Arrow(Up, Modifiers::CTRL_SHIFT),
            Command::ExtendJumpDown => SelectionInput::Arrow(Down, Modifiers::CTRL_SHIFT),
            Command::ExtendJumpLeft => SelectionInput::Arrow(Left, Modifiers::CTRL_SHIFT),
            Command::ExtendJumpRight => SelectionInput::Arrow(Right, Modifiers::CTRL_SHIFT),
            Command::RowStart => SelectionInput::Home(Modifiers::NONE),
            Command::RowEnd => SelectionInput::End(Modifiers::NONE),
            Command::GridStart => SelectionInput::Home(Modifiers::CTRL),
            Command::GridEnd => SelectionInput::End(Modifiers::CTRL),
            Command::ExtendRowStart => SelectionInput::Home(Modifiers::SHIFT),
            Command::ExtendRowEnd => SelectionInput::End(Modifiers::SHIFT),
            Command::ExtendGridStart => SelectionInput::Home(Modifiers::CTRL_SHIFT),
            Command::ExtendGridEnd => SelectionInput::End(Modifiers::CTRL_SHIFT),
        }
    }

    /// The snake_case name used in bindings files.
    pub fn name(self) -> &'static str {
        match self {
            Command::Cancel => "cancel",
            Command::Edit => "edit",
            Command::Advance => "advance",
            Command::AdvanceUp => "advance_up",
            Command::NextCell => "next_cell",
            Command::PrevCell => "prev_cell",
            Command::MoveUp => "move_up",
            Command::MoveDown => "move_down",
            Command::MoveLeft => "move_left",
            Command::MoveRight => "move_right",
            Command::ExtendUp => "extend_up",
            Command::ExtendDown => "extend_down",
            Command::ExtendLeft => "extend_left",
            Command::ExtendRight => "extend_right",
            Command::JumpUp => "jump_up",
            Command::JumpDown => "jump_down",
            Command::JumpLeft => "jump_left",
            Command::JumpRight => "jump_right",
            Command::ExtendJumpUp => "extend_jump_up",
            Command::ExtendJumpDown => "extend_jump_down",
            Command::ExtendJumpLeft => "extend_jump_left",
            Command::ExtendJumpRight => "extend_jump_right",
            Command::RowStart => "row_start",
            Command::RowEnd => "row_end",
            Command::GridStart => "grid_start",
            Command::GridEnd => "grid_end",
            Command::ExtendRowStart => "extend_row_start",
            Command::ExtendRowEnd => "extend_row_end",
            Command::ExtendGridStart => "extend_grid_start",
            Command::ExtendGridEnd => "extend_grid_end",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, KeymapError> {
        let wanted = raw.trim().to_ascii_lowercase();
        ALL_COMMANDS
            .iter()
            .copied()
            .find(|cmd| cmd.name() == wanted)
            .ok_or(KeymapError::UnknownCommand(wanted))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_parse_round_trip() {
        for cmd in ALL_COMMANDS {
            assert_eq!(Command::parse(cmd.name()).unwrap(), *cmd);
        }
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(matches!(
            Command::parse("select_all"),
            Err(KeymapError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_inputs_carry_modifiers() {
        assert_eq!(
            Command::ExtendJumpLeft.input(),
            SelectionInput::Arrow(Direction::Left, Modifiers::CTRL_SHIFT)
        );
        assert_eq!(
            Command::GridStart.input(),
            SelectionInput::Home(Modifiers::CTRL)
        );
        assert_eq!(
            Command::AdvanceUp.input(),
            SelectionInput::Enter { shift: true }
        );
    }
}

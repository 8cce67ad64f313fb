//! Keyboard mapping
//!
//! Player: `a`/`d` walk, `w` jumps, Space attacks.
//! Enemy: Left/Right arrows walk, Up jumps, Down attacks.
//! Escape pauses, Enter restarts, `c` toggles the CPU opponent.

use crate::sim::{FighterInput, Side, TickInput};

/// Fighter command bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Left,
    Right,
    Jump,
    Attack,
}

/// Commands that do not belong to a fighter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    Pause,
    Restart,
    ToggleCpu,
}

/// What a key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Fighter(Side, Command),
    Ui(UiCommand),
}

/// Look up a `KeyboardEvent.key` value
pub fn binding_for(key: &str) -> Option<Binding> {
    use Binding::{Fighter, Ui};
    use Command::*;

    let binding = match key {
        "a" | "A" => Fighter(Side::Player, Left),
        "d" | "D" => Fighter(Side::Player, Right),
        "w" | "W" => Fighter(Side::Player, Jump),
        " " => Fighter(Side::Player, Attack),
        "ArrowLeft" => Fighter(Side::Enemy, Left),
        "ArrowRight" => Fighter(Side::Enemy, Right),
        "ArrowUp" => Fighter(Side::Enemy, Jump),
        "ArrowDown" => Fighter(Side::Enemy, Attack),
        "Escape" => Ui(UiCommand::Pause),
        "Enter" => Ui(UiCommand::Restart),
        "c" | "C" => Ui(UiCommand::ToggleCpu),
        _ => return None,
    };
    Some(binding)
}

/// Held keys and queued presses for one fighter
#[derive(Debug, Clone, Default)]
struct SideKeys {
    left: bool,
    right: bool,
    /// Direction of the most recent walk key press
    last_dir: i8,
    jump_held: bool,
    attack_held: bool,
    jump_pending: bool,
    attack_pending: bool,
}

impl SideKeys {
    fn press(&mut self, command: Command) {
        match command {
            Command::Left => {
                if !self.left {
                    self.left = true;
                    self.last_dir = -1;
                }
            }
            Command::Right => {
                if !self.right {
                    self.right = true;
                    self.last_dir = 1;
                }
            }
            Command::Jump => {
                if !self.jump_held {
                    self.jump_held = true;
                    self.jump_pending = true;
                }
            }
            Command::Attack => {
                if !self.attack_held {
                    self.attack_held = true;
                    self.attack_pending = true;
                }
            }
        }
    }

    fn release(&mut self, command: Command) {
        match command {
            Command::Left => self.left = false,
            Command::Right => self.right = false,
            Command::Jump => self.jump_held = false,
            Command::Attack => self.attack_held = false,
        }
    }

    /// Last-pressed direction wins while both are held
    fn walk(&self) -> i8 {
        match (self.left, self.right) {
            (true, true) => self.last_dir,
            (true, false) => -1,
            (false, true) => 1,
            (false, false) => 0,
        }
    }

    fn to_input(&self) -> FighterInput {
        FighterInput {
            walk: self.walk(),
            jump: self.jump_pending,
            attack: self.attack_pending,
        }
    }

    fn clear_one_shots(&mut self) {
        self.jump_pending = false;
        self.attack_pending = false;
    }
}

/// Keyboard state shared by both fighters
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    player: SideKeys,
    enemy: SideKeys,
    pause: bool,
    restart: bool,
    pause_held: bool,
    restart_held: bool,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    fn side_mut(&mut self, side: Side) -> &mut SideKeys {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    /// Handle a key press. Auto-repeat presses of held keys are ignored.
    /// Returns the binding so the caller can suppress browser defaults and
    /// react to UI commands.
    pub fn key_down(&mut self, key: &str) -> Option<Binding> {
        let binding = binding_for(key)?;
        match binding {
            Binding::Fighter(side, command) => self.side_mut(side).press(command),
            Binding::Ui(command) => {
                if let Some(held) = self.ui_held_mut(command) {
                    if !*held {
                        *held = true;
                        self.queue(command);
                    }
                }
            }
        }
        Some(binding)
    }

    /// Handle a key release. Only the released key is affected.
    pub fn key_up(&mut self, key: &str) -> Option<Binding> {
        let binding = binding_for(key)?;
        match binding {
            Binding::Fighter(side, command) => self.side_mut(side).release(command),
            Binding::Ui(command) => {
                if let Some(held) = self.ui_held_mut(command) {
                    *held = false;
                }
            }
        }
        Some(binding)
    }

    fn ui_held_mut(&mut self, command: UiCommand) -> Option<&mut bool> {
        match command {
            UiCommand::Pause => Some(&mut self.pause_held),
            UiCommand::Restart => Some(&mut self.restart_held),
            UiCommand::ToggleCpu => None,
        }
    }

    /// Queue a UI command that did not come from a key (buttons, focus loss)
    pub fn queue(&mut self, command: UiCommand) {
        match command {
            UiCommand::Pause => self.pause = true,
            UiCommand::Restart => self.restart = true,
            UiCommand::ToggleCpu => {}
        }
    }

    /// Forget every held key (window lost focus)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Build the input for the next simulation tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            player: self.player.to_input(),
            enemy: self.enemy.to_input(),
            pause: self.pause,
            restart: self.restart,
            ..Default::default()
        }
    }

    /// Drop presses consumed by a tick; held keys stay held
    pub fn clear_one_shots(&mut self) {
        self.player.clear_one_shots();
        self.enemy.clear_one_shots();
        self.pause = false;
        self.restart = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings() {
        assert_eq!(
            binding_for("d"),
            Some(Binding::Fighter(Side::Player, Command::Right))
        );
        assert_eq!(
            binding_for("ArrowDown"),
            Some(Binding::Fighter(Side::Enemy, Command::Attack))
        );
        assert_eq!(binding_for("Escape"), Some(Binding::Ui(UiCommand::Pause)));
        assert_eq!(binding_for("q"), None);
    }

    #[test]
    fn test_last_key_wins() {
        let mut keys = KeyboardState::new();
        keys.key_down("a");
        assert_eq!(keys.tick_input().player.walk, -1);

        keys.key_down("d");
        assert_eq!(keys.tick_input().player.walk, 1);

        // Releasing the newer key falls back to the one still held
        keys.key_up("d");
        assert_eq!(keys.tick_input().player.walk, -1);

        keys.key_up("a");
        assert_eq!(keys.tick_input().player.walk, 0);
    }

    #[test]
    fn test_release_only_clears_released_key() {
        let mut keys = KeyboardState::new();
        keys.key_down("d");
        keys.key_down("a");
        keys.key_up("a");
        assert_eq!(keys.tick_input().player.walk, 1);
    }

    #[test]
    fn test_sides_are_independent() {
        let mut keys = KeyboardState::new();
        keys.key_down("ArrowLeft");
        keys.key_down("d");
        let input = keys.tick_input();
        assert_eq!(input.player.walk, 1);
        assert_eq!(input.enemy.walk, -1);
    }

    #[test]
    fn test_attack_is_one_shot() {
        let mut keys = KeyboardState::new();
        keys.key_down(" ");
        assert!(keys.tick_input().player.attack);

        keys.clear_one_shots();
        assert!(!keys.tick_input().player.attack);

        // Auto-repeat while held does not queue another swing
        keys.key_down(" ");
        assert!(!keys.tick_input().player.attack);

        keys.key_up(" ");
        keys.key_down(" ");
        assert!(keys.tick_input().player.attack);
    }

    #[test]
    fn test_jump_survives_until_consumed() {
        let mut keys = KeyboardState::new();
        keys.key_down("ArrowUp");
        keys.key_up("ArrowUp");
        // Tapped between ticks still registers
        assert!(keys.tick_input().enemy.jump);
    }

    #[test]
    fn test_ui_commands() {
        let mut keys = KeyboardState::new();
        assert_eq!(keys.key_down("Escape"), Some(Binding::Ui(UiCommand::Pause)));
        keys.key_down("Enter");
        let input = keys.tick_input();
        assert!(input.pause && input.restart);

        keys.clear_one_shots();
        let input = keys.tick_input();
        assert!(!input.pause && !input.restart);
    }

    #[test]
    fn test_held_escape_pauses_once() {
        use crate::sim::{GamePhase, GameState, tick};

        let mut state = GameState::new(3, 60);
        let mut keys = KeyboardState::new();
        let step = |state: &mut GameState, keys: &mut KeyboardState| {
            tick(state, &keys.tick_input(), crate::consts::SIM_DT);
            keys.clear_one_shots();
        };

        keys.key_down("Escape");
        step(&mut state, &mut keys);
        assert_eq!(state.phase, GamePhase::Paused);

        // Auto-repeat while held
        keys.key_down("Escape");
        step(&mut state, &mut keys);
        assert_eq!(state.phase, GamePhase::Paused);

        keys.key_up("Escape");
        keys.key_down("Escape");
        step(&mut state, &mut keys);
        assert_eq!(state.phase, GamePhase::Fighting);
    }

    #[test]
    fn test_queued_pause_from_focus_loss() {
        let mut keys = KeyboardState::new();
        keys.key_down("d");
        keys.release_all();
        keys.queue(UiCommand::Pause);
        let input = keys.tick_input();
        assert!(input.pause);
        assert_eq!(input.player.walk, 0);
    }

    #[test]
    fn test_release_all() {
        let mut keys = KeyboardState::new();
        keys.key_down("a");
        keys.key_down("ArrowRight");
        keys.release_all();
        let input = keys.tick_input();
        assert_eq!(input.player, FighterInput::default());
        assert_eq!(input.enemy, FighterInput::default());
    }
}

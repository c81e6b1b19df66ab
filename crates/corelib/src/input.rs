//! Application state and input event dispatch.
//!
//! The platform layer translates its own events into [`InputEvent`] and feeds
//! them to [`AppState::handle`]; scenes read the state on every tick.

/// Keyboard code for Escape.
pub const KEY_ESCAPE: char = '\u{1b}';

pub const SPEED_MIN: f32 = 1.0;
pub const SPEED_MAX: f32 = 5.0;
pub const SPEED_STEP: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpecialKey {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Entries of the context menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    StartRotation,
    StopRotation,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Key(char),
    Special(SpecialKey),
    MouseDown(MouseButton),
    Menu(MenuAction),
    Resize { width: u32, height: u32 },
}

/// Direction of the self-rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpinDirection {
    #[default]
    Forward,
    Reverse,
}

impl SpinDirection {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            SpinDirection::Forward => 1.0,
            SpinDirection::Reverse => -1.0,
        }
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            SpinDirection::Forward => SpinDirection::Reverse,
            SpinDirection::Reverse => SpinDirection::Forward,
        }
    }
}

/// Direction of the planet around the origin, seen from above.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrbitDirection {
    Clockwise,
    #[default]
    CounterClockwise,
}

impl OrbitDirection {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            OrbitDirection::Clockwise => -1.0,
            OrbitDirection::CounterClockwise => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrbitDirection::Clockwise => "Planet Direction: Clockwise",
            OrbitDirection::CounterClockwise => "Planet Direction: Counter-clockwise",
        }
    }
}

/// Everything input can change, passed by reference to handlers and scenes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AppState {
    pub width: u32,
    pub height: u32,
    /// Self-rotation toggled from the menu.
    pub rotating: bool,
    pub spin: SpinDirection,
    pub orbit: OrbitDirection,
    /// Self-rotation speed multiplier in `[SPEED_MIN, SPEED_MAX]`.
    pub speed: f32,
    pub quit_requested: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(640, 480)
    }
}

impl AppState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            rotating: false,
            spin: SpinDirection::Forward,
            orbit: OrbitDirection::CounterClockwise,
            speed: 3.0,
            quit_requested: false,
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Apply one input event.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Special(SpecialKey::Left) => self.orbit = OrbitDirection::Clockwise,
            InputEvent::Special(SpecialKey::Right) => {
                self.orbit = OrbitDirection::CounterClockwise
            }
            InputEvent::MouseDown(MouseButton::Left) => self.spin = self.spin.flipped(),
            InputEvent::MouseDown(_) => {}
            InputEvent::Menu(action) => match action {
                MenuAction::StartRotation => self.rotating = true,
                MenuAction::StopRotation => self.rotating = false,
                MenuAction::Quit => self.quit_requested = true,
            },
            InputEvent::Resize { width, height } => {
                self.width = width.max(1);
                self.height = height.max(1);
                log::debug!("Viewport resized: {}x{}", self.width, self.height);
            }
        }
    }

    fn handle_key(&mut self, key: char) {
        match key {
            'a' | 'A' => self.spin = self.spin.flipped(),
            '-' | '_' if self.speed > SPEED_MIN => self.speed -= SPEED_STEP,
            '+' | '=' if self.speed < SPEED_MAX => self.speed += SPEED_STEP,
            KEY_ESCAPE => self.quit_requested = true,
            _ => {}
        }
    }
}

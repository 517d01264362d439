//! # Key Enumerations
//!
//! Bit values as they appear in the interrupt packets and the M-key light
//! control transfer.

/// Keys next to the display, reported on endpoint `0x81`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DisplayKey {
    /// Settings (opens the menu when no widget handles it).
    Settings,
    /// Back (navigates back when no widget handles it).
    Back,
    /// Menu.
    Menu,
    /// OK.
    Ok,
    /// Right arrow.
    Right,
    /// Left arrow.
    Left,
    /// Down arrow.
    Down,
    /// Up arrow.
    Up,
}

impl DisplayKey {
    /// Every display key, in ascending bit order.
    pub const ALL: [Self; 8] = [
        Self::Settings,
        Self::Back,
        Self::Menu,
        Self::Ok,
        Self::Right,
        Self::Left,
        Self::Down,
        Self::Up,
    ];

    /// Bit in the display key mask.
    #[must_use]
    pub const fn bit(self) -> u8 {
        match self {
            Self::Settings => 0x01,
            Self::Back => 0x02,
            Self::Menu => 0x04,
            Self::Ok => 0x08,
            Self::Right => 0x10,
            Self::Left => 0x20,
            Self::Down => 0x40,
            Self::Up => 0x80,
        }
    }

    /// The key for a single mask bit.
    #[must_use]
    pub fn from_bit(bit: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.bit() == bit)
    }
}

/// Programmable G keys, M keys and the backlight key, reported on endpoint `0x83`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum GKey {
    G01,
    G02,
    G03,
    G04,
    G05,
    G06,
    G07,
    G08,
    G09,
    G10,
    G11,
    G12,
    M1,
    M2,
    M3,
    MR,
    /// Keyboard backlight toggle.
    Light,
}

impl GKey {
    /// Every G/M key, in ascending bit order.
    pub const ALL: [Self; 17] = [
        Self::G01,
        Self::G02,
        Self::G03,
        Self::G04,
        Self::G05,
        Self::G06,
        Self::G07,
        Self::G08,
        Self::G09,
        Self::G10,
        Self::G11,
        Self::G12,
        Self::M1,
        Self::M2,
        Self::M3,
        Self::MR,
        Self::Light,
    ];

    /// Bit in the 24-bit G/M key mask.
    #[must_use]
    pub const fn bit(self) -> u32 {
        match self {
            Self::G01 => 0x00_0001,
            Self::G02 => 0x00_0002,
            Self::G03 => 0x00_0004,
            Self::G04 => 0x00_0008,
            Self::G05 => 0x00_0010,
            Self::G06 => 0x00_0020,
            Self::G07 => 0x00_0040,
            Self::G08 => 0x00_0080,
            Self::G09 => 0x00_0100,
            Self::G10 => 0x00_0200,
            Self::G11 => 0x00_0400,
            Self::G12 => 0x00_0800,
            Self::M1 => 0x00_1000,
            Self::M2 => 0x00_2000,
            Self::M3 => 0x00_4000,
            Self::MR => 0x00_8000,
            Self::Light => 0x08_0000,
        }
    }

    /// The key for a single mask bit.
    #[must_use]
    pub fn from_bit(bit: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.bit() == bit)
    }
}

/// LEDs under the M keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum KeyLight {
    M1,
    M2,
    M3,
    MR,
}

impl KeyLight {
    /// Bit in the light mask.
    #[must_use]
    pub const fn bit(self) -> u8 {
        match self {
            Self::M1 => 0x80,
            Self::M2 => 0x40,
            Self::M3 => 0x20,
            Self::MR => 0x10,
        }
    }

    /// Mask with every light in `lights` switched on.
    #[must_use]
    pub fn mask(lights: &[Self]) -> u8 {
        lights.iter().fold(0, |mask, light| mask | light.bit())
    }
}

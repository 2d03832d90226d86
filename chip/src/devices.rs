use std::fmt;

use crate::definitions::{display, keyboard};

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for the display based code.
///
/// The origin `(0, 0)` is the top left corner, valid coordinates satisfy
/// `x < width()` and `y < height()`.
pub trait DisplayBuffer {
    /// The amount of pixels per row
    fn width(&self) -> usize;
    /// The amount of rows
    fn height(&self) -> usize;
    /// Will clear the display
    fn clear(&mut self);
    /// Returns if the pixel is lit
    fn get(&self, x: usize, y: usize) -> bool;
    /// Will light or unlight the pixel
    fn set(&mut self, x: usize, y: usize, lit: bool);
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for reading the keyboard data
pub trait KeyState {
    /// Returns if the key with the given code `0x0..=0xF` is currently pressed.
    fn is_pressed(&self, key: u8) -> bool;
}

/// The graphics of the Chip 8 are black and white and the screen has a total of `2048` pixels
/// `(64 x 32)`. The pixels are stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl Display {
    pub fn new() -> Self {
        Self::with_size(display::WIDTH, display::HEIGHT)
    }

    /// Will create an unlit display, a zero width or height gives a display
    /// without any pixels.
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; width * height],
        }
    }

    /// Will iterate over all rows of the display from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        // chunks panics on zero, an empty display has no rows either way
        self.pixels.chunks(self.width.max(1))
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayBuffer for Display {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn clear(&mut self) {
        self.pixels.fill(false);
    }

    fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[self.index(x, y)]
    }

    fn set(&mut self, x: usize, y: usize, lit: bool) {
        let index = self.index(x, y);
        self.pixels[index] = lit;
    }
}

/// Renders lit pixels as `x` and unlit ones as `.`, one line per row.
impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.rows().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            for pixel in row {
                write!(f, "{}", if *pixel { 'x' } else { '.' })?;
            }
        }
        Ok(())
    }
}

/// Will store the state of the hex keyboard.
///
/// Input is done with a hex keyboard that has 16 keys ranging `0-F`. The `8`, `4`, `6`, and
/// `2` keys are typically used for directional input. Three opcodes are used to detect input.
/// One skips an instruction if a specific key is pressed, while another does the same if a
/// specific key is not pressed. The third waits for a key press, and then stores it in one of
/// the data registers.
#[derive(Default, Debug, Clone)]
pub struct Keyboard {
    keys: [bool; keyboard::SIZE],
}

impl Keyboard {
    pub fn new() -> Self {
        Keyboard::default()
    }

    pub fn set_pressed(&mut self, key: usize) {
        self.set_key(key, true)
    }

    pub fn set_released(&mut self, key: usize) {
        self.set_key(key, false)
    }

    pub fn toggle_key(&mut self, key: usize) {
        if let Some(state) = self.keys.get(key).copied() {
            self.set_key(key, !state)
        } else {
            log::warn!("there is no key {:#X} to toggle", key);
        }
    }

    /// Will set the key state, keys outside of `0x0..=0xF` are ignored.
    pub fn set_key(&mut self, key: usize, to: bool) {
        match self.keys.get_mut(key) {
            Some(state) => *state = to,
            None => log::warn!("there is no key {:#X} to set", key),
        }
    }

    /// Will overwrite all keys at once, panics if the length is not `16`.
    pub fn set_mult(&mut self, keys: &[bool]) {
        assert!(keys.len() == self.keys.len());
        self.keys.copy_from_slice(keys);
    }

    pub fn get_keys(&self) -> &[bool] {
        &self.keys
    }
}

impl KeyState for Keyboard {
    fn is_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_set_get_clear() {
        let mut display = Display::new();
        assert_eq!(display.width(), display::WIDTH);
        assert_eq!(display.height(), display::HEIGHT);

        display.set(63, 31, true);
        display.set(0, 1, true);
        assert!(display.get(63, 31));
        assert!(display.get(0, 1));
        assert!(!display.get(1, 0));

        display.clear();
        assert!(display.rows().flatten().all(|pixel| !pixel));
    }

    #[test]
    fn test_display_print() {
        let mut display = Display::with_size(4, 2);
        display.set(1, 0, true);
        display.set(3, 1, true);
        assert_eq!(".x..\n...x", format!("{}", display));
    }

    #[test]
    fn test_keyboard() {
        let mut keyboard = Keyboard::new();
        assert!(!keyboard.is_pressed(0xA));

        keyboard.set_pressed(0xA);
        assert!(keyboard.is_pressed(0xA));
        keyboard.toggle_key(0xA);
        assert!(!keyboard.is_pressed(0xA));

        keyboard.toggle_key(0x3);
        keyboard.set_released(0x3);
        assert_eq!(&[false; keyboard::SIZE], keyboard.get_keys());

        // there is no such key
        assert!(!keyboard.is_pressed(0x10));
    }

    #[test]
    fn test_display_without_pixels() {
        for display in [Display::with_size(0, 4), Display::with_size(4, 0)] {
            assert_eq!(display.rows().count(), 0);
            assert_eq!("", format!("{}", display));
        }
    }

    #[test]
    fn test_keyboard_ignores_unknown_keys() {
        let mut keyboard = Keyboard::new();

        keyboard.set_pressed(keyboard::SIZE);
        keyboard.toggle_key(0x20);
        keyboard.set_key(usize::MAX, true);
        keyboard.set_released(0x11);

        assert_eq!(&[false; keyboard::SIZE], keyboard.get_keys());
    }

    #[test]
    fn test_keyboard_set_mult() {
        let mut keyboard = Keyboard::new();
        let mut keys = [false; keyboard::SIZE];
        keys[2] = true;
        keys[0xF] = true;
        keyboard.set_mult(&keys);
        assert!(keyboard.is_pressed(2));
        assert!(keyboard.is_pressed(0xF));
        assert!(!keyboard.is_pressed(3));
    }
}

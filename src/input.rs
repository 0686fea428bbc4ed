//! Button input

use bitflags::bitflags;

bitflags! {
    /// Button state mask
    ///
    /// Bit positions follow the usual handheld wiring so that raw port reads
    /// can be converted with [`Buttons::from_bits_truncate`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Buttons: u8 {
        /// B button
        const B = 1 << 2;
        /// A button
        const A = 1 << 3;
        /// D-pad down
        const DOWN = 1 << 4;
        /// D-pad left
        const LEFT = 1 << 5;
        /// D-pad right
        const RIGHT = 1 << 6;
        /// D-pad up
        const UP = 1 << 7;
    }
}

/// Source of button state
///
/// Only [`InputSource::button_state`] must be provided; the mask tests are
/// derived from it.
pub trait InputSource {
    /// Currently held buttons
    fn button_state(&mut self) -> Buttons;

    /// Whether every button in `mask` is held
    fn pressed(&mut self, mask: Buttons) -> bool {
        self.button_state().contains(mask)
    }

    /// Whether no button in `mask` is held
    fn not_pressed(&mut self, mask: Buttons) -> bool {
        !self.button_state().intersects(mask)
    }
}

impl<I: InputSource + ?Sized> InputSource for &mut I {
    fn button_state(&mut self) -> Buttons {
        (**self).button_state()
    }
}

impl InputSource for Buttons {
    fn button_state(&mut self) -> Buttons {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressed_requires_all_bits() {
        let mut state = Buttons::UP | Buttons::A;
        assert!(state.pressed(Buttons::UP));
        assert!(state.pressed(Buttons::UP | Buttons::A));
        assert!(!state.pressed(Buttons::UP | Buttons::B));
    }

    #[test]
    fn test_not_pressed_requires_no_bits() {
        let mut state = Buttons::LEFT;
        assert!(state.not_pressed(Buttons::RIGHT | Buttons::DOWN));
        assert!(!state.not_pressed(Buttons::LEFT | Buttons::RIGHT));
    }

    #[test]
    fn test_empty_mask() {
        let mut state = Buttons::empty();
        assert!(state.pressed(Buttons::empty()));
        assert!(state.not_pressed(Buttons::all()));
    }

    #[test]
    fn test_raw_port_bits() {
        assert_eq!(Buttons::from_bits_truncate(0b1000_0011), Buttons::UP);
        assert_eq!(Buttons::all().bits(), 0b1111_1100);
    }
}

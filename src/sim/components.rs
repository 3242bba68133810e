use glam::Vec2;

/// One tic worth of player intent, built by the window loop.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputCmd {
    pub forward: f32, // –1 … +1
    pub strafe: f32,  // –1 … +1  (left / right)
    pub turn: f32,    // –1 … +1  (left / right)
    pub look: f32,    // –1 … +1  (up / down)
    pub run: bool,    // Shift
}

impl InputCmd {
    /// Wish direction in camera space (`x` forward, `y` right), unit length
    /// or zero.
    #[inline]
    pub fn wish(&self) -> Vec2 {
        Vec2::new(self.forward, self.strafe).normalize_or_zero()
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_wish_is_normalized() {
        let cmd = InputCmd {
            forward: 1.0,
            strafe: 1.0,
            ..Default::default()
        };
        assert!((cmd.wish().length() - 1.0).abs() < 1e-6);
        assert_eq!(InputCmd::default().wish(), Vec2::ZERO);
    }

    #[test]
    fn default_is_idle() {
        assert!(InputCmd::default().is_idle());
        assert!(
            !InputCmd {
                run: true,
                ..Default::default()
            }
            .is_idle()
        );
    }
}

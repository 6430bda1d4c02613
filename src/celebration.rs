//! Idle / celebrating toggle behind the "Yes" button.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Idle,
    Celebrating,
}

#[derive(Clone, Debug, Default)]
pub struct Celebration {
    state: ViewState,
    /// Number of times the celebration has been entered.
    entered: u32,
}

impl Celebration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn is_celebrating(&self) -> bool {
        self.state == ViewState::Celebrating
    }

    pub fn times_entered(&self) -> u32 {
        self.entered
    }

    /// "Yes" was activated. Returns `true` only when this call moved the view
    /// into the celebration; repeated clicks while celebrating do nothing.
    pub fn accept(&mut self) -> bool {
        match self.state {
            ViewState::Idle => {
                self.state = ViewState::Celebrating;
                self.entered += 1;
                true
            }
            ViewState::Celebrating => false,
        }
    }

    /// Close the celebration and go back to the regular page. Returns `true`
    /// when something was dismissed.
    pub fn dismiss(&mut self) -> bool {
        let was = self.is_celebrating();
        self.state = ViewState::Idle;
        was
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_is_idempotent_while_celebrating() {
        let mut c = Celebration::new();
        assert_eq!(c.state(), ViewState::Idle);
        assert!(c.accept());
        assert!(!c.accept());
        assert!(!c.accept());
        assert_eq!(c.state(), ViewState::Celebrating);
        assert_eq!(c.times_entered(), 1);
    }

    #[test]
    fn test_dismiss_returns_to_idle() {
        let mut c = Celebration::new();
        assert!(!c.dismiss());
        c.accept();
        assert!(c.dismiss());
        assert_eq!(c.state(), ViewState::Idle);
        assert!(c.accept());
        assert_eq!(c.times_entered(), 2);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PowerSwitch {
    on: bool,
}

impl PowerSwitch {
    pub fn new(on: bool) -> Self {
        Self { on }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn toggle(&mut self) -> bool {
        self.on = !self.on;
        self.on
    }

    pub fn set(&mut self, on: bool) {
        self.on = on;
    }

    pub fn icon_name(&self) -> &'static str {
        if self.on {
            "system-shutdown-symbolic"
        } else {
            "media-playback-stop-symbolic"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_state() {
        let mut switch = PowerSwitch::default();
        assert!(!switch.is_on());
        assert!(switch.toggle());
        assert!(!switch.toggle());
    }

    #[test]
    fn test_icon_follows_state() {
        let mut switch = PowerSwitch::new(true);
        let on_icon = switch.icon_name();
        switch.set(false);
        assert_ne!(switch.icon_name(), on_icon);
    }
}

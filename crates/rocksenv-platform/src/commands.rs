#[cfg(windows)]
use std::os::windows::process::CommandExt;

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

pub trait HideWindow {
    fn hide_window(&mut self) -> &mut Self;
}

impl HideWindow for std::process::Command {
    #[cfg(windows)]
    fn hide_window(&mut self) -> &mut Self {
        self.creation_flags(CREATE_NO_WINDOW)
    }

    #[cfg(not(windows))]
    fn hide_window(&mut self) -> &mut Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::HideWindow;

    #[test]
    fn std_command_hide_window_is_chainable() {
        let mut cmd = std::process::Command::new("find");
        let before = &raw mut cmd;
        let after = std::ptr::from_mut(cmd.hide_window());
        assert_eq!(before, after);
    }
}

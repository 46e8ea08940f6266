//! View-model for the reminder modal.

/// Fixed header shown above the task text.
pub const POPUP_HEADER: &str = "Reminder";

/// Plain copy of the popup state handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupView {
    pub visible: bool,
    pub header: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderPopup {
    visible: bool,
    title: String,
}

impl ReminderPopup {
    pub fn show(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.visible = true;
    }

    /// Hides the popup. The last title stays so a fade-out can still render it.
    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn view(&self) -> PopupView {
        PopupView {
            visible: self.visible,
            header: POPUP_HEADER.to_string(),
            title: self.title.clone(),
        }
    }
}

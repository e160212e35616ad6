/// State of a destructive-action confirmation step.
///
/// Holds the pending target while the prompt is open and a busy flag while
/// the action runs. While busy, neither cancel nor a second confirm is
/// accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteConfirmation<T> {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    target: Option<T>,
    in_progress: bool,
}

impl<T: Clone> DeleteConfirmation<T> {
    pub fn new(title: impl Into<String>, confirm_text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: String::new(),
            confirm_text: confirm_text.into(),
            target: None,
            in_progress: false,
        }
    }

    /// Opens the prompt for `target`.
    pub fn open(&mut self, target: T, message: impl Into<String>) {
        self.target = Some(target);
        self.message = message.into();
        self.in_progress = false;
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.in_progress
    }

    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    /// Closes the prompt unless the action is running. Returns whether it closed.
    pub fn cancel(&mut self) -> bool {
        if self.in_progress {
            return false;
        }
        self.target = None;
        true
    }

    /// Marks the action as started and hands out the target.
    ///
    /// Returns `None` if nothing is pending or the action already runs.
    pub fn begin(&mut self) -> Option<T> {
        if self.in_progress {
            return None;
        }
        let target = self.target.clone()?;
        self.in_progress = true;
        Some(target)
    }

    /// The action succeeded: close the prompt.
    pub fn succeed(&mut self) {
        self.in_progress = false;
        self.target = None;
    }

    /// The action failed: re-enable the controls, keep the prompt open.
    pub fn fail(&mut self) {
        self.in_progress = false;
    }

    /// The action failed: re-enable the controls and close the prompt.
    pub fn fail_and_close(&mut self) {
        self.in_progress = false;
        self.target = None;
    }

    /// Label of the confirm button.
    pub fn button_label(&self) -> &str {
        if self.in_progress {
            "Deleting..."
        } else {
            &self.confirm_text
        }
    }
}

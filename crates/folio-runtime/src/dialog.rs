//! Confirmation gate in front of destructive actions.
//!
//! A dialog is plain data: the owning controller keeps it as
//! `Option<ConfirmDialog>` (closed when `None`) and remembers which item the
//! action applies to.

use folio_types::ResourceKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

/// What the user did with an open dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Confirm,
    Cancel,
    /// Clicked outside the dialog; same as cancel
    Dismiss,
}

/// Result of resolving a dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Run the gated action, then close
    Proceed,
    /// Close without acting
    Close,
}

impl ConfirmDialog {
    pub fn for_delete(kind: ResourceKind, item_title: &str) -> Self {
        Self {
            title: kind.delete_title().to_string(),
            message: format!(
                "Are you sure you want to delete \"{}\"? This action cannot be undone.",
                item_title
            ),
            confirm_label: "Delete".to_string(),
            cancel_label: "Cancel".to_string(),
        }
    }

    pub fn resolve(&self, choice: Choice) -> Resolution {
        match choice {
            Choice::Confirm => Resolution::Proceed,
            Choice::Cancel | Choice::Dismiss => Resolution::Close,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_copy() {
        let dialog = ConfirmDialog::for_delete(ResourceKind::Portfolio, "My Site");
        assert_eq!(dialog.title, "Delete Portfolio Project");
        assert_eq!(
            dialog.message,
            "Are you sure you want to delete \"My Site\"? This action cannot be undone."
        );
        assert_eq!(dialog.confirm_label, "Delete");
        assert_eq!(dialog.cancel_label, "Cancel");

        let blog = ConfirmDialog::for_delete(ResourceKind::Blog, "x");
        assert_eq!(blog.title, "Delete Blog Post");
    }

    #[test]
    fn test_only_confirm_proceeds() {
        let dialog = ConfirmDialog::for_delete(ResourceKind::Blog, "x");
        assert_eq!(dialog.resolve(Choice::Confirm), Resolution::Proceed);
        assert_eq!(dialog.resolve(Choice::Cancel), Resolution::Close);
        assert_eq!(dialog.resolve(Choice::Dismiss), Resolution::Close);
    }
}

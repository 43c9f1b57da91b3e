//! Advanced settings form toggle.

use super::decode::DashboardError;
use super::view::{CheckboxHandle, DisplayMode, ElementLookup, PanelHandle, ids};

/// Shows the advanced pointing form while its checkbox is checked.
///
/// The form starts hidden whatever the checkbox says; the two only line
/// up after the first change event.
#[derive(Debug)]
pub struct FormToggler<P, C> {
    form: P,
    checkbox: C,
}

impl<P: PanelHandle, C: CheckboxHandle> FormToggler<P, C> {
    /// Binds the form and checkbox and hides the form.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::MissingElements`] if either element is
    /// absent. The error is also logged.
    pub fn bind<L>(lookup: &L) -> Result<Self, DashboardError>
    where
        L: ElementLookup<Panel = P, Checkbox = C>,
    {
        match (
            lookup.panel(ids::ADVANCED_FORM),
            lookup.checkbox(ids::ADVANCED_MODE_CHECKBOX),
        ) {
            (Some(form), Some(checkbox)) => {
                form.set_display(DisplayMode::None);
                Ok(Self { form, checkbox })
            }
            (form, checkbox) => {
                let mut missing = Vec::new();
                if form.is_none() {
                    missing.push(ids::ADVANCED_FORM.to_string());
                }
                if checkbox.is_none() {
                    missing.push(ids::ADVANCED_MODE_CHECKBOX.to_string());
                }
                tracing::error!(?missing, "advanced form elements not found");
                Err(DashboardError::MissingElements(missing))
            }
        }
    }

    /// Handles a checkbox change event.
    pub fn on_change(&self) {
        let mode = if self.checkbox.is_checked() {
            DisplayMode::Flex
        } else {
            DisplayMode::None
        };
        self.form.set_display(mode);
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::dashboard::MemoryDom;

    #[test]
    fn form_starts_hidden_even_if_checked() {
        let dom = MemoryDom::dashboard();
        dom.set_checked(ids::ADVANCED_MODE_CHECKBOX, true);
        tokio_test::assert_ok!(FormToggler::bind(&dom));
        assert_eq!(dom.display_of(ids::ADVANCED_FORM), Some(DisplayMode::None));
    }

    #[test]
    fn change_follows_checkbox() {
        let dom = MemoryDom::dashboard();
        let Ok(toggler) = FormToggler::bind(&dom) else {
            panic!("bind failed");
        };

        dom.set_checked(ids::ADVANCED_MODE_CHECKBOX, true);
        toggler.on_change();
        assert_eq!(dom.display_of(ids::ADVANCED_FORM), Some(DisplayMode::Flex));
        toggler.on_change();
        assert_eq!(dom.display_of(ids::ADVANCED_FORM), Some(DisplayMode::Flex));

        dom.set_checked(ids::ADVANCED_MODE_CHECKBOX, false);
        toggler.on_change();
        assert_eq!(dom.display_of(ids::ADVANCED_FORM), Some(DisplayMode::None));
    }

    #[test]
    fn missing_checkbox_is_reported() {
        let dom = MemoryDom::dashboard();
        dom.remove(ids::ADVANCED_MODE_CHECKBOX);
        let Err(err) = FormToggler::bind(&dom) else {
            panic!("bind should fail");
        };
        assert_eq!(
            err,
            DashboardError::MissingElements(vec![ids::ADVANCED_MODE_CHECKBOX.to_string()])
        );
    }
}

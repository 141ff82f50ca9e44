//! Keyboard focus confinement while the modal is open.

use crate::dom::ElementId;

/// Cycles focus among the open modal's focusable elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTrap {
    order: Vec<ElementId>,
    current: usize,
}

impl FocusTrap {
    /// Builds a trap over the controls shown for a record. The DOI and
    /// external link anchors only take part when they are visible.
    #[must_use]
    pub fn new(has_doi: bool, has_link: bool) -> Self {
        let mut order = vec![ElementId::ModalClose];
        if has_doi {
            order.push(ElementId::ModalDoi);
        }
        if has_link {
            order.push(ElementId::ModalLink);
        }
        order.push(ElementId::CopyBibtex);
        order.push(ElementId::ModalCloseFooter);
        Self { order, current: 0 }
    }

    /// Element holding focus.
    #[must_use]
    pub fn focused(&self) -> ElementId {
        self.order[self.current]
    }

    /// Focusable elements in tab order.
    #[must_use]
    pub fn order(&self) -> &[ElementId] {
        &self.order
    }

    /// Tab: moves forward, wrapping from the last element to the first.
    pub fn next(&mut self) -> ElementId {
        self.current = (self.current + 1) % self.order.len();
        self.focused()
    }

    /// Shift+Tab: moves backward, wrapping from the first element to the last.
    pub fn prev(&mut self) -> ElementId {
        self.current = self
            .current
            .checked_sub(1)
            .unwrap_or(self.order.len() - 1);
        self.focused()
    }
}

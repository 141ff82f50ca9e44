//! Static page assembly from a [`PageDocument`].

use std::fmt::Write as _;

use crate::dom::{ElementId, PageDocument};

use super::html::escape_html;

/// Page title used in `<title>` and the main heading.
const PAGE_TITLE: &str = "Publications";

/// How one contract element is laid out in the page skeleton.
struct Slot {
    id: ElementId,
    tag: &'static str,
    attrs: &'static str,
    fallback: &'static str,
}

impl Slot {
    const fn new(
        id: ElementId,
        tag: &'static str,
        attrs: &'static str,
        fallback: &'static str,
    ) -> Self {
        Self {
            id,
            tag,
            attrs,
            fallback,
        }
    }
}

/// Serializes one element, or nothing when the page lacks it.
fn element(doc: &PageDocument, slot: &Slot) -> String {
    let Some(state) = doc.element(slot.id) else {
        return String::new();
    };

    let mut out = format!("<{} id=\"{}\"", slot.tag, slot.id);
    if !slot.attrs.is_empty() {
        out.push(' ');
        out.push_str(slot.attrs);
    }
    if let Some(href) = &state.href {
        let _ = write!(out, " href=\"{}\"", escape_html(href));
    }
    for (name, value) in &state.attributes {
        let _ = write!(out, " {}=\"{}\"", escape_html(name), escape_html(value));
    }
    if state.hidden {
        out.push_str(" hidden");
    }
    out.push('>');

    if slot.tag == "input" {
        return out;
    }

    match (&state.html, &state.text) {
        (Some(html), _) => out.push_str(html),
        (None, Some(text)) => out.push_str(&escape_html(text)),
        (None, None) => out.push_str(slot.fallback),
    }
    let _ = write!(out, "</{}>", slot.tag);
    out
}

/// Renders the full static page for `doc`.
///
/// The output is a snapshot of the page state: the shelf, controls, and a
/// hidden modal skeleton with its `data-*` options. It carries no script;
/// interactive use goes through `pubshelf browse`. Elements missing from
/// `doc` are left out of the page.
#[must_use]
pub fn render_page(doc: &PageDocument) -> String {
    use ElementId as E;

    let el = |id: ElementId, tag: &'static str, attrs: &'static str, fallback: &'static str| {
        element(doc, &Slot::new(id, tag, attrs, fallback))
    };

    let controls = [
        el(
            E::YearFilter,
            "select",
            r#"name="year" aria-label="Filter by year""#,
            r#"<option value="">All years</option>"#,
        ),
        el(
            E::SearchInput,
            "input",
            r#"type="search" name="q" placeholder="Search publications" aria-label="Search publications""#,
            "",
        ),
    ]
    .concat();

    let shelf = el(E::Shelf, "section", r#"class="publication-shelf""#, "");

    let modal_body = [
        el(
            E::ModalClose,
            "button",
            r#"type="button" class="modal-close" aria-label="Close""#,
            "&times;",
        ),
        el(E::ModalTitle, "h2", r#"class="modal-title""#, ""),
        el(E::ModalAuthors, "p", r#"class="modal-authors""#, ""),
        el(E::ModalVenue, "p", r#"class="modal-venue""#, ""),
        el(E::ModalAbstract, "p", r#"class="modal-abstract""#, ""),
        el(
            E::ModalDoi,
            "a",
            r#"class="modal-doi" target="_blank" rel="noopener noreferrer""#,
            "DOI",
        ),
        el(
            E::ModalLink,
            "a",
            r#"class="modal-link" target="_blank" rel="noopener noreferrer""#,
            "View paper",
        ),
        el(
            E::CopyBibtex,
            "button",
            r#"type="button" class="copy-bibtex""#,
            "Copy BibTeX",
        ),
        el(
            E::ModalCloseFooter,
            "button",
            r#"type="button" class="modal-close-footer""#,
            "Close",
        ),
    ]
    .concat();

    let modal = if doc.element(E::Modal).is_some() {
        let wrapper = el(
            E::Modal,
            "div",
            r#"class="modal" role="dialog" aria-modal="true" aria-labelledby="modal-title""#,
            "",
        );
        // Nest the body inside the overlay root.
        let open_tag = wrapper.strip_suffix("</div>").unwrap_or(&wrapper);
        format!("{open_tag}<div class=\"modal-content\">{modal_body}</div></div>")
    } else {
        modal_body
    };

    let footer = el(E::YearDisplay, "span", "", "");
    let title = escape_html(PAGE_TITLE);

    format!(
        concat!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n",
            "<meta charset=\"UTF-8\">\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
            "<title>{title}</title>\n",
            "</head>\n<body>\n<main>\n<h1>{title}</h1>\n",
            "<div class=\"publication-controls\">{controls}</div>\n",
            "{shelf}\n</main>\n{modal}\n",
            "<footer>&copy; {footer}</footer>\n</body>\n</html>\n"
        ),
        title = title,
        controls = controls,
        shelf = shelf,
        modal = modal,
        footer = footer,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn test_page_contains_every_contract_id() {
        let page = render_page(&PageDocument::default());
        for id in ElementId::ALL {
            assert!(
                page.contains(&format!("id=\"{id}\"")),
                "page should contain element {id}"
            );
        }
    }

    #[test]
    fn test_page_escapes_text_content() {
        let mut doc = PageDocument::default();
        doc.set_text(ElementId::ModalTitle, "<b>bold</b>");
        let page = render_page(&doc);
        assert!(page.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!page.contains("<b>bold</b>"));
    }

    #[test]
    fn test_page_nests_modal_body_in_overlay() {
        let mut doc = PageDocument::default();
        doc.set_hidden(ElementId::Modal, true);
        let page = render_page(&doc);
        let overlay = page.find("id=\"publication-modal\"").unwrap_or(usize::MAX);
        let title = page.find("id=\"modal-title\"").unwrap_or(0);
        assert!(overlay < title);
        assert!(page.contains("aria-labelledby=\"modal-title\" hidden>"));
    }

    #[test]
    fn test_page_omits_missing_elements() {
        let doc = PageDocument::with_elements([ElementId::Shelf]);
        let page = render_page(&doc);
        assert!(page.contains("id=\"publication-shelf\""));
        assert!(!page.contains("id=\"modal-title\""));
    }

    #[test]
    fn test_input_value_is_attribute() {
        let mut doc = PageDocument::default();
        doc.set_attribute(ElementId::SearchInput, "value", "a \"quoted\" query");
        let page = render_page(&doc);
        assert!(page.contains("value=\"a &quot;quoted&quot; query\""));
    }
}

//! Mounting into the browser document.

use std::rc::Rc;

use finder_router::history;
use wasm_bindgen::{JsCast, JsValue, prelude::Closure};

use crate::{App, MountError, MountHost, MountedApp};

fn dom_error(value: JsValue) -> MountError {
    MountError::Dom(format!("{value:?}"))
}

/// The page's `document`, remembering the element it mounted into.
#[derive(Debug)]
pub struct DocumentHost {
    document: web_sys::Document,
    target: Option<web_sys::Element>,
}

impl DocumentHost {
    /// Bind to the current window's document.
    ///
    /// # Errors
    ///
    /// Returns [`MountError::NoDocument`] outside a browser window.
    pub fn new() -> Result<Self, MountError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(MountError::NoDocument)?;

        Ok(Self {
            document,
            target: None,
        })
    }

    /// Element of the last successful attach.
    pub fn target(&self) -> Option<&web_sys::Element> {
        self.target.as_ref()
    }
}

impl MountHost for DocumentHost {
    fn attach(&mut self, selector: &str, html: &str) -> Result<(), MountError> {
        let element = self
            .document
            .query_selector(selector)
            .map_err(dom_error)?
            .ok_or_else(|| MountError::TargetNotFound {
                selector: selector.to_owned(),
            })?;

        element.set_inner_html(html);
        self.target = Some(element);

        Ok(())
    }
}

impl App {
    /// Mount into the element matching `selector` in the page and start
    /// history-mode navigation.
    ///
    /// The initial view comes from `location.pathname`. Afterwards
    /// `finder:navigate` events, back/forward buttons and clicks on
    /// `<a data-link>` anchors inside the target re-render it.
    ///
    /// # Errors
    ///
    /// Returns [`MountError::TargetNotFound`] when the page has no matching
    /// element, or [`MountError::Dom`] when the browser rejects a listener.
    pub fn mount_to_document(self, selector: &str) -> Result<(), MountError> {
        let mut host = DocumentHost::new()?;
        let location = history::current_path().map_err(dom_error)?;

        let mounted = self.mount(&mut host, selector, &location)?;
        let target = host.target.ok_or_else(|| MountError::TargetNotFound {
            selector: selector.to_owned(),
        })?;

        wire_navigation(Rc::new(mounted), target)
    }
}

fn wire_navigation(mounted: Rc<MountedApp>, target: web_sys::Element) -> Result<(), MountError> {
    {
        let mounted = mounted.clone();
        let target = target.clone();

        history::on_navigate(move |path| {
            if let Err(e) = history::push(&path) {
                log::error!("failed to push history entry for '{path}': {e:?}");
                return;
            }

            target.set_inner_html(&mounted.render(&path));
        })
        .map_err(dom_error)?;
    }

    {
        let mounted = mounted.clone();
        let target = target.clone();

        history::on_popstate(move |path| {
            target.set_inner_html(&mounted.render(&path));
        })
        .map_err(dom_error)?;
    }

    let link_listener = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
        let Some(anchor) = event
            .target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
            .and_then(|element| element.closest("a[data-link]").ok().flatten())
        else {
            return;
        };

        let Some(href) = anchor.get_attribute("href") else {
            return;
        };

        event.prevent_default();

        if let Err(e) = history::navigate(&href) {
            log::error!("navigation to '{href}' failed: {e:?}");
        }
    }) as Box<dyn FnMut(_)>);

    target
        .add_event_listener_with_callback("click", link_listener.as_ref().unchecked_ref())
        .map_err(dom_error)?;
    link_listener.forget();

    log::debug!("history navigation wired for '{}'", mounted.selector());

    Ok(())
}

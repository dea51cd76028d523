//! Browser history glue for history-mode routing.
//!
//! Navigation requests travel as a `finder:navigate` custom event on the
//! document, so any part of the page can ask for a route change without a
//! handle to the router.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;

/// Name of the custom event carrying a target path in its `detail`.
pub const NAVIGATE_EVENT: &str = "finder:navigate";

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No global window object"))
}

fn document() -> Result<web_sys::Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("No document object"))
}

/// `location.pathname` of the current page.
pub fn current_path() -> Result<String, JsValue> {
    window()?.location().pathname()
}

/// Pushes `path` onto the session history without reloading.
pub fn push(path: &str) -> Result<(), JsValue> {
    let history = window()?.history()?;
    history.push_state_with_url(&js_sys::Object::new(), "", Some(path))
}

/// Asks the mounted router to show `path`.
pub fn navigate(path: &str) -> Result<(), JsValue> {
    let event_init = web_sys::CustomEventInit::new();
    event_init.set_detail(&JsValue::from_str(path));

    let event = web_sys::CustomEvent::new_with_event_init_dict(NAVIGATE_EVENT, &event_init)?;
    document()?.dispatch_event(&event)?;

    Ok(())
}

/// Calls `callback` with the requested path for every navigation request.
///
/// The listener lives for the rest of the page's life.
pub fn on_navigate<F>(mut callback: F) -> Result<(), JsValue>
where
    F: FnMut(String) + 'static,
{
    let listener = Closure::wrap(Box::new(move |event: web_sys::CustomEvent| {
        if let Some(path) = event.detail().as_string() {
            callback(path);
        }
    }) as Box<dyn FnMut(_)>);

    document()?.add_event_listener_with_callback(NAVIGATE_EVENT, listener.as_ref().unchecked_ref())?;
    listener.forget();

    Ok(())
}

/// Calls `callback` with the new pathname on back/forward navigation.
pub fn on_popstate<F>(mut callback: F) -> Result<(), JsValue>
where
    F: FnMut(String) + 'static,
{
    let listener = Closure::wrap(Box::new(move |_event: web_sys::PopStateEvent| {
        match current_path() {
            Ok(path) => callback(path),
            Err(e) => log::error!("popstate without a readable location: {e:?}"),
        }
    }) as Box<dyn FnMut(_)>);

    window()?.add_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref())?;
    listener.forget();

    Ok(())
}

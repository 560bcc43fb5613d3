//! Browser driver: wires the pure planners to the real DOM.
//!
//! Only compiled for wasm32. Everything interesting (URL derivation,
//! key diffing, slider arithmetic) lives in the sibling modules; this
//! file is glue around `web-sys`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Document, Element, Event, Headers, HtmlElement, HtmlInputElement, RequestInit, Response,
    Window,
};

use crate::reload::{self, ReloadPlan, REQUESTED_WITH};
use crate::slider::{snap_value, SliderBounds, PRICE_STEP};
use crate::transitions;

const EXIT_DURATION_MS: i32 = 200;

/// Entry point, called once from the wasm start function.
pub fn mount() {
    let window = match web_sys::window() {
        Some(window) => window,
        None => return,
    };
    let document = match window.document() {
        Some(document) => document,
        None => return,
    };
    if let Some(root) = document.query_selector(".js-filter").ok().flatten() {
        if let Some(elements) = FilterElements::bind(&root) {
            let filter = Filter::new(elements);
            filter.wire();
        }
    }
}

/// The DOM regions one filter instance drives. Looked up relative to
/// the root element so several filters on one page stay independent.
struct FilterElements {
    form: web_sys::HtmlFormElement,
    content: Element,
    sorting: Element,
    pagination: Element,
    loader: Option<HtmlElement>,
}

impl FilterElements {
    fn bind(root: &Element) -> Option<Self> {
        let form = root
            .query_selector(".js-filter-form")
            .ok()
            .flatten()?
            .dyn_into::<web_sys::HtmlFormElement>()
            .ok()?;
        let content = root.query_selector(".js-filter-content").ok().flatten()?;
        let sorting = root.query_selector(".js-filter-sorting").ok().flatten()?;
        let pagination = root.query_selector(".js-filter-pagination").ok().flatten()?;
        let loader = form
            .query_selector(".js-loading")
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok());
        Some(FilterElements {
            form,
            content,
            sorting,
            pagination,
            loader,
        })
    }
}

/// Pending appear/exit timers, keyed by card id so a newer reload can
/// cancel what an older one scheduled for the same card.
type Timers = Rc<RefCell<HashMap<String, i32>>>;

struct Filter {
    elements: Rc<FilterElements>,
    timers: Timers,
}

impl Filter {
    fn new(elements: FilterElements) -> Self {
        Filter {
            elements: Rc::new(elements),
            timers: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Installs the submit, form-input and click interceptors, then
    /// the slider.
    fn wire(self) {
        self.wire_submit();
        self.wire_inputs();
        self.wire_region_clicks(self.elements.pagination.clone());
        self.wire_region_clicks(self.elements.sorting.clone());
        self.wire_slider();
    }

    fn wire_submit(&self) {
        let elements = Rc::clone(&self.elements);
        let timers = Rc::clone(&self.timers);
        let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            let url = form_listing_url(&elements.form);
            start_reload(Rc::clone(&elements), Rc::clone(&timers), url);
        });
        let _ = self
            .elements
            .form
            .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref());
        on_submit.forget();
    }

    /// A change on any named form input reloads without waiting for a
    /// submit: blurring an edited text or number input, or toggling a
    /// checkbox. The slider handles carry no `name`, so their release
    /// path stays the single direct call in [`wire_handle`].
    ///
    /// [`wire_handle`]: Filter::wire_handle
    fn wire_inputs(&self) {
        let Ok(inputs) = self.elements.form.query_selector_all("input[name]") else {
            return;
        };
        for index in 0..inputs.length() {
            let Some(element) = inputs.item(index) else {
                continue;
            };
            let elements = Rc::clone(&self.elements);
            let timers = Rc::clone(&self.timers);
            let on_change = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                let url = form_listing_url(&elements.form);
                start_reload(Rc::clone(&elements), Rc::clone(&timers), url);
            });
            let _ = element
                .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref());
            on_change.forget();
        }
    }

    /// Delegated click handling for a fragment region: any click whose
    /// target sits inside an `<a href>` becomes a fragment reload.
    fn wire_region_clicks(&self, region: Element) {
        let elements = Rc::clone(&self.elements);
        let timers = Rc::clone(&self.timers);
        let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(anchor) = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|element| element.closest("a[href]").ok().flatten())
            else {
                return;
            };
            let Some(href) = anchor.get_attribute("href") else {
                return;
            };
            event.prevent_default();
            start_reload(Rc::clone(&elements), Rc::clone(&timers), href);
        });
        let _ = region.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        on_click.forget();
    }

    /// Builds the dual-handle slider inside `#price-slider` and keeps
    /// it in sync with the `#min` / `#max` inputs. Releasing a handle
    /// triggers exactly one reload.
    fn wire_slider(&self) {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            return;
        };
        let Some(mount) = document.query_selector("#price-slider").ok().flatten() else {
            return;
        };
        let data_min = attr_i64(&mount, "data-min").unwrap_or(0);
        let data_max = attr_i64(&mount, "data-max").unwrap_or(0);
        let bounds = SliderBounds::from_range(&vitrine_catalog::results::PriceRange::new(
            data_min, data_max,
        ));

        let min_input = input_by_id(&document, "min");
        let max_input = input_by_id(&document, "max");
        let (start_min, start_max) = bounds.initial_values(
            min_input.as_ref().and_then(input_i64),
            max_input.as_ref().and_then(input_i64),
        );

        let Some(lower) = make_range_input(&document, &bounds, start_min) else {
            return;
        };
        let Some(upper) = make_range_input(&document, &bounds, start_max) else {
            return;
        };
        let _ = mount.append_child(&lower);
        let _ = mount.append_child(&upper);

        self.wire_handle(lower, min_input);
        self.wire_handle(upper, max_input);
    }

    fn wire_handle(&self, handle: HtmlInputElement, paired: Option<HtmlInputElement>) {
        // Dragging updates the numeric input live.
        let live = paired.clone();
        let slider = handle.clone();
        let on_input = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            if let (Some(paired), Ok(value)) = (&live, slider.value().parse::<f64>()) {
                paired.set_value(&snap_value(value).to_string());
            }
        });
        let _ = handle.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref());
        on_input.forget();

        // Releasing the handle fires the reload directly.
        let elements = Rc::clone(&self.elements);
        let timers = Rc::clone(&self.timers);
        let on_change = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let url = form_listing_url(&elements.form);
            start_reload(Rc::clone(&elements), Rc::clone(&timers), url);
        });
        let _ =
            handle.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref());
        on_change.forget();
    }
}

/// Shows the loading state for the lifetime of one reload. Dropping
/// the guard clears it again, so it cannot stay stuck on an error
/// path. Tolerates a missing indicator element.
struct LoaderGuard {
    form: web_sys::HtmlFormElement,
    loader: Option<HtmlElement>,
}

impl LoaderGuard {
    fn show(elements: &FilterElements) -> Self {
        let form = elements.form.clone();
        let _ = form.class_list().add_1("is-loading");
        let loader = elements.loader.clone();
        if let Some(loader) = &loader {
            // Clearing the inline display leaves the visible styling
            // to the stylesheet.
            let _ = loader.style().remove_property("display");
            let _ = loader.set_attribute("aria-hidden", "false");
        }
        LoaderGuard { form, loader }
    }
}

impl Drop for LoaderGuard {
    fn drop(&mut self) {
        let _ = self.form.class_list().remove_1("is-loading");
        if let Some(loader) = &self.loader {
            let _ = loader.style().set_property("display", "none");
            let _ = loader.set_attribute("aria-hidden", "true");
        }
    }
}

fn start_reload(elements: Rc<FilterElements>, timers: Timers, url: String) {
    spawn_local(async move {
        let guard = LoaderGuard::show(&elements);
        let plan = ReloadPlan::for_url(&url);
        match run_reload(&elements, &timers, &plan).await {
            Ok(()) => {}
            Err(error) => web_sys::console::error_1(&error),
        }
        drop(guard);
    });
}

async fn run_reload(
    elements: &FilterElements,
    timers: &Timers,
    plan: &ReloadPlan,
) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    let headers = Headers::new()?;
    headers.set(REQUESTED_WITH.0, REQUESTED_WITH.1)?;
    let init = RequestInit::new();
    init.set_method("GET");
    init.set_headers(&headers);

    let response: Response = JsFuture::from(window.fetch_with_str_and_init(&plan.fetch_url, &init))
        .await?
        .dyn_into()?;
    let status = response.status();
    let body = JsFuture::from(response.text()?).await?.as_string();

    let apply = reload::apply(plan, status, body.as_deref())
        .map_err(|error| JsValue::from_str(&error.to_string()))?;

    swap_content(&window, elements, timers, &apply.content);
    elements.sorting.set_inner_html(&apply.sorting);
    elements.pagination.set_inner_html(&apply.pagination);
    window
        .history()?
        .replace_state_with_url(&JsValue::NULL, "", Some(&apply.history_url))?;
    Ok(())
}

/// Replaces the grid HTML and plays the keyed transitions: exiting
/// cards fade out as clones, appearing cards fade in staggered.
fn swap_content(window: &Window, elements: &FilterElements, timers: &Timers, html: &str) {
    // A fresh cycle owns every card; pending timers from the previous
    // one would fight it.
    for (_, handle) in timers.borrow_mut().drain() {
        window.clear_timeout_with_handle(handle);
    }

    let old = keyed_children(&elements.content);
    elements.content.set_inner_html(html);
    let new = keyed_children(&elements.content);

    let old_keys: Vec<String> = old.iter().map(|(key, _)| key.clone()).collect();
    let new_keys: Vec<String> = new.iter().map(|(key, _)| key.clone()).collect();
    let plan = transitions::plan(&old_keys, &new_keys);

    for key in &plan.exits {
        if let Some((_, element)) = old.iter().find(|(old_key, _)| old_key == key) {
            play_exit(window, timers, &elements.content, element, key);
        }
    }
    for appear in &plan.appears {
        if let Some((_, element)) = new.iter().find(|(new_key, _)| new_key == &appear.key) {
            play_appear(window, timers, element, &appear.key, appear.delay_ms);
        }
    }
}

fn keyed_children(region: &Element) -> Vec<(String, Element)> {
    let mut children = Vec::new();
    if let Ok(nodes) = region.query_selector_all("[id]") {
        for index in 0..nodes.length() {
            if let Some(element) = nodes
                .item(index)
                .and_then(|node| node.dyn_into::<Element>().ok())
            {
                if let Some(id) = element.get_attribute("id") {
                    if !id.is_empty() {
                        children.push((id, element));
                    }
                }
            }
        }
    }
    children
}

fn play_exit(window: &Window, timers: &Timers, region: &Element, element: &Element, key: &str) {
    let Ok(clone) = element.clone_node_with_deep(true) else {
        return;
    };
    let Ok(clone) = clone.dyn_into::<Element>() else {
        return;
    };
    // The clone must not collide with the live card's id.
    clone.remove_attribute("id").ok();
    if let Some(styled) = clone.dyn_ref::<HtmlElement>() {
        let style = styled.style();
        let _ = style.set_property("transition", "opacity 0.2s ease");
        let _ = style.set_property("opacity", "0");
    }
    let _ = region.append_child(&clone);

    let handle = schedule(window, EXIT_DURATION_MS, move || {
        clone.remove();
    });
    if let Some(handle) = handle {
        timers
            .borrow_mut()
            .insert(format!("exit:{}", key), handle);
    }
}

fn play_appear(window: &Window, timers: &Timers, element: &Element, key: &str, delay_ms: u32) {
    let Some(styled) = element.dyn_ref::<HtmlElement>() else {
        return;
    };
    let style = styled.style();
    let _ = style.set_property("opacity", "0");
    let _ = style.set_property("transform", "translateY(12px)");

    let target = styled.clone();
    let handle = schedule(window, delay_ms as i32, move || {
        let style = target.style();
        let _ = style.set_property("transition", "opacity 0.2s ease, transform 0.2s ease");
        let _ = style.set_property("opacity", "1");
        let _ = style.set_property("transform", "none");
    });
    if let Some(handle) = handle {
        timers.borrow_mut().insert(key.to_string(), handle);
    }
}

fn schedule(window: &Window, delay_ms: i32, work: impl FnOnce() + 'static) -> Option<i32> {
    let callback = Closure::once_into_js(work);
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref::<Function>(),
            delay_ms,
        )
        .ok()
}

/// The listing URL a form submit navigates to: the form's action path
/// plus its current fields as a query string.
fn form_listing_url(form: &web_sys::HtmlFormElement) -> String {
    let action = form.get_attribute("action").unwrap_or_else(|| "/".into());
    let action_path = action.split('?').next().unwrap_or("/");

    let mut fields: Vec<(String, String)> = Vec::new();
    if let Ok(nodes) = form.query_selector_all("input[name]") {
        for index in 0..nodes.length() {
            let Some(input) = nodes
                .item(index)
                .and_then(|node| node.dyn_into::<HtmlInputElement>().ok())
            else {
                continue;
            };
            let kind = input.type_();
            if (kind == "checkbox" || kind == "radio") && !input.checked() {
                continue;
            }
            let value = input.value();
            if value.is_empty() {
                continue;
            }
            fields.push((input.name(), value));
        }
    }
    let query = reload::serialize_fields(
        fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str())),
    );
    reload::form_url(action_path, &query)
}

fn make_range_input(
    document: &Document,
    bounds: &SliderBounds,
    value: i64,
) -> Option<HtmlInputElement> {
    let input = document
        .create_element("input")
        .ok()?
        .dyn_into::<HtmlInputElement>()
        .ok()?;
    input.set_type("range");
    let _ = input.set_attribute("min", &bounds.min.to_string());
    let _ = input.set_attribute("max", &bounds.max.to_string());
    let _ = input.set_attribute("step", &PRICE_STEP.to_string());
    input.set_value(&value.to_string());
    let _ = input.class_list().add_1("price-handle");
    Some(input)
}

fn input_by_id(document: &Document, id: &str) -> Option<HtmlInputElement> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
}

fn input_i64(input: &HtmlInputElement) -> Option<i64> {
    input.value().parse::<i64>().ok()
}

fn attr_i64(element: &Element, name: &str) -> Option<i64> {
    element
        .get_attribute(name)
        .and_then(|value| value.parse::<i64>().ok())
}

//! Browser event wiring
//!
//! Connects page events to the engine: the search field, clicks on the
//! alphabet links, viewport resize and orientation change, and a mutation
//! observer that stands in for external filtering libraries which cannot
//! publish on the [`VisibilityBus`] themselves. Everything attached here is
//! detached again when the [`EventBindings`] value is dropped.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, KeyboardEvent, MutationObserver, MutationObserverInit, MutationRecord, Window};

use crate::dom::{HostDocument, WebDocument};
use crate::engine::{AlphabeticalFilter, RenderedVisibility, SubscriptionId, VisibilityBus, LINK_ATTR};
use crate::utils::Debouncer;
use crate::{wasm_log, wasm_warn};

use super::helpers::parse_letter;

pub type WebFilter = AlphabeticalFilter<WebDocument, RenderedVisibility>;

/// Attributes an external list library toggles to hide items
const OBSERVED_ATTRIBUTES: [&str; 3] = ["style", "class", "hidden"];

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Every listener, observer and bus subscription owned by one filter
pub struct EventBindings {
    listeners: Vec<Listener>,
    observer: Option<MutationObserver>,
    _observer_callback: Option<Closure<dyn FnMut(js_sys::Array, MutationObserver)>>,
    bus: Rc<VisibilityBus>,
    subscription: SubscriptionId,
}

/// Run `work` once after `delay_ms`
fn schedule(window: &Window, delay_ms: u32, work: impl FnOnce() + 'static) {
    let callback = Closure::once_into_js(work);
    if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        delay_ms as i32,
    ) {
        wasm_warn!("setTimeout failed: {:?}", e);
    }
}

/// Run `work` after `delay_ms` unless another event arrives first
fn debounce(window: &Window, debouncer: &Rc<Debouncer>, delay_ms: u32, work: impl FnOnce() + 'static) {
    let token = debouncer.trigger();
    let debouncer = Rc::clone(debouncer);
    schedule(window, delay_ms, move || {
        if debouncer.settle(token) {
            work();
        }
    });
}

/// Run an engine operation, then drop the mutation records it caused
fn with_engine(
    engine: &Rc<RefCell<WebFilter>>,
    observer: &Option<MutationObserver>,
    work: impl FnOnce(&mut WebFilter),
) {
    match engine.try_borrow_mut() {
        Ok(mut engine) => work(&mut engine),
        Err(_) => {
            wasm_warn!("Filter busy, skipping event");
            return;
        }
    }
    if let Some(observer) = observer {
        let _ = observer.take_records();
    }
}

impl EventBindings {
    pub fn attach(engine: &Rc<RefCell<WebFilter>>, bus: &Rc<VisibilityBus>) -> Result<Self, JsValue> {
        let (doc, config, search_field, links_container, item_container) = {
            let filter = engine.borrow();
            (
                filter.document().clone(),
                filter.config().clone(),
                filter.search_field(),
                filter.links_container(),
                filter.item_container().cloned(),
            )
        };
        let window = doc.window().clone();
        let mut listeners = Vec::new();

        // Mutation observer scoped to item elements of the list container
        let (observer, observer_callback) = match &item_container {
            Some(container) => {
                let item_selector = config.item_selector.clone();
                let bus_for_observer = Rc::clone(bus);
                let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
                    move |records: js_sys::Array, _observer: MutationObserver| {
                        let touches_item = records.iter().any(|record| {
                            record
                                .dyn_into::<MutationRecord>()
                                .ok()
                                .and_then(|r| r.target())
                                .and_then(|node| node.dyn_into::<Element>().ok())
                                .map(|el| el.matches(&item_selector).unwrap_or(false))
                                .unwrap_or(false)
                        });
                        if touches_item {
                            bus_for_observer.publish();
                        }
                    },
                );
                let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
                let options = MutationObserverInit::new();
                options.set_attributes(true);
                options.set_subtree(true);
                let filter: js_sys::Array = OBSERVED_ATTRIBUTES.iter().map(|a| JsValue::from_str(a)).collect();
                options.set_attribute_filter(&filter);
                observer.observe_with_options(container, &options)?;
                (Some(observer), Some(callback))
            }
            None => (None, None),
        };

        // Visibility notifications (observer or external publisher) resync
        let subscription = {
            let engine = Rc::clone(engine);
            let observer = observer.clone();
            let window = window.clone();
            let debouncer = Rc::new(Debouncer::new());
            let delay = config.mutation_debounce_ms;
            bus.subscribe(move || {
                let engine = Rc::clone(&engine);
                let observer = observer.clone();
                debounce(&window, &debouncer, delay, move || {
                    with_engine(&engine, &observer, |filter| {
                        filter.synchronize();
                    });
                });
            })
        };

        // Live search
        match &search_field {
            Some(field) => {
                let input = {
                    let engine = Rc::clone(engine);
                    let observer = observer.clone();
                    let window = window.clone();
                    let doc = doc.clone();
                    let field = field.clone();
                    let debouncer = Rc::new(Debouncer::new());
                    let delay = config.search_debounce_ms;
                    Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                        let engine = Rc::clone(&engine);
                        let observer = observer.clone();
                        let doc = doc.clone();
                        let field = field.clone();
                        debounce(&window, &debouncer, delay, move || {
                            let value = doc.input_value(&field);
                            with_engine(&engine, &observer, |filter| {
                                filter.search(&value);
                            });
                        });
                    })
                };
                listeners.push(Listener::add(field.clone().into(), "input", input)?);

                let keydown = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                    if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                        if key.key() == "Enter" {
                            event.prevent_default();
                        }
                    }
                });
                listeners.push(Listener::add(field.clone().into(), "keydown", keydown)?);
                wasm_log!("Search functionality initialized");
            }
            None => wasm_warn!("Search field not found, live search not wired"),
        }

        // Alphabet link clicks (delegated)
        if let Some(container) = &links_container {
            let engine = Rc::clone(engine);
            let link_selector = format!("[{}]", LINK_ATTR);
            let click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let letter = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| el.closest(&link_selector).ok().flatten())
                    .and_then(|link| link.get_attribute(LINK_ATTR))
                    .and_then(|value| parse_letter(&value));
                let Some(letter) = letter else {
                    return;
                };
                // Generated links never use native navigation
                event.prevent_default();
                if let Ok(filter) = engine.try_borrow() {
                    filter.activate_link(letter);
                }
            });
            listeners.push(Listener::add(container.clone().into(), "click", click)?);
        }

        // Resize and orientation change
        {
            let resize = {
                let engine = Rc::clone(engine);
                let observer = observer.clone();
                let window_for_timer = window.clone();
                let debouncer = Rc::new(Debouncer::new());
                let delay = config.resize_debounce_ms;
                Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                    let engine = Rc::clone(&engine);
                    let observer = observer.clone();
                    debounce(&window_for_timer, &debouncer, delay, move || {
                        with_engine(&engine, &observer, |filter| {
                            filter.handle_resize();
                        });
                    });
                })
            };
            listeners.push(Listener::add(window.clone().into(), "resize", resize)?);

            let orientation = {
                let engine = Rc::clone(engine);
                let observer = observer.clone();
                let window_for_timer = window.clone();
                let delay = config.orientation_delay_ms;
                Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                    let engine = Rc::clone(&engine);
                    let observer = observer.clone();
                    schedule(&window_for_timer, delay, move || {
                        with_engine(&engine, &observer, |filter| {
                            filter.handle_resize();
                        });
                    });
                })
            };
            listeners.push(Listener::add(window.clone().into(), "orientationchange", orientation)?);
            wasm_log!("Responsive behavior initialized");
        }

        Ok(Self {
            listeners,
            observer,
            _observer_callback: observer_callback,
            bus: Rc::clone(bus),
            subscription,
        })
    }
}

impl Listener {
    fn add(target: EventTarget, event: &'static str, callback: Closure<dyn FnMut(Event)>) -> Result<Self, JsValue> {
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target,
            event,
            callback,
        })
    }
}

impl Drop for EventBindings {
    fn drop(&mut self) {
        for listener in &self.listeners {
            let _ = listener
                .target
                .remove_event_listener_with_callback(listener.event, listener.callback.as_ref().unchecked_ref());
        }
        if let Some(observer) = &self.observer {
            observer.disconnect();
        }
        self.bus.unsubscribe(self.subscription);
    }
}

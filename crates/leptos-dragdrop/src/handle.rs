//! Nested sortable handle
//!
//! Owns the engine, the sync channel and the SortableJS instance for one
//! list element. Dropping the handle tears everything down.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;

use nestsort::{
    Authority, Classification, ItemId, ReconcileOutcome, ReorderEngine, ReorderItemsCommand,
    SortConfig, SyncChannel,
};

use crate::dom_list::DomList;
use crate::error::{js_message, BindError};
use crate::sortable::{event_item_id, stop_propagation, SortableCallbacks, SortableInstance};

pub type SharedEngine = Rc<RefCell<ReorderEngine<DomList>>>;
type WeakEngine = Weak<RefCell<ReorderEngine<DomList>>>;

pub struct NestedSortable<A: Authority + 'static> {
    engine: SharedEngine,
    channel: Rc<RefCell<SyncChannel<A>>>,
    instance: Option<SortableInstance>,
}

impl<A: Authority + 'static> NestedSortable<A> {
    /// Make `container`'s children sortable and nestable
    pub fn mount(
        container: web_sys::HtmlElement,
        config: &SortConfig,
        authority: A,
    ) -> Result<Self, BindError> {
        let engine: SharedEngine = Rc::new_cyclic(|weak: &WeakEngine| {
            let weak = weak.clone();
            let sampler: Rc<dyn Fn(f64)> = Rc::new(move |x| {
                with_engine(&weak, |e| e.sample(x));
            });
            let list = DomList::new(container.clone(), config, sampler);
            RefCell::new(ReorderEngine::new(list, config))
        });
        engine.borrow_mut().on_classification_changed(feedback(config));

        let channel = Rc::new(RefCell::new(SyncChannel::new(authority, config.dom_identity())));
        let callbacks = callbacks(&engine, &channel, config);
        let instance = SortableInstance::create(&container, config, callbacks)?;
        engine.borrow_mut().list_mut().attach(instance.js().clone());

        tracing::debug!(items = engine.borrow().list().container().child_element_count(), "nested sortable mounted");
        Ok(Self {
            engine,
            channel,
            instance: Some(instance),
        })
    }

    /// Apply an authoritative order (deferred while dragging)
    pub fn reconcile(&self, command: &ReorderItemsCommand) -> Option<ReconcileOutcome> {
        let mut engine = self.engine.try_borrow_mut().ok()?;
        let channel = self.channel.try_borrow().ok()?;
        Some(channel.accept(&mut *engine, command))
    }
}

impl<A: Authority + 'static> Drop for NestedSortable<A> {
    fn drop(&mut self) {
        if let Ok(mut engine) = self.engine.try_borrow_mut() {
            engine.teardown();
            engine.list_mut().detach();
        }
        self.instance = None;
        tracing::debug!("nested sortable destroyed");
    }
}

/// Run `f` on the engine unless it is gone or already borrowed
fn with_engine<R>(weak: &WeakEngine, f: impl FnOnce(&mut ReorderEngine<DomList>) -> R) -> Option<R> {
    let engine = weak.upgrade()?;
    let Ok(mut engine) = engine.try_borrow_mut() else {
        tracing::trace!("engine busy, event dropped");
        return None;
    };
    Some(f(&mut engine))
}

fn callbacks<A: Authority + 'static>(
    engine: &SharedEngine,
    channel: &Rc<RefCell<SyncChannel<A>>>,
    config: &SortConfig,
) -> SortableCallbacks {
    let weak = Rc::downgrade(engine);

    let on_choose = {
        let weak = weak.clone();
        let dom = config.dom_identity();
        Closure::<dyn FnMut(JsValue)>::new(move |evt: JsValue| {
            let Some(id) = event_item_id(&evt).and_then(|raw| dom.parse(&raw)) else {
                return;
            };
            with_engine(&weak, |e| e.choose(id));
        })
    };

    let on_unchoose = {
        let weak = weak.clone();
        Closure::<dyn FnMut(JsValue)>::new(move |_evt: JsValue| {
            with_engine(&weak, |e| e.unchoose());
        })
    };

    let on_start = {
        let weak = weak.clone();
        Closure::<dyn FnMut(JsValue)>::new(move |_evt: JsValue| {
            with_engine(&weak, |e| e.start());
        })
    };

    let on_end = {
        let channel = channel.clone();
        Closure::<dyn FnMut(JsValue)>::new(move |evt: JsValue| {
            stop_propagation(&evt);
            with_engine(&weak, |e| match channel.try_borrow_mut() {
                Ok(mut channel) => {
                    channel.complete_gesture(e);
                }
                Err(_) => {
                    tracing::warn!("sync channel busy, gesture discarded");
                    e.cancel();
                }
            });
        })
    };

    SortableCallbacks {
        on_choose,
        on_unchoose,
        on_start,
        on_end,
    }
}

/// Live nest/unnest styling on the dragged element
fn feedback(config: &SortConfig) -> impl FnMut(&ItemId, Classification) + 'static {
    let dom = config.dom_identity();
    let nest_class = config.nest_class.clone();
    let unnest_class = config.unnest_class.clone();

    move |id, classification| {
        let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&dom.dom_id(id)))
        else {
            return;
        };
        let classes = el.class_list();
        if let Err(e) = classes.remove_2(&nest_class, &unnest_class) {
            tracing::warn!(item = %id, error = %js_message(&e), "failed to clear drag classes");
        }
        let add = match classification {
            Classification::Nest => Some(&nest_class),
            Classification::Unnest => Some(&unnest_class),
            Classification::Keep => None,
        };
        if let Some(class) = add {
            if let Err(e) = classes.add_1(class) {
                tracing::warn!(item = %id, class = %class, error = %js_message(&e), "failed to set drag class");
            }
        }
    }
}

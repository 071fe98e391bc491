//! Container component that shows exactly one named state view at a time.
//!
//! This module implements the `StatefulLayout` component: a container that
//! owns a registry of named state views (content, loading, error, empty,
//! or any caller-defined state), keeps exactly one of them visible, persists
//! the active state across a destroy-and-recreate cycle, and notifies an
//! optional observer on every state change.

pub mod state_id;

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use {
    libadwaita::{
        gtk::{Box as GtkBox, Orientation::Vertical, Widget},
        prelude::{BoxExt, Cast, IsA, WidgetExt},
    },
    tracing::{debug, error},
};

use crate::{error::StateError, layout::state_id::StateId, persistence::InstanceState};

/// Fixed key under which the active state name is saved in an
/// [`InstanceState`] store.
pub const SAVED_STATE_KEY: &str = "stateful_layout_state";

/// Mutable per-instance state behind the component's `Rc`.
///
/// All access is synchronous on the GTK main context, so plain interior
/// mutability is enough; no locking is involved.
#[derive(Default)]
struct LayoutInner {
    /// Registered state views. Every value is a child of the container.
    views: HashMap<StateId, Widget>,
    /// The currently active state, if one was ever set.
    state: Option<StateId>,
    /// At most one change observer; replaced, never accumulated.
    on_state_change: Option<Rc<dyn Fn(&StateId)>>,
    /// Set permanently true once the content state has been derived from
    /// the inline child.
    initialized: bool,
}

/// Container widget that keeps exactly one registered state view visible.
///
/// The container's original inline child becomes the reserved
/// [`StateId::Content`] state on the first map pass; further states are
/// registered with [`set_state_view`](StatefulLayout::set_state_view) and
/// activated with [`set_state`](StatefulLayout::set_state).
#[derive(Clone)]
pub struct StatefulLayout {
    /// The underlying GTK widget container.
    pub widget: Widget,
    /// Main container box holding all state views.
    pub container: GtkBox,
    /// Shared mutable component state.
    inner: Rc<RefCell<LayoutInner>>,
}

impl StatefulLayout {
    /// Creates a new stateful layout.
    ///
    /// The first map pass plays the role of layout inflation: the single
    /// child present at that point (beyond any already-registered state
    /// views) becomes the content state. See
    /// [`initialize_content_state`](StatefulLayout::initialize_content_state)
    /// for the exact child-count contract.
    pub fn new() -> Self {
        let container = GtkBox::builder().orientation(Vertical).build();
        let widget = container.clone().upcast::<Widget>();

        let layout = Self {
            widget,
            container,
            inner: Rc::new(RefCell::new(LayoutInner::default())),
        };

        let handler = layout.clone();
        layout.container.connect_map(move |_| {
            // Signal handlers cannot propagate a Result; a violated child
            // count is reported loudly instead.
            if let Err(e) = handler.initialize_content_state() {
                error!("Content state initialization failed: {}", e);
            }
        });

        layout
    }

    /// Registers `view` under `id`, replacing any previous view for that
    /// state.
    ///
    /// A replaced view is detached from the container. The new view is
    /// attached if it has no parent yet and is forced hidden regardless of
    /// its prior visibility; it only becomes visible through
    /// [`set_state`](StatefulLayout::set_state).
    pub fn set_state_view(&self, id: impl Into<StateId>, view: &impl IsA<Widget>) {
        let id = id.into();
        let view = view.upcast_ref::<Widget>().clone();

        let mut inner = self.inner.borrow_mut();
        if let Some(previous) = inner.views.remove(&id) {
            self.container.remove(&previous);
        }
        if view.parent().is_none() {
            self.container.append(&view);
        }
        view.set_visible(false);
        inner.views.insert(id, view);
    }

    /// Switches the layout to the given state.
    ///
    /// Shows the view registered under `id`, hides every other registered
    /// view and invokes the change listener synchronously with the new
    /// state.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::UnknownState`] if no view was registered for
    /// `id`; the active state is left untouched in that case.
    pub fn set_state(&self, id: impl Into<StateId>) -> Result<(), StateError> {
        let id = id.into();

        let listener = {
            let mut inner = self.inner.borrow_mut();
            if !inner.views.contains_key(&id) {
                return Err(StateError::UnknownState { state: id });
            }
            inner.state = Some(id.clone());
            for (registered, view) in &inner.views {
                view.set_visible(*registered == id);
            }
            inner.on_state_change.clone()
        };

        debug!("Switched to state \"{}\"", id);

        // Invoked outside the borrow so the listener may switch states again.
        if let Some(listener) = listener {
            listener(&id);
        }

        Ok(())
    }

    /// Gets the currently active state, or `None` if no state was ever set.
    pub fn state(&self) -> Option<StateId> {
        self.inner.borrow().state.clone()
    }

    /// Gets the view registered under `id`, or `None` if the state is
    /// unknown.
    pub fn state_view(&self, id: impl Into<StateId>) -> Option<Widget> {
        self.inner.borrow().views.get(&id.into()).cloned()
    }

    /// Replaces the state-change listener.
    ///
    /// The layout keeps at most one observer at a time; setting a new one
    /// drops the previous. This is a deliberate scope decision, not an
    /// accidental limitation.
    pub fn set_on_state_change(&self, listener: impl Fn(&StateId) + 'static) {
        self.inner.borrow_mut().on_state_change = Some(Rc::new(listener));
    }

    /// Writes the active state name into `store` under [`SAVED_STATE_KEY`].
    ///
    /// Does nothing if no state was ever set.
    pub fn save_instance_state(&self, store: &mut InstanceState) {
        if let Some(state) = &self.inner.borrow().state {
            store.insert(SAVED_STATE_KEY, state.as_str());
        }
    }

    /// Restores the active state from `store` and returns it.
    ///
    /// The saved state's view must be registered again before this is
    /// called; restoration order relative to registration is the caller's
    /// responsibility.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::NoSavedState`] if the store holds no entry
    /// under [`SAVED_STATE_KEY`], or [`StateError::UnknownState`] if the
    /// saved state has no registered view.
    pub fn restore_instance_state(&self, store: &InstanceState) -> Result<StateId, StateError> {
        let state = store
            .get(SAVED_STATE_KEY)
            .map(StateId::named)
            .ok_or(StateError::NoSavedState)?;
        self.set_state(state.clone())?;
        Ok(state)
    }

    /// Removes every registered state except the reserved content state.
    ///
    /// Cleared views are detached from the container; the content view and
    /// its registration are preserved.
    pub fn clear_states(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.views.retain(|id, view| {
            if *id == StateId::Content {
                true
            } else {
                self.container.remove(view);
                false
            }
        });
    }

    /// Derives the reserved content state from the container's inline child.
    ///
    /// Contract: at call time the container must hold exactly one more child
    /// than the number of already-registered state views; that one extra
    /// child is the original inline content. On success it is re-registered
    /// under [`StateId::Content`] (and therefore hidden until
    /// [`set_state`](StatefulLayout::set_state) shows it) and the layout is
    /// marked initialized. Runs at most once per instance; later calls are
    /// no-ops.
    ///
    /// This is wired to the container's first map pass by
    /// [`new`](StatefulLayout::new), but may also be called directly when a
    /// host constructs the hierarchy programmatically.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::InvalidChildCount`] if the child count does not
    /// match the contract.
    pub fn initialize_content_state(&self) -> Result<(), StateError> {
        let registered: Vec<Widget> = {
            let inner = self.inner.borrow();
            if inner.initialized {
                return Ok(());
            }
            inner.views.values().cloned().collect()
        };

        let children = self.children();
        let expected = registered.len() + 1;
        if children.len() != expected {
            return Err(StateError::InvalidChildCount {
                expected,
                actual: children.len(),
            });
        }

        // The single child that is not a registered state view is the
        // original inline content.
        let content = children
            .into_iter()
            .find(|child| !registered.contains(child))
            .ok_or(StateError::InvalidChildCount {
                expected,
                actual: expected,
            })?;

        self.container.remove(&content);
        self.set_state_view(StateId::Content, &content);
        self.inner.borrow_mut().initialized = true;
        debug!("Content state initialized from the inline child");

        Ok(())
    }

    /// Returns whether the content state has been derived yet.
    pub fn is_initialized(&self) -> bool {
        self.inner.borrow().initialized
    }

    /// Collects the container's current children in order.
    fn children(&self) -> Vec<Widget> {
        let mut children = Vec::new();
        let mut next = self.container.first_child();
        while let Some(child) = next {
            next = child.next_sibling();
            children.push(child);
        }
        children
    }
}

impl Default for StatefulLayout {
    fn default() -> Self {
        Self::new()
    }
}

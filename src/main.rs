//! Demo application for the stateful layout component.
//!
//! Hosts a `StatefulLayout` whose inline child is the content view, registers
//! loading, error and empty state views, switches between them from header
//! bar buttons, and saves/restores the active state across runs.

use std::{cell::Cell, env::var, error::Error, path::PathBuf};

use {
    libadwaita::{
        Application, ApplicationWindow, HeaderBar,
        glib::Propagation,
        gtk::{
            Align::Center, Box as GtkBox, Button, Label, Orientation::Vertical, Spinner,
        },
        prelude::{
            AdwApplicationWindowExt, ApplicationExt, ApplicationExtManual, BoxExt, ButtonExt,
            GtkWindowExt, WidgetExt,
        },
    },
    tracing::{error, info},
    tracing_subscriber::EnvFilter,
};

use stateful_layout::{InstanceState, StateId, StatefulLayout};

/// Main entry point for the demo application.
fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Initialize GTK and Libadwaita
    libadwaita::gtk::init()?;
    let _ = libadwaita::init();

    let app = Application::builder()
        .application_id("com.example.stateful_layout")
        .build();
    app.connect_activate(build_ui);
    app.run();

    Ok(())
}

/// Builds the demo window around a stateful layout.
fn build_ui(app: &Application) {
    let layout = StatefulLayout::new();

    // Inline content child; it becomes the content state on first map.
    let content = Label::builder()
        .label("All set. This is the content view.")
        .halign(Center)
        .valign(Center)
        .css_classes(["title-2"])
        .build();
    layout.container.append(&content);

    let loading = Spinner::builder()
        .spinning(true)
        .halign(Center)
        .valign(Center)
        .width_request(32)
        .height_request(32)
        .build();
    layout.set_state_view("loading", &loading);

    let error_view = Label::builder()
        .label("Something went wrong.")
        .halign(Center)
        .valign(Center)
        .css_classes(["error"])
        .build();
    layout.set_state_view("error", &error_view);

    let empty_view = Label::builder()
        .label("Nothing here yet.")
        .halign(Center)
        .valign(Center)
        .css_classes(["dim-label"])
        .build();
    layout.set_state_view("empty", &empty_view);

    layout.set_on_state_change(|state| info!("Layout switched to state \"{}\"", state));

    // Header buttons driving the state transitions
    let header = HeaderBar::builder().build();
    for name in ["content", "loading", "error", "empty"] {
        let button = Button::builder().label(name).build();
        let layout_clone = layout.clone();
        button.connect_clicked(move |_| {
            if let Err(e) = layout_clone.set_state(name) {
                error!("State switch failed: {}", e);
            }
        });
        header.pack_start(&button);
    }

    let root = GtkBox::builder().orientation(Vertical).build();
    root.append(&header);
    root.append(&layout.widget);

    let state_path = get_state_path();

    // Restore after the content state exists; the map handler that
    // initializes it was connected first and runs before this one.
    let restored = Cell::new(false);
    let layout_clone = layout.clone();
    let restore_path = state_path.clone();
    layout.container.connect_map(move |_| {
        if restored.replace(true) {
            return;
        }
        let saved = match InstanceState::read_from(&restore_path) {
            Ok(store) => layout_clone.restore_instance_state(&store).ok(),
            Err(_) => None,
        };
        match saved {
            Some(state) => info!("Restored layout state \"{}\"", state),
            None => {
                if let Err(e) = layout_clone.set_state(StateId::Content) {
                    error!("Failed to show content state: {}", e);
                }
            }
        }
    });

    let window = ApplicationWindow::builder()
        .application(app)
        .title("Stateful Layout Demo")
        .default_width(480)
        .default_height(360)
        .build();
    window.set_content(Some(&root));

    let layout_clone = layout.clone();
    window.connect_close_request(move |_| {
        let mut store = InstanceState::new();
        layout_clone.save_instance_state(&mut store);
        if !store.is_empty()
            && let Err(e) = store.write_to(&state_path)
        {
            error!("Failed to save layout state: {}", e);
        }
        Propagation::Proceed
    });

    window.present();
}

/// Gets the saved-state file path following the XDG Base Directory
/// specification.
fn get_state_path() -> PathBuf {
    let mut path = var("XDG_STATE_HOME").map(PathBuf::from).unwrap_or_else(|_| {
        let mut home = PathBuf::from(var("HOME").unwrap_or_else(|_| ".".to_string()));
        home.push(".local");
        home.push("state");
        home
    });
    path.push("stateful-layout");
    path.push("instance_state.json");
    path
}

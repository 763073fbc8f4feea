//! Application - App Initialization and Window Management
//!
//! Main entry point for the GPUI application.

use gpui::{
    App, AppContext, Application, Bounds, SharedString, TitlebarOptions, WindowBounds,
    WindowOptions, actions, px,
};
use gpui_component::Root;
use tracing::error;

use crate::app::entities::AppEntities;
use crate::app::workspace::Workspace;
use crate::config::AppConfig;
use crate::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use crate::i18n::{Locale, tr};
use crate::state::session_state::SessionState;

actions!(quality_console, [Quit]);

/// Run the console until its last window closes
pub fn run_app(config: AppConfig, session: SessionState) {
    Application::new().run(move |cx: &mut App| {
        gpui_component::init(cx);
        cx.on_action(|_: &Quit, cx: &mut App| cx.quit());

        // Quit the app when all windows are closed (macOS behavior)
        cx.on_window_closed(|cx| {
            if cx.windows().is_empty() {
                cx.quit();
            }
        })
        .detach();

        let entities = AppEntities::init(&config, session, cx);
        cx.set_global(entities.clone());

        let title = tr(Locale::resolve(config.locale.as_deref()), "app.title");
        let size = gpui::size(px(DEFAULT_WINDOW_WIDTH), px(DEFAULT_WINDOW_HEIGHT));
        let bounds = Bounds::centered(None, size, cx);
        let window_options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            titlebar: Some(TitlebarOptions {
                title: Some(SharedString::from(title)),
                appears_transparent: false,
                traffic_light_position: None,
            }),
            ..Default::default()
        };

        // Input widgets need the component root at the top of the window
        if let Err(e) = cx.open_window(window_options, |window, cx| {
            let workspace = cx.new(|cx| Workspace::new(entities.clone(), window, cx));
            cx.new(|cx| Root::new(workspace, window, cx))
        }) {
            error!(error = %e, "Failed to open the main window");
            cx.quit();
            return;
        }

        cx.activate(true);
    });
}

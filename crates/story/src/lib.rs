mod progress_story;

use std::path::Path;

use gpui::{
    AnyElement, App, Bounds, Div, Entity, IntoElement, ParentElement, Render, RenderOnce,
    SharedString, Styled, TitlebarOptions, Window, WindowBounds, WindowKind, WindowOptions, div,
    prelude::FluentBuilder as _, px, size,
};
use moyai_component::{Theme, ThemeOverride, colors, h_flex, v_flex};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

pub use progress_story::ProgressStory;

/// Install logging and the component globals.
///
/// `RUST_LOG` takes precedence over the default `moyai_component=debug`.
pub fn init(cx: &mut App) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("moyai_component=debug,moyai_story=debug"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    moyai_component::init(cx);
}

/// Read a JSON theme override from `path` and make it the app-level theme.
///
/// A broken file is logged and the built-in theme is kept.
pub fn load_theme(path: impl AsRef<Path>, cx: &mut App) {
    match ThemeOverride::load(path) {
        Ok(overrides) => Theme::change(&overrides, cx),
        Err(err) => tracing::error!("failed to load theme: {:?}", err),
    }
}

/// Open a centered window with the view built by `crate_view_fn`.
pub fn create_new_window<F, V>(title: &str, crate_view_fn: F, cx: &mut App)
where
    V: Render,
    F: FnOnce(&mut Window, &mut App) -> Entity<V> + 'static,
{
    let mut window_size = size(px(960.0), px(760.0));
    if let Some(display) = cx.primary_display() {
        let display_size = display.bounds().size;
        window_size.width = window_size.width.min(display_size.width * 0.85);
        window_size.height = window_size.height.min(display_size.height * 0.85);
    }

    let window_bounds = Bounds::centered(None, window_size, cx);
    let title = SharedString::from(title.to_string());
    let options = WindowOptions {
        window_bounds: Some(WindowBounds::Windowed(window_bounds)),
        titlebar: Some(TitlebarOptions {
            title: Some(title.clone()),
            ..Default::default()
        }),
        window_min_size: Some(size(px(480.), px(360.))),
        kind: WindowKind::Normal,
        ..Default::default()
    };

    let window = match cx.open_window(options, crate_view_fn) {
        Ok(window) => window,
        Err(err) => {
            tracing::error!("failed to open window: {:?}", err);
            return;
        }
    };

    if let Err(err) = window.update(cx, |_, window, _| window.activate_window()) {
        tracing::error!("failed to activate window `{}`: {:?}", title, err);
    }
}

/// A titled group of examples in the gallery.
#[derive(IntoElement)]
pub(crate) struct StorySection {
    title: SharedString,
    description: Option<SharedString>,
    base: Div,
    children: Vec<AnyElement>,
}

impl StorySection {
    pub(crate) fn description(mut self, description: impl Into<SharedString>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl ParentElement for StorySection {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl Styled for StorySection {
    fn style(&mut self) -> &mut gpui::StyleRefinement {
        self.base.style()
    }
}

impl RenderOnce for StorySection {
    fn render(self, _: &mut Window, _: &mut App) -> impl IntoElement {
        let border = colors::neutral(200).unwrap_or_else(|| colors::hsla(colors::TRACK));
        let muted = colors::neutral(500).unwrap_or_else(|| colors::hsla(colors::BUFFER));

        v_flex()
            .w_full()
            .gap_2()
            .child(
                v_flex()
                    .gap_1()
                    .child(div().text_sm().child(self.title))
                    .when_some(self.description, |this, description| {
                        this.child(div().text_xs().text_color(muted).child(description))
                    }),
            )
            .child(
                self.base
                    .p_4()
                    .border_1()
                    .border_color(border)
                    .rounded_lg()
                    .children(self.children),
            )
    }
}

pub(crate) fn section(title: impl Into<SharedString>) -> StorySection {
    StorySection {
        title: title.into(),
        description: None,
        base: h_flex()
            .flex_wrap()
            .justify_center()
            .items_center()
            .w_full()
            .gap_4(),
        children: vec![],
    }
}

use gpui::{
    App, AppContext as _, ClickEvent, Context, ElementId, Entity, InteractiveElement as _,
    IntoElement, ParentElement, Render, SharedString, Stateful, StatefulInteractiveElement as _,
    Styled, Window, div, px,
};
use moyai_component::{
    ActiveTheme as _, ProgressWidth, ThemeOverride, ThemeProvider, colors, h_flex,
    progress::{
        CircularProgress, CircularVariant, LinearProgress, LinearVariant, LiquidProgress,
        LiquidVariant,
    },
    v_flex,
};

use crate::section;

const PROVIDER_PRESETS: [(&str, u32); 4] = [
    ("Default", colors::PRIMARY),
    ("Success", colors::SUCCESS.dark),
    ("Warning", colors::WARNING.dark),
    ("Danger", colors::DANGER.dark),
];

/// Every progress element with controls for its value and mode.
pub struct ProgressStory {
    /// Percentage, `0..=100`.
    value: f32,
    circular: CircularVariant,
    linear: LinearVariant,
    liquid: LiquidVariant,
    preset: usize,
    provider: ThemeProvider,
}

impl ProgressStory {
    pub fn view(window: &mut Window, cx: &mut App) -> Entity<Self> {
        cx.new(|cx| Self::new(window, cx))
    }

    fn new(_: &mut Window, _: &mut Context<Self>) -> Self {
        Self {
            value: 40.,
            circular: CircularVariant::Determinate,
            linear: LinearVariant::Determinate,
            liquid: LiquidVariant::Determinate,
            preset: 0,
            provider: ThemeProvider::default(),
        }
    }

    fn set_value(&mut self, value: f32, cx: &mut Context<Self>) {
        self.value = value.clamp(0., 100.);
        cx.notify();
    }

    fn next_preset(&mut self, cx: &mut Context<Self>) {
        self.preset = (self.preset + 1) % PROVIDER_PRESETS.len();
        let (name, color) = PROVIDER_PRESETS[self.preset];
        let overrides = if self.preset == 0 {
            ThemeOverride::default()
        } else {
            ThemeOverride::primary(colors::hsla(color))
        };
        if self.provider.set_overrides(overrides) {
            tracing::info!(preset = name, "provider theme changed");
        }
        cx.notify();
    }

    fn fraction(&self) -> f32 {
        self.value / 100.
    }

    fn render_value_controls(&self, cx: &mut Context<Self>) -> impl IntoElement {
        h_flex()
            .gap_2()
            .child(button("value-0", "0%").on_click(cx.listener(
                |this, _: &ClickEvent, _, cx| this.set_value(0., cx),
            )))
            .child(button("value-25", "25%").on_click(cx.listener(
                |this, _: &ClickEvent, _, cx| this.set_value(25., cx),
            )))
            .child(button("value-75", "75%").on_click(cx.listener(
                |this, _: &ClickEvent, _, cx| this.set_value(75., cx),
            )))
            .child(button("value-100", "100%").on_click(cx.listener(
                |this, _: &ClickEvent, _, cx| this.set_value(100., cx),
            )))
            .child(button("value-minus", "-10").on_click(cx.listener(
                |this, _: &ClickEvent, _, cx| this.set_value(this.value - 10., cx),
            )))
            .child(button("value-plus", "+10").on_click(cx.listener(
                |this, _: &ClickEvent, _, cx| this.set_value(this.value + 10., cx),
            )))
            .child(div().text_sm().child(format!("{:.0}%", self.value)))
    }

    fn render_circular(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let variant = self.circular;

        section("Circular Progress")
            .description("A spinning quarter arc, or an arc covering the value.")
            .child(
                button("circular-variant", format!("{:?}", variant)).on_click(cx.listener(
                    |this, _: &ClickEvent, _, cx| {
                        this.circular = match this.circular {
                            CircularVariant::Determinate => CircularVariant::Indeterminate,
                            CircularVariant::Indeterminate => CircularVariant::Determinate,
                        };
                        cx.notify();
                    },
                )),
            )
            .child(
                CircularProgress::new("circular-small")
                    .variant(variant)
                    .value(self.value),
            )
            .child(
                CircularProgress::new("circular-medium")
                    .variant(variant)
                    .value(self.value)
                    .size(48.),
            )
            .child(
                CircularProgress::new("circular-large")
                    .variant(variant)
                    .value(self.value)
                    .size(96.)
                    .thickness(12.)
                    .color(colors::SUCCESS.main())
                    .track_color(colors::SUCCESS.light()),
            )
            .child(
                CircularProgress::new("circular-slow")
                    .value(self.value)
                    .size(64.)
                    .duration_ms(2400.)
                    .color(colors::INFO.dark()),
            )
    }

    fn render_linear(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let value = self.fraction();
        let buffer = (value + 0.2).min(1.);

        section("Linear Progress")
            .description("Determinate, buffer, indeterminate and query bars.")
            .child(
                h_flex()
                    .gap_2()
                    .children(
                        [
                            LinearVariant::Determinate,
                            LinearVariant::Buffer,
                            LinearVariant::Indeterminate,
                            LinearVariant::Query,
                        ]
                        .into_iter()
                        .enumerate()
                        .map(|(ix, variant)| {
                            button(("linear-variant", ix), format!("{:?}", variant)).on_click(
                                cx.listener(move |this, _: &ClickEvent, _, cx| {
                                    this.linear = variant;
                                    cx.notify();
                                }),
                            )
                        }),
                    ),
            )
            .child(
                v_flex()
                    .w_full()
                    .gap_4()
                    .child(
                        LinearProgress::new("linear-fill")
                            .variant(self.linear)
                            .value(value)
                            .value_buffer(buffer),
                    )
                    .child(
                        LinearProgress::new("linear-fixed")
                            .variant(self.linear)
                            .value(value)
                            .value_buffer(buffer)
                            .width(240.)
                            .height(10.)
                            .border_radius(2.)
                            .color(colors::WARNING.main())
                            .buffer_color(colors::WARNING.light()),
                    )
                    .child(
                        LinearProgress::new("linear-indeterminate")
                            .variant(LinearVariant::Indeterminate)
                            .width(ProgressWidth::Fill)
                            .height(4.),
                    ),
            )
    }

    fn render_liquid(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let variant = self.liquid;

        section("Liquid Progress")
            .description("A gradient fill that flows inside a pill shaped track.")
            .child(
                button("liquid-variant", format!("{:?}", variant)).on_click(cx.listener(
                    |this, _: &ClickEvent, _, cx| {
                        this.liquid = match this.liquid {
                            LiquidVariant::Determinate => LiquidVariant::Indeterminate,
                            LiquidVariant::Indeterminate => LiquidVariant::Determinate,
                        };
                        cx.notify();
                    },
                )),
            )
            .child(
                LiquidProgress::new("liquid-default")
                    .variant(variant)
                    .value(self.fraction()),
            )
            .child(
                LiquidProgress::new("liquid-gradient")
                    .variant(variant)
                    .value(self.fraction())
                    .width(260.)
                    .height(20.)
                    .inset(3.)
                    .gradient_colors(colors::liquid_gradient()),
            )
            .child(
                div().w_full().child(
                    LiquidProgress::new("liquid-fill")
                        .variant(variant)
                        .value(self.fraction())
                        .width(ProgressWidth::Fill)
                        .accessibility_label("Syncing"),
                ),
            )
    }

    fn render_provider(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = self.provider.theme();
        let (name, _) = PROVIDER_PRESETS[self.preset];

        section("Theme Provider")
            .description("Elements below read their colors from a scoped theme.")
            .child(
                button("provider-preset", format!("Theme: {}", name)).on_click(cx.listener(
                    |this, _: &ClickEvent, _, cx| this.next_preset(cx),
                )),
            )
            .child(
                CircularProgress::new("provider-circular")
                    .theme(theme.clone())
                    .size(40.),
            )
            .child(
                LinearProgress::new("provider-linear")
                    .theme(theme.clone())
                    .variant(LinearVariant::Buffer)
                    .value(self.fraction())
                    .value_buffer((self.fraction() + 0.3).min(1.))
                    .width(200.),
            )
            .child(
                LiquidProgress::new("provider-liquid")
                    .theme(theme)
                    .determinate()
                    .value(self.fraction()),
            )
    }
}

fn button(id: impl Into<ElementId>, label: impl Into<SharedString>) -> Stateful<gpui::Div> {
    let border = colors::neutral(300).unwrap_or_else(|| colors::hsla(colors::BUFFER));
    let hover = colors::neutral(100).unwrap_or_else(|| colors::hsla(colors::TRACK));

    div()
        .id(id.into())
        .px_2()
        .py_1()
        .text_sm()
        .rounded(px(4.))
        .border_1()
        .border_color(border)
        .cursor_pointer()
        .hover(move |this| this.bg(hover))
        .child(label.into())
}

impl Render for ProgressStory {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        v_flex()
            .id("progress-story")
            .size_full()
            .overflow_y_scroll()
            .p_6()
            .gap_6()
            .items_center()
            .bg(colors::hsla(colors::WHITE))
            .text_color(cx.theme().primary)
            .child(self.render_value_controls(cx))
            .child(div().w_full().max_w(px(720.)).child(self.render_circular(cx)))
            .child(div().w_full().max_w(px(720.)).child(self.render_linear(cx)))
            .child(div().w_full().max_w(px(720.)).child(self.render_liquid(cx)))
            .child(div().w_full().max_w(px(720.)).child(self.render_provider(cx)))
    }
}

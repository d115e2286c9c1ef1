use gpui::{App, Global, Hsla};
use std::{
    ops::{Deref, DerefMut},
    rc::Rc,
    sync::LazyLock,
};

use crate::colors;

mod provider;
mod schema;
pub use provider::*;
pub use schema::*;

static DEFAULT_THEME: LazyLock<Theme> = LazyLock::new(Theme::default);

/// Install the built-in theme as the app-level default.
///
/// Elements that are not given an explicit theme read this one.
pub fn init(cx: &mut App) {
    if !cx.has_global::<Theme>() {
        cx.set_global(Theme::default());
    }
}

pub trait ActiveTheme {
    fn theme(&self) -> &Theme;
}

impl ActiveTheme for App {
    #[inline(always)]
    fn theme(&self) -> &Theme {
        Theme::global(self)
    }
}

/// Colors read by the progress elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColor {
    /// The progress (fill, arc, bar) color.
    pub primary: Hsla,
    /// The track behind the progress.
    pub track: Hsla,
    /// The buffer bar of the linear progress, also the middle gradient stop
    /// of the liquid progress.
    pub buffer: Hsla,
}

impl Default for ThemeColor {
    fn default() -> Self {
        Self {
            primary: colors::hsla(colors::PRIMARY),
            track: colors::hsla(colors::TRACK),
            buffer: colors::hsla(colors::BUFFER),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Theme {
    pub colors: ThemeColor,
}

impl Deref for Theme {
    type Target = ThemeColor;

    fn deref(&self) -> &Self::Target {
        &self.colors
    }
}

impl DerefMut for Theme {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.colors
    }
}

impl Global for Theme {}

impl Theme {
    /// Returns the app-level theme, or the built-in one when [`init`] was not
    /// called.
    #[inline(always)]
    pub fn global(cx: &App) -> &Theme {
        cx.try_global::<Theme>().unwrap_or(&DEFAULT_THEME)
    }

    /// The theme an element paints with: its own when one was injected,
    /// otherwise the app-level one.
    #[inline]
    pub(crate) fn resolve<'a>(theme: Option<&'a Rc<Theme>>, cx: &'a App) -> &'a Theme {
        match theme {
            Some(theme) => theme.as_ref(),
            None => cx.theme(),
        }
    }

    /// Returns a new theme with the fields set in `overrides` replaced.
    pub fn merge(&self, overrides: &ThemeOverride) -> Theme {
        let colors = &overrides.colors;
        Theme {
            colors: ThemeColor {
                primary: colors.primary.unwrap_or(self.colors.primary),
                track: colors.track.unwrap_or(self.colors.track),
                buffer: colors.buffer.unwrap_or(self.colors.buffer),
            },
        }
    }

    /// Replace the app-level theme with the built-in one merged with
    /// `overrides`.
    pub fn change(overrides: &ThemeOverride, cx: &mut App) {
        let theme = Theme::default().merge(overrides);
        tracing::debug!(?theme, "app theme changed");
        cx.set_global(theme);
        cx.refresh_windows();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = Theme::default();
        assert_eq!(theme.primary, colors::hsla(0x111827));
        assert_eq!(theme.track, colors::hsla(0xE5E7EB));
        assert_eq!(theme.buffer, colors::hsla(0x9CA3AF));
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let overrides = ThemeOverride {
            colors: ThemeColorOverride {
                track: Some(colors::hsla(colors::WHITE)),
                ..Default::default()
            },
        };

        let theme = Theme::default().merge(&overrides);
        assert_eq!(theme.primary, Theme::default().primary);
        assert_eq!(theme.track, colors::hsla(colors::WHITE));
        assert_eq!(theme.buffer, Theme::default().buffer);

        let theme = theme.merge(&ThemeOverride::default());
        assert_eq!(theme.track, colors::hsla(colors::WHITE));
    }

    #[gpui::test]
    fn test_global_theme(cx: &mut gpui::TestAppContext) {
        cx.update(|cx| {
            // Falls back to the built-in theme before `init`.
            assert_eq!(cx.theme(), &Theme::default());

            init(cx);
            assert_eq!(cx.theme(), &Theme::default());

            let overrides = ThemeOverride::from_json(r##"{"colors":{"buffer":"#FFFFFF"}}"##)
                .expect("valid override");
            Theme::change(&overrides, cx);
            assert_eq!(cx.theme().buffer, colors::hsla(colors::WHITE));
            assert_eq!(cx.theme().primary, Theme::default().primary);
        });
    }

    #[gpui::test]
    fn test_resolve_theme(cx: &mut gpui::TestAppContext) {
        cx.update(|cx| {
            init(cx);
            assert!(std::ptr::eq(Theme::resolve(None, cx), cx.theme()));

            let scoped = Rc::new(Theme::default().merge(&ThemeOverride::primary(
                colors::hsla(colors::WHITE),
            )));
            let resolved = Theme::resolve(Some(&scoped), cx);
            assert!(std::ptr::eq(resolved, scoped.as_ref()));
            assert_eq!(resolved.primary, colors::hsla(colors::WHITE));
            assert_eq!(cx.theme().primary, Theme::default().primary);
        });
    }
}

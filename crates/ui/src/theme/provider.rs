use std::rc::Rc;

use super::{Theme, ThemeOverride};

/// Builds the theme for one subtree of elements.
///
/// The provider hands out the same `Rc<Theme>` until its override changes, so
/// consumers can compare with [`Rc::ptr_eq`] to see whether the theme changed.
/// Elements receive it through their `theme()` builder method.
#[derive(Debug, Clone)]
pub struct ThemeProvider {
    overrides: ThemeOverride,
    theme: Rc<Theme>,
}

impl Default for ThemeProvider {
    fn default() -> Self {
        Self::new(ThemeOverride::default())
    }
}

impl ThemeProvider {
    /// Create a provider from the built-in theme merged with `overrides`.
    pub fn new(overrides: ThemeOverride) -> Self {
        let theme = Rc::new(Theme::default().merge(&overrides));
        Self { overrides, theme }
    }

    /// The resolved theme of this subtree.
    pub fn theme(&self) -> Rc<Theme> {
        self.theme.clone()
    }

    /// Replace the override, returns `true` when a new theme was built.
    pub fn set_overrides(&mut self, overrides: ThemeOverride) -> bool {
        if overrides == self.overrides {
            return false;
        }

        self.theme = Rc::new(Theme::default().merge(&overrides));
        self.overrides = overrides;
        tracing::debug!(theme = ?self.theme, "theme provider rebuilt");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;

    #[test]
    fn test_provider_defaults() {
        let provider = ThemeProvider::default();
        assert_eq!(*provider.theme(), Theme::default());
    }

    #[test]
    fn test_provider_merges_override() {
        let provider = ThemeProvider::new(ThemeOverride::primary(colors::hsla(0xAABBCC)));
        let theme = provider.theme();
        assert_eq!(theme.primary, colors::hsla(0xAABBCC));
        assert_eq!(theme.track, Theme::default().track);
        assert_eq!(theme.buffer, Theme::default().buffer);
    }

    #[test]
    fn test_provider_identity() {
        let mut provider = ThemeProvider::new(ThemeOverride::primary(colors::hsla(colors::BLACK)));
        let first = provider.theme();

        assert!(!provider.set_overrides(ThemeOverride::primary(colors::hsla(colors::BLACK))));
        assert!(Rc::ptr_eq(&first, &provider.theme()));

        assert!(provider.set_overrides(ThemeOverride::primary(colors::hsla(colors::WHITE))));
        let second = provider.theme();
        assert!(!Rc::ptr_eq(&first, &second));
        assert_eq!(second.primary, colors::hsla(colors::WHITE));
        // The previous theme is untouched.
        assert_eq!(first.primary, colors::hsla(colors::BLACK));
    }

    #[test]
    fn test_providers_are_independent() {
        let a = ThemeProvider::new(ThemeOverride::primary(colors::hsla(colors::WHITE)));
        let b = ThemeProvider::default();
        assert_ne!(a.theme().primary, b.theme().primary);
    }
}

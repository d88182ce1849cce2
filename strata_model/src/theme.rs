// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in color themes, expressed as CSS custom-property tables.

use std::collections::BTreeMap;

use crate::timeline::DEFAULT_THEME_ID;

/// A named set of CSS custom properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Stable id stored in [`Timeline::theme_id`](crate::Timeline::theme_id).
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// `(property, value)` pairs, e.g. `("--bg-primary", "#0f172a")`.
    pub vars: &'static [(&'static str, &'static str)],
}

impl Theme {
    /// Value of one property, if the theme defines it.
    #[must_use]
    pub fn var(&self, name: &str) -> Option<&'static str> {
        self.vars.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }
}

/// Every built-in theme; the first one is the default.
pub static THEMES: [Theme; 5] = [
    Theme {
        id: "chronos",
        name: "Chronos (Default)",
        vars: &[
            ("--bg-primary", "#0f172a"),
            ("--bg-secondary", "#1e293b"),
            ("--bg-tertiary", "#334155"),
            ("--text-primary", "#f8fafc"),
            ("--text-secondary", "#94a3b8"),
            ("--accent-color", "#3b82f6"),
            ("--accent-glow", "rgba(59, 130, 246, 0.5)"),
            ("--timeline-track", "#334155"),
            ("--timeline-line", "#475569"),
            ("--border-primary", "#475569"),
            ("--border-secondary", "#334155"),
            ("--glass-bg", "rgba(30, 41, 59, 0.7)"),
            ("--glass-border", "rgba(148, 163, 184, 0.1)"),
        ],
    },
    Theme {
        id: "solar",
        name: "Solar (Light)",
        vars: &[
            ("--bg-primary", "#f8fafc"),
            ("--bg-secondary", "#ffffff"),
            ("--bg-tertiary", "#e2e8f0"),
            ("--text-primary", "#0f172a"),
            ("--text-secondary", "#64748b"),
            ("--accent-color", "#f59e0b"),
            ("--accent-glow", "rgba(245, 158, 11, 0.3)"),
            ("--timeline-track", "#f1f5f9"),
            ("--timeline-line", "#cbd5e1"),
            ("--border-primary", "#e2e8f0"),
            ("--border-secondary", "#f1f5f9"),
            ("--glass-bg", "rgba(255, 255, 255, 0.8)"),
            ("--glass-border", "rgba(0, 0, 0, 0.05)"),
        ],
    },
    Theme {
        id: "midnight",
        name: "Midnight (Neon)",
        vars: &[
            ("--bg-primary", "#000000"),
            ("--bg-secondary", "#0a0a0a"),
            ("--bg-tertiary", "#1a1a1a"),
            ("--text-primary", "#ffffff"),
            ("--text-secondary", "#888888"),
            ("--accent-color", "#a855f7"),
            ("--accent-glow", "rgba(168, 85, 247, 0.7)"),
            ("--timeline-track", "#111111"),
            ("--timeline-line", "#333333"),
            ("--border-primary", "#222222"),
            ("--border-secondary", "#111111"),
            ("--glass-bg", "rgba(10, 10, 10, 0.8)"),
            ("--glass-border", "rgba(168, 85, 247, 0.2)"),
        ],
    },
    Theme {
        id: "papyrus",
        name: "Papyrus (Vintage)",
        vars: &[
            ("--bg-primary", "#f4ead5"),
            ("--bg-secondary", "#ede0c8"),
            ("--bg-tertiary", "#dccfb6"),
            ("--text-primary", "#4a3728"),
            ("--text-secondary", "#7c6a5a"),
            ("--accent-color", "#8b4513"),
            ("--accent-glow", "rgba(139, 69, 19, 0.2)"),
            ("--timeline-track", "#e7d8bd"),
            ("--timeline-line", "#cbb69b"),
            ("--border-primary", "#cbb69b"),
            ("--border-secondary", "#e7d8bd"),
            ("--glass-bg", "rgba(237, 224, 200, 0.6)"),
            ("--glass-border", "rgba(74, 55, 40, 0.1)"),
        ],
    },
    Theme {
        id: "emerald",
        name: "Emerald (Forest)",
        vars: &[
            ("--bg-primary", "#062c2d"),
            ("--bg-secondary", "#0a3d3e"),
            ("--bg-tertiary", "#134e4a"),
            ("--text-primary", "#f0fdf4"),
            ("--text-secondary", "#a7f3d0"),
            ("--accent-color", "#10b981"),
            ("--accent-glow", "rgba(16, 185, 129, 0.5)"),
            ("--timeline-track", "#0f3a3a"),
            ("--timeline-line", "#14532d"),
            ("--border-primary", "#14532d"),
            ("--border-secondary", "#0f3a3a"),
            ("--glass-bg", "rgba(10, 61, 62, 0.7)"),
            ("--glass-border", "rgba(16, 185, 129, 0.1)"),
        ],
    },
];

/// Looks up a built-in theme, falling back to the default for unknown ids.
#[must_use]
pub fn theme_by_id(id: &str) -> &'static Theme {
    THEMES
        .iter()
        .find(|t| t.id == id)
        .unwrap_or_else(default_theme)
}

/// The default theme.
#[must_use]
pub fn default_theme() -> &'static Theme {
    debug_assert_eq!(THEMES[0].id, DEFAULT_THEME_ID);
    &THEMES[0]
}

/// Sink for theme properties, typically a document's root style.
pub trait ThemeStore {
    /// Sets one property.
    fn set_var(&mut self, name: &str, value: &str);

    /// Writes every property of the theme named `id` and returns it.
    fn apply_theme(&mut self, id: &str) -> &'static Theme {
        let theme = theme_by_id(id);
        if theme.id != id {
            tracing::debug!(requested = id, "unknown theme, using default");
        }
        for (name, value) in theme.vars {
            self.set_var(name, value);
        }
        theme
    }

    /// Writes the default theme's properties.
    fn restore_default(&mut self) {
        for (name, value) in default_theme().vars {
            self.set_var(name, value);
        }
    }
}

/// In-memory [`ThemeStore`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThemeVars(BTreeMap<String, String>);

impl ThemeVars {
    /// Current value of a property.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Number of properties set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no property is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ThemeStore for ThemeVars {
    fn set_var(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_owned(), value.to_owned());
    }
}

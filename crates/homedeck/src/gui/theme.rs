use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

/// Colors for the cairo-drawn widgets. Each entry is looked up from the
/// `@define-color` names in [`load_css`] so a user stylesheet can override it.
pub struct ThemeColors {
    pub track: Srgba<f64>,
    pub progress: Srgba<f64>,
    pub handle: Srgba<f64>,
    pub shadow: Srgba<f64>,
    pub tick_major: Srgba<f64>,
    pub tick_minor: Srgba<f64>,
    pub text: Srgba<f64>,
    pub text_dim: Srgba<f64>,
    pub knob: Srgba<f64>,
    pub outline: Srgba<f64>,
    pub fill: Srgba<f64>,
    pub success: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            track: Self::lookup_color(context, "deck_track", Srgba::new(1.0, 1.0, 1.0, 0.1)),
            progress: Self::lookup_color(
                context,
                "deck_progress",
                Srgba::new(1.0, 1.0, 1.0, 0.6),
            ),
            handle: Self::lookup_color(context, "deck_handle", Srgba::new(1.0, 1.0, 1.0, 0.9)),
            shadow: Self::lookup_color(context, "deck_shadow", Srgba::new(0.0, 0.0, 0.0, 0.2)),
            tick_major: Self::lookup_color(
                context,
                "deck_tick_major",
                Srgba::new(1.0, 1.0, 1.0, 0.3),
            ),
            tick_minor: Self::lookup_color(
                context,
                "deck_tick_minor",
                Srgba::new(1.0, 1.0, 1.0, 0.15),
            ),
            text: Self::lookup_color(context, "deck_text", Srgba::new(1.0, 1.0, 1.0, 1.0)),
            text_dim: Self::lookup_color(
                context,
                "deck_text_dim",
                Srgba::new(1.0, 1.0, 1.0, 0.7),
            ),
            knob: Self::lookup_color(context, "deck_knob", Srgba::new(1.0, 1.0, 1.0, 0.2)),
            outline: Self::lookup_color(
                context,
                "deck_outline",
                Srgba::new(1.0, 1.0, 1.0, 0.2),
            ),
            fill: Self::lookup_color(context, "deck_fill", Srgba::new(1.0, 1.0, 1.0, 0.2)),
            success: Self::lookup_color(
                context,
                "deck_success",
                Srgba::new(0.29, 0.87, 0.5, 1.0),
            ),
        }
    }

    fn lookup_color(context: &gtk::StyleContext, name: &str, fallback: Srgba<f64>) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                Srgba::new(
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                )
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
@define-color deck_card_bg #111827;
@define-color deck_track rgba(255, 255, 255, 0.1);
@define-color deck_progress rgba(255, 255, 255, 0.6);
@define-color deck_handle rgba(255, 255, 255, 0.9);
@define-color deck_shadow rgba(0, 0, 0, 0.2);
@define-color deck_tick_major rgba(255, 255, 255, 0.3);
@define-color deck_tick_minor rgba(255, 255, 255, 0.15);
@define-color deck_text #ffffff;
@define-color deck_text_dim rgba(255, 255, 255, 0.7);
@define-color deck_knob rgba(255, 255, 255, 0.2);
@define-color deck_outline rgba(255, 255, 255, 0.2);
@define-color deck_fill rgba(255, 255, 255, 0.2);
@define-color deck_success #4ade80;
@define-color deck_danger #dc2626;

.deck-window {
    background-color: #ffffff;
}
.deck-card {
    background-color: @deck_card_bg;
    border: 2px solid #d1d5db;
    border-radius: 6px;
    padding: 16px;
}
.deck-caption {
    color: #9ca3af;
    font-weight: 500;
}
.deck-title {
    color: #f3f4f6;
    font-size: 28pt;
    font-weight: 500;
}
.deck-image {
    filter: blur(2px);
    opacity: 0.4;
}
.deck-label {
    color: #e5e7eb;
    font-size: small;
    font-weight: 500;
}
.deck-readout {
    font-family: monospace;
    color: rgba(255, 255, 255, 0.7);
    background-color: rgba(0, 0, 0, 0.2);
    border-radius: 6px;
    padding: 4px 12px;
}
.deck-round {
    border-radius: 9999px;
    min-width: 56px;
    min-height: 56px;
}
.deck-dpad-button {
    background: rgba(255, 255, 255, 0.05);
    color: #ffffff;
}
.deck-on {
    background: @deck_success;
    color: #ffffff;
}
.deck-off {
    background: @deck_danger;
    color: #ffffff;
}
.deck-badge {
    border-radius: 6px;
    padding: 4px 10px;
    font-weight: bold;
}
.deck-select {
    background-color: rgba(243, 244, 246, 0.9);
    border: 1px solid rgba(229, 231, 235, 0.8);
    border-radius: 12px;
    min-height: 50px;
    padding: 4px 12px;
}
.deck-select.open {
    border-color: rgba(209, 213, 219, 0.8);
}
.deck-placeholder {
    color: #6b7280;
}
.deck-chip {
    background-color: rgba(31, 41, 55, 0.1);
    border-radius: 9999px;
    padding: 2px 8px;
    font-size: small;
}
.deck-zoom {
    color: #ffffff;
    font-size: 28pt;
    font-weight: bold;
}
.deck-feed {
    border-radius: 6px;
    background-color: #000000;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

//! Small cairo helpers shared by the custom-drawn widgets.

use cairo::Context;
use deckwidgets::Point;
use palette::Srgba;
use std::f64::consts::PI;

pub fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

/// Same color with its alpha scaled by `factor`.
pub fn faded(color: Srgba<f64>, factor: f64) -> Srgba<f64> {
    let (r, g, b, a) = color.into_components();
    Srgba::new(r, g, b, a * factor.clamp(0.0, 1.0))
}

pub fn circle(cr: &Context, center: Point, radius: f64) {
    cr.new_sub_path();
    cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
}

pub fn rounded_rect(cr: &Context, x: f64, y: f64, w: f64, h: f64, radius: f64) {
    let r = radius.min(w / 2.0).min(h / 2.0);
    cr.new_sub_path();
    cr.arc(x + w - r, y + r, r, -PI / 2.0, 0.0);
    cr.arc(x + w - r, y + h - r, r, 0.0, PI / 2.0);
    cr.arc(x + r, y + h - r, r, PI / 2.0, PI);
    cr.arc(x + r, y + r, r, PI, 3.0 * PI / 2.0);
    cr.close_path();
}

pub fn centered_text(
    cr: &Context,
    text: &str,
    center: Point,
    size: f64,
    bold: bool,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    set_color(cr, color);
    let weight = if bold {
        cairo::FontWeight::Bold
    } else {
        cairo::FontWeight::Normal
    };
    cr.select_font_face("Sans", cairo::FontSlant::Normal, weight);
    cr.set_font_size(size);
    let ext = cr.text_extents(text)?;
    cr.move_to(
        center.x - ext.width() / 2.0 - ext.x_bearing(),
        center.y - ext.height() / 2.0 - ext.y_bearing(),
    );
    cr.show_text(text)
}

/// Line from `from` to `to` with round caps.
pub fn stroke_line(
    cr: &Context,
    from: Point,
    to: Point,
    width: f64,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    set_color(cr, color);
    cr.set_line_width(width);
    cr.set_line_cap(cairo::LineCap::Round);
    cr.move_to(from.x, from.y);
    cr.line_to(to.x, to.y);
    cr.stroke()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faded_scales_alpha_only() {
        let c = faded(Srgba::new(1.0, 0.5, 0.25, 0.8), 0.5);
        assert_eq!(c.into_components(), (1.0, 0.5, 0.25, 0.4));
    }

    #[test]
    fn test_faded_clamps_factor() {
        let base = Srgba::new(1.0, 1.0, 1.0, 0.6);
        assert_eq!(faded(base, 2.0).alpha, 0.6);
        assert_eq!(faded(base, -1.0).alpha, 0.0);
    }
}

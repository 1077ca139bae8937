use crate::gui::draw;
use crate::gui::grab::{GrabSlot, PointerGrab};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use deckwidgets::Point;
use deckwidgets::dial::{self, ARC_START, Dial, DialRange};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub const DEFAULT_SIZE: f64 = 200.0;
const RADIUS_RATIO: f64 = 0.35;
const HANDLE_RATIO: f64 = 0.12;
/// Extra pixels around the handle that still count as pressing it.
const HANDLE_SLOP: f64 = 6.0;

pub struct DialInit {
    pub range: DialRange,
    pub initial: f64,
    pub size: f64,
    pub caption: String,
}

impl Default for DialInit {
    fn default() -> Self {
        Self {
            range: DialRange::default(),
            initial: 21.0,
            size: DEFAULT_SIZE,
            caption: "TEMP".to_string(),
        }
    }
}

pub struct CircularDial {
    state: Rc<RefCell<Dial>>,
    size: f64,
    drawing_area: gtk::DrawingArea,
    grab: Rc<RefCell<GrabSlot>>,
    drag_id: u64,
}

#[derive(Debug)]
pub enum DialMsg {
    /// The handle was pressed and drag `drag` holds the pointer grab.
    Press { point: Point, drag: u64 },
    Motion(Point),
    Release(u64),
    SetValue(f64),
    SetRange(DialRange),
}

#[derive(Debug)]
pub enum DialOutput {
    Changed(f64),
}

fn center(size: f64) -> Point {
    Point::new(size / 2.0, size / 2.0)
}

fn handle_position(dial: &Dial, size: f64) -> Point {
    dial::point_on_circle(center(size), size * RADIUS_RATIO, dial.angle())
}

fn hits_handle(dial: &Dial, size: f64, point: Point) -> bool {
    point.distance_to(handle_position(dial, size)) <= size * HANDLE_RATIO / 2.0 + HANDLE_SLOP
}

/// Dial angles run clockwise from 12 o'clock, cairo's from 3 o'clock.
fn to_cairo_angle(angle: f64) -> f64 {
    (angle - 90.0).to_radians()
}

fn draw(
    cr: &Context,
    dial: &Dial,
    size: f64,
    caption: &str,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let c = center(size);
    let radius = size * RADIUS_RATIO;

    // Dotted track
    draw::set_color(cr, colors.track);
    cr.set_line_width(4.0);
    cr.set_line_cap(cairo::LineCap::Round);
    cr.set_dash(&[1.0, 6.0], 0.0);
    draw::circle(cr, c, radius);
    cr.stroke()?;
    cr.set_dash(&[], 0.0);

    for tick in dial.ticks() {
        let length = if tick.major { 8.0 } else { 4.0 };
        let color = if tick.major {
            colors.tick_major
        } else {
            colors.tick_minor
        };
        draw::stroke_line(
            cr,
            dial::point_on_circle(c, radius, tick.angle),
            dial::point_on_circle(c, radius + length, tick.angle),
            if tick.major { 2.0 } else { 1.0 },
            color,
        )?;
    }

    if dial.angle() > ARC_START {
        draw::set_color(cr, colors.progress);
        cr.set_line_width(4.0);
        cr.new_path();
        cr.arc(
            c.x,
            c.y,
            radius,
            to_cairo_angle(ARC_START),
            to_cairo_angle(dial.angle()),
        );
        cr.stroke()?;
    }

    let handle = handle_position(dial, size);
    let handle_radius = size * HANDLE_RATIO / 2.0;
    draw::set_color(cr, colors.shadow);
    draw::circle(cr, Point::new(handle.x, handle.y + 2.0), handle_radius);
    cr.fill()?;
    draw::set_color(cr, colors.handle);
    draw::circle(cr, handle, handle_radius);
    cr.fill()?;

    draw::centered_text(
        cr,
        caption,
        Point::new(c.x, c.y - size * 0.12),
        size * 0.055,
        false,
        colors.text_dim,
    )?;
    draw::centered_text(
        cr,
        &format!("{}°", dial.value()),
        c,
        size * 0.14,
        true,
        colors.text,
    )?;
    draw::centered_text(
        cr,
        &dial.comfort().to_string(),
        Point::new(c.x, c.y + size * 0.12),
        size * 0.055,
        false,
        colors.text_dim,
    )?;

    Ok(())
}

#[relm4::component(pub)]
impl SimpleComponent for CircularDial {
    type Init = DialInit;
    type Input = DialMsg;
    type Output = DialOutput;

    view! {
        #[root]
        gtk::Box {
            set_halign: gtk::Align::Center,

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_content_width: model.size as i32,
                set_content_height: model.size as i32,
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let model = CircularDial {
            state: Rc::new(RefCell::new(Dial::new(init.range, init.initial))),
            size: init.size,
            drawing_area: gtk::DrawingArea::default(),
            grab: Rc::new(RefCell::new(GrabSlot::default())),
            drag_id: 0,
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        let size = model.size;
        let caption = init.caption;
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let colors = ThemeColors::from_context(&drawing_area.style_context());
                if let Err(e) = draw(cr, &state_draw.borrow(), size, &caption, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        // The grab is installed while the press is still being dispatched,
        // so a release in the same frame cannot slip past it.
        let click = gtk::GestureClick::new();
        let state_press = model.state.clone();
        let grab_slot = model.grab.clone();
        let area_weak = widgets.drawing_area.downgrade();
        click.connect_pressed(move |_, _, x, y| {
            let point = Point::new(x, y);
            if !hits_handle(&state_press.borrow(), size, point) {
                return;
            }
            let Some(area) = area_weak.upgrade() else {
                return;
            };
            let drag = grab_slot.borrow_mut().next_id();

            let motion_sender = sender.clone();
            let release_sender = sender.clone();
            let grab = PointerGrab::acquire(
                &area,
                move |p| motion_sender.input(DialMsg::Motion(p)),
                move || release_sender.input(DialMsg::Release(drag)),
            );
            let Some(grab) = grab else {
                log::debug!("Dial is not in a window, ignoring press");
                return;
            };
            grab_slot.borrow_mut().install(drag, grab);
            sender.input(DialMsg::Press { point, drag });
        });
        widgets.drawing_area.add_controller(click);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            DialMsg::Press { point, drag } => {
                self.drag_id = drag;
                let (dx, dy) = point.offset_from(center(self.size));
                let value = self.state.borrow_mut().begin_drag(dx, dy);
                log::debug!("Dial drag started at {}", value);
                let _ = sender.output(DialOutput::Changed(value));
                self.drawing_area.queue_draw();
            }
            DialMsg::Motion(point) => {
                let (dx, dy) = point.offset_from(center(self.size));
                let value = self.state.borrow_mut().drag_to(dx, dy);
                if let Some(value) = value {
                    let _ = sender.output(DialOutput::Changed(value));
                    self.drawing_area.queue_draw();
                }
            }
            DialMsg::Release(drag) => {
                self.grab.borrow_mut().release(drag);
                // A release from an earlier grab must not end a newer drag.
                if drag == self.drag_id {
                    log::debug!("Dial drag released");
                    self.state.borrow_mut().end_drag();
                }
            }
            DialMsg::SetValue(value) => {
                self.state.borrow_mut().set_value(value);
                self.drawing_area.queue_draw();
            }
            DialMsg::SetRange(range) => {
                self.state.borrow_mut().set_range(range);
                self.drawing_area.queue_draw();
            }
        }
    }

    fn shutdown(&mut self, _widgets: &mut Self::Widgets, _output: relm4::Sender<Self::Output>) {
        self.grab.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_cairo_angle_starts_at_twelve_oclock() {
        assert!((to_cairo_angle(0.0) + PI / 2.0).abs() < 1e-9);
        assert!(to_cairo_angle(90.0).abs() < 1e-9);
        assert!((to_cairo_angle(180.0) - PI / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_handle_sits_on_track_radius() {
        let dial = Dial::new(DialRange::default(), 20.0);
        let handle = handle_position(&dial, DEFAULT_SIZE);
        let r = handle.distance_to(center(DEFAULT_SIZE));
        assert!((r - DEFAULT_SIZE * RADIUS_RATIO).abs() < 1e-9);
        // 20 is the middle of 10..30, straight down.
        assert!((handle.x - DEFAULT_SIZE / 2.0).abs() < 1e-9);
        assert!(handle.y > DEFAULT_SIZE / 2.0);
    }
}

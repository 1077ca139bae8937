use crate::gui::anim::FrameTicker;
use crate::gui::draw;
use crate::gui::theme::ThemeColors;
use cairo::Context;
use deckwidgets::Point;
use deckwidgets::joystick::{DEFAULT_BASE_SIZE, Joystick};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct JoystickPad {
    state: Rc<RefCell<Joystick>>,
    drawing_area: gtk::DrawingArea,
    ticker: FrameTicker,
}

#[derive(Debug)]
pub enum JoystickMsg {
    DragBegin(Point),
    DragUpdate(f64, f64),
    DragEnd,
    Frame(f64),
}

#[derive(Debug)]
pub enum JoystickOutput {
    Moved(f64, f64),
}

impl JoystickPad {
    fn readout(&self) -> String {
        let (x, y) = self.state.borrow().readout();
        format!("X: {x} | Y: {y}")
    }
}

fn draw(cr: &Context, joystick: &Joystick, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let base = joystick.base_size();
    let c = Point::new(base / 2.0, base / 2.0);

    draw::set_color(cr, colors.track);
    draw::circle(cr, c, base / 2.0 - 1.0);
    cr.fill_preserve()?;
    draw::set_color(cr, colors.outline);
    cr.set_line_width(2.0);
    cr.stroke()?;

    // Crosshair
    draw::stroke_line(
        cr,
        Point::new(c.x - base / 2.0, c.y),
        Point::new(c.x + base / 2.0, c.y),
        1.0,
        colors.tick_minor,
    )?;
    draw::stroke_line(
        cr,
        Point::new(c.x, c.y - base / 2.0),
        Point::new(c.x, c.y + base / 2.0),
        1.0,
        colors.tick_minor,
    )?;
    draw::set_color(cr, colors.tick_major);
    draw::circle(cr, c, 4.0);
    cr.fill()?;

    let knob = joystick.knob_center();
    let radius = joystick.knob_size() / 2.0;
    draw::set_color(cr, colors.shadow);
    draw::circle(cr, Point::new(knob.x, knob.y + 3.0), radius);
    cr.fill()?;
    draw::set_color(cr, colors.knob);
    draw::circle(cr, knob, radius);
    cr.fill_preserve()?;
    draw::set_color(cr, colors.outline);
    cr.set_line_width(2.0);
    cr.stroke()?;

    // Four-way arrow glyph
    let arm = radius * 0.45;
    let head = arm * 0.35;
    for (dx, dy) in [(1.0, 0.0), (-1.0, 0.0), (0.0, 1.0), (0.0, -1.0)] {
        let tip = Point::new(knob.x + dx * arm, knob.y + dy * arm);
        draw::stroke_line(cr, knob, tip, 2.0, colors.progress)?;
        draw::stroke_line(
            cr,
            tip,
            Point::new(tip.x - dx * head + dy * head, tip.y - dy * head + dx * head),
            2.0,
            colors.progress,
        )?;
        draw::stroke_line(
            cr,
            tip,
            Point::new(tip.x - dx * head - dy * head, tip.y - dy * head - dx * head),
            2.0,
            colors.progress,
        )?;
    }

    Ok(())
}

#[relm4::component(pub)]
impl SimpleComponent for JoystickPad {
    type Init = f64;
    type Input = JoystickMsg;
    type Output = JoystickOutput;

    view! {
        #[root]
        gtk::Box {
            set_orientation: gtk::Orientation::Vertical,
            set_spacing: 16,
            set_halign: gtk::Align::Center,

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_content_width: model.state.borrow().base_size() as i32,
                set_content_height: model.state.borrow().base_size() as i32,
                set_halign: gtk::Align::Center,

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, x, y| {
                        sender.input(JoystickMsg::DragBegin(Point::new(x, y)));
                    },
                    connect_drag_update[sender] => move |_, dx, dy| {
                        sender.input(JoystickMsg::DragUpdate(dx, dy));
                    },
                    connect_drag_end[sender] => move |_, _, _| {
                        sender.input(JoystickMsg::DragEnd);
                    },
                },
            },

            gtk::Label {
                add_css_class: "deck-readout",
                set_halign: gtk::Align::Center,
                #[watch]
                set_label: &model.readout(),
            },
        }
    }

    fn init(
        base_size: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let base_size = if base_size > 0.0 {
            base_size
        } else {
            DEFAULT_BASE_SIZE
        };
        let model = JoystickPad {
            state: Rc::new(RefCell::new(Joystick::new(base_size))),
            drawing_area: gtk::DrawingArea::default(),
            ticker: FrameTicker::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let colors = ThemeColors::from_context(&drawing_area.style_context());
                if let Err(e) = draw(cr, &state_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            JoystickMsg::DragBegin(point) => {
                let mut state = self.state.borrow_mut();
                if state.hits_knob(point) {
                    self.ticker.stop();
                    state.begin_drag();
                }
            }
            JoystickMsg::DragUpdate(dx, dy) => {
                let moved = self.state.borrow_mut().drag_by(dx, dy);
                if let Some((x, y)) = moved {
                    let _ = sender.output(JoystickOutput::Moved(x, y));
                    self.drawing_area.queue_draw();
                }
            }
            JoystickMsg::DragEnd => {
                let released = self.state.borrow_mut().end_drag();
                if let Some((x, y)) = released {
                    log::debug!("Joystick released, returning to center");
                    let _ = sender.output(JoystickOutput::Moved(x, y));
                    let frame_sender = sender.clone();
                    self.ticker.start(&self.drawing_area, move |dt| {
                        frame_sender.input(JoystickMsg::Frame(dt));
                    });
                }
            }
            JoystickMsg::Frame(dt) => {
                if !self.state.borrow_mut().tick(dt) {
                    self.ticker.stop();
                }
                self.drawing_area.queue_draw();
            }
        }
    }

    fn shutdown(&mut self, _widgets: &mut Self::Widgets, _output: relm4::Sender<Self::Output>) {
        self.ticker.stop();
    }
}

use crate::gui::anim::FrameTicker;
use crate::gui::draw;
use crate::gui::theme::ThemeColors;
use cairo::Context;
use deckwidgets::Point;
use deckwidgets::swipe::{DEFAULT_TRACK_WIDTH, SwipeOutcome, SwipeSlider, THUMB_SIZE, TRACK_HEIGHT};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub const DEFAULT_PROMPT: &str = "slide to unlock";
pub const DEFAULT_SUCCESS: &str = "unlocked";

#[derive(Debug, Clone)]
pub struct SwipeTexts {
    pub prompt: String,
    pub success: String,
}

impl Default for SwipeTexts {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            success: DEFAULT_SUCCESS.to_string(),
        }
    }
}

pub struct SwipeControl {
    state: Rc<RefCell<SwipeSlider>>,
    texts: Rc<RefCell<SwipeTexts>>,
    drawing_area: gtk::DrawingArea,
    ticker: FrameTicker,
    hide_timer: Rc<RefCell<Option<glib::SourceId>>>,
}

#[derive(Debug)]
pub enum SwipeMsg {
    DragBegin(f64),
    DragUpdate(f64),
    DragEnd,
    ClickTrack,
    HideSuccess,
    Frame(f64),
    SetTexts(SwipeTexts),
}

#[derive(Debug)]
pub enum SwipeOutput {
    Completed,
}

impl SwipeControl {
    fn animate(&mut self, sender: &ComponentSender<Self>) {
        let frame_sender = sender.clone();
        self.ticker.start(&self.drawing_area, move |dt| {
            frame_sender.input(SwipeMsg::Frame(dt));
        });
    }

    fn cancel_hide_timer(&self) {
        if let Some(id) = self.hide_timer.borrow_mut().take() {
            id.remove();
        }
    }
}

fn draw(
    cr: &Context,
    slider: &SwipeSlider,
    texts: &SwipeTexts,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let w = slider.track_width();
    let h = TRACK_HEIGHT;
    let v = slider.visuals();

    draw::rounded_rect(cr, 0.0, 0.0, w, h, h / 2.0);
    draw::set_color(cr, colors.track);
    cr.fill_preserve()?;
    draw::set_color(cr, draw::faded(colors.fill, v.track));
    cr.fill_preserve()?;
    draw::set_color(cr, colors.outline);
    cr.set_line_width(1.0);
    cr.stroke()?;

    draw::centered_text(
        cr,
        &texts.prompt.to_uppercase(),
        Point::new(w / 2.0 + 14.0, h / 2.0),
        13.0,
        true,
        draw::faded(colors.text, v.prompt),
    )?;
    if slider.shows_success() {
        draw::centered_text(
            cr,
            &texts.success.to_uppercase(),
            Point::new(w / 2.0, h / 2.0),
            13.0,
            true,
            draw::faded(colors.success, v.success),
        )?;
    }

    let thumb = Point::new(slider.thumb_x() + THUMB_SIZE / 2.0, h / 2.0);
    let radius = THUMB_SIZE / 2.0 - 3.0;
    draw::circle(cr, thumb, radius);
    draw::set_color(cr, draw::faded(colors.knob, v.thumb));
    cr.fill_preserve()?;
    draw::set_color(cr, draw::faded(colors.outline, v.thumb));
    cr.set_line_width(1.0);
    cr.stroke()?;

    if v.arrow > 0.0 {
        let color = draw::faded(colors.text, v.arrow);
        let tip = Point::new(thumb.x + 8.0, thumb.y);
        draw::stroke_line(cr, Point::new(thumb.x - 8.0, thumb.y), tip, 2.5, color)?;
        draw::stroke_line(cr, tip, Point::new(tip.x - 6.0, tip.y - 6.0), 2.5, color)?;
        draw::stroke_line(cr, tip, Point::new(tip.x - 6.0, tip.y + 6.0), 2.5, color)?;
    }
    if v.check > 0.0 {
        let color = draw::faded(colors.success, v.check);
        let corner = Point::new(thumb.x - 2.0, thumb.y + 6.0);
        draw::stroke_line(cr, Point::new(thumb.x - 8.0, thumb.y), corner, 3.0, color)?;
        draw::stroke_line(cr, corner, Point::new(thumb.x + 9.0, thumb.y - 7.0), 3.0, color)?;
    }

    Ok(())
}

#[relm4::component(pub)]
impl SimpleComponent for SwipeControl {
    type Init = (f64, SwipeTexts);
    type Input = SwipeMsg;
    type Output = SwipeOutput;

    view! {
        #[root]
        gtk::Box {
            set_halign: gtk::Align::Start,
            set_valign: gtk::Align::Center,

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_content_width: model.state.borrow().track_width() as i32,
                set_content_height: TRACK_HEIGHT as i32,

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, x, _| {
                        sender.input(SwipeMsg::DragBegin(x));
                    },
                    connect_drag_update[sender] => move |_, dx, _| {
                        sender.input(SwipeMsg::DragUpdate(dx));
                    },
                    connect_drag_end[sender] => move |_, _, _| {
                        sender.input(SwipeMsg::DragEnd);
                    },
                },

                add_controller = gtk::GestureClick {
                    connect_released[sender] => move |_, _, _, _| {
                        sender.input(SwipeMsg::ClickTrack);
                    }
                },
            }
        }
    }

    fn init(
        (width, texts): Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let width = if width > THUMB_SIZE {
            width
        } else {
            DEFAULT_TRACK_WIDTH
        };
        let model = SwipeControl {
            state: Rc::new(RefCell::new(SwipeSlider::new(width))),
            texts: Rc::new(RefCell::new(texts)),
            drawing_area: gtk::DrawingArea::default(),
            ticker: FrameTicker::default(),
            hide_timer: Rc::new(RefCell::new(None)),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        let texts_draw = model.texts.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let colors = ThemeColors::from_context(&drawing_area.style_context());
                if let Err(e) = draw(cr, &state_draw.borrow(), &texts_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            SwipeMsg::DragBegin(x) => {
                let mut state = self.state.borrow_mut();
                if state.hits_thumb(x) && state.begin_drag() {
                    self.ticker.stop();
                }
            }
            SwipeMsg::DragUpdate(dx) => {
                self.state.borrow_mut().drag_by(dx);
                self.drawing_area.queue_draw();
            }
            SwipeMsg::DragEnd => {
                let outcome = self.state.borrow_mut().end_drag();
                log::debug!("Swipe released: {:?}", outcome);
                match outcome {
                    SwipeOutcome::Completed => {
                        self.cancel_hide_timer();
                        let _ = sender.output(SwipeOutput::Completed);
                        self.animate(&sender);
                    }
                    SwipeOutcome::Returned => self.animate(&sender),
                    SwipeOutcome::Ignored => {}
                }
            }
            SwipeMsg::ClickTrack => {
                let delay = self.state.borrow_mut().click_track();
                if let Some(delay) = delay {
                    self.cancel_hide_timer();
                    let slot = self.hide_timer.clone();
                    let timer_sender = sender.clone();
                    let id = glib::timeout_add_local_once(delay, move || {
                        slot.borrow_mut().take();
                        timer_sender.input(SwipeMsg::HideSuccess);
                    });
                    *self.hide_timer.borrow_mut() = Some(id);
                    self.animate(&sender);
                }
            }
            SwipeMsg::HideSuccess => {
                self.state.borrow_mut().hide_success();
                self.drawing_area.queue_draw();
            }
            SwipeMsg::Frame(dt) => {
                if !self.state.borrow_mut().tick(dt) {
                    self.ticker.stop();
                }
                self.drawing_area.queue_draw();
            }
            SwipeMsg::SetTexts(texts) => {
                *self.texts.borrow_mut() = texts;
                self.drawing_area.queue_draw();
            }
        }
    }

    fn shutdown(&mut self, _widgets: &mut Self::Widgets, _output: relm4::Sender<Self::Output>) {
        self.cancel_hide_timer();
        self.ticker.stop();
    }
}

use crate::gui::draw;
use crate::gui::theme::ThemeColors;
use cairo::Context;
use deckwidgets::volume::{DEFAULT_TRACK_HEIGHT, THUMB_HEIGHT, TRACK_WIDTH, VolumeSlider};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

const TRACK_RADIUS: f64 = 32.0;
const THUMB_INSET: f64 = 6.0;

pub struct VolumeControl {
    state: Rc<RefCell<VolumeSlider>>,
    drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum VolumeMsg {
    DragBegin(f64),
    DragUpdate(f64),
    DragEnd,
    ToggleStarted,
    SetVolume(f64),
}

#[derive(Debug)]
pub enum VolumeOutput {
    VolumeChanged(f64),
    StartedToggled(bool),
}

impl VolumeControl {
    fn volume_icon(&self) -> &'static str {
        if self.state.borrow().is_muted() {
            "audio-volume-muted-symbolic"
        } else {
            "audio-volume-high-symbolic"
        }
    }

    fn toggle_icon(&self) -> &'static str {
        if self.state.borrow().is_started() {
            "media-playback-stop-symbolic"
        } else {
            "media-playback-start-symbolic"
        }
    }

    fn toggle_classes(&self) -> [&'static str; 2] {
        if self.state.borrow().is_started() {
            ["deck-round", "deck-on"]
        } else {
            ["deck-round", "deck-off"]
        }
    }
}

fn draw(cr: &Context, slider: &VolumeSlider, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let h = slider.track_height();

    draw::rounded_rect(cr, 0.0, 0.0, TRACK_WIDTH, h, TRACK_RADIUS);
    draw::set_color(cr, colors.track);
    cr.fill_preserve()?;
    draw::set_color(cr, colors.outline);
    cr.set_line_width(1.0);
    cr.stroke()?;

    // Fill grows from the bottom, clipped to the track shape.
    cr.save()?;
    draw::rounded_rect(cr, 0.0, 0.0, TRACK_WIDTH, h, TRACK_RADIUS);
    cr.clip();
    let fill_top = slider.thumb_y() + THUMB_HEIGHT / 2.0;
    cr.rectangle(0.0, fill_top, TRACK_WIDTH, h - fill_top);
    draw::set_color(cr, colors.fill);
    cr.fill()?;
    cr.restore()?;

    draw::rounded_rect(
        cr,
        THUMB_INSET,
        slider.thumb_y(),
        TRACK_WIDTH - 2.0 * THUMB_INSET,
        THUMB_HEIGHT,
        THUMB_HEIGHT / 2.0,
    );
    draw::set_color(cr, colors.handle);
    cr.fill()?;

    Ok(())
}

#[relm4::component(pub)]
impl SimpleComponent for VolumeControl {
    type Init = f64;
    type Input = VolumeMsg;
    type Output = VolumeOutput;

    view! {
        #[root]
        gtk::Box {
            set_orientation: gtk::Orientation::Vertical,
            set_spacing: 12,
            set_halign: gtk::Align::Center,

            gtk::Box {
                set_spacing: 6,
                set_halign: gtk::Align::Center,

                gtk::Image {
                    #[watch]
                    set_icon_name: Some(model.volume_icon()),
                },
                gtk::Label {
                    add_css_class: "deck-label",
                    #[watch]
                    set_label: &format!("{}%", model.state.borrow().percent()),
                },
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_content_width: TRACK_WIDTH as i32,
                set_content_height: model.state.borrow().track_height() as i32,
                set_halign: gtk::Align::Center,

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, _, y| {
                        sender.input(VolumeMsg::DragBegin(y));
                    },
                    connect_drag_update[sender] => move |_, _, dy| {
                        sender.input(VolumeMsg::DragUpdate(dy));
                    },
                    connect_drag_end[sender] => move |_, _, _| {
                        sender.input(VolumeMsg::DragEnd);
                    },
                },
            },

            gtk::Button {
                set_halign: gtk::Align::Center,
                #[watch]
                set_icon_name: model.toggle_icon(),
                #[watch]
                set_css_classes: &model.toggle_classes(),
                connect_clicked => VolumeMsg::ToggleStarted,
            },
        }
    }

    fn init(
        track_height: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let track_height = if track_height > THUMB_HEIGHT {
            track_height
        } else {
            DEFAULT_TRACK_HEIGHT
        };
        let model = VolumeControl {
            state: Rc::new(RefCell::new(VolumeSlider::new(track_height))),
            drawing_area: gtk::DrawingArea::default(),
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
            VolumeMsg::DragBegin(y) => {
                let mut state = self.state.borrow_mut();
                if state.hits_thumb(y) {
                    state.begin_drag();
                }
            }
            VolumeMsg::DragUpdate(dy) => {
                let volume = self.state.borrow_mut().drag_by(dy);
                if let Some(volume) = volume {
                    let _ = sender.output(VolumeOutput::VolumeChanged(volume));
                    self.drawing_area.queue_draw();
                }
            }
            VolumeMsg::DragEnd => self.state.borrow_mut().end_drag(),
            VolumeMsg::ToggleStarted => {
                let started = self.state.borrow_mut().toggle_started();
                let _ = sender.output(VolumeOutput::StartedToggled(started));
            }
            VolumeMsg::SetVolume(volume) => {
                self.state.borrow_mut().set_volume(volume);
                self.drawing_area.queue_draw();
            }
        }
    }
}

use crate::config::CameraConfig;
use crate::gui::cards::CardHeader;
use crate::gui::widgets::feed::{FeedMsg, FeedViewer};
use crate::gui::widgets::joystick::{JoystickOutput, JoystickPad};
use crate::gui::widgets::power::{PowerButton, PowerOutput};
use crate::gui::widgets::stepper::{StepperOutput, ZoomStepper};
use crate::gui::widgets::swipe::{SwipeControl, SwipeMsg, SwipeOutput, SwipeTexts};
use deckwidgets::joystick::DEFAULT_BASE_SIZE;
use deckwidgets::swipe::DEFAULT_TRACK_WIDTH;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;

const INITIAL_ZOOM: i32 = 50;

pub struct CameraCard {
    header: CardHeader,
    feed: Controller<FeedViewer>,
    power: Controller<PowerButton>,
    swipe: Controller<SwipeControl>,
    joystick: Controller<JoystickPad>,
    zoom: Controller<ZoomStepper>,
    camera_on: bool,
    has_feed: bool,
}

#[derive(Debug)]
pub enum CameraMsg {
    Reconfigure(CameraConfig),
    Power(bool),
    Swiped,
    Position(f64, f64),
    Zoom(i32),
}

fn swipe_texts(config: &CameraConfig) -> SwipeTexts {
    let defaults = SwipeTexts::default();
    SwipeTexts {
        prompt: config.swipe_prompt.clone().unwrap_or(defaults.prompt),
        success: config.swipe_success.clone().unwrap_or(defaults.success),
    }
}

impl CameraCard {
    fn badge_classes(&self) -> [&'static str; 2] {
        if self.camera_on {
            ["deck-badge", "deck-on"]
        } else {
            ["deck-badge", "deck-off"]
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for CameraCard {
    type Init = CameraConfig;
    type Input = CameraMsg;
    type Output = ();

    view! {
        #[root]
        gtk::Box {
            set_orientation: gtk::Orientation::Vertical,
            set_spacing: 16,
            set_hexpand: true,
            add_css_class: "deck-card",

            append: &model.header.root,

            #[local_ref]
            feed_widget -> gtk::Video {
                #[watch]
                set_visible: model.has_feed,
            },

            // Remote d-pad; the arrows are not wired to anything yet.
            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 8,
                set_halign: gtk::Align::Center,
                set_valign: gtk::Align::Center,
                set_vexpand: true,

                gtk::Button {
                    set_icon_name: "go-up-symbolic",
                    set_halign: gtk::Align::Center,
                    add_css_class: "deck-round",
                    add_css_class: "deck-dpad-button",
                },
                gtk::Box {
                    set_spacing: 8,
                    set_halign: gtk::Align::Center,

                    gtk::Button {
                        set_icon_name: "go-previous-symbolic",
                        add_css_class: "deck-round",
                        add_css_class: "deck-dpad-button",
                    },
                    append: model.power.widget(),
                    gtk::Button {
                        set_icon_name: "go-next-symbolic",
                        add_css_class: "deck-round",
                        add_css_class: "deck-dpad-button",
                    },
                },
                gtk::Button {
                    set_icon_name: "go-down-symbolic",
                    set_halign: gtk::Align::Center,
                    add_css_class: "deck-round",
                    add_css_class: "deck-dpad-button",
                },
            },

            gtk::Box {
                set_spacing: 12,

                append: model.swipe.widget(),

                gtk::Label {
                    set_valign: gtk::Align::Center,
                    #[watch]
                    set_label: if model.camera_on { "ON" } else { "OFF" },
                    #[watch]
                    set_css_classes: &model.badge_classes(),
                },

                gtk::MenuButton {
                    set_hexpand: true,
                    set_halign: gtk::Align::End,
                    set_valign: gtk::Align::Center,
                    set_icon_name: "emblem-system-symbolic",
                    set_tooltip_text: Some("Camera settings"),
                    add_css_class: "deck-round",
                    add_css_class: "deck-dpad-button",

                    #[wrap(Some)]
                    set_popover = &gtk::Popover {
                        #[wrap(Some)]
                        set_child = &gtk::Box {
                            set_orientation: gtk::Orientation::Vertical,
                            set_spacing: 12,
                            set_margin_all: 16,

                            gtk::Label {
                                set_label: "Control Camera Position",
                                set_halign: gtk::Align::Start,
                            },
                            gtk::Label {
                                set_label: "Move the joystick to adjust the camera direction",
                                set_halign: gtk::Align::Start,
                                add_css_class: "dim-label",
                            },
                            append: model.joystick.widget(),

                            gtk::Separator {},

                            gtk::Label {
                                set_label: "Control Camera Zoom Level",
                                set_halign: gtk::Align::Start,
                            },
                            append: model.zoom.widget(),
                        },
                    },
                },
            },
        }
    }

    fn init(
        config: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let feed = FeedViewer::builder()
            .launch(config.stream_url.clone())
            .detach();
        let power = PowerButton::builder()
            .launch(false)
            .forward(sender.input_sender(), |msg| match msg {
                PowerOutput::Toggled(on) => CameraMsg::Power(on),
            });
        let swipe = SwipeControl::builder()
            .launch((DEFAULT_TRACK_WIDTH, swipe_texts(&config)))
            .forward(sender.input_sender(), |msg| match msg {
                SwipeOutput::Completed => CameraMsg::Swiped,
            });
        let joystick = JoystickPad::builder()
            .launch(DEFAULT_BASE_SIZE)
            .forward(sender.input_sender(), |msg| match msg {
                JoystickOutput::Moved(x, y) => CameraMsg::Position(x, y),
            });
        let zoom = ZoomStepper::builder()
            .launch(INITIAL_ZOOM)
            .forward(sender.input_sender(), |msg| match msg {
                StepperOutput::Changed(value) => CameraMsg::Zoom(value),
            });

        let model = CameraCard {
            header: CardHeader::new(&config.card),
            feed,
            power,
            swipe,
            joystick,
            zoom,
            camera_on: false,
            has_feed: config.stream_url.is_some(),
        };

        let feed_widget = model.feed.widget();
        let widgets = view_output!();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            CameraMsg::Reconfigure(config) => {
                self.header.apply(&config.card);
                self.has_feed = config.stream_url.is_some();
                self.feed.emit(FeedMsg::Load(config.stream_url.clone()));
                self.swipe.emit(SwipeMsg::SetTexts(swipe_texts(&config)));
            }
            CameraMsg::Power(on) => {
                log::info!("Camera power {}", if on { "on" } else { "off" });
            }
            CameraMsg::Swiped => {
                self.camera_on = !self.camera_on;
                log::info!("Camera {}", if self.camera_on { "shown" } else { "hidden" });
            }
            CameraMsg::Position(x, y) => {
                log::info!("Camera position: x={:.2}, y={:.2}", x, y);
            }
            CameraMsg::Zoom(level) => {
                log::info!("Camera zoom: {}%", level);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swipe_texts_fall_back_to_defaults() {
        let texts = swipe_texts(&CameraConfig::default());
        assert_eq!(texts.prompt, "slide to unlock");
        assert_eq!(texts.success, "unlocked");

        let config = CameraConfig {
            swipe_prompt: Some("slide to show".to_string()),
            ..CameraConfig::default()
        };
        let texts = swipe_texts(&config);
        assert_eq!(texts.prompt, "slide to show");
        assert_eq!(texts.success, "unlocked");
    }
}

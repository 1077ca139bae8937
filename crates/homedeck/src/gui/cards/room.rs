use crate::config::RoomConfig;
use crate::gui::cards::CardHeader;
use crate::gui::widgets::dial::{CircularDial, DEFAULT_SIZE, DialInit, DialMsg, DialOutput};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;

pub struct RoomCard {
    header: CardHeader,
    dial: Controller<CircularDial>,
    initial: f64,
}

#[derive(Debug)]
pub enum RoomMsg {
    Reconfigure(RoomConfig),
    Temperature(f64),
}

#[relm4::component(pub)]
impl SimpleComponent for RoomCard {
    type Init = RoomConfig;
    type Input = RoomMsg;
    type Output = ();

    view! {
        #[root]
        gtk::Box {
            set_orientation: gtk::Orientation::Vertical,
            set_spacing: 16,
            set_hexpand: true,
            add_css_class: "deck-card",

            append: &model.header.root,

            gtk::Box {
                set_vexpand: true,
                set_valign: gtk::Align::Center,
                set_halign: gtk::Align::Center,

                append: model.dial.widget(),
            },
        }
    }

    fn init(
        config: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let dial = CircularDial::builder()
            .launch(DialInit {
                range: config.range(),
                initial: config.initial,
                size: DEFAULT_SIZE,
                ..DialInit::default()
            })
            .forward(sender.input_sender(), |msg| match msg {
                DialOutput::Changed(value) => RoomMsg::Temperature(value),
            });

        let model = RoomCard {
            header: CardHeader::new(&config.card),
            dial,
            initial: config.initial,
        };
        let widgets = view_output!();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            RoomMsg::Reconfigure(config) => {
                self.header.apply(&config.card);
                self.dial.emit(DialMsg::SetRange(config.range()));
                if config.initial != self.initial {
                    self.dial.emit(DialMsg::SetValue(config.initial));
                    self.initial = config.initial;
                }
            }
            RoomMsg::Temperature(value) => log::info!("Room temperature: {}°", value),
        }
    }
}

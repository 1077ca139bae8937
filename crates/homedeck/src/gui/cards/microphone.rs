use crate::config::CardConfig;
use crate::gui::cards::CardHeader;
use crate::gui::widgets::power::{PowerButton, PowerOutput};
use crate::gui::widgets::volume::{VolumeControl, VolumeOutput};
use deckwidgets::volume::DEFAULT_TRACK_HEIGHT;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;

pub struct MicrophoneCard {
    header: CardHeader,
    power: Controller<PowerButton>,
    volume: Controller<VolumeControl>,
}

#[derive(Debug)]
pub enum MicrophoneMsg {
    Reconfigure(CardConfig),
    Power(bool),
    Volume(f64),
    Started(bool),
}

#[relm4::component(pub)]
impl SimpleComponent for MicrophoneCard {
    type Init = CardConfig;
    type Input = MicrophoneMsg;
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
                set_spacing: 32,
                set_halign: gtk::Align::Center,
                set_valign: gtk::Align::Center,
                set_vexpand: true,

                append: model.power.widget(),
                append: model.volume.widget(),
            },
        }
    }

    fn init(
        config: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let power = PowerButton::builder()
            .launch(false)
            .forward(sender.input_sender(), |msg| match msg {
                PowerOutput::Toggled(on) => MicrophoneMsg::Power(on),
            });
        let volume = VolumeControl::builder()
            .launch(DEFAULT_TRACK_HEIGHT)
            .forward(sender.input_sender(), |msg| match msg {
                VolumeOutput::VolumeChanged(v) => MicrophoneMsg::Volume(v),
                VolumeOutput::StartedToggled(started) => MicrophoneMsg::Started(started),
            });

        let model = MicrophoneCard {
            header: CardHeader::new(&config),
            power,
            volume,
        };
        let widgets = view_output!();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            MicrophoneMsg::Reconfigure(config) => self.header.apply(&config),
            MicrophoneMsg::Power(on) => {
                log::info!("Microphone power {}", if on { "on" } else { "off" });
            }
            MicrophoneMsg::Volume(v) => log::info!("Microphone volume: {:.2}", v),
            MicrophoneMsg::Started(started) => {
                log::info!(
                    "Microphone {}",
                    if started { "started" } else { "stopped" }
                );
            }
        }
    }
}

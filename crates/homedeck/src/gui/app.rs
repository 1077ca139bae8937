use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::cards::camera::{CameraCard, CameraMsg};
use crate::gui::cards::microphone::{MicrophoneCard, MicrophoneMsg};
use crate::gui::cards::projector::{ProjectorCard, ProjectorMsg};
use crate::gui::cards::room::{RoomCard, RoomMsg};
use crate::gui::theme;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::path::PathBuf;

pub struct AppModel {
    config_path: PathBuf,
    camera: Controller<CameraCard>,
    microphone: Controller<MicrophoneCard>,
    projector: Controller<ProjectorCard>,
    room: Controller<RoomCard>,
}

#[derive(Debug)]
pub enum AppMsg {
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn apply(&self, config: Config) {
        self.camera.emit(CameraMsg::Reconfigure(config.camera));
        self.microphone
            .emit(MicrophoneMsg::Reconfigure(config.microphone));
        self.projector
            .emit(ProjectorMsg::Reconfigure(config.projector));
        self.room.emit(RoomMsg::Reconfigure(config.room));
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, PathBuf, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Home Deck"),
            set_default_size: (1440, 900),
            add_css_class: "deck-window",

            gtk::ScrolledWindow {
                set_hscrollbar_policy: gtk::PolicyType::Automatic,

                gtk::Box {
                    set_spacing: 32,
                    set_margin_all: 24,
                    set_homogeneous: true,

                    append: model.camera.widget(),
                    append: model.microphone.widget(),
                    append: model.projector.widget(),
                    append: model.room.widget(),
                },
            },
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, config_path, rx) = init;

        theme::load_css();

        let model = AppModel {
            config_path,
            camera: CameraCard::builder().launch(config.camera).detach(),
            microphone: MicrophoneCard::builder()
                .launch(config.microphone)
                .detach(),
            projector: ProjectorCard::builder().launch(config.projector).detach(),
            room: RoomCard::builder().launch(config.room).detach(),
        };

        let widgets = view_output!();

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::ConfigReload => match config::load_config(&self.config_path) {
                Ok(new_config) => {
                    self.apply(new_config);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

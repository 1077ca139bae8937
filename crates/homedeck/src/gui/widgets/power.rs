use deckwidgets::power::PowerSwitch;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;

pub struct PowerButton {
    switch: PowerSwitch,
}

#[derive(Debug)]
pub enum PowerMsg {
    Toggle,
}

#[derive(Debug)]
pub enum PowerOutput {
    Toggled(bool),
}

impl PowerButton {
    fn css_classes(&self) -> [&'static str; 2] {
        if self.switch.is_on() {
            ["deck-round", "deck-on"]
        } else {
            ["deck-round", "deck-off"]
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for PowerButton {
    type Init = bool;
    type Input = PowerMsg;
    type Output = PowerOutput;

    view! {
        #[root]
        gtk::Button {
            set_halign: gtk::Align::Center,
            set_valign: gtk::Align::Center,
            set_tooltip_text: Some("Power"),
            #[watch]
            set_icon_name: model.switch.icon_name(),
            #[watch]
            set_css_classes: &model.css_classes(),
            connect_clicked => PowerMsg::Toggle,
        }
    }

    fn init(
        on: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let model = PowerButton {
            switch: PowerSwitch::new(on),
        };
        let widgets = view_output!();
        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            PowerMsg::Toggle => {
                let on = self.switch.toggle();
                let _ = sender.output(PowerOutput::Toggled(on));
            }
        }
    }
}

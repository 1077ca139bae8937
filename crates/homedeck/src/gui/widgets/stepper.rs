use deckwidgets::stepper::Stepper;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;

pub struct ZoomStepper {
    stepper: Stepper,
}

#[derive(Debug)]
pub enum StepperMsg {
    Increment,
    Decrement,
}

#[derive(Debug)]
pub enum StepperOutput {
    Changed(i32),
}

#[relm4::component(pub)]
impl SimpleComponent for ZoomStepper {
    type Init = i32;
    type Input = StepperMsg;
    type Output = StepperOutput;

    view! {
        #[root]
        gtk::Box {
            set_spacing: 16,
            set_halign: gtk::Align::Center,

            gtk::Button {
                set_icon_name: "list-remove-symbolic",
                add_css_class: "deck-round",
                add_css_class: "deck-dpad-button",
                #[watch]
                set_sensitive: model.stepper.can_decrement(),
                connect_clicked => StepperMsg::Decrement,
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_valign: gtk::Align::Center,

                gtk::Label {
                    add_css_class: "deck-zoom",
                    #[watch]
                    set_label: &format!("{}%", model.stepper.value()),
                },
                gtk::Label {
                    add_css_class: "deck-caption",
                    set_label: "Zoom",
                },
            },

            gtk::Button {
                set_icon_name: "list-add-symbolic",
                add_css_class: "deck-round",
                add_css_class: "deck-dpad-button",
                #[watch]
                set_sensitive: model.stepper.can_increment(),
                connect_clicked => StepperMsg::Increment,
            },
        }
    }

    fn init(
        initial: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let model = ZoomStepper {
            stepper: Stepper::percentage(initial),
        };
        let widgets = view_output!();
        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        let changed = match msg {
            StepperMsg::Increment => self.stepper.increment(),
            StepperMsg::Decrement => self.stepper.decrement(),
        };
        if let Some(value) = changed {
            let _ = sender.output(StepperOutput::Changed(value));
        }
    }
}

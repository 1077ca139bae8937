use crate::config::ProjectorConfig;
use crate::gui::cards::CardHeader;
use crate::gui::widgets::power::{PowerButton, PowerOutput};
use crate::gui::widgets::select::{
    MultiSelectDropdown, SelectEntry, SelectInit, SelectMsg, SelectOutput,
};
use deckwidgets::select::OptionValue;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;

const PLACEHOLDER: &str = "Select sources";

pub struct ProjectorCard {
    header: CardHeader,
    select: Controller<MultiSelectDropdown>,
    power: Controller<PowerButton>,
    seeded: Vec<OptionValue>,
}

#[derive(Debug)]
pub enum ProjectorMsg {
    Reconfigure(ProjectorConfig),
    Sources(Vec<OptionValue>),
    Power(bool),
}

fn entries(config: &ProjectorConfig) -> Vec<SelectEntry> {
    config
        .options()
        .into_iter()
        .map(|option| SelectEntry {
            icon: Some(config.icon_for(&option.value).icon_name().to_string()),
            option,
        })
        .collect()
}

#[relm4::component(pub)]
impl SimpleComponent for ProjectorCard {
    type Init = ProjectorConfig;
    type Input = ProjectorMsg;
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
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 8,
                set_vexpand: true,
                set_valign: gtk::Align::Center,

                gtk::Label {
                    set_label: "Select a source device",
                    set_halign: gtk::Align::Start,
                    add_css_class: "deck-label",
                },
                append: model.select.widget(),
            },

            append: model.power.widget(),
        }
    }

    fn init(
        config: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let select = MultiSelectDropdown::builder()
            .launch(SelectInit {
                entries: entries(&config),
                selected: config.selected.clone(),
                placeholder: PLACEHOLDER.to_string(),
            })
            .forward(sender.input_sender(), |msg| match msg {
                SelectOutput::SelectionChanged(values) => ProjectorMsg::Sources(values),
            });
        let power = PowerButton::builder()
            .launch(false)
            .forward(sender.input_sender(), |msg| match msg {
                PowerOutput::Toggled(on) => ProjectorMsg::Power(on),
            });

        let model = ProjectorCard {
            header: CardHeader::new(&config.card),
            select,
            power,
            seeded: config.selected,
        };
        let widgets = view_output!();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            ProjectorMsg::Reconfigure(config) => {
                self.header.apply(&config.card);
                self.select.emit(SelectMsg::SetOptions(entries(&config)));
                // Only a changed seed overrides what the user picked since.
                if config.selected != self.seeded {
                    self.select.emit(SelectMsg::SetSelected(config.selected.clone()));
                    self.seeded = config.selected;
                }
            }
            ProjectorMsg::Sources(values) => {
                let names: Vec<&str> = values.iter().map(|v| v.as_str()).collect();
                log::info!("Projector sources: [{}]", names.join(", "));
            }
            ProjectorMsg::Power(on) => {
                log::info!("Projector power {}", if on { "on" } else { "off" });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SourceConfig, SourceIcon};

    #[test]
    fn test_entries_carry_source_icons() {
        let config = ProjectorConfig {
            sources: vec![
                SourceConfig {
                    value: OptionValue::new("laptop"),
                    label: "Laptop".to_string(),
                    icon: SourceIcon::Laptop,
                },
                SourceConfig {
                    value: OptionValue::new("hdmi2"),
                    label: "HDMI 2".to_string(),
                    icon: SourceIcon::default(),
                },
            ],
            ..ProjectorConfig::default()
        };
        let entries = entries(&config);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].option.label, "Laptop");
        assert_eq!(entries[0].icon.as_deref(), Some("computer-symbolic"));
        assert_eq!(entries[1].icon.as_deref(), Some("input-dialpad-symbolic"));
    }
}

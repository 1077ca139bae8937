use deckwidgets::select::{MultiSelect, OptionValue, SelectOption};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;

const LIST_MAX_HEIGHT: i32 = 250;

/// An option plus the icon shown next to it in the list.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectEntry {
    pub option: SelectOption,
    pub icon: Option<String>,
}

pub struct SelectInit {
    pub entries: Vec<SelectEntry>,
    pub selected: Vec<OptionValue>,
    pub placeholder: String,
}

pub struct MultiSelectDropdown {
    state: MultiSelect,
    entries: Vec<SelectEntry>,
    placeholder: String,
    header: gtk::Box,
    chips: gtk::Box,
    list: gtk::Box,
    popover: gtk::Popover,
}

#[derive(Debug)]
pub enum SelectMsg {
    ToggleOpen,
    Dismissed,
    ToggleOption(OptionValue),
    Remove(OptionValue),
    SetSelected(Vec<OptionValue>),
    SetOptions(Vec<SelectEntry>),
    SetDisabled(bool),
}

#[derive(Debug)]
pub enum SelectOutput {
    SelectionChanged(Vec<OptionValue>),
}

impl MultiSelectDropdown {
    fn header_classes(&self) -> Vec<&'static str> {
        if self.state.is_open() {
            vec!["deck-select", "open"]
        } else {
            vec!["deck-select"]
        }
    }

    fn refresh_chips(&self, sender: &ComponentSender<Self>) {
        while let Some(child) = self.chips.first_child() {
            self.chips.remove(&child);
        }

        let chips = self.state.chips();
        if chips.is_empty() {
            let placeholder = gtk::Label::new(Some(&self.placeholder));
            placeholder.add_css_class("deck-placeholder");
            placeholder.set_halign(gtk::Align::Start);
            self.chips.append(&placeholder);
            return;
        }

        for chip in chips {
            let row = gtk::Box::new(gtk::Orientation::Horizontal, 4);
            row.add_css_class("deck-chip");
            row.append(&gtk::Label::new(Some(&chip.label)));

            let remove = gtk::Button::from_icon_name("window-close-symbolic");
            remove.add_css_class("flat");
            remove.set_tooltip_text(Some(&format!("Remove {}", chip.label)));
            let remove_sender = sender.clone();
            let value = chip.value.clone();
            remove.connect_clicked(move |_| {
                remove_sender.input(SelectMsg::Remove(value.clone()));
            });
            row.append(&remove);

            self.chips.append(&row);
        }
    }

    fn refresh_list(&self, sender: &ComponentSender<Self>) {
        while let Some(child) = self.list.first_child() {
            self.list.remove(&child);
        }

        for entry in &self.entries {
            let row = gtk::Box::new(gtk::Orientation::Horizontal, 12);
            if let Some(icon) = &entry.icon {
                row.append(&gtk::Image::from_icon_name(icon));
            }
            let label = gtk::Label::new(Some(&entry.option.label));
            label.set_hexpand(true);
            label.set_halign(gtk::Align::Start);
            row.append(&label);
            let check = gtk::Image::from_icon_name("object-select-symbolic");
            check.set_visible(self.state.is_selected(&entry.option.value));
            row.append(&check);

            let button = gtk::Button::new();
            button.add_css_class("flat");
            button.set_child(Some(&row));
            let option_sender = sender.clone();
            let value = entry.option.value.clone();
            button.connect_clicked(move |_| {
                option_sender.input(SelectMsg::ToggleOption(value.clone()));
            });
            self.list.append(&button);
        }
    }

    fn refresh(&self, sender: &ComponentSender<Self>) {
        self.refresh_chips(sender);
        self.refresh_list(sender);
    }

    fn sync_popover(&self) {
        if self.state.is_open() {
            self.popover.set_size_request(self.header.width(), -1);
            self.popover.popup();
        } else if self.popover.is_visible() {
            self.popover.popdown();
        }
    }

    fn emit_selection(&self, sender: &ComponentSender<Self>) {
        let _ = sender.output(SelectOutput::SelectionChanged(
            self.state.selected().to_vec(),
        ));
    }
}

#[relm4::component(pub)]
impl SimpleComponent for MultiSelectDropdown {
    type Init = SelectInit;
    type Input = SelectMsg;
    type Output = SelectOutput;

    view! {
        #[root]
        gtk::Box {
            set_orientation: gtk::Orientation::Vertical,
            set_hexpand: true,

            #[name = "header"]
            gtk::Box {
                set_spacing: 8,
                #[watch]
                set_css_classes: &model.header_classes(),
                #[watch]
                set_sensitive: !model.state.is_disabled(),

                add_controller = gtk::GestureClick {
                    connect_released[sender] => move |_, _, _, _| {
                        sender.input(SelectMsg::ToggleOpen);
                    }
                },

                #[name = "chips"]
                gtk::Box {
                    set_spacing: 4,
                    set_hexpand: true,
                    set_valign: gtk::Align::Center,
                },

                gtk::Image {
                    #[watch]
                    set_icon_name: Some(if model.state.is_open() {
                        "pan-up-symbolic"
                    } else {
                        "pan-down-symbolic"
                    }),
                },
            },
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let mut state = MultiSelect::new(init.entries.iter().map(|e| e.option.clone()).collect());
        state.set_selected(init.selected);

        let model = MultiSelectDropdown {
            state,
            entries: init.entries,
            placeholder: init.placeholder,
            header: gtk::Box::new(gtk::Orientation::Horizontal, 0),
            chips: gtk::Box::new(gtk::Orientation::Horizontal, 4),
            list: gtk::Box::new(gtk::Orientation::Vertical, 2),
            popover: gtk::Popover::new(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.header = widgets.header.clone();
        model.chips = widgets.chips.clone();

        let scroller = gtk::ScrolledWindow::new();
        scroller.set_hscrollbar_policy(gtk::PolicyType::Never);
        scroller.set_max_content_height(LIST_MAX_HEIGHT);
        scroller.set_propagate_natural_height(true);
        scroller.set_child(Some(&model.list));

        model.popover.set_child(Some(&scroller));
        model.popover.set_has_arrow(false);
        model.popover.set_autohide(true);
        model.popover.set_parent(&model.header);

        let dismiss_sender = sender.clone();
        model.popover.connect_closed(move |_| {
            dismiss_sender.input(SelectMsg::Dismissed);
        });

        model.refresh(&sender);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            SelectMsg::ToggleOpen => {
                self.state.toggle_open();
                self.sync_popover();
            }
            SelectMsg::Dismissed => {
                self.state.close();
            }
            SelectMsg::ToggleOption(value) => {
                self.state.toggle_option(&value);
                self.refresh(&sender);
                self.emit_selection(&sender);
            }
            SelectMsg::Remove(value) => {
                if self.state.remove(&value) {
                    self.refresh(&sender);
                    self.emit_selection(&sender);
                }
            }
            SelectMsg::SetSelected(values) => {
                self.state.set_selected(values);
                self.refresh(&sender);
            }
            SelectMsg::SetOptions(entries) => {
                self.state
                    .set_options(entries.iter().map(|e| e.option.clone()).collect());
                self.entries = entries;
                self.refresh(&sender);
            }
            SelectMsg::SetDisabled(disabled) => {
                self.state.set_disabled(disabled);
                self.sync_popover();
            }
        }
    }

    fn shutdown(&mut self, _widgets: &mut Self::Widgets, _output: relm4::Sender<Self::Output>) {
        self.popover.unparent();
    }
}

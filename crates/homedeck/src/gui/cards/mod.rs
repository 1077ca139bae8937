//! Device cards on the dashboard.

pub mod camera;
pub mod microphone;
pub mod projector;
pub mod room;

use crate::config::CardConfig;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;

const IMAGE_SIZE: i32 = 140;

/// Caption, title and the dimmed device picture shared by every card.
pub struct CardHeader {
    pub root: gtk::Box,
    caption: gtk::Label,
    title: gtk::Label,
    picture: gtk::Picture,
}

impl CardHeader {
    pub fn new(card: &CardConfig) -> Self {
        let root = gtk::Box::new(gtk::Orientation::Horizontal, 8);
        let text = gtk::Box::new(gtk::Orientation::Vertical, 4);
        text.set_hexpand(true);
        text.set_valign(gtk::Align::Start);

        let caption = gtk::Label::new(None);
        caption.add_css_class("deck-caption");
        caption.set_halign(gtk::Align::Start);
        let title = gtk::Label::new(None);
        title.add_css_class("deck-title");
        title.set_halign(gtk::Align::Start);
        title.set_wrap(true);
        text.append(&caption);
        text.append(&title);

        let picture = gtk::Picture::new();
        picture.add_css_class("deck-image");
        picture.set_can_shrink(true);
        picture.set_size_request(IMAGE_SIZE, IMAGE_SIZE);
        picture.set_can_target(false);

        root.append(&text);
        root.append(&picture);

        let header = Self {
            root,
            caption,
            title,
            picture,
        };
        header.apply(card);
        header
    }

    pub fn apply(&self, card: &CardConfig) {
        self.caption.set_label(&card.caption);
        self.title.set_label(&card.title);
        match &card.image {
            Some(path) => {
                self.picture.set_filename(Some(path));
                self.picture.set_visible(true);
            }
            None => {
                self.picture.set_paintable(None::<&gdk::Paintable>);
                self.picture.set_visible(false);
            }
        }
    }
}

//! Live camera feed. Native HLS backends get the URL directly; others go
//! through the playlist resolver first.

use deckwidgets::feed::{self, FeedError, HlsResolver, MediaSupport, PlaybackPath, StreamUrl};
use gtk::gio;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;

pub struct FeedViewer {
    video: gtk::Video,
    url: Option<StreamUrl>,
}

#[derive(Debug)]
pub enum FeedMsg {
    Load(Option<StreamUrl>),
    Resolved {
        source: StreamUrl,
        stream: StreamUrl,
    },
    Failed(FeedError),
}

/// Probes GTK's default media backend.
pub fn detect_media_support() -> MediaSupport {
    let probe = gtk::MediaFile::new();
    let support = MediaSupport::from_backend_name(probe.type_().name());
    log::debug!("Media backend {} -> {}", probe.type_().name(), support);
    support
}

impl FeedViewer {
    fn attach(&self, url: &StreamUrl) {
        let media = gtk::MediaFile::for_file(&gio::File::for_uri(url.as_str()));
        media.set_muted(true);
        media.connect_error_notify(|media| {
            if let Some(e) = media.error() {
                log::error!("Error attempting to play video: {}", e);
            }
        });
        self.video.set_media_stream(Some(&media));
        media.play();
    }

    fn start(&self, url: StreamUrl, sender: &ComponentSender<Self>) {
        let support = detect_media_support();
        match feed::plan(&url, support) {
            Ok(PlaybackPath::Direct(url)) => self.attach(&url),
            Ok(PlaybackPath::Fallback(url)) => {
                let resolver = HlsResolver::shared();
                let sender = sender.clone();
                relm4::spawn_local(async move {
                    let file = gio::File::for_uri(url.as_str());
                    let result = match file.load_contents_future().await {
                        Ok((bytes, _etag)) => resolver.resolve(&url, &bytes),
                        Err(e) => Err(FeedError::Fetch(e.to_string())),
                    };
                    match result {
                        Ok(stream) => sender.input(FeedMsg::Resolved {
                            source: url,
                            stream,
                        }),
                        Err(e) => sender.input(FeedMsg::Failed(e)),
                    }
                });
            }
            Err(e) => log::error!("Cannot play {}: {}", url, e),
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for FeedViewer {
    type Init = Option<StreamUrl>;
    type Input = FeedMsg;
    type Output = ();

    view! {
        #[root]
        gtk::Video {
            set_autoplay: true,
            set_hexpand: true,
            set_size_request: (-1, 200),
            add_css_class: "deck-feed",
        }
    }

    fn init(
        url: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let model = FeedViewer {
            video: root.clone(),
            url: None,
        };
        let widgets = view_output!();

        sender.input(FeedMsg::Load(url));

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            FeedMsg::Load(url) => {
                if url == self.url {
                    return;
                }
                self.url = url.clone();
                match url {
                    Some(url) => self.start(url, &sender),
                    None => self.video.set_media_stream(None::<&gtk::MediaStream>),
                }
            }
            FeedMsg::Resolved { source, stream } => {
                if self.url.as_ref() == Some(&source) {
                    log::info!("Playing {} via fallback resolver", stream);
                    self.attach(&stream);
                }
            }
            FeedMsg::Failed(e) => log::error!("Error loading HLS stream: {}", e),
        }
    }

    fn shutdown(&mut self, _widgets: &mut Self::Widgets, _output: relm4::Sender<Self::Output>) {
        self.video.set_media_stream(None::<&gtk::MediaStream>);
    }
}

use std::path::PathBuf;

use clap::Args;
use tyre_client::{
    i18n::Slot,
    places::{directions_url, openstreetmap_url, PLACES},
    preferences::{JsonFilePreferenceStore, MemoryPreferenceStore, PreferenceStore, UiState},
    render::{render, RenderedPage},
};

#[derive(Debug, Args)]
pub struct PageCommand {
    /// Json file holding the theme and language preferences
    #[arg(short, long)]
    preferences: Option<PathBuf>,
    /// Switch between the dark and the light theme before rendering
    #[arg(long)]
    toggle_theme: bool,
    /// Switch between english and arabic before rendering
    #[arg(long)]
    toggle_language: bool,
}

impl PageCommand {
    pub fn invoke(self) -> anyhow::Result<()> {
        let lines = match &self.preferences {
            Some(path) => self.lines(&mut JsonFilePreferenceStore::open(path)?)?,
            None => self.lines(&mut MemoryPreferenceStore::new())?,
        };
        for line in lines {
            println!("{line}");
        }
        Ok(())
    }

    fn lines(&self, store: &mut impl PreferenceStore) -> anyhow::Result<Vec<String>> {
        let mut state = UiState::load(store);
        if self.toggle_theme {
            state.toggle_theme(store)?;
        }
        if self.toggle_language {
            state.toggle_language(store)?;
        }
        Ok(describe(&render(&state)))
    }
}

fn describe(page: &RenderedPage) -> Vec<String> {
    let mut lines = vec![format!(
        "lang={} dir={} theme={} {}",
        page.lang,
        page.dir.as_str(),
        page.theme.as_str(),
        page.theme_glyph
    )];

    lines.extend(page.elements.iter().map(|element| {
        let slot = match element.slot {
            Slot::Text => "text",
            Slot::Placeholder => "placeholder",
        };
        format!("{:<16} {slot:<11} {}", element.id, element.text)
    }));

    lines.extend(PLACES.iter().map(|place| {
        format!(
            "place {} {},{} zoom {}: {}",
            place.id, place.coords.lat, place.coords.lng, place.zoom, place.name
        )
    }));
    lines.push(format!("directions {}", directions_url()));
    lines.push(format!("map {}", openstreetmap_url()));

    lines
}

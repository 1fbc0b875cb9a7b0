use crate::{
    i18n::{Direction, Slot, TextKey},
    preferences::{Theme, UiState},
};

/// Everything on the page that depends on the [`UiState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Document `lang` attribute.
    pub lang: &'static str,
    pub dir: Direction,
    pub theme: Theme,
    pub theme_glyph: &'static str,
    pub elements: Vec<RenderedElement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedElement {
    pub id: &'static str,
    pub slot: Slot,
    pub text: &'static str,
}

impl RenderedPage {
    pub fn element(&self, id: &str) -> Option<&RenderedElement> {
        self.elements.iter().find(|element| element.id == id)
    }
}

pub fn render(state: &UiState) -> RenderedPage {
    let language = state.language;

    RenderedPage {
        lang: language.code(),
        dir: language.direction(),
        theme: state.theme,
        theme_glyph: state.theme.glyph(),
        elements: TextKey::PAGE
            .iter()
            .filter_map(|&key| {
                let (id, slot) = key.element()?;
                Some(RenderedElement {
                    id,
                    slot,
                    text: key.text(language),
                })
            })
            .collect(),
    }
}

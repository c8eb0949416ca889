use crate::card::Card;

#[derive(Debug, Default)]
pub struct DetailModal {
    selected: Option<Card>,
    visible: bool,
}

impl DetailModal {
    pub fn open(&mut self, card: Card) {
        self.selected = Some(card);
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.selected = None;
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn selected(&self) -> Option<&Card> {
        self.selected.as_ref()
    }
}

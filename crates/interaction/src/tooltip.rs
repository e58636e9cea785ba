use foundation::Vec2;

/// Hover tooltip state: a label pinned near the pointer.
///
/// Hiding keeps the last label so rapid re-entry over the same region
/// never flickers through an empty tooltip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tooltip {
    label: String,
    position: Vec2,
    visible: bool,
}

impl Tooltip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self, label: &str, position: Vec2) {
        if self.label != label {
            self.label.clear();
            self.label.push_str(label);
        }
        self.position = position;
        self.visible = true;
    }

    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

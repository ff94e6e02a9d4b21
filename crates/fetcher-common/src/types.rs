use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical rectangle in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// A rect anchored at the origin covering `width` x `height`.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }
}

/// Identifies the page (one WebView) a bridge call belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PaneId(pub u32);

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pane-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_from_size_is_at_origin() {
        let r = Rect::from_size(1280.0, 800.0);
        assert_eq!(r.x, 0.0);
        assert_eq!(r.y, 0.0);
        assert_eq!(r.width, 1280.0);
        assert_eq!(r.height, 800.0);
    }

    #[test]
    fn rect_serialization() {
        let r = Rect::from_size(1920.0, 1080.0);
        let json = serde_json::to_string(&r).unwrap();
        let deserialized: Rect = serde_json::from_str(&json).unwrap();
        assert_eq!(r, deserialized);
    }

    #[test]
    fn pane_id_display() {
        assert_eq!(PaneId(3).to_string(), "pane-3");
    }

    #[test]
    fn pane_id_hash_and_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(PaneId(1));
        set.insert(PaneId(1));
        set.insert(PaneId(2));
        assert_eq!(set.len(), 2);
    }
}

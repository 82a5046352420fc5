//! Stacking layers
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use crate::{Result, Violation};
use std::{convert::TryFrom, fmt};

/// A stacking layer: clients on higher layers are always stacked above
/// clients on lower layers.
///
/// Layers are bounded to [Layer::MIN]..=[Layer::MAX] so a [Layer] can only be
/// obtained through [Layer::try_new] or one of the associated constants.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Layer(u8);

impl Layer {
    /// The bottom layer
    pub const MIN: Layer = Layer(1);
    /// The top layer
    pub const MAX: Layer = Layer(9);
    /// The layer new clients are placed on
    pub const DEFAULT: Layer = Layer(5);

    /// Create a new layer.
    ///
    /// # Errors
    /// Fails if `n` is outside of the range [Layer::MIN] to [Layer::MAX].
    pub fn try_new(n: u8) -> Result<Self> {
        if (Self::MIN.0..=Self::MAX.0).contains(&n) {
            Ok(Self(n))
        } else {
            Err(Violation::InvalidLayer(n).into())
        }
    }

    /// The numeric value of this layer.
    pub fn get(&self) -> u8 {
        self.0
    }

    /// The layer directly above this one, or None if this is the top layer.
    pub fn above(&self) -> Option<Self> {
        Self::try_new(self.0 + 1).ok()
    }

    /// The layer directly below this one, or None if this is the bottom layer.
    pub fn below(&self) -> Option<Self> {
        self.0.checked_sub(1).and_then(|n| Self::try_new(n).ok())
    }

    /// Every layer from bottom to top.
    pub fn all() -> impl DoubleEndedIterator<Item = Layer> {
        (Self::MIN.0..=Self::MAX.0).map(Layer)
    }
}

impl Default for Layer {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Layer {
    type Error = crate::Error;

    fn try_from(n: u8) -> Result<Self> {
        Self::try_new(n)
    }
}

impl From<Layer> for u8 {
    fn from(l: Layer) -> Self {
        l.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simple_test_case::test_case;

    #[test_case(0; "below range")]
    #[test_case(10; "above range")]
    #[test_case(255; "far above range")]
    #[test]
    fn out_of_range_layers_are_rejected(n: u8) {
        assert_eq!(
            Layer::try_new(n),
            Err(crate::Error::Precondition(Violation::InvalidLayer(n)))
        );
    }

    #[test_case(Layer::MIN, None, Some(2); "bottom")]
    #[test_case(Layer::DEFAULT, Some(4), Some(6); "middle")]
    #[test_case(Layer::MAX, Some(8), None; "top")]
    #[test]
    fn neighbours(l: Layer, below: Option<u8>, above: Option<u8>) {
        assert_eq!(l.below().map(|l| l.get()), below);
        assert_eq!(l.above().map(|l| l.get()), above);
    }

    #[test]
    fn all_is_ordered_bottom_to_top() {
        let layers: Vec<u8> = Layer::all().map(u8::from).collect();

        assert_eq!(layers, (1..=9).collect::<Vec<_>>());
    }
}

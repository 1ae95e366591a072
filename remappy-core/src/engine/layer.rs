/// The active layer, bounded to `[min, max]`
///
/// Every mutation re-clamps, so `min <= current <= max` holds after any
/// sequence of operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerState {
    current: i32,
    min: i32,
    max: i32,
}

impl Default for LayerState {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}

impl LayerState {
    /// Create a layer register starting at `default`. Swapped bounds are
    /// reordered and `default` is clamped into range.
    pub fn new(min: i32, max: i32, default: i32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let default = default.clamp(min, max);
        Self {
            current: default,
            min,
            max,
        }
    }

    /// Register covering layers `0..layer_count`
    pub fn for_layer_count(layer_count: usize) -> Self {
        let max = i32::try_from(layer_count.saturating_sub(1)).unwrap_or(i32::MAX);
        Self::new(0, max, 0)
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn inc(&mut self, n: i32) {
        self.current = self.current.saturating_add(n).clamp(self.min, self.max);
    }

    pub fn dec(&mut self, n: i32) {
        self.current = self.current.saturating_sub(n).clamp(self.min, self.max);
    }

    /// Jump to `layer`; ignored unless it lies within `[min, max]`
    pub fn set(&mut self, layer: i32) {
        if self.min <= layer && layer <= self.max {
            self.current = layer;
        }
    }

    /// Advance to the entry after the current layer in `layers`, wrapping
    /// around. If the current layer is not listed, go to the first entry.
    pub fn rotate(&mut self, layers: &[i32]) {
        let Some(first) = layers.first() else {
            return;
        };
        let next = match layers.iter().position(|&l| l == self.current) {
            Some(index) => layers[(index + 1) % layers.len()],
            None => *first,
        };
        self.current = next.clamp(self.min, self.max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inc_dec_clamp() {
        let mut layer = LayerState::new(0, 2, 0);
        layer.inc(1);
        assert_eq!(layer.current(), 1);
        layer.inc(5);
        assert_eq!(layer.current(), 2);
        layer.dec(1);
        assert_eq!(layer.current(), 1);
        layer.dec(10);
        assert_eq!(layer.current(), 0);
    }

    #[test]
    fn test_inc_saturates_at_extremes() {
        let mut layer = LayerState::new(0, 3, 3);
        layer.inc(i32::MAX);
        assert_eq!(layer.current(), 3);
        layer.dec(i32::MAX);
        assert_eq!(layer.current(), 0);
    }

    #[test]
    fn test_set_in_and_out_of_range() {
        let mut layer = LayerState::new(0, 2, 0);
        layer.set(2);
        assert_eq!(layer.current(), 2);
        layer.set(3);
        assert_eq!(layer.current(), 2);
        layer.set(-1);
        assert_eq!(layer.current(), 2);
        layer.set(0);
        assert_eq!(layer.current(), 0);
    }

    #[test]
    fn test_rotate() {
        let mut layer = LayerState::new(0, 3, 0);
        layer.rotate(&[0, 2, 3]);
        assert_eq!(layer.current(), 2);
        layer.rotate(&[0, 2, 3]);
        assert_eq!(layer.current(), 3);
        layer.rotate(&[0, 2, 3]);
        assert_eq!(layer.current(), 0);
    }

    #[test]
    fn test_rotate_from_unlisted_layer_goes_to_first() {
        let mut layer = LayerState::new(0, 3, 1);
        layer.rotate(&[2, 3]);
        assert_eq!(layer.current(), 2);
    }

    #[test]
    fn test_rotate_clamps_and_ignores_empty() {
        let mut layer = LayerState::new(0, 1, 0);
        layer.rotate(&[]);
        assert_eq!(layer.current(), 0);
        layer.rotate(&[0, 7]);
        assert_eq!(layer.current(), 1);
    }

    #[test]
    fn test_new_normalizes_bounds() {
        let layer = LayerState::new(4, 1, 9);
        assert_eq!((layer.min(), layer.max(), layer.current()), (1, 4, 4));

        let single = LayerState::for_layer_count(0);
        assert_eq!((single.min(), single.max()), (0, 0));
        assert_eq!(LayerState::for_layer_count(3).max(), 2);
    }
}

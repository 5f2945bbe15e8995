/*
 * Checkpoint Module
 *
 * Checkpoints are fixed point sources placed by the user. A positive
 * coefficient attracts darts, a negative one repels them. The registry is
 * append-only: checkpoints live for the whole run and are never moved.
 */

use nannou::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Attract,
    Repel,
}

impl Polarity {
    pub fn signum(self) -> f32 {
        match self {
            Polarity::Attract => 1.0,
            Polarity::Repel => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Checkpoint {
    pub position: Point2,
    /// Signed strength; the sign matches `polarity` unless the base strength is zero.
    pub coef: f32,
    pub polarity: Polarity,
}

#[derive(Debug, Clone, Default)]
pub struct CheckpointRegistry {
    base_strength: f32,
    checkpoints: Vec<Checkpoint>,
    positives: usize,
    negatives: usize,
}

impl CheckpointRegistry {
    pub fn new(base_strength: f32) -> Self {
        Self {
            base_strength,
            ..Self::default()
        }
    }

    pub fn add(&mut self, position: Point2, polarity: Polarity) -> &Checkpoint {
        match polarity {
            Polarity::Attract => self.positives += 1,
            Polarity::Repel => self.negatives += 1,
        }
        self.checkpoints.push(Checkpoint {
            position,
            coef: self.base_strength * polarity.signum(),
            polarity,
        });
        &self.checkpoints[self.checkpoints.len() - 1]
    }

    /// Checkpoints in placement order.
    pub fn as_slice(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Checkpoint> {
        self.checkpoints.iter()
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Number of attracting checkpoints placed so far.
    pub fn positives(&self) -> usize {
        self.positives
    }

    /// Number of repelling checkpoints placed so far.
    pub fn negatives(&self) -> usize {
        self.negatives
    }
}

impl<'a> IntoIterator for &'a CheckpointRegistry {
    type Item = &'a Checkpoint;
    type IntoIter = std::slice::Iter<'a, Checkpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_scales_by_polarity() {
        let mut registry = CheckpointRegistry::new(0.3);
        let attract = *registry.add(pt2(0.1, 0.2), Polarity::Attract);
        let repel = *registry.add(pt2(-0.5, 0.5), Polarity::Repel);

        assert_eq!(attract.coef, 0.3);
        assert_eq!(repel.coef, -0.3);
        assert_eq!(repel.position, pt2(-0.5, 0.5));
    }

    #[test]
    fn test_counts_and_order() {
        let mut registry = CheckpointRegistry::new(1.0);
        registry.add(pt2(0.0, 0.0), Polarity::Repel);
        registry.add(pt2(0.1, 0.0), Polarity::Attract);
        registry.add(pt2(0.2, 0.0), Polarity::Attract);

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.positives(), 2);
        assert_eq!(registry.negatives(), 1);
        let xs: Vec<f32> = registry.iter().map(|c| c.position.x).collect();
        assert_eq!(xs, vec![0.0, 0.1, 0.2]);
    }

    #[test]
    fn test_zero_strength_keeps_polarity() {
        let mut registry = CheckpointRegistry::new(0.0);
        let checkpoint = *registry.add(pt2(0.0, 0.0), Polarity::Repel);
        assert_eq!(checkpoint.coef, 0.0);
        assert_eq!(checkpoint.polarity, Polarity::Repel);
        assert_eq!(registry.negatives(), 1);
    }
}

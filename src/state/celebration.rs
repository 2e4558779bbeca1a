//! One-shot confetti shown on the confirmation view.
//!
//! Positions are normalised to the unit square; the renderer maps them onto
//! whatever area it draws into. Pieces fall out of view and are not
//! recycled, so the effect ends by itself.

use rand::Rng;

pub const PIECES: usize = 160;
const GLYPHS: [char; 5] = ['*', '+', 'o', '~', '•'];
const GRAVITY: f32 = 0.0008;
const MAX_TICKS: u32 = 600;

/// A single piece of confetti.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    vx: f32,
    vy: f32,
    pub glyph: char,
    pub color: usize,
}

/// Falling confetti launched once when the form is accepted.
///
#[derive(Clone, Debug)]
pub struct Celebration {
    particles: Vec<Particle>,
    ticks: u32,
}

impl Celebration {
    /// Launch `pieces` particles just above the top edge.
    ///
    pub fn burst(pieces: usize) -> Self {
        let mut rng = rand::thread_rng();
        let particles = (0..pieces)
            .map(|_| Particle {
                x: rng.gen_range(0.0..1.0),
                y: rng.gen_range(-0.6..0.0),
                vx: rng.gen_range(-0.004..0.004),
                vy: rng.gen_range(0.004..0.014),
                glyph: GLYPHS[rng.gen_range(0..GLYPHS.len())],
                color: rng.gen_range(0..usize::MAX),
            })
            .collect();
        Celebration {
            particles,
            ticks: 0,
        }
    }

    /// Advance the animation by one frame.
    ///
    pub fn tick(&mut self) {
        if self.is_finished() {
            return;
        }
        for p in self.particles.iter_mut() {
            p.x += p.vx;
            p.y += p.vy;
            p.vy += GRAVITY;
        }
        self.particles
            .retain(|p| p.y <= 1.0 && (0.0..1.0).contains(&p.x));
        self.ticks += 1;
    }

    pub fn is_finished(&self) -> bool {
        self.particles.is_empty() || self.ticks >= MAX_TICKS
    }

    /// Return particles currently inside the visible area.
    ///
    pub fn visible(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.y >= 0.0)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_starts_above_view() {
        let celebration = Celebration::burst(PIECES);
        assert_eq!(celebration.len(), PIECES);
        assert_eq!(celebration.visible().count(), 0);
        assert!(!celebration.is_finished());
    }

    #[test]
    fn test_particles_fall_into_view() {
        let mut celebration = Celebration::burst(50);
        for _ in 0..100 {
            celebration.tick();
        }
        assert!(celebration.visible().all(|p| (0.0..=1.0).contains(&p.y)));
    }

    #[test]
    fn test_celebration_ends_without_recycling() {
        let mut celebration = Celebration::burst(PIECES);
        let mut ticks = 0;
        while !celebration.is_finished() {
            celebration.tick();
            ticks += 1;
            assert!(ticks <= MAX_TICKS);
        }
        let remaining = celebration.len();
        celebration.tick();
        assert_eq!(celebration.len(), remaining);
    }

    #[test]
    fn test_empty_burst_is_finished() {
        let celebration = Celebration::burst(0);
        assert!(celebration.is_finished());
        assert!(celebration.is_empty());
    }
}

//! Spawn planning: what to spawn next, when, and where
//!
//! Placement uses rejection sampling in the safe vertical band so new text
//! does not land on top of words already on screen.

use glam::Vec2;

use super::bounds::TextMetrics;
use super::rng::RandomSource;
use super::state::RoundConfig;
use super::word::Word;
use crate::consts::*;
use crate::settings::FontId;
use crate::words::{WordSource, is_typable};

/// Shape of a planned word
#[derive(Debug, Clone, PartialEq)]
pub enum SpawnShape {
    Simple { text: String },
    Chained { segments: Vec<String>, ys: Vec<f32> },
}

/// Everything needed to create the next word
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnSpec {
    pub shape: SpawnShape,
    /// Anchor, always left of the screen
    pub pos: Vec2,
    pub speed: f32,
    pub font: FontId,
}

impl SpawnSpec {
    pub fn is_chained(&self) -> bool {
        matches!(self.shape, SpawnShape::Chained { .. })
    }

    pub fn into_word(self, id: u32) -> Word {
        let word = match self.shape {
            SpawnShape::Simple { text } => Word::simple(id, text, self.pos, self.speed),
            SpawnShape::Chained { segments, ys } => Word::chained(id, segments, ys, self.pos, self.speed),
        };
        word.with_font(self.font)
    }
}

/// Replace empty, sentinel or untypable word-source output with the fallback word
pub fn sanitize_text(text: String) -> String {
    let trimmed = text.trim();
    if trimmed == ERROR_WORD || !is_typable(trimmed) {
        log::warn!("Word source returned {text:?}, substituting {FALLBACK_WORD:?}");
        return FALLBACK_WORD.to_string();
    }
    if trimmed.len() != text.len() {
        return trimmed.to_string();
    }
    text
}

/// Longer chains unlock as the score grows, capped at `MAX_CHAIN_LEN`
pub fn chain_length(score: u64, rng: &mut dyn RandomSource) -> usize {
    let steps = (score / SCORE_PER_CHAIN_STEP).min(MAX_CHAIN_LEN as u64) as usize;
    let max = (MIN_CHAIN_LEN + steps).min(MAX_CHAIN_LEN);
    rng.range_usize(MIN_CHAIN_LEN, max)
}

/// Decides spawn cadence and builds new words
#[derive(Debug, Clone)]
pub struct SpawnPlanner {
    interval: f32,
    timer: f32,
    speed: f32,
    linked_words: bool,
    randomize_word_sets: bool,
    word_set_pool: Vec<usize>,
    metrics: TextMetrics,
    font: FontId,
    font_pool: Vec<FontId>,
}

impl SpawnPlanner {
    pub fn new(config: &RoundConfig) -> Self {
        Self {
            interval: config.spawn_interval.max(f32::EPSILON),
            timer: 0.0,
            speed: config.word_speed,
            linked_words: config.linked_words,
            randomize_word_sets: config.randomize_word_sets,
            word_set_pool: config.word_set_pool.clone(),
            metrics: config.metrics,
            font: config.font.clone(),
            font_pool: config.font_pool.clone(),
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Advance the spawn timer; true (and the timer restarts) when a spawn is due
    pub fn tick(&mut self, dt: f32) -> bool {
        self.timer += dt;
        if self.timer >= self.interval {
            self.timer = 0.0;
            return true;
        }
        false
    }

    /// Plan the next word given what is already on screen
    pub fn plan_next_spawn(
        &self,
        active: &[Word],
        elapsed: f32,
        score: u64,
        source: &dyn WordSource,
        rng: &mut dyn RandomSource,
    ) -> SpawnSpec {
        let font = self.pick_font(rng);
        let make_linked = self.linked_words && rng.chance(LINKED_CHANCE);

        let (shape, pos) = if make_linked {
            let count = chain_length(score, rng);
            let mut segments = Vec::with_capacity(count);
            let mut ys: Vec<f32> = Vec::with_capacity(count);
            for _ in 0..count {
                segments.push(self.draw_text(source, rng));
                let y = self.place_y(active, &ys, rng);
                ys.push(y);
            }
            let anchor = Vec2::new(CHAIN_SPAWN_X, ys[0]);
            (SpawnShape::Chained { segments, ys }, anchor)
        } else {
            let text = self.draw_text(source, rng);
            let y = self.place_y(active, &[], rng);
            (SpawnShape::Simple { text }, Vec2::new(SIMPLE_SPAWN_X, y))
        };

        log::debug!(
            "Planned {} at y={:.0} (t={:.1}s, score={})",
            if make_linked { "chain" } else { "word" },
            pos.y,
            elapsed,
            score
        );

        SpawnSpec {
            shape,
            pos,
            speed: self.speed,
            font,
        }
    }

    fn pick_font(&self, rng: &mut dyn RandomSource) -> FontId {
        if self.font_pool.is_empty() {
            return self.font.clone();
        }
        let index = rng.range_usize(0, self.font_pool.len() - 1);
        self.font_pool.get(index).cloned().unwrap_or_else(|| self.font.clone())
    }

    fn draw_text(&self, source: &dyn WordSource, rng: &mut dyn RandomSource) -> String {
        let raw = if !self.randomize_word_sets {
            source.random_word(rng)
        } else if !self.word_set_pool.is_empty() {
            let index = rng.range_usize(0, self.word_set_pool.len() - 1);
            source.random_word_from_set(self.word_set_pool[index], rng)
        } else if source.set_count() > 0 {
            let set = rng.range_usize(0, source.set_count() - 1);
            source.random_word_from_set(set, rng)
        } else {
            source.random_word(rng)
        };
        sanitize_text(raw)
    }

    /// Pick a y that clears every active word and the segments placed so far
    fn place_y(&self, active: &[Word], placed: &[f32], rng: &mut dyn RandomSource) -> f32 {
        let height = self.metrics.line_height;
        for _ in 0..PLACEMENT_ATTEMPTS {
            let y = rng.range_f32(SAFE_TOP, SAFE_BOTTOM);
            let hits_active = active
                .iter()
                .any(|w| w.active_box(&self.metrics).overlaps_band(y, height));
            let hits_placed = placed.iter().any(|&prev| (prev - y).abs() < height * 0.9);
            if !hits_active && !hits_placed {
                return y;
            }
        }

        let y = match placed.last() {
            Some(prev) => (prev + height + 10.0).clamp(SAFE_TOP, SAFE_BOTTOM),
            None => rng.range_f32(SAFE_TOP, SAFE_BOTTOM),
        };
        log::warn!("No free row after {PLACEMENT_ATTEMPTS} attempts, stacking at y={y:.0}");
        y
    }
}

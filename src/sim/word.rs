//! Typable word entities
//!
//! A word is either a single piece of text or a linked chain of segments
//! that must be typed in order. Both share position, speed and typing
//! state; only the chain carries per-segment data.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::{Rect, TextMetrics};
use super::router::Key;
use crate::consts::*;
use crate::settings::FontId;

/// Variant-specific word data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WordKind {
    /// One piece of text
    Simple { text: String },
    /// Ordered segments typed one after another
    Chained(Chain),
}

/// Segment state of a linked chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    segments: Vec<String>,
    /// Per-segment y, fixed at creation. Missing entries use the anchor y.
    segment_ys: Vec<f32>,
    /// Only this segment accepts input. Never decreases.
    current: usize,
}

impl Chain {
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn segment_ys(&self) -> &[f32] {
        &self.segment_ys
    }

    pub fn current(&self) -> usize {
        self.current
    }
}

/// How the renderer should present a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentStyle {
    /// Already typed, no longer shown
    Retired,
    /// Accepting input
    Active,
    /// Waiting its turn
    Pending,
}

/// A word drifting across the play area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    pub id: u32,
    /// Anchor (top-left of the first segment)
    pub pos: Vec2,
    /// Signed horizontal speed; negative means the reverse (penalty) lane
    pub speed: f32,
    /// Font handle resolved by the renderer
    pub font: FontId,
    pub kind: WordKind,
    /// Typed input for the active text
    input: String,
    active_target: bool,
    mistakes: u32,
    completed: bool,
}

impl Word {
    pub fn simple(id: u32, text: impl Into<String>, pos: Vec2, speed: f32) -> Self {
        let text = text.into();
        let completed = text.is_empty();
        Self {
            id,
            pos,
            speed,
            font: FontId::default(),
            kind: WordKind::Simple { text },
            input: String::new(),
            active_target: false,
            mistakes: 0,
            completed,
        }
    }

    pub fn chained(id: u32, segments: Vec<String>, segment_ys: Vec<f32>, pos: Vec2, speed: f32) -> Self {
        let mut word = Self {
            id,
            pos,
            speed,
            font: FontId::default(),
            kind: WordKind::Chained(Chain {
                segments,
                segment_ys,
                current: 0,
            }),
            input: String::new(),
            active_target: false,
            mistakes: 0,
            completed: false,
        };
        word.skip_empty_segments();
        word
    }

    pub fn with_font(mut self, font: FontId) -> Self {
        self.font = font;
        self
    }

    pub fn is_chained(&self) -> bool {
        matches!(self.kind, WordKind::Chained(_))
    }

    pub fn chain(&self) -> Option<&Chain> {
        match &self.kind {
            WordKind::Chained(chain) => Some(chain),
            WordKind::Simple { .. } => None,
        }
    }

    /// Text currently accepting input (the active segment for a chain)
    pub fn display_text(&self) -> &str {
        match &self.kind {
            WordKind::Simple { text } => text,
            WordKind::Chained(chain) => chain
                .segments
                .get(chain.current)
                .or_else(|| chain.segments.last())
                .map(String::as_str)
                .unwrap_or(""),
        }
    }

    /// Characters credited when the whole word is finished
    pub fn total_chars(&self) -> usize {
        match &self.kind {
            WordKind::Simple { text } => text.chars().count(),
            WordKind::Chained(chain) => chain.segments.iter().map(|s| s.chars().count()).sum(),
        }
    }

    /// Chains are worth double
    pub fn score_multiplier(&self) -> u64 {
        if self.is_chained() { 2 } else { 1 }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_active_target(&self) -> bool {
        self.active_target
    }

    pub fn set_active_target(&mut self, active: bool) {
        self.active_target = active;
    }

    /// Drop the active input and release targeting (no penalty)
    pub fn reset_typing(&mut self) {
        self.input.clear();
        self.active_target = false;
    }

    /// Move horizontally by speed * dt
    pub fn advance(&mut self, dt: f32) {
        self.pos.x += self.speed * dt;
    }

    /// Apply one keystroke to the active text
    pub fn apply_key(&mut self, key: Key) {
        if self.completed {
            return;
        }
        match key {
            Key::Backspace => {
                self.input.pop();
            }
            Key::Escape => self.reset_typing(),
            Key::Char(c) => self.type_char(c),
        }
    }

    fn type_char(&mut self, c: char) {
        let typed = self.input.chars().count();
        let Some(expected) = self.display_text().chars().nth(typed) else {
            // Buffer full: extra keystrokes are dropped
            return;
        };
        self.input.push(c);
        // Only the newly appended character is judged
        if !c.eq_ignore_ascii_case(&expected) {
            self.mistakes += 1;
        }
        if self.input.eq_ignore_ascii_case(self.display_text()) {
            self.finish_active_text();
        }
    }

    fn finish_active_text(&mut self) {
        let advanced = match &mut self.kind {
            WordKind::Simple { .. } => false,
            WordKind::Chained(chain) => {
                if chain.current + 1 < chain.segments.len() {
                    chain.current += 1;
                    true
                } else {
                    false
                }
            }
        };
        if advanced {
            self.input.clear();
            self.pos.x += CHAIN_NUDGE;
            self.skip_empty_segments();
        } else {
            self.complete();
        }
    }

    /// Empty segments are trivially typed
    fn skip_empty_segments(&mut self) {
        let WordKind::Chained(chain) = &mut self.kind else {
            return;
        };
        while chain.segments.get(chain.current).is_some_and(|s| s.is_empty()) {
            if chain.current + 1 < chain.segments.len() {
                chain.current += 1;
            } else {
                break;
            }
        }
        let exhausted = chain.segments.get(chain.current).is_none_or(|s| s.is_empty());
        if exhausted {
            self.complete();
        }
    }

    fn complete(&mut self) {
        self.completed = true;
        self.active_target = false;
    }

    /// Boxes of every segment, laid out left to right from the anchor
    pub fn segment_boxes(&self, metrics: &TextMetrics) -> Vec<Rect> {
        match &self.kind {
            WordKind::Simple { text } => vec![metrics.text_box(text, self.pos)],
            WordKind::Chained(chain) => {
                let mut x = self.pos.x;
                chain
                    .segments
                    .iter()
                    .enumerate()
                    .map(|(i, segment)| {
                        let y = chain.segment_ys.get(i).copied().unwrap_or(self.pos.y);
                        let rect = metrics.text_box(segment, Vec2::new(x, y));
                        x += rect.size.x + CHAIN_SEGMENT_GAP;
                        rect
                    })
                    .collect()
            }
        }
    }

    /// Box of the text currently accepting input
    pub fn active_box(&self, metrics: &TextMetrics) -> Rect {
        let index = self.chain().map(|c| c.current).unwrap_or(0);
        let boxes = self.segment_boxes(metrics);
        boxes
            .get(index)
            .or(boxes.last())
            .copied()
            .unwrap_or_else(|| metrics.text_box("", self.pos))
    }

    /// Box of the trailing segment; offscreen checks use this one
    fn trailing_box(&self, metrics: &TextMetrics) -> Rect {
        self.segment_boxes(metrics)
            .last()
            .copied()
            .unwrap_or_else(|| metrics.text_box("", self.pos))
    }

    /// Connection points (segment centres) for drawing chain links
    pub fn link_points(&self, metrics: &TextMetrics) -> Vec<Vec2> {
        if !self.is_chained() {
            return Vec::new();
        }
        self.segment_boxes(metrics).iter().map(Rect::center).collect()
    }

    pub fn segment_style(&self, index: usize) -> SegmentStyle {
        let current = self.chain().map(|c| c.current).unwrap_or(0);
        if self.completed || index < current {
            SegmentStyle::Retired
        } else if index == current {
            SegmentStyle::Active
        } else {
            SegmentStyle::Pending
        }
    }

    /// Left edge of the trailing box has passed the right boundary
    pub fn is_offscreen_forward(&self, metrics: &TextMetrics, screen_width: f32) -> bool {
        self.trailing_box(metrics).left() > screen_width
    }

    /// Trailing box is fully past either boundary
    pub fn is_offscreen_any(&self, metrics: &TextMetrics, screen_width: f32) -> bool {
        let b = self.trailing_box(metrics);
        b.left() > screen_width || b.right() < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn type_str(word: &mut Word, s: &str) {
        for c in s.chars() {
            word.apply_key(Key::Char(c));
        }
    }

    fn chain(segments: &[&str]) -> Word {
        Word::chained(
            1,
            segments.iter().map(|s| s.to_string()).collect(),
            vec![200.0; segments.len()],
            Vec2::new(100.0, 200.0),
            100.0,
        )
    }

    #[test]
    fn test_typing_completes_word() {
        let mut word = Word::simple(1, "cat", Vec2::ZERO, 100.0);
        type_str(&mut word, "CaT");
        assert!(word.is_completed());
        assert_eq!(word.mistakes(), 0);
    }

    #[test]
    fn test_wrong_char_counts_once() {
        let mut word = Word::simple(1, "cat", Vec2::ZERO, 100.0);
        type_str(&mut word, "cx");
        assert_eq!(word.mistakes(), 1);
        // Following correct-position chars are not re-judged as mistakes
        word.apply_key(Key::Char('t'));
        assert_eq!(word.mistakes(), 1);
        assert!(!word.is_completed());

        word.apply_key(Key::Backspace);
        word.apply_key(Key::Backspace);
        type_str(&mut word, "at");
        assert!(word.is_completed());
        assert_eq!(word.mistakes(), 1);
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut word = Word::simple(1, "dog", Vec2::ZERO, 100.0);
        word.apply_key(Key::Backspace);
        assert_eq!(word.input(), "");
        assert_eq!(word.mistakes(), 0);
    }

    #[test]
    fn test_escape_resets_without_penalty() {
        let mut word = Word::simple(1, "dog", Vec2::ZERO, 100.0);
        word.set_active_target(true);
        type_str(&mut word, "do");
        word.apply_key(Key::Escape);
        assert_eq!(word.input(), "");
        assert!(!word.is_active_target());
        assert_eq!(word.mistakes(), 0);
    }

    #[test]
    fn test_completed_word_ignores_input() {
        let mut word = Word::simple(1, "a", Vec2::ZERO, 100.0);
        word.apply_key(Key::Char('a'));
        assert!(word.is_completed());
        word.apply_key(Key::Backspace);
        word.apply_key(Key::Char('z'));
        assert_eq!(word.input(), "a");
        assert_eq!(word.mistakes(), 0);
    }

    #[test]
    fn test_empty_text_is_trivially_complete() {
        let word = Word::simple(1, "", Vec2::ZERO, 100.0);
        assert!(word.is_completed());
        assert_eq!(word.total_chars(), 0);

        let empty_chain = Word::chained(2, Vec::new(), Vec::new(), Vec2::ZERO, 100.0);
        assert!(empty_chain.is_completed());
    }

    #[test]
    fn test_chain_skips_empty_segments() {
        let mut word = chain(&["", "ab", ""]);
        assert_eq!(word.display_text(), "ab");
        type_str(&mut word, "ab");
        assert!(word.is_completed());
    }

    #[test]
    fn test_chain_advances_and_nudges() {
        let mut word = chain(&["ab", "cd", "ef"]);
        let start_x = word.pos.x;
        type_str(&mut word, "ab");
        assert_eq!(word.chain().map(Chain::current), Some(1));
        assert_eq!(word.input(), "");
        assert_eq!(word.display_text(), "cd");
        assert!((word.pos.x - (start_x + CHAIN_NUDGE)).abs() < 1e-4);
        assert_eq!(word.segment_style(0), SegmentStyle::Retired);
        assert_eq!(word.segment_style(1), SegmentStyle::Active);
        assert_eq!(word.segment_style(2), SegmentStyle::Pending);

        type_str(&mut word, "cdef");
        assert!(word.is_completed());
        assert_eq!(word.total_chars(), 6);
        assert_eq!(word.score_multiplier(), 2);
    }

    #[test]
    fn test_chain_layout_and_offscreen_use_last_segment() {
        let m = TextMetrics::for_font_size(20); // 12 px per char
        let word = Word::chained(
            1,
            vec!["abc".into(), "de".into()],
            vec![150.0, 300.0],
            Vec2::new(1600.0, 150.0),
            100.0,
        );
        let boxes = word.segment_boxes(&m);
        assert_eq!(boxes.len(), 2);
        assert!((boxes[1].left() - (1600.0 + 36.0 + CHAIN_SEGMENT_GAP)).abs() < 1e-3);
        assert!((boxes[1].top() - 300.0).abs() < 1e-3);
        // Anchor is on screen but the trailing segment is past the edge
        assert!(word.is_offscreen_forward(&m, 1650.0));
        assert_eq!(word.link_points(&m).len(), 2);
    }

    #[test]
    fn test_offscreen_simple() {
        let m = TextMetrics::for_font_size(20);
        let mut word = Word::simple(1, "cat", Vec2::new(1700.0, 200.0), 100.0);
        assert!(!word.is_offscreen_forward(&m, 1700.0));
        word.advance(0.01);
        assert!(word.is_offscreen_forward(&m, 1700.0));
        assert!(word.is_offscreen_any(&m, 1700.0));

        let reverse = Word::simple(2, "cat", Vec2::new(-37.0, 200.0), -100.0);
        assert!(reverse.is_offscreen_any(&m, 1700.0));
        assert!(!reverse.is_offscreen_forward(&m, 1700.0));
    }

    fn mixed_case(text: &str, mask: &[bool]) -> String {
        text.chars()
            .zip(mask.iter().cycle())
            .map(|(c, &upper)| if upper { c.to_ascii_uppercase() } else { c })
            .collect()
    }

    proptest! {
        #[test]
        fn prop_exact_typing_completes(text in "[a-z]{1,12}", mask in proptest::collection::vec(any::<bool>(), 1..12)) {
            let mut word = Word::simple(1, text.clone(), Vec2::ZERO, 100.0);
            type_str(&mut word, &mixed_case(&text, &mask));
            prop_assert!(word.is_completed());
            prop_assert_eq!(word.mistakes(), 0);
        }

        #[test]
        fn prop_buffer_never_exceeds_text(text in "[a-z]{2,10}", extra in "[a-z]{1,20}") {
            let mut word = Word::simple(1, text.clone(), Vec2::ZERO, 100.0);
            // Start with a wrong char so the word never completes
            let wrong = if text.starts_with('z') { 'y' } else { 'z' };
            word.apply_key(Key::Char(wrong));
            while word.input().chars().count() < text.chars().count() {
                word.apply_key(Key::Char('a'));
            }
            let mistakes = word.mistakes();
            type_str(&mut word, &extra);
            prop_assert_eq!(word.input().chars().count(), text.chars().count());
            prop_assert_eq!(word.mistakes(), mistakes);
            prop_assert!(!word.is_completed());
        }

        #[test]
        fn prop_chain_segments_advance_in_order(segments in proptest::collection::vec("[a-z]{1,6}", 1..5)) {
            let refs: Vec<&str> = segments.iter().map(String::as_str).collect();
            let mut word = chain(&refs);
            for (i, segment) in segments.iter().enumerate() {
                prop_assert_eq!(word.chain().map(Chain::current), Some(i));
                type_str(&mut word, segment);
                if i + 1 < segments.len() {
                    prop_assert_eq!(word.chain().map(Chain::current), Some(i + 1));
                    // Backspace after the transition never reopens segment i
                    word.apply_key(Key::Backspace);
                    prop_assert_eq!(word.chain().map(Chain::current), Some(i + 1));
                    prop_assert_eq!(word.input(), "");
                } else {
                    prop_assert!(word.is_completed());
                }
            }
        }

        #[test]
        fn prop_advance_zero_is_identity(x in -500.0f32..2000.0, y in 100.0f32..750.0, speed in -300.0f32..300.0) {
            let mut word = Word::simple(1, "cat", Vec2::new(x, y), speed);
            let before = word.clone();
            word.advance(0.0);
            prop_assert_eq!(word.pos, before.pos);
            prop_assert_eq!(word.input(), before.input());
            prop_assert_eq!(word.is_completed(), before.is_completed());
        }
    }
}

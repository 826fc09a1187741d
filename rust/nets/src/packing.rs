// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rectangle packing onto fixed-size sheets
//!
//! MaxRects with the best-short-side-fit rule. Items are packed largest area
//! first; each goes into the open bin where it fits best, and a new bin is
//! opened only when no open bin can take it. Items may be turned 90 degrees.

use tracing::debug;

const EPS: f64 = 1e-9;

/// Axis-aligned rectangle; `x, y` is the lower-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// Check if the interiors overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right() - EPS
            && other.x < self.right() - EPS
            && self.y < other.top() - EPS
            && other.y < self.top() - EPS
    }

    fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.top() <= self.top() + EPS
    }
}

/// A rectangle to pack, identified by the caller's index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackItem {
    pub id: usize,
    pub width: f64,
    pub height: f64,
}

/// Where an item ended up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackedRect {
    pub id: usize,
    pub bin: usize,
    /// Occupied rectangle, already turned if `rotated`
    pub rect: Rect,
    pub rotated: bool,
}

/// Outcome of packing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackResult {
    /// Placements in packing order
    pub placed: Vec<PackedRect>,
    /// Items that fit in no bin, in input order
    pub unplaced: Vec<usize>,
}

impl PackResult {
    /// Number of bins in use
    pub fn bin_count(&self) -> usize {
        self.placed.iter().map(|p| p.bin + 1).max().unwrap_or(0)
    }
}

/// Score of a candidate placement; lower is better
type Score = (f64, f64);

#[derive(Debug, Clone, Copy)]
struct Candidate {
    rect: Rect,
    rotated: bool,
    score: Score,
}

/// One sheet with its maximal free rectangles
#[derive(Debug, Clone)]
struct MaxRectsBin {
    free: Vec<Rect>,
}

impl MaxRectsBin {
    fn new(width: f64, height: f64) -> Self {
        Self {
            free: vec![Rect::new(0.0, 0.0, width, height)],
        }
    }

    /// Best short side fit over both orientations
    fn find_position(&self, width: f64, height: f64) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        for free in &self.free {
            for (w, h, rotated) in [(width, height, false), (height, width, true)] {
                if w > free.width + EPS || h > free.height + EPS {
                    continue;
                }
                let leftover_w = free.width - w;
                let leftover_h = free.height - h;
                let score = (leftover_w.min(leftover_h), leftover_w.max(leftover_h));
                if best.map_or(true, |b| score < b.score) {
                    best = Some(Candidate {
                        rect: Rect::new(free.x, free.y, w, h),
                        rotated,
                        score,
                    });
                }
            }
        }
        best
    }

    fn place(&mut self, used: &Rect) {
        let mut next = Vec::with_capacity(self.free.len() + 4);
        for free in &self.free {
            if !free.overlaps(used) {
                next.push(*free);
                continue;
            }
            if used.x > free.x + EPS {
                next.push(Rect::new(free.x, free.y, used.x - free.x, free.height));
            }
            if used.right() < free.right() - EPS {
                next.push(Rect::new(used.right(), free.y, free.right() - used.right(), free.height));
            }
            if used.y > free.y + EPS {
                next.push(Rect::new(free.x, free.y, free.width, used.y - free.y));
            }
            if used.top() < free.top() - EPS {
                next.push(Rect::new(free.x, used.top(), free.width, free.top() - used.top()));
            }
        }
        self.free = prune(next);
    }
}

/// Drop free rectangles contained in another one
fn prune(rects: Vec<Rect>) -> Vec<Rect> {
    let mut keep = vec![true; rects.len()];
    for i in 0..rects.len() {
        if !keep[i] {
            continue;
        }
        for j in 0..rects.len() {
            if i != j && keep[j] && rects[j].contains(&rects[i]) {
                keep[i] = false;
                break;
            }
        }
    }
    rects
        .into_iter()
        .zip(keep)
        .filter_map(|(r, k)| k.then_some(r))
        .collect()
}

/// Pack `items` onto at most `max_bins` sheets of `bin_width` x `bin_height`
pub fn pack(items: &[PackItem], bin_width: f64, bin_height: f64, max_bins: usize) -> PackResult {
    let mut order: Vec<&PackItem> = items.iter().collect();
    // Stable: equal areas keep input order
    order.sort_by(|a, b| (b.width * b.height).total_cmp(&(a.width * a.height)));

    let mut bins: Vec<MaxRectsBin> = Vec::new();
    let mut result = PackResult::default();

    for item in order {
        let best_open = bins
            .iter()
            .enumerate()
            .filter_map(|(i, bin)| bin.find_position(item.width, item.height).map(|c| (i, c)))
            .fold(None::<(usize, Candidate)>, |best, (i, c)| match best {
                Some((_, b)) if b.score <= c.score => best,
                _ => Some((i, c)),
            });

        let placement = best_open.or_else(|| {
            if bins.len() >= max_bins {
                return None;
            }
            let bin = MaxRectsBin::new(bin_width, bin_height);
            let candidate = bin.find_position(item.width, item.height)?;
            bins.push(bin);
            Some((bins.len() - 1, candidate))
        });

        match placement {
            Some((bin, candidate)) => {
                bins[bin].place(&candidate.rect);
                result.placed.push(PackedRect {
                    id: item.id,
                    bin,
                    rect: candidate.rect,
                    rotated: candidate.rotated,
                });
            }
            None => result.unplaced.push(item.id),
        }
    }

    result.unplaced.sort_unstable();
    debug!(
        items = items.len(),
        bins = bins.len(),
        unplaced = result.unplaced.len(),
        "packed rectangles"
    );
    result
}

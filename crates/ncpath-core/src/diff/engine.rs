//! Shortest edit script between two line sequences, grouped into hunks.

use crate::diff::model::{DiffLine, Hunk};
use std::iter::repeat;
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Equal,
    Delete,
    Insert,
}

/// Group the edit script between `before` and `after` into hunks, each
/// carrying up to `context` unchanged lines on either side. Changes closer
/// than `2 * context` lines apart share a hunk.
pub fn compute_hunks(before: &[&str], after: &[&str], context: usize) -> Vec<Hunk> {
    let script = edit_script(before, after);

    // (old, new) line offsets in effect before each step of the script
    let mut positions = Vec::with_capacity(script.len() + 1);
    let (mut old, mut new) = (0usize, 0usize);
    for op in &script {
        positions.push((old, new));
        match op {
            Op::Equal => {
                old += 1;
                new += 1;
            }
            Op::Delete => old += 1,
            Op::Insert => new += 1,
        }
    }
    positions.push((old, new));

    let changes: Vec<usize> = script
        .iter()
        .enumerate()
        .filter(|(_, op)| **op != Op::Equal)
        .map(|(idx, _)| idx)
        .collect();

    let mut groups: Vec<(usize, usize)> = Vec::new();
    for idx in changes {
        match groups.last_mut() {
            Some((_, last)) if idx - *last <= 2 * context + 1 => *last = idx,
            _ => groups.push((idx, idx)),
        }
    }

    groups
        .into_iter()
        .map(|(first, last)| {
            let start = first.saturating_sub(context);
            let end = (last + 1 + context).min(script.len());
            let (old_start, new_start) = positions[start];
            let (old_end, new_end) = positions[end];
            let lines = (start..end)
                .map(|step| {
                    let (o, n) = positions[step];
                    match script[step] {
                        Op::Equal => DiffLine::Context(before[o].to_string()),
                        Op::Delete => DiffLine::Removed(before[o].to_string()),
                        Op::Insert => DiffLine::Added(after[n].to_string()),
                    }
                })
                .collect();
            Hunk {
                old_start,
                old_len: old_end - old_start,
                new_start,
                new_len: new_end - new_start,
                lines,
            }
        })
        .collect()
}

fn edit_script(before: &[&str], after: &[&str]) -> Vec<Op> {
    let max_d = (before.len() + after.len() + 1) / 2 + 1;
    let mut forward = Frontier::new(max_d);
    let mut backward = Frontier::new(max_d);
    let mut script = Vec::with_capacity(before.len() + after.len());
    conquer(before, after, &mut forward, &mut backward, &mut script);
    deletions_first(script)
}

/// Furthest x reached on each diagonal `k = x - y`, indexed by `k`.
struct Frontier {
    offset: isize,
    x: Vec<usize>,
}

impl Frontier {
    fn new(max_d: usize) -> Self {
        Self {
            offset: max_d as isize,
            x: vec![0; 2 * max_d + 1],
        }
    }
}

impl Index<isize> for Frontier {
    type Output = usize;

    fn index(&self, k: isize) -> &usize {
        &self.x[(k + self.offset) as usize]
    }
}

impl IndexMut<isize> for Frontier {
    fn index_mut(&mut self, k: isize) -> &mut usize {
        &mut self.x[(k + self.offset) as usize]
    }
}

// Myers' linear-space variant: strip the common ends, split the rest at its
// middle snake and recurse on both halves. Memory stays O(N + M).
fn conquer(
    a: &[&str],
    b: &[&str],
    forward: &mut Frontier,
    backward: &mut Frontier,
    script: &mut Vec<Op>,
) {
    let prefix = common_prefix(a, b);
    script.extend(repeat(Op::Equal).take(prefix));
    let (a, b) = (&a[prefix..], &b[prefix..]);

    let suffix = common_suffix(a, b);
    let (a, b) = (&a[..a.len() - suffix], &b[..b.len() - suffix]);

    if a.is_empty() {
        script.extend(repeat(Op::Insert).take(b.len()));
    } else if b.is_empty() {
        script.extend(repeat(Op::Delete).take(a.len()));
    } else {
        match middle_snake(a, b, forward, backward).and_then(|(x, y)| split_point(x, y, a, b)) {
            Some((x, y)) => {
                conquer(&a[..x], &b[..y], forward, backward, script);
                conquer(&a[x..], &b[y..], forward, backward, script);
            }
            None => {
                script.extend(repeat(Op::Delete).take(a.len()));
                script.extend(repeat(Op::Insert).take(b.len()));
            }
        }
    }

    script.extend(repeat(Op::Equal).take(suffix));
}

/// Point where the forward and backward searches overlap, as `(x, y)` in
/// the coordinates of `a` and `b`.
fn middle_snake(
    a: &[&str],
    b: &[&str],
    forward: &mut Frontier,
    backward: &mut Frontier,
) -> Option<(isize, isize)> {
    let (n, m) = (a.len(), b.len());
    let delta = n as isize - m as isize;
    let odd = delta & 1 == 1;
    let d_max = ((n + m + 1) / 2 + 1) as isize;
    forward[1] = 0;
    backward[1] = 0;

    for d in 0..d_max {
        for k in (-d..=d).rev().step_by(2) {
            let x0 = if k == -d || (k != d && forward[k - 1] < forward[k + 1]) {
                forward[k + 1]
            } else {
                forward[k - 1] + 1
            };
            let y0 = x0 as isize - k;
            let mut x = x0;
            if x0 < n && (0..m as isize).contains(&y0) {
                x += common_prefix(&a[x0..], &b[y0 as usize..]);
            }
            forward[k] = x;
            if odd && (k - delta).abs() < d && x + backward[delta - k] >= n {
                return Some((x0 as isize, y0));
            }
        }

        for k in (-d..=d).rev().step_by(2) {
            let x0 = if k == -d || (k != d && backward[k - 1] < backward[k + 1]) {
                backward[k + 1]
            } else {
                backward[k - 1] + 1
            };
            let y0 = x0 as isize - k;
            let (mut x, mut y) = (x0, y0);
            if x0 < n && (0..m as isize).contains(&y0) {
                let run = common_suffix(&a[..n - x0], &b[..m - y0 as usize]);
                x += run;
                y += run as isize;
            }
            backward[k] = x;
            if !odd && (k - delta).abs() <= d && x + forward[delta - k] >= n {
                return Some((n as isize - x as isize, m as isize - y));
            }
        }
    }
    None
}

/// A split that leaves both halves strictly smaller than the whole.
fn split_point(x: isize, y: isize, a: &[&str], b: &[&str]) -> Option<(usize, usize)> {
    let x = usize::try_from(x).ok().filter(|x| *x <= a.len())?;
    let y = usize::try_from(y).ok().filter(|y| *y <= b.len())?;
    let trivial = (x, y) == (0, 0) || (x, y) == (a.len(), b.len());
    (!trivial).then_some((x, y))
}

fn common_prefix(a: &[&str], b: &[&str]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix(a: &[&str], b: &[&str]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Within each run of changes, removed lines come before added lines.
fn deletions_first(script: Vec<Op>) -> Vec<Op> {
    let mut out = Vec::with_capacity(script.len());
    let mut pending_inserts = 0;
    for op in script {
        match op {
            Op::Equal => {
                out.extend(repeat(Op::Insert).take(pending_inserts));
                pending_inserts = 0;
                out.push(Op::Equal);
            }
            Op::Delete => out.push(Op::Delete),
            Op::Insert => pending_inserts += 1,
        }
    }
    out.extend(repeat(Op::Insert).take(pending_inserts));
    out
}

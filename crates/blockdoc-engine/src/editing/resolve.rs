//! Maps operation targets onto top-level block indices.

use std::ops::RangeInclusive;

use super::apply::SkipReason;
use super::ops::Target;

/// How a numeric target is clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// A gap between blocks: `0..=len`.
    Insertion,
    /// An existing block: `0..=len-1`.
    Existing,
}

/// Resolves targets against lower-cased block previews.
pub struct TargetResolver {
    previews: Vec<String>,
}

impl TargetResolver {
    pub fn new<I, S>(previews: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            previews: previews
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.previews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.previews.is_empty()
    }

    /// Numeric targets are clamped and never fail unless an existing block is
    /// required and there is none. Text targets match the first preview at or
    /// after `from` that contains the text, ignoring case.
    pub fn resolve(&self, target: &Target, from: usize, bound: Bound) -> Option<usize> {
        match target {
            Target::Index(index) => {
                let max = match bound {
                    Bound::Insertion => self.len(),
                    Bound::Existing => self.len().checked_sub(1)?,
                };
                Some(usize::try_from(*index).unwrap_or(0).min(max))
            }
            Target::Text(text) => {
                let needle = text.trim().to_lowercase();
                if needle.is_empty() {
                    return None;
                }
                self.previews
                    .iter()
                    .enumerate()
                    .skip(from)
                    .find(|(_, preview)| preview.contains(&needle))
                    .map(|(i, _)| i)
            }
        }
    }

    /// Inclusive range of existing blocks from `target` to `end`. The end is
    /// searched from the start onward; a numeric end before the start is
    /// swapped.
    pub fn range(
        &self,
        target: &Target,
        end: Option<&Target>,
    ) -> Result<RangeInclusive<usize>, SkipReason> {
        if self.is_empty() {
            return Err(SkipReason::EmptyDocument);
        }
        let start = self
            .resolve(target, 0, Bound::Existing)
            .ok_or_else(|| SkipReason::TargetNotFound(target.clone()))?;
        let stop = match end {
            None => start,
            Some(end) => self
                .resolve(end, start, Bound::Existing)
                .ok_or_else(|| SkipReason::EndTargetNotFound(end.clone()))?,
        };
        Ok(start.min(stop)..=start.max(stop))
    }
}

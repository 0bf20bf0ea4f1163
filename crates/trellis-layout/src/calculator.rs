//! Main-axis size distribution for stack layouts.
//!
//! Non-factor children keep their resolved extent. The space they leave is
//! shared between factor children in proportion to their weights. Whenever a
//! share violates a child's minimum or maximum, that child is locked at the
//! bound and the rest of the space is shared again among the others.

use smallvec::SmallVec;
use trellis_core::AttachedSize;

/// Main-axis sizing input for one child.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeRequest {
    /// Current main-axis extent of the child
    pub current: i32,
    /// Sizing directive along the main axis
    pub sizing: AttachedSize,
    /// Effective minimum extent (0 = none)
    pub minimum: i32,
    /// Maximum extent (0 = unbounded)
    pub maximum: i32,
    /// Sum of the two margins on the main axis
    pub margin: i32,
}

impl SizeRequest {
    pub fn new(current: i32, sizing: AttachedSize) -> Self {
        Self {
            current,
            sizing,
            ..Default::default()
        }
    }

    pub fn with_minimum(mut self, minimum: i32) -> Self {
        self.minimum = minimum;
        self
    }

    pub fn with_maximum(mut self, maximum: i32) -> Self {
        self.maximum = maximum;
        self
    }

    pub fn with_margin(mut self, margin: i32) -> Self {
        self.margin = margin;
        self
    }

    /// Lower `extent` to the maximum, if there is one.
    fn cap(&self, extent: i32) -> i32 {
        if self.maximum != 0 {
            extent.min(self.maximum)
        } else {
            extent
        }
    }

    /// Extent of a non-factor child, raised to its minimum and capped at its
    /// maximum.
    fn resolved(&self) -> Option<i32> {
        match self.sizing {
            AttachedSize::Unchanged => Some(self.cap(self.current.max(self.minimum))),
            AttachedSize::Fixed(n) => Some(self.cap(n.max(self.minimum))),
            AttachedSize::Factor(_) => None,
        }
    }

    /// The bound a proportional share runs into, if any.
    fn limit(&self, tentative: i32) -> Option<i32> {
        if self.maximum != 0 && self.maximum <= tentative {
            Some(self.maximum)
        } else if self.minimum != 0 && self.minimum >= tentative {
            Some(self.cap(self.minimum))
        } else {
            None
        }
    }
}

fn share(remaining: i32, weight: f64, factor_sum: f64) -> i32 {
    if weight <= 0.0 || factor_sum <= 0.0 {
        return 0;
    }
    (remaining as f64 * weight / factor_sum) as i32
}

/// Compute the main-axis extent (excluding margin) of every request.
///
/// The result is index-aligned with `requests`.
pub fn distribute(available: i32, requests: &[SizeRequest]) -> Vec<i32> {
    let mut used = 0;
    let mut factor_sum = 0.0;
    let mut degenerate = 0usize;
    for request in requests {
        used += request.margin + request.resolved().unwrap_or(0);
        factor_sum += request.sizing.effective_weight();
        if request.sizing.is_factor() && request.sizing.effective_weight() == 0.0 {
            degenerate += 1;
        }
    }

    if degenerate > 0 {
        tracing::warn!(
            count = degenerate,
            "factor sizing with a non-positive weight receives no proportional space"
        );
    }

    let mut remaining = (available - used).max(0);
    let mut sizes: Vec<i32> = requests
        .iter()
        .map(|r| r.resolved().unwrap_or(0))
        .collect();
    let mut pending: SmallVec<[usize; 8]> = requests
        .iter()
        .enumerate()
        .filter(|(_, r)| r.sizing.is_factor())
        .map(|(i, _)| i)
        .collect();

    let mut pass = 0;
    loop {
        pass += 1;
        let mut locked: SmallVec<[usize; 8]> = SmallVec::new();
        for &i in &pending {
            let request = &requests[i];
            let tentative = share(remaining, request.sizing.effective_weight(), factor_sum);
            match request.limit(tentative) {
                Some(bound) => {
                    sizes[i] = bound;
                    locked.push(i);
                }
                None => sizes[i] = tentative,
            }
        }

        tracing::trace!(pass, remaining, factor_sum, locked = locked.len(), "factor pass");

        if locked.is_empty() {
            break;
        }

        for &i in &locked {
            remaining = (remaining - sizes[i]).max(0);
            factor_sum -= requests[i].sizing.effective_weight();
        }
        pending.retain(|i| !locked.contains(i));
    }

    sizes
}

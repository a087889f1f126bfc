//! Linear conversation scripts.
//!
//! Some agents do not extract fields at all; they walk a fixed sequence of
//! steps, advancing exactly one step per turn regardless of what the caller
//! said. The wellness check-in is the canonical user.

/// A strictly linear script over named steps.
///
/// Not a graph: the only transition is "advance to the next step", and the
/// terminal state is reached when every step has been consumed.
#[derive(Debug, Clone)]
pub struct LinearScript {
    steps: &'static [&'static str],
    position: usize,
}

impl LinearScript {
    pub fn new(steps: &'static [&'static str]) -> Self {
        Self { steps, position: 0 }
    }

    /// The step the conversation is currently on, or `None` once done.
    pub fn current(&self) -> Option<&'static str> {
        self.steps.get(self.position).copied()
    }

    /// Moves to the next step and returns it, or `None` if the script is
    /// exhausted.
    pub fn advance(&mut self) -> Option<&'static str> {
        if self.position < self.steps.len() {
            self.position += 1;
        }
        self.current()
    }

    /// Whether every step has been consumed.
    pub fn is_done(&self) -> bool {
        self.position >= self.steps.len()
    }

    /// Steps completed so far, in order.
    pub fn completed(&self) -> &[&'static str] {
        &self.steps[..self.position.min(self.steps.len())]
    }
}
